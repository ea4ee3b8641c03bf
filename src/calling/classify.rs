//! Per-well classification against protocol thresholds.

use std::collections::HashMap;

use crate::calling::{Call, ControlType};
use crate::protocol::{Protocol, WellRole};

/// Gene name -> Cq. NaN is the not-detected sentinel; malformed values are
/// rejected upstream at the parse boundary.
pub type GeneCqs = HashMap<String, f64>;

fn detected(values: &GeneCqs, gene: &str) -> bool {
    values.get(gene).is_some_and(|v| !v.is_nan())
}

fn called(protocol: &Protocol, values: &GeneCqs, gene: &str, role: WellRole) -> bool {
    match values.get(gene) {
        Some(value) => protocol.call_cq_value(gene, *value, role),
        None => false,
    }
}

pub(crate) fn classify_sample_base(protocol: &Protocol, values: &GeneCqs) -> Call {
    let virus_detected = protocol
        .virus_genes
        .iter()
        .any(|g| detected(values, g.name));

    if virus_detected {
        // all viral genes below cutoff makes a clean positive
        let all_virus_called = protocol
            .virus_genes
            .iter()
            .all(|g| called(protocol, values, g.name, WellRole::Sample));
        if all_virus_called { Call::Pos } else { Call::Ind }
    } else {
        // no viral signal at all: the control genes decide whether the
        // well held viable material
        let controls_called = protocol
            .control_genes
            .iter()
            .all(|g| called(protocol, values, g.name, WellRole::Sample));
        if controls_called { Call::Neg } else { Call::Inv }
    }
}

/// V3 policy: ambiguous viral signal is treated as probably positive and
/// routed to human review instead of being reported indeterminate.
pub(crate) fn classify_sample_v3(protocol: &Protocol, values: &GeneCqs) -> Call {
    match classify_sample_base(protocol, values) {
        Call::Ind => Call::PosReview,
        call => call,
    }
}

pub(crate) fn classify_control(
    protocol: &Protocol,
    values: &GeneCqs,
    control_type: ControlType,
) -> Call {
    let role = WellRole::Control(control_type);
    let passed = match control_type {
        // nothing should light up in a blank
        ControlType::Ntc | ControlType::Pbs => !protocol
            .gene_defs()
            .any(|g| called(protocol, values, g.name, role)),
        // everything should light up below threshold
        ControlType::Pc => protocol
            .gene_defs()
            .all(|g| called(protocol, values, g.name, role)),
        // host gene present, no viral signal
        ControlType::Hrc => {
            protocol
                .control_genes
                .iter()
                .all(|g| called(protocol, values, g.name, role))
                && !protocol
                    .virus_genes
                    .iter()
                    .any(|g| called(protocol, values, g.name, role))
        }
    };
    if passed { Call::Pass } else { Call::Fail }
}

pub(crate) fn failure_details(protocol: &Protocol, control_type: ControlType) -> String {
    match control_type {
        ControlType::Ntc | ControlType::Pbs => protocol
            .gene_defs()
            .map(|g| format!("Need {} = ND", g.name))
            .collect::<Vec<_>>()
            .join(", "),
        ControlType::Pc => protocol
            .virus_genes
            .iter()
            .map(|g| match g.thresholds.pc {
                Some(cutoff) => format!("Need {} < {}", g.name, cutoff),
                None => format!("Need {} detected", g.name),
            })
            .collect::<Vec<_>>()
            .join(", "),
        ControlType::Hrc => {
            let virus = protocol
                .virus_genes
                .iter()
                .map(|g| format!("Need {} = ND", g.name))
                .collect::<Vec<_>>()
                .join(", ");
            let control = protocol
                .control_genes
                .iter()
                .map(|g| match g.thresholds.hrc {
                    Some(cutoff) => format!("{} < {}", g.name, cutoff),
                    None => format!("{} detected", g.name),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{virus} and {control}")
        }
    }
}
