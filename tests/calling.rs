use std::collections::HashMap;

use kira_ampliqc::calling::{Call, ControlType};
use kira_ampliqc::protocol::{SOP_V2, SOP_V3};

const ND: f64 = f64::NAN;

fn values(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(gene, cq)| (gene.to_string(), *cq))
        .collect()
}

#[test]
fn well_calling_v2() {
    let cases: &[(&[(&str, f64)], Call)] = &[
        (&[("N", ND), ("E", ND), ("RNAse P", ND)], Call::Inv),
        (&[("N", ND), ("E", ND), ("RNAse P", 39.0)], Call::Inv),
        (&[("N", ND), ("E", ND), ("RNAse P", 35.4)], Call::Neg),
        (&[("N", ND), ("E", 42.1), ("RNAse P", 35.4)], Call::Ind),
        (&[("N", ND), ("E", 42.1), ("RNAse P", ND)], Call::Ind),
        (&[("N", 20.0), ("E", ND), ("RNAse P", ND)], Call::Ind),
        (&[("N", 20.0), ("E", 42.1), ("RNAse P", ND)], Call::Ind),
        (&[("N", 20.0), ("E", 42.1), ("RNAse P", 36.0)], Call::Ind),
        (&[("N", 41.4), ("E", 42.1), ("RNAse P", ND)], Call::Ind),
        (&[("N", 41.4), ("E", 42.1), ("RNAse P", 38.0)], Call::Ind),
        (&[("N", 31.4), ("E", 32.1), ("RNAse P", ND)], Call::Pos),
        (&[("N", 31.4), ("E", 39.9), ("RNAse P", 33.4)], Call::Pos),
        (&[("N", 31.4), ("E", 32.1), ("RNAse P", 42.4)], Call::Pos),
    ];
    for (entries, expected) in cases {
        let call = SOP_V2.classify_sample(&values(entries));
        assert_eq!(call, *expected, "SOP-V2 {entries:?}");
    }
}

#[test]
fn well_calling_v3() {
    // same measurements as V2, but ambiguous viral signal goes to review
    let cases: &[(&[(&str, f64)], Call)] = &[
        (&[("N", ND), ("E", ND), ("RNAse P", ND)], Call::Inv),
        (&[("N", ND), ("E", ND), ("RNAse P", 44.9)], Call::Neg),
        (&[("N", ND), ("E", 42.1), ("RNAse P", 35.4)], Call::PosReview),
        (&[("N", ND), ("E", 42.1), ("RNAse P", ND)], Call::PosReview),
        (&[("N", 20.0), ("E", ND), ("RNAse P", ND)], Call::PosReview),
        (&[("N", 20.0), ("E", 42.1), ("RNAse P", ND)], Call::PosReview),
        (
            &[("N", 20.0), ("E", 42.1), ("RNAse P", 36.0)],
            Call::PosReview,
        ),
        (&[("N", 41.4), ("E", 42.1), ("RNAse P", ND)], Call::PosReview),
        (
            &[("N", 41.4), ("E", 42.1), ("RNAse P", 38.0)],
            Call::PosReview,
        ),
        (&[("N", 31.4), ("E", 32.1), ("RNAse P", ND)], Call::Pos),
        (&[("N", 31.4), ("E", 39.9), ("RNAse P", 33.4)], Call::Pos),
        (&[("N", 31.4), ("E", 32.1), ("RNAse P", 42.4)], Call::Pos),
    ];
    for (entries, expected) in cases {
        let call = SOP_V3.classify_sample(&values(entries));
        assert_eq!(call, *expected, "SOP-V3 {entries:?}");
    }
}

#[test]
fn control_calling() {
    let cases: &[(ControlType, &[(&str, f64)], Call)] = &[
        (
            ControlType::Ntc,
            &[("N", ND), ("E", ND), ("RNAse P", ND)],
            Call::Pass,
        ),
        (
            ControlType::Ntc,
            &[("N", ND), ("E", ND), ("RNAse P", 38.0)],
            Call::Fail,
        ),
        (
            ControlType::Ntc,
            &[("N", 45.2), ("E", ND), ("RNAse P", ND)],
            Call::Fail,
        ),
        (
            ControlType::Pbs,
            &[("N", ND), ("E", ND), ("RNAse P", ND)],
            Call::Pass,
        ),
        (
            ControlType::Pbs,
            &[("N", 40.2), ("E", ND), ("RNAse P", ND)],
            Call::Fail,
        ),
        (
            ControlType::Pc,
            &[("N", 30.1), ("E", 31.1), ("RNAse P", 32.0)],
            Call::Pass,
        ),
        (
            ControlType::Pc,
            &[("N", 30.1), ("E", 29.9), ("RNAse P", 38.0)],
            Call::Fail,
        ),
        (
            ControlType::Pc,
            &[("N", 38.1), ("E", 29.9), ("RNAse P", 38.0)],
            Call::Fail,
        ),
        (
            ControlType::Pc,
            &[("N", ND), ("E", 29.9), ("RNAse P", 32.0)],
            Call::Fail,
        ),
        (
            ControlType::Hrc,
            &[("N", ND), ("E", ND), ("RNAse P", 29.0)],
            Call::Pass,
        ),
        (
            ControlType::Hrc,
            &[("N", ND), ("E", 29.9), ("RNAse P", 32.0)],
            Call::Fail,
        ),
        (
            ControlType::Hrc,
            &[("N", ND), ("E", ND), ("RNAse P", 39.0)],
            Call::Fail,
        ),
        (
            ControlType::Hrc,
            &[("N", ND), ("E", 42.0), ("RNAse P", 39.0)],
            Call::Fail,
        ),
        (
            ControlType::Hrc,
            &[("N", 43.1), ("E", ND), ("RNAse P", ND)],
            Call::Fail,
        ),
    ];
    for protocol in [&SOP_V2, &SOP_V3] {
        for (control_type, entries, expected) in cases {
            let call = protocol.classify_control(&values(entries), *control_type);
            assert_eq!(
                call, *expected,
                "{} {control_type:?} {entries:?}",
                protocol.name
            );
        }
    }
}

#[test]
fn classification_is_idempotent() {
    let vals = values(&[("N", 31.4), ("E", 42.1), ("RNAse P", 35.4)]);
    let first = SOP_V2.classify_sample(&vals);
    for _ in 0..3 {
        assert_eq!(SOP_V2.classify_sample(&vals), first);
    }
}

#[test]
fn genes_outside_protocol_are_ignored() {
    // an extra gene the protocol does not know about changes nothing
    let vals = values(&[("N", ND), ("E", ND), ("RNAse P", 35.4), ("ORF1ab", 12.0)]);
    assert_eq!(SOP_V2.classify_sample(&vals), Call::Neg);
}
