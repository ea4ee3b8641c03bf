//! Spatial contamination flagging over a classified plate.
//!
//! A genuinely strong positive can bleed into nearby wells and make them
//! read weakly positive. The scan walks every positive well and compares it
//! against the wells in a square neighborhood; a candidate whose signal is
//! `cutoff` cycles weaker (later) than a neighbor's gets its call escalated
//! to the pass's flag.

use crate::calling::Call;
use crate::plate::{Plate, Well, WellResult};
use crate::protocol::Protocol;

/// Mean virus-gene comparison used by the base protocols. Any undetected
/// virus gene turns a mean into NaN, and NaN comparisons are false: a pair
/// with incomplete data never escalates.
pub(crate) fn compare_virus_mean(
    protocol: &Protocol,
    results: &WellResult,
    other: &WellResult,
    cutoff: f64,
) -> bool {
    virus_mean(protocol, results) - virus_mean(protocol, other) > cutoff
}

fn virus_mean(protocol: &Protocol, results: &WellResult) -> f64 {
    let mut sum = 0.0;
    for gene in protocol.virus_genes {
        sum += results.cq(gene.name);
    }
    sum / protocol.virus_genes.len() as f64
}

/// V3 comparison: each virus gene separately, OR'd together. One
/// contaminated gene is enough evidence.
pub(crate) fn compare_any_virus_gene(
    protocol: &Protocol,
    results: &WellResult,
    other: &WellResult,
    cutoff: f64,
) -> bool {
    protocol
        .virus_genes
        .iter()
        .any(|g| results.cq(g.name) - other.cq(g.name) > cutoff)
}

/// One scan pass: collect the positive wells whose signal is `cutoff`
/// cycles weaker than some well within `radius`. Pure; escalation is
/// applied by the caller, so a pass sees a consistent pre-pass plate and
/// well order cannot affect the outcome.
pub fn scan_square(protocol: &Protocol, plate: &Plate, radius: i32, cutoff: f64) -> Vec<Well> {
    let mut flagged = Vec::new();
    for (well, results) in plate.iter() {
        if !results.call.can_escalate() {
            continue;
        }
        // The square includes the candidate itself; a well has no
        // difference with itself, so the self-comparison never fires.
        for other in plate.square(well, radius) {
            if protocol.compare_wells(results, other, cutoff) {
                flagged.push(well);
                break;
            }
        }
    }
    flagged
}

fn escalate_all(plate: &mut Plate, wells: Vec<Well>, flag: Call) {
    for well in wells {
        plate.escalate(well, flag);
    }
}

/// Base protocols run a single neighbor-cluster pass.
pub(crate) fn flag_cluster(protocol: &Protocol, plate: &mut Plate) {
    let flagged = scan_square(protocol, plate, protocol.radius, protocol.pos_cluster_cutoff);
    escalate_all(plate, flagged, Call::PosCluster);
}

/// V3 runs two passes: a wide, high-cutoff hot-well pass first, then the
/// narrow cluster pass. A well flagged hot is no longer a candidate for the
/// cluster pass, so the hot-well label wins when both would fire.
pub(crate) fn flag_hot_well_then_cluster(protocol: &Protocol, plate: &mut Plate) {
    let hot = scan_square(
        protocol,
        plate,
        protocol.hot_well_radius,
        protocol.hot_well_cutoff,
    );
    escalate_all(plate, hot, Call::PosHotwell);

    let clustered = scan_square(protocol, plate, protocol.radius, protocol.pos_cluster_cutoff);
    escalate_all(plate, clustered, Call::PosCluster);
}
