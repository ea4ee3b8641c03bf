use std::collections::HashMap;

use kira_ampliqc::calling::{Call, ControlType};
use kira_ampliqc::plate::{Plate, PlateFormat, Well, WellResult};
use kira_ampliqc::protocol::{SOP_V1, SOP_V2, SOP_V3};

const ND: f64 = f64::NAN;

fn well_result(
    entries: &[(&str, f64)],
    call: Call,
    control_type: Option<ControlType>,
) -> WellResult {
    let gene_cqs: HashMap<String, f64> = entries
        .iter()
        .map(|(gene, cq)| (gene.to_string(), *cq))
        .collect();
    WellResult {
        accession: None,
        call,
        gene_cqs,
        control_type,
    }
}

fn plate_from(wells: &[(&str, WellResult)]) -> Plate {
    let mut plate = Plate::new(PlateFormat::W96);
    for (name, results) in wells {
        plate.insert(Well::parse(name, PlateFormat::W96).unwrap(), results.clone());
    }
    plate
}

fn wells_with_call(plate: &Plate, call: Call) -> Vec<String> {
    plate
        .iter()
        .filter(|(_, r)| r.call == call)
        .map(|(w, _)| w.name())
        .collect()
}

/// The shared scenario from a real mixed plate corner.
fn corner_plate(classify_c2_as: Call) -> Plate {
    plate_from(&[
        (
            "A1",
            well_result(
                &[("N", ND), ("E", ND), ("RNAse P", ND)],
                Call::Pass,
                Some(ControlType::Ntc),
            ),
        ),
        (
            "A2",
            well_result(&[("N", 32.0), ("E", 21.0), ("RNAse P", 35.0)], Call::Pos, None),
        ),
        (
            "A3",
            well_result(&[("N", ND), ("E", ND), ("RNAse P", 22.0)], Call::Neg, None),
        ),
        (
            "B1",
            well_result(&[("N", 22.0), ("E", 35.0), ("RNAse P", ND)], Call::Pos, None),
        ),
        (
            "B2",
            well_result(&[("N", 37.0), ("E", 5.0), ("RNAse P", ND)], Call::Pos, None),
        ),
        (
            "B3",
            well_result(&[("N", 12.0), ("E", 7.0), ("RNAse P", 35.0)], Call::Pos, None),
        ),
        (
            "C1",
            well_result(&[("N", 35.0), ("E", 14.0), ("RNAse P", ND)], Call::Pos, None),
        ),
        (
            "C2",
            well_result(&[("N", 6.0), ("E", 44.0), ("RNAse P", ND)], classify_c2_as, None),
        ),
        (
            "C3",
            well_result(&[("N", 33.0), ("E", 32.0), ("RNAse P", ND)], Call::Pos, None),
        ),
    ])
}

#[test]
fn cluster_flagging_v2() {
    let mut plate = corner_plate(Call::Ind);
    SOP_V2.flag_contamination(&mut plate);
    assert_eq!(wells_with_call(&plate, Call::PosCluster), ["A2", "B2", "C3"]);
    // indeterminate and negative wells are untouched
    assert_eq!(plate.get(Well::parse("C2", PlateFormat::W96).unwrap()).unwrap().call, Call::Ind);
    assert_eq!(plate.get(Well::parse("A3", PlateFormat::W96).unwrap()).unwrap().call, Call::Neg);
}

#[test]
fn hot_well_pass_wins_over_cluster_v3() {
    // under V3's per-gene comparison, the wide hot-well pass claims every
    // weak positive in this corner before the cluster pass runs
    let mut plate = corner_plate(Call::PosReview);
    SOP_V3.flag_contamination(&mut plate);
    assert_eq!(
        wells_with_call(&plate, Call::PosHotwell),
        ["A2", "B1", "B2", "C1", "C2", "C3"]
    );
    assert!(wells_with_call(&plate, Call::PosCluster).is_empty());
    // the strong well is left alone
    assert_eq!(plate.get(Well::parse("B3", PlateFormat::W96).unwrap()).unwrap().call, Call::Pos);
}

#[test]
fn hot_well_flagging_v3() {
    let mut plate = plate_from(&[
        (
            "A2",
            well_result(&[("N", 38.0), ("E", 39.0), ("RNAse P", 40.0)], Call::Pos, None),
        ),
        (
            "D2",
            well_result(&[("N", 8.0), ("E", ND), ("RNAse P", 40.0)], Call::PosReview, None),
        ),
        (
            "D3",
            well_result(&[("N", 20.0), ("E", 20.0), ("RNAse P", ND)], Call::Pos, None),
        ),
        (
            "B4",
            well_result(&[("N", ND), ("E", 45.0), ("RNAse P", 29.0)], Call::PosReview, None),
        ),
        (
            "C4",
            well_result(&[("N", 31.0), ("E", 29.0), ("RNAse P", 40.0)], Call::Pos, None),
        ),
        (
            "D4",
            well_result(&[("N", 16.0), ("E", 20.0), ("RNAse P", 29.0)], Call::Pos, None),
        ),
        (
            "F4",
            well_result(&[("N", 31.0), ("E", 33.0), ("RNAse P", 20.0)], Call::Pos, None),
        ),
        (
            "D9",
            well_result(&[("N", 45.0), ("E", 45.0), ("RNAse P", 20.0)], Call::PosReview, None),
        ),
    ]);
    SOP_V3.flag_contamination(&mut plate);
    assert_eq!(
        wells_with_call(&plate, Call::PosHotwell),
        ["A2", "B4", "C4", "F4"]
    );
    assert!(wells_with_call(&plate, Call::PosCluster).is_empty());
    // D9 is far from everything and keeps its review call
    assert_eq!(plate.get(Well::parse("D9", PlateFormat::W96).unwrap()).unwrap().call, Call::PosReview);
}

#[test]
fn adjacent_weak_positive_is_clustered() {
    let mut plate = plate_from(&[
        (
            "A1",
            well_result(&[("N", 20.0), ("E", 20.0), ("RNAse P", 30.0)], Call::Pos, None),
        ),
        (
            "A2",
            well_result(&[("N", 35.0), ("E", 33.0), ("RNAse P", 30.0)], Call::Pos, None),
        ),
    ]);
    SOP_V2.flag_contamination(&mut plate);
    // the weaker (higher-Cq) well is flagged, the stronger is untouched
    assert_eq!(wells_with_call(&plate, Call::PosCluster), ["A2"]);
    assert_eq!(plate.get(Well::parse("A1", PlateFormat::W96).unwrap()).unwrap().call, Call::Pos);
}

#[test]
fn incomplete_virus_data_never_escalates() {
    // a missing virus gene poisons the mean, and NaN comparisons are false
    let mut plate = plate_from(&[
        (
            "A1",
            well_result(&[("N", 20.0), ("E", 20.0), ("RNAse P", 30.0)], Call::Pos, None),
        ),
        (
            "A2",
            well_result(&[("N", 35.0), ("E", ND), ("RNAse P", 30.0)], Call::Pos, None),
        ),
    ]);
    SOP_V2.flag_contamination(&mut plate);
    assert!(wells_with_call(&plate, Call::PosCluster).is_empty());
}

#[test]
fn radius_zero_never_escalates() {
    // SOP-V1 scans with radius 0: a well cannot be weaker than itself
    let mut plate = plate_from(&[
        (
            "A1",
            well_result(&[("RdRp", 39.0), ("E", 39.0), ("RNAse P", 30.0)], Call::Pos, None),
        ),
        (
            "A2",
            well_result(&[("RdRp", 10.0), ("E", 10.0), ("RNAse P", 30.0)], Call::Pos, None),
        ),
    ]);
    SOP_V1.flag_contamination(&mut plate);
    assert!(wells_with_call(&plate, Call::PosCluster).is_empty());
}

#[test]
fn escalate_only_touches_unescalated_positives() {
    let mut plate = plate_from(&[
        (
            "A1",
            well_result(&[("N", ND), ("E", ND), ("RNAse P", 30.0)], Call::Neg, None),
        ),
        (
            "A2",
            well_result(&[("N", 35.0), ("E", 35.0), ("RNAse P", 30.0)], Call::PosHotwell, None),
        ),
    ]);
    let a1 = Well::parse("A1", PlateFormat::W96).unwrap();
    let a2 = Well::parse("A2", PlateFormat::W96).unwrap();
    plate.escalate(a1, Call::PosCluster);
    plate.escalate(a2, Call::PosCluster);
    assert_eq!(plate.get(a1).unwrap().call, Call::Neg);
    assert_eq!(plate.get(a2).unwrap().call, Call::PosHotwell);
}
