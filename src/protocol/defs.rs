//! The named protocol revisions.
//!
//! New revisions are added as new statics; existing ones are never edited
//! in place once a plate has shipped under them.

use super::{BASE_OPS, FluorChannel, GeneDef, GeneThresholds, Protocol, V3_OPS};
use crate::plate::demux::{Fluor, MappedWell};

const fn cq_thresholds(
    sample: Option<f64>,
    pc: Option<f64>,
    ntc: Option<f64>,
    hrc: Option<f64>,
    pbs: Option<f64>,
) -> GeneThresholds {
    GeneThresholds::new(sample, pc, ntc, hrc, pbs)
}

pub static SOP_V1: Protocol = Protocol {
    name: "SOP-V1",
    experimental: false,
    prcl_file: "Covid19_protocol.prcl",
    pltd_file: "Covid19_platelayout.pltd",
    virus_genes: &[
        GeneDef {
            name: "RdRp",
            thresholds: cq_thresholds(Some(40.0), Some(40.0), None, None, None),
        },
        GeneDef {
            name: "E",
            thresholds: cq_thresholds(Some(40.0), Some(40.0), None, None, None),
        },
    ],
    control_genes: &[GeneDef {
        name: "RNAse P",
        thresholds: cq_thresholds(Some(40.0), Some(40.0), None, Some(40.0), None),
    }],
    mapping: &[FluorChannel {
        fluor: Fluor::Fam,
        genes: &[
            (MappedWell::A1, "RdRp"),
            (MappedWell::A2, "E"),
            (MappedWell::B1, "RNAse P"),
        ],
    }],
    background_threshold: 200,
    // single-well plates under V1 never had cluster flagging
    radius: 0,
    pos_cluster_cutoff: 10.0,
    hot_well_radius: 3,
    hot_well_cutoff: 22.0,
    ops: &BASE_OPS,
};

pub static SOP_V2: Protocol = Protocol {
    name: "SOP-V2",
    experimental: false,
    prcl_file: "Covid19-LUNA_protocol.prcl",
    pltd_file: "Covid19-v2_platelayout.pltd",
    virus_genes: &[
        GeneDef {
            name: "N",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
        GeneDef {
            name: "E",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
    ],
    control_genes: &[GeneDef {
        name: "RNAse P",
        thresholds: cq_thresholds(Some(36.0), Some(38.0), None, Some(36.0), None),
    }],
    mapping: &[
        FluorChannel {
            fluor: Fluor::Fam,
            genes: &[(MappedWell::A1, "N"), (MappedWell::A2, "E")],
        },
        FluorChannel {
            fluor: Fluor::Hex,
            genes: &[(MappedWell::B1, "RNAse P")],
        },
    ],
    background_threshold: 200,
    radius: 1,
    pos_cluster_cutoff: 10.0,
    hot_well_radius: 3,
    hot_well_cutoff: 22.0,
    ops: &BASE_OPS,
};

/// Uracil-DNA-glycosylase master-mix trial; thresholds match SOP-V2.
pub static UDG_PROTOCOL: Protocol = Protocol {
    name: "UDGprotocol",
    experimental: true,
    prcl_file: "Covid19-UDG.prcl",
    pltd_file: "Covid19-v2_platelayout.pltd",
    virus_genes: &[
        GeneDef {
            name: "N",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
        GeneDef {
            name: "E",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
    ],
    control_genes: &[GeneDef {
        name: "RNAse P",
        thresholds: cq_thresholds(Some(36.0), Some(38.0), None, Some(36.0), None),
    }],
    mapping: &[
        FluorChannel {
            fluor: Fluor::Fam,
            genes: &[(MappedWell::A1, "N"), (MappedWell::A2, "E")],
        },
        FluorChannel {
            fluor: Fluor::Hex,
            genes: &[(MappedWell::B1, "RNAse P")],
        },
    ],
    background_threshold: 300,
    radius: 1,
    pos_cluster_cutoff: 10.0,
    hot_well_radius: 3,
    hot_well_cutoff: 22.0,
    ops: &BASE_OPS,
};

pub static SOP_V3: Protocol = Protocol {
    name: "SOP-V3",
    experimental: false,
    prcl_file: "Covid19-LUNA_protocol.prcl",
    pltd_file: "Covid19-v2_platelayout.pltd",
    virus_genes: &[
        GeneDef {
            name: "N",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
        GeneDef {
            name: "E",
            thresholds: cq_thresholds(Some(40.0), Some(38.0), None, None, None),
        },
    ],
    // no sample ceiling on RNAse P: any detected host signal counts
    control_genes: &[GeneDef {
        name: "RNAse P",
        thresholds: cq_thresholds(None, Some(38.0), None, Some(36.0), None),
    }],
    mapping: &[
        FluorChannel {
            fluor: Fluor::Fam,
            genes: &[(MappedWell::A1, "N"), (MappedWell::A2, "E")],
        },
        FluorChannel {
            fluor: Fluor::Hex,
            genes: &[(MappedWell::B1, "RNAse P")],
        },
    ],
    background_threshold: 300,
    radius: 1,
    pos_cluster_cutoff: 15.0,
    hot_well_radius: 3,
    hot_well_cutoff: 22.0,
    ops: &V3_OPS,
};
