//! Protocol configuration and registry.
//!
//! A protocol is an immutable static: threshold tables, the fluor wiring
//! map, and scan parameters. Revisions that change behavior (not just
//! numbers) carry their own `VariantOps` table, so adding a variant never
//! touches the shared operations.

mod defs;

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::calling::{Call, ControlType, classify, contamination};
use crate::plate::demux::{Fluor, MappedWell};
use crate::plate::{Plate, WellResult};

pub use defs::{SOP_V1, SOP_V2, SOP_V3, UDG_PROTOCOL};

/// Per-gene Cq ceilings by well role. `None` means any detected value
/// passes for that role.
#[derive(Debug, Clone, Copy)]
pub struct GeneThresholds {
    pub sample: Option<f64>,
    pub pc: Option<f64>,
    pub ntc: Option<f64>,
    pub hrc: Option<f64>,
    pub pbs: Option<f64>,
}

impl GeneThresholds {
    pub const fn new(
        sample: Option<f64>,
        pc: Option<f64>,
        ntc: Option<f64>,
        hrc: Option<f64>,
        pbs: Option<f64>,
    ) -> Self {
        Self {
            sample,
            pc,
            ntc,
            hrc,
            pbs,
        }
    }

    pub fn for_role(&self, role: WellRole) -> Option<f64> {
        match role {
            WellRole::Sample => self.sample,
            WellRole::Control(ControlType::Pc) => self.pc,
            WellRole::Control(ControlType::Ntc) => self.ntc,
            WellRole::Control(ControlType::Hrc) => self.hrc,
            WellRole::Control(ControlType::Pbs) => self.pbs,
        }
    }
}

/// What a well is expected to hold when a threshold is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellRole {
    Sample,
    Control(ControlType),
}

#[derive(Debug, Clone, Copy)]
pub struct GeneDef {
    pub name: &'static str,
    pub thresholds: GeneThresholds,
}

/// One dye channel of the wiring map: which quad position carries which
/// gene on this fluor.
#[derive(Debug, Clone, Copy)]
pub struct FluorChannel {
    pub fluor: Fluor,
    pub genes: &'static [(MappedWell, &'static str)],
}

/// The operations a protocol revision may override.
#[derive(Debug)]
pub struct VariantOps {
    pub classify_sample: fn(&Protocol, &HashMap<String, f64>) -> Call,
    pub compare_wells: fn(&Protocol, &WellResult, &WellResult, f64) -> bool,
    pub flag_contamination: fn(&Protocol, &mut Plate),
}

#[derive(Debug)]
pub struct Protocol {
    pub name: &'static str,
    pub experimental: bool,
    /// Instrument protocol file this run must have been exported from.
    pub prcl_file: &'static str,
    /// Instrument plate-setup file, likewise checked against run info.
    pub pltd_file: &'static str,
    pub virus_genes: &'static [GeneDef],
    pub control_genes: &'static [GeneDef],
    pub mapping: &'static [FluorChannel],
    /// Amplification-curve background cutoff (RFU), used by the excluded
    /// plotting surfaces; carried as configuration.
    pub background_threshold: u32,
    pub radius: i32,
    pub pos_cluster_cutoff: f64,
    pub hot_well_radius: i32,
    pub hot_well_cutoff: f64,
    pub ops: &'static VariantOps,
}

impl Protocol {
    /// Virus genes first, then control genes; this is the column order of
    /// every report.
    pub fn gene_defs(&self) -> impl Iterator<Item = &GeneDef> {
        self.virus_genes.iter().chain(self.control_genes.iter())
    }

    pub fn gene_list(&self) -> Vec<&'static str> {
        self.gene_defs().map(|g| g.name).collect()
    }

    pub fn cutoffs_for(&self, gene: &str) -> Option<&GeneThresholds> {
        self.gene_defs()
            .find(|g| g.name == gene)
            .map(|g| &g.thresholds)
    }

    pub fn is_virus_gene(&self, gene: &str) -> bool {
        self.virus_genes.iter().any(|g| g.name == gene)
    }

    pub fn is_control_gene(&self, gene: &str) -> bool {
        self.control_genes.iter().any(|g| g.name == gene)
    }

    /// Whether a Cq value passes the cutoff for (gene, role). Not-detected
    /// never passes; a gene outside this protocol never passes; a missing
    /// cutoff means any detected value passes.
    pub fn call_cq_value(&self, gene: &str, value: f64, role: WellRole) -> bool {
        if value.is_nan() {
            return false;
        }
        let Some(thresholds) = self.cutoffs_for(gene) else {
            return false;
        };
        match thresholds.for_role(role) {
            None => true,
            Some(cutoff) => value < cutoff,
        }
    }

    pub fn classify_sample(&self, values: &HashMap<String, f64>) -> Call {
        (self.ops.classify_sample)(self, values)
    }

    pub fn classify_control(&self, values: &HashMap<String, f64>, control_type: ControlType) -> Call {
        classify::classify_control(self, values, control_type)
    }

    /// Operator-facing explanation of what a failed control needed.
    pub fn failure_details(&self, control_type: ControlType) -> String {
        classify::failure_details(self, control_type)
    }

    pub fn compare_wells(&self, results: &WellResult, other: &WellResult, cutoff: f64) -> bool {
        (self.ops.compare_wells)(self, results, other, cutoff)
    }

    pub fn flag_contamination(&self, plate: &mut Plate) {
        (self.ops.flag_contamination)(self, plate)
    }
}

/// Shared operations for the structurally-identical protocol revisions.
static BASE_OPS: VariantOps = VariantOps {
    classify_sample: classify::classify_sample_base,
    compare_wells: contamination::compare_virus_mean,
    flag_contamination: contamination::flag_cluster,
};

/// V3 overrides: ambiguous samples go to review, contamination compares
/// genes individually, and a wide hot-well pass runs before the cluster pass.
static V3_OPS: VariantOps = VariantOps {
    classify_sample: classify::classify_sample_v3,
    compare_wells: contamination::compare_any_virus_gene,
    flag_contamination: contamination::flag_hot_well_then_cluster,
};

pub fn all_protocols() -> [&'static Protocol; 4] {
    [&SOP_V1, &SOP_V2, &UDG_PROTOCOL, &SOP_V3]
}

/// Resolve a protocol by its exact name.
pub fn get_protocol(name: &str) -> Result<&'static Protocol> {
    for protocol in all_protocols() {
        if protocol.name == name {
            return Ok(protocol);
        }
    }
    bail!("unknown protocol {name}")
}
