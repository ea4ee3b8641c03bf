use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetaV1 {
    pub pcr_barcode: String,
    pub sample_barcode: Option<String>,
    pub rna_barcode: Option<String>,
    pub completion_time: Option<String>,
    pub researcher: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlV1 {
    pub well: String,
    pub control_type: String,
    pub call: String,
    /// What the control needed, present when it failed.
    pub failure_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellRowV1 {
    pub well: String,
    pub accession: Option<String>,
    pub call: String,
    pub call_label: String,
    pub rerun: bool,
    /// Gene -> Cq; null means not detected.
    pub cqs: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallCountsV1 {
    pub positive: u32,
    pub review: u32,
    pub cluster: u32,
    pub hot_well: u32,
    pub negative: u32,
    pub invalid: u32,
    pub indeterminate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub metadata: RunMetaV1,
    pub protocol: String,
    pub experimental: bool,
    pub controls_status: String,
    pub controls: Vec<ControlV1>,
    pub counts: CallCountsV1,
    pub wells: Vec<WellRowV1>,
}
