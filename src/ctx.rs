use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::calling::ControlType;
use crate::io::run_files::RunFiles;
use crate::io::run_info::RunInfo;
use crate::plate::demux::{GeneMaps, QuantGrid};
use crate::plate::{ControlsLayout, Plate, Well};
use crate::protocol::Protocol;
use crate::schema::v1::PlateReportV1;

/// Run metadata carried into the results file header.
#[derive(Debug, Clone, Default)]
pub struct RunMetadata {
    pub sample_barcode: Option<String>,
    pub rna_barcode: Option<String>,
    pub pcr_barcode: String,
    pub completion_time: Option<String>,
    pub researcher: Option<String>,
    /// "Passed" iff every control well passed.
    pub controls: String,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub results_path: PathBuf,
    pub json_path: PathBuf,
}

/// Everything one plate-processing pass reads and produces; stages fill it
/// in order.
#[derive(Debug)]
pub struct Ctx {
    pub input_dir: PathBuf,
    pub barcode: String,
    pub protocol: &'static Protocol,
    pub controls_layout: ControlsLayout,
    pub plate_map_path: Option<PathBuf>,
    pub write_json: bool,
    pub run_files: RunFiles,
    pub run_info: Option<RunInfo>,
    pub quant_grid: Option<QuantGrid>,
    pub gene_maps: Option<GeneMaps>,
    pub accession_data: BTreeMap<Well, String>,
    pub control_wells: BTreeMap<Well, ControlType>,
    pub plate: Option<Plate>,
    pub metadata: RunMetadata,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: Option<PlateReportV1>,
}

impl Ctx {
    pub fn new(
        input_dir: PathBuf,
        out_dir: PathBuf,
        barcode: String,
        protocol: &'static Protocol,
        controls_layout: ControlsLayout,
        plate_map_path: Option<PathBuf>,
        write_json: bool,
    ) -> Self {
        let results_path = out_dir.join(format!("{barcode}-results.csv"));
        let json_path = out_dir.join(format!("{barcode}-results.json"));
        let metadata = RunMetadata {
            pcr_barcode: barcode.clone(),
            ..RunMetadata::default()
        };
        Self {
            input_dir,
            barcode,
            protocol,
            controls_layout,
            plate_map_path,
            write_json,
            run_files: RunFiles::default(),
            run_info: None,
            quant_grid: None,
            gene_maps: None,
            accession_data: BTreeMap::new(),
            control_wells: BTreeMap::new(),
            plate: None,
            metadata,
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                results_path,
                json_path,
            },
            report: None,
        }
    }
}
