//! Discovery of one barcode's instrument exports in a run directory.
//!
//! Files are named `{barcode}{extras}- {file type}[_{fluor}].csv`, e.g.
//! `SB1001_All Wells -  Quantification Cq Results.csv`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::plate::demux::Fluor;

pub const RUN_INFO: &str = "Run Information";
pub const QUANT_CQ: &str = "Quantification Cq Results";
pub const QUANT_AMP: &str = "Quantification Amplification Results";

/// The files one processing pass needs. Amplification exports are
/// discovered but only feed the excluded plotting surfaces.
#[derive(Debug, Default)]
pub struct RunFiles {
    pub run_info: Option<PathBuf>,
    pub quant_cq: Option<PathBuf>,
    pub quant_amp: HashMap<Fluor, PathBuf>,
}

impl RunFiles {
    pub fn discover(dir: &Path, barcode: &str) -> Result<RunFiles> {
        let mut files = RunFiles::default();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read run directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            match qpcr_file_type(name, barcode) {
                Some((RUN_INFO, None)) => files.run_info = Some(path),
                Some((QUANT_CQ, None)) => files.quant_cq = Some(path),
                Some((QUANT_AMP, Some(fluor))) => {
                    files.quant_amp.insert(fluor, path);
                }
                _ => {}
            }
        }
        Ok(files)
    }

    pub fn complete(&self) -> bool {
        self.run_info.is_some() && self.quant_cq.is_some() && !self.quant_amp.is_empty()
    }
}

/// Classify an export filename for `barcode`; None if it belongs to another
/// barcode or is not a file type we track.
pub fn qpcr_file_type(name: &str, barcode: &str) -> Option<(&'static str, Option<Fluor>)> {
    let rest = name.strip_prefix(barcode)?;
    let stem = rest.strip_suffix(".csv")?;
    let (_, after_dash) = stem.rsplit_once('-')?;
    let file_type = after_dash.trim_start();

    if file_type == RUN_INFO {
        return Some((RUN_INFO, None));
    }
    if file_type == QUANT_CQ {
        return Some((QUANT_CQ, None));
    }
    if let Some(suffix) = file_type.strip_prefix(QUANT_AMP) {
        let fluor = Fluor::parse(suffix.strip_prefix('_')?).ok()?;
        return Some((QUANT_AMP, Some(fluor)));
    }
    None
}
