//! Plate-map CSV: which accession (or control label) sits in which well.
//!
//! Rows are `timestamp,accession,well`; metadata lines start with '%'.
//! Placeholder names mark wells that hold no sample and are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::plate::{EMPTY_WELL_NAMES, PlateFormat, Well};

pub fn read_plate_map(path: &Path) -> Result<BTreeMap<Well, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plate map {}", path.display()))?;
    parse_plate_map(&content, &path.display().to_string())
}

pub fn parse_plate_map(content: &str, source: &str) -> Result<BTreeMap<Well, String>> {
    let mut accessions = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_start_matches('\u{feff}');
        if line.trim().is_empty() || line.starts_with('%') {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let (Some(_timestamp), Some(accession), Some(well)) =
            (fields.next(), fields.next(), fields.next())
        else {
            anyhow::bail!("{source}:{line_no} expected timestamp,accession,well");
        };
        if EMPTY_WELL_NAMES.contains(&accession) {
            continue;
        }
        let well = Well::parse(well, PlateFormat::W96)
            .with_context(|| format!("{source}:{line_no}"))?;
        accessions.insert(well, accession.to_string());
    }
    Ok(accessions)
}
