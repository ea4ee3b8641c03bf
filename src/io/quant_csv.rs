//! "Quantification Cq Results" export parsing.
//!
//! The instrument writes a comma-separated table whose columns we locate by
//! name (it also writes an unnamed index column and assorted extras we
//! ignore). Wells are zero-padded 384-format IDs.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::plate::demux::{Fluor, QuantGrid};
use crate::plate::{PlateFormat, Well};

const WELL_COLUMN: &str = "Well";
const FLUOR_COLUMN: &str = "Fluor";
const CQ_COLUMN: &str = "Cq";

pub fn read_quant_cq(path: &Path) -> Result<QuantGrid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read Cq results {}", path.display()))?;
    parse_quant_cq(&content, &path.display().to_string())
}

pub fn parse_quant_cq(content: &str, source: &str) -> Result<QuantGrid> {
    let mut lines = content.lines().enumerate();
    let (_, header) = lines
        .next()
        .with_context(|| format!("{source} is empty"))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let well_col = find_column(&columns, WELL_COLUMN, source)?;
    let fluor_col = find_column(&columns, FLUOR_COLUMN, source)?;
    let cq_col = find_column(&columns, CQ_COLUMN, source)?;
    let width = well_col.max(fluor_col).max(cq_col) + 1;

    let mut grid = QuantGrid::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < width {
            bail!("{source}:{line_no} truncated row");
        }
        let well = Well::parse(fields[well_col], PlateFormat::W384)
            .with_context(|| format!("{source}:{line_no}"))?;
        let fluor =
            Fluor::parse(fields[fluor_col]).with_context(|| format!("{source}:{line_no}"))?;
        let cq = parse_cq(fields[cq_col]).with_context(|| format!("{source}:{line_no}"))?;
        grid.entry(well).or_default().insert(fluor, cq);
    }
    Ok(grid)
}

/// "" and "NaN" are the instrument's not-detected sentinels. Anything else
/// must be a number; a malformed value is a caller bug and propagates.
pub fn parse_cq(field: &str) -> Result<f64> {
    if field.is_empty() || field == "NaN" {
        return Ok(f64::NAN);
    }
    field
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("malformed Cq value {field:?}"))
}

fn find_column(columns: &[&str], name: &str, source: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| *c == name)
        .with_context(|| format!("{source} has no {name:?} column"))
}
