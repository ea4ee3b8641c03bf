//! Plate geometry, per-well results, and control-well layouts.
//!
//! Wells are first-class (row, col) coordinates internally; string well IDs
//! ("A1", zero-padded "A01") exist only at the I/O boundary.

pub mod demux;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::{Context, Result, bail};

use crate::calling::{Call, ControlType};

/// Digits of Cq precision in formatted output.
pub const SIG_FIGS: u32 = 2;

/// Names a plate-map tool writes for wells holding no sample.
pub const EMPTY_WELL_NAMES: &[&str] = &["CONTROL", "EMPTY", "EDIT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormat {
    /// 8x12 grid the calling logic runs on.
    W96,
    /// 16x24 grid the instrument reads; reduced to 96 before calling.
    W384,
}

impl PlateFormat {
    pub fn rows(&self) -> u8 {
        match self {
            PlateFormat::W96 => 8,
            PlateFormat::W384 => 16,
        }
    }

    pub fn cols(&self) -> u8 {
        match self {
            PlateFormat::W96 => 12,
            PlateFormat::W384 => 24,
        }
    }
}

/// Zero-based plate coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Well {
    pub row: u8,
    pub col: u8,
}

impl Well {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Parse a well ID like "A1" or zero-padded "A01" against a plate format.
    pub fn parse(s: &str, format: PlateFormat) -> Result<Self> {
        let mut chars = s.chars();
        let row_char = chars.next().context("empty well ID")?;
        if !row_char.is_ascii_uppercase() {
            bail!("well ID {s:?} does not start with a row letter");
        }
        let row = row_char as u8 - b'A';

        let col_str = chars.as_str();
        if col_str.is_empty() || !col_str.bytes().all(|b| b.is_ascii_digit()) {
            bail!("well ID {s:?} has no column number");
        }
        let col: u8 = col_str
            .parse()
            .with_context(|| format!("well ID {s:?} column out of range"))?;
        if col == 0 {
            bail!("well ID {s:?} column is 1-based");
        }

        if row >= format.rows() || col > format.cols() {
            bail!(
                "well ID {s:?} outside the {}x{} plate",
                format.rows(),
                format.cols()
            );
        }
        Ok(Well::new(row, col - 1))
    }

    /// "A1" form.
    pub fn name(&self) -> String {
        format!("{}{}", (b'A' + self.row) as char, self.col + 1)
    }

    /// Zero-padded "A01" form, as the Cq results export writes wells.
    pub fn padded_name(&self) -> String {
        format!("{}{:02}", (b'A' + self.row) as char, self.col + 1)
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

/// Per-well record: label, current call, per-gene Cq values.
#[derive(Debug, Clone)]
pub struct WellResult {
    pub accession: Option<String>,
    pub call: Call,
    pub gene_cqs: HashMap<String, f64>,
    pub control_type: Option<ControlType>,
}

impl WellResult {
    /// Cq for a gene; absent genes read as not detected.
    pub fn cq(&self, gene: &str) -> f64 {
        self.gene_cqs.get(gene).copied().unwrap_or(f64::NAN)
    }

    /// Truncated (not rounded) to `SIG_FIGS` decimals; not-detected is empty.
    pub fn format_cq(&self, gene: &str) -> String {
        let value = self.cq(gene);
        if value.is_nan() {
            return String::new();
        }
        let scale = 10f64.powi(SIG_FIGS as i32);
        let truncated = (value * scale).trunc() / scale;
        format!("{truncated:.prec$}", prec = SIG_FIGS as usize)
    }

    /// Cell wording for the plate-map block of the results file.
    pub fn plate_label(&self) -> String {
        match self.control_type {
            Some(ct) => format!("{} {}", ct, self.call.label()),
            None => self.call.needs_review().to_string(),
        }
    }
}

/// Ordered well -> result mapping for one processed plate.
#[derive(Debug, Clone)]
pub struct Plate {
    format: PlateFormat,
    wells: BTreeMap<Well, WellResult>,
}

impl Plate {
    pub fn new(format: PlateFormat) -> Self {
        Self {
            format,
            wells: BTreeMap::new(),
        }
    }

    pub fn format(&self) -> PlateFormat {
        self.format
    }

    pub fn insert(&mut self, well: Well, results: WellResult) {
        self.wells.insert(well, results);
    }

    pub fn get(&self, well: Well) -> Option<&WellResult> {
        self.wells.get(&well)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Well, &WellResult)> {
        self.wells.iter().map(|(well, results)| (*well, results))
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Wells present within the (2r+1)-sided square around `center`,
    /// including `center` itself.
    pub fn square(&self, center: Well, radius: i32) -> impl Iterator<Item = &WellResult> {
        let rows = self.format.rows() as i32;
        let cols = self.format.cols() as i32;
        let row = center.row as i32;
        let col = center.col as i32;
        (row - radius..=row + radius)
            .flat_map(move |r| (col - radius..=col + radius).map(move |c| (r, c)))
            .filter_map(move |(r, c)| {
                if r < 0 || c < 0 || r >= rows || c >= cols {
                    return None;
                }
                self.wells.get(&Well::new(r as u8, c as u8))
            })
    }

    /// The one sanctioned call rewrite: a positive, not-yet-escalated well
    /// may be flagged as a contamination suspect. Anything else is left
    /// untouched, which keeps the never-downgrade rule local to this method.
    pub fn escalate(&mut self, well: Well, flag: Call) {
        debug_assert!(flag.possible_cluster());
        if let Some(results) = self.wells.get_mut(&well) {
            if results.call.can_escalate() {
                results.call = flag;
            }
        }
    }

    /// "Passed" iff every control well on the plate passed.
    pub fn controls_passed(&self) -> bool {
        self.wells
            .values()
            .filter(|r| r.control_type.is_some())
            .all(|r| r.call == Call::Pass)
    }
}

/// Controls layout declared on the sample-plate registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsLayout {
    Standard,
    Validation,
    Custom,
    NoControls,
}

const STANDARD_CONTROL_WELLS: &[(&str, ControlType)] = &[
    ("A1", ControlType::Ntc),
    ("A8", ControlType::Pc),
    ("A9", ControlType::Hrc),
    ("A10", ControlType::Pbs),
    ("A11", ControlType::Ntc),
    ("A12", ControlType::Ntc),
    ("H1", ControlType::Ntc),
    ("H8", ControlType::Pc),
    ("H9", ControlType::Hrc),
    ("H10", ControlType::Pbs),
    ("H11", ControlType::Ntc),
    ("H12", ControlType::Ntc),
];

/// Limit-of-detection runs put blanks down columns 1 and 12.
const VALIDATION_CONTROL_WELLS: &[(&str, ControlType)] = &[
    ("A1", ControlType::Ntc),
    ("A12", ControlType::Ntc),
    ("B1", ControlType::Ntc),
    ("B12", ControlType::Ntc),
    ("C1", ControlType::Ntc),
    ("C12", ControlType::Ntc),
    ("D1", ControlType::Ntc),
    ("D12", ControlType::Ntc),
    ("E1", ControlType::Ntc),
    ("E12", ControlType::Ntc),
    ("F1", ControlType::Ntc),
    ("F12", ControlType::Ntc),
    ("G1", ControlType::Ntc),
    ("G12", ControlType::Ntc),
    ("H1", ControlType::Ntc),
    ("H12", ControlType::Ntc),
];

/// Control wells implied by the plate's declared layout. Custom layouts are
/// resolved from plate-map labels instead (`controls_from_labels`).
pub fn control_wells(
    layout: ControlsLayout,
    accession_data: &BTreeMap<Well, String>,
) -> Result<BTreeMap<Well, ControlType>> {
    let entries = match layout {
        ControlsLayout::Standard => STANDARD_CONTROL_WELLS,
        ControlsLayout::Validation => VALIDATION_CONTROL_WELLS,
        ControlsLayout::NoControls => return Ok(BTreeMap::new()),
        ControlsLayout::Custom => return Ok(controls_from_labels(accession_data)),
    };

    let mut wells = BTreeMap::new();
    for (name, control_type) in entries {
        wells.insert(Well::parse(name, PlateFormat::W96)?, *control_type);
    }
    Ok(wells)
}

/// Pick control wells out of plate-map data by their labels.
pub fn controls_from_labels(accession_data: &BTreeMap<Well, String>) -> BTreeMap<Well, ControlType> {
    accession_data
        .iter()
        .filter_map(|(well, label)| control_from_label(label).map(|ct| (*well, ct)))
        .collect()
}

/// Labels operators use for control wells on plate maps: canonical control
/// names plus a few site-specific aliases, optionally numbered ("Water_3").
pub fn control_from_label(label: &str) -> Option<ControlType> {
    let base = match label.split_once('_') {
        Some((base, suffix)) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => label,
    };
    match base {
        "Water" | "water" | "NTC" | "NC" => Some(ControlType::Ntc),
        "PC" => Some(ControlType::Pc),
        "HSC" | "HRC" => Some(ControlType::Hrc),
        "UTM" | "PBS" => Some(ControlType::Pbs),
        _ => None,
    }
}

/// A real accession is one letter followed by 4-5 digits.
pub fn is_valid_accession(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    first.is_ascii_alphabetic()
        && (4..=5).contains(&rest.len())
        && rest.bytes().all(|b| b.is_ascii_digit())
}

/// Overlay control wells onto plate-map accessions. A control landing on a
/// well that already holds a valid accession aborts the run.
pub fn apply_controls_to_accessions(
    controls: &BTreeMap<Well, ControlType>,
    accession_data: &mut BTreeMap<Well, String>,
    barcode: &str,
) -> Result<()> {
    for (well, control_type) in controls {
        if let Some(existing) = accession_data.get(well) {
            if is_valid_accession(existing.trim_end()) {
                bail!(
                    "the control mapping for {barcode} overwrites accession {existing:?} in {well}"
                );
            }
        }
        accession_data.insert(*well, control_type.as_str().to_string());
    }
    Ok(())
}
