//! 384-to-96 dye-channel demultiplexing.
//!
//! Each 96-well owns a 2x2 quad of 384-wells, addressed by relative
//! positions A1/A2/B1/B2. The protocol's wiring map assigns a gene to each
//! (fluor, quad position) pair; reducing the quad yields the per-gene Cq map
//! the classifier consumes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::{Context, Result, bail};

use crate::plate::{PlateFormat, Well};
use crate::protocol::FluorChannel;

/// Reporter dyes the instrument exports per-channel files for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fluor {
    Fam,
    Hex,
    Cy5,
}

impl Fluor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fluor::Fam => "FAM",
            Fluor::Hex => "HEX",
            Fluor::Cy5 => "Cy5",
        }
    }

    pub fn parse(s: &str) -> Result<Fluor> {
        match s {
            "FAM" => Ok(Fluor::Fam),
            "HEX" => Ok(Fluor::Hex),
            "Cy5" => Ok(Fluor::Cy5),
            _ => bail!("unknown fluor {s:?}"),
        }
    }
}

impl fmt::Display for Fluor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative position of a 384-well inside its parent 96-well's quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedWell {
    A1,
    A2,
    B1,
    B2,
}

impl MappedWell {
    /// 384-grid coordinate of this quad position under `parent`.
    pub fn quad_well(&self, parent: Well) -> Well {
        let (dr, dc) = match self {
            MappedWell::A1 => (0, 0),
            MappedWell::A2 => (0, 1),
            MappedWell::B1 => (1, 0),
            MappedWell::B2 => (1, 1),
        };
        Well::new(parent.row * 2 + dr, parent.col * 2 + dc)
    }
}

/// Raw per-well fluor readings on the 384 grid.
pub type QuantGrid = BTreeMap<Well, HashMap<Fluor, f64>>;

/// Per-gene Cq maps on the 96 grid.
pub type GeneMaps = BTreeMap<Well, HashMap<String, f64>>;

/// Reduce 384-well fluor readings to 96-well gene maps using the protocol
/// wiring. Every wired source well and channel must be present in the data.
pub fn demux_384_to_96(grid: &QuantGrid, mapping: &[FluorChannel]) -> Result<GeneMaps> {
    let mut out = GeneMaps::new();
    for row in 0..PlateFormat::W96.rows() {
        for col in 0..PlateFormat::W96.cols() {
            let parent = Well::new(row, col);
            let mut genes = HashMap::new();
            for channel in mapping {
                for (position, gene) in channel.genes {
                    let source = position.quad_well(parent);
                    let readings = grid.get(&source).with_context(|| {
                        format!("well {} missing from Cq data", source.padded_name())
                    })?;
                    let cq = readings.get(&channel.fluor).copied().with_context(|| {
                        format!(
                            "well {} has no {} reading",
                            source.padded_name(),
                            channel.fluor
                        )
                    })?;
                    genes.insert((*gene).to_string(), cq);
                }
            }
            out.insert(parent, genes);
        }
    }
    Ok(out)
}
