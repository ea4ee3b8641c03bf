//! "Run Information" export: a two-column key,value CSV.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::protocol::Protocol;

pub const PRCL_FILENAME: &str = "Protocol File Name";
pub const PLTD_FILENAME: &str = "Plate Setup File Name";
pub const RUN_ENDED: &str = "Run Ended";

#[derive(Debug, Clone, Default)]
pub struct RunInfo {
    entries: HashMap<String, String>,
}

impl RunInfo {
    pub fn read(path: &Path) -> Result<RunInfo> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read run info {}", path.display()))?;
        Ok(RunInfo::parse(&content))
    }

    pub fn parse(content: &str) -> RunInfo {
        let mut entries = HashMap::new();
        for line in content.lines() {
            if let Some((key, value)) = line.split_once(',') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        RunInfo { entries }
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .with_context(|| format!("run info has no {key:?} entry"))
    }

    pub fn run_ended(&self) -> Result<&str> {
        self.get(RUN_ENDED)
    }

    /// The run must have been exported with the protocol and plate layout
    /// we are calling with; a mismatch means the wrong protocol was
    /// selected and every threshold would be wrong.
    pub fn check_protocol(&self, protocol: &Protocol) -> Result<()> {
        let prcl = self.get(PRCL_FILENAME)?;
        if prcl != protocol.prcl_file {
            bail!("mismatched qPCR protocol: {prcl}");
        }
        let pltd = self.get(PLTD_FILENAME)?;
        if pltd != protocol.pltd_file {
            bail!("mismatched plate layout: {pltd}");
        }
        Ok(())
    }
}
