use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage6Contamination;

impl Stage6Contamination {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Contamination {
    fn name(&self) -> &'static str {
        "stage6_contamination"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let plate = ctx.plate.as_mut().context("plate not yet called")?;
        ctx.protocol.flag_contamination(plate);
        let flagged = plate
            .iter()
            .filter(|(_, r)| r.call.possible_cluster())
            .count();
        info!(flagged, "contamination_scan_done");
        Ok(())
    }
}
