use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::quant_csv;
use crate::pipeline::Stage;

pub struct Stage2Quant;

impl Stage2Quant {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Quant {
    fn name(&self) -> &'static str {
        "stage2_quant"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let path = ctx
            .run_files
            .quant_cq
            .as_ref()
            .context("quant cq file not discovered")?;
        let grid = quant_csv::read_quant_cq(path)?;
        info!(wells = grid.len(), "cq_grid_ready");
        ctx.quant_grid = Some(grid);
        Ok(())
    }
}
