use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::plate::demux;

pub struct Stage3Demux;

impl Stage3Demux {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Demux {
    fn name(&self) -> &'static str {
        "stage3_demux"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let grid = ctx.quant_grid.as_ref().context("cq grid not loaded")?;
        let gene_maps = demux::demux_384_to_96(grid, ctx.protocol.mapping)?;
        info!(wells = gene_maps.len(), "demux_ready");
        ctx.gene_maps = Some(gene_maps);
        Ok(())
    }
}
