use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::plate_map;
use crate::pipeline::Stage;
use crate::plate;

pub struct Stage4Layout;

impl Stage4Layout {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Layout {
    fn name(&self) -> &'static str {
        "stage4_layout"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if let Some(path) = &ctx.plate_map_path {
            ctx.accession_data = plate_map::read_plate_map(path)?;
            info!(accessions = ctx.accession_data.len(), "plate map loaded");
        } else {
            warn!("accession info missing");
            ctx.warnings.push("accession info missing".to_string());
        }

        let controls = plate::control_wells(ctx.controls_layout, &ctx.accession_data)?;
        plate::apply_controls_to_accessions(&controls, &mut ctx.accession_data, &ctx.barcode)?;
        info!(controls = controls.len(), "control layout resolved");
        ctx.control_wells = controls;
        Ok(())
    }
}
