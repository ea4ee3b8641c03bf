use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::plate::{Plate, PlateFormat, WellResult, is_valid_accession};

pub struct Stage5Call;

impl Stage5Call {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Call {
    fn name(&self) -> &'static str {
        "stage5_call"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let gene_maps = ctx.gene_maps.take().context("gene maps not demuxed")?;
        let protocol = ctx.protocol;
        let mut plate = Plate::new(PlateFormat::W96);

        for (well, gene_cqs) in gene_maps {
            let control_type = ctx.control_wells.get(&well).copied();
            let call = match control_type {
                Some(ct) => protocol.classify_control(&gene_cqs, ct),
                None => protocol.classify_sample(&gene_cqs),
            };
            let accession = ctx.accession_data.get(&well).cloned();
            if let Some(label) = &accession {
                if control_type.is_none() && !is_valid_accession(label.trim_end()) {
                    warn!(well = %well, accession = %label, "invalid accession");
                    ctx.warnings
                        .push(format!("invalid accession in {well}: {label:?}"));
                }
            }
            plate.insert(
                well,
                WellResult {
                    accession,
                    call,
                    gene_cqs,
                    control_type,
                },
            );
        }

        ctx.metadata.controls = if plate.controls_passed() {
            "Passed".to_string()
        } else {
            "Failed".to_string()
        };
        info!(
            wells = plate.len(),
            controls = %ctx.metadata.controls,
            "plate called"
        );
        ctx.plate = Some(plate);
        Ok(())
    }
}
