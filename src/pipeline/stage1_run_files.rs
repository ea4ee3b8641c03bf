use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::run_files::RunFiles;
use crate::io::run_info::RunInfo;
use crate::pipeline::Stage;

pub struct Stage1RunFiles;

impl Stage1RunFiles {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1RunFiles {
    fn name(&self) -> &'static str {
        "stage1_run_files"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let files = RunFiles::discover(&ctx.input_dir, &ctx.barcode)?;

        let Some(run_info_path) = &files.run_info else {
            bail!("no Run Information file for {} in {}", ctx.barcode, ctx.input_dir.display());
        };
        if files.quant_cq.is_none() {
            bail!(
                "no Quantification Cq Results file for {} in {}",
                ctx.barcode,
                ctx.input_dir.display()
            );
        }
        if files.quant_amp.is_empty() {
            warn!(barcode = %ctx.barcode, "no amplification exports found");
            ctx.warnings
                .push("no amplification exports found".to_string());
        }

        let run_info = RunInfo::read(run_info_path)?;
        run_info.check_protocol(ctx.protocol)?;
        ctx.metadata.completion_time = Some(run_info.run_ended()?.to_string());

        info!(
            amp_channels = files.quant_amp.len(),
            "run files discovered"
        );
        ctx.run_info = Some(run_info);
        ctx.run_files = files;
        Ok(())
    }
}
