use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, results_csv};
use crate::pipeline::Stage;

pub struct Stage7Output;

impl Stage7Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Output {
    fn name(&self) -> &'static str {
        "stage7_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let plate = ctx.plate.as_ref().context("plate not yet called")?;
        results_csv::write_results_file(
            &ctx.output.results_path,
            &ctx.metadata,
            ctx.protocol,
            plate,
        )?;
        info!(path = %ctx.output.results_path.display(), "results_csv_ready");

        let report = json_writer::build_report(ctx)?;
        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, &report)?;
            info!(path = %ctx.output.json_path.display(), "json_report_ready");
        }
        ctx.report = Some(report);
        Ok(())
    }
}
