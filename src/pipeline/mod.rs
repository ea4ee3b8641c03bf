use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_run_files;
pub mod stage2_quant;
pub mod stage3_demux;
pub mod stage4_layout;
pub mod stage5_call;
pub mod stage6_contamination;
pub mod stage7_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        info!(
            barcode = %ctx.barcode,
            protocol = %ctx.protocol.name,
            "processing started"
        );
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}

/// The standard full processing pass.
pub fn full_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(stage0_scaffold::Stage0Scaffold::new()),
        Box::new(stage1_run_files::Stage1RunFiles::new()),
        Box::new(stage2_quant::Stage2Quant::new()),
        Box::new(stage3_demux::Stage3Demux::new()),
        Box::new(stage4_layout::Stage4Layout::new()),
        Box::new(stage5_call::Stage5Call::new()),
        Box::new(stage6_contamination::Stage6Contamination::new()),
        Box::new(stage7_output::Stage7Output::new()),
    ])
}
