use anyhow::{Context, Result};

use crate::calling::Call;
use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let plate = ctx.plate.as_ref().context("plate not yet called")?;

    let mut pos = 0usize;
    let mut neg = 0usize;
    let mut inv = 0usize;
    let mut ind = 0usize;
    let mut review = 0usize;
    let mut flagged: Vec<String> = Vec::new();

    for (well, results) in plate.iter() {
        if results.control_type.is_some() {
            continue;
        }
        match results.call {
            Call::Pos => pos += 1,
            Call::PosReview => review += 1,
            Call::PosCluster | Call::PosHotwell => {
                review += 1;
                flagged.push(well.name());
            }
            Call::Neg => neg += 1,
            Call::Inv => inv += 1,
            Call::Ind => ind += 1,
            Call::Pass | Call::Fail => {}
        }
    }

    let mut out = String::new();
    out.push_str(&format!("kira-ampliqc v{version}\n"));
    out.push_str(&format!(
        "Plate: {}, protocol={}\n",
        ctx.metadata.pcr_barcode, ctx.protocol.name
    ));
    out.push_str(&format!(
        "Calls: {pos} Pos, {neg} Neg, {inv} Inv, {ind} Ind, {review} review\n"
    ));
    out.push_str(&format!("Controls: {}\n", ctx.metadata.controls));
    if flagged.is_empty() {
        out.push_str("Contamination flags: none\n");
    } else {
        out.push_str(&format!("Contamination flags: {}\n", flagged.join(", ")));
    }

    Ok(out)
}
