use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::calling::Call;
use crate::ctx::Ctx;
use crate::schema::v1::{CallCountsV1, ControlV1, PlateReportV1, RunMetaV1, WellRowV1};

pub fn build_report(ctx: &Ctx) -> Result<PlateReportV1> {
    let plate = ctx.plate.as_ref().context("plate not yet called")?;
    let protocol = ctx.protocol;

    let metadata = RunMetaV1 {
        pcr_barcode: ctx.metadata.pcr_barcode.clone(),
        sample_barcode: ctx.metadata.sample_barcode.clone(),
        rna_barcode: ctx.metadata.rna_barcode.clone(),
        completion_time: ctx.metadata.completion_time.clone(),
        researcher: ctx.metadata.researcher.clone(),
    };

    let mut controls = Vec::new();
    let mut counts = CallCountsV1::default();
    let mut wells = Vec::new();

    for (well, results) in plate.iter() {
        if let Some(control_type) = results.control_type {
            let failure_details = (results.call == Call::Fail)
                .then(|| protocol.failure_details(control_type));
            controls.push(ControlV1 {
                well: well.name(),
                control_type: control_type.as_str().to_string(),
                call: results.call.label().to_string(),
                failure_details,
            });
            continue;
        }

        match results.call {
            Call::Pos => counts.positive += 1,
            Call::PosReview => counts.review += 1,
            Call::PosCluster => counts.cluster += 1,
            Call::PosHotwell => counts.hot_well += 1,
            Call::Neg => counts.negative += 1,
            Call::Inv => counts.invalid += 1,
            Call::Ind => counts.indeterminate += 1,
            Call::Pass | Call::Fail => {}
        }

        let cqs: BTreeMap<String, Option<f64>> = protocol
            .gene_list()
            .iter()
            .map(|g| {
                let cq = results.cq(g);
                ((*g).to_string(), (!cq.is_nan()).then_some(cq))
            })
            .collect();
        wells.push(WellRowV1 {
            well: well.name(),
            accession: results.accession.clone(),
            call: results.call.short().to_string(),
            call_label: results.call.label().to_string(),
            rerun: results.call.rerun(),
            cqs,
        });
    }

    Ok(PlateReportV1 {
        tool: "kira-ampliqc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        metadata,
        protocol: protocol.name.to_string(),
        experimental: protocol.experimental,
        controls_status: ctx.metadata.controls.clone(),
        controls,
        counts,
        wells,
    })
}

pub fn write_json(path: &Path, report: &PlateReportV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
