//! The per-plate results CSV: a metadata block, a plate-map block, and the
//! per-well run-data table. The reader parses the same layout back and
//! re-derives every call from the Cq values it finds.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::calling::ControlType;
use crate::ctx::RunMetadata;
use crate::io::quant_csv::parse_cq;
use crate::plate::{Plate, PlateFormat, Well, WellResult};
use crate::protocol::Protocol;

const SAMPLE_BARCODE_LABEL: &str = "Sample Plate Barcode";
const RNA_BARCODE_LABEL: &str = "RNA Plate Barcode";
const PCR_BARCODE_LABEL: &str = "PCR Plate Barcode";
const COMPLETION_TIME_LABEL: &str = "Completion Time";
const RESEARCHER_LABEL: &str = "Researcher";
const CONTROLS_LABEL: &str = "Controls";

/// Accession shown when no plate map was supplied.
const MISSING_ACCESSION: &str = "MISSING";

pub fn write_results_file(
    path: &Path,
    metadata: &RunMetadata,
    protocol: &Protocol,
    plate: &Plate,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = std::io::BufWriter::new(file);
    write_results(&mut w, metadata, protocol, plate)
}

pub fn write_results<W: Write>(
    w: &mut W,
    metadata: &RunMetadata,
    protocol: &Protocol,
    plate: &Plate,
) -> Result<()> {
    write_metadata(w, metadata)?;
    write_plate_map(w, plate)?;
    write_run_data(w, protocol, plate)?;
    Ok(())
}

fn write_metadata<W: Write>(w: &mut W, metadata: &RunMetadata) -> Result<()> {
    let field = |opt: &Option<String>| opt.clone().unwrap_or_default();
    writeln!(w, "{SAMPLE_BARCODE_LABEL},{}", field(&metadata.sample_barcode))?;
    writeln!(w, "{RNA_BARCODE_LABEL},{}", field(&metadata.rna_barcode))?;
    writeln!(w, "{PCR_BARCODE_LABEL},{}", metadata.pcr_barcode)?;
    writeln!(w, "{COMPLETION_TIME_LABEL},{}", field(&metadata.completion_time))?;
    writeln!(w, "{RESEARCHER_LABEL},{}", field(&metadata.researcher))?;
    writeln!(w, "{CONTROLS_LABEL},{}", metadata.controls)?;
    writeln!(w)?;
    Ok(())
}

fn write_plate_map<W: Write>(w: &mut W, plate: &Plate) -> Result<()> {
    let format = plate.format();
    let header: Vec<String> = (1..=format.cols()).map(|c| c.to_string()).collect();
    writeln!(w, ",{}", header.join(","))?;
    for row in 0..format.rows() {
        let cells: Vec<String> = (0..format.cols())
            .map(|col| {
                plate
                    .get(Well::new(row, col))
                    .map(WellResult::plate_label)
                    .unwrap_or_default()
            })
            .collect();
        writeln!(w, "{},{}", (b'A' + row) as char, cells.join(","))?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_run_data<W: Write>(w: &mut W, protocol: &Protocol, plate: &Plate) -> Result<()> {
    let mut header = vec!["Well".to_string(), "Accession".to_string(), "Call".to_string()];
    header.extend(protocol.gene_list().iter().map(|g| format!("{g} Ct")));
    writeln!(w, "{}", header.join(","))?;

    for (well, results) in plate.iter() {
        let mut row = vec![
            well.name(),
            results
                .accession
                .clone()
                .unwrap_or_else(|| MISSING_ACCESSION.to_string()),
            results.call.short().to_string(),
        ];
        row.extend(protocol.gene_list().iter().map(|g| results.format_cq(g)));
        writeln!(w, "{}", row.join(","))?;
    }
    Ok(())
}

pub fn read_results_file(path: &Path, protocol: &Protocol) -> Result<(RunMetadata, Plate)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results {}", path.display()))?;
    read_results(&content, protocol)
}

/// Parse a results file back into a plate, re-deriving every call from the
/// Cq columns (control wells are recognized by their accession prefix) and
/// re-running contamination flagging.
pub fn read_results(content: &str, protocol: &Protocol) -> Result<(RunMetadata, Plate)> {
    enum Section {
        Metadata,
        PlateMap,
        Results,
    }

    let mut section = Section::Metadata;
    let mut metadata = RunMetadata::default();
    let mut plate = Plate::new(PlateFormat::W96);
    let gene_list = protocol.gene_list();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        match section {
            Section::Metadata => {
                let value = fields.get(1).map(|v| v.trim().to_string());
                let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
                match fields[0] {
                    SAMPLE_BARCODE_LABEL => metadata.sample_barcode = non_empty(value),
                    RNA_BARCODE_LABEL => metadata.rna_barcode = non_empty(value),
                    PCR_BARCODE_LABEL => metadata.pcr_barcode = value.unwrap_or_default(),
                    COMPLETION_TIME_LABEL => metadata.completion_time = non_empty(value),
                    RESEARCHER_LABEL => metadata.researcher = non_empty(value),
                    CONTROLS_LABEL => {
                        metadata.controls = value.unwrap_or_default();
                        section = Section::PlateMap;
                    }
                    _ => {}
                }
            }
            Section::PlateMap => {
                // the plate-map block ends at its last row
                if fields[0] == "H" || fields[0] == "Well" {
                    section = Section::Results;
                }
            }
            Section::Results => {
                if fields[0] == "Well" {
                    continue;
                }
                let well = Well::parse(fields[0], PlateFormat::W96)
                    .with_context(|| format!("results line {line_no}"))?;
                let accession = fields
                    .get(1)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default();
                if fields.len() < 3 + gene_list.len() {
                    bail!("results line {line_no} has too few Ct columns");
                }
                let mut gene_cqs = std::collections::HashMap::new();
                for (gene, field) in gene_list.iter().zip(&fields[3..3 + gene_list.len()]) {
                    let cq = parse_cq(field.trim())
                        .with_context(|| format!("results line {line_no}"))?;
                    gene_cqs.insert((*gene).to_string(), cq);
                }

                let control_type = ControlType::parse_control(&accession);
                let call = match control_type {
                    Some(ct) => protocol.classify_control(&gene_cqs, ct),
                    None => protocol.classify_sample(&gene_cqs),
                };
                plate.insert(
                    well,
                    WellResult {
                        accession: Some(accession),
                        call,
                        gene_cqs,
                        control_type,
                    },
                );
            }
        }
    }

    protocol.flag_contamination(&mut plate);
    Ok((metadata, plate))
}
