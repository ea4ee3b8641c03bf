use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::plate::ControlsLayout;

#[derive(Debug, Parser)]
#[command(name = "kira-ampliqc", version, about = "qPCR plate calling and contamination QC")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Protocol(ProtocolArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Directory containing the instrument CSV exports")]
    pub input: PathBuf,

    #[arg(long, help = "qPCR plate barcode to process")]
    pub barcode: String,

    #[arg(long, help = "Protocol name (see `protocol list`)")]
    pub protocol: String,

    #[arg(long, value_enum, default_value_t = ControlsArg::Standard)]
    pub controls: ControlsArg,

    #[arg(long, help = "Optional plate map CSV with accessions")]
    pub plate_map: Option<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false, help = "Also write the JSON report")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ProtocolArgs {
    #[command(subcommand)]
    pub command: ProtocolCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProtocolCommand {
    List,
    Show(ProtocolShowArgs),
}

#[derive(Debug, Args)]
pub struct ProtocolShowArgs {
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Quantification Cq Results CSV to check")]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ControlsArg {
    Standard,
    Validation,
    Custom,
    None,
}

impl ControlsArg {
    pub fn layout(&self) -> ControlsLayout {
        match self {
            ControlsArg::Standard => ControlsLayout::Standard,
            ControlsArg::Validation => ControlsLayout::Validation,
            ControlsArg::Custom => ControlsLayout::Custom,
            ControlsArg::None => ControlsLayout::NoControls,
        }
    }
}
