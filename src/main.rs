use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_ampliqc::cli::{Cli, Commands, ProtocolCommand};
use kira_ampliqc::ctx::Ctx;
use kira_ampliqc::io::{quant_csv, summary};
use kira_ampliqc::pipeline;
use kira_ampliqc::protocol::{self, Protocol};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            let proto = protocol::get_protocol(&args.protocol)?;
            let mut ctx = Ctx::new(
                args.input,
                args.out,
                args.barcode,
                proto,
                args.controls.layout(),
                args.plate_map,
                args.json,
            );
            pipeline::full_pipeline().run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Protocol(args) => match args.command {
            ProtocolCommand::List => print_protocol_list(),
            ProtocolCommand::Show(show) => {
                let proto = protocol::get_protocol(&show.name)?;
                print_protocol(proto);
            }
        },
        Commands::Validate(args) => {
            let grid = quant_csv::read_quant_cq(&args.input)?;
            print_validate_summary(&grid);
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

fn print_protocol_list() {
    println!("protocols:");
    for proto in protocol::all_protocols() {
        println!(
            "{}\texperimental={}\tgenes={}",
            proto.name,
            proto.experimental,
            proto.gene_list().join(",")
        );
    }
}

fn print_protocol(proto: &Protocol) {
    println!("{} (experimental={})", proto.name, proto.experimental);
    println!(
        "radius={} cluster_cutoff={} hot_well_radius={} hot_well_cutoff={}",
        proto.radius, proto.pos_cluster_cutoff, proto.hot_well_radius, proto.hot_well_cutoff
    );
    println!("gene\trole\tsample\tPC\tNTC\tHRC\tPBS");
    for gene in proto.gene_defs() {
        let role = if proto.is_virus_gene(gene.name) {
            "virus"
        } else {
            "control"
        };
        let t = &gene.thresholds;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            gene.name,
            role,
            fmt_cutoff(t.sample),
            fmt_cutoff(t.pc),
            fmt_cutoff(t.ntc),
            fmt_cutoff(t.hrc),
            fmt_cutoff(t.pbs)
        );
    }
}

fn fmt_cutoff(cutoff: Option<f64>) -> String {
    match cutoff {
        Some(c) => c.to_string(),
        None => "-".to_string(),
    }
}

fn print_validate_summary(grid: &kira_ampliqc::plate::demux::QuantGrid) {
    let readings: usize = grid.values().map(|fluors| fluors.len()).sum();
    let not_detected: usize = grid
        .values()
        .flat_map(|fluors| fluors.values())
        .filter(|cq| cq.is_nan())
        .count();
    println!("kira-ampliqc validate ok");
    println!("wells: {}", grid.len());
    println!("readings: {}", readings);
    println!("not detected: {}", not_detected);
}
