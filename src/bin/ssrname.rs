use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use polars::prelude::*;

use ssrname::extension::{self, Transfer};
use ssrname::filter::{self, FilterConfig};
use ssrname::{LocusReport, NameConfig};

/// ssrname CLI
#[derive(Parser)]
#[command(name = "ssrname")]
#[command(version)]
#[command(about = "Name SSRMMD microsatellite loci in primer tables and filter .compare files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert a microsatellite_name column after `id` in a primer table
    Name {
        /// Primer table TSV (from connectorToPrimer3.pl)
        #[arg(short, long)]
        primers: PathBuf,
        /// SSRMMD .compare TSV (filtered or unfiltered)
        #[arg(short, long)]
        compare: PathBuf,
        /// Output TSV (default: <primers>.named.tsv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also print the per-locus name table
        #[arg(long)]
        report: bool,
    },

    /// Filter a .compare file, keeping its exact header and row format
    Filter {
        /// SSRMMD .compare TSV
        #[arg(short, long)]
        input: PathBuf,
        /// Output path (default: <input>.filtered.compare)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated allowed motif lengths
        #[arg(long, default_value = "2,3,4")]
        allowed_motif_lengths: String,
        /// Minimum repeat count required in BOTH genomes
        #[arg(long, default_value_t = 5)]
        min_repeats: i64,
        /// Do not drop AT-only motifs
        #[arg(long)]
        keep_at_only: bool,
    },

    /// Copy (or rename) a file so it ends in .tsv
    ForceTsv {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Rename (move) instead of copy
        #[arg(long)]
        rename: bool,
    },
}

impl Commands {
    fn run(self) -> Result<()> {
        match self {
            Commands::Name { primers, compare, output, report } => {
                cmd_name(NameConfig { primers, compare, output }, report)
            }
            Commands::Filter { input, output, allowed_motif_lengths, min_repeats, keep_at_only } => {
                let config = FilterConfig {
                    allowed_motif_lengths: filter::parse_lengths(&allowed_motif_lengths)?,
                    min_repeats,
                    keep_at_only,
                };
                let output = output.unwrap_or_else(|| filter::default_output(&input));
                let summary = filter::run_filter(&input, &output, &config)
                    .with_context(|| format!("filtering {}", input.display()))?;
                eprintln!("[ssrname filter] input:  {}", input.display());
                eprintln!("[ssrname filter] output: {}", output.display());
                eprintln!("[ssrname filter] kept {} / {} rows", summary.kept, summary.total);
                Ok(())
            }
            Commands::ForceTsv { input, output, rename } => {
                let transfer = if rename { Transfer::Rename } else { Transfer::Copy };
                let dst = extension::force_tsv(&input, &output, transfer)
                    .with_context(|| format!("placing {} at {}", input.display(), output.display()))?;
                let verb = if rename { "renamed" } else { "copied" };
                println!("[ssrname force-tsv] {verb} {} -> {}", input.display(), dst.display());
                Ok(())
            }
        }
    }
}

fn cmd_name(config: NameConfig, report: bool) -> Result<()> {
    let summary = ssrname::run_naming(&config)
        .with_context(|| format!("naming loci in {}", config.primers.display()))?;

    println!("[ssrname name] input primers : {}", config.primers.display());
    println!("[ssrname name] input compare : {}", config.compare.display());
    println!("[ssrname name] wrote         : {}", summary.output.display());
    println!("[ssrname name] rows {} | loci {}", summary.rows, summary.loci);
    if !summary.unmatched.is_empty() {
        println!(
            "[ssrname name] WARNING: {} loci had no match in .compare -> name=NA",
            summary.unmatched.len()
        );
    }
    if report {
        let df = report_frame(&summary.report)?;
        std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
        std::env::set_var("POLARS_FMT_STR_LEN", "100000");
        println!("{}", df);
    }
    Ok(())
}

fn report_frame(rows: &[LocusReport]) -> PolarsResult<DataFrame> {
    df!(
        "locus"              => rows.iter().map(|r| r.locus.clone()).collect::<Vec<_>>(),
        "base_name"          => rows.iter().map(|r| r.base_name.clone()).collect::<Vec<_>>(),
        "microsatellite_name" => rows.iter().map(|r| r.canonical_name.clone()).collect::<Vec<_>>(),
        "primer_rows"        => rows.iter().map(|r| r.rows as u64).collect::<Vec<_>>(),
    )
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = Cli::parse().command.run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
