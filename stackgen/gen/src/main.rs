//! Stackgen Code Generator
//!
//! Generates a typed CloudStack client crate from an API catalog.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use stackgen_define::Catalog;
use stackgen_gen::config::GeneratorConfig;
use stackgen_gen::errors::GeneratorError;
use stackgen_gen::output::generate_and_write;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Which service layout to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// The curated CloudStack service grouping
    Builtin,
    /// Every catalog operation in a single service
    Flat,
}

/// Stackgen code generator - turns an API catalog into typed Rust bindings
#[derive(Parser, Debug)]
#[command(name = "stackgen-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the catalog (`listApis` JSON output)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Output directory for the generated crate (Cargo.toml and src/)
    #[arg(short, long, default_value = "cloudstack")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Service layout
    #[arg(long, value_enum, default_value_t = Layout::Builtin)]
    layout: Layout,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .init();
        return;
    }

    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = Catalog::load(&cli.catalog)?;
    info!(path = %cli.catalog.display(), operations = catalog.len(), "loaded catalog");

    let config = match cli.layout {
        Layout::Builtin => GeneratorConfig::builtin(),
        Layout::Flat => GeneratorConfig::flat(&catalog),
    };

    let report = generate_and_write(&catalog, &config, &cli.output, cli.dry_run)?;

    eprintln!(
        "{} {} operations",
        "generated".green().bold(),
        report.generated.len()
    );
    if !report.skipped.is_empty() {
        eprintln!(
            "{} {} operations not in any service",
            "skipped".yellow().bold(),
            report.skipped.len()
        );
    }
    for error in &report.errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
    if !cli.dry_run {
        eprintln!("wrote {}", cli.output.display());
    }

    report.into_result().map(|_| ())
}
