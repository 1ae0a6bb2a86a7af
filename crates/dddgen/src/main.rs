use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dddgen::{
    config::GenerationConfig,
    directive::DirectiveManifest,
    orchestrator::{RenderedUnit, render_manifest, write_units},
};
use log::{LevelFilter, debug};

/// Generate Go command handlers for a DDD application layer
#[derive(Parser, Debug)]
#[command(name = "dddgen", version, about, long_about = None)]
struct Cli {
    /// Project config file (defaults to ./ddd-config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate command handlers listed in a manifest
    Command {
        /// TOML manifest with `[[command]]` entries
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output directory for the generated package
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Print rendered units instead of writing them
        #[arg(long)]
        stdout: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_units(units: &[RenderedUnit]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for unit in units {
        writeln!(out, "// ===== {} =====", unit.file_name)?;
        out.write_all(unit.contents.as_bytes())?;
        writeln!(out)?;
    }
    out.flush().context("Failed to flush stdout")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("{cli:?}");

    let config = GenerationConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Command {
            manifest,
            out,
            stdout,
        } => {
            let manifest = DirectiveManifest::from_path(&manifest)?;
            let units = render_manifest(&manifest, &config)?;
            if stdout {
                print_units(&units)?;
            } else {
                write_units(&units, &out)?;
            }
        }
    }
    Ok(())
}
