//! `iosgen` — generate an Objective-C client SDK from a service descriptor.
//!
//! Usage:
//!   iosgen --input descriptor.json --output Sources/ [--prefix XX]
//!
//! The descriptor is the JSON dump produced by the server-side
//! introspection tooling; the output directory receives one model class
//! and one repository per exposed model, plus an aggregate import header.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use iosgen_codegen_lib::{generate_sdk, GeneratorOptions};
use iosgen_ir::ServiceDescriptor;

/// Objective-C SDK generator.
#[derive(Parser, Debug)]
#[command(name = "iosgen", about = "Generate an Objective-C client SDK from a service descriptor")]
struct Cli {
    /// Service descriptor JSON file.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the generated sources.
    #[arg(short, long)]
    output: PathBuf,

    /// Class-name prefix for generated model classes.
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// Log per-model generation progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. `--verbose` raises the default level; an explicit
    // env filter still wins.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let service: ServiceDescriptor =
        serde_json::from_str(&input).context("invalid service descriptor")?;

    let options = GeneratorOptions { prefix: cli.prefix };
    let code = generate_sdk(&service, &options)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    for file in &code.files {
        let path = cli.output.join(&file.path);
        std::fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(
        "generated {} files in {}",
        code.files.len(),
        cli.output.display()
    );
    Ok(())
}
