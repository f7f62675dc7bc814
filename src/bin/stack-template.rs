// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack Template Synthesizer
//!
//! Builds the configured topology and writes the resulting template document.
//!
//! Run with: cargo run --bin stack-template
//!
//! Configuration:
//! 1. `STACK_TOPOLOGY` - topology JSON file (default: built-in three-AZ VPC)
//! 2. `STACK_OUTPUT` - output file (default: stdout)
//! 3. `RUST_LOG` - log filter; logs go to stderr

use anyhow::{Context, Result};
use cim_stack_template::config::SynthConfig;
use std::io::Write;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = SynthConfig::from_env();
    info!(
        topology = ?config.topology_path,
        output = ?config.output_path,
        "Configuration loaded"
    );

    let builder = config
        .topology()
        .context("Failed to load topology")?
        .into_builder()
        .context("Invalid topology")?;

    // The document is fully assembled before anything is written
    let document = builder.build().context("Failed to build stack template")?;

    match &config.output_path {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write template to {}", path.display()))?;
            info!(path = %path.display(), bytes = document.len(), "Template written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{document}").context("Failed to write template to stdout")?;
        }
    }

    Ok(())
}
