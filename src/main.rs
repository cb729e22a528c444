use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dxf_offset::offset::{scan_offsets_with, write_offsets_with, OffsetOptions};
use log::warn;

#[derive(Parser)]
#[command(
    name = "dxf-offset",
    version,
    about = "Offset the circles and arcs of a DXF drawing by a fixed radial distance"
)]
struct Cli {
    /// Source drawing
    input: PathBuf,
    /// Signed offset added to every radius
    #[arg(allow_negative_numbers = true)]
    distance: f64,
    /// Drawing to write (may be the source itself)
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = OffsetOptions::default();

    let scan = scan_offsets_with(&cli.input, cli.distance, &options)
        .with_context(|| format!("Error processing DXF {}", cli.input.display()))?;
    if scan.records.is_empty() {
        warn!("no circle or arc kept a positive radius; output gets no new entities");
    }

    write_offsets_with(&cli.input, &scan.records, &cli.output, &options)
        .with_context(|| format!("Error saving DXF {}", cli.output.display()))?;

    Ok(())
}
