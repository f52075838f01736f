//! motion-to-rig: convert a joint-position motion dump into a rigged animation document.
//!
//! Usage:
//!   motion-to-rig --input results.json --output walk.scene.json
//!   motion-to-rig --input results.json --output walk.scene.json --skeleton smpl24 --frame-rate 20

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();
    let summary = cli::run(&cli)?;
    log::info!(
        "wrote {} ({} bones, {} frames)",
        summary.output.display(),
        summary.bones,
        summary.frames
    );
    Ok(())
}
