// src/bin/cli.rs
use std::path::Path;

use follow_benford::{cli, config::consts::DEBUG_LOG, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init(Some(Path::new(DEBUG_LOG)))?;
    cli::run()?;
    Ok(())
}
