// src/log.rs
//! Tracing setup: human-readable events on stderr, plus a plain-text copy
//! appended to the debug log when a path is given.
//!
//! `RUST_LOG` overrides the default `info` filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::file;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(debug_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match debug_file {
        Some(path) => {
            file::ensure_parent(path)?;
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Mutex::new(f)).with_ansi(false))
        }
        None => None,
    };

    // already installed (tests, repeated runs in one process)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}
