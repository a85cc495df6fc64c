// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::collect::CollectError;
use crate::dataset::DatasetError;
use crate::report::ReportError;

/// Crate-level error; each phase's failure funnels through here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("phase {phase} needs '{}'; run the previous phase first", path.display())]
    MissingPrerequisite { phase: u8, path: PathBuf },

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
