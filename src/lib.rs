// src/lib.rs

#[macro_use]
pub mod macros;

pub mod analysis;
pub mod cli;
pub mod collect;
pub mod config;
pub mod core;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod file;
pub mod log;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod report;
pub mod runner;
pub mod specs;

pub use error::{Error, Result};
