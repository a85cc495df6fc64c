// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::analysis::ReferenceDistribution;
use crate::core::sanitize::handle_file_stem;

/// Everything a run needs to know; filled from CLI flags and environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    /// Account whose following list is analysed.
    pub target: String,
    /// Maximum handles taken from the following list (0 = no limit).
    pub limit: usize,
    pub captures_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Analyse this dataset instead of the profile data file.
    pub input: Option<PathBuf>,
    /// Compare against `100·log10(1 + 1/d)` instead of the rounded table.
    pub exact_reference: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            target: s!(DEFAULT_TARGET),
            limit: DEFAULT_LIMIT,
            captures_dir: PathBuf::from(DEFAULT_CAPTURES_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            input: None,
            exact_reference: false,
        }
    }
}

impl AppOptions {
    pub fn new(target: &str) -> Self {
        Self { target: s!(target), ..Self::default() }
    }

    fn artifact(&self, suffix: &str) -> PathBuf {
        self.out_dir.join(format!("{}{}", handle_file_stem(&self.target), suffix))
    }

    /// `<out>/<target>_following_list.csv`
    pub fn following_list_path(&self) -> PathBuf {
        self.artifact(FOLLOWING_LIST_SUFFIX)
    }

    /// `<out>/<target>_profile_data.csv`
    pub fn profile_data_path(&self) -> PathBuf {
        self.artifact(PROFILE_DATA_SUFFIX)
    }

    /// `<out>/<target>_benford_analysis.png`
    pub fn chart_path(&self) -> PathBuf {
        self.artifact(CHART_SUFFIX)
    }

    /// Dataset phase 3 reads: `--input` when given, else the profile data file.
    pub fn analysis_input(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| self.profile_data_path())
    }

    pub fn reference(&self) -> ReferenceDistribution {
        if self.exact_reference { ReferenceDistribution::benford_exact() } else { ReferenceDistribution::benford() }
    }

    /// `<captures>/<target>_following.html`
    pub fn following_capture(&self) -> PathBuf {
        self.captures_dir
            .join(format!("{}{}", handle_file_stem(&self.target), FOLLOWING_CAPTURE_SUFFIX))
    }
}

/// `<dir>/<username>.html`
pub fn profile_capture_in(dir: &Path, username: &str) -> PathBuf {
    dir.join(format!("{}.{}", handle_file_stem(username), PROFILE_CAPTURE_EXT))
}
