// src/config/consts.rs

// Target
pub const DEFAULT_TARGET: &str = "nayeli.nxx";
pub const DEFAULT_LIMIT: usize = 300;

// Inputs
pub const DEFAULT_CAPTURES_DIR: &str = "captures";
pub const FOLLOWING_CAPTURE_SUFFIX: &str = "_following.html";
pub const PROFILE_CAPTURE_EXT: &str = "html";

// Outputs
pub const DEFAULT_OUT_DIR: &str = "out";
pub const FOLLOWING_LIST_SUFFIX: &str = "_following_list.csv";
pub const PROFILE_DATA_SUFFIX: &str = "_profile_data.csv";
pub const CHART_SUFFIX: &str = "_benford_analysis.png";

// Local cache
pub const DEBUG_LOG: &str = ".store/debug.log";
