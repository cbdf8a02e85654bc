//! Run configuration resolved from the environment.
//!
//! `.env` is loaded by the binary before this runs; CLI flags take precedence
//! over everything read here.

use std::path::PathBuf;

use crate::data::default_data_dir;

pub const DATA_DIR_VAR: &str = "OLIST_DATA_DIR";
pub const WITH_DISTANCE_VAR: &str = "OLIST_WITH_DISTANCE";

/// Directory holding the source CSVs: the CLI value, else `OLIST_DATA_DIR`,
/// else `~/.workintech/olist/data/csv`.
pub fn resolve_data_dir(cli: Option<PathBuf>) -> PathBuf {
    cli.or_else(|| std::env::var_os(DATA_DIR_VAR).map(PathBuf::from))
        .unwrap_or_else(default_data_dir)
}

/// Distance feature toggle: set by the CLI flag, else `OLIST_WITH_DISTANCE`.
pub fn resolve_with_distance(cli: bool) -> bool {
    cli || std::env::var(WITH_DISTANCE_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
