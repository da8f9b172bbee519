//! Subcommand handlers

pub mod claim;
pub mod scope;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use wlcg_core::ProfileConfig;

/// Load the profile configuration, falling back to defaults when `path` is
/// absent
pub fn load_config(path: &Path) -> Result<ProfileConfig> {
    ProfileConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
