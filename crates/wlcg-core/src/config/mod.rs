//! Configuration loading for WLCG scope processing
//!
//! Files are TOML; every field can be overridden with a `WLCG_`-prefixed
//! environment variable after the file is read.

mod profile;
mod traits;

pub use profile::{InvalidScopePolicy, ProfileConfig, DEFAULT_MAX_SCOPES};
pub use traits::{WlcgConfig, ENV_PREFIX};
