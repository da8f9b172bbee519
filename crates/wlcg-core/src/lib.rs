//! WLCG Core - shared primitives for token-profile authorization
//!
//! This crate holds the value types every other crate in the workspace agrees
//! on:
//!
//! - [`FsPath`]: absolute, normalised namespace paths
//! - [`Activity`]: the atomic actions a grant can permit
//! - [`WlcgError`]: the unified error type
//! - [`config`]: TOML + environment configuration for scope processing
//!
//! Nothing here performs authorization; see `wlcg-authorization`.

#![forbid(unsafe_code)]

/// Grantable activities
pub mod activity;

/// Configuration traits and the profile configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Absolute namespace paths
pub mod path;

pub use activity::{Activity, ActivitySet, UnknownActivity};
pub use config::{InvalidScopePolicy, ProfileConfig, WlcgConfig};
pub use errors::{Result, WlcgError};
pub use path::FsPath;
