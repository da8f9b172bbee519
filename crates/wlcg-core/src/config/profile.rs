//! Scope-claim processing configuration

use super::traits::WlcgConfig;
use crate::{FsPath, WlcgError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default upper bound on tokens taken from one scope claim
pub const DEFAULT_MAX_SCOPES: usize = 64;

/// What to do with a WLCG-looking scope token that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidScopePolicy {
    /// Log the token, record it as rejected and keep evaluating the claim
    #[default]
    Skip,
    /// Fail the whole claim
    Reject,
}

impl InvalidScopePolicy {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidScopePolicy::Skip => "skip",
            InvalidScopePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for InvalidScopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvalidScopePolicy {
    type Err = WlcgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(InvalidScopePolicy::Skip),
            "reject" => Ok(InvalidScopePolicy::Reject),
            other => Err(WlcgError::config(format!(
                "unknown invalid-scope policy \"{other}\", expected \"skip\" or \"reject\""
            ))),
        }
    }
}

/// Configuration for turning a token's scope claim into grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// VO root that scope paths are resolved against
    pub authorization_root: FsPath,
    /// Handling of WLCG-looking tokens that fail to parse
    pub on_invalid_scope: InvalidScopePolicy,
    /// Maximum number of tokens processed from one claim
    pub max_scopes: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            authorization_root: FsPath::root(),
            on_invalid_scope: InvalidScopePolicy::default(),
            max_scopes: DEFAULT_MAX_SCOPES,
        }
    }
}

impl ProfileConfig {
    /// Configuration rooted at `authorization_root`, other fields defaulted
    pub fn with_root(authorization_root: FsPath) -> Self {
        Self {
            authorization_root,
            ..Self::default()
        }
    }

    /// Load from `path` if it exists, then apply environment overrides and
    /// validate
    pub fn load(path: &Path) -> Result<Self, WlcgError> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::defaults()
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

impl WlcgConfig for ProfileConfig {
    fn load_from_file(path: &Path) -> Result<Self, WlcgError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WlcgError::io(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            WlcgError::config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), WlcgError> {
        match key {
            "authorization_root" => self.authorization_root = FsPath::new(value.trim())?,
            "on_invalid_scope" => self.on_invalid_scope = value.parse()?,
            "max_scopes" => {
                self.max_scopes = value.trim().parse().map_err(|e| {
                    WlcgError::config(format!("max_scopes \"{value}\" is not a count: {e}"))
                })?;
            }
            other => {
                tracing::debug!(key = other, "Ignoring unknown configuration override");
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), WlcgError> {
        if self.max_scopes == 0 {
            return Err(WlcgError::config("max_scopes must be at least 1"));
        }
        Ok(())
    }
}
