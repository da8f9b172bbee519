//! Core configuration traits

use crate::WlcgError;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "WLCG_";

/// Core trait for WLCG configuration types
pub trait WlcgConfig: Clone + Default + Send + Sync + 'static {
    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, WlcgError>;

    /// Apply `KEY=value` overrides; keys are already stripped of [`ENV_PREFIX`]
    /// and lowercased
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), WlcgError>;

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), WlcgError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge with an explicit set of variables, honouring [`ENV_PREFIX`]
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), WlcgError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                self.set_from_string(&config_key.to_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), WlcgError>;
}
