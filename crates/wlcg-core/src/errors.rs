//! Unified error type for WLCG authorization
//!
//! One flat error enum shared by every crate in the workspace. Crate-local
//! errors (such as the scope parser's) convert into it at crate boundaries.

use serde::{Deserialize, Serialize};

/// Unified error type for all WLCG authorization operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WlcgError {
    /// A scope token could not be turned into a valid scope
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Error message describing the rejected scope
        message: String,
    },

    /// A path was not absolute or contained relative segments
    #[error("Invalid path: {message}")]
    InvalidPath {
        /// Error message describing the rejected path
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Filesystem error while reading configuration
    #[error("I/O error: {message}")]
    Io {
        /// Error message describing the I/O failure
        message: String,
    },
}

impl WlcgError {
    /// Create an invalid scope error
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Standard Result type for WLCG authorization operations
pub type Result<T> = std::result::Result<T, WlcgError>;

impl From<std::io::Error> for WlcgError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for WlcgError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WlcgError::invalid_scope("storage.write:/");
        assert!(matches!(err, WlcgError::InvalidScope { .. }));
        assert_eq!(err.to_string(), "Invalid scope: storage.write:/");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = WlcgError::from(io_err);
        assert!(matches!(err, WlcgError::Io { .. }));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_conversion() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        assert!(matches!(WlcgError::from(toml_err), WlcgError::Config { .. }));
    }
}
