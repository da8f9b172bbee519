//! Scope rejection errors
//!
//! A rejected scope is always a caller-input problem and never transient. The
//! error carries the offending token so the claim processor can record it and
//! move on to the next scope.

use serde::Serialize;
use wlcg_core::WlcgError;

/// Why a scope token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum InvalidScopeReason {
    /// The action key is not in the capability table
    #[error("unknown scope action")]
    UnknownAction,
    /// A storage scope without a `:/path` suffix
    #[error("storage scope requires a resource path")]
    MissingPath,
    /// A storage scope whose path is not absolute or contains `.`/`..`
    #[error("resource path must be absolute")]
    RelativePath,
    /// A compute scope carrying a path suffix
    #[error("compute scope does not take a resource path")]
    UnexpectedPath,
}

/// A raw token that does not form a valid WLCG scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid WLCG scope \"{scope}\": {reason}")]
pub struct InvalidScopeError {
    scope: String,
    reason: InvalidScopeReason,
}

impl InvalidScopeError {
    /// Create an error for `scope`
    pub fn new(scope: impl Into<String>, reason: InvalidScopeReason) -> Self {
        Self {
            scope: scope.into(),
            reason,
        }
    }

    /// The rejected token, verbatim
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Why it was rejected
    pub fn reason(&self) -> InvalidScopeReason {
        self.reason
    }
}

impl From<InvalidScopeError> for WlcgError {
    fn from(err: InvalidScopeError) -> Self {
        WlcgError::invalid_scope(err.to_string())
    }
}
