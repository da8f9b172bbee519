//! WLCG scope recognition and parsing
//!
//! Grammar of a single scope token:
//!
//! ```text
//! scope       = action-key [ ":" path ]
//! action-key  = one of the labels in the capability table
//! path        = "/" ...            ; storage scopes only, mandatory
//! ```
//!
//! [`is_recognized_scope`] and [`parse_scope`] share one validation routine and
//! differ only in how they report failure, so they cannot disagree about
//! which tokens are valid.

use crate::errors::{InvalidScopeError, InvalidScopeReason};
use crate::taxonomy::{ScopeFamily, ScopeKind};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use wlcg_core::FsPath;

const PATH_DELIMITER: char = ':';

/// A validated WLCG scope.
///
/// `path` is present exactly when `kind` belongs to the storage family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Scope {
    kind: ScopeKind,
    path: Option<FsPath>,
}

impl Scope {
    /// Parse a raw token; see [`parse_scope`]
    pub fn parse(raw: &str) -> Result<Self, InvalidScopeError> {
        parse_scope(raw)
    }

    /// Kind of this scope
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Family of this scope's kind
    pub fn family(&self) -> ScopeFamily {
        self.kind.family()
    }

    /// Resource path relative to the authorization root; `None` for compute
    /// scopes
    pub fn path(&self) -> Option<&FsPath> {
        self.path.as_ref()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}{PATH_DELIMITER}{path}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for Scope {
    type Err = InvalidScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scope(s)
    }
}

impl TryFrom<&str> for Scope {
    type Error = InvalidScopeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_scope(value)
    }
}

/// Split a token into its action key and optional path fragment, at the first
/// delimiter
pub(crate) fn split_token(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(PATH_DELIMITER) {
        Some((key, fragment)) => (key, Some(fragment)),
        None => (raw, None),
    }
}

fn validate(raw: &str) -> Result<Scope, InvalidScopeReason> {
    let (action_key, fragment) = split_token(raw);
    let kind = ScopeKind::from_label(action_key).ok_or(InvalidScopeReason::UnknownAction)?;

    if !kind.requires_path() {
        return match fragment {
            None => Ok(Scope { kind, path: None }),
            Some(_) => Err(InvalidScopeReason::UnexpectedPath),
        };
    }

    let fragment = match fragment {
        Some(fragment) if !fragment.is_empty() => fragment,
        _ => return Err(InvalidScopeReason::MissingPath),
    };

    let path = FsPath::new(fragment).map_err(|_| InvalidScopeReason::RelativePath)?;

    Ok(Scope {
        kind,
        path: Some(path),
    })
}

/// Whether `raw` is a well-formed, supported WLCG scope. Never fails.
pub fn is_recognized_scope(raw: &str) -> bool {
    validate(raw).is_ok()
}

/// Parse `raw` into a [`Scope`], rejecting anything outside the grammar
pub fn parse_scope(raw: &str) -> Result<Scope, InvalidScopeError> {
    match validate(raw) {
        Ok(scope) => {
            tracing::debug!(scope = %raw, kind = %scope.kind, "Parsed WLCG scope");
            Ok(scope)
        }
        Err(reason) => Err(InvalidScopeError::new(raw, reason)),
    }
}
