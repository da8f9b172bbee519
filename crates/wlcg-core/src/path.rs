//! Absolute namespace paths
//!
//! `FsPath` is the only path type authorization decisions are made on. It is
//! always absolute and always normalised: separators are collapsed, there is no
//! trailing separator except for the root itself, and `.`/`..` segments are
//! refused outright rather than resolved.

use crate::errors::{Result, WlcgError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '/';

/// Absolute, normalised path in the storage namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FsPath(String);

impl FsPath {
    /// Create a path from an absolute string
    pub fn new(path: &str) -> Result<Self> {
        if !path.starts_with(SEPARATOR) {
            return Err(WlcgError::invalid_path(format!(
                "path \"{path}\" is not absolute"
            )));
        }

        let mut normalised = String::with_capacity(path.len());
        for segment in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(WlcgError::invalid_path(format!(
                    "path \"{path}\" contains relative segment \"{segment}\""
                )));
            }
            normalised.push(SEPARATOR);
            normalised.push_str(segment);
        }

        if normalised.is_empty() {
            normalised.push(SEPARATOR);
        }

        Ok(Self(normalised))
    }

    /// The namespace root `/`
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Whether this is the namespace root
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Borrow the path as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path's segments, root first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Resolve `fragment` below this path.
    ///
    /// A root fragment resolves to `self` unchanged; any other fragment is
    /// appended with exactly one separator between the two.
    pub fn resolve(&self, fragment: &FsPath) -> FsPath {
        if fragment.is_root() {
            return self.clone();
        }
        if self.is_root() {
            return fragment.clone();
        }
        FsPath(format!("{}{}", self.0, fragment.0))
    }

    /// Whether `prefix` is this path or one of its ancestors.
    ///
    /// Matching is segment-aware: `/a/b` is a prefix of `/a/b/c` but not of
    /// `/a/bc`.
    pub fn has_prefix(&self, prefix: &FsPath) -> bool {
        if prefix.is_root() || self == prefix {
            return true;
        }
        self.0
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Whether this path lies strictly below `ancestor`
    pub fn is_descendant_of(&self, ancestor: &FsPath) -> bool {
        self != ancestor && self.has_prefix(ancestor)
    }
}

impl Default for FsPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FsPath {
    type Err = WlcgError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FsPath {
    type Error = WlcgError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for FsPath {
    type Error = WlcgError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<FsPath> for String {
    fn from(path: FsPath) -> Self {
        path.0
    }
}

impl AsRef<str> for FsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
