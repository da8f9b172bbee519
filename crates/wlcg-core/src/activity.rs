//! Grantable activities against a storage path

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Atomic action a client may perform on a namespace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// List directory contents
    List,
    /// Read file or directory metadata
    ReadMetadata,
    /// Change metadata of an existing entry
    UpdateMetadata,
    /// Read file data
    Download,
    /// Write new file data
    Upload,
    /// Create directories and rename entries
    Manage,
    /// Remove entries
    Delete,
    /// Bring nearline (tape) data online
    Stage,
}

/// Set of activities granted together
pub type ActivitySet = BTreeSet<Activity>;

impl Activity {
    /// Stable lowercase name used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::List => "list",
            Activity::ReadMetadata => "read_metadata",
            Activity::UpdateMetadata => "update_metadata",
            Activity::Download => "download",
            Activity::Upload => "upload",
            Activity::Manage => "manage",
            Activity::Delete => "delete",
            Activity::Stage => "stage",
        }
    }

    /// All activities
    pub fn all() -> &'static [Activity] {
        &[
            Activity::List,
            Activity::ReadMetadata,
            Activity::UpdateMetadata,
            Activity::Download,
            Activity::Upload,
            Activity::Manage,
            Activity::Delete,
            Activity::Stage,
        ]
    }

    /// Activities that only observe the namespace, allowed on ancestors of a
    /// granted path so clients can navigate to it
    pub fn is_navigation(&self) -> bool {
        matches!(self, Activity::List | Activity::ReadMetadata)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an activity name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity \"{0}\"")]
pub struct UnknownActivity(pub String);

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Activity::all()
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownActivity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_names_round_trip() {
        for activity in Activity::all() {
            assert_eq!(activity.as_str().parse::<Activity>(), Ok(*activity));
        }
        assert_eq!("DOWNLOAD".parse::<Activity>(), Ok(Activity::Download));
        assert!("write".parse::<Activity>().is_err());
    }

    #[test]
    fn test_navigation_activities() {
        assert!(Activity::List.is_navigation());
        assert!(Activity::ReadMetadata.is_navigation());
        assert!(!Activity::Download.is_navigation());
        assert!(!Activity::Stage.is_navigation());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&Activity::ReadMetadata).unwrap();
        assert_eq!(json, "\"read_metadata\"");
    }
}
