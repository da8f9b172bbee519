//! Access restriction built from a token's grants
//!
//! A token is a whitelist: every request is restricted unless some
//! authorisation covers it. Listing and metadata reads are additionally allowed
//! on the ancestors of a granted path, otherwise a client holding
//! `storage.read:/data/run1` could not walk `/` → `/data` to reach it.

use crate::resolver::Authorisation;
use serde::Serialize;
use wlcg_core::{Activity, FsPath};

/// Restriction permitting only what at least one authorisation grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiTargetedRestriction {
    authorisations: Vec<Authorisation>,
}

impl MultiTargetedRestriction {
    /// Create a restriction from resolved authorisations
    pub fn new(authorisations: Vec<Authorisation>) -> Self {
        Self { authorisations }
    }

    /// The authorisations this restriction allows
    pub fn authorisations(&self) -> &[Authorisation] {
        &self.authorisations
    }

    /// Whether `activity` on `path` is forbidden
    pub fn is_restricted(&self, activity: Activity, path: &FsPath) -> bool {
        let allowed = self.authorisations.iter().any(|auth| {
            if !auth.allows(activity) {
                return false;
            }
            path.has_prefix(auth.path())
                || (activity.is_navigation() && auth.path().is_descendant_of(path))
        });

        if !allowed {
            tracing::trace!(%activity, %path, "Request outside token authorisations");
        }
        !allowed
    }

    /// Whether some authorisation grants `activity` strictly below `parent`
    pub fn has_unrestricted_child(&self, activity: Activity, parent: &FsPath) -> bool {
        self.authorisations
            .iter()
            .any(|auth| auth.allows(activity) && auth.path().is_descendant_of(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::authorize;
    use crate::scope::parse_scope;

    fn path(s: &str) -> FsPath {
        FsPath::new(s).unwrap()
    }

    fn restriction(scopes: &[&str]) -> MultiTargetedRestriction {
        let root = path("/VOs/wlcg");
        MultiTargetedRestriction::new(
            scopes
                .iter()
                .filter_map(|raw| authorize(&parse_scope(raw).unwrap(), &root))
                .collect(),
        )
    }

    #[test]
    fn test_granted_subtree_is_unrestricted() {
        let r = restriction(&["storage.read:/data"]);
        assert!(!r.is_restricted(Activity::Download, &path("/VOs/wlcg/data")));
        assert!(!r.is_restricted(Activity::Download, &path("/VOs/wlcg/data/run1/file")));
    }

    #[test]
    fn test_ungranted_activity_is_restricted() {
        let r = restriction(&["storage.read:/data"]);
        assert!(r.is_restricted(Activity::Upload, &path("/VOs/wlcg/data/file")));
        assert!(r.is_restricted(Activity::Delete, &path("/VOs/wlcg/data")));
    }

    #[test]
    fn test_sibling_paths_are_restricted() {
        let r = restriction(&["storage.read:/data"]);
        assert!(r.is_restricted(Activity::Download, &path("/VOs/wlcg/database")));
        assert!(r.is_restricted(Activity::Download, &path("/VOs/other")));
    }

    #[test]
    fn test_ancestors_allow_navigation_only() {
        let r = restriction(&["storage.read:/data"]);
        assert!(!r.is_restricted(Activity::List, &path("/VOs/wlcg")));
        assert!(!r.is_restricted(Activity::ReadMetadata, &path("/")));
        assert!(r.is_restricted(Activity::Download, &path("/VOs/wlcg")));
    }

    #[test]
    fn test_navigation_requires_granted_navigation() {
        // storage.create grants List, so the parent is listable
        let r = restriction(&["storage.create:/upload"]);
        assert!(!r.is_restricted(Activity::List, &path("/VOs/wlcg")));
        assert!(r.is_restricted(Activity::Upload, &path("/VOs/wlcg")));
    }

    #[test]
    fn test_scopes_combine() {
        let r = restriction(&["storage.read:/", "storage.modify:/scratch", "compute.read"]);
        assert_eq!(r.authorisations().len(), 2);
        assert!(!r.is_restricted(Activity::Download, &path("/VOs/wlcg/scratch/f")));
        assert!(!r.is_restricted(Activity::Delete, &path("/VOs/wlcg/scratch/f")));
        assert!(r.is_restricted(Activity::Delete, &path("/VOs/wlcg/data/f")));
    }

    #[test]
    fn test_empty_restriction_forbids_everything() {
        let r = MultiTargetedRestriction::new(Vec::new());
        for activity in Activity::all() {
            assert!(r.is_restricted(*activity, &path("/")));
        }
    }

    #[test]
    fn test_audit_json_lists_authorisations() {
        let r = restriction(&["storage.create:/upload", "compute.cancel"]);
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({
                "authorisations": [{
                    "path": "/VOs/wlcg/upload",
                    "activities": ["list", "read_metadata", "upload", "manage"],
                }],
            })
        );
    }

    #[test]
    fn test_unrestricted_child() {
        let r = restriction(&["storage.stage:/tape"]);
        assert!(r.has_unrestricted_child(Activity::Stage, &path("/VOs/wlcg")));
        assert!(r.has_unrestricted_child(Activity::Stage, &path("/")));
        assert!(!r.has_unrestricted_child(Activity::Stage, &path("/VOs/wlcg/tape")));
        assert!(!r.has_unrestricted_child(Activity::Upload, &path("/VOs/wlcg")));
    }
}
