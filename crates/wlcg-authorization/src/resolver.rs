//! Resolution of parsed scopes into path-scoped grants

use crate::scope::Scope;
use crate::taxonomy::ScopeFamily;
use serde::Serialize;
use wlcg_core::{Activity, ActivitySet, FsPath};

/// Activities granted on an absolute path and everything below it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Authorisation {
    path: FsPath,
    activities: ActivitySet,
}

impl Authorisation {
    fn new(path: FsPath, activities: ActivitySet) -> Self {
        Self { path, activities }
    }

    /// Absolute path the grant is anchored at
    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Granted activities
    pub fn activities(&self) -> &ActivitySet {
        &self.activities
    }

    /// Whether `activity` is granted
    pub fn allows(&self, activity: Activity) -> bool {
        self.activities.contains(&activity)
    }
}

/// Resolve `scope` against the caller's authorization root.
///
/// Storage scopes always yield a grant on `root` joined with the scope's path.
/// Compute scopes yield nothing: they carry no filesystem capability, and
/// callers deciding on compute access must inspect [`Scope::kind`] instead.
pub fn authorize(scope: &Scope, root: &FsPath) -> Option<Authorisation> {
    match scope.family() {
        ScopeFamily::Compute => None,
        ScopeFamily::Storage => {
            let fragment = scope.path()?;
            let authorisation =
                Authorisation::new(root.resolve(fragment), scope.kind().activities());
            tracing::debug!(
                scope = %scope,
                path = %authorisation.path,
                "Resolved storage scope"
            );
            Some(authorisation)
        }
    }
}

impl Scope {
    /// Resolve this scope against `root`; see [`authorize`]
    pub fn authorisation(&self, root: &FsPath) -> Option<Authorisation> {
        authorize(self, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::parse_scope;
    use serde_json::json;
    use wlcg_core::Activity::{Download, List, ReadMetadata, Stage};

    fn vo_root() -> FsPath {
        FsPath::new("/VOs/wlcg").unwrap()
    }

    #[test]
    fn test_read_scope_at_root() {
        let auth = authorize(&parse_scope("storage.read:/").unwrap(), &vo_root()).unwrap();
        assert_eq!(auth.path(), &vo_root());
        assert_eq!(auth.activities(), &ActivitySet::from([List, ReadMetadata, Download]));
    }

    #[test]
    fn test_stage_scope_below_root() {
        let auth = authorize(&parse_scope("storage.stage:/foo").unwrap(), &vo_root()).unwrap();
        assert_eq!(auth.path().as_str(), "/VOs/wlcg/foo");
        assert!(auth.allows(Stage));
        assert!(!auth.allows(Activity::Upload));
    }

    #[test]
    fn test_compute_scopes_grant_no_path() {
        for raw in ["compute.read", "compute.modify", "compute.create", "compute.cancel"] {
            let scope = parse_scope(raw).unwrap();
            assert!(scope.authorisation(&vo_root()).is_none(), "{raw}");
        }
    }

    #[test]
    fn test_authorisation_json_shape() {
        let auth = authorize(&parse_scope("storage.stage:/foo").unwrap(), &vo_root()).unwrap();
        assert_eq!(
            serde_json::to_value(&auth).unwrap(),
            json!({
                "path": "/VOs/wlcg/foo",
                "activities": ["list", "read_metadata", "download", "stage"],
            })
        );
    }

    #[test]
    fn test_namespace_root_as_authorization_root() {
        let auth = authorize(&parse_scope("storage.modify:/data").unwrap(), &FsPath::root()).unwrap();
        assert_eq!(auth.path().as_str(), "/data");
    }
}
