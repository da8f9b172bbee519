//! Scope-claim processing for the WLCG token profile
//!
//! A token's `scope` claim is a space-separated list mixing WLCG scopes with
//! unrelated OIDC scopes (`openid`, `offline_access`, ...). [`WlcgProfile`]
//! sorts the claim into grants, compute capabilities, foreign scopes and
//! rejected WLCG-looking tokens. A bad token grants nothing; whether it also
//! fails the claim is a [`InvalidScopePolicy`] decision.

use crate::errors::{InvalidScopeError, InvalidScopeReason};
use crate::resolver::{authorize, Authorisation};
use crate::restriction::MultiTargetedRestriction;
use crate::scope::{parse_scope, split_token};
use crate::taxonomy::{ScopeFamily, ScopeKind};
use serde::Serialize;
use wlcg_core::{InvalidScopePolicy, ProfileConfig, Result, WlcgError};

/// A WLCG-looking token that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedScope {
    /// The token, verbatim
    pub scope: String,
    /// Why it was rejected
    pub reason: InvalidScopeReason,
}

impl From<InvalidScopeError> for RejectedScope {
    fn from(err: InvalidScopeError) -> Self {
        Self {
            scope: err.scope().to_string(),
            reason: err.reason(),
        }
    }
}

/// Outcome of processing one scope claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeClaim {
    /// Grants from storage scopes, in claim order
    pub authorisations: Vec<Authorisation>,
    /// Compute capabilities, deduplicated, in claim order
    pub compute: Vec<ScopeKind>,
    /// Tokens outside the WLCG profile
    pub other_scopes: Vec<String>,
    /// WLCG-looking tokens that were skipped
    pub rejected: Vec<RejectedScope>,
}

impl ScopeClaim {
    /// Filesystem restriction implied by the claim, or `None` when no storage
    /// scope was granted
    pub fn restriction(&self) -> Option<MultiTargetedRestriction> {
        if self.authorisations.is_empty() {
            None
        } else {
            Some(MultiTargetedRestriction::new(self.authorisations.clone()))
        }
    }

    /// Whether the claim carries the compute capability `kind`
    pub fn has_compute(&self, kind: ScopeKind) -> bool {
        self.compute.contains(&kind)
    }
}

/// WLCG token-profile claim processor
#[derive(Debug, Clone, Default)]
pub struct WlcgProfile {
    config: ProfileConfig,
}

impl WlcgProfile {
    /// Create a processor with `config`
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Sort a space-separated scope claim into grants and capabilities
    pub fn process_claim(&self, claim: &str) -> Result<ScopeClaim> {
        let tokens: Vec<&str> = claim.split_ascii_whitespace().collect();
        if tokens.len() > self.config.max_scopes {
            return Err(WlcgError::invalid_scope(format!(
                "claim carries {} scopes, limit is {}",
                tokens.len(),
                self.config.max_scopes
            )));
        }

        let root = &self.config.authorization_root;
        let mut outcome = ScopeClaim::default();

        for token in tokens {
            let (action_key, _) = split_token(token);
            if ScopeFamily::of_action_key(action_key).is_none() {
                outcome.other_scopes.push(token.to_string());
                continue;
            }

            let scope = match parse_scope(token) {
                Ok(scope) => scope,
                Err(err) => match self.config.on_invalid_scope {
                    InvalidScopePolicy::Reject => return Err(err.into()),
                    InvalidScopePolicy::Skip => {
                        tracing::warn!(scope = %token, reason = %err.reason(), "Skipping invalid WLCG scope");
                        outcome.rejected.push(err.into());
                        continue;
                    }
                },
            };

            match authorize(&scope, root) {
                Some(authorisation) => outcome.authorisations.push(authorisation),
                None => {
                    if !outcome.compute.contains(&scope.kind()) {
                        outcome.compute.push(scope.kind());
                    }
                }
            }
        }

        tracing::debug!(
            root = %root,
            granted = outcome.authorisations.len(),
            compute = outcome.compute.len(),
            rejected = outcome.rejected.len(),
            "Processed scope claim"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wlcg_core::{Activity, FsPath};

    fn profile(policy: InvalidScopePolicy) -> WlcgProfile {
        WlcgProfile::new(ProfileConfig {
            on_invalid_scope: policy,
            ..ProfileConfig::with_root(FsPath::new("/VOs/wlcg").unwrap())
        })
    }

    #[test]
    fn test_mixed_claim_is_sorted() {
        let claim = profile(InvalidScopePolicy::Skip)
            .process_claim("openid storage.read:/ compute.create offline_access storage.stage:/tape")
            .unwrap();

        assert_eq!(claim.authorisations.len(), 2);
        assert_eq!(claim.authorisations[0].path().as_str(), "/VOs/wlcg");
        assert_eq!(claim.authorisations[1].path().as_str(), "/VOs/wlcg/tape");
        assert_eq!(claim.compute, vec![ScopeKind::ComputeCreate]);
        assert_eq!(claim.other_scopes, vec!["openid", "offline_access"]);
        assert!(claim.rejected.is_empty());
    }

    #[test]
    fn test_skip_policy_records_rejections() {
        let claim = profile(InvalidScopePolicy::Skip)
            .process_claim("storage.write:/ storage.read:foo storage.read:/data")
            .unwrap();

        assert_eq!(claim.authorisations.len(), 1);
        assert_eq!(
            claim.rejected,
            vec![
                RejectedScope {
                    scope: "storage.write:/".into(),
                    reason: InvalidScopeReason::UnknownAction,
                },
                RejectedScope {
                    scope: "storage.read:foo".into(),
                    reason: InvalidScopeReason::RelativePath,
                },
            ]
        );
    }

    #[test]
    fn test_reject_policy_fails_claim() {
        let err = profile(InvalidScopePolicy::Reject)
            .process_claim("storage.read:/ storage.read")
            .unwrap_err();
        assert!(matches!(err, WlcgError::InvalidScope { .. }));
    }

    #[test]
    fn test_reject_policy_ignores_foreign_scopes() {
        let claim = profile(InvalidScopePolicy::Reject)
            .process_claim("openid profile storage.read:/")
            .unwrap();
        assert_eq!(claim.other_scopes.len(), 2);
        assert_eq!(claim.authorisations.len(), 1);
    }

    #[test]
    fn test_compute_scopes_deduplicated() {
        let claim = profile(InvalidScopePolicy::Skip)
            .process_claim("compute.read compute.cancel compute.read")
            .unwrap();
        assert_eq!(claim.compute, vec![ScopeKind::ComputeRead, ScopeKind::ComputeCancel]);
        assert!(claim.has_compute(ScopeKind::ComputeCancel));
        assert!(!claim.has_compute(ScopeKind::ComputeModify));
        assert!(claim.restriction().is_none());
    }

    #[test]
    fn test_restriction_from_claim() {
        let claim = profile(InvalidScopePolicy::Skip)
            .process_claim("storage.read:/data")
            .unwrap();
        let restriction = claim.restriction().unwrap();
        let file = FsPath::new("/VOs/wlcg/data/file").unwrap();
        assert!(!restriction.is_restricted(Activity::Download, &file));
        assert!(restriction.is_restricted(Activity::Upload, &file));
    }

    #[test]
    fn test_claim_json_shape() {
        let claim = profile(InvalidScopePolicy::Skip)
            .process_claim("storage.read:/data storage.write:/ storage.read:foo compute.create openid")
            .unwrap();

        assert_eq!(
            serde_json::to_value(&claim).unwrap(),
            json!({
                "authorisations": [
                    {"path": "/VOs/wlcg/data", "activities": ["list", "read_metadata", "download"]},
                ],
                "compute": ["compute.create"],
                "other_scopes": ["openid"],
                "rejected": [
                    {"scope": "storage.write:/", "reason": "unknown_action"},
                    {"scope": "storage.read:foo", "reason": "relative_path"},
                ],
            })
        );
    }

    #[test]
    fn test_scope_limit() {
        let profile = WlcgProfile::new(ProfileConfig {
            max_scopes: 2,
            ..ProfileConfig::default()
        });
        assert!(profile.process_claim("openid storage.read:/").is_ok());
        assert!(profile.process_claim("openid storage.read:/ compute.read").is_err());
    }

    #[test]
    fn test_empty_claim() {
        let claim = WlcgProfile::default().process_claim("   ").unwrap();
        assert_eq!(claim, ScopeClaim::default());
    }
}
