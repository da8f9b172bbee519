//! WLCG token-profile authorization
//!
//! Translates WLCG Common JWT Profile scopes (`storage.read:/data`,
//! `compute.create`, ...) into path-scoped grants. Data flows
//! taxonomy → parser → resolver:
//!
//! - [`taxonomy`]: the closed table of recognised scope kinds and what they grant
//! - [`scope`]: the recognition predicate and the strict parser
//! - [`resolver`]: resolution of a parsed scope against an authorization root
//! - [`restriction`]: access checks over a token's combined grants
//! - [`profile`]: processing of a whole space-separated `scope` claim
//!
//! Token signature verification and claim extraction happen upstream; this
//! crate only ever sees an already-authenticated scope string.
//!
//! ```
//! use wlcg_authorization::{authorize, parse_scope};
//! use wlcg_core::{Activity, FsPath};
//!
//! let scope = parse_scope("storage.stage:/foo").unwrap();
//! let root = FsPath::new("/VOs/wlcg").unwrap();
//! let grant = authorize(&scope, &root).unwrap();
//!
//! assert_eq!(grant.path().as_str(), "/VOs/wlcg/foo");
//! assert!(grant.allows(Activity::Stage));
//! ```

#![forbid(unsafe_code)]

pub mod errors;
pub mod profile;
pub mod resolver;
pub mod restriction;
pub mod scope;
pub mod taxonomy;

pub use errors::{InvalidScopeError, InvalidScopeReason};
pub use profile::{RejectedScope, ScopeClaim, WlcgProfile};
pub use resolver::{authorize, Authorisation};
pub use restriction::MultiTargetedRestriction;
pub use scope::{is_recognized_scope, parse_scope, Scope};
pub use taxonomy::{activities_for, requires_path, ScopeFamily, ScopeKind, TaxonomyEntry, TAXONOMY};
