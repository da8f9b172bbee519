//! Capability taxonomy of the WLCG Common JWT Profile
//!
//! The recognised scopes form a closed allow-list. Every lookup, whether from
//! the recognition predicate, the strict parser or the resolver, goes through
//! [`TAXONOMY`], so a label that is not in the table (`storage.write`, say)
//! cannot be accepted anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use wlcg_core::Activity::{
    Delete, Download, List, Manage, ReadMetadata, Stage, UpdateMetadata, Upload,
};
use wlcg_core::{Activity, ActivitySet};

/// Family a scope kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFamily {
    /// `storage.*`: path-scoped filesystem grants
    Storage,
    /// `compute.*`: job-management capabilities outside the namespace
    Compute,
}

impl ScopeFamily {
    /// Label prefix shared by every kind in the family, including the dot
    pub fn prefix(&self) -> &'static str {
        match self {
            ScopeFamily::Storage => "storage.",
            ScopeFamily::Compute => "compute.",
        }
    }

    /// Family whose prefix `action_key` carries, whether or not the key is
    /// actually recognised
    pub fn of_action_key(action_key: &str) -> Option<ScopeFamily> {
        [ScopeFamily::Storage, ScopeFamily::Compute]
            .into_iter()
            .find(|family| action_key.starts_with(family.prefix()))
    }
}

/// Recognised WLCG scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScopeKind {
    /// `storage.read`
    #[serde(rename = "storage.read")]
    StorageRead,
    /// `storage.create`
    #[serde(rename = "storage.create")]
    StorageCreate,
    /// `storage.modify`
    #[serde(rename = "storage.modify")]
    StorageModify,
    /// `storage.stage`
    #[serde(rename = "storage.stage")]
    StorageStage,
    /// `compute.read`
    #[serde(rename = "compute.read")]
    ComputeRead,
    /// `compute.modify`
    #[serde(rename = "compute.modify")]
    ComputeModify,
    /// `compute.create`
    #[serde(rename = "compute.create")]
    ComputeCreate,
    /// `compute.cancel`
    #[serde(rename = "compute.cancel")]
    ComputeCancel,
}

/// One row of the capability table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// Action key as it appears in a token, e.g. `storage.read`
    pub label: &'static str,
    /// Kind the label maps to
    pub kind: ScopeKind,
    /// Family of the kind
    pub family: ScopeFamily,
    /// Whether a `:/path` suffix is mandatory
    pub requires_path: bool,
    /// Activities granted on the resolved path
    pub activities: &'static [Activity],
}

/// The capability table, indexed by `ScopeKind` discriminant.
///
/// `storage.create` permits new data and directories but never overwrite or
/// removal; `storage.modify` is its strict superset.
pub static TAXONOMY: [TaxonomyEntry; 8] = [
    TaxonomyEntry {
        label: "storage.read",
        kind: ScopeKind::StorageRead,
        family: ScopeFamily::Storage,
        requires_path: true,
        activities: &[List, ReadMetadata, Download],
    },
    TaxonomyEntry {
        label: "storage.create",
        kind: ScopeKind::StorageCreate,
        family: ScopeFamily::Storage,
        requires_path: true,
        activities: &[List, ReadMetadata, Upload, Manage],
    },
    TaxonomyEntry {
        label: "storage.modify",
        kind: ScopeKind::StorageModify,
        family: ScopeFamily::Storage,
        requires_path: true,
        activities: &[List, ReadMetadata, Upload, Manage, Delete, UpdateMetadata],
    },
    TaxonomyEntry {
        label: "storage.stage",
        kind: ScopeKind::StorageStage,
        family: ScopeFamily::Storage,
        requires_path: true,
        activities: &[List, ReadMetadata, Download, Stage],
    },
    TaxonomyEntry {
        label: "compute.read",
        kind: ScopeKind::ComputeRead,
        family: ScopeFamily::Compute,
        requires_path: false,
        activities: &[],
    },
    TaxonomyEntry {
        label: "compute.modify",
        kind: ScopeKind::ComputeModify,
        family: ScopeFamily::Compute,
        requires_path: false,
        activities: &[],
    },
    TaxonomyEntry {
        label: "compute.create",
        kind: ScopeKind::ComputeCreate,
        family: ScopeFamily::Compute,
        requires_path: false,
        activities: &[],
    },
    TaxonomyEntry {
        label: "compute.cancel",
        kind: ScopeKind::ComputeCancel,
        family: ScopeFamily::Compute,
        requires_path: false,
        activities: &[],
    },
];

impl ScopeKind {
    /// Look up a kind by its exact action key
    pub fn from_label(label: &str) -> Option<ScopeKind> {
        TAXONOMY
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.kind)
    }

    /// The table row for this kind
    pub fn entry(&self) -> &'static TaxonomyEntry {
        &TAXONOMY[*self as usize]
    }

    /// Action key, e.g. `storage.read`
    pub fn label(&self) -> &'static str {
        self.entry().label
    }

    /// Family of this kind
    pub fn family(&self) -> ScopeFamily {
        self.entry().family
    }

    /// Whether a token of this kind must carry an absolute path
    pub fn requires_path(&self) -> bool {
        self.entry().requires_path
    }

    /// Activities granted by this kind; empty for compute kinds
    pub fn activities(&self) -> ActivitySet {
        self.entry().activities.iter().copied().collect()
    }

    /// All recognised kinds in table order
    pub fn all() -> impl Iterator<Item = ScopeKind> {
        TAXONOMY.iter().map(|entry| entry.kind)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether `kind` requires a resource path
pub fn requires_path(kind: ScopeKind) -> bool {
    kind.requires_path()
}

/// Activities granted by `kind`
pub fn activities_for(kind: ScopeKind) -> ActivitySet {
    kind.activities()
}
