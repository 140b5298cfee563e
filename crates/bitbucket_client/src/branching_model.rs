//! Branching model domain types.
//!
//! This module contains the request payload for
//! `PUT /repositories/{workspace}/{slug}/branching-model/settings`, which maps
//! branch-name prefixes to semantic branch types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "branching_model_tests.rs"]
mod tests;

/// The semantic branch types Bitbucket recognises in a branching model.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BranchTypeKind {
    /// Bug fix branches
    Bugfix,
    /// Feature branches
    Feature,
    /// Hot fix branches
    Hotfix,
    /// Release branches. Not in the default policy; a policy file may enable it.
    Release,
}

/// Configuration of a single branch type in the branching model.
///
/// # Examples
///
/// ```rust
/// use bitbucket_client::{BranchTypeKind, BranchTypeSetting};
///
/// let feature = BranchTypeSetting::enabled(BranchTypeKind::Feature, "feature/");
/// assert_eq!(feature.prefix, "feature/");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchTypeSetting {
    /// The branch type being configured
    pub kind: BranchTypeKind,
    /// Whether the branch type is enabled
    pub enabled: bool,
    /// The branch-name prefix that selects this branch type
    pub prefix: String,
}

impl BranchTypeSetting {
    /// Creates an enabled branch type with the given prefix.
    pub fn enabled(kind: BranchTypeKind, prefix: impl Into<String>) -> Self {
        Self {
            kind,
            enabled: true,
            prefix: prefix.into(),
        }
    }
}

/// Request body for the branching model settings endpoint.
///
/// The endpoint replaces the configuration of every branch type listed here.
/// Branch types not listed keep their current configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchingModelSettings {
    /// The branch types to configure
    pub branch_types: Vec<BranchTypeSetting>,
}
