//! Branch restriction domain types.
//!
//! This module contains the request payload for
//! `POST /repositories/{workspace}/{slug}/branch-restrictions`. Each call
//! creates one restriction; the endpoint is additive, so posting the same
//! restriction twice yields two restrictions.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "branch_restriction_tests.rs"]
mod tests;

/// The kinds of branch restriction this client knows how to create.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    /// Require a minimum number of approvals before merging
    RequireApprovalsToMerge,
    /// Withdraw approvals when the source branch changes
    ResetPullrequestApprovalsOnChange,
    /// Block the merge button while merge checks fail
    EnforceMergeChecks,
}

/// How a restriction selects the branches it applies to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BranchMatchKind {
    /// Match by branch type from the branching model
    BranchingModel,
    /// Match by glob pattern. Accepted by the API; the governor never sends it.
    Glob,
}

/// Request body for creating a branch restriction.
///
/// # Examples
///
/// ```rust
/// use bitbucket_client::{BranchRestriction, RestrictionKind};
///
/// let restriction = BranchRestriction::for_branch_type(
///     RestrictionKind::RequireApprovalsToMerge,
///     "development",
/// )
/// .with_value(2);
///
/// assert_eq!(restriction.value, Some(2));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchRestriction {
    /// The kind of restriction
    pub kind: RestrictionKind,
    /// How branches are selected
    pub branch_match_kind: BranchMatchKind,
    /// The branch type to restrict, used with `BranchMatchKind::BranchingModel`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,
    /// The glob pattern, empty when matching by branch type
    #[serde(default)]
    pub pattern: String,
    /// Numeric parameter of the restriction, e.g. the approval count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl BranchRestriction {
    /// Creates a restriction matching every branch of the given branch type.
    pub fn for_branch_type(kind: RestrictionKind, branch_type: impl Into<String>) -> Self {
        Self {
            kind,
            branch_match_kind: BranchMatchKind::BranchingModel,
            branch_type: Some(branch_type.into()),
            pattern: String::new(),
            value: None,
        }
    }

    /// Sets the numeric parameter of the restriction.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}
