//! The governance policy applied to every repository.
//!
//! The defaults are the workspace standard: `bugfix/`, `feature/` and
//! `hotfix/` branch prefixes, and on the `development` branch type two
//! approvals, approvals reset on change and enforced merge checks. A policy
//! file may override these values.

use bitbucket_client::{
    BranchRestriction, BranchTypeKind, BranchTypeSetting, BranchingModelSettings, RestrictionKind,
};
use serde::{Deserialize, Serialize};

use crate::{Error, GovernorResult, PolicyStep};

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

/// Branch type the restrictions apply to by default.
pub const DEFAULT_RESTRICTED_BRANCH_TYPE: &str = "development";

/// Minimum number of approvals required to merge by default.
pub const DEFAULT_REQUIRED_APPROVALS: u32 = 2;

/// Branching model and branch restriction settings for a workspace.
///
/// # Example TOML
///
/// ```toml
/// restricted_branch_type = "development"
/// required_approvals = 2
///
/// [[branch_types]]
/// kind = "feature"
/// enabled = true
/// prefix = "feature/"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GovernancePolicy {
    /// Branch types registered in the branching model
    pub branch_types: Vec<BranchTypeSetting>,
    /// Branch type targeted by the restrictions
    pub restricted_branch_type: String,
    /// Minimum approvals before a pull request can be merged
    pub required_approvals: u32,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            branch_types: vec![
                BranchTypeSetting::enabled(BranchTypeKind::Bugfix, "bugfix/"),
                BranchTypeSetting::enabled(BranchTypeKind::Feature, "feature/"),
                BranchTypeSetting::enabled(BranchTypeKind::Hotfix, "hotfix/"),
            ],
            restricted_branch_type: DEFAULT_RESTRICTED_BRANCH_TYPE.to_string(),
            required_approvals: DEFAULT_REQUIRED_APPROVALS,
        }
    }
}

impl GovernancePolicy {
    /// Checks that the policy can be applied.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPolicy` when there are no branch types, a prefix is
    /// blank, the same branch type is listed twice, the restricted branch type is
    /// blank, or zero approvals are required.
    pub fn validate(&self) -> GovernorResult<()> {
        if self.branch_types.is_empty() {
            return Err(Error::InvalidPolicy(
                "at least one branch type is required".to_string(),
            ));
        }

        for (index, branch_type) in self.branch_types.iter().enumerate() {
            if branch_type.prefix.trim().is_empty() {
                return Err(Error::InvalidPolicy(format!(
                    "branch type {:?} has an empty prefix",
                    branch_type.kind
                )));
            }
            if self.branch_types[..index]
                .iter()
                .any(|other| other.kind == branch_type.kind)
            {
                return Err(Error::InvalidPolicy(format!(
                    "branch type {:?} is listed more than once",
                    branch_type.kind
                )));
            }
        }

        if self.restricted_branch_type.trim().is_empty() {
            return Err(Error::InvalidPolicy(
                "restricted branch type must not be empty".to_string(),
            ));
        }

        if self.required_approvals == 0 {
            return Err(Error::InvalidPolicy(
                "required approvals must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Builds the branching model settings request.
    pub fn branching_model_settings(&self) -> BranchingModelSettings {
        BranchingModelSettings {
            branch_types: self.branch_types.clone(),
        }
    }

    /// Builds the branch restrictions in the order they are created.
    pub fn restrictions(&self) -> [(PolicyStep, BranchRestriction); 3] {
        let branch_type = self.restricted_branch_type.as_str();
        [
            (
                PolicyStep::RequireApprovals,
                BranchRestriction::for_branch_type(
                    RestrictionKind::RequireApprovalsToMerge,
                    branch_type,
                )
                .with_value(self.required_approvals),
            ),
            (
                PolicyStep::ResetApprovals,
                BranchRestriction::for_branch_type(
                    RestrictionKind::ResetPullrequestApprovalsOnChange,
                    branch_type,
                ),
            ),
            (
                PolicyStep::EnforceMergeChecks,
                BranchRestriction::for_branch_type(
                    RestrictionKind::EnforceMergeChecks,
                    branch_type,
                ),
            ),
        ]
    }
}
