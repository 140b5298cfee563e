//! Error types for governance runs.
//!
//! Every client failure is wrapped with the resource, repository or step it
//! happened in, so the single error reported at exit says where the run stopped.

use std::fmt;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type for governance operations.
pub type GovernorResult<T> = Result<T, Error>;

/// The steps of the branch policy, in the order they are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyStep {
    /// Replacing the branching model settings
    BranchingModel,
    /// Creating the minimum approvals restriction
    RequireApprovals,
    /// Creating the reset-approvals-on-change restriction
    ResetApprovals,
    /// Creating the merge checks restriction
    EnforceMergeChecks,
}

impl fmt::Display for PolicyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyStep::BranchingModel => "update branching model",
            PolicyStep::RequireApprovals => "require approvals to merge",
            PolicyStep::ResetApprovals => "reset approvals on change",
            PolicyStep::EnforceMergeChecks => "enforce merge checks",
        };
        f.write_str(name)
    }
}

/// Errors that abort a governance run.
#[derive(Error, Debug)]
pub enum Error {
    /// A page of a paginated listing could not be fetched or decoded.
    #[error("Failed to fetch page {page} of {resource}: {source}")]
    Pagination {
        /// The listing being paged through, e.g. "members"
        resource: &'static str,
        /// The page that failed
        page: u32,
        /// The client error
        source: bitbucket_client::Error,
    },

    /// A default reviewer could not be added or removed.
    #[error("Failed to {action} default reviewer {account_id} on repository {repository}: {source}")]
    Reviewer {
        /// "add" or "remove"
        action: &'static str,
        /// The repository slug
        repository: String,
        /// The account ID of the member
        account_id: String,
        /// The client error
        source: bitbucket_client::Error,
    },

    /// A branch policy step failed.
    #[error("Failed to {step} on repository {repository}: {source}")]
    BranchPolicy {
        /// The step that failed
        step: PolicyStep,
        /// The repository slug
        repository: String,
        /// The client error
        source: bitbucket_client::Error,
    },

    /// The governance policy is not usable.
    #[error("Invalid governance policy: {0}")]
    InvalidPolicy(String),
}
