//! Orchestration of a governance run across a workspace.
//!
//! A run fetches the workspace members and every repository, then walks the
//! repositories in listing order. In apply mode each repository gets its
//! default reviewers followed by the branch policy. In delete mode only the
//! selected reviewers are removed.

use bitbucket_client::WorkspaceClient;
use tracing::{info, instrument};

use crate::pagination::{fetch_all_members, fetch_all_repositories};
use crate::{
    AccountFilter, BranchPolicyManager, GovernancePolicy, GovernorResult, ReviewerManager,
    ReviewerOutcome,
};

#[cfg(test)]
#[path = "governor_tests.rs"]
mod tests;

/// What a run does to each repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Add every member not in `ignore` as default reviewer, then apply the branch policy.
    Apply {
        /// Members never added as default reviewer
        ignore: AccountFilter,
    },
    /// Remove the members in `remove` from the default reviewers. No policy is applied.
    DeleteReviewers {
        /// Members to remove
        remove: AccountFilter,
    },
}

impl RunMode {
    /// Selects the mode from the operator's filters.
    ///
    /// A non-empty deletion set selects delete mode; otherwise the run applies
    /// the policy, excluding the members in `ignore`.
    pub fn from_filters(remove: AccountFilter, ignore: AccountFilter) -> Self {
        if remove.is_empty() {
            RunMode::Apply { ignore }
        } else {
            RunMode::DeleteReviewers { remove }
        }
    }

    /// Short name of the mode, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Apply { .. } => "apply",
            RunMode::DeleteReviewers { .. } => "delete-reviewers",
        }
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of workspace members fetched
    pub members: usize,
    /// Number of repositories visited
    pub repositories: usize,
    /// Reviewer calls made across all repositories
    pub reviewers: ReviewerOutcome,
    /// Repositories the branch policy was applied to
    pub policies_applied: usize,
}

/// Drives a governance run over every repository of a workspace.
///
/// # Examples
///
/// ```rust,no_run
/// use bitbucket_client::BitbucketClient;
/// use governor_core::{AccountFilter, GovernancePolicy, Governor, RunMode};
///
/// # async fn example(client: BitbucketClient) -> Result<(), Box<dyn std::error::Error>> {
/// let policy = GovernancePolicy::default();
/// let governor = Governor::new(&client, "acme", &policy);
///
/// let mode = RunMode::from_filters(AccountFilter::default(), AccountFilter::parse("557058:bot"));
/// let summary = governor.run(&mode).await?;
/// println!("Visited {} repositories", summary.repositories);
/// # Ok(())
/// # }
/// ```
pub struct Governor<'a, C: ?Sized> {
    client: &'a C,
    workspace: &'a str,
    policy: &'a GovernancePolicy,
}

impl<'a, C> Governor<'a, C>
where
    C: WorkspaceClient + ?Sized,
{
    /// Creates a new Governor for the given workspace and policy.
    pub fn new(client: &'a C, workspace: &'a str, policy: &'a GovernancePolicy) -> Self {
        Self {
            client,
            workspace,
            policy,
        }
    }

    /// Runs the given mode to completion.
    ///
    /// The run stops at the first error. Repositories processed before the
    /// failure keep their new settings.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while listing members or repositories, or
    /// while updating a repository.
    #[instrument(skip(self, mode), fields(workspace = self.workspace, mode = mode.name()))]
    pub async fn run(&self, mode: &RunMode) -> GovernorResult<RunSummary> {
        if let RunMode::Apply { .. } = mode {
            self.policy.validate()?;
        }

        let members = fetch_all_members(self.client, self.workspace).await?;
        info!(count = members.len(), "Fetched workspace members");

        let repositories = fetch_all_repositories(self.client, self.workspace).await?;
        info!(count = repositories.len(), "Fetched workspace repositories");

        let reviewers = ReviewerManager::new(self.client, self.workspace);
        let branch_policy = BranchPolicyManager::new(self.client, self.workspace, self.policy);

        let mut summary = RunSummary {
            members: members.len(),
            ..Default::default()
        };

        for repository in &repositories {
            let slug = repository.slug();
            match mode {
                RunMode::Apply { ignore } => {
                    let outcome = reviewers.add_reviewers(slug, &members, ignore).await?;
                    summary.reviewers.absorb(outcome);

                    branch_policy.apply(slug).await?;
                    summary.policies_applied += 1;
                }
                RunMode::DeleteReviewers { remove } => {
                    let outcome = reviewers.remove_reviewers(slug, &members, remove).await?;
                    summary.reviewers.absorb(outcome);
                }
            }
            summary.repositories += 1;
        }

        info!(
            repositories = summary.repositories,
            added = summary.reviewers.added,
            removed = summary.reviewers.removed,
            skipped = summary.reviewers.skipped,
            policies_applied = summary.policies_applied,
            "Governance run complete"
        );
        Ok(summary)
    }
}
