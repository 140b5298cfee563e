//! Branching model and branch restriction management.
//!
//! This module provides the [`BranchPolicyManager`] component, which applies a
//! [`GovernancePolicy`] to a repository as a fixed sequence of writes.

use bitbucket_client::WorkspaceClient;
use tracing::{debug, info, instrument};

use crate::{Error, GovernancePolicy, GovernorResult, PolicyStep};

#[cfg(test)]
#[path = "branch_policy_manager_tests.rs"]
mod tests;

/// Applies the branch policy to repositories.
///
/// # Behavior
///
/// For each repository, in order:
/// 1. Replaces the branching model settings with the policy's branch types
/// 2. Creates the "require approvals to merge" restriction
/// 3. Creates the "reset approvals on change" restriction
/// 4. Creates the "enforce merge checks" restriction
///
/// Restriction creation is additive on the server: applying the policy twice to
/// the same repository leaves duplicate restrictions behind.
pub struct BranchPolicyManager<'a, C: ?Sized> {
    client: &'a C,
    workspace: &'a str,
    policy: &'a GovernancePolicy,
}

impl<'a, C> BranchPolicyManager<'a, C>
where
    C: WorkspaceClient + ?Sized,
{
    /// Creates a new BranchPolicyManager.
    pub fn new(client: &'a C, workspace: &'a str, policy: &'a GovernancePolicy) -> Self {
        Self {
            client,
            workspace,
            policy,
        }
    }

    /// Applies the policy to one repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::BranchPolicy` naming the first step that failed. Later
    /// steps are not attempted.
    #[instrument(skip(self))]
    pub async fn apply(&self, repo_slug: &str) -> GovernorResult<()> {
        let settings = self.policy.branching_model_settings();
        self.client
            .update_branching_model_settings(self.workspace, repo_slug, &settings)
            .await
            .map_err(|source| Error::BranchPolicy {
                step: PolicyStep::BranchingModel,
                repository: repo_slug.to_string(),
                source,
            })?;
        debug!(repository = repo_slug, "Branching model updated");

        for (step, restriction) in self.policy.restrictions() {
            self.client
                .create_branch_restriction(self.workspace, repo_slug, &restriction)
                .await
                .map_err(|source| Error::BranchPolicy {
                    step,
                    repository: repo_slug.to_string(),
                    source,
                })?;
            debug!(repository = repo_slug, step = %step, "Branch restriction created");
        }

        info!(
            repository = repo_slug,
            branch_type = self.policy.restricted_branch_type.as_str(),
            "Branch policy applied"
        );
        Ok(())
    }
}
