//! Default reviewer reconciliation for repositories.
//!
//! This module provides the [`ReviewerManager`] component, which adds every
//! workspace member as default reviewer of a repository or removes selected
//! members from it.

use std::collections::HashSet;

use bitbucket_client::{WorkspaceClient, WorkspaceMembership};
use tracing::{debug, info, instrument};

use crate::{AccountFilter, Error, GovernorResult};

#[cfg(test)]
#[path = "reviewer_manager_tests.rs"]
mod tests;

/// Manages the default reviewers of repositories in a workspace.
///
/// Each call is independent and idempotent on the server side. The first
/// failing call aborts the operation; calls already made are not rolled back.
///
/// # Examples
///
/// ```rust,no_run
/// use bitbucket_client::BitbucketClient;
/// use governor_core::{AccountFilter, ReviewerManager};
///
/// # async fn example(client: BitbucketClient) -> Result<(), Box<dyn std::error::Error>> {
/// # let members: Vec<bitbucket_client::WorkspaceMembership> = vec![];
/// let manager = ReviewerManager::new(&client, "acme");
/// let ignore = AccountFilter::parse("557058:bot");
///
/// let outcome = manager.add_reviewers("service-a", &members, &ignore).await?;
/// println!("Added: {}, Skipped: {}", outcome.added, outcome.skipped);
/// # Ok(())
/// # }
/// ```
pub struct ReviewerManager<'a, C: ?Sized> {
    client: &'a C,
    workspace: &'a str,
}

impl<'a, C> ReviewerManager<'a, C>
where
    C: WorkspaceClient + ?Sized,
{
    /// Creates a new ReviewerManager for the given workspace.
    pub fn new(client: &'a C, workspace: &'a str) -> Self {
        Self { client, workspace }
    }

    /// Adds every member not in `ignore` as default reviewer of the repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::Reviewer` for the first member that could not be added.
    #[instrument(skip(self, members, ignore), fields(member_count = members.len()))]
    pub async fn add_reviewers(
        &self,
        repo_slug: &str,
        members: &[WorkspaceMembership],
        ignore: &AccountFilter,
    ) -> GovernorResult<ReviewerOutcome> {
        let mut outcome = ReviewerOutcome::default();

        for member in members {
            if ignore.matches(member) {
                info!(
                    repository = repo_slug,
                    account_id = member.account_id(),
                    uuid = member.uuid(),
                    "Member is on the ignore list, skipping"
                );
                outcome.skipped += 1;
                continue;
            }

            self.client
                .add_default_reviewer(self.workspace, repo_slug, member.uuid())
                .await
                .map_err(|source| Error::Reviewer {
                    action: "add",
                    repository: repo_slug.to_string(),
                    account_id: member.account_id().to_string(),
                    source,
                })?;

            debug!(
                repository = repo_slug,
                account_id = member.account_id(),
                "Added default reviewer"
            );
            outcome.added += 1;
        }

        info!(
            repository = repo_slug,
            added = outcome.added,
            skipped = outcome.skipped,
            "Default reviewers added"
        );
        Ok(outcome)
    }

    /// Removes every member whose account ID is in `remove` from the default reviewers.
    ///
    /// A member is removed at most once, even when the member list repeats it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Reviewer` for the first member that could not be removed.
    #[instrument(skip(self, members, remove), fields(member_count = members.len()))]
    pub async fn remove_reviewers(
        &self,
        repo_slug: &str,
        members: &[WorkspaceMembership],
        remove: &AccountFilter,
    ) -> GovernorResult<ReviewerOutcome> {
        let mut outcome = ReviewerOutcome::default();
        let mut removed: HashSet<&str> = HashSet::new();

        for member in members {
            if !remove.matches(member) || !removed.insert(member.uuid()) {
                continue;
            }

            self.client
                .remove_default_reviewer(self.workspace, repo_slug, member.uuid())
                .await
                .map_err(|source| Error::Reviewer {
                    action: "remove",
                    repository: repo_slug.to_string(),
                    account_id: member.account_id().to_string(),
                    source,
                })?;

            info!(
                repository = repo_slug,
                account_id = member.account_id(),
                nickname = member.user.nickname.as_str(),
                "Removed default reviewer"
            );
            outcome.removed += 1;
        }

        Ok(outcome)
    }
}

/// Counters for the reviewer calls made on one or more repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewerOutcome {
    /// Members added as default reviewer
    pub added: usize,
    /// Members removed from the default reviewers
    pub removed: usize,
    /// Members skipped because they are on the ignore list
    pub skipped: usize,
}

impl ReviewerOutcome {
    /// Adds the counters of another outcome to this one.
    pub fn absorb(&mut self, other: ReviewerOutcome) {
        self.added += other.added;
        self.removed += other.removed;
        self.skipped += other.skipped;
    }
}
