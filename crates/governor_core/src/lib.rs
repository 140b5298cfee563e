//! Core governance logic for Bitbucket workspaces.
//!
//! This crate drives a governance run against a workspace: it collects the
//! workspace members and repositories, reconciles the default reviewers of each
//! repository and applies the branching model and branch restrictions.
//!
//! All Bitbucket access goes through the [`bitbucket_client::WorkspaceClient`]
//! trait, so the logic here can be exercised against an in-memory client.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::BitbucketClient;
//! use governor_core::{AccountFilter, GovernancePolicy, Governor, RunMode};
//!
//! # async fn example(client: BitbucketClient) -> Result<(), Box<dyn std::error::Error>> {
//! let policy = GovernancePolicy::default();
//!
//! let summary = Governor::new(&client, "acme", &policy)
//!     .run(&RunMode::from_filters(AccountFilter::default(), AccountFilter::default()))
//!     .await?;
//! println!("{summary:?}");
//! # Ok(())
//! # }
//! ```

mod errors;
pub use errors::{Error, GovernorResult, PolicyStep};

pub mod account_filter;
pub use account_filter::AccountFilter;

pub mod branch_policy_manager;
pub use branch_policy_manager::BranchPolicyManager;

pub mod governor;
pub use governor::{Governor, RunMode, RunSummary};

pub mod pagination;
pub use pagination::{collect_pages, fetch_all_members, fetch_all_repositories};

pub mod policy;
pub use policy::{GovernancePolicy, DEFAULT_REQUIRED_APPROVALS, DEFAULT_RESTRICTED_BRANCH_TYPE};

pub mod reviewer_manager;
pub use reviewer_manager::{ReviewerManager, ReviewerOutcome};

#[cfg(test)]
mod mock_client;
