//! The governance run command.
//!
//! # Examples
//!
//! ```bash
//! # Add every member as default reviewer except a bot account, then apply the branch policy
//! bb-governor --workspace acme --ignore-reviewers=557058:bot
//!
//! # Remove two members from the default reviewers of every repository
//! bb-governor --workspace acme --delete-reviewers=557058:aaa,557058:bbb
//! ```

use std::path::PathBuf;

use bitbucket_client::{BitbucketClient, DEFAULT_API_URL};
use clap::Args;
use governor_core::{AccountFilter, Governor, RunMode, RunSummary};
use tracing::{info, instrument};

use crate::config::GovernorSettings;
use crate::errors::Error;

#[cfg(test)]
#[path = "run_cmd_tests.rs"]
mod tests;

/// Arguments of a governance run.
///
/// Connection settings fall back to environment variables. `Debug` is not
/// derived because the password is held here in plain text.
#[derive(Args, Clone, Default)]
pub struct RunArgs {
    /// Workspace to govern
    #[arg(long, env = "BITBUCKET_WORKSPACE")]
    pub workspace: Option<String>,

    /// Username used for Basic authentication
    #[arg(long, env = "BITBUCKET_USERNAME")]
    pub username: Option<String>,

    /// App password used for Basic authentication
    #[arg(long, env = "BITBUCKET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Root of the Bitbucket REST API
    #[arg(long, env = "BITBUCKET_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// TOML file overriding the default governance policy
    #[arg(long, env = "BB_GOVERNOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated account IDs to remove from the default reviewers.
    ///
    /// A non-empty list switches the run to delete mode: no reviewers are added,
    /// no branch policy is applied and `--ignore-reviewers` has no effect.
    #[arg(long, value_name = "ACCOUNT_IDS")]
    pub delete_reviewers: Option<String>,

    /// Comma-separated account IDs never added as default reviewer
    #[arg(long, value_name = "ACCOUNT_IDS")]
    pub ignore_reviewers: Option<String>,
}

impl RunArgs {
    /// Returns the run mode selected by the reviewer flags.
    pub fn mode(&self) -> RunMode {
        let parse = |list: &Option<String>| {
            list.as_deref()
                .map(AccountFilter::parse)
                .unwrap_or_default()
        };
        RunMode::from_filters(parse(&self.delete_reviewers), parse(&self.ignore_reviewers))
    }
}

/// Runs governance over the workspace and returns the totals.
///
/// # Errors
///
/// Returns `Error::Config` for unusable settings, before any request is sent,
/// and `Error::Governance` for the first failure of the run itself.
#[instrument(skip(args))]
pub async fn execute(args: &RunArgs) -> Result<RunSummary, Error> {
    let GovernorSettings {
        workspace,
        api_url,
        credentials,
        policy,
    } = GovernorSettings::from_args(args)?;
    let mode = args.mode();

    let client = BitbucketClient::new(&api_url, credentials).map_err(|e| match e {
        bitbucket_client::Error::InvalidBaseUrl(_) => Error::Config(e.to_string()),
        other => Error::Client(other),
    })?;

    info!(
        workspace = workspace.as_str(),
        api_url = api_url.as_str(),
        mode = mode.name(),
        "Starting governance run"
    );

    let summary = Governor::new(&client, &workspace, &policy).run(&mode).await?;
    Ok(summary)
}
