//! Settings resolution for the governor CLI.
//!
//! The workspace, credentials and API URL come from flags or their environment
//! variables; a `.env` file is loaded into the environment before parsing. The
//! governance policy comes from an optional TOML file and falls back to
//! [`GovernancePolicy::default`].
//!
//! All settings are resolved and checked before the first request is sent.

use std::{fs, path::Path};

use bitbucket_client::Credentials;
use governor_core::GovernancePolicy;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::commands::run_cmd::RunArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Everything a governance run needs, resolved from flags, environment and policy file.
#[derive(Debug)]
pub struct GovernorSettings {
    /// The workspace slug
    pub workspace: String,
    /// The Bitbucket API root
    pub api_url: String,
    /// Username and app password
    pub credentials: Credentials,
    /// The policy applied in apply mode
    pub policy: GovernancePolicy,
}

impl GovernorSettings {
    /// Resolves the settings for a run.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the workspace, username or password is missing
    /// or blank, or when the policy file does not exist or is invalid. Returns
    /// `Error::LoadFile` or `Error::ParseTomlFile` when the policy file cannot be
    /// read or parsed.
    pub fn from_args(args: &RunArgs) -> Result<Self, Error> {
        let workspace = required(args.workspace.as_deref(), "--workspace", "BITBUCKET_WORKSPACE")?;
        let username = required(args.username.as_deref(), "--username", "BITBUCKET_USERNAME")?;
        let password = required(args.password.as_deref(), "--password", "BITBUCKET_PASSWORD")?;

        let api_url = args.api_url.trim();
        if api_url.is_empty() {
            return Err(Error::Config(
                "the API URL must not be empty (--api-url or BITBUCKET_API_URL)".to_string(),
            ));
        }

        let policy = match &args.config {
            Some(path) => load_policy(path)?,
            None => {
                debug!("No policy file given, using the default policy");
                GovernancePolicy::default()
            }
        };

        Ok(Self {
            workspace: workspace.trim().to_string(),
            api_url: api_url.to_string(),
            credentials: Credentials::new(username.trim(), SecretString::from(password.to_string())),
            policy,
        })
    }
}

fn required<'a>(value: Option<&'a str>, flag: &str, env: &str) -> Result<&'a str, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{flag} or {env} must be set"))),
    }
}

/// Loads and validates a governance policy from a TOML file.
///
/// Keys left out of the file keep their default values.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use governor_cli::config::load_policy;
///
/// match load_policy(Path::new("./governance.toml")) {
///     Ok(policy) => println!("Requiring {} approvals", policy.required_approvals),
///     Err(e) => eprintln!("Failed to load policy: {}", e),
/// }
/// ```
pub fn load_policy(path: &Path) -> Result<GovernancePolicy, Error> {
    debug!("Loading governance policy from {:?}", path);

    if !path.exists() {
        return Err(Error::Config(format!("Policy file not found: {:?}", path)));
    }

    let content = fs::read_to_string(path).map_err(Error::LoadFile)?;
    let policy: GovernancePolicy = toml::from_str(&content).map_err(Error::ParseTomlFile)?;

    policy
        .validate()
        .map_err(|e| Error::Config(format!("{} in {:?}", e, path)))?;

    info!(
        path = ?path,
        branch_types = policy.branch_types.len(),
        restricted_branch_type = policy.restricted_branch_type.as_str(),
        required_approvals = policy.required_approvals,
        "Loaded governance policy"
    );
    Ok(policy)
}
