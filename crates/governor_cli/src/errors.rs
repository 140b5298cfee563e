use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Exit code for failures during the governance run.
pub const EXIT_RUNTIME_FAILURE: i32 = 1;

/// Exit code for invalid settings or policy files.
pub const EXIT_CONFIG_FAILURE: i32 = 2;

/// Errors that can occur in the governor CLI application.
///
/// Every error ends the process. [`Error::exit_code`] decides the exit status.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while resolving settings.
    ///
    /// This error is returned before any request is sent, for example when a
    /// credential is missing or the API URL is not usable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to load the policy file from the filesystem.
    #[error("Failed to load file: {0}")]
    LoadFile(io::Error),

    /// Failed to parse the TOML policy file.
    #[error("Failed to parse TOML configuration file: {0}")]
    ParseTomlFile(toml::de::Error),

    /// The Bitbucket client could not be created.
    #[error("Bitbucket client error: {0}")]
    Client(bitbucket_client::Error),

    /// The governance run failed.
    #[error(transparent)]
    Governance(#[from] governor_core::Error),
}

impl Error {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::LoadFile(_) | Error::ParseTomlFile(_) => EXIT_CONFIG_FAILURE,
            Error::Governance(governor_core::Error::InvalidPolicy(_)) => EXIT_CONFIG_FAILURE,
            Error::Client(_) | Error::Governance(_) => EXIT_RUNTIME_FAILURE,
        }
    }
}
