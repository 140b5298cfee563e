//! Error types for Bitbucket client operations.
//!
//! This module defines the error types that can occur when interacting with the Bitbucket
//! Cloud REST API through the bitbucket_client crate. Every variant carries enough context
//! for the caller to log a single, meaningful message before aborting the run.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during Bitbucket client operations.
///
/// This enum represents all possible error conditions when working with the Bitbucket API,
/// including transport failures, authentication failures, unexpected status codes and
/// response decoding problems.
///
/// ## Examples
///
/// ```rust,ignore
/// use bitbucket_client::Error;
///
/// match client.list_repositories_page("my-workspace", 1).await {
///     Ok(page) => println!("Fetched {} repositories", page.values.len()),
///     Err(Error::AuthError(msg)) => eprintln!("Authentication failed: {}", msg),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or authorization failure.
    ///
    /// Returned when Bitbucket answers with `401 Unauthorized` or `403 Forbidden`.
    /// Typical causes are a wrong username, a revoked app password or an app
    /// password that lacks the repository admin scope.
    #[error("Failed to authenticate with Bitbucket: {0}")]
    AuthError(String),

    /// Error deserializing the response from Bitbucket.
    ///
    /// This error occurs when the API returns a body that cannot be parsed into
    /// the expected data structure.
    #[error("Failed to deserialize Bitbucket response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request could not be sent or the response could not be read.
    ///
    /// Wraps network level failures such as DNS errors, refused connections
    /// and TLS problems.
    #[error("HTTP request to Bitbucket failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API base URL is not a valid absolute URL.
    #[error("Invalid Bitbucket API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The requested resource was not found.
    ///
    /// Returned for `404 Not Found`. The contained string is the request path.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bitbucket API rate limit has been exceeded.
    ///
    /// Returned for `429 Too Many Requests`. The client does not retry.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Bitbucket returned a non-success status not covered by another variant.
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code
        status: u16,
        /// The raw response body, as returned by the server
        body: String,
    },
}
