//! Crate for interacting with the Bitbucket Cloud REST API.
//!
//! This crate provides a client for making authenticated requests to Bitbucket,
//! authenticating with a username and app password over HTTP Basic auth. It covers the
//! workspace member and repository listings and the repository settings endpoints used
//! to govern default reviewers, the branching model and branch restrictions.
//!
//! All request bodies are typed and serialized at the boundary. The client value is
//! immutable once constructed and is shared by reference.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod branch_restriction;
pub use branch_restriction::{BranchMatchKind, BranchRestriction, RestrictionKind};

pub mod branching_model;
pub use branching_model::{BranchTypeKind, BranchTypeSetting, BranchingModelSettings};

pub mod page;
pub use page::Page;

pub mod repository;
pub use repository::{Project, Repository};

pub mod user;
pub use user::{User, WorkspaceMembership, WorkspaceRef};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The base URL of the Bitbucket Cloud REST API.
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Credentials for HTTP Basic authentication against Bitbucket.
///
/// The password is typically an app password. It is held as a secret and is never
/// written to logs.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Operations on a Bitbucket workspace and its repositories.
///
/// This trait is the seam between the governance logic and the HTTP transport. The
/// production implementation is [`BitbucketClient`]; tests substitute an in-memory
/// recorder.
#[async_trait]
pub trait WorkspaceClient: Send + Sync {
    /// Fetches one page of the members of a workspace.
    ///
    /// # Arguments
    ///
    /// * `workspace` - The workspace slug or UUID.
    /// * `page` - The 1-based page number.
    async fn list_members_page(
        &self,
        workspace: &str,
        page: u32,
    ) -> Result<Page<WorkspaceMembership>, Error>;

    /// Fetches one page of the repositories in a workspace.
    ///
    /// # Arguments
    ///
    /// * `workspace` - The workspace slug or UUID.
    /// * `page` - The 1-based page number.
    async fn list_repositories_page(
        &self,
        workspace: &str,
        page: u32,
    ) -> Result<Page<Repository>, Error>;

    /// Adds a user as default reviewer of a repository.
    ///
    /// Adding a user who already is a default reviewer succeeds without change.
    async fn add_default_reviewer(
        &self,
        workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error>;

    /// Removes a user from the default reviewers of a repository.
    async fn remove_default_reviewer(
        &self,
        workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error>;

    /// Replaces the branch type configuration of the repository's branching model.
    async fn update_branching_model_settings(
        &self,
        workspace: &str,
        repo_slug: &str,
        settings: &BranchingModelSettings,
    ) -> Result<(), Error>;

    /// Creates a branch restriction on a repository.
    ///
    /// The endpoint is additive: creating the same restriction twice results in two
    /// restrictions.
    async fn create_branch_restriction(
        &self,
        workspace: &str,
        repo_slug: &str,
        restriction: &BranchRestriction,
    ) -> Result<(), Error>;
}

/// A client for the Bitbucket Cloud REST API, authenticated with Basic auth.
#[derive(Debug)]
pub struct BitbucketClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl BitbucketClient {
    /// Creates a new `BitbucketClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root, e.g. [`DEFAULT_API_URL`].
    /// * `credentials` - The username and app password to authenticate with.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if `base_url` is not an absolute http(s) URL and
    /// `Error::Http` if the underlying HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_client::{BitbucketClient, Credentials, DEFAULT_API_URL};
    /// use secrecy::SecretString;
    ///
    /// let credentials = Credentials::new("ci-bot", SecretString::from("app-password".to_string()));
    /// let client = BitbucketClient::new(DEFAULT_API_URL, credentials)?;
    /// # Ok::<(), bitbucket_client::Error>(())
    /// ```
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("bitbucket-governor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Returns the API root this client sends requests to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for the given path segments, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).basic_auth(
            self.credentials.username(),
            Some(self.credentials.password.expose_secret()),
        )
    }

    /// Sends the request and returns the response body of a successful response.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, Error> {
        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Request to Bitbucket failed");
            Error::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        error!(
            url = %url,
            status = status.as_u16(),
            body = body.as_str(),
            "Bitbucket returned an error response"
        );
        Err(match status.as_u16() {
            401 | 403 => Error::AuthError(format!("{} returned {}", url.path(), status)),
            404 => Error::NotFound(url.path().to_string()),
            429 => Error::RateLimitExceeded,
            code => Error::UnexpectedStatus { status: code, body },
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        page: u32,
    ) -> Result<Page<T>, Error> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let body = self.send(self.request(Method::GET, url.clone()), &url).await?;
        let page = serde_json::from_str::<Page<T>>(&body).map_err(|e| {
            error!(url = %url, error = %e, "Failed to decode page");
            Error::Deserialization(e)
        })?;

        debug!(url = %url, items = page.values.len(), "Fetched page");
        Ok(page)
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(), Error> {
        let url = self.endpoint(segments)?;
        let mut request = self.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response_body = self.send(request, &url).await?;
        debug!(
            method = %method,
            url = %url,
            body = response_body.as_str(),
            "Write request completed"
        );
        Ok(())
    }
}

#[async_trait]
impl WorkspaceClient for BitbucketClient {
    #[instrument(skip(self))]
    async fn list_members_page(
        &self,
        workspace: &str,
        page: u32,
    ) -> Result<Page<WorkspaceMembership>, Error> {
        self.get_page(&["workspaces", workspace, "members"], page)
            .await
    }

    #[instrument(skip(self))]
    async fn list_repositories_page(
        &self,
        workspace: &str,
        page: u32,
    ) -> Result<Page<Repository>, Error> {
        self.get_page(&["repositories", workspace], page).await
    }

    #[instrument(skip(self))]
    async fn add_default_reviewer(
        &self,
        workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error> {
        self.write::<()>(
            Method::PUT,
            &[
                "repositories",
                workspace,
                repo_slug,
                "default-reviewers",
                user_uuid,
            ],
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn remove_default_reviewer(
        &self,
        workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error> {
        self.write::<()>(
            Method::DELETE,
            &[
                "repositories",
                workspace,
                repo_slug,
                "default-reviewers",
                user_uuid,
            ],
            None,
        )
        .await
    }

    #[instrument(skip(self, settings))]
    async fn update_branching_model_settings(
        &self,
        workspace: &str,
        repo_slug: &str,
        settings: &BranchingModelSettings,
    ) -> Result<(), Error> {
        self.write(
            Method::PUT,
            &[
                "repositories",
                workspace,
                repo_slug,
                "branching-model",
                "settings",
            ],
            Some(settings),
        )
        .await
    }

    #[instrument(skip(self, restriction), fields(kind = ?restriction.kind))]
    async fn create_branch_restriction(
        &self,
        workspace: &str,
        repo_slug: &str,
        restriction: &BranchRestriction,
    ) -> Result<(), Error> {
        self.write(
            Method::POST,
            &["repositories", workspace, repo_slug, "branch-restrictions"],
            Some(restriction),
        )
        .await
    }
}
