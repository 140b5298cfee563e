//! Repository domain types.
//!
//! This module contains types representing Bitbucket repositories and the
//! projects that own them.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Represents the project a repository belongs to.
///
/// # Examples
///
/// ```rust
/// use bitbucket_client::Project;
///
/// let project = Project {
///     key: Some("PLAT".to_string()),
///     name: "Platform".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Project {
    /// The short project key
    #[serde(default)]
    pub key: Option<String>,
    /// The name of the project
    #[serde(default)]
    pub name: String,
}

/// Represents a Bitbucket repository.
///
/// Only the fields needed to address the repository and describe it in logs are
/// kept. The slug is unique within a workspace and is what every settings
/// endpoint expects in its path.
///
/// # Examples
///
/// ```rust
/// use bitbucket_client::Repository;
///
/// let repo = Repository::new(
///     "service-a".to_string(),
///     "Service A".to_string(),
///     "acme/service-a".to_string(),
///     true,
/// );
///
/// println!("Repository: {}", repo.slug());
/// println!("Is private: {}", repo.is_private());
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// The URL friendly identifier of the repository
    slug: String,
    /// The display name of the repository
    #[serde(default)]
    name: String,
    /// The full name of the repository (workspace/slug)
    #[serde(default)]
    full_name: String,
    /// The unique identifier of the repository
    #[serde(default)]
    uuid: String,
    /// Whether the repository is private
    #[serde(default)]
    is_private: bool,
    /// The project that owns the repository
    #[serde(default)]
    project: Option<Project>,
}

impl Repository {
    /// Creates a new Repository instance.
    ///
    /// # Arguments
    ///
    /// * `slug` - The repository slug
    /// * `name` - The display name of the repository
    /// * `full_name` - The full name including workspace (workspace/slug)
    /// * `is_private` - Whether the repository is private
    pub fn new(slug: String, name: String, full_name: String, is_private: bool) -> Self {
        Self {
            slug,
            name,
            full_name,
            uuid: String::new(),
            is_private,
            project: None,
        }
    }

    /// Returns the repository with the given owning project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    /// Returns the slug of the repository.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the display name of the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name of the repository.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the unique identifier of the repository.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Returns whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.is_private
    }

    /// Returns the project that owns the repository, if the API reported one.
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }
}
