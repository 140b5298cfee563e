//! Workspace member domain types.
//!
//! This module contains types representing Bitbucket user accounts and their
//! membership in a workspace.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

/// Represents a Bitbucket user account.
///
/// A user is identified in two ways: the Atlassian `account_id`, which is what
/// operators type on the command line, and the `uuid`, which is what the
/// default reviewer endpoints expect in the request path.
///
/// # Examples
///
/// ```rust
/// use bitbucket_client::User;
///
/// let user = User {
///     account_id: "557058:1234".to_string(),
///     uuid: "{b2d4c1a0-0000-0000-0000-000000000001}".to_string(),
///     display_name: "Ada Lovelace".to_string(),
///     nickname: "ada".to_string(),
/// };
///
/// println!("User: {} ({})", user.display_name, user.account_id);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct User {
    /// The Atlassian account ID of the user
    #[serde(default)]
    pub account_id: String,
    /// The stable unique identifier, including the surrounding braces
    pub uuid: String,
    /// The human readable name of the user
    #[serde(default)]
    pub display_name: String,
    /// The nickname of the user
    #[serde(default)]
    pub nickname: String,
}

/// A reference to the workspace a membership belongs to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct WorkspaceRef {
    /// The URL friendly workspace identifier
    pub slug: String,
    /// The display name of the workspace
    #[serde(default)]
    pub name: String,
    /// The unique identifier of the workspace
    #[serde(default)]
    pub uuid: String,
}

/// Represents the membership of a user in a workspace.
///
/// This is the element type returned by `GET /workspaces/{workspace}/members`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct WorkspaceMembership {
    /// The member
    pub user: User,
    /// The workspace the user is a member of
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,
}

impl WorkspaceMembership {
    /// Returns the Atlassian account ID of the member.
    pub fn account_id(&self) -> &str {
        &self.user.account_id
    }

    /// Returns the unique identifier of the member.
    pub fn uuid(&self) -> &str {
        &self.user.uuid
    }

    /// Returns the display name of the member.
    pub fn display_name(&self) -> &str {
        &self.user.display_name
    }
}
