//! In-memory `WorkspaceClient` that records every call, shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bitbucket_client::{
    BranchRestriction, BranchingModelSettings, Error, Page, Repository, User, WorkspaceClient,
    WorkspaceMembership,
};

/// A call received by the mock client.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ListMembers(u32),
    ListRepositories(u32),
    AddReviewer {
        repo: String,
        uuid: String,
    },
    RemoveReviewer {
        repo: String,
        uuid: String,
    },
    BranchingModel {
        repo: String,
        settings: BranchingModelSettings,
    },
    Restriction {
        repo: String,
        restriction: BranchRestriction,
    },
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::ListMembers(_) | Call::ListRepositories(_))
    }
}

type FailurePredicate = Box<dyn Fn(&Call) -> bool + Send + Sync>;

/// Mock workspace serving fixed pages and recording calls.
///
/// Pages past the configured ones are empty.
pub struct MockWorkspaceClient {
    member_pages: Vec<Vec<WorkspaceMembership>>,
    repository_pages: Vec<Vec<Repository>>,
    fail_when: Option<FailurePredicate>,
    calls: Mutex<Vec<Call>>,
}

impl MockWorkspaceClient {
    pub fn new() -> Self {
        Self {
            member_pages: Vec::new(),
            repository_pages: Vec::new(),
            fail_when: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_member_page(mut self, members: Vec<WorkspaceMembership>) -> Self {
        self.member_pages.push(members);
        self
    }

    pub fn with_repository_page(mut self, repositories: Vec<Repository>) -> Self {
        self.repository_pages.push(repositories);
        self
    }

    pub fn with_failure<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Call) -> bool + Send + Sync + 'static,
    {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        let fail = self.fail_when.as_ref().is_some_and(|f| f(&call));
        self.calls.lock().unwrap().push(call);
        if fail {
            return Err(Error::UnexpectedStatus {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

fn page_of<T: Clone>(pages: &[Vec<T>], page: u32) -> Page<T> {
    let values = pages
        .get(page as usize - 1)
        .cloned()
        .unwrap_or_default();
    Page::new(values)
}

pub fn member(account_id: &str, uuid: &str) -> WorkspaceMembership {
    WorkspaceMembership {
        user: User {
            account_id: account_id.to_string(),
            uuid: uuid.to_string(),
            display_name: format!("User {account_id}"),
            nickname: account_id.to_string(),
        },
        workspace: None,
    }
}

pub fn repository(slug: &str) -> Repository {
    Repository::new(
        slug.to_string(),
        slug.to_string(),
        format!("acme/{slug}"),
        true,
    )
}

#[async_trait]
impl WorkspaceClient for MockWorkspaceClient {
    async fn list_members_page(
        &self,
        _workspace: &str,
        page: u32,
    ) -> Result<Page<WorkspaceMembership>, Error> {
        self.record(Call::ListMembers(page))?;
        Ok(page_of(&self.member_pages, page))
    }

    async fn list_repositories_page(
        &self,
        _workspace: &str,
        page: u32,
    ) -> Result<Page<Repository>, Error> {
        self.record(Call::ListRepositories(page))?;
        Ok(page_of(&self.repository_pages, page))
    }

    async fn add_default_reviewer(
        &self,
        _workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error> {
        self.record(Call::AddReviewer {
            repo: repo_slug.to_string(),
            uuid: user_uuid.to_string(),
        })
    }

    async fn remove_default_reviewer(
        &self,
        _workspace: &str,
        repo_slug: &str,
        user_uuid: &str,
    ) -> Result<(), Error> {
        self.record(Call::RemoveReviewer {
            repo: repo_slug.to_string(),
            uuid: user_uuid.to_string(),
        })
    }

    async fn update_branching_model_settings(
        &self,
        _workspace: &str,
        repo_slug: &str,
        settings: &BranchingModelSettings,
    ) -> Result<(), Error> {
        self.record(Call::BranchingModel {
            repo: repo_slug.to_string(),
            settings: settings.clone(),
        })
    }

    async fn create_branch_restriction(
        &self,
        _workspace: &str,
        repo_slug: &str,
        restriction: &BranchRestriction,
    ) -> Result<(), Error> {
        self.record(Call::Restriction {
            repo: repo_slug.to_string(),
            restriction: restriction.clone(),
        })
    }
}
