//! Collection of paginated listings.
//!
//! Bitbucket listings are fetched page by page, starting at page 1, until a
//! page comes back empty. Page sizes vary, so the empty page is the only
//! termination signal; neither the page length nor the `next` link is trusted.

use std::future::Future;

use bitbucket_client::{Page, Repository, WorkspaceClient, WorkspaceMembership};
use tracing::{debug, info, instrument};

use crate::{Error, GovernorResult};

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

/// Fetches consecutive pages until an empty page and returns all items in fetch order.
///
/// No page is requested after the first empty page. The first failing fetch
/// aborts the collection; items gathered so far are discarded.
///
/// # Arguments
///
/// * `resource` - Name of the listing, used in logs and errors.
/// * `fetch` - Fetches the page with the given 1-based number.
///
/// # Errors
///
/// Returns `Error::Pagination` naming the resource and page that failed.
pub async fn collect_pages<T, F, Fut>(resource: &'static str, mut fetch: F) -> GovernorResult<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, bitbucket_client::Error>>,
{
    let mut items = Vec::new();
    let mut page: u32 = 1;

    loop {
        let batch = fetch(page)
            .await
            .map_err(|source| Error::Pagination {
                resource,
                page,
                source,
            })?;

        if batch.is_empty() {
            debug!(resource, page, "Reached empty page");
            break;
        }

        debug!(resource, page, count = batch.values.len(), "Fetched page");
        items.extend(batch.values);
        page += 1;
    }

    info!(resource, total = items.len(), pages = page - 1, "Collected listing");
    Ok(items)
}

/// Fetches every member of the workspace.
#[instrument(skip(client))]
pub async fn fetch_all_members<C>(
    client: &C,
    workspace: &str,
) -> GovernorResult<Vec<WorkspaceMembership>>
where
    C: WorkspaceClient + ?Sized,
{
    collect_pages("members", |page| client.list_members_page(workspace, page)).await
}

/// Fetches every repository of the workspace.
#[instrument(skip(client))]
pub async fn fetch_all_repositories<C>(client: &C, workspace: &str) -> GovernorResult<Vec<Repository>>
where
    C: WorkspaceClient + ?Sized,
{
    collect_pages("repositories", |page| {
        client.list_repositories_page(workspace, page)
    })
    .await
}
