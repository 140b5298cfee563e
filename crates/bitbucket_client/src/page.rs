//! Paginated response envelope.
//!
//! Bitbucket wraps every collection endpoint in the same envelope. The
//! `values` array carries the items; the remaining fields describe the page.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;

/// One page of a paginated Bitbucket collection.
///
/// An empty `values` array marks the end of the collection. A missing `values`
/// field is treated the same way.
#[derive(Debug, Clone, Deserialize, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items on this page
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    /// The 1-based page number, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// The maximum number of items per page, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,
    /// The total number of items in the collection, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Link to the next page, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page holding the given items and no metadata.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            page: None,
            pagelen: None,
            size: None,
            next: None,
        }
    }

    /// Returns `true` when the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
