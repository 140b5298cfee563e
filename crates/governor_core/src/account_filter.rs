//! Sets of account IDs used to exclude or select workspace members.

use std::collections::BTreeSet;

use bitbucket_client::WorkspaceMembership;

#[cfg(test)]
#[path = "account_filter_tests.rs"]
mod tests;

/// A set of Atlassian account IDs.
///
/// Built from operator input such as `557058:aaa,557058:bbb`. Entries are
/// trimmed, blank entries are dropped and duplicates collapse, so a member can
/// match at most once.
///
/// # Examples
///
/// ```rust
/// use governor_core::AccountFilter;
///
/// let filter = AccountFilter::parse("a1, a2,,a1");
/// assert_eq!(filter.len(), 2);
/// assert!(filter.contains("a2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    account_ids: BTreeSet<String>,
}

impl AccountFilter {
    /// Creates a filter from the given account IDs.
    pub fn new<I, S>(account_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let account_ids = account_ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        Self { account_ids }
    }

    /// Parses a comma-separated list of account IDs.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Returns `true` when the account ID is in the set.
    pub fn contains(&self, account_id: &str) -> bool {
        self.account_ids.contains(account_id)
    }

    /// Returns `true` when the member's account ID is in the set.
    pub fn matches(&self, member: &WorkspaceMembership) -> bool {
        self.contains(member.account_id())
    }

    /// Returns `true` when the set holds no account IDs.
    pub fn is_empty(&self) -> bool {
        self.account_ids.is_empty()
    }

    /// Returns the number of distinct account IDs.
    pub fn len(&self) -> usize {
        self.account_ids.len()
    }

    /// Iterates over the account IDs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.account_ids.iter().map(String::as_str)
    }
}
