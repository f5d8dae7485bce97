//! Find and save options passed through to entity stores.

use serde::{Deserialize, Serialize};

use super::filter::Criteria;
use super::pagination::PageRequest;
use super::sorting::SortField;

/// Options for `find_one`, `find`, `find_and_count` and `count`.
///
/// `criteria` holds alternatives: a row matches when it satisfies any one of
/// them. No criteria at all matches every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// Alternative criteria groups (OR of ANDs).
    pub criteria: Vec<Criteria>,
    /// Projection. The primary key is always selected.
    pub select: Option<Vec<String>>,
    /// Ordering, applied in sequence.
    pub order: Vec<SortField>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Maximum rows to return.
    pub take: Option<u64>,
    /// Include soft-deleted rows.
    pub with_deleted: bool,
}

impl FindOptions {
    /// Options matching every non-deleted row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alternative criteria group.
    pub fn filter(mut self, criteria: Criteria) -> Self {
        self.criteria.push(criteria);
        self
    }

    /// Restrict the selected columns.
    pub fn select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Append an ordering.
    pub fn order_by(mut self, field: SortField) -> Self {
        self.order.push(field);
        self
    }

    /// Skip the first `n` rows.
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Return at most `n` rows.
    pub fn take(mut self, n: u64) -> Self {
        self.take = Some(n);
        self
    }

    /// Include soft-deleted rows.
    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }

    /// Set `skip`/`take` from a page request.
    pub fn paginate(self, page: &PageRequest) -> Self {
        self.skip(page.offset()).take(page.limit())
    }
}

impl From<Criteria> for FindOptions {
    fn from(criteria: Criteria) -> Self {
        Self::new().filter(criteria)
    }
}

/// Options for `save`, `save_many` and `upsert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Wrap the write in a transaction.
    pub transaction: bool,
    /// Split multi-record saves into batches of this size, one transaction each.
    pub chunk: Option<usize>,
}

impl SaveOptions {
    /// Run the write directly on a pooled connection.
    pub fn without_transaction(mut self) -> Self {
        self.transaction = false;
        self
    }

    /// Save in batches of `size` records.
    pub fn chunk(mut self, size: usize) -> Self {
        self.chunk = Some(size);
        self
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            transaction: true,
            chunk: None,
        }
    }
}
