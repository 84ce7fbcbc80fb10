use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::record::HistoryRecord;

/// A page request against the history.
///
/// `search` replicates the backend's filter: a `YYYY-MM-DD` value restricts
/// to that calendar day, a `YYYY-MM` value to that month, and anything else
/// applies no filter at all (the backend silently ignores bad filters rather
/// than erroring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        HistoryQuery {
            page: 1,
            per_page: 10,
            search: None,
        }
    }
}

/// One page of history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryRecord>,
    /// Matching records across all pages.
    pub total: usize,
    /// Page count for the current `per_page`.
    pub pages: usize,
    pub page: u32,
}

/// The storage seam for saved calculations.
///
/// Implementations must be `Send + Sync` so a store can be shared behind an
/// `Arc` across async task boundaries. Ordering is part of the contract:
/// `list` returns records newest-first by `fecha`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist one flattened calculation record.
    async fn save(&self, record: HistoryRecord) -> Result<(), StorageError>;

    /// Retrieve a page of records matching the query.
    async fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, StorageError>;
}
