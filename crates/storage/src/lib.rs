//! cafetal-storage: the history persistence seam.
//!
//! The external backend owns durability; this crate owns the contract
//! against it — the flattened record a saved calculation becomes, the
//! `HistoryStore` trait, its query/pagination types, and three backends:
//! an in-process reference store, a JSON-file store for offline use, and
//! a thin HTTP client for the real service.

mod error;
mod file;
mod http;
mod memory;
mod record;
mod traits;

pub use error::StorageError;
pub use file::FileHistoryStore;
pub use http::HttpHistoryStore;
pub use memory::MemoryHistoryStore;
pub use record::HistoryRecord;
pub use traits::{HistoryPage, HistoryQuery, HistoryStore};
