/// All errors a HistoryStore implementation can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend refused the session (expired or missing cookie).
    #[error("not authorized")]
    Unauthorized,

    /// The backend rejected the record.
    #[error("record rejected: {message}")]
    Rejected { message: String },

    /// A backend-specific failure (transport, file I/O, serialization).
    #[error("storage backend error: {0}")]
    Backend(String),
}
