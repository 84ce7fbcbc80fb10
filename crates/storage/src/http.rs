//! HTTP backend — the real history service.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. The session cookie, when present, rides
//! along on every request; a 401 maps to [`StorageError::Unauthorized`].

use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::HistoryRecord;
use crate::traits::{HistoryPage, HistoryQuery, HistoryStore};

/// Client for the backend's `/api/historial` endpoints.
pub struct HttpHistoryStore {
    base_url: String,
    cookie: Option<String>,
}

impl HttpHistoryStore {
    pub fn new(base_url: &str) -> Self {
        HttpHistoryStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Attach the session cookie issued at login.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    fn list_url(&self, query: &HistoryQuery) -> String {
        let mut url = format!(
            "{}/api/historial?page={}&per_page={}",
            self.base_url, query.page, query.per_page
        );
        if let Some(search) = query.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                url.push_str("&search=");
                url.push_str(search);
            }
        }
        url
    }
}

fn map_transport_err(err: ureq::Error) -> StorageError {
    match err {
        ureq::Error::StatusCode(401) => StorageError::Unauthorized,
        ureq::Error::StatusCode(code) => StorageError::Rejected {
            message: format!("backend returned status {code}"),
        },
        other => StorageError::Backend(other.to_string()),
    }
}

#[async_trait]
impl HistoryStore for HttpHistoryStore {
    async fn save(&self, record: HistoryRecord) -> Result<(), StorageError> {
        let url = format!("{}/api/historial", self.base_url);
        let cookie = self.cookie.clone();

        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let mut request = agent.post(&url);
            if let Some(ref cookie) = cookie {
                request = request.header("Cookie", cookie);
            }
            request
                .send_json(&record)
                .map(|_| ())
                .map_err(map_transport_err)
        })
        .await
        .map_err(|e| StorageError::Backend(format!("task join: {e}")))?
    }

    async fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, StorageError> {
        let url = self.list_url(query);
        let cookie = self.cookie.clone();

        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let mut request = agent.get(&url);
            if let Some(ref cookie) = cookie {
                request = request.header("Cookie", cookie);
            }
            let response = request.call().map_err(map_transport_err)?;
            response
                .into_body()
                .read_json::<HistoryPage>()
                .map_err(|e| StorageError::Backend(format!("malformed history page: {e}")))
        })
        .await
        .map_err(|e| StorageError::Backend(format!("task join: {e}")))?
    }
}
