//! In-process reference backend.
//!
//! Replicates the real service's list semantics — newest-first ordering,
//! day/month search filter, page arithmetic — so tests and offline use see
//! the same behavior the HTTP backend would give.

use std::sync::Mutex;

use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::StorageError;
use crate::record::HistoryRecord;
use crate::traits::{HistoryPage, HistoryQuery, HistoryStore};

/// A history store holding records in memory.
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        MemoryHistoryStore {
            records: Mutex::new(records),
        }
    }

    /// Snapshot of every record, unordered and unfiltered.
    pub fn all(&self) -> Vec<HistoryRecord> {
        self.records.lock().expect("history lock").clone()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn save(&self, record: HistoryRecord) -> Result<(), StorageError> {
        self.records.lock().expect("history lock").push(record);
        Ok(())
    }

    async fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, StorageError> {
        let records = self.records.lock().expect("history lock").clone();
        Ok(page_records(records, query))
    }
}

// ──────────────────────────────────────────────
// Shared list semantics
// ──────────────────────────────────────────────

enum SearchFilter {
    Day(Date),
    Month { year: i32, month: u8 },
    None,
}

/// Interpret the search string the way the backend does: a full date, a
/// year-month, or (for anything else) no filter at all.
fn parse_filter(search: Option<&str>) -> SearchFilter {
    let Some(raw) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return SearchFilter::None;
    };
    let day_format = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(raw, &day_format) {
        return SearchFilter::Day(date);
    }
    if let Some((y, m)) = raw.split_once('-') {
        if let (Ok(year), Ok(month)) = (y.parse::<i32>(), m.parse::<u8>()) {
            if (1..=12).contains(&month) {
                return SearchFilter::Month { year, month };
            }
        }
    }
    SearchFilter::None
}

fn matches(filter: &SearchFilter, fecha: Option<&OffsetDateTime>) -> bool {
    match (filter, fecha) {
        (SearchFilter::None, _) => true,
        (_, None) => false,
        (SearchFilter::Day(day), Some(dt)) => dt.date() == *day,
        (SearchFilter::Month { year, month }, Some(dt)) => {
            dt.year() == *year && u8::from(dt.month()) == *month
        }
    }
}

/// Filter, order newest-first, and slice one page out of a record set.
pub(crate) fn page_records(records: Vec<HistoryRecord>, query: &HistoryQuery) -> HistoryPage {
    let filter = parse_filter(query.search.as_deref());

    let mut matching: Vec<(Option<OffsetDateTime>, HistoryRecord)> = records
        .into_iter()
        .map(|r| {
            let stamp = OffsetDateTime::parse(&r.fecha, &Rfc3339).ok();
            (stamp, r)
        })
        .filter(|(stamp, _)| matches(&filter, stamp.as_ref()))
        .collect();

    // Newest first; records with an unreadable stamp sink to the end.
    matching.sort_by(|a, b| b.0.cmp(&a.0));

    let per_page = query.per_page.max(1) as usize;
    let page = query.page.max(1);
    let total = matching.len();
    let pages = total.div_ceil(per_page);

    let start = (page as usize - 1) * per_page;
    let items = matching
        .into_iter()
        .map(|(_, r)| r)
        .skip(start)
        .take(per_page)
        .collect();

    HistoryPage {
        items,
        total,
        pages,
        page,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cafetal_core::{compute, FarmSurvey};

    fn record(finca: &str, fecha: &str) -> HistoryRecord {
        let survey = FarmSurvey {
            nombre_finca: finca.to_string(),
            area_cultivada: 5.0,
            produccion_verde: 2000.0,
            ..FarmSurvey::default()
        };
        let assessment = compute(&survey).unwrap();
        HistoryRecord::new(survey, &assessment, fecha.to_string())
    }

    fn seeded() -> MemoryHistoryStore {
        MemoryHistoryStore::with_records(vec![
            record("a", "2026-07-01T08:00:00Z"),
            record("b", "2026-08-06T09:30:00Z"),
            record("c", "2026-08-06T17:45:00Z"),
            record("d", "2026-08-02T12:00:00Z"),
        ])
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let page = seeded().list(&HistoryQuery::default()).await.unwrap();
        let names: Vec<&str> = page
            .items
            .iter()
            .map(|r| r.survey.nombre_finca.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b", "d", "a"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.pages, 1);
    }

    #[tokio::test]
    async fn day_filter_matches_the_calendar_day() {
        let query = HistoryQuery {
            search: Some("2026-08-06".to_string()),
            ..HistoryQuery::default()
        };
        let page = seeded().list(&query).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|r| r.fecha.starts_with("2026-08-06")));
    }

    #[tokio::test]
    async fn month_filter_matches_the_month() {
        let query = HistoryQuery {
            search: Some("2026-08".to_string()),
            ..HistoryQuery::default()
        };
        let page = seeded().list(&query).await.unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn junk_filter_is_ignored() {
        let query = HistoryQuery {
            search: Some("paraiso".to_string()),
            ..HistoryQuery::default()
        };
        let page = seeded().list(&query).await.unwrap();
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn pagination_slices_and_counts() {
        let store = seeded();
        let query = HistoryQuery {
            page: 2,
            per_page: 3,
            search: None,
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].survey.nombre_finca, "a");
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty() {
        let query = HistoryQuery {
            page: 9,
            per_page: 10,
            search: None,
        };
        let page = seeded().list(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn save_appends() {
        let store = MemoryHistoryStore::new();
        store
            .save(record("nueva", "2026-08-06T10:00:00Z"))
            .await
            .unwrap();
        assert_eq!(store.all().len(), 1);
    }
}
