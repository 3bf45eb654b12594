//! Citation history.
//!
//! A newest-first list of generated citations capped at [`HISTORY_CAPACITY`]
//! entries. Appending past the cap evicts the oldest entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};
use crate::style::CitationStyle;

/// Key the history is stored under.
pub const HISTORY_KEY: &str = "citations";

/// Maximum number of records kept.
pub const HISTORY_CAPACITY: usize = 100;

/// One generated citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    /// The full citation text, as copied
    pub text: String,
    pub style: CitationStyle,
    /// Address of the cited page
    pub url: String,
    /// Title of the cited page
    pub title: String,
    /// When the citation was generated (RFC 3339 on disk)
    pub timestamp: DateTime<Utc>,
}

impl CitationRecord {
    pub fn new(
        text: impl Into<String>,
        style: CitationStyle,
        url: impl Into<String>,
        title: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        CitationRecord {
            text: text.into(),
            style,
            url: url.into(),
            title: title.into(),
            timestamp,
        }
    }
}

/// Capped, newest-first sequence of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<CitationRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from records already in newest-first order,
    /// dropping any beyond the capacity.
    pub fn from_records(mut records: Vec<CitationRecord>) -> Self {
        records.truncate(HISTORY_CAPACITY);
        History { records }
    }

    /// Puts `record` at the front, evicting the oldest entry if the
    /// capacity is exceeded.
    pub fn push_front(&mut self, record: CitationRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAPACITY);
    }

    pub fn records(&self) -> &[CitationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CitationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// History persisted in a [`KeyValueStore`] under [`HISTORY_KEY`].
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        HistoryStore { store }
    }

    /// Returns every stored record, newest first.
    pub fn list(&self) -> Result<Vec<CitationRecord>, StoreError> {
        Ok(self.load()?.into_records())
    }

    /// Prepends `record` and keeps the most recent [`HISTORY_CAPACITY`] entries.
    ///
    /// The same record appended twice is stored twice.
    pub fn append(&mut self, record: CitationRecord) -> Result<(), StoreError> {
        let mut history = self.load()?;
        history.push_front(record);
        self.save(&history)?;
        tracing::info!(entries = history.len(), "saved citation to history");
        Ok(())
    }

    /// Removes every record.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.save(&History::new())
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> Result<History, StoreError> {
        match self.store.get(HISTORY_KEY)? {
            Some(value) => {
                let records: Vec<CitationRecord> =
                    serde_json::from_value(value).map_err(|source| StoreError::JsonError {
                        key: HISTORY_KEY.to_string(),
                        source,
                    })?;
                Ok(History::from_records(records))
            }
            None => Ok(History::new()),
        }
    }

    fn save(&mut self, history: &History) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(history.records()).map_err(|source| StoreError::JsonError {
                key: HISTORY_KEY.to_string(),
                source,
            })?;
        self.store.set(HISTORY_KEY, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn record(n: usize) -> CitationRecord {
        CitationRecord::new(
            format!("citation {}", n),
            CitationStyle::Apa,
            format!("https://example.com/{}", n),
            format!("Page {}", n),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        )
    }

    // ============================================
    // Tests for History
    // ============================================

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut history = History::new();
        history.push_front(record(1));
        history.push_front(record(2));
        assert_eq!(history.records()[0], record(2));
        assert_eq!(history.records()[1], record(1));
    }

    #[test]
    fn test_push_front_evicts_oldest_past_capacity() {
        // Given: A full history
        let mut history = History::new();
        for n in 1..=HISTORY_CAPACITY {
            history.push_front(record(n));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // When: One more record is added
        history.push_front(record(101));

        // Then: The newest is in front and the first one is gone
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.records()[0], record(101));
        assert_eq!(history.records()[HISTORY_CAPACITY - 1], record(2));
        assert!(!history.records().contains(&record(1)));
    }

    #[test]
    fn test_from_records_truncates() {
        let records: Vec<_> = (0..150).map(record).collect();
        let history = History::from_records(records);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.records()[0], record(0));
    }

    // ============================================
    // Tests for HistoryStore
    // ============================================

    #[test]
    fn test_list_empty_store() {
        let store = HistoryStore::new(MemoryStore::new());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_append_101_keeps_100() {
        // Given: An empty store
        let mut store = HistoryStore::new(MemoryStore::new());

        // When: 101 records are appended
        for n in 1..=101 {
            store.append(record(n)).unwrap();
        }

        // Then: Exactly 100 remain, newest first, oldest evicted
        let records = store.list().unwrap();
        assert_eq!(records.len(), 100);
        assert_eq!(records[0], record(101));
        assert_eq!(records[99], record(2));
    }

    #[test]
    fn test_append_duplicate_is_kept() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(record(1)).unwrap();
        store.append(record(1)).unwrap();
        assert_eq!(store.list().unwrap(), vec![record(1), record(1)]);
    }

    #[test]
    fn test_clear_then_list_is_empty() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();

        store.clear().unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_value(record(1)).unwrap();
        assert_eq!(json["style"], "apa");
        assert_eq!(json["timestamp"], "2024-01-15T10:00:00Z");
        assert_eq!(json["title"], "Page 1");
    }
}
