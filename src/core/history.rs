//! Session history log

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::core::models::HistoryRecord;

/// Append-only log of completed translations for the current session.
///
/// Single writer (the orchestrator), any number of readers. Appends and
/// clears are atomic from a reader's point of view; `snapshot` copies out
/// and never aliases internal storage. When a capacity is configured, the
/// oldest record is evicted on overflow.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    records: Arc<RwLock<VecDeque<HistoryRecord>>>,
    max_entries: Option<usize>,
    revision: Arc<watch::Sender<u64>>,
}

impl HistoryLog {
    /// Create a new history log; `max_entries` of `None` means unbounded
    pub fn new(max_entries: Option<usize>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            max_entries,
            revision: Arc::new(revision),
        }
    }

    /// Create an unbounded history log
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Append a record to the end of the log
    pub async fn append(&self, record: HistoryRecord) {
        {
            let mut records = self.records.write().await;
            records.push_back(record);

            if let Some(max) = self.max_entries {
                while records.len() > max {
                    records.pop_front();
                }
            }

            debug!("history log now holds {} records", records.len());
        }

        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Empty the whole log atomically
    pub async fn clear(&self) {
        {
            let mut records = self.records.write().await;
            records.clear();
        }

        debug!("history log cleared");
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Ordered copy of the current records, oldest first
    pub async fn snapshot(&self) -> Vec<HistoryRecord> {
        let records = self.records.read().await;
        records.iter().cloned().collect()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the log holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Subscribe to history changes.
    ///
    /// The receiver observes a revision counter bumped on every append and
    /// clear, so a display surface can re-render without polling.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> HistoryRecord {
        HistoryRecord::new("French", "English", text)
    }

    #[tokio::test]
    async fn test_append_and_snapshot() {
        let log = HistoryLog::unbounded();
        assert!(log.is_empty().await);

        log.append(record("Hello world")).await;
        log.append(record("Good morning")).await;

        let snapshot = log.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].translated_text, "Hello world");
        assert_eq!(snapshot[1].translated_text, "Good morning");
    }

    #[tokio::test]
    async fn test_snapshot_is_idempotent() {
        let log = HistoryLog::unbounded();
        log.append(record("Hello")).await;

        let first = log.snapshot().await;
        let second = log.snapshot().await;

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].translated_text, second[0].translated_text);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_alias_storage() {
        let log = HistoryLog::unbounded();
        log.append(record("Hello")).await;

        let mut snapshot = log.snapshot().await;
        snapshot.clear();

        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_empties_log() {
        let log = HistoryLog::unbounded();
        for i in 0..5 {
            log.append(record(&format!("text {}", i))).await;
        }
        assert_eq!(log.len().await, 5);

        log.clear().await;

        assert!(log.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_capped_log_evicts_oldest() {
        let log = HistoryLog::new(Some(2));

        log.append(record("first")).await;
        log.append(record("second")).await;
        log.append(record("third")).await;

        let snapshot = log.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].translated_text, "second");
        assert_eq!(snapshot[1].translated_text, "third");
    }

    #[tokio::test]
    async fn test_revision_bumps_on_append_and_clear() {
        let log = HistoryLog::unbounded();
        let mut rx = log.subscribe();
        assert_eq!(*rx.borrow_and_update(), 0);

        log.append(record("Hello")).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        log.clear().await;
        assert_eq!(*rx.borrow_and_update(), 2);
    }
}
