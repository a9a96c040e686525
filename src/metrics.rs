use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing upload activity.
#[derive(Default)]
pub struct UploadMetrics {
    uploads_received: AtomicU64,
    summaries_generated: AtomicU64,
    last_summary_words: AtomicU64,
}

impl UploadMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted upload before processing starts.
    pub fn record_upload(&self) {
        self.uploads_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed summary and its word count.
    pub fn record_summary(&self, words: u64) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
        self.last_summary_words.store(words, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let summaries = self.summaries_generated.load(Ordering::Relaxed);
        MetricsSnapshot {
            uploads_received: self.uploads_received.load(Ordering::Relaxed),
            summaries_generated: summaries,
            last_summary_words: if summaries == 0 {
                None
            } else {
                Some(self.last_summary_words.load(Ordering::Relaxed))
            },
        }
    }
}

/// Immutable view of upload counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of uploads accepted since startup.
    pub uploads_received: u64,
    /// Number of summaries successfully generated since startup.
    pub summaries_generated: u64,
    /// Word count of the most recent summary, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_summary_words: Option<u64>,
}
