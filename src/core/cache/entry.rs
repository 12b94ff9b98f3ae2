//! Cache entry bookkeeping
//!
//! An entry wraps a stored result with its originating fingerprint, input
//! snapshots, and access bookkeeping. Entries are immutable apart from the
//! access counters, which the store updates under its own lock.

use crate::domain::artifact::ExportResult;
use crate::domain::options::ExportOptions;
use crate::domain::presentation::Presentation;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Snapshot of the presentation an entry was produced from
///
/// The full presentation belongs to the caller; the cache keeps only what
/// diagnostics need.
#[derive(Debug, Clone)]
pub struct PresentationSnapshot {
    /// Presentation identity
    pub id: Uuid,
    /// Presentation title
    pub title: String,
    /// Sprint name
    pub sprint_name: String,
    /// Slide count at export time
    pub slide_count: usize,
}

impl PresentationSnapshot {
    /// Capture a snapshot at the cache boundary
    pub fn capture(presentation: &Presentation) -> Self {
        Self {
            id: presentation.id,
            title: presentation.title.clone(),
            sprint_name: presentation.sprint_name.clone(),
            slide_count: presentation.slide_count(),
        }
    }
}

/// A stored export result with bookkeeping
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored artifact
    pub result: ExportResult,

    /// Fingerprint the entry is keyed by
    pub fingerprint: String,

    /// Presentation snapshot at store time
    pub presentation: PresentationSnapshot,

    /// Options snapshot at store time
    pub options: ExportOptions,

    /// When the entry was stored
    pub created_at: Instant,

    /// Payload size in bytes
    pub size_bytes: u64,

    /// Number of cache hits served from this entry
    pub access_count: u64,

    /// Last time the entry was read
    pub last_accessed: Instant,

    /// Insertion order, for FIFO eviction
    pub insert_seq: u64,
}

impl CacheEntry {
    /// Creates a new entry
    pub fn new(
        result: ExportResult,
        fingerprint: String,
        presentation: PresentationSnapshot,
        options: ExportOptions,
        insert_seq: u64,
    ) -> Self {
        let now = Instant::now();
        let size_bytes = result.size_bytes;
        Self {
            result,
            fingerprint,
            presentation,
            options,
            created_at: now,
            size_bytes,
            access_count: 0,
            last_accessed: now,
            insert_seq,
        }
    }

    /// Whether the entry is older than the given TTL
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }

    /// Record a cache hit against this entry
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_accessed = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::{ExportFormat, QualityTier};

    fn entry() -> CacheEntry {
        let presentation = Presentation::new("T", "S", vec![]);
        let result = ExportResult::new(
            b"payload".to_vec(),
            "s-report.md",
            ExportFormat::Markdown,
            QualityTier::Medium,
            0,
        );
        CacheEntry::new(
            result,
            "abc".to_string(),
            PresentationSnapshot::capture(&presentation),
            ExportOptions::new(ExportFormat::Markdown),
            1,
        )
    }

    #[test]
    fn test_entry_size_from_result() {
        let e = entry();
        assert_eq!(e.size_bytes, 7);
        assert_eq!(e.access_count, 0);
    }

    #[test]
    fn test_touch_updates_bookkeeping() {
        let mut e = entry();
        let before = e.last_accessed;
        e.touch();
        e.touch();
        assert_eq!(e.access_count, 2);
        assert!(e.last_accessed >= before);
    }

    #[test]
    fn test_expiry() {
        let e = entry();
        assert!(!e.is_expired(Duration::from_secs(60)));
        assert!(e.is_expired(Duration::from_nanos(0)));
    }

    #[test]
    fn test_snapshot_capture() {
        let presentation = Presentation::new("Review", "Sprint 9", vec![]);
        let snapshot = PresentationSnapshot::capture(&presentation);
        assert_eq!(snapshot.id, presentation.id);
        assert_eq!(snapshot.title, "Review");
        assert_eq!(snapshot.slide_count, 0);
    }
}
