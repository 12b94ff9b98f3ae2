//! Analytics event recording
//!
//! The orchestrator emits fire-and-forget events at each stage transition.
//! Recording is never required for correctness: a recorder must not fail,
//! block, or influence the export outcome.

use crate::core::classify::ErrorCode;
use crate::domain::options::{ExportFormat, QualityTier};
use std::collections::HashMap;
use std::sync::Mutex;

/// A single pipeline event
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    /// An export call started processing
    ExportStarted {
        /// Requested format
        format: ExportFormat,
        /// Requested quality
        quality: QualityTier,
        /// Slide count of the input presentation
        slide_count: usize,
    },

    /// An export call produced an artifact
    ExportCompleted {
        /// Produced format
        format: ExportFormat,
        /// Wall-clock duration
        duration_ms: u64,
        /// Artifact size
        size_bytes: u64,
        /// Render attempts used
        attempts: usize,
    },

    /// An export call failed terminally
    ExportFailed {
        /// Requested format
        format: ExportFormat,
        /// Classified failure code
        code: ErrorCode,
        /// Render attempts used
        attempts: usize,
    },

    /// An export call was served from the cache
    CacheHit {
        /// Requested format
        format: ExportFormat,
    },
}

impl AnalyticsEvent {
    /// Stable event kind name, used for aggregation
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsEvent::ExportStarted { .. } => "export_started",
            AnalyticsEvent::ExportCompleted { .. } => "export_completed",
            AnalyticsEvent::ExportFailed { .. } => "export_failed",
            AnalyticsEvent::CacheHit { .. } => "cache_hit",
        }
    }
}

/// Fire-and-forget event sink
pub trait AnalyticsRecorder: Send + Sync {
    /// Record one event; must not block or fail
    fn record(&self, event: AnalyticsEvent);
}

/// Recorder that logs events through tracing
pub struct TracingRecorder;

impl AnalyticsRecorder for TracingRecorder {
    fn record(&self, event: AnalyticsEvent) {
        tracing::info!(kind = event.kind(), event = ?event, "Analytics event");
    }
}

/// In-memory recorder with aggregate queries
///
/// Used in tests and by the status command to inspect recent pipeline
/// activity.
#[derive(Default)]
pub struct InMemoryRecorder {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl InMemoryRecorder {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in arrival order
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("analytics lock poisoned").clone()
    }

    /// Event counts by kind
    pub fn counts_by_kind(&self) -> HashMap<&'static str, usize> {
        let events = self.events.lock().expect("analytics lock poisoned");
        let mut counts = HashMap::new();
        for event in events.iter() {
            *counts.entry(event.kind()).or_insert(0) += 1;
        }
        counts
    }
}

impl AnalyticsRecorder for InMemoryRecorder {
    fn record(&self, event: AnalyticsEvent) {
        self.events.lock().expect("analytics lock poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_recorder_aggregates() {
        let recorder = InMemoryRecorder::new();
        recorder.record(AnalyticsEvent::ExportStarted {
            format: ExportFormat::Pdf,
            quality: QualityTier::Medium,
            slide_count: 3,
        });
        recorder.record(AnalyticsEvent::CacheHit {
            format: ExportFormat::Pdf,
        });
        recorder.record(AnalyticsEvent::CacheHit {
            format: ExportFormat::Markdown,
        });

        let counts = recorder.counts_by_kind();
        assert_eq!(counts.get("export_started"), Some(&1));
        assert_eq!(counts.get("cache_hit"), Some(&2));
        assert_eq!(recorder.events().len(), 3);
    }

    #[test]
    fn test_event_kinds() {
        let event = AnalyticsEvent::ExportFailed {
            format: ExportFormat::Html,
            code: ErrorCode::RendererError,
            attempts: 3,
        };
        assert_eq!(event.kind(), "export_failed");
    }
}
