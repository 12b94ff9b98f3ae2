//! Progress reporting for exports
//!
//! Progress events carry a stage tag and a percentage. The reporter wrapper
//! enforces monotonicity: a renderer that reports out of order cannot move the
//! percentage backwards. Callbacks run synchronously and must not block.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Pipeline stage a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStage {
    /// Validation, fingerprinting, cache lookup
    Preparing,
    /// Renderer running
    Rendering,
    /// Metadata stamping and cache store
    Processing,
    /// Quality gate and handoff
    Finalizing,
}

impl ProgressStage {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStage::Preparing => "preparing",
            ProgressStage::Rendering => "rendering",
            ProgressStage::Processing => "processing",
            ProgressStage::Finalizing => "finalizing",
        }
    }
}

/// A single progress event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Units completed within the stage
    pub current: usize,

    /// Total units within the stage
    pub total: usize,

    /// Stage tag
    pub stage: ProgressStage,

    /// Human-readable status line
    pub message: String,

    /// Overall percentage, non-decreasing in [0, 100]
    pub percentage: u8,
}

/// Synchronous progress callback
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Monotonic progress reporter handed to renderers
///
/// Wraps the caller's callback (if any) and clamps percentages so the
/// reported value never decreases, whatever order the renderer emits in.
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    highest: AtomicU8,
}

impl ProgressReporter {
    /// Creates a reporter around an optional callback
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Self {
            callback,
            highest: AtomicU8::new(0),
        }
    }

    /// Reporter that drops all events
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Emit a progress event
    ///
    /// The percentage is clamped to [highest-so-far, 100] before delivery.
    pub fn report(
        &self,
        stage: ProgressStage,
        current: usize,
        total: usize,
        percentage: u8,
        message: impl Into<String>,
    ) {
        let capped = percentage.min(100);
        let previous = self.highest.fetch_max(capped, Ordering::SeqCst);
        let effective = capped.max(previous);

        if let Some(callback) = &self.callback {
            callback(&ProgressEvent {
                current,
                total,
                stage,
                message: message.into(),
                percentage: effective,
            });
        }
    }

    /// Report progress within the rendering stage, scaled by slide position
    ///
    /// Rendering owns the 20..=80 band of the overall percentage.
    pub fn report_slide(&self, slide_index: usize, slide_count: usize, message: impl Into<String>) {
        let total = slide_count.max(1);
        let done = (slide_index + 1).min(total);
        let percentage = 20 + ((done * 60) / total) as u8;
        self.report(ProgressStage::Rendering, done, total, percentage, message);
    }

    /// Highest percentage reported so far
    pub fn highest(&self) -> u8 {
        self.highest.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collecting_reporter() -> (ProgressReporter, Arc<Mutex<Vec<ProgressEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback: ProgressCallback = Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        });
        (ProgressReporter::new(Some(callback)), events)
    }

    #[test]
    fn test_percentage_never_decreases() {
        let (reporter, events) = collecting_reporter();

        reporter.report(ProgressStage::Preparing, 0, 1, 10, "start");
        reporter.report(ProgressStage::Rendering, 1, 2, 50, "half");
        reporter.report(ProgressStage::Rendering, 1, 2, 30, "out of order");
        reporter.report(ProgressStage::Finalizing, 1, 1, 100, "done");

        let seen: Vec<u8> = events.lock().unwrap().iter().map(|e| e.percentage).collect();
        assert_eq!(seen, vec![10, 50, 50, 100]);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let (reporter, events) = collecting_reporter();
        reporter.report(ProgressStage::Finalizing, 1, 1, 250, "overflow");
        assert_eq!(events.lock().unwrap()[0].percentage, 100);
    }

    #[test]
    fn test_report_slide_scaling() {
        let (reporter, events) = collecting_reporter();

        reporter.report_slide(0, 3, "slide 1");
        reporter.report_slide(1, 3, "slide 2");
        reporter.report_slide(2, 3, "slide 3");

        let seen: Vec<u8> = events.lock().unwrap().iter().map(|e| e.percentage).collect();
        assert_eq!(seen, vec![40, 60, 80]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_disabled_reporter_tracks_highest() {
        let reporter = ProgressReporter::disabled();
        reporter.report(ProgressStage::Rendering, 1, 1, 42, "quiet");
        assert_eq!(reporter.highest(), 42);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ProgressStage::Preparing.as_str(), "preparing");
        assert_eq!(ProgressStage::Finalizing.as_str(), "finalizing");
    }
}
