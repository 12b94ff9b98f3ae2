//! Export orchestration
//!
//! This module provides the core export pipeline:
//! - Orchestration of validate, cache, render, retry, and quality-gate steps
//! - Retry policy with exponential backoff
//! - Monotonic progress reporting

pub mod orchestrator;
pub mod progress;
pub mod retry;

pub use orchestrator::{ExportOrchestrator, OrchestratorConfig};
pub use progress::{ProgressCallback, ProgressEvent, ProgressReporter, ProgressStage};
pub use retry::RetryPolicy;
