//! Export orchestrator
//!
//! The top-level entry point of the export pipeline. One `export()` call
//! validates input, consults the result cache, selects a renderer, drives the
//! retry loop with classified failures, stores the artifact, and runs the
//! quality gate. Dependencies are constructed by the caller and passed in, so
//! several isolated pipelines can coexist in one process.

use crate::adapters::analytics::{AnalyticsEvent, AnalyticsRecorder, TracingRecorder};
use crate::adapters::renderers::{RenderRequest, RendererRegistry};
use crate::core::cache::ResultCache;
use crate::core::classify::{ClassifiedError, ErrorClassifier, ErrorContext};
use crate::core::export::progress::{ProgressCallback, ProgressReporter, ProgressStage};
use crate::core::export::retry::RetryPolicy;
use crate::core::fingerprint::fingerprint;
use crate::core::quality::QualityGate;
use crate::domain::artifact::ExportResult;
use crate::domain::errors::RenderError;
use crate::domain::issue::{Issue, SprintMetrics};
use crate::domain::options::ExportOptions;
use crate::domain::presentation::Presentation;
use crate::domain::{Result, SprintdeckError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Orchestrator-level configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Retry policy for recoverable render failures
    pub retry: RetryPolicy,

    /// Wall-clock budget per render attempt
    pub attempt_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

/// Format-agnostic export pipeline
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use sprintdeck::adapters::renderers::RendererRegistry;
/// use sprintdeck::core::cache::{CacheConfig, ResultCache};
/// use sprintdeck::core::classify::ErrorClassifier;
/// use sprintdeck::core::export::{ExportOrchestrator, OrchestratorConfig};
/// use sprintdeck::core::quality::QualityGate;
/// use sprintdeck::domain::{ExportFormat, ExportOptions, Presentation};
///
/// # async fn example() -> sprintdeck::domain::Result<()> {
/// let orchestrator = ExportOrchestrator::new(
///     Arc::new(RendererRegistry::with_default_renderers()),
///     Arc::new(ResultCache::new(CacheConfig::default())),
///     Arc::new(ErrorClassifier::new()),
///     Arc::new(QualityGate::default()),
///     OrchestratorConfig::default(),
/// );
///
/// let presentation = Presentation::new("Review", "Sprint 1", vec![]);
/// let options = ExportOptions::new(ExportFormat::Markdown);
/// let result = orchestrator
///     .export(&presentation, &[], &[], None, &options, None)
///     .await?;
/// println!("exported {} bytes", result.size_bytes);
/// # Ok(())
/// # }
/// ```
pub struct ExportOrchestrator {
    registry: Arc<RendererRegistry>,
    cache: Arc<ResultCache>,
    classifier: Arc<ErrorClassifier>,
    gate: Arc<QualityGate>,
    analytics: Arc<dyn AnalyticsRecorder>,
    config: OrchestratorConfig,
    cancel: Option<watch::Receiver<bool>>,
}

impl ExportOrchestrator {
    /// Creates an orchestrator from explicit dependencies
    pub fn new(
        registry: Arc<RendererRegistry>,
        cache: Arc<ResultCache>,
        classifier: Arc<ErrorClassifier>,
        gate: Arc<QualityGate>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            cache,
            classifier,
            gate,
            analytics: Arc::new(TracingRecorder),
            config,
            cancel: None,
        }
    }

    /// Replaces the analytics recorder
    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsRecorder>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Wires a best-effort cancellation signal
    ///
    /// Cancellation aborts the retry loop between attempts; an in-progress
    /// render is not force-killed.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Export a presentation into the requested format
    ///
    /// Inputs are borrowed and never mutated; whatever the cache stores is
    /// snapshotted at the boundary. On a cache hit the stored artifact is
    /// returned without invoking a renderer or re-running the quality gate.
    ///
    /// # Errors
    ///
    /// Fails with a human-readable message when validation rejects the
    /// input, the format has no registered renderer, or all retries are
    /// exhausted.
    pub async fn export(
        &self,
        presentation: &Presentation,
        issues: &[Issue],
        upcoming_issues: &[Issue],
        metrics: Option<&SprintMetrics>,
        options: &ExportOptions,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ExportResult> {
        let start = Instant::now();
        let reporter = ProgressReporter::new(on_progress);
        let context = ErrorContext {
            format: options.format,
            quality: options.quality,
            slide_count: presentation.slide_count(),
        };

        tracing::info!(
            format = %options.format,
            quality = %options.quality,
            slide_count = presentation.slide_count(),
            "Starting export"
        );
        self.analytics.record(AnalyticsEvent::ExportStarted {
            format: options.format,
            quality: options.quality,
            slide_count: presentation.slide_count(),
        });

        // Input validation: always immediate, never retried
        reporter.report(ProgressStage::Preparing, 0, 1, 5, "Validating input");
        if let Err(error) = self.validate_input(presentation, options) {
            let classified = self.classifier.classify(&error, 1, context.clone());
            self.record_failure(&classified, 1, options);
            return Err(SprintdeckError::Validation(self.failure_message(&classified)));
        }

        // Fingerprint and cache lookup
        reporter.report(ProgressStage::Preparing, 1, 1, 10, "Checking cache");
        let key = fingerprint(presentation, options)?;
        if let Some(cached) = self.cache.get(&key).await {
            tracing::info!(format = %options.format, "Export served from cache");
            self.analytics.record(AnalyticsEvent::CacheHit {
                format: options.format,
            });
            reporter.report(ProgressStage::Finalizing, 1, 1, 100, "Served from cache");
            return Ok(cached);
        }

        // Renderer selection: an unregistered format is terminal
        let renderer = match self.registry.get(options.format) {
            Ok(renderer) => renderer,
            Err(error) => {
                let classified = self.classifier.classify(&error, 1, context.clone());
                self.record_failure(&classified, 1, options);
                return Err(SprintdeckError::Format(self.failure_message(&classified)));
            }
        };

        let request = RenderRequest {
            presentation,
            issues,
            upcoming_issues,
            metrics,
            options,
        };

        // Retry loop
        let max_attempts = self.config.retry.max_retries;
        let mut attempt = 1usize;
        let rendered = loop {
            if self.is_cancelled() {
                tracing::info!(attempt = attempt, "Export cancelled before attempt");
                return Err(SprintdeckError::Export("Export cancelled".to_string()));
            }

            reporter.report(
                ProgressStage::Rendering,
                attempt,
                max_attempts,
                20,
                format!("Render attempt {attempt} of {max_attempts}"),
            );

            let outcome =
                tokio::time::timeout(self.config.attempt_timeout, renderer.render(request, &reporter))
                    .await;

            let error = match outcome {
                Ok(Ok(result)) => break result,
                Ok(Err(error)) => error,
                Err(_) => SprintdeckError::Render(RenderError::Timeout(format!(
                    "attempt {attempt} exceeded the {} ms budget",
                    self.config.attempt_timeout.as_millis()
                ))),
            };

            let classified = self.classifier.classify(&error, attempt, context.clone());
            tracing::warn!(
                code = %classified.code,
                recoverable = classified.recoverable,
                attempt = attempt,
                error = %error,
                "Render attempt failed"
            );

            if classified.recoverable && self.config.retry.allows_retry(attempt) {
                let delay = self.config.retry.delay_for_attempt(attempt);
                tracing::info!(
                    delay_ms = delay.as_millis() as u64,
                    next_attempt = attempt + 1,
                    "Backing off before retry"
                );
                if self.backoff(delay).await {
                    return Err(SprintdeckError::Export("Export cancelled".to_string()));
                }
                attempt += 1;
                continue;
            }

            self.record_failure(&classified, attempt, options);
            return Err(SprintdeckError::Export(self.failure_message(&classified)));
        };

        // Post-processing: stamp metadata, cache, quality-gate
        reporter.report(ProgressStage::Processing, 1, 1, 85, "Post-processing artifact");
        let mut result = rendered;
        result.metadata.processing_time_ms = start.elapsed().as_millis() as u64;
        result.metadata.slide_count = presentation.slide_count();
        result.metadata.quality = options.quality;

        if let Err(error) = self
            .cache
            .set(&key, result.clone(), presentation, options)
            .await
        {
            tracing::warn!(error = %error, "Failed to cache export result");
        }

        let report = self.gate.validate(&result, presentation, options);
        if !report.passed {
            tracing::warn!(
                status = report.status.as_str(),
                score = format!("{:.1}", report.score),
                failing = report.failing_rules().len(),
                "Quality gate did not pass; returning artifact anyway"
            );
        }

        reporter.report(ProgressStage::Finalizing, 1, 1, 100, "Export complete");
        self.analytics.record(AnalyticsEvent::ExportCompleted {
            format: options.format,
            duration_ms: result.metadata.processing_time_ms,
            size_bytes: result.size_bytes,
            attempts: attempt,
        });
        tracing::info!(
            format = %options.format,
            size_bytes = result.size_bytes,
            duration_ms = result.metadata.processing_time_ms,
            attempts = attempt,
            "Export completed"
        );

        Ok(result)
    }

    fn validate_input(&self, presentation: &Presentation, options: &ExportOptions) -> Result<()> {
        if presentation.is_empty() {
            return Err(SprintdeckError::Validation(
                "empty presentation: no slides to export".to_string(),
            ));
        }
        options.validate()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Sleep for the backoff delay; returns true if cancelled meanwhile
    async fn backoff(&self, delay: Duration) -> bool {
        match self.cancel.clone() {
            Some(mut rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => *rx.borrow(),
                    _ = rx.changed() => *rx.borrow(),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                false
            }
        }
    }

    fn record_failure(&self, classified: &ClassifiedError, attempts: usize, options: &ExportOptions) {
        self.analytics.record(AnalyticsEvent::ExportFailed {
            format: options.format,
            code: classified.code,
            attempts,
        });
    }

    /// One user-facing message plus suggested recovery actions
    fn failure_message(&self, classified: &ClassifiedError) -> String {
        let mut message = classified.user_message().to_string();
        let actions = self.classifier.suggest_recovery_actions(classified);
        if !actions.is_empty() {
            message.push_str("\nSuggested actions:");
            for action in actions {
                message.push_str(&format!("\n  - {action}"));
            }
        }
        message
    }
}
