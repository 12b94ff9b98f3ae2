//! Renderer plugins and the format registry
//!
//! Each output format is a capability unit implementing [`Renderer`]. The
//! [`RendererRegistry`] is a format-keyed table populated explicitly before
//! exports begin; looking up an unregistered format fails fast.
//!
//! Renderers are pure with respect to their inputs: they read the
//! presentation and issue data, produce bytes, and report progress. Partial
//! failures (a single asset that cannot be embedded) are logged as warnings
//! and never abort a render.

pub mod digest;
pub mod executive;
pub mod html;
pub mod markdown;
pub mod metrics;
pub mod pdf;

pub use digest::{AdvancedDigestRenderer, DigestRenderer};
pub use executive::ExecutiveRenderer;
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use metrics::MetricsRenderer;
pub use pdf::PdfRenderer;

use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::ExportResult;
use crate::domain::ids::IssueKey;
use crate::domain::issue::{Issue, SprintMetrics};
use crate::domain::options::{ExportFormat, ExportOptions};
use crate::domain::presentation::Presentation;
use crate::domain::{Result, SprintdeckError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Borrowed inputs for a single render
///
/// The renderer never mutates any of these; ownership stays with the caller.
#[derive(Clone, Copy)]
pub struct RenderRequest<'a> {
    /// The presentation to render
    pub presentation: &'a Presentation,

    /// Issues in the reported sprint
    pub issues: &'a [Issue],

    /// Issues planned for the next sprint
    pub upcoming_issues: &'a [Issue],

    /// User-edited sprint metrics, if provided
    pub metrics: Option<&'a SprintMetrics>,

    /// Export options for this call
    pub options: &'a ExportOptions,
}

impl<'a> RenderRequest<'a> {
    /// Look up a sprint issue by key
    pub fn issue(&self, key: &IssueKey) -> Option<&'a Issue> {
        self.issues.iter().find(|issue| &issue.key == key)
    }
}

/// A pluggable format renderer
///
/// Implementations must produce a result whose `format` matches their
/// registration key, report progress proportional to slide count for
/// multi-slide formats, and surface failures as error values rather than
/// silently dropping content.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// The format this renderer produces
    fn format(&self) -> ExportFormat;

    /// Render the presentation into this renderer's format
    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult>;
}

impl std::fmt::Debug for dyn Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("format", &self.format())
            .finish()
    }
}

/// Format-keyed renderer table
///
/// Registration is an explicit step the caller performs before issuing
/// exports. The table is lock-guarded so late registration cannot race
/// lookups from in-flight exports.
///
/// # Examples
///
/// ```
/// use sprintdeck::adapters::renderers::RendererRegistry;
/// use sprintdeck::domain::ExportFormat;
///
/// let registry = RendererRegistry::with_default_renderers();
/// assert!(registry.get(ExportFormat::Markdown).is_ok());
/// ```
pub struct RendererRegistry {
    renderers: RwLock<HashMap<ExportFormat, Arc<dyn Renderer>>>,
}

impl RendererRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            renderers: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with every built-in renderer registered
    pub fn with_default_renderers() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(PdfRenderer::new()));
        registry.register(Arc::new(HtmlRenderer::new()));
        registry.register(Arc::new(MarkdownRenderer::new()));
        registry.register(Arc::new(MetricsRenderer::new()));
        registry.register(Arc::new(ExecutiveRenderer::new()));
        registry.register(Arc::new(DigestRenderer::new()));
        registry.register(Arc::new(AdvancedDigestRenderer::new()));
        registry
    }

    /// Register a renderer under its declared format
    ///
    /// Replaces any previous registration for the same format.
    pub fn register(&self, renderer: Arc<dyn Renderer>) {
        let format = renderer.format();
        let mut renderers = self.renderers.write().expect("registry lock poisoned");
        if renderers.insert(format, renderer).is_some() {
            tracing::warn!(format = %format, "Replaced existing renderer registration");
        } else {
            tracing::debug!(format = %format, "Registered renderer");
        }
    }

    /// Look up the renderer for a format
    ///
    /// # Errors
    ///
    /// Returns a format error if no renderer is registered; the failure is
    /// deterministic and never retried.
    pub fn get(&self, format: ExportFormat) -> Result<Arc<dyn Renderer>> {
        let renderers = self.renderers.read().expect("registry lock poisoned");
        renderers.get(&format).cloned().ok_or_else(|| {
            SprintdeckError::Format(format!("no renderer registered for format '{format}'"))
        })
    }

    /// Formats with a registered renderer, in no particular order
    pub fn formats(&self) -> Vec<ExportFormat> {
        let renderers = self.renderers.read().expect("registry lock poisoned");
        renderers.keys().copied().collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presentation::{Slide, SlideContent, SlideKind};
    use crate::domain::ExportResult;

    struct StubRenderer(ExportFormat);

    #[async_trait]
    impl Renderer for StubRenderer {
        fn format(&self) -> ExportFormat {
            self.0
        }

        async fn render(
            &self,
            request: RenderRequest<'_>,
            _progress: &ProgressReporter,
        ) -> Result<ExportResult> {
            Ok(ExportResult::new(
                b"stub".to_vec(),
                "stub.md",
                self.0,
                request.options.quality,
                request.presentation.slide_count(),
            ))
        }
    }

    #[test]
    fn test_empty_registry_fails_fast() {
        let registry = RendererRegistry::new();
        let err = registry.get(ExportFormat::Pdf).unwrap_err();
        assert!(matches!(err, SprintdeckError::Format(_)));
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = RendererRegistry::new();
        registry.register(Arc::new(StubRenderer(ExportFormat::Markdown)));

        assert!(registry.get(ExportFormat::Markdown).is_ok());
        assert!(registry.get(ExportFormat::Html).is_err());
        assert_eq!(registry.formats(), vec![ExportFormat::Markdown]);
    }

    #[test]
    fn test_default_registry_covers_all_formats() {
        let registry = RendererRegistry::with_default_renderers();
        for format in ExportFormat::ALL {
            assert!(
                registry.get(*format).is_ok(),
                "missing renderer for {format}"
            );
        }
    }

    #[test]
    fn test_registered_format_matches_key() {
        let registry = RendererRegistry::with_default_renderers();
        for format in ExportFormat::ALL {
            let renderer = registry.get(*format).unwrap();
            assert_eq!(renderer.format(), *format);
        }
    }

    #[tokio::test]
    async fn test_request_issue_lookup() {
        use crate::domain::issue::IssueStatus;
        use std::str::FromStr;

        let presentation = Presentation::new(
            "T",
            "S",
            vec![Slide::new(
                "s",
                SlideKind::Title,
                0,
                SlideContent::Text("x".to_string()),
            )],
        );
        let key = IssueKey::from_str("PROJ-1").unwrap();
        let issues = vec![Issue::new(key.clone(), "One", IssueStatus::Done)];
        let options = ExportOptions::new(ExportFormat::Markdown);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &issues,
            upcoming_issues: &[],
            metrics: None,
            options: &options,
        };

        assert!(request.issue(&key).is_some());
        assert!(request
            .issue(&IssueKey::from_str("PROJ-2").unwrap())
            .is_none());
    }
}
