//! Executive summary renderer
//!
//! A short plain-text brief: outcome line, highlights, risks. Written for
//! stakeholders who read neither slide decks nor dashboards.

use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::options::ExportFormat;
use crate::domain::Result;
use async_trait::async_trait;

/// Highlights listed before the summary cuts off
const MAX_HIGHLIGHTS: usize = 5;

/// Renders a plain-text executive summary
pub struct ExecutiveRenderer;

impl ExecutiveRenderer {
    /// Creates an executive summary renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExecutiveRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for ExecutiveRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Executive
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let presentation = request.presentation;
        let mut out = String::new();

        out.push_str(&format!("EXECUTIVE SUMMARY: {}\n", presentation.sprint_name));
        out.push_str(&"=".repeat(60));
        out.push('\n');

        if let Some(metrics) = request.metrics {
            out.push_str(&format!(
                "\nThe team completed {:.0} of {:.0} committed story points ({:.0}%).\n",
                metrics.completed_points,
                metrics.committed_points,
                metrics.completion_rate()
            ));
            if metrics.defect_count > 0 || metrics.carryover_count > 0 {
                out.push_str(&format!(
                    "{} defect(s) were found; {} issue(s) carry over to the next sprint.\n",
                    metrics.defect_count, metrics.carryover_count
                ));
            }
        }

        let done: Vec<_> = request
            .issues
            .iter()
            .filter(|issue| issue.status.is_done())
            .collect();
        if !done.is_empty() {
            out.push_str("\nHighlights:\n");
            for issue in done.iter().take(MAX_HIGHLIGHTS) {
                out.push_str(&format!("  * {} ({})\n", issue.summary, issue.key));
            }
            if done.len() > MAX_HIGHLIGHTS {
                out.push_str(&format!(
                    "  * ... and {} more delivered\n",
                    done.len() - MAX_HIGHLIGHTS
                ));
            }
        }

        let open = request.issues.len() - done.len();
        if open > 0 {
            out.push_str(&format!("\nRisks: {open} issue(s) remain unfinished.\n"));
        }

        if !request.upcoming_issues.is_empty() {
            out.push_str(&format!(
                "\nNext sprint: {} issue(s) planned.\n",
                request.upcoming_issues.len()
            ));
        }

        progress.report_slide(0, 1, "Composed executive summary");

        Ok(ExportResult::new(
            out.into_bytes(),
            artifact_file_name(&presentation.sprint_name, ExportFormat::Executive),
            ExportFormat::Executive,
            request.options.quality,
            presentation.slide_count(),
        ))
    }
}
