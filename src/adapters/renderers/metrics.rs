//! Metrics renderer
//!
//! Produces a machine-readable JSON artifact: the user-edited sprint metrics
//! plus rollups computed from the issue list. Downstream dashboards consume
//! this directly.

use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::issue::Issue;
use crate::domain::options::ExportFormat;
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::json;

/// Renders sprint metrics as a JSON document
pub struct MetricsRenderer;

impl MetricsRenderer {
    /// Creates a metrics renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetricsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for MetricsRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Metrics
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let presentation = request.presentation;

        let document = json!({
            "sprint": presentation.sprint_name,
            "title": presentation.title,
            "generated_at": presentation.created_at.to_rfc3339(),
            "slide_count": presentation.slide_count(),
            "metrics": request.metrics,
            "issues": issue_rollup(request.issues),
            "upcoming": issue_rollup(request.upcoming_issues),
        });

        progress.report_slide(0, 1, "Serialized metrics document");

        let payload = serde_json::to_vec_pretty(&document)?;
        Ok(ExportResult::new(
            payload,
            artifact_file_name(&presentation.sprint_name, ExportFormat::Metrics),
            ExportFormat::Metrics,
            request.options.quality,
            presentation.slide_count(),
        ))
    }
}

/// Aggregate counts derived from an issue list
fn issue_rollup(issues: &[Issue]) -> serde_json::Value {
    let total = issues.len();
    let done = issues.iter().filter(|issue| issue.status.is_done()).count();
    let total_points: f64 = issues.iter().filter_map(|issue| issue.story_points).sum();
    let done_points: f64 = issues
        .iter()
        .filter(|issue| issue.status.is_done())
        .filter_map(|issue| issue.story_points)
        .sum();

    json!({
        "total": total,
        "done": done,
        "total_points": total_points,
        "done_points": done_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::IssueKey;
    use crate::domain::issue::{IssueStatus, SprintMetrics};
    use crate::domain::options::ExportOptions;
    use crate::domain::presentation::{Presentation, Slide, SlideContent, SlideKind};
    use std::str::FromStr;

    #[tokio::test]
    async fn test_metrics_json_artifact() {
        let presentation = Presentation::new(
            "Sprint 31 Review",
            "Sprint 31",
            vec![Slide::new(
                "Numbers",
                SlideKind::Metrics,
                0,
                SlideContent::Text("n/a".to_string()),
            )],
        );
        let issues = vec![
            Issue::new(
                IssueKey::from_str("PROJ-1").unwrap(),
                "One",
                IssueStatus::Done,
            )
            .with_story_points(5.0),
            Issue::new(
                IssueKey::from_str("PROJ-2").unwrap(),
                "Two",
                IssueStatus::InProgress,
            )
            .with_story_points(3.0),
        ];
        let metrics = SprintMetrics {
            committed_points: 8.0,
            completed_points: 5.0,
            ..Default::default()
        };
        let options = ExportOptions::new(ExportFormat::Metrics);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &issues,
            upcoming_issues: &[],
            metrics: Some(&metrics),
            options: &options,
        };

        let result = MetricsRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();

        assert_eq!(result.format, ExportFormat::Metrics);
        assert!(result.file_name.ends_with(".json"));

        let parsed: serde_json::Value =
            serde_json::from_slice(&result.content).expect("valid JSON");
        assert_eq!(parsed["sprint"], "Sprint 31");
        assert_eq!(parsed["issues"]["total"], 2);
        assert_eq!(parsed["issues"]["done"], 1);
        assert_eq!(parsed["issues"]["total_points"], 8.0);
        assert_eq!(parsed["issues"]["done_points"], 5.0);
        assert_eq!(parsed["metrics"]["committed_points"], 8.0);
    }

    #[tokio::test]
    async fn test_metrics_without_user_metrics() {
        let presentation = Presentation::new("T", "S", vec![]);
        let options = ExportOptions::new(ExportFormat::Metrics);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &[],
            upcoming_issues: &[],
            metrics: None,
            options: &options,
        };

        let result = MetricsRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&result.content).unwrap();
        assert!(parsed["metrics"].is_null());
        assert_eq!(parsed["issues"]["total"], 0);
    }
}
