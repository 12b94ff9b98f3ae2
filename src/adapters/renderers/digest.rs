//! Digest renderers
//!
//! Single-page PDF briefs for readers who won't open the full deck. The
//! advanced digest adds a second page previewing the upcoming sprint.

use crate::adapters::renderers::pdf::{wrap_text, PdfBuilder};
use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::issue::Issue;
use crate::domain::options::ExportFormat;
use crate::domain::Result;
use async_trait::async_trait;

const DIGEST_LINE_WIDTH: usize = 85;
/// Issues listed per section before the digest cuts off
const MAX_LISTED_ISSUES: usize = 8;

/// Single-page PDF digest of the sprint
pub struct DigestRenderer;

impl DigestRenderer {
    /// Creates a digest renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for DigestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for DigestRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Digest
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let mut builder = PdfBuilder::new();
        builder.add_page(
            format!("{} - Digest", request.presentation.sprint_name),
            digest_lines(&request),
        );
        progress.report_slide(0, 1, "Rendered digest page");

        Ok(ExportResult::new(
            builder.build(),
            artifact_file_name(&request.presentation.sprint_name, ExportFormat::Digest),
            ExportFormat::Digest,
            request.options.quality,
            request.presentation.slide_count(),
        ))
    }
}

/// Digest plus an upcoming-sprint preview page
pub struct AdvancedDigestRenderer;

impl AdvancedDigestRenderer {
    /// Creates an advanced digest renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for AdvancedDigestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for AdvancedDigestRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::AdvancedDigest
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let mut builder = PdfBuilder::new();
        builder.add_page(
            format!("{} - Digest", request.presentation.sprint_name),
            digest_lines(&request),
        );
        progress.report_slide(0, 2, "Rendered digest page");

        builder.add_page("Up Next", upcoming_lines(&request));
        progress.report_slide(1, 2, "Rendered upcoming-sprint page");

        Ok(ExportResult::new(
            builder.build(),
            artifact_file_name(
                &request.presentation.sprint_name,
                ExportFormat::AdvancedDigest,
            ),
            ExportFormat::AdvancedDigest,
            request.options.quality,
            request.presentation.slide_count(),
        ))
    }
}

/// Body of the digest page: outcomes, metrics, and delivered issues
fn digest_lines(request: &RenderRequest<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(request.presentation.title.clone());
    lines.push(String::new());

    if let Some(metrics) = request.metrics {
        lines.push(format!(
            "Points: {:.0} committed / {:.0} completed ({:.0}%)",
            metrics.committed_points,
            metrics.completed_points,
            metrics.completion_rate()
        ));
        lines.push(format!(
            "Defects: {}   Carryover: {}",
            metrics.defect_count, metrics.carryover_count
        ));
        if let Some(notes) = &metrics.notes {
            lines.push(String::new());
            lines.extend(wrap_text(notes, DIGEST_LINE_WIDTH));
        }
        lines.push(String::new());
    }

    let done: Vec<&Issue> = request
        .issues
        .iter()
        .filter(|issue| issue.status.is_done())
        .collect();
    lines.push(format!("Delivered ({}):", done.len()));
    lines.extend(issue_lines(&done));

    lines
}

/// Body of the upcoming-sprint preview page
fn upcoming_lines(request: &RenderRequest<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if request.upcoming_issues.is_empty() {
        lines.push("No issues scheduled yet.".to_string());
        return lines;
    }

    let upcoming: Vec<&Issue> = request.upcoming_issues.iter().collect();
    let points: f64 = upcoming
        .iter()
        .filter_map(|issue| issue.story_points)
        .sum();
    lines.push(format!(
        "{} issue(s), {points:.0} story points planned",
        upcoming.len()
    ));
    lines.push(String::new());
    lines.extend(issue_lines(&upcoming));
    lines
}

fn issue_lines(issues: &[&Issue]) -> Vec<String> {
    let mut lines: Vec<String> = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            let points = issue
                .story_points
                .map(|p| format!(" ({p:.0} pts)"))
                .unwrap_or_default();
            format!("  {} {}{}", issue.key, issue.summary, points)
        })
        .collect();
    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!("  ... and {} more", issues.len() - MAX_LISTED_ISSUES));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::IssueKey;
    use crate::domain::issue::{IssueStatus, SprintMetrics};
    use crate::domain::options::ExportOptions;
    use crate::domain::presentation::{Presentation, Slide, SlideContent, SlideKind};
    use std::str::FromStr;

    fn fixture() -> (Presentation, Vec<Issue>, Vec<Issue>, SprintMetrics) {
        let presentation = Presentation::new(
            "Sprint 31 Review",
            "Sprint 31",
            vec![Slide::new(
                "Sprint 31",
                SlideKind::Title,
                0,
                SlideContent::Text("hello".to_string()),
            )],
        );
        let issues = vec![
            Issue::new(
                IssueKey::from_str("PROJ-1").unwrap(),
                "Ship CSV export",
                IssueStatus::Done,
            )
            .with_story_points(5.0),
            Issue::new(
                IssueKey::from_str("PROJ-2").unwrap(),
                "Fix login",
                IssueStatus::InProgress,
            ),
        ];
        let upcoming = vec![Issue::new(
            IssueKey::from_str("PROJ-3").unwrap(),
            "Dark mode",
            IssueStatus::Todo,
        )
        .with_story_points(8.0)];
        let metrics = SprintMetrics {
            committed_points: 40.0,
            completed_points: 30.0,
            defect_count: 2,
            carryover_count: 1,
            ..Default::default()
        };
        (presentation, issues, upcoming, metrics)
    }

    #[tokio::test]
    async fn test_digest_is_single_page_pdf() {
        let (presentation, issues, upcoming, metrics) = fixture();
        let options = ExportOptions::new(ExportFormat::Digest);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &issues,
            upcoming_issues: &upcoming,
            metrics: Some(&metrics),
            options: &options,
        };

        let result = DigestRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();

        assert!(result.content.starts_with(b"%PDF-"));
        assert_eq!(result.format, ExportFormat::Digest);
        let text = String::from_utf8_lossy(&result.content);
        assert!(text.contains("/Count 1"));
        assert!(text.contains("Delivered \\(1\\):"));
        assert!(text.contains("40 committed / 30 completed"));
    }

    #[tokio::test]
    async fn test_advanced_digest_has_upcoming_page() {
        let (presentation, issues, upcoming, metrics) = fixture();
        let options = ExportOptions::new(ExportFormat::AdvancedDigest);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &issues,
            upcoming_issues: &upcoming,
            metrics: Some(&metrics),
            options: &options,
        };

        let result = AdvancedDigestRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();

        let text = String::from_utf8_lossy(&result.content);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("Up Next"));
        assert!(text.contains("8 story points planned"));
        assert!(text.contains("PROJ-3"));
    }

    #[tokio::test]
    async fn test_digest_without_metrics() {
        let (presentation, issues, _, _) = fixture();
        let options = ExportOptions::new(ExportFormat::Digest);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &issues,
            upcoming_issues: &[],
            metrics: None,
            options: &options,
        };

        let result = DigestRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&result.content);
        assert!(!text.contains("committed"));
        assert!(text.contains("Delivered"));
    }

    #[test]
    fn test_issue_list_truncation() {
        let issues: Vec<Issue> = (1..=12)
            .map(|i| {
                Issue::new(
                    IssueKey::from_str(&format!("PROJ-{i}")).unwrap(),
                    format!("Issue {i}"),
                    IssueStatus::Done,
                )
            })
            .collect();
        let refs: Vec<&Issue> = issues.iter().collect();
        let lines = issue_lines(&refs);
        assert_eq!(lines.len(), MAX_LISTED_ISSUES + 1);
        assert!(lines.last().unwrap().contains("and 4 more"));
    }
}
