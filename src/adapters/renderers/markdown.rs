//! Markdown renderer
//!
//! Builds the slide deck as a single Markdown document. The HTML renderer
//! reuses [`deck_to_markdown`] as its source body, so the two formats always
//! agree on content.

use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::issue::Issue;
use crate::domain::options::{ExportFormat, QualityTier};
use crate::domain::presentation::{Slide, SlideContent, SlideKind};
use crate::domain::Result;
use async_trait::async_trait;

/// Renders the deck as a Markdown document
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Creates a markdown renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for MarkdownRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let body = deck_to_markdown(&request, Some(progress));

        Ok(ExportResult::new(
            body.into_bytes(),
            artifact_file_name(&request.presentation.sprint_name, ExportFormat::Markdown),
            ExportFormat::Markdown,
            request.options.quality,
            request.presentation.slide_count(),
        ))
    }
}

/// Build the full deck as Markdown
///
/// Shared between the markdown and HTML renderers. Reports per-slide progress
/// when a reporter is supplied.
pub(crate) fn deck_to_markdown(
    request: &RenderRequest<'_>,
    progress: Option<&ProgressReporter>,
) -> String {
    let presentation = request.presentation;
    let slide_count = presentation.slide_count();
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", presentation.title));
    out.push_str(&format!("_Sprint: {}_\n\n", presentation.sprint_name));

    for slide in presentation.slides() {
        render_slide(&mut out, slide, request);
        if let Some(reporter) = progress {
            reporter.report_slide(slide.index, slide_count, format!("Rendered '{}'", slide.title));
        }
    }

    if request.options.quality == QualityTier::High {
        out.push_str("---\n\n");
        out.push_str(&format!(
            "_Generated {} · {} slides_\n",
            presentation.created_at.format("%Y-%m-%d %H:%M UTC"),
            slide_count
        ));
    }

    out
}

fn render_slide(out: &mut String, slide: &Slide, request: &RenderRequest<'_>) {
    out.push_str(&format!("## {}\n\n", slide.title));

    match slide.kind {
        SlideKind::DemoStory => render_demo_story(out, slide, request),
        SlideKind::Metrics => render_data_block(out, slide),
        _ => {
            let text = slide.content.as_text();
            if !text.is_empty() {
                out.push_str(&text);
                out.push_str("\n\n");
            }
        }
    }

    if request.options.include_images {
        embed_slide_image(out, slide);
    }
}

fn render_demo_story(out: &mut String, slide: &Slide, request: &RenderRequest<'_>) {
    let text = slide.content.as_text();
    if !text.is_empty() {
        out.push_str(&text);
        out.push_str("\n\n");
    }

    match slide.issue_key.as_ref().and_then(|key| request.issue(key)) {
        Some(issue) => {
            out.push_str(&issue_block(issue));
        }
        None => {
            // A demo slide pointing at an issue the fetch didn't return is a
            // partial failure: keep the slide, flag the gap.
            tracing::warn!(
                slide = %slide.title,
                issue_key = ?slide.issue_key,
                "Demo story issue not found in sprint data"
            );
            out.push_str("_Issue details unavailable._\n\n");
        }
    }
}

fn render_data_block(out: &mut String, slide: &Slide) {
    match &slide.content {
        SlideContent::Data(value) => {
            if let Some(map) = value.as_object() {
                for (key, entry) in map {
                    out.push_str(&format!("- **{}**: {}\n", prettify_key(key), entry));
                }
                out.push('\n');
            } else {
                out.push_str(&format!("```json\n{value}\n```\n\n"));
            }
        }
        SlideContent::Text(text) => {
            out.push_str(text);
            out.push_str("\n\n");
        }
    }
}

fn embed_slide_image(out: &mut String, slide: &Slide) {
    let image_url = match &slide.content {
        SlideContent::Data(value) => value.get("image_url").and_then(|v| v.as_str()),
        SlideContent::Text(_) => None,
    };
    if let Some(url) = image_url {
        out.push_str(&format!("![{}]({})\n\n", slide.title, url));
    }
}

fn issue_block(issue: &Issue) -> String {
    let mut block = String::new();
    block.push_str(&format!("**{}** - {}\n\n", issue.key, issue.summary));
    if let Some(points) = issue.story_points {
        block.push_str(&format!("- Story points: {points}\n"));
    }
    if let Some(assignee) = &issue.assignee {
        block.push_str(&format!("- Assignee: {assignee}\n"));
    }
    if !issue.issue_type.is_empty() {
        block.push_str(&format!("- Type: {}\n", issue.issue_type));
    }
    if let Some(description) = &issue.description {
        block.push_str(&format!("\n{description}\n"));
    }
    block.push('\n');
    block
}

fn prettify_key(key: &str) -> String {
    let mut chars = key.replace('_', " ").chars().collect::<Vec<_>>();
    if let Some(first) = chars.first_mut() {
        *first = first.to_ascii_uppercase();
    }
    chars.into_iter().collect()
}
