//! PDF renderer
//!
//! Writes PDF object streams directly: one page per slide, Helvetica text,
//! no external tooling. The digest renderers reuse [`PdfBuilder`] for their
//! single-page briefs.

use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::options::{ExportFormat, QualityTier};
use crate::domain::presentation::{Slide, SlideKind};
use crate::domain::Result;
use async_trait::async_trait;

/// Letter-size page height in points
const PAGE_HEIGHT: u32 = 792;
/// Letter-size page width in points
const PAGE_WIDTH: u32 = 612;
/// Maximum body lines per page before truncation
const MAX_LINES_PER_PAGE: usize = 40;

/// One page of text content
pub(crate) struct PdfPage {
    /// Page heading, set in the bold face
    pub heading: String,
    /// Body lines, top to bottom
    pub lines: Vec<String>,
}

/// Minimal PDF document writer
///
/// Emits a syntactically complete PDF (header, objects, xref, trailer) with
/// Helvetica text content. Layout is deliberately simple: a heading plus a
/// column of body lines per page.
pub(crate) struct PdfBuilder {
    pages: Vec<PdfPage>,
}

impl PdfBuilder {
    pub(crate) fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub(crate) fn add_page(&mut self, heading: impl Into<String>, lines: Vec<String>) {
        let mut lines = lines;
        if lines.len() > MAX_LINES_PER_PAGE {
            lines.truncate(MAX_LINES_PER_PAGE);
            lines.push("[...]".to_string());
        }
        self.pages.push(PdfPage {
            heading: heading.into(),
            lines,
        });
    }

    /// Serialize the document
    pub(crate) fn build(self) -> Vec<u8> {
        let page_count = self.pages.len().max(1);
        let pages = if self.pages.is_empty() {
            vec![PdfPage {
                heading: String::new(),
                lines: Vec::new(),
            }]
        } else {
            self.pages
        };

        // Object layout: 1 catalog, 2 page tree, 3/4 fonts, then a
        // (page, content) object pair per page.
        let total_objects = 4 + 2 * page_count;
        let mut buf: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::with_capacity(total_objects);

        buf.extend_from_slice(b"%PDF-1.4\n%\xc7\xec\x8f\xa2\n");

        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 5 + 2 * i))
            .collect();

        push_object(
            &mut buf,
            &mut offsets,
            1,
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        );
        push_object(
            &mut buf,
            &mut offsets,
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            ),
        );
        push_object(
            &mut buf,
            &mut offsets,
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        );
        push_object(
            &mut buf,
            &mut offsets,
            4,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
        );

        for (i, page) in pages.iter().enumerate() {
            let page_id = 5 + 2 * i;
            let content_id = page_id + 1;

            push_object(
                &mut buf,
                &mut offsets,
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
                ),
            );

            let stream = page_content_stream(page);
            offsets.push(buf.len());
            buf.extend_from_slice(
                format!(
                    "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}endstream\nendobj\n",
                    stream.len()
                )
                .as_bytes(),
            );
        }

        let xref_offset = buf.len();
        buf.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
        buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                total_objects + 1
            )
            .as_bytes(),
        );

        buf
    }
}

fn push_object(buf: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: String) {
    offsets.push(buf.len());
    buf.extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
}

fn page_content_stream(page: &PdfPage) -> String {
    let mut stream = String::from("BT\n/F2 22 Tf\n72 720 Td\n");
    stream.push_str(&format!("({}) Tj\n", escape_pdf_text(&page.heading)));
    stream.push_str("/F1 11 Tf\n0 -30 Td\n");
    for line in &page.lines {
        stream.push_str(&format!("({}) Tj\n0 -15 Td\n", escape_pdf_text(line)));
    }
    stream.push_str("ET\n");
    stream
}

/// Escape parentheses and backslashes for PDF literal strings
fn escape_pdf_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            '\\' => "\\\\".to_string(),
            c if c.is_ascii() => c.to_string(),
            // Helvetica via this writer is ASCII-only; degrade gracefully
            _ => "?".to_string(),
        })
        .collect()
}

/// Wrap text into lines of at most `width` characters
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.len() <= width {
            lines.push(raw_line.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if !current.is_empty() && current.len() + word.len() + 1 > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Renders the full deck as a PDF, one page per slide
pub struct PdfRenderer;

impl PdfRenderer {
    /// Creates a PDF renderer
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let presentation = request.presentation;
        let slide_count = presentation.slide_count();
        let line_width = match request.options.quality {
            QualityTier::Low => 70,
            QualityTier::Medium | QualityTier::High => 85,
        };

        let mut builder = PdfBuilder::new();
        for slide in presentation.slides() {
            builder.add_page(&slide.title, slide_body_lines(slide, &request, line_width));
            progress.report_slide(
                slide.index,
                slide_count,
                format!("Rendered '{}'", slide.title),
            );
        }

        Ok(ExportResult::new(
            builder.build(),
            artifact_file_name(&presentation.sprint_name, ExportFormat::Pdf),
            ExportFormat::Pdf,
            request.options.quality,
            slide_count,
        ))
    }
}

/// Body lines for one slide, including demo-story issue details
fn slide_body_lines(slide: &Slide, request: &RenderRequest<'_>, width: usize) -> Vec<String> {
    let mut lines = wrap_text(&slide.content.as_text(), width);

    if slide.kind == SlideKind::DemoStory {
        match slide.issue_key.as_ref().and_then(|key| request.issue(key)) {
            Some(issue) => {
                lines.push(String::new());
                lines.push(format!("{} - {}", issue.key, issue.summary));
                if let Some(points) = issue.story_points {
                    lines.push(format!("Story points: {points}"));
                }
                if let Some(assignee) = &issue.assignee {
                    lines.push(format!("Assignee: {assignee}"));
                }
            }
            None => {
                tracing::warn!(
                    slide = %slide.title,
                    issue_key = ?slide.issue_key,
                    "Demo story issue not found in sprint data"
                );
                lines.push("Issue details unavailable.".to_string());
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::ExportOptions;
    use crate::domain::presentation::{Presentation, SlideContent};

    fn presentation() -> Presentation {
        Presentation::new(
            "Sprint 31 Review",
            "Sprint 31",
            vec![
                Slide::new(
                    "Sprint 31",
                    SlideKind::Title,
                    0,
                    SlideContent::Text("Team Rocket".to_string()),
                ),
                Slide::new(
                    "Summary",
                    SlideKind::Summary,
                    1,
                    SlideContent::Text("We shipped (most) things".to_string()),
                ),
            ],
        )
    }

    #[tokio::test]
    async fn test_pdf_structure() {
        let presentation = presentation();
        let options = ExportOptions::new(ExportFormat::Pdf);
        let request = RenderRequest {
            presentation: &presentation,
            issues: &[],
            upcoming_issues: &[],
            metrics: None,
            options: &options,
        };

        let result = PdfRenderer::new()
            .render(request, &ProgressReporter::disabled())
            .await
            .unwrap();

        assert!(result.content.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&result.content);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 2"));
        assert!(text.ends_with("%%EOF\n"));
        assert_eq!(result.metadata.slide_count, 2);
        assert_eq!(result.file_name, "sprint-31-report.pdf");
    }

    #[test]
    fn test_escape_pdf_text() {
        assert_eq!(escape_pdf_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
        assert_eq!(escape_pdf_text("naïve"), "na?ve");
        assert_eq!(escape_pdf_text("tab\there"), "tabhere");
    }

    #[test]
    fn test_wrap_text() {
        let wrapped = wrap_text("one two three four five", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four five"]);

        let short = wrap_text("short", 20);
        assert_eq!(short, vec!["short"]);
    }

    #[test]
    fn test_builder_truncates_long_pages() {
        let mut builder = PdfBuilder::new();
        let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        builder.add_page("Big", lines);
        let bytes = builder.build();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("[...]"));
        assert!(!text.contains("line 99"));
    }

    #[test]
    fn test_empty_builder_produces_one_page() {
        let bytes = PdfBuilder::new().build();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
        assert!(text.starts_with("%PDF-1.4"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut builder = PdfBuilder::new();
        builder.add_page("Heading", vec!["line".to_string()]);
        let bytes = builder.build();

        // Offsets are byte positions in the raw buffer; every xref entry must
        // land on an "N 0 obj" line.
        let xref_at = bytes
            .windows(5)
            .position(|w| w == b"xref\n")
            .expect("xref table present");
        let table = &bytes[xref_at..];
        let mut checked = 0;
        for line in table.split(|b| *b == b'\n').skip(3).take(6) {
            let offset_str = std::str::from_utf8(&line[..10]).unwrap();
            let offset: usize = offset_str.parse().unwrap();
            let at = &bytes[offset..offset + 12];
            assert!(
                at.windows(3).any(|w| w == b"obj"),
                "offset {offset} not at an object"
            );
            checked += 1;
        }
        assert_eq!(checked, 6);
    }
}
