//! HTML renderer
//!
//! Converts the deck's Markdown body to HTML with pulldown-cmark and wraps it
//! in a complete standalone document. Interactive mode adds keyboard slide
//! navigation; quality tiers select the stylesheet.

use crate::adapters::renderers::markdown::deck_to_markdown;
use crate::adapters::renderers::{RenderRequest, Renderer};
use crate::core::export::progress::ProgressReporter;
use crate::domain::artifact::{artifact_file_name, ExportResult};
use crate::domain::options::{ExportFormat, QualityTier};
use crate::domain::Result;
use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};

const BASE_CSS: &str = r#"body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem auto; max-width: 52rem; padding: 0 1rem; color: #1a1a1a; }
h1 { border-bottom: 2px solid #3b6ea5; padding-bottom: .3rem; }
h2 { margin-top: 2rem; color: #3b6ea5; }
img { max-width: 100%; }"#;

const RICH_CSS: &str = r#"
blockquote { border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #555; }
code, pre { background: #f4f4f4; border-radius: 4px; padding: .1rem .3rem; }
table { border-collapse: collapse; } td, th { border: 1px solid #ddd; padding: .3rem .6rem; }"#;

const NAV_SCRIPT: &str = r#"<script>
document.addEventListener("keydown", (e) => {
  const slides = document.querySelectorAll("h2");
  if (!slides.length) return;
  const y = window.scrollY;
  if (e.key === "ArrowRight") {
    for (const s of slides) { if (s.offsetTop > y + 10) { s.scrollIntoView(); break; } }
  } else if (e.key === "ArrowLeft") {
    let prev = null;
    for (const s of slides) { if (s.offsetTop < y - 10) { prev = s; } }
    if (prev) prev.scrollIntoView();
  }
});
</script>"#;

/// Renders the deck as a standalone HTML page
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Creates an HTML renderer
    pub fn new() -> Self {
        Self
    }

    /// Wrap converted body HTML in a complete document with styling
    fn wrap_html(&self, body: &str, title: &str, quality: QualityTier, interactive: bool) -> String {
        let css = match quality {
            QualityTier::Low => String::new(),
            QualityTier::Medium => BASE_CSS.to_string(),
            QualityTier::High => format!("{BASE_CSS}{RICH_CSS}"),
        };
        let script = if interactive { NAV_SCRIPT } else { "" };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="sprint-report">
{body}
    </article>
{script}
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body,
            script = script
        )
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for HtmlRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    async fn render(
        &self,
        request: RenderRequest<'_>,
        progress: &ProgressReporter,
    ) -> Result<ExportResult> {
        let markdown = deck_to_markdown(&request, Some(progress));

        let mut parser_options = Options::empty();
        parser_options.insert(Options::ENABLE_TABLES);
        parser_options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(&markdown, parser_options);

        let mut body = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut body, parser);

        let document = self.wrap_html(
            &body,
            &request.presentation.title,
            request.options.quality,
            request.options.interactive,
        );

        Ok(ExportResult::new(
            document.into_bytes(),
            artifact_file_name(&request.presentation.sprint_name, ExportFormat::Html),
            ExportFormat::Html,
            request.options.quality,
            request.presentation.slide_count(),
        ))
    }
}

/// Escape text for placement inside HTML
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
