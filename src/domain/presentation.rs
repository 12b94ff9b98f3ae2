//! Presentation and slide models
//!
//! A presentation is an ordered sequence of slides plus metadata. It is
//! assembled once (by the caller or the assembler) and treated as immutable
//! by the export pipeline; cache keys are derived from its content.

use crate::domain::ids::IssueKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Slide category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    /// Opening title slide
    Title,
    /// Sprint summary slide
    Summary,
    /// Metrics/velocity slide
    Metrics,
    /// Per-issue demo story slide
    DemoStory,
    /// Corporate/branding slide
    Corporate,
    /// Free-form user slide
    Custom,
}

impl SlideKind {
    /// Stable lowercase name, used in logs and artifacts
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Summary => "summary",
            SlideKind::Metrics => "metrics",
            SlideKind::DemoStory => "demo-story",
            SlideKind::Corporate => "corporate",
            SlideKind::Custom => "custom",
        }
    }
}

/// Slide content payload: free text or structured data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideContent {
    /// Free-form text (markdown-ish prose)
    Text(String),
    /// Structured data rendered per format (tables, metric blocks)
    Data(serde_json::Value),
}

impl SlideContent {
    /// Plain-text view of the content, used by text-first renderers
    pub fn as_text(&self) -> String {
        match self {
            SlideContent::Text(text) => text.clone(),
            SlideContent::Data(value) => {
                serde_json::to_string_pretty(value).unwrap_or_default()
            }
        }
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        match self {
            SlideContent::Text(text) => text.trim().is_empty(),
            SlideContent::Data(value) => value.is_null(),
        }
    }
}

/// A single slide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Slide title
    pub title: String,

    /// Category tag
    pub kind: SlideKind,

    /// Position within the presentation, starting at 0
    pub index: usize,

    /// Content payload
    pub content: SlideContent,

    /// Referenced issue; present on demo-story slides
    #[serde(default)]
    pub issue_key: Option<IssueKey>,
}

impl Slide {
    /// Creates a new slide
    pub fn new(
        title: impl Into<String>,
        kind: SlideKind,
        index: usize,
        content: SlideContent,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            index,
            content,
            issue_key: None,
        }
    }

    /// Creates a demo-story slide referencing an issue
    pub fn demo_story(
        title: impl Into<String>,
        index: usize,
        content: SlideContent,
        issue_key: IssueKey,
    ) -> Self {
        Self {
            title: title.into(),
            kind: SlideKind::DemoStory,
            index,
            content,
            issue_key: Some(issue_key),
        }
    }
}

/// An ordered slide deck with metadata
///
/// # Examples
///
/// ```
/// use sprintdeck::domain::{Presentation, Slide, SlideContent, SlideKind};
///
/// let presentation = Presentation::new(
///     "Sprint 31 Review",
///     "Sprint 31",
///     vec![Slide::new(
///         "Sprint 31",
///         SlideKind::Title,
///         0,
///         SlideContent::Text("Team Rocket".to_string()),
///     )],
/// );
/// assert_eq!(presentation.slide_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Stable identity, part of the cache fingerprint
    pub id: Uuid,

    /// Presentation title
    pub title: String,

    /// Sprint the deck reports on
    pub sprint_name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Ordered slides
    slides: Vec<Slide>,
}

impl Presentation {
    /// Creates a presentation from pre-built slides
    pub fn new(
        title: impl Into<String>,
        sprint_name: impl Into<String>,
        slides: Vec<Slide>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            sprint_name: sprint_name.into(),
            created_at: Utc::now(),
            slides,
        }
    }

    /// Ordered slides, read-only
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide count per category, ordered by kind
    pub fn kind_counts(&self) -> BTreeMap<SlideKind, usize> {
        let mut counts = BTreeMap::new();
        for slide in &self.slides {
            *counts.entry(slide.kind).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn text_slide(title: &str, kind: SlideKind, index: usize) -> Slide {
        Slide::new(title, kind, index, SlideContent::Text(format!("body {index}")))
    }

    #[test]
    fn test_presentation_counts() {
        let presentation = Presentation::new(
            "Sprint 31 Review",
            "Sprint 31",
            vec![
                text_slide("Sprint 31", SlideKind::Title, 0),
                text_slide("What happened", SlideKind::Summary, 1),
                text_slide("Numbers", SlideKind::Metrics, 2),
                text_slide("Numbers again", SlideKind::Metrics, 3),
            ],
        );

        assert_eq!(presentation.slide_count(), 4);
        assert!(!presentation.is_empty());

        let counts = presentation.kind_counts();
        assert_eq!(counts.get(&SlideKind::Metrics), Some(&2));
        assert_eq!(counts.get(&SlideKind::Title), Some(&1));
        assert_eq!(counts.get(&SlideKind::DemoStory), None);
    }

    #[test]
    fn test_empty_presentation() {
        let presentation = Presentation::new("Empty", "Sprint 0", vec![]);
        assert!(presentation.is_empty());
        assert_eq!(presentation.slide_count(), 0);
    }

    #[test]
    fn test_demo_story_carries_issue_key() {
        let key = crate::domain::ids::IssueKey::from_str("PROJ-7").unwrap();
        let slide = Slide::demo_story(
            "Demo: CSV export",
            2,
            SlideContent::Text("walkthrough".to_string()),
            key.clone(),
        );
        assert_eq!(slide.kind, SlideKind::DemoStory);
        assert_eq!(slide.issue_key, Some(key));
    }

    #[test]
    fn test_slide_content_as_text() {
        let text = SlideContent::Text("hello".to_string());
        assert_eq!(text.as_text(), "hello");
        assert!(!text.is_empty());

        let data = SlideContent::Data(serde_json::json!({"velocity": 30}));
        assert!(data.as_text().contains("velocity"));

        let blank = SlideContent::Text("  ".to_string());
        assert!(blank.is_empty());
        assert!(SlideContent::Data(serde_json::Value::Null).is_empty());
    }

    #[test]
    fn test_presentation_ids_are_unique() {
        let a = Presentation::new("A", "S", vec![]);
        let b = Presentation::new("A", "S", vec![]);
        assert_ne!(a.id, b.id);
    }
}
