//! Presentation assembly
//!
//! Builds a presentation out of sprint data: title, summary, metrics, one
//! demo-story slide per delivered issue, and a closing corporate slide. The
//! UI layer edits the result before export; the CLI feeds it to the pipeline
//! directly.

use crate::domain::issue::{Issue, Sprint, SprintMetrics};
use crate::domain::presentation::{Presentation, Slide, SlideContent, SlideKind};
use serde_json::json;

/// Demo-story slides included before the assembler stops adding more
const MAX_DEMO_SLIDES: usize = 10;

/// Assembles a presentation from sprint data
///
/// # Examples
///
/// ```
/// use sprintdeck::core::assemble::PresentationAssembler;
/// use sprintdeck::domain::{Sprint, SprintId, SprintState};
///
/// let sprint = Sprint {
///     id: SprintId::new("314").unwrap(),
///     name: "Sprint 31".to_string(),
///     state: SprintState::Closed,
///     start_date: None,
///     end_date: None,
///     goal: Some("Ship the CSV export".to_string()),
/// };
/// let presentation = PresentationAssembler::new(&sprint).assemble(&[], None);
/// assert!(presentation.slide_count() >= 2);
/// ```
pub struct PresentationAssembler<'a> {
    sprint: &'a Sprint,
    team_name: Option<String>,
}

impl<'a> PresentationAssembler<'a> {
    /// Creates an assembler for a sprint
    pub fn new(sprint: &'a Sprint) -> Self {
        Self {
            sprint,
            team_name: None,
        }
    }

    /// Sets the team name shown on the title slide
    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Build the slide deck
    pub fn assemble(&self, issues: &[Issue], metrics: Option<&SprintMetrics>) -> Presentation {
        let mut slides = Vec::new();
        let mut index = 0usize;

        slides.push(self.title_slide(index));
        index += 1;

        slides.push(self.summary_slide(index, issues));
        index += 1;

        if let Some(metrics) = metrics {
            slides.push(self.metrics_slide(index, metrics));
            index += 1;
        }

        let demo_issues: Vec<&Issue> = issues
            .iter()
            .filter(|issue| issue.status.is_done())
            .take(MAX_DEMO_SLIDES)
            .collect();
        for issue in demo_issues {
            slides.push(Slide::demo_story(
                format!("Demo: {}", issue.summary),
                index,
                SlideContent::Text(
                    issue
                        .description
                        .clone()
                        .unwrap_or_else(|| "Walkthrough of the delivered work.".to_string()),
                ),
                issue.key.clone(),
            ));
            index += 1;
        }

        slides.push(Slide::new(
            "Thank You",
            SlideKind::Corporate,
            index,
            SlideContent::Text("Questions and feedback welcome.".to_string()),
        ));

        Presentation::new(
            format!("{} Review", self.sprint.name),
            self.sprint.name.clone(),
            slides,
        )
    }

    fn title_slide(&self, index: usize) -> Slide {
        let mut lines = Vec::new();
        if let Some(team) = &self.team_name {
            lines.push(team.clone());
        }
        if let Some(goal) = &self.sprint.goal {
            lines.push(format!("Goal: {goal}"));
        }
        Slide::new(
            self.sprint.name.clone(),
            SlideKind::Title,
            index,
            SlideContent::Text(lines.join("\n")),
        )
    }

    fn summary_slide(&self, index: usize, issues: &[Issue]) -> Slide {
        let done = issues.iter().filter(|issue| issue.status.is_done()).count();
        let text = if issues.is_empty() {
            "No issues were tracked this sprint.".to_string()
        } else {
            format!(
                "{done} of {} issue(s) completed this sprint.",
                issues.len()
            )
        };
        Slide::new("Sprint Summary", SlideKind::Summary, index, SlideContent::Text(text))
    }

    fn metrics_slide(&self, index: usize, metrics: &SprintMetrics) -> Slide {
        Slide::new(
            "Sprint Metrics",
            SlideKind::Metrics,
            index,
            SlideContent::Data(json!({
                "committed_points": metrics.committed_points,
                "completed_points": metrics.completed_points,
                "completion_rate": format!("{:.0}%", metrics.completion_rate()),
                "defects": metrics.defect_count,
                "carryover": metrics.carryover_count,
            })),
        )
    }
}
