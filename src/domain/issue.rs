//! Normalized issue-tracker records
//!
//! The tracker adapter converts vendor wire formats into these records; the
//! export pipeline consumes them as plain data and never mutates them.

use crate::domain::ids::{IssueKey, SprintId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of an issue, normalized across tracker vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// In review or verification
    InReview,
    /// Completed within the sprint
    Done,
}

impl IssueStatus {
    /// Whether the issue counts as delivered for velocity purposes
    pub fn is_done(&self) -> bool {
        matches!(self, IssueStatus::Done)
    }
}

/// A normalized tracker issue
///
/// # Examples
///
/// ```
/// use sprintdeck::domain::{Issue, IssueStatus};
/// use sprintdeck::domain::ids::IssueKey;
///
/// let issue = Issue::new(
///     IssueKey::new("PROJ-42").unwrap(),
///     "Add CSV export",
///     IssueStatus::Done,
/// );
/// assert!(issue.status.is_done());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker issue key (e.g. `PROJ-42`)
    pub key: IssueKey,

    /// One-line summary
    pub summary: String,

    /// Normalized workflow status
    pub status: IssueStatus,

    /// Issue type label from the tracker (story, bug, task, ...)
    #[serde(default)]
    pub issue_type: String,

    /// Story point estimate, if the tracker provides one
    #[serde(default)]
    pub story_points: Option<f64>,

    /// Assignee display name
    #[serde(default)]
    pub assignee: Option<String>,

    /// Free-form labels
    #[serde(default)]
    pub labels: Vec<String>,

    /// Longer description, used on demo-story slides
    #[serde(default)]
    pub description: Option<String>,
}

impl Issue {
    /// Creates a new issue with the required fields
    pub fn new(key: IssueKey, summary: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            key,
            summary: summary.into(),
            status,
            issue_type: String::new(),
            story_points: None,
            assignee: None,
            labels: Vec::new(),
            description: None,
        }
    }

    /// Sets the story point estimate
    pub fn with_story_points(mut self, points: f64) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Sets the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the issue type
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sprint lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    /// Not yet started
    Future,
    /// Currently running
    Active,
    /// Completed
    Closed,
}

/// A normalized tracker sprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    /// Tracker-assigned sprint id
    pub id: SprintId,

    /// Sprint display name
    pub name: String,

    /// Lifecycle state
    pub state: SprintState,

    /// Sprint start, if scheduled
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    /// Sprint end, if scheduled
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    /// Sprint goal text
    #[serde(default)]
    pub goal: Option<String>,
}

/// A single quality-checklist entry edited by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Checklist entry label
    pub name: String,

    /// Whether the team checked it off
    pub checked: bool,
}

/// User-edited sprint metrics
///
/// Collected by the form layer and passed through the pipeline unchanged.
/// `velocity()` and `completion_rate()` are derived views, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SprintMetrics {
    /// Story points committed at sprint start
    pub committed_points: f64,

    /// Story points completed by sprint end
    pub completed_points: f64,

    /// Defects found during the sprint
    pub defect_count: u32,

    /// Issues carried over to the next sprint
    pub carryover_count: u32,

    /// Quality checklist entries
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// Free-form notes from the report author
    #[serde(default)]
    pub notes: Option<String>,
}

impl SprintMetrics {
    /// Completed points; the conventional single-sprint velocity figure
    pub fn velocity(&self) -> f64 {
        self.completed_points
    }

    /// Completed/committed ratio as a percentage, 100 when nothing committed
    pub fn completion_rate(&self) -> f64 {
        if self.committed_points <= 0.0 {
            return 100.0;
        }
        (self.completed_points / self.committed_points) * 100.0
    }

    /// Fraction of checklist entries checked, in [0, 1]; 1.0 for an empty list
    pub fn checklist_score(&self) -> f64 {
        if self.checklist.is_empty() {
            return 1.0;
        }
        let checked = self.checklist.iter().filter(|item| item.checked).count();
        checked as f64 / self.checklist.len() as f64
    }
}
