//! Wire models for the Jira-style REST API
//!
//! These structs mirror the tracker's JSON responses and convert into the
//! normalized domain records. They never leave the adapter.

use crate::domain::ids::{IssueKey, SprintId};
use crate::domain::issue::{Issue, IssueStatus, Sprint, SprintState};
use crate::domain::{Result, TrackerError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

/// Paged sprint listing response
#[derive(Debug, Deserialize)]
pub struct SprintListResponse {
    /// Sprints in this page
    #[serde(default)]
    pub values: Vec<WireSprint>,
}

/// One sprint as the tracker reports it
#[derive(Debug, Deserialize)]
pub struct WireSprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub goal: Option<String>,
}

impl WireSprint {
    /// Convert into the normalized domain record
    pub fn into_domain(self) -> Result<Sprint> {
        let state = match self.state.to_lowercase().as_str() {
            "future" => SprintState::Future,
            "active" => SprintState::Active,
            "closed" => SprintState::Closed,
            other => {
                return Err(TrackerError::InvalidResponse(format!(
                    "unknown sprint state '{other}'"
                ))
                .into())
            }
        };
        Ok(Sprint {
            id: SprintId::new(self.id.to_string())
                .map_err(TrackerError::InvalidResponse)?,
            name: self.name,
            state,
            start_date: self.start_date,
            end_date: self.end_date,
            goal: self.goal,
        })
    }
}

/// Paged issue search response
#[derive(Debug, Deserialize)]
pub struct IssueListResponse {
    #[serde(default)]
    pub issues: Vec<WireIssue>,
}

/// One issue as the tracker reports it
#[derive(Debug, Deserialize)]
pub struct WireIssue {
    pub key: String,
    pub fields: WireIssueFields,
}

/// The `fields` object of a wire issue
#[derive(Debug, Deserialize)]
pub struct WireIssueFields {
    pub summary: String,
    pub status: WireStatus,
    #[serde(default)]
    pub issuetype: Option<WireNamed>,
    #[serde(default, rename = "customfield_storypoints")]
    pub story_points: Option<f64>,
    #[serde(default)]
    pub assignee: Option<WireAssignee>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `{ name }` object
#[derive(Debug, Deserialize)]
pub struct WireNamed {
    pub name: String,
}

/// Issue status with its category
#[derive(Debug, Deserialize)]
pub struct WireStatus {
    pub name: String,
}

/// Assignee display info
#[derive(Debug, Deserialize)]
pub struct WireAssignee {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl WireIssue {
    /// Convert into the normalized domain record
    pub fn into_domain(self) -> Result<Issue> {
        let key = IssueKey::from_str(&self.key).map_err(TrackerError::InvalidResponse)?;
        let status = normalize_status(&self.fields.status.name);

        let mut issue = Issue::new(key, self.fields.summary, status);
        issue.story_points = self.fields.story_points;
        issue.labels = self.fields.labels;
        issue.description = self.fields.description;
        if let Some(issuetype) = self.fields.issuetype {
            issue.issue_type = issuetype.name.to_lowercase();
        }
        if let Some(assignee) = self.fields.assignee {
            issue.assignee = Some(assignee.display_name);
        }
        Ok(issue)
    }
}

/// Map a vendor status name onto the normalized status set
fn normalize_status(name: &str) -> IssueStatus {
    match name.to_lowercase().as_str() {
        "done" | "closed" | "resolved" => IssueStatus::Done,
        "in progress" | "in development" => IssueStatus::InProgress,
        "in review" | "review" | "verification" => IssueStatus::InReview,
        _ => IssueStatus::Todo,
    }
}
