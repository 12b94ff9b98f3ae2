//! Issue tracker vendor trait definition
//!
//! This module defines the `TrackerVendor` trait that abstracts vendor-specific
//! REST APIs. The export pipeline never talks to a tracker; it consumes the
//! normalized records these methods return.

use crate::domain::ids::{BoardId, SprintId};
use crate::domain::issue::{Issue, Sprint};
use crate::domain::Result;
use async_trait::async_trait;

/// Trait for issue tracker vendor implementations
///
/// Implementations wrap one vendor's REST API and convert wire formats into
/// the normalized domain records in [`crate::domain::issue`].
#[async_trait]
pub trait TrackerVendor: Send + Sync {
    /// Fetch the sprints of a board
    ///
    /// # Errors
    ///
    /// Returns an error if the board does not exist, the request fails, or
    /// the response cannot be parsed.
    async fn fetch_sprints(&self, board_id: &BoardId) -> Result<Vec<Sprint>>;

    /// Fetch the issues assigned to a sprint
    ///
    /// # Errors
    ///
    /// Returns an error if the sprint does not exist, the request fails, or
    /// the response cannot be parsed.
    async fn fetch_sprint_issues(&self, sprint_id: &SprintId) -> Result<Vec<Issue>>;

    /// Get the base URL of the tracker server
    fn base_url(&self) -> &str;
}
