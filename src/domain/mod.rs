//! Domain types
//!
//! The vocabulary shared by every layer: identifiers, tracker records, the
//! presentation model, export options and results, and the error hierarchy.
//! Nothing here depends on an adapter; wire formats are converted into these
//! records at the boundary.
//!
//! Identifiers are newtypes, so an [`IssueKey`] can never stand in for a
//! [`SprintId`]:
//!
//! ```
//! use sprintdeck::domain::{IssueKey, SprintId};
//!
//! let issue: IssueKey = "PROJ-42".parse()?;
//! let sprint: SprintId = "314".parse()?;
//! // let wrong: IssueKey = sprint; // does not compile
//! # Ok::<(), String>(())
//! ```

pub mod artifact;
pub mod errors;
pub mod ids;
pub mod issue;
pub mod options;
pub mod presentation;
pub mod result;

pub use artifact::{artifact_file_name, ExportResult, ResultMetadata};
pub use errors::{RenderError, SprintdeckError, TrackerError};
pub use ids::{BoardId, IssueKey, SprintId};
pub use issue::{ChecklistItem, Issue, IssueStatus, Sprint, SprintMetrics, SprintState};
pub use options::{ExportFormat, ExportOptions, QualityTier};
pub use presentation::{Presentation, Slide, SlideContent, SlideKind};
pub use result::Result;
