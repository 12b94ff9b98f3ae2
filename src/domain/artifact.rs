//! Export result artifact
//!
//! The artifact produced by a renderer: payload bytes plus descriptive
//! metadata. Produced exactly once per successful render; cache hits return
//! the stored artifact unchanged.

use crate::domain::options::{ExportFormat, QualityTier};
use serde::{Deserialize, Serialize};

/// Metadata stamped onto a result by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Number of slides in the source presentation
    pub slide_count: usize,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,

    /// Quality tier the artifact was produced at
    pub quality: QualityTier,
}

/// Output artifact of a successful export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// Artifact payload
    pub content: Vec<u8>,

    /// Suggested file name, including extension
    pub file_name: String,

    /// Payload size in bytes
    pub size_bytes: u64,

    /// Format the artifact was produced in
    pub format: ExportFormat,

    /// Descriptive metadata
    pub metadata: ResultMetadata,
}

impl ExportResult {
    /// Creates a result from rendered bytes
    ///
    /// `size_bytes` is derived from the payload; renderers never set it
    /// independently.
    pub fn new(
        content: Vec<u8>,
        file_name: impl Into<String>,
        format: ExportFormat,
        quality: QualityTier,
        slide_count: usize,
    ) -> Self {
        let size_bytes = content.len() as u64;
        Self {
            content,
            file_name: file_name.into(),
            size_bytes,
            format,
            metadata: ResultMetadata {
                slide_count,
                processing_time_ms: 0,
                quality,
            },
        }
    }

    /// Payload interpreted as UTF-8, for text formats
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// Builds the conventional artifact file name for a sprint and format
pub fn artifact_file_name(sprint_name: &str, format: ExportFormat) -> String {
    let slug: String = sprint_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    let slug = if slug.is_empty() { "sprint".to_string() } else { slug };
    format!("{}-report.{}", slug, format.file_extension())
}
