//! Export options: target format, quality tier, and feature flags
//!
//! Options are read-only input to a single export call. The subset of fields
//! that affects output bytes participates in the cache fingerprint; see
//! [`crate::core::fingerprint`].

use crate::domain::errors::SprintdeckError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Full slide deck as PDF
    Pdf,
    /// Full slide deck as a standalone HTML page
    Html,
    /// Full slide deck as Markdown
    Markdown,
    /// Metrics-only JSON artifact
    Metrics,
    /// Executive summary (plain text)
    Executive,
    /// Single-page PDF digest
    Digest,
    /// Digest plus upcoming-sprint preview
    AdvancedDigest,
}

impl ExportFormat {
    /// All supported formats, in registration order
    pub const ALL: &'static [ExportFormat] = &[
        ExportFormat::Pdf,
        ExportFormat::Html,
        ExportFormat::Markdown,
        ExportFormat::Metrics,
        ExportFormat::Executive,
        ExportFormat::Digest,
        ExportFormat::AdvancedDigest,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Metrics => "metrics",
            ExportFormat::Executive => "executive",
            ExportFormat::Digest => "digest",
            ExportFormat::AdvancedDigest => "advanced-digest",
        }
    }

    /// Conventional file extension for artifacts of this format
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf | ExportFormat::Digest | ExportFormat::AdvancedDigest => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
            ExportFormat::Metrics => "json",
            ExportFormat::Executive => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = SprintdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "metrics" => Ok(ExportFormat::Metrics),
            "executive" => Ok(ExportFormat::Executive),
            "digest" => Ok(ExportFormat::Digest),
            "advanced-digest" | "advanced_digest" => Ok(ExportFormat::AdvancedDigest),
            other => Err(SprintdeckError::Validation(format!(
                "Unknown export format '{other}'. Supported formats: pdf, html, markdown, \
                 metrics, executive, digest, advanced-digest"
            ))),
        }
    }
}

/// Output quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Compact output, minimal styling
    Low,
    /// Default balance
    Medium,
    /// Full styling and detail
    High,
}

impl QualityTier {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = SprintdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "medium" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            other => Err(SprintdeckError::Validation(format!(
                "Unknown quality tier '{other}'. Supported tiers: low, medium, high"
            ))),
        }
    }
}

/// Configuration for a single export call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Target format
    pub format: ExportFormat,

    /// Quality tier
    pub quality: QualityTier,

    /// Embed images/charts in the artifact
    #[serde(default = "default_true")]
    pub include_images: bool,

    /// Compress the artifact payload where the format supports it
    #[serde(default)]
    pub compression: bool,

    /// Produce interactive output (HTML navigation controls)
    #[serde(default)]
    pub interactive: bool,

    /// Stream slides progressively while rendering
    #[serde(default)]
    pub progressive: bool,

    /// Slides rendered per progress tick
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    10
}

impl ExportOptions {
    /// Creates options for a format with default flags and medium quality
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            quality: QualityTier::Medium,
            include_images: true,
            compression: false,
            interactive: false,
            progressive: false,
            batch_size: default_batch_size(),
        }
    }

    /// Sets the quality tier
    pub fn with_quality(mut self, quality: QualityTier) -> Self {
        self.quality = quality;
        self
    }

    /// Validates option values that the type system can't enforce
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range numeric values.
    pub fn validate(&self) -> Result<(), SprintdeckError> {
        if self.batch_size == 0 {
            return Err(SprintdeckError::Validation(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("pdf", ExportFormat::Pdf)]
    #[test_case("html", ExportFormat::Html)]
    #[test_case("markdown", ExportFormat::Markdown)]
    #[test_case("md", ExportFormat::Markdown)]
    #[test_case("metrics", ExportFormat::Metrics)]
    #[test_case("executive", ExportFormat::Executive)]
    #[test_case("digest", ExportFormat::Digest)]
    #[test_case("advanced-digest", ExportFormat::AdvancedDigest; "advanced_digest_hyphen")]
    #[test_case("ADVANCED_DIGEST", ExportFormat::AdvancedDigest; "advanced_digest_upper")]
    fn test_format_from_str(input: &str, expected: ExportFormat) {
        assert_eq!(ExportFormat::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_format_from_str_unknown() {
        let err = ExportFormat::from_str("xyz").unwrap_err();
        assert!(matches!(err, SprintdeckError::Validation(_)));
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!(QualityTier::from_str("low").unwrap(), QualityTier::Low);
        assert_eq!(QualityTier::from_str("HIGH").unwrap(), QualityTier::High);
        assert!(QualityTier::from_str("ultra").is_err());
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(ExportFormat::Pdf.file_extension(), "pdf");
        assert_eq!(ExportFormat::Digest.file_extension(), "pdf");
        assert_eq!(ExportFormat::Markdown.file_extension(), "md");
        assert_eq!(ExportFormat::Metrics.file_extension(), "json");
    }

    #[test]
    fn test_options_defaults() {
        let options = ExportOptions::new(ExportFormat::Markdown);
        assert_eq!(options.quality, QualityTier::Medium);
        assert!(options.include_images);
        assert!(!options.compression);
        assert_eq!(options.batch_size, 10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_invalid_batch_size() {
        let mut options = ExportOptions::new(ExportFormat::Pdf);
        options.batch_size = 0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_format_round_trip_all() {
        for format in ExportFormat::ALL {
            let parsed = ExportFormat::from_str(format.as_str()).unwrap();
            assert_eq!(parsed, *format);
        }
    }
}
