//! Domain error types
//!
//! One crate-level error enum with adapter-specific sub-enums. Third-party
//! error types are converted to strings at the boundary so nothing outside an
//! adapter depends on its libraries.

use thiserror::Error;

/// Top-level Sprintdeck error
#[derive(Debug, Error)]
pub enum SprintdeckError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The issue tracker adapter failed
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// A renderer failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The export pipeline failed terminally
    #[error("Export error: {0}")]
    Export(String),

    /// Input rejected before any work began
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown or unregistered output format
    #[error("Format error: {0}")]
    Format(String),

    /// Result cache refused an operation
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Anything without a better home
    #[error("{0}")]
    Other(String),
}

/// Failures raised by the issue tracker adapter
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Failed to connect to tracker: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Sprint not found: {0}")]
    SprintNotFound(String),

    #[error("Rate limit exceeded, retry after: {0}")]
    RateLimitExceeded(String),

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Failures raised by renderer implementations
///
/// Renderers only describe what went wrong; the error classifier maps these
/// (and any other failure) onto the export taxonomy.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer could not produce the artifact
    #[error("Render failed: {0}")]
    Failed(String),

    /// A supporting asset (image, chart) could not be loaded or embedded
    #[error("Asset error: {0}")]
    Asset(String),

    /// The renderer ran out of memory or hit a size limit
    #[error("Memory error: {0}")]
    Memory(String),

    /// The render exceeded its time budget
    #[error("Render deadline exceeded: {0}")]
    Timeout(String),

    /// The presentation content is not renderable in this format
    #[error("Unsupported content: {0}")]
    UnsupportedContent(String),
}

impl From<std::io::Error> for SprintdeckError {
    fn from(err: std::io::Error) -> Self {
        SprintdeckError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SprintdeckError {
    fn from(err: serde_json::Error) -> Self {
        SprintdeckError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SprintdeckError {
    fn from(err: toml::de::Error) -> Self {
        SprintdeckError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_errors_wrap_into_the_top_level() {
        let err: SprintdeckError =
            TrackerError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, SprintdeckError::Tracker(_)));
        assert_eq!(
            err.to_string(),
            "Tracker error: Failed to connect to tracker: refused"
        );

        let err: SprintdeckError = RenderError::Asset("chart.png missing".to_string()).into();
        assert!(err.to_string().starts_with("Render error: Asset error"));
    }

    #[test]
    fn test_third_party_errors_become_strings() {
        let err: SprintdeckError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SprintdeckError::Io(_)));

        let bad_json = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: SprintdeckError = bad_json.into();
        assert!(matches!(err, SprintdeckError::Serialization(_)));

        let bad_toml = toml::from_str::<toml::Value>("a = = b").unwrap_err();
        let err: SprintdeckError = bad_toml.into();
        assert!(err.to_string().contains("TOML parse error"));
    }
}
