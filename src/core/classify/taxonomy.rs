//! Export failure taxonomy
//!
//! Every raw failure is mapped onto one of these codes. Recoverability is a
//! property of the code, not of the individual failure: the retry loop only
//! consults the code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Network failure or timeout while fetching supporting data
    NetworkTimeout,
    /// Out-of-memory or allocation pressure during rendering
    MemoryError,
    /// Missing permission to read inputs or write outputs
    PermissionError,
    /// Unknown or unregistered output format
    FormatError,
    /// Renderer-internal failure
    RendererError,
    /// A supporting asset could not be loaded or embedded
    AssetError,
    /// Invalid input rejected before rendering
    ValidationError,
    /// Anything the classifier could not place
    UnknownError,
}

impl ErrorCode {
    /// Codes eligible for automatic retry with backoff
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkTimeout
                | ErrorCode::MemoryError
                | ErrorCode::RendererError
                | ErrorCode::AssetError
        )
    }

    /// Stable uppercase name, used in logs and history queries
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NetworkTimeout => "NETWORK_TIMEOUT",
            ErrorCode::MemoryError => "MEMORY_ERROR",
            ErrorCode::PermissionError => "PERMISSION_ERROR",
            ErrorCode::FormatError => "FORMAT_ERROR",
            ErrorCode::RendererError => "RENDERER_ERROR",
            ErrorCode::AssetError => "ASSET_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// One-line user-facing message for terminal failures
    ///
    /// Internal messages and stack traces stay in the history; end users see
    /// only this.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCode::NetworkTimeout => {
                "The export timed out while fetching data. Check your connection and try again."
            }
            ErrorCode::MemoryError => {
                "The export ran out of memory. Try a lower quality tier or fewer slides."
            }
            ErrorCode::PermissionError => {
                "The export was denied access. Check file and tracker permissions."
            }
            ErrorCode::FormatError => {
                "The requested export format is not available."
            }
            ErrorCode::RendererError => {
                "The renderer failed to produce the document. Try again or switch formats."
            }
            ErrorCode::AssetError => {
                "Some images or charts could not be loaded. Try exporting without images."
            }
            ErrorCode::ValidationError => {
                "The presentation is not valid for export. Add at least one slide and retry."
            }
            ErrorCode::UnknownError => {
                "The export failed unexpectedly. Try again; if it persists, check the logs."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_set_is_exact() {
        let recoverable = [
            ErrorCode::NetworkTimeout,
            ErrorCode::MemoryError,
            ErrorCode::RendererError,
            ErrorCode::AssetError,
        ];
        let terminal = [
            ErrorCode::PermissionError,
            ErrorCode::FormatError,
            ErrorCode::ValidationError,
            ErrorCode::UnknownError,
        ];

        for code in recoverable {
            assert!(code.is_recoverable(), "{code} should be recoverable");
        }
        for code in terminal {
            assert!(!code.is_recoverable(), "{code} should be terminal");
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ErrorCode::NetworkTimeout.to_string(), "NETWORK_TIMEOUT");
        assert_eq!(ErrorCode::UnknownError.to_string(), "UNKNOWN_ERROR");
    }

    #[test]
    fn test_user_messages_nonempty() {
        let codes = [
            ErrorCode::NetworkTimeout,
            ErrorCode::MemoryError,
            ErrorCode::PermissionError,
            ErrorCode::FormatError,
            ErrorCode::RendererError,
            ErrorCode::AssetError,
            ErrorCode::ValidationError,
            ErrorCode::UnknownError,
        ];
        for code in codes {
            assert!(!code.user_message().is_empty());
        }
    }
}
