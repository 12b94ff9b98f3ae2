//! Heuristic error classification
//!
//! Classification is keyword-based over the raw failure's message, driven by
//! an ordered rule table so new failure kinds are additive. The classifier
//! also keeps a bounded, append-only history of everything it has classified,
//! which the status surfaces query for error rates.

use crate::core::classify::taxonomy::ErrorCode;
use crate::domain::errors::SprintdeckError;
use crate::domain::options::{ExportFormat, QualityTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Default bound on the classification history
const DEFAULT_MAX_HISTORY: usize = 200;

/// Ordered classification rules, first match wins
///
/// Keywords are matched case-insensitively against the raw error message.
/// More specific keyword sets come before catch-alls; RendererError is near
/// the bottom so renderer-phrased messages about assets or memory still land
/// on the sharper code.
const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        code: ErrorCode::NetworkTimeout,
        keywords: &[
            "timed out",
            "timeout",
            "connection refused",
            "connection reset",
            "network",
            "dns",
            "unreachable",
        ],
    },
    ClassificationRule {
        code: ErrorCode::MemoryError,
        keywords: &["out of memory", "memory", "allocation failed", "oom"],
    },
    ClassificationRule {
        code: ErrorCode::PermissionError,
        keywords: &[
            "permission denied",
            "permission",
            "forbidden",
            "unauthorized",
            "access denied",
        ],
    },
    ClassificationRule {
        code: ErrorCode::FormatError,
        keywords: &["format error", "unknown format", "unregistered format", "no renderer"],
    },
    ClassificationRule {
        code: ErrorCode::AssetError,
        keywords: &["asset", "image", "chart", "embed", "font"],
    },
    ClassificationRule {
        code: ErrorCode::ValidationError,
        keywords: &["validation", "invalid", "empty presentation", "no slides"],
    },
    ClassificationRule {
        code: ErrorCode::RendererError,
        keywords: &["render", "renderer", "layout", "typeset"],
    },
];

struct ClassificationRule {
    code: ErrorCode,
    keywords: &'static [&'static str],
}

/// Recovery hints per taxonomy code, decoupled from the retry mechanics
const RECOVERY_ACTIONS: &[(ErrorCode, &[&str])] = &[
    (
        ErrorCode::NetworkTimeout,
        &[
            "Check the network connection to the tracker",
            "Retry the export once connectivity is restored",
            "Increase the tracker timeout in sprintdeck.toml",
        ],
    ),
    (
        ErrorCode::MemoryError,
        &[
            "Lower the quality tier to reduce memory usage",
            "Export fewer slides at a time",
            "Disable image embedding",
        ],
    ),
    (
        ErrorCode::PermissionError,
        &[
            "Verify the tracker API token has read access",
            "Check write permission on the output directory",
        ],
    ),
    (
        ErrorCode::FormatError,
        &[
            "Use one of the supported formats: pdf, html, markdown, metrics, executive, digest, advanced-digest",
            "Register a renderer for the format before exporting",
        ],
    ),
    (
        ErrorCode::RendererError,
        &[
            "Retry the export",
            "Try a different output format",
        ],
    ),
    (
        ErrorCode::AssetError,
        &[
            "Export with include_images disabled",
            "Check that referenced image URLs are reachable",
        ],
    ),
    (
        ErrorCode::ValidationError,
        &[
            "Add at least one slide to the presentation",
            "Check the export options for invalid values",
        ],
    ),
    (
        ErrorCode::UnknownError,
        &[
            "Retry the export",
            "Inspect the error history via the status command",
        ],
    ),
];

/// Context captured alongside a classified failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Requested export format
    pub format: ExportFormat,

    /// Requested quality tier
    pub quality: QualityTier,

    /// Slide count of the presentation being exported
    pub slide_count: usize,
}

/// A classified export failure
///
/// Immutable once created; the classifier appends it to its history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedError {
    /// Taxonomy code
    pub code: ErrorCode,

    /// Raw error message, retained for diagnostics
    pub message: String,

    /// Whether the code is eligible for automatic retry
    pub recoverable: bool,

    /// Attempt number (1-based) the failure occurred on
    pub attempt: usize,

    /// When the failure was classified
    pub occurred_at: DateTime<Utc>,

    /// Export context at failure time
    pub context: ErrorContext,
}

impl ClassifiedError {
    /// One-line user-facing message for this failure
    pub fn user_message(&self) -> &'static str {
        self.code.user_message()
    }
}

/// Aggregate view over the classification history
#[derive(Debug, Clone, Default)]
pub struct ClassifierStats {
    /// Classified failures per taxonomy code
    pub by_code: HashMap<ErrorCode, usize>,

    /// Total classified failures
    pub total: usize,

    /// Fraction of failures that were recoverable, in [0, 1]
    pub recovery_rate: f64,
}

/// Keyword-table error classifier with bounded history
///
/// # Examples
///
/// ```
/// use sprintdeck::core::classify::{ErrorClassifier, ErrorCode, ErrorContext};
/// use sprintdeck::domain::{ExportFormat, QualityTier, RenderError, SprintdeckError};
///
/// let classifier = ErrorClassifier::new();
/// let err = SprintdeckError::Render(RenderError::Timeout("30s budget".to_string()));
/// let classified = classifier.classify(&err, 1, ErrorContext {
///     format: ExportFormat::Pdf,
///     quality: QualityTier::Medium,
///     slide_count: 3,
/// });
/// assert_eq!(classified.code, ErrorCode::RendererError);
/// assert!(classified.recoverable);
/// ```
pub struct ErrorClassifier {
    history: Mutex<VecDeque<ClassifiedError>>,
    max_history: usize,
}

impl ErrorClassifier {
    /// Creates a classifier with the default history bound
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Creates a classifier with an explicit history bound
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::new()),
            max_history: max_history.max(1),
        }
    }

    /// Classify a raw failure and append it to the history
    pub fn classify(
        &self,
        error: &SprintdeckError,
        attempt: usize,
        context: ErrorContext,
    ) -> ClassifiedError {
        let message = error.to_string();
        let code = Self::code_for_message(&message);

        let classified = ClassifiedError {
            code,
            recoverable: code.is_recoverable(),
            message,
            attempt,
            occurred_at: Utc::now(),
            context,
        };

        tracing::debug!(
            code = %classified.code,
            recoverable = classified.recoverable,
            attempt = attempt,
            "Classified export failure"
        );

        self.append(classified.clone());
        classified
    }

    /// Map a message onto a taxonomy code via the ordered rule table
    fn code_for_message(message: &str) -> ErrorCode {
        let lowered = message.to_lowercase();
        for rule in CLASSIFICATION_RULES {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword))
            {
                return rule.code;
            }
        }
        ErrorCode::UnknownError
    }

    /// Human-actionable remediation hints for a classified failure
    pub fn suggest_recovery_actions(&self, error: &ClassifiedError) -> Vec<&'static str> {
        RECOVERY_ACTIONS
            .iter()
            .find(|(code, _)| *code == error.code)
            .map(|(_, actions)| actions.to_vec())
            .unwrap_or_default()
    }

    fn append(&self, classified: ClassifiedError) {
        let mut history = self.history.lock().expect("classifier history poisoned");
        history.push_back(classified);
        while history.len() > self.max_history {
            history.pop_front();
        }
    }

    /// Snapshot of the classification history, oldest first
    pub fn history(&self) -> Vec<ClassifiedError> {
        self.history
            .lock()
            .expect("classifier history poisoned")
            .iter()
            .cloned()
            .collect()
    }

    /// Number of classified failures currently retained
    pub fn history_len(&self) -> usize {
        self.history.lock().expect("classifier history poisoned").len()
    }

    /// Aggregate statistics over the retained history
    pub fn stats(&self) -> ClassifierStats {
        let history = self.history.lock().expect("classifier history poisoned");
        let total = history.len();
        let mut by_code: HashMap<ErrorCode, usize> = HashMap::new();
        let mut recoverable = 0usize;

        for entry in history.iter() {
            *by_code.entry(entry.code).or_insert(0) += 1;
            if entry.recoverable {
                recoverable += 1;
            }
        }

        ClassifierStats {
            by_code,
            total,
            recovery_rate: if total == 0 {
                0.0
            } else {
                recoverable as f64 / total as f64
            },
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RenderError;
    use test_case::test_case;

    fn context() -> ErrorContext {
        ErrorContext {
            format: ExportFormat::Pdf,
            quality: QualityTier::Medium,
            slide_count: 3,
        }
    }

    #[test_case("request timed out after 30s", ErrorCode::NetworkTimeout)]
    #[test_case("Connection refused by host", ErrorCode::NetworkTimeout)]
    #[test_case("out of memory while rasterizing", ErrorCode::MemoryError)]
    #[test_case("Permission denied: /tmp/report.pdf", ErrorCode::PermissionError)]
    #[test_case("no renderer registered", ErrorCode::FormatError)]
    #[test_case("failed to embed image chart.png", ErrorCode::AssetError)]
    #[test_case("empty presentation rejected", ErrorCode::ValidationError)]
    #[test_case("renderer crashed during layout", ErrorCode::RendererError)]
    #[test_case("something inexplicable", ErrorCode::UnknownError)]
    fn test_classification_table(message: &str, expected: ErrorCode) {
        assert_eq!(ErrorClassifier::code_for_message(message), expected);
    }

    #[test]
    fn test_classify_records_history() {
        let classifier = ErrorClassifier::new();
        let err = SprintdeckError::Render(RenderError::Failed("render exploded".to_string()));

        let classified = classifier.classify(&err, 2, context());

        assert_eq!(classified.code, ErrorCode::RendererError);
        assert!(classified.recoverable);
        assert_eq!(classified.attempt, 2);
        assert_eq!(classifier.history_len(), 1);
        assert_eq!(classifier.history()[0].context.slide_count, 3);
    }

    #[test]
    fn test_history_bounded_oldest_pruned() {
        let classifier = ErrorClassifier::with_max_history(3);
        for i in 0..5 {
            let err = SprintdeckError::Other(format!("render failure {i}"));
            classifier.classify(&err, 1, context());
        }

        let history = classifier.history();
        assert_eq!(history.len(), 3);
        assert!(history[0].message.contains("failure 2"));
        assert!(history[2].message.contains("failure 4"));
    }

    #[test]
    fn test_stats_by_code_and_recovery_rate() {
        let classifier = ErrorClassifier::new();
        classifier.classify(
            &SprintdeckError::Other("network unreachable".to_string()),
            1,
            context(),
        );
        classifier.classify(
            &SprintdeckError::Other("network unreachable".to_string()),
            2,
            context(),
        );
        classifier.classify(
            &SprintdeckError::Other("permission denied".to_string()),
            1,
            context(),
        );
        classifier.classify(
            &SprintdeckError::Other("???".to_string()),
            1,
            context(),
        );

        let stats = classifier.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_code.get(&ErrorCode::NetworkTimeout), Some(&2));
        assert_eq!(stats.by_code.get(&ErrorCode::PermissionError), Some(&1));
        assert_eq!(stats.by_code.get(&ErrorCode::UnknownError), Some(&1));
        assert_eq!(stats.recovery_rate, 0.5);
    }

    #[test]
    fn test_recovery_actions_table_driven() {
        let classifier = ErrorClassifier::new();
        let classified = classifier.classify(
            &SprintdeckError::Other("out of memory".to_string()),
            1,
            context(),
        );

        let actions = classifier.suggest_recovery_actions(&classified);
        assert!(!actions.is_empty());
        assert!(actions.iter().any(|a| a.contains("quality tier")));
    }

    #[test]
    fn test_specific_codes_win_over_renderer() {
        // "renderer failed to embed image" mentions both; asset wins by order
        let code = ErrorClassifier::code_for_message("renderer failed to embed image");
        assert_eq!(code, ErrorCode::AssetError);
    }
}
