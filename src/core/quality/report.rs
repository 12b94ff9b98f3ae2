//! Quality report structures
//!
//! One report is produced per export, after the artifact exists. Reports are
//! read-only once built; the orchestrator logs them and hands them back to
//! the caller alongside the artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Failure blocks the pass verdict
    Critical,
    /// Failure degrades the score
    Warning,
    /// Advisory only
    Info,
}

impl Severity {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Outcome of a single validation rule
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Stable rule identifier
    pub rule_id: &'static str,

    /// Whether the rule passed
    pub passed: bool,

    /// Rule severity
    pub severity: Severity,

    /// Human-readable outcome
    pub message: String,

    /// Structured detail payload
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Terminal state of the quality gate for one export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateStatus {
    /// Every rule passed
    Passed,
    /// Only warning/info rules failed
    PassedWithWarnings,
    /// At least one critical rule failed
    FailedCritical,
}

impl GateStatus {
    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Passed => "passed",
            GateStatus::PassedWithWarnings => "passed-with-warnings",
            GateStatus::FailedCritical => "failed-critical",
        }
    }
}

/// Aggregated quality verdict for one export
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// When the gate ran
    pub evaluated_at: DateTime<Utc>,

    /// Per-rule outcomes, in rule order
    pub results: Vec<ValidationResult>,

    /// Severity-weighted score in [0, 100]
    pub score: f64,

    /// Overall verdict: zero critical failures and score above threshold
    pub passed: bool,

    /// Terminal gate status
    pub status: GateStatus,

    /// Remediation hints for failing rules
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// Rules that failed, in rule order
    pub fn failing_rules(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// Failed rules of critical severity
    pub fn critical_failures(&self) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| !r.passed && r.severity == Severity::Critical)
            .collect()
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Quality Report\n");
        summary.push_str(&format!("  Evaluated at: {}\n", self.evaluated_at));
        summary.push_str(&format!("  Status: {}\n", self.status.as_str()));
        summary.push_str(&format!("  Score: {:.1}\n", self.score));
        summary.push_str(&format!(
            "  Rules: {} passed / {} total\n",
            self.results.iter().filter(|r| r.passed).count(),
            self.results.len()
        ));

        let failing = self.failing_rules();
        if !failing.is_empty() {
            summary.push_str("\nFailures:\n");
            for result in failing {
                summary.push_str(&format!(
                    "  [{}] {}: {}\n",
                    result.severity.as_str(),
                    result.rule_id,
                    result.message
                ));
            }
        }

        if !self.recommendations.is_empty() {
            summary.push_str("\nRecommendations:\n");
            for recommendation in &self.recommendations {
                summary.push_str(&format!("  - {recommendation}\n"));
            }
        }

        summary
    }
}
