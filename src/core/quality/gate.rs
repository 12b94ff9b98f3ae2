//! Quality gate
//!
//! Runs the ordered rule table against a produced artifact and aggregates the
//! outcomes into a severity-weighted score and a terminal verdict. The gate
//! never blocks delivery; the orchestrator logs failed reports and returns
//! the artifact regardless.

use crate::core::quality::report::{GateStatus, QualityReport, Severity, ValidationResult};
use crate::core::quality::rules::{RuleContext, QUALITY_RULES, RECOMMENDATIONS};
use crate::domain::artifact::ExportResult;
use crate::domain::options::ExportOptions;
use crate::domain::presentation::Presentation;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Quality gate thresholds and weights
///
/// The weights and pass threshold are product-chosen defaults, deliberately
/// kept as configuration rather than hard-coded invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGateConfig {
    /// Weight of critical rules in the score
    #[serde(default = "default_critical_weight")]
    pub critical_weight: f64,

    /// Weight of warning rules in the score
    #[serde(default = "default_warning_weight")]
    pub warning_weight: f64,

    /// Weight of info rules in the score
    #[serde(default = "default_info_weight")]
    pub info_weight: f64,

    /// Minimum score for an overall pass
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,

    /// Maximum artifact size before the size rule fails
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    /// Maximum total processing time before the time rule fails
    #[serde(default = "default_max_processing_time_ms")]
    pub max_processing_time_ms: u64,

    /// Maximum average per-slide time before the performance rule fails
    #[serde(default = "default_max_time_per_slide_ms")]
    pub max_time_per_slide_ms: u64,
}

fn default_critical_weight() -> f64 {
    0.5
}

fn default_warning_weight() -> f64 {
    0.3
}

fn default_info_weight() -> f64 {
    0.2
}

fn default_pass_threshold() -> f64 {
    80.0
}

fn default_max_size_bytes() -> u64 {
    25 * 1024 * 1024
}

fn default_max_processing_time_ms() -> u64 {
    30_000
}

fn default_max_time_per_slide_ms() -> u64 {
    2_000
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            critical_weight: default_critical_weight(),
            warning_weight: default_warning_weight(),
            info_weight: default_info_weight(),
            pass_threshold: default_pass_threshold(),
            max_size_bytes: default_max_size_bytes(),
            max_processing_time_ms: default_max_processing_time_ms(),
            max_time_per_slide_ms: default_max_time_per_slide_ms(),
        }
    }
}

impl QualityGateConfig {
    fn weight_for(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical_weight,
            Severity::Warning => self.warning_weight,
            Severity::Info => self.info_weight,
        }
    }
}

/// Post-render validator
///
/// # Examples
///
/// ```
/// use sprintdeck::core::quality::{QualityGate, QualityGateConfig};
/// use sprintdeck::domain::{
///     ExportFormat, ExportOptions, ExportResult, Presentation, QualityTier,
/// };
///
/// let gate = QualityGate::new(QualityGateConfig::default());
/// let presentation = Presentation::new("Review", "Sprint 1", vec![]);
/// let result = ExportResult::new(
///     b"# Review".to_vec(),
///     "sprint-1-report.md",
///     ExportFormat::Markdown,
///     QualityTier::Medium,
///     0,
/// );
/// let report = gate.validate(&result, &presentation, &ExportOptions::new(ExportFormat::Markdown));
/// assert!(report.score > 0.0);
/// ```
pub struct QualityGate {
    config: QualityGateConfig,
}

impl QualityGate {
    /// Creates a gate with the given thresholds
    pub fn new(config: QualityGateConfig) -> Self {
        Self { config }
    }

    /// Run every rule against the artifact and aggregate a report
    ///
    /// Rules are independent; one failing rule never short-circuits the rest.
    pub fn validate(
        &self,
        result: &ExportResult,
        presentation: &Presentation,
        options: &ExportOptions,
    ) -> QualityReport {
        tracing::debug!(
            format = %result.format,
            rules = QUALITY_RULES.len(),
            "Running quality gate"
        );

        let ctx = RuleContext {
            result,
            presentation,
            options,
            config: &self.config,
        };

        let results: Vec<ValidationResult> = QUALITY_RULES
            .iter()
            .map(|rule| {
                let check = (rule.check)(&ctx);
                ValidationResult {
                    rule_id: rule.id,
                    passed: check.passed,
                    severity: rule.severity,
                    message: check.message,
                    detail: check.detail,
                }
            })
            .collect();

        let score = self.score(&results);
        let critical_failed = results
            .iter()
            .any(|r| !r.passed && r.severity == Severity::Critical);
        let any_failed = results.iter().any(|r| !r.passed);

        let status = if critical_failed {
            GateStatus::FailedCritical
        } else if any_failed {
            GateStatus::PassedWithWarnings
        } else {
            GateStatus::Passed
        };

        let passed = !critical_failed && score >= self.config.pass_threshold;

        let recommendations = results
            .iter()
            .filter(|r| !r.passed)
            .filter_map(|r| {
                RECOMMENDATIONS
                    .iter()
                    .find(|(id, _)| *id == r.rule_id)
                    .map(|(_, hint)| hint.to_string())
            })
            .collect();

        tracing::debug!(
            status = status.as_str(),
            score = format!("{score:.1}"),
            passed = passed,
            "Quality gate finished"
        );

        QualityReport {
            evaluated_at: Utc::now(),
            results,
            score,
            passed,
            status,
            recommendations,
        }
    }

    /// Severity-weighted score: 100 × passed weight / total weight
    fn score(&self, results: &[ValidationResult]) -> f64 {
        let total: f64 = results
            .iter()
            .map(|r| self.config.weight_for(r.severity))
            .sum();
        if total <= 0.0 {
            return 100.0;
        }
        let passed: f64 = results
            .iter()
            .filter(|r| r.passed)
            .map(|r| self.config.weight_for(r.severity))
            .sum();
        (passed / total) * 100.0
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(QualityGateConfig::default())
    }
}
