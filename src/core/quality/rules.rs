//! Quality gate rule set
//!
//! A fixed, ordered table of independent validation rules. Each rule inspects
//! the produced artifact (plus the source presentation and options) and
//! reports pass/fail; the gate aggregates outcomes into a report. New rules
//! are added by extending [`QUALITY_RULES`] and the recommendation table.

use crate::core::quality::gate::QualityGateConfig;
use crate::core::quality::report::Severity;
use crate::domain::artifact::ExportResult;
use crate::domain::options::{ExportFormat, ExportOptions};
use crate::domain::presentation::Presentation;
use serde_json::json;

/// Everything a rule may inspect
pub struct RuleContext<'a> {
    /// The produced artifact
    pub result: &'a ExportResult,

    /// Source presentation
    pub presentation: &'a Presentation,

    /// Options the export ran with
    pub options: &'a ExportOptions,

    /// Gate thresholds
    pub config: &'a QualityGateConfig,
}

/// Raw outcome of one rule check
pub struct RuleCheck {
    /// Whether the rule passed
    pub passed: bool,

    /// Human-readable outcome
    pub message: String,

    /// Structured detail payload
    pub detail: Option<serde_json::Value>,
}

impl RuleCheck {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            detail: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// A single table entry
pub struct QualityRule {
    /// Stable rule identifier
    pub id: &'static str,

    /// Severity of a failure
    pub severity: Severity,

    /// Check function
    pub check: fn(&RuleContext<'_>) -> RuleCheck,
}

/// Ordered rule table; the gate runs these top to bottom
pub const QUALITY_RULES: &[QualityRule] = &[
    QualityRule {
        id: "file-integrity",
        severity: Severity::Critical,
        check: check_file_integrity,
    },
    QualityRule {
        id: "content-completeness",
        severity: Severity::Critical,
        check: check_content_completeness,
    },
    QualityRule {
        id: "format-compliance",
        severity: Severity::Critical,
        check: check_format_compliance,
    },
    QualityRule {
        id: "size-threshold",
        severity: Severity::Warning,
        check: check_size_threshold,
    },
    QualityRule {
        id: "time-threshold",
        severity: Severity::Warning,
        check: check_time_threshold,
    },
    QualityRule {
        id: "accessibility",
        severity: Severity::Warning,
        check: check_accessibility,
    },
    QualityRule {
        id: "security",
        severity: Severity::Warning,
        check: check_security,
    },
    QualityRule {
        id: "performance",
        severity: Severity::Info,
        check: check_performance,
    },
    QualityRule {
        id: "metadata-completeness",
        severity: Severity::Info,
        check: check_metadata_completeness,
    },
];

/// Rule id to remediation hint; consulted for failing rules only
pub const RECOMMENDATIONS: &[(&str, &str)] = &[
    ("file-integrity", "Re-run the export; the artifact payload is corrupt or empty"),
    ("content-completeness", "Re-run the export; slides are missing from the artifact"),
    ("format-compliance", "Re-run the export or switch formats; the payload is malformed"),
    ("size-threshold", "Lower the quality tier or disable image embedding to shrink the artifact"),
    ("time-threshold", "Reduce slide count or quality tier to speed up rendering"),
    ("accessibility", "Enable image descriptions and document language metadata"),
    ("security", "Disable interactive mode or remove embedded scripts"),
    ("performance", "Consider batching slides or lowering quality for large decks"),
    ("metadata-completeness", "Re-run the export; artifact metadata is incomplete"),
];

fn check_file_integrity(ctx: &RuleContext<'_>) -> RuleCheck {
    if ctx.result.content.is_empty() {
        return RuleCheck::fail("Artifact payload is empty");
    }
    if ctx.result.size_bytes != ctx.result.content.len() as u64 {
        return RuleCheck::fail(format!(
            "Declared size {} does not match payload size {}",
            ctx.result.size_bytes,
            ctx.result.content.len()
        ));
    }
    RuleCheck::pass("Payload present and size consistent")
}

fn check_content_completeness(ctx: &RuleContext<'_>) -> RuleCheck {
    let expected = ctx.presentation.slide_count();
    let declared = ctx.result.metadata.slide_count;
    if declared != expected {
        return RuleCheck::fail(format!(
            "Artifact reports {declared} slides, presentation has {expected}"
        ))
        .with_detail(json!({"expected": expected, "declared": declared}));
    }

    // Text formats must carry every slide title verbatim
    if matches!(
        ctx.result.format,
        ExportFormat::Markdown | ExportFormat::Html
    ) {
        if let Some(text) = ctx.result.as_text() {
            let missing: Vec<&str> = ctx
                .presentation
                .slides()
                .iter()
                .map(|slide| slide.title.as_str())
                .filter(|title| !title.is_empty() && !text.contains(*title))
                .collect();
            if !missing.is_empty() {
                return RuleCheck::fail(format!("{} slide title(s) missing", missing.len()))
                    .with_detail(json!({ "missing_titles": missing }));
            }
        }
    }

    RuleCheck::pass("All slides accounted for")
}

fn check_format_compliance(ctx: &RuleContext<'_>) -> RuleCheck {
    let content = &ctx.result.content;
    match ctx.result.format {
        ExportFormat::Pdf | ExportFormat::Digest | ExportFormat::AdvancedDigest => {
            if content.starts_with(b"%PDF-") {
                RuleCheck::pass("PDF header present")
            } else {
                RuleCheck::fail("Payload does not start with a PDF header")
            }
        }
        ExportFormat::Html => match ctx.result.as_text() {
            Some(text) if text.to_lowercase().contains("<!doctype html") => {
                RuleCheck::pass("HTML document shell present")
            }
            Some(_) => RuleCheck::fail("Payload is not a complete HTML document"),
            None => RuleCheck::fail("Payload is not valid UTF-8"),
        },
        ExportFormat::Markdown | ExportFormat::Executive => {
            if ctx.result.as_text().is_some() {
                RuleCheck::pass("Payload is valid UTF-8 text")
            } else {
                RuleCheck::fail("Payload is not valid UTF-8")
            }
        }
        ExportFormat::Metrics => match ctx.result.as_text() {
            Some(text) if serde_json::from_str::<serde_json::Value>(text).is_ok() => {
                RuleCheck::pass("Payload is valid JSON")
            }
            _ => RuleCheck::fail("Payload is not valid JSON"),
        },
    }
}

fn check_size_threshold(ctx: &RuleContext<'_>) -> RuleCheck {
    let max = ctx.config.max_size_bytes;
    if ctx.result.size_bytes > max {
        RuleCheck::fail(format!(
            "Artifact is {} bytes, above the {max} byte threshold",
            ctx.result.size_bytes
        ))
    } else {
        RuleCheck::pass("Artifact size within threshold")
    }
}

fn check_time_threshold(ctx: &RuleContext<'_>) -> RuleCheck {
    let max = ctx.config.max_processing_time_ms;
    let took = ctx.result.metadata.processing_time_ms;
    if took > max {
        RuleCheck::fail(format!(
            "Rendering took {took} ms, above the {max} ms threshold"
        ))
    } else {
        RuleCheck::pass("Processing time within threshold")
    }
}

fn check_accessibility(ctx: &RuleContext<'_>) -> RuleCheck {
    if ctx.result.format != ExportFormat::Html {
        return RuleCheck::pass("Not applicable to this format");
    }
    let Some(text) = ctx.result.as_text() else {
        return RuleCheck::fail("Payload is not valid UTF-8");
    };

    if !text.contains("lang=") {
        return RuleCheck::fail("Document language attribute missing");
    }
    // Every embedded image needs alternative text
    let images = text.matches("<img").count();
    let alts = text.matches("alt=").count();
    if images > alts {
        return RuleCheck::fail(format!(
            "{} image(s) missing alternative text",
            images - alts
        ));
    }
    RuleCheck::pass("Language and image descriptions present")
}

fn check_security(ctx: &RuleContext<'_>) -> RuleCheck {
    if ctx.result.format != ExportFormat::Html {
        return RuleCheck::pass("Not applicable to this format");
    }
    let Some(text) = ctx.result.as_text() else {
        return RuleCheck::fail("Payload is not valid UTF-8");
    };

    // Scripts are only expected when interactive output was requested
    if !ctx.options.interactive && text.to_lowercase().contains("<script") {
        return RuleCheck::fail("Unexpected script element in non-interactive output");
    }
    RuleCheck::pass("No unexpected active content")
}

fn check_performance(ctx: &RuleContext<'_>) -> RuleCheck {
    let slides = ctx.result.metadata.slide_count.max(1) as u64;
    let per_slide = ctx.result.metadata.processing_time_ms / slides;
    let max = ctx.config.max_time_per_slide_ms;
    if per_slide > max {
        RuleCheck::fail(format!(
            "Rendering averaged {per_slide} ms per slide, above the {max} ms budget"
        ))
    } else {
        RuleCheck::pass("Per-slide rendering time within budget")
    }
}

fn check_metadata_completeness(ctx: &RuleContext<'_>) -> RuleCheck {
    if ctx.result.file_name.is_empty() {
        return RuleCheck::fail("Artifact file name is empty");
    }
    let expected_extension = ctx.result.format.file_extension();
    if !ctx.result.file_name.ends_with(expected_extension) {
        return RuleCheck::fail(format!(
            "File name '{}' does not carry the .{expected_extension} extension",
            ctx.result.file_name
        ));
    }
    if ctx.result.metadata.slide_count == 0 {
        return RuleCheck::fail("Artifact metadata reports zero slides");
    }
    RuleCheck::pass("Metadata complete")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::ExportResult;
    use crate::domain::options::QualityTier;
    use crate::domain::presentation::{Slide, SlideContent, SlideKind};

    fn presentation() -> Presentation {
        Presentation::new(
            "Review",
            "Sprint 5",
            vec![Slide::new(
                "Opening",
                SlideKind::Title,
                0,
                SlideContent::Text("hello".to_string()),
            )],
        )
    }

    fn markdown_result(content: &str) -> ExportResult {
        ExportResult::new(
            content.as_bytes().to_vec(),
            "sprint-5-report.md",
            ExportFormat::Markdown,
            QualityTier::Medium,
            1,
        )
    }

    fn run(rule_id: &str, result: &ExportResult, presentation: &Presentation) -> RuleCheck {
        let options = ExportOptions::new(result.format);
        let config = QualityGateConfig::default();
        let ctx = RuleContext {
            result,
            presentation,
            options: &options,
            config: &config,
        };
        let rule = QUALITY_RULES
            .iter()
            .find(|rule| rule.id == rule_id)
            .expect("rule exists");
        (rule.check)(&ctx)
    }

    #[test]
    fn test_file_integrity_empty_payload_fails() {
        let p = presentation();
        let result = markdown_result("");
        assert!(!run("file-integrity", &result, &p).passed);

        let ok = markdown_result("# Opening");
        assert!(run("file-integrity", &ok, &p).passed);
    }

    #[test]
    fn test_content_completeness_checks_titles() {
        let p = presentation();
        let ok = markdown_result("# Opening\nhello");
        assert!(run("content-completeness", &ok, &p).passed);

        let missing = markdown_result("# Something else entirely");
        let check = run("content-completeness", &missing, &p);
        assert!(!check.passed);
        assert!(check.detail.is_some());
    }

    #[test]
    fn test_content_completeness_slide_count_mismatch() {
        let p = presentation();
        let mut result = markdown_result("# Opening");
        result.metadata.slide_count = 7;
        assert!(!run("content-completeness", &result, &p).passed);
    }

    #[test]
    fn test_format_compliance_pdf_header() {
        let p = presentation();
        let mut pdf = ExportResult::new(
            b"%PDF-1.4 ...".to_vec(),
            "sprint-5-report.pdf",
            ExportFormat::Pdf,
            QualityTier::Medium,
            1,
        );
        assert!(run("format-compliance", &pdf, &p).passed);

        pdf.content = b"not a pdf".to_vec();
        assert!(!run("format-compliance", &pdf, &p).passed);
    }

    #[test]
    fn test_format_compliance_metrics_json() {
        let p = presentation();
        let json = ExportResult::new(
            b"{\"velocity\": 30}".to_vec(),
            "sprint-5-report.json",
            ExportFormat::Metrics,
            QualityTier::Medium,
            1,
        );
        assert!(run("format-compliance", &json, &p).passed);

        let broken = ExportResult::new(
            b"{broken".to_vec(),
            "sprint-5-report.json",
            ExportFormat::Metrics,
            QualityTier::Medium,
            1,
        );
        assert!(!run("format-compliance", &broken, &p).passed);
    }

    #[test]
    fn test_time_threshold() {
        let p = presentation();
        let mut result = markdown_result("# Opening");
        result.metadata.processing_time_ms = 1;
        assert!(run("time-threshold", &result, &p).passed);

        result.metadata.processing_time_ms = 10 * 60 * 1000;
        assert!(!run("time-threshold", &result, &p).passed);
    }

    #[test]
    fn test_accessibility_html_lang_and_alt() {
        let p = presentation();
        let good = ExportResult::new(
            b"<!DOCTYPE html><html lang=\"en\"><body><img src=x alt=\"chart\"></body></html>"
                .to_vec(),
            "sprint-5-report.html",
            ExportFormat::Html,
            QualityTier::Medium,
            1,
        );
        assert!(run("accessibility", &good, &p).passed);

        let missing_alt = ExportResult::new(
            b"<!DOCTYPE html><html lang=\"en\"><body><img src=x></body></html>".to_vec(),
            "sprint-5-report.html",
            ExportFormat::Html,
            QualityTier::Medium,
            1,
        );
        assert!(!run("accessibility", &missing_alt, &p).passed);
    }

    #[test]
    fn test_security_script_in_static_output() {
        let p = presentation();
        let result = ExportResult::new(
            b"<!DOCTYPE html><html lang=\"en\"><script>alert(1)</script></html>".to_vec(),
            "sprint-5-report.html",
            ExportFormat::Html,
            QualityTier::Medium,
            1,
        );
        assert!(!run("security", &result, &p).passed);
    }

    #[test]
    fn test_metadata_completeness_extension() {
        let p = presentation();
        let mut result = markdown_result("# Opening");
        assert!(run("metadata-completeness", &result, &p).passed);

        result.file_name = "report.pdf".to_string();
        assert!(!run("metadata-completeness", &result, &p).passed);
    }

    #[test]
    fn test_every_rule_has_a_recommendation() {
        for rule in QUALITY_RULES {
            assert!(
                RECOMMENDATIONS.iter().any(|(id, _)| *id == rule.id),
                "rule {} missing a recommendation entry",
                rule.id
            );
        }
    }
}
