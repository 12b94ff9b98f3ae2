//! Integration tests for the quality gate

use sprintdeck::core::quality::{GateStatus, QualityGate, QualityGateConfig, Severity};
use sprintdeck::domain::{
    ExportFormat, ExportOptions, ExportResult, Presentation, QualityTier, Slide, SlideContent,
    SlideKind,
};

fn presentation() -> Presentation {
    Presentation::new(
        "Sprint 31 Review",
        "Sprint 31",
        vec![
            Slide::new(
                "Opening",
                SlideKind::Title,
                0,
                SlideContent::Text("welcome".to_string()),
            ),
            Slide::new(
                "Wins",
                SlideKind::Summary,
                1,
                SlideContent::Text("we shipped".to_string()),
            ),
        ],
    )
}

fn markdown_result(content: &str) -> ExportResult {
    ExportResult::new(
        content.as_bytes().to_vec(),
        "sprint-31-report.md",
        ExportFormat::Markdown,
        QualityTier::Medium,
        2,
    )
}

#[test]
fn test_zero_failures_scores_100_and_passes() {
    let gate = QualityGate::default();
    let report = gate.validate(
        &markdown_result("# Opening\n# Wins\nbody"),
        &presentation(),
        &ExportOptions::new(ExportFormat::Markdown),
    );

    assert_eq!(report.score, 100.0);
    assert!(report.passed);
    assert_eq!(report.status, GateStatus::Passed);
    assert!(report.failing_rules().is_empty());
}

#[test]
fn test_single_critical_failure_never_passes() {
    let gate = QualityGate::default();

    // All info/warning rules healthy; only the payload is corrupt
    let mut result = markdown_result("# Opening\n# Wins\nbody");
    result.size_bytes += 1; // declared size no longer matches

    let report = gate.validate(
        &result,
        &presentation(),
        &ExportOptions::new(ExportFormat::Markdown),
    );

    assert_eq!(report.status, GateStatus::FailedCritical);
    assert!(!report.passed);
    // Even though the score may clear the threshold, the verdict is blocked
    assert!(report.score >= 80.0);
}

#[test]
fn test_warning_failures_degrade_score_without_blocking() {
    let gate = QualityGate::new(QualityGateConfig {
        max_size_bytes: 4, // everything trips the size rule
        ..Default::default()
    });

    let report = gate.validate(
        &markdown_result("# Opening\n# Wins\nbody"),
        &presentation(),
        &ExportOptions::new(ExportFormat::Markdown),
    );

    assert_eq!(report.status, GateStatus::PassedWithWarnings);
    assert!(report.score < 100.0);
    assert!(report.passed);

    let failing = report.failing_rules();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].rule_id, "size-threshold");
    assert_eq!(failing[0].severity, Severity::Warning);
}

#[test]
fn test_recommendations_map_to_failing_rules() {
    let gate = QualityGate::default();
    let report = gate.validate(
        &ExportResult::new(
            Vec::new(),
            "sprint-31-report.md",
            ExportFormat::Markdown,
            QualityTier::Medium,
            2,
        ),
        &presentation(),
        &ExportOptions::new(ExportFormat::Markdown),
    );

    assert!(!report.recommendations.is_empty());
    assert_eq!(report.recommendations.len(), report.failing_rules().len());
}

#[test]
fn test_html_accessibility_and_security_rules() {
    let gate = QualityGate::default();
    let p = presentation();

    let good_html =
        "<!DOCTYPE html><html lang=\"en\"><body><h1>Opening</h1><h1>Wins</h1></body></html>";
    let result = ExportResult::new(
        good_html.as_bytes().to_vec(),
        "sprint-31-report.html",
        ExportFormat::Html,
        QualityTier::Medium,
        2,
    );
    let report = gate.validate(&result, &p, &ExportOptions::new(ExportFormat::Html));
    assert_eq!(report.status, GateStatus::Passed);

    let scripted = ExportResult::new(
        b"<!DOCTYPE html><html lang=\"en\"><body><h1>Opening</h1><h1>Wins</h1><script>x()</script></body></html>".to_vec(),
        "sprint-31-report.html",
        ExportFormat::Html,
        QualityTier::Medium,
        2,
    );
    let report = gate.validate(&scripted, &p, &ExportOptions::new(ExportFormat::Html));
    assert_eq!(report.status, GateStatus::PassedWithWarnings);
    assert!(report
        .failing_rules()
        .iter()
        .any(|r| r.rule_id == "security"));
}

#[test]
fn test_gate_report_is_serializable() {
    let gate = QualityGate::default();
    let report = gate.validate(
        &markdown_result("# Opening\n# Wins"),
        &presentation(),
        &ExportOptions::new(ExportFormat::Markdown),
    );

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"score\""));
    assert!(json.contains("passed"));
}
