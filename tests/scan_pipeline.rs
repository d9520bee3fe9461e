//! End-to-end pipeline tests over the bundled C samples.

use c_sentinel::report::IssueKind;
use c_sentinel::textscan::TextScanner;
use c_sentinel::{analyze_source, Finding, Severity};

const VULNERABLE: &str = include_str!("samples/vulnerable.c");
const SAFE: &str = include_str!("samples/safe.c");

fn analyze_vulnerable() -> Vec<Finding> {
    analyze_source("vulnerable.c", VULNERABLE.to_string())
}

#[test]
fn vulnerable_sample_flags_every_construct() {
    let findings = analyze_vulnerable();

    let gets: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.code_snippet.as_deref().map_or(false, |s| s.starts_with("gets")))
        .collect();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].severity, Severity::Critical);
    assert_eq!(gets[0].kind, IssueKind::BufferOverflow);
    assert_eq!(gets[0].line, 10);
    assert_eq!(gets[0].function.as_deref(), Some("handle_request"));

    let high_overflows = findings
        .iter()
        .filter(|f| f.kind == IssueKind::BufferOverflow && f.severity == Severity::High)
        .count();
    // strcpy, strcat, sprintf
    assert_eq!(high_overflows, 3);

    let unbounded: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.kind == IssueKind::UnboundedRead)
        .collect();
    assert_eq!(unbounded.len(), 1);
    assert_eq!(unbounded[0].severity, Severity::Medium);

    let injections = findings
        .iter()
        .filter(|f| f.kind == IssueKind::CommandInjection)
        .count();
    // system x2, popen, execl
    assert_eq!(injections, 4);
    assert!(findings
        .iter()
        .filter(|f| f.kind == IssueKind::CommandInjection)
        .all(|f| f.severity == Severity::Critical));

    let format: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.kind == IssueKind::FormatString)
        .collect();
    assert_eq!(format.len(), 1);
    assert_eq!(format[0].severity, Severity::High);
    assert_eq!(format[0].line, 30);
    assert_eq!(format[0].function.as_deref(), Some("main"));
}

#[test]
fn vulnerable_sample_findings_in_source_order() {
    let findings = analyze_vulnerable();
    let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted, "findings should follow source order");
}

#[test]
fn safe_sample_is_clean() {
    let findings = analyze_source("safe.c", SAFE.to_string());
    assert!(
        findings.is_empty(),
        "safe sample should produce no findings, got: {:?}",
        findings
    );
}

#[test]
fn safe_sample_is_clean_in_textual_mode() {
    let findings = TextScanner::new().scan("safe.c", SAFE);
    assert!(
        findings.is_empty(),
        "safe sample should produce no textual findings, got: {:?}",
        findings
    );
}

#[test]
fn textual_mode_covers_the_same_constructs() {
    let findings = TextScanner::new().scan("vulnerable.c", VULNERABLE);

    for kind in [
        IssueKind::BufferOverflow,
        IssueKind::CommandInjection,
        IssueKind::UnboundedRead,
        IssueKind::FormatString,
    ] {
        assert!(
            findings.iter().any(|f| f.kind == kind),
            "textual scan missing kind {:?}",
            kind
        );
    }

    assert!(findings.iter().all(|f| f.function.is_none()));
}

#[test]
fn pipeline_is_idempotent() {
    let first = serde_json::to_string(&analyze_vulnerable()).unwrap();
    let second = serde_json::to_string(&analyze_vulnerable()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn severity_filter_drops_lower_findings() {
    let report = c_sentinel::Report::new(
        analyze_vulnerable(),
        std::path::PathBuf::from("vulnerable.c"),
    );
    let kept: Vec<&Finding> = report.findings_at_or_above(Severity::High).collect();
    assert!(kept.iter().all(|f| f.severity >= Severity::High));
    assert!(kept.len() < report.findings.len());
    assert!(kept.iter().all(|f| f.kind != IssueKind::UnboundedRead));
}
