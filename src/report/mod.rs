//! # Report Generation Module
//!
//! Collects findings into a report with summary statistics and renders it
//! as terminal output, Markdown, or JSON.
//!
//! ## Key Types
//!
//! - [`Report`] - Complete security analysis report
//! - [`Finding`] - Individual security finding
//! - [`Severity`] - Severity classification for findings

mod finding;
mod formatter;

pub use finding::{Finding, IssueKind, ParseSeverityError, Severity};

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete security analysis report.
///
/// Contains metadata about the scan, all findings in the order they were
/// produced, and summary statistics. A pure function of its input: the
/// same findings always yield the same report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the scan operation.
    pub metadata: ReportMetadata,

    /// All findings from the analysis, in encounter order.
    pub findings: Vec<Finding>,

    /// Summary statistics by severity.
    pub summary: ReportSummary,
}

/// Metadata about the scan operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Tool version used for the scan.
    pub version: String,

    /// Path that was scanned.
    pub scanned_path: String,

    /// Number of files analyzed.
    pub files_analyzed: usize,
}

/// Summary of findings by severity level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Count of critical severity findings.
    pub critical: usize,

    /// Count of high severity findings.
    pub high: usize,

    /// Count of medium severity findings.
    pub medium: usize,

    /// Count of low severity findings.
    pub low: usize,

    /// Count of informational findings.
    pub info: usize,

    /// Total count of all findings.
    pub total: usize,
}

impl Report {
    /// Creates a new report from a collection of findings.
    ///
    /// Automatically calculates summary statistics from the findings.
    /// The findings keep the order they were handed in; the rule engine
    /// produces them in source encounter order.
    ///
    /// # Arguments
    ///
    /// * `findings` - Vector of security findings
    /// * `scanned_path` - Path that was analyzed
    ///
    /// # Returns
    ///
    /// A fully populated `Report` instance.
    pub fn new(findings: Vec<Finding>, scanned_path: PathBuf) -> Self {
        let summary = ReportSummary::from_findings(&findings);

        let metadata = ReportMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            scanned_path: scanned_path.display().to_string(),
            files_analyzed: findings
                .iter()
                .map(|f| &f.file_path)
                .collect::<std::collections::HashSet<_>>()
                .len(),
        };

        Self {
            metadata,
            findings,
            summary,
        }
    }

    /// Returns the findings at or above a minimum severity.
    ///
    /// Original order is preserved.
    pub fn findings_at_or_above(&self, min: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity >= min)
    }

    /// Prints colorized output to the terminal.
    ///
    /// Displays each finding with appropriate color coding based on severity.
    pub fn print_terminal(&self) {
        if self.findings.is_empty() {
            println!("\n{}", "[+] No security issues found.".green().bold());
            return;
        }

        println!("\n{}", "[!] Security Findings:".red().bold());
        println!("{}", "=".repeat(60).cyan());

        for (i, finding) in self.findings.iter().enumerate() {
            finding.print_terminal(i + 1);
        }
    }

    /// Prints summary statistics to the terminal.
    pub fn print_summary(&self) {
        println!(
            "{}",
            format!(
                "[*] Summary: {} Critical | {} High | {} Medium | {} Low | {} Info",
                self.summary.critical,
                self.summary.high,
                self.summary.medium,
                self.summary.low,
                self.summary.info
            )
            .bold()
        );

        if self.summary.total == 0 {
            println!("{}", "[+] No issues found.".green().bold());
        } else {
            let message = format!("[!] Total: {} issue(s) found", self.summary.total);
            if self.summary.critical > 0 {
                println!("{}", message.red().bold());
            } else if self.summary.high > 0 {
                println!("{}", message.yellow().bold());
            } else {
                println!("{}", message.blue().bold());
            }
        }
    }

    /// Converts the report to Markdown format.
    ///
    /// # Returns
    ///
    /// A Markdown-formatted string representation of the report.
    pub fn to_markdown(&self) -> String {
        formatter::to_markdown(self)
    }
}

impl ReportSummary {
    /// Creates a summary from a collection of findings.
    fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = ReportSummary {
            critical: 0,
            high: 0,
            medium: 0,
            low: 0,
            info: 0,
            total: findings.len(),
        };

        for finding in findings {
            match finding.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity, line: usize) -> Finding {
        Finding {
            check_id: "C001".to_string(),
            kind: IssueKind::BufferOverflow,
            severity,
            file_path: "test.c".to_string(),
            line,
            function: Some("main".to_string()),
            description: "Test description".to_string(),
            recommendation: "Fix it".to_string(),
            code_snippet: None,
            cwe: Some("CWE-120".to_string()),
        }
    }

    #[test]
    fn test_report_creation() {
        let report = Report::new(vec![finding(Severity::High, 10)], PathBuf::from("./test"));

        assert_eq!(report.summary.high, 1);
        assert_eq!(report.summary.total, 1);
    }

    #[test]
    fn test_summary_counts_all_levels() {
        let findings = vec![
            finding(Severity::Critical, 1),
            finding(Severity::High, 2),
            finding(Severity::High, 3),
            finding(Severity::Medium, 4),
            finding(Severity::Low, 5),
        ];
        let report = Report::new(findings, PathBuf::from("./test"));

        assert_eq!(report.summary.critical, 1);
        assert_eq!(report.summary.high, 2);
        assert_eq!(report.summary.medium, 1);
        assert_eq!(report.summary.low, 1);
        assert_eq!(report.summary.info, 0);
        assert_eq!(report.summary.total, 5);
    }

    #[test]
    fn test_min_severity_filter_preserves_order() {
        let findings = vec![
            finding(Severity::Low, 1),
            finding(Severity::Critical, 2),
            finding(Severity::Medium, 3),
            finding(Severity::High, 4),
        ];
        let report = Report::new(findings, PathBuf::from("./test"));

        let lines: Vec<usize> = report
            .findings_at_or_above(Severity::Medium)
            .map(|f| f.line)
            .collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }
}
