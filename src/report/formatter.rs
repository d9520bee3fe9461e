//! Markdown rendering for [`Report`].

use super::{Report, Severity};

/// Renders a complete report as a Markdown document.
pub fn to_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("# Security Analysis Report\n\n");
    out.push_str(&format!(
        "- **Scanned path:** `{}`\n- **Files analyzed:** {}\n- **Tool version:** {}\n\n",
        report.metadata.scanned_path, report.metadata.files_analyzed, report.metadata.version
    ));

    out.push_str("## Summary\n\n");
    out.push_str("| Severity | Count |\n|----------|-------|\n");
    out.push_str(&format!("| Critical | {} |\n", report.summary.critical));
    out.push_str(&format!("| High | {} |\n", report.summary.high));
    out.push_str(&format!("| Medium | {} |\n", report.summary.medium));
    out.push_str(&format!("| Low | {} |\n", report.summary.low));
    out.push_str(&format!("| Info | {} |\n", report.summary.info));
    out.push_str(&format!("| **Total** | **{}** |\n\n", report.summary.total));

    if report.findings.is_empty() {
        out.push_str("No security issues found.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for (i, f) in report.findings.iter().enumerate() {
        out.push_str(&format!(
            "### {}. {} {} — {}\n\n",
            i + 1,
            severity_badge(f.severity),
            f.kind,
            f.check_id
        ));
        out.push_str(&format!("- **Location:** `{}:{}`\n", f.file_path, f.line));
        if let Some(ref function) = f.function {
            out.push_str(&format!("- **Function:** `{}`\n", function));
        }
        if let Some(ref cwe) = f.cwe {
            out.push_str(&format!("- **Reference:** {}\n", cwe));
        }
        out.push_str(&format!("\n{}\n", f.description));
        if let Some(ref snippet) = f.code_snippet {
            out.push_str(&format!("\n```c\n{}\n```\n", snippet));
        }
        out.push_str(&format!("\n**Recommendation:** {}\n\n", f.recommendation));
    }

    out
}

/// Returns a Markdown badge for the severity.
fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "![Critical](https://img.shields.io/badge/severity-CRITICAL-red)",
        Severity::High => "![High](https://img.shields.io/badge/severity-HIGH-orange)",
        Severity::Medium => "![Medium](https://img.shields.io/badge/severity-MEDIUM-yellow)",
        Severity::Low => "![Low](https://img.shields.io/badge/severity-LOW-blue)",
        Severity::Info => "![Info](https://img.shields.io/badge/severity-INFO-lightgrey)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Finding, IssueKind};
    use std::path::PathBuf;

    #[test]
    fn test_markdown_contains_summary_and_findings() {
        let findings = vec![Finding {
            check_id: "C001".to_string(),
            kind: IssueKind::CommandInjection,
            severity: Severity::Critical,
            file_path: "prog.c".to_string(),
            line: 42,
            function: Some("main".to_string()),
            description: "system() invoked".to_string(),
            recommendation: "Avoid shelling out".to_string(),
            code_snippet: Some("system(cmd)".to_string()),
            cwe: Some("CWE-78".to_string()),
        }];
        let md = Report::new(findings, PathBuf::from("prog.c")).to_markdown();

        assert!(md.contains("# Security Analysis Report"));
        assert!(md.contains("| Critical | 1 |"));
        assert!(md.contains("`prog.c:42`"));
        assert!(md.contains("CWE-78"));
    }

    #[test]
    fn test_markdown_empty_report() {
        let md = Report::new(Vec::new(), PathBuf::from("clean.c")).to_markdown();
        assert!(md.contains("No security issues found."));
    }
}
