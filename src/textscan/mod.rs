//! # Textual Fallback Scanner
//!
//! Line-oriented regex scan over the same dangerous-function vocabulary
//! as the structural engine, for callers that do not want structural
//! analysis. No program model is built, so enclosing-function context is
//! absent from its findings; kind, severity, message and recommendation
//! match the structural engine so the two outputs are interchangeable.

use crate::checks::{DangerousCall, DANGEROUS_CALLS};
use crate::report::{Finding, IssueKind, Severity};
use regex::Regex;

/// Precompiled pattern set for the fallback scan.
pub struct TextScanner {
    dangerous: Vec<(&'static DangerousCall, Regex)>,
    unbounded_scanf: Regex,
    scanf_width: Regex,
    printf_variable: Regex,
    stream_format_variable: Regex,
}

impl TextScanner {
    /// Compiles the pattern set.
    ///
    /// Patterns are hard-coded and compile unconditionally.
    pub fn new() -> Self {
        let dangerous = DANGEROUS_CALLS
            .iter()
            .map(|entry| {
                let pattern = format!(r"\b{}\s*\(", entry.name);
                (entry, Regex::new(&pattern).expect("static pattern"))
            })
            .collect();

        Self {
            dangerous,
            unbounded_scanf: Regex::new(r"\b(?:f|s)?scanf\s*\([^)]*%s").expect("static pattern"),
            scanf_width: Regex::new(r"%\d+s").expect("static pattern"),
            printf_variable: Regex::new(r#"\b(printf)\s*\(\s*[^")\s]"#).expect("static pattern"),
            stream_format_variable: Regex::new(r#"\b(fprintf|syslog)\s*\([^,()]+,\s*[^")\s]"#)
                .expect("static pattern"),
        }
    }

    /// Scans raw source text line by line.
    ///
    /// Blank lines and lines starting with a comment are skipped; findings
    /// carry no function context.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path identifier used in the findings
    /// * `source` - Raw C source text
    pub fn scan(&self, file_path: &str, source: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with("/*") {
                continue;
            }

            for (entry, pattern) in &self.dangerous {
                if pattern.is_match(line) {
                    findings.push(self.finding(
                        "C001",
                        entry.kind,
                        entry.severity,
                        file_path,
                        line_number,
                        line,
                        entry.message.to_string(),
                        entry.recommendation,
                        Some(entry.cwe),
                    ));
                }
            }

            if self.unbounded_scanf.is_match(line) && !self.scanf_width.is_match(line) {
                findings.push(self.finding(
                    "C002",
                    IssueKind::UnboundedRead,
                    Severity::Medium,
                    file_path,
                    line_number,
                    line,
                    "scanf() with %s format specifier without width limit".to_string(),
                    "Use a field width specifier like %255s or use fgets() instead",
                    Some("CWE-120"),
                ));
            }

            let format_callee = self
                .printf_variable
                .captures(line)
                .or_else(|| self.stream_format_variable.captures(line))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());
            if let Some(callee) = format_callee {
                findings.push(self.finding(
                    "C003",
                    IssueKind::FormatString,
                    Severity::High,
                    file_path,
                    line_number,
                    line,
                    format!("Potential format string vulnerability in {}()", callee),
                    "Pass a literal format string and print variables through it",
                    Some("CWE-134"),
                ));
            }
        }

        findings
    }

    #[allow(clippy::too_many_arguments)]
    fn finding(
        &self,
        check_id: &str,
        kind: IssueKind,
        severity: Severity,
        file_path: &str,
        line: usize,
        snippet: &str,
        description: String,
        recommendation: &str,
        cwe: Option<&'static str>,
    ) -> Finding {
        Finding {
            check_id: check_id.to_string(),
            kind,
            severity,
            file_path: file_path.to_string(),
            line,
            function: None,
            description,
            recommendation: recommendation.to_string(),
            code_snippet: Some(snippet.to_string()),
            cwe: cwe.map(|s| s.to_string()),
        }
    }
}

impl Default for TextScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Finding> {
        TextScanner::new().scan("test.c", source)
    }

    #[test]
    fn test_dangerous_call_matched_by_pattern() {
        let findings = scan("    gets(buffer);\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, IssueKind::BufferOverflow);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0].function.is_none());
    }

    #[test]
    fn test_comment_lines_skipped() {
        let findings = scan("// gets(buffer);\n/* strcpy(d, s); */\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_word_boundary_excludes_lookalikes() {
        let findings = scan("mystrcpy(d, s);\nfgets(b, n, stdin);\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unbounded_scanf_pattern() {
        assert_eq!(scan("scanf(\"%s\", b);").len(), 1);
        assert!(scan("scanf(\"%255s\", b);").is_empty());
    }

    #[test]
    fn test_printf_variable_format() {
        let findings = scan("printf(fmt);");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, IssueKind::FormatString);
    }

    #[test]
    fn test_printf_literal_format_clean() {
        assert!(scan("printf(\"ok\\n\");").is_empty());
    }

    #[test]
    fn test_fprintf_literal_second_argument_clean() {
        assert!(scan("fprintf(stderr, \"count: %d\\n\", n);").is_empty());
        assert_eq!(scan("fprintf(stderr, msg);").len(), 1);
    }

    #[test]
    fn test_same_vocabulary_as_structural_engine() {
        let source = "void f() { system(cmd); }";
        let textual = scan(source);
        let context = crate::parser::AnalysisContext::from_source("test.c", source.to_string());
        let structural = crate::checks::RuleEngine::new().run_all(&context);

        assert_eq!(textual.len(), 1);
        assert_eq!(structural.len(), 1);
        assert_eq!(textual[0].kind, structural[0].kind);
        assert_eq!(textual[0].severity, structural[0].severity);
        assert_eq!(textual[0].description, structural[0].description);
        assert_eq!(textual[0].recommendation, structural[0].recommendation);
    }
}
