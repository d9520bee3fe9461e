//! # Security Check Module
//!
//! This module provides the framework for call-site security checks and
//! contains the implementations of all built-in checks.
//!
//! ## Architecture
//!
//! All checks implement the [`CallCheck`] trait and are registered with
//! the [`RuleEngine`]. The engine walks the recovered program model in
//! encounter order (functions in source order, calls in body order, the
//! global pseudo-function last) and applies every check to every call, so
//! the finding sequence is stable and matches the source layout.
//!
//! ## Available Checks
//!
//! | ID | Name | Severity |
//! |----|------|----------|
//! | C001 | Dangerous Function Call | per function (Critical/High/Medium) |
//! | C002 | Unbounded scanf Read | Medium |
//! | C003 | Non-literal Format String | High |
//!
//! Lexical warnings from the tokenizer are surfaced under the reserved id
//! C000 at Low severity.

mod dangerous_call;
mod format_string;
mod unbounded_scanf;

pub use dangerous_call::{lookup_dangerous, DangerousCall, DangerousCallCheck, DANGEROUS_CALLS};
pub use format_string::FormatStringCheck;
pub use unbounded_scanf::UnboundedScanfCheck;

use crate::lexer::LexWarningKind;
use crate::parser::{AnalysisContext, CallExpression, FunctionDefinition};
use crate::report::{Finding, IssueKind, Severity};

/// Trait for implementing call-site security checks.
///
/// Checks are stateless; each call expression is judged independently.
/// There is deliberately no data-flow or taint tracking across
/// statements, so a check cannot know whether a buffer was bounds-checked
/// earlier in the function.
pub trait CallCheck: Send + Sync {
    /// Returns the unique identifier for this check.
    ///
    /// Format: "Cnnn" where nnn is a zero-padded number (e.g., "C001").
    fn id(&self) -> &'static str;

    /// Returns the human-readable name of the check.
    fn name(&self) -> &'static str;

    /// Returns a description of what this check looks for.
    fn description(&self) -> &'static str;

    /// Inspects one call expression.
    ///
    /// # Arguments
    ///
    /// * `call` - The call expression to judge
    /// * `scope` - The function definition owning the call
    /// * `context` - The surrounding analysis context
    ///
    /// # Returns
    ///
    /// Findings for this call, usually zero or one.
    fn inspect(
        &self,
        call: &CallExpression,
        scope: &FunctionDefinition,
        context: &AnalysisContext,
    ) -> Vec<Finding>;
}

/// Registry containing all available checks.
///
/// # Example
///
/// ```rust,ignore
/// let engine = RuleEngine::new();
/// let findings = engine.run_all(&context);
/// ```
pub struct RuleEngine {
    checks: Vec<Box<dyn CallCheck>>,
}

impl RuleEngine {
    /// Creates a new engine with all built-in checks.
    pub fn new() -> Self {
        let checks: Vec<Box<dyn CallCheck>> = vec![
            Box::new(DangerousCallCheck),
            Box::new(UnboundedScanfCheck),
            Box::new(FormatStringCheck),
        ];

        Self { checks }
    }

    /// Returns a reference to all registered checks.
    pub fn checks(&self) -> &[Box<dyn CallCheck>] {
        &self.checks
    }

    /// Runs every check against the given context.
    ///
    /// Lexical warnings are converted to Low-severity findings first;
    /// call findings follow in encounter order.
    ///
    /// # Arguments
    ///
    /// * `context` - The analysis context to scan
    ///
    /// # Returns
    ///
    /// All findings, in a stable order for identical input.
    pub fn run_all(&self, context: &AnalysisContext) -> Vec<Finding> {
        let mut findings = lexical_findings(context);

        for scope in context.model.scopes() {
            for call in &scope.calls {
                for check in &self.checks {
                    findings.extend(check.inspect(call, scope, context));
                }
            }
        }

        findings
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts the tokenizer's warnings into Low-severity findings.
fn lexical_findings(context: &AnalysisContext) -> Vec<Finding> {
    context
        .lex_warnings
        .iter()
        .map(|warning| {
            let (kind, description, recommendation) = match warning.kind {
                LexWarningKind::UnterminatedComment => (
                    IssueKind::UnterminatedComment,
                    "Block comment is not closed before end of input",
                    "Close the comment with */; analysis of the remainder is partial",
                ),
                LexWarningKind::UnterminatedString => (
                    IssueKind::UnterminatedString,
                    "String literal is not closed before end of line",
                    "Close the string literal; analysis continued best-effort",
                ),
            };
            Finding {
                check_id: "C000".to_string(),
                kind,
                severity: Severity::Low,
                file_path: context.file_path.clone(),
                line: warning.line,
                function: None,
                description: description.to_string(),
                recommendation: recommendation.to_string(),
                code_snippet: context
                    .get_source_line(warning.line)
                    .map(|l| l.trim().to_string()),
                cwe: None,
            }
        })
        .collect()
}

/// Helper to create a finding for a flagged call.
///
/// Standardizes snippet extraction and field population so every check
/// reports the same shape.
#[allow(clippy::too_many_arguments)]
pub fn create_finding(
    check_id: &str,
    kind: IssueKind,
    severity: Severity,
    context: &AnalysisContext,
    call: &CallExpression,
    scope: &FunctionDefinition,
    description: String,
    recommendation: &str,
    cwe: Option<&'static str>,
) -> Finding {
    Finding {
        check_id: check_id.to_string(),
        kind,
        severity,
        file_path: context.file_path.clone(),
        line: call.line,
        function: Some(scope.name.clone()),
        description,
        recommendation: recommendation.to_string(),
        code_snippet: context
            .get_source_line(call.line)
            .map(|l| l.trim().to_string())
            .or_else(|| Some(call.snippet())),
        cwe: cwe.map(|s| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<Finding> {
        let context = AnalysisContext::from_source("test.c", source.to_string());
        RuleEngine::new().run_all(&context)
    }

    #[test]
    fn test_engine_creation() {
        let engine = RuleEngine::new();
        assert!(!engine.checks().is_empty());
    }

    #[test]
    fn test_check_ids_unique() {
        let engine = RuleEngine::new();
        let mut ids: Vec<_> = engine.checks().iter().map(|c| c.id()).collect();
        let len_before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len_before, "Check IDs must be unique");
    }

    #[test]
    fn test_findings_in_encounter_order() {
        let findings = run(
            "void a() {\n  strcpy(d, s);\n  gets(buf);\n}\nvoid b() {\n  system(cmd);\n}\n",
        );
        let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3, 6]);
        assert_eq!(findings[0].function.as_deref(), Some("a"));
        assert_eq!(findings[2].function.as_deref(), Some("b"));
    }

    #[test]
    fn test_global_calls_attributed_to_global() {
        let findings = run("int unused = system(cmd);\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].function.as_deref(), Some("global"));
    }

    #[test]
    fn test_lexical_warning_becomes_low_finding() {
        let findings = run("void f() { gets(s); } /* open");
        assert_eq!(findings[0].kind, IssueKind::UnterminatedComment);
        assert_eq!(findings[0].severity, Severity::Low);
        assert_eq!(findings[0].check_id, "C000");
        assert!(findings.iter().any(|f| f.kind == IssueKind::BufferOverflow));
    }

    #[test]
    fn test_idempotent_output() {
        let source = "void f() {\n  gets(s);\n  printf(fmt);\n  scanf(\"%s\", b);\n}\n";
        let first = format!("{:?}", run(source));
        let second = format!("{:?}", run(source));
        assert_eq!(first, second);
    }
}
