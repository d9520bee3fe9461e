//! # C001: Dangerous Function Call Check
//!
//! Flags calls to C library functions that are unsafe by construction:
//! unbounded string copies and shell/exec invocations. The catalogue is a
//! static table keyed by exact callee name, so `mystrcpy` or other
//! lookalike names never match.
//!
//! Bounded variants (`strncpy`, `strncat`, `snprintf`, `fgets`) are not
//! in the table and therefore never produce findings.

use super::{create_finding, CallCheck};
use crate::parser::{AnalysisContext, CallExpression, FunctionDefinition};
use crate::report::{Finding, IssueKind, Severity};

/// One entry of the dangerous-function catalogue.
///
/// Immutable, process-wide data; holds no resources.
#[derive(Debug, Clone, Copy)]
pub struct DangerousCall {
    /// Exact callee name that triggers the entry.
    pub name: &'static str,

    /// Severity assigned to a match.
    pub severity: Severity,

    /// Issue classification assigned to a match.
    pub kind: IssueKind,

    /// Description of the weakness.
    pub message: &'static str,

    /// Remediation guidance.
    pub recommendation: &'static str,

    /// CWE reference.
    pub cwe: &'static str,
}

/// Static catalogue of dangerous C library functions.
pub const DANGEROUS_CALLS: &[DangerousCall] = &[
    DangerousCall {
        name: "gets",
        severity: Severity::Critical,
        kind: IssueKind::BufferOverflow,
        message: "Use of dangerous function gets() can cause buffer overflow",
        recommendation: "Use fgets() with proper buffer size instead",
        cwe: "CWE-242",
    },
    DangerousCall {
        name: "strcpy",
        severity: Severity::High,
        kind: IssueKind::BufferOverflow,
        message: "Use of strcpy() can cause buffer overflow",
        recommendation: "Use strncpy() or strlcpy() with proper bounds checking",
        cwe: "CWE-120",
    },
    DangerousCall {
        name: "strcat",
        severity: Severity::High,
        kind: IssueKind::BufferOverflow,
        message: "Use of strcat() can cause buffer overflow",
        recommendation: "Use strncat() or strlcat() with proper bounds checking",
        cwe: "CWE-120",
    },
    DangerousCall {
        name: "sprintf",
        severity: Severity::High,
        kind: IssueKind::BufferOverflow,
        message: "Use of sprintf() can cause buffer overflow",
        recommendation: "Use snprintf() with proper buffer size",
        cwe: "CWE-120",
    },
    DangerousCall {
        name: "system",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of system() can lead to command injection",
        recommendation: "Use execve() family functions with proper input validation",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "popen",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of popen() can lead to command injection",
        recommendation: "Use safer alternatives with proper input validation",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "exec",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of exec*() functions can be dangerous with user input",
        recommendation: "Validate and sanitize all input before using exec functions",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execl",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of execl() can be dangerous with user input",
        recommendation: "Validate and sanitize all input",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execlp",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of execlp() can be dangerous with user input",
        recommendation: "Validate and sanitize all input",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execle",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of execle() can be dangerous with user input",
        recommendation: "Validate and sanitize all input",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execv",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of execv() can be dangerous with user input",
        recommendation: "Validate and sanitize all input",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execvp",
        severity: Severity::Critical,
        kind: IssueKind::CommandInjection,
        message: "Use of execvp() can be dangerous with user input",
        recommendation: "Validate and sanitize all input",
        cwe: "CWE-78",
    },
    DangerousCall {
        name: "execve",
        severity: Severity::Medium,
        kind: IssueKind::CommandInjection,
        message: "Use of execve() - ensure proper input validation",
        recommendation: "This is safer than other exec functions but still validate input",
        cwe: "CWE-78",
    },
];

/// Looks up a callee name in the catalogue. Exact match only.
pub fn lookup_dangerous(name: &str) -> Option<&'static DangerousCall> {
    DANGEROUS_CALLS.iter().find(|entry| entry.name == name)
}

/// Check flagging calls to catalogued dangerous functions.
pub struct DangerousCallCheck;

impl CallCheck for DangerousCallCheck {
    fn id(&self) -> &'static str {
        "C001"
    }

    fn name(&self) -> &'static str {
        "Dangerous Function Call"
    }

    fn description(&self) -> &'static str {
        "Flags calls to C library functions that cannot be used safely with \
         untrusted input: unbounded string copies (gets, strcpy, strcat, \
         sprintf) and command execution (system, popen, exec family)."
    }

    fn inspect(
        &self,
        call: &CallExpression,
        scope: &FunctionDefinition,
        context: &AnalysisContext,
    ) -> Vec<Finding> {
        match lookup_dangerous(&call.callee) {
            Some(entry) => vec![create_finding(
                self.id(),
                entry.kind,
                entry.severity,
                context,
                call,
                scope,
                entry.message.to_string(),
                entry.recommendation,
                Some(entry.cwe),
            )],
            None => Vec::new(),
        }
    }
}
