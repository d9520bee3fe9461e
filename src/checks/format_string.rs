//! # C003: Non-literal Format String Check
//!
//! Flags printf-family calls whose format argument is not a quoted string
//! literal. A variable format argument lets attacker-controlled input
//! introduce `%n` and friends, reading or writing arbitrary memory.
//!
//! `sprintf`/`snprintf` are intentionally absent: their leading buffer
//! argument is never a literal, and the copy itself is already covered by
//! the dangerous-function catalogue.

use super::{create_finding, CallCheck};
use crate::parser::{AnalysisContext, CallExpression, FunctionDefinition};
use crate::report::{Finding, IssueKind, Severity};

/// printf-family callees and the argument position of their format string.
const FORMAT_FAMILY: &[(&str, usize)] = &[("printf", 0), ("fprintf", 1), ("syslog", 1)];

/// Check flagging non-literal format arguments.
pub struct FormatStringCheck;

impl CallCheck for FormatStringCheck {
    fn id(&self) -> &'static str {
        "C003"
    }

    fn name(&self) -> &'static str {
        "Non-literal Format String"
    }

    fn description(&self) -> &'static str {
        "Flags printf, fprintf and syslog calls whose format argument is \
         not a string literal, making the format attacker-influenceable."
    }

    fn inspect(
        &self,
        call: &CallExpression,
        scope: &FunctionDefinition,
        context: &AnalysisContext,
    ) -> Vec<Finding> {
        let format_position = match FORMAT_FAMILY
            .iter()
            .find(|(name, _)| *name == call.callee)
        {
            Some((_, position)) => *position,
            None => return Vec::new(),
        };

        let Some(fragment) = call.args.get(format_position) else {
            return Vec::new();
        };

        if fragment.trim_start().starts_with('"') {
            return Vec::new();
        }

        vec![create_finding(
            self.id(),
            IssueKind::FormatString,
            Severity::High,
            context,
            call,
            scope,
            format!("Potential format string vulnerability in {}()", call.callee),
            "Pass a literal format string and print variables through it",
            Some("CWE-134"),
        )]
    }
}
