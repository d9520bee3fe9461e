//! # C002: Unbounded scanf Read Check
//!
//! Flags `scanf`-family calls whose format string uses a `%s` conversion
//! without a field width. Such a conversion reads an arbitrarily long
//! token into the destination buffer.
//!
//! The check looks only at the format argument's syntactic shape. A
//! non-literal format argument is not judged here (that is the format-
//! string check's territory for the printf family).

use super::{create_finding, CallCheck};
use crate::parser::{AnalysisContext, CallExpression, FunctionDefinition};
use crate::report::{Finding, IssueKind, Severity};

/// scanf-family callees and the argument position of their format string.
const SCANF_FAMILY: &[(&str, usize)] = &[("scanf", 0), ("fscanf", 1), ("sscanf", 1)];

/// Check flagging `%s` conversions without a field width.
pub struct UnboundedScanfCheck;

impl CallCheck for UnboundedScanfCheck {
    fn id(&self) -> &'static str {
        "C002"
    }

    fn name(&self) -> &'static str {
        "Unbounded scanf Read"
    }

    fn description(&self) -> &'static str {
        "Flags scanf, fscanf and sscanf calls whose format string contains \
         a %s conversion without a field width, allowing input to overrun \
         the destination buffer."
    }

    fn inspect(
        &self,
        call: &CallExpression,
        scope: &FunctionDefinition,
        context: &AnalysisContext,
    ) -> Vec<Finding> {
        let format_position = match SCANF_FAMILY
            .iter()
            .find(|(name, _)| *name == call.callee)
        {
            Some((_, position)) => *position,
            None => return Vec::new(),
        };

        let Some(fragment) = call.args.get(format_position) else {
            return Vec::new();
        };

        if !has_unbounded_string_conversion(fragment) {
            return Vec::new();
        }

        vec![create_finding(
            self.id(),
            IssueKind::UnboundedRead,
            Severity::Medium,
            context,
            call,
            scope,
            format!(
                "{}() with %s format specifier without width limit",
                call.callee
            ),
            "Use a field width specifier like %255s or use fgets() instead",
            Some("CWE-120"),
        )]
    }
}

/// Returns `true` if the fragment contains a `%s` conversion with no
/// width digits between the `%` and the `s`.
fn has_unbounded_string_conversion(fragment: &str) -> bool {
    let bytes = fragment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let mut j = i + 1;
            let mut has_width = false;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                has_width = true;
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b's' && !has_width {
                return true;
            }
            i = j.max(i + 1);
        } else {
            i += 1;
        }
    }
    false
}
