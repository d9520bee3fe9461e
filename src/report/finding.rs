//! # Finding and Severity Definitions
//!
//! Defines the core data structures for representing security findings
//! and their severity classification.

use colored::*;
use serde::{Deserialize, Serialize};

/// Severity level classification for security findings.
///
/// Ordered from lowest to highest severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, no direct security impact.
    Info = 0,

    /// Low severity, minimal security impact.
    Low = 1,

    /// Medium severity, moderate security impact.
    Medium = 2,

    /// High severity, significant security impact.
    High = 3,

    /// Critical severity, severe security impact.
    Critical = 4,
}

impl Severity {
    /// Parses a severity level from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of severity
    ///
    /// # Returns
    ///
    /// The corresponding `Severity` variant, defaulting to `Info` for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Info,
        }
    }

    /// Returns a colored label for terminal output.
    pub fn colored_label(&self) -> ColoredString {
        match self {
            Severity::Critical => "CRITICAL".white().on_red().bold(),
            Severity::High => "HIGH".black().on_yellow().bold(),
            Severity::Medium => "MEDIUM".white().on_bright_blue().bold(),
            Severity::Low => "LOW".black().on_white().bold(),
            Severity::Info => "INFO".black().on_bright_white(),
        }
    }

    /// Returns a text indicator for the severity.
    pub fn indicator(&self) -> &'static str {
        match self {
            Severity::Critical => "[!!]",
            Severity::High => "[!]",
            Severity::Medium => "[~]",
            Severity::Low => "[-]",
            Severity::Info => "[i]",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical"),
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::Info => write!(f, "Info"),
        }
    }
}

/// Error returned when a severity string cannot be recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown severity '{0}', expected one of: critical, high, medium, low, info")]
pub struct ParseSeverityError(String);

impl std::str::FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" => Ok(Severity::Info),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Classification of the coding pattern behind a finding.
///
/// The structural engine and the textual fallback share this vocabulary,
/// so their outputs are interchangeable for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Unbounded copy into a fixed-size buffer.
    BufferOverflow,

    /// Shell or exec invocation reachable from input.
    CommandInjection,

    /// Input read without a width limit.
    UnboundedRead,

    /// Attacker-influenceable format argument.
    FormatString,

    /// Block comment left open at end of input.
    UnterminatedComment,

    /// String literal left open at end of line.
    UnterminatedString,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::BufferOverflow => write!(f, "BufferOverflow"),
            IssueKind::CommandInjection => write!(f, "CommandInjection"),
            IssueKind::UnboundedRead => write!(f, "UnboundedRead"),
            IssueKind::FormatString => write!(f, "FormatString"),
            IssueKind::UnterminatedComment => write!(f, "UnterminatedComment"),
            IssueKind::UnterminatedString => write!(f, "UnterminatedString"),
        }
    }
}

/// Represents a security finding from static analysis.
///
/// Contains all information needed to understand, locate, and remediate
/// a detected weakness. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// ID of the check that produced this finding (e.g., "C001").
    pub check_id: String,

    /// Classification of the detected pattern.
    pub kind: IssueKind,

    /// Severity classification.
    pub severity: Severity,

    /// Path to the file containing the weakness.
    pub file_path: String,

    /// Line number where the weakness was detected.
    pub line: usize,

    /// Enclosing function name, `"global"` for file scope.
    ///
    /// `None` when the producer cannot recover function context
    /// (the textual fallback scanner).
    pub function: Option<String>,

    /// Description of the weakness.
    pub description: String,

    /// Remediation guidance for fixing the weakness.
    pub recommendation: String,

    /// Optional code snippet showing the flagged call.
    pub code_snippet: Option<String>,

    /// CWE (Common Weakness Enumeration) identifier if applicable.
    pub cwe: Option<String>,
}

impl Finding {
    /// Prints the finding to terminal with color formatting.
    ///
    /// # Arguments
    ///
    /// * `index` - The finding number for display.
    pub fn print_terminal(&self, index: usize) {
        println!();
        println!(
            "{} {} [{}] {}",
            format!("#{}", index).cyan().bold(),
            self.severity.colored_label(),
            self.check_id.yellow(),
            self.kind.to_string().white().bold()
        );

        println!(
            "   {} {}:{}",
            "Location:".dimmed(),
            self.file_path.blue(),
            self.line.to_string().cyan()
        );

        if let Some(ref function) = self.function {
            println!("   {} {}", "Function:".dimmed(), function.white());
        }

        for line in self.description.lines() {
            println!("   {}", line.dimmed());
        }

        if let Some(ref snippet) = self.code_snippet {
            println!("\n   {}", "Code:".yellow());
            for line in snippet.lines() {
                println!("   {}", line.bright_white());
            }
        }

        if let Some(ref cwe) = self.cwe {
            println!("   {} {}", "Reference:".dimmed(), cwe.blue());
        }

        println!("\n   {}", "Recommendation:".green());
        for line in self.recommendation.lines().take(3) {
            println!("   {}", line.green().dimmed());
        }

        println!("{}", "-".repeat(60).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!(Severity::from_str("critical"), Severity::Critical);
        assert_eq!(Severity::from_str("HIGH"), Severity::High);
        assert_eq!(Severity::from_str("unknown"), Severity::Info);
    }

    #[test]
    fn test_severity_parse_strict() {
        assert!("medium".parse::<Severity>().is_ok());
        assert!("bogus".parse::<Severity>().is_err());
    }

    #[test]
    fn test_issue_kind_display() {
        assert_eq!(IssueKind::BufferOverflow.to_string(), "BufferOverflow");
        assert_eq!(IssueKind::UnboundedRead.to_string(), "UnboundedRead");
    }
}
