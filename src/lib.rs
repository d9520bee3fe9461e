//! # c-sentinel Library
//!
//! A static analysis library for detecting insecure coding patterns in C
//! source code.
//!
//! The pipeline is a sequence of pure transformations: source text is
//! tokenized, the token stream is structurally parsed into a shallow
//! program model (functions and the calls inside them), and a catalogue
//! of checks walks that model to produce findings. Malformed or
//! non-standard C never aborts analysis; the tokenizer and parser recover
//! and report what they can.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and argument parsing
//! - [`lexer`] - Tokenizer for a practical subset of C
//! - [`parser`] - Permissive structural parser and analysis context
//! - [`checks`] - Security check implementations and the rule engine
//! - [`report`] - Findings, severity model, and report generation
//! - [`textscan`] - Regex-based fallback scanner
//!
//! ## Example
//!
//! ```rust,ignore
//! use c_sentinel::{analyze_source, Report};
//!
//! let findings = analyze_source("prog.c", source_text);
//! let report = Report::new(findings, PathBuf::from("prog.c"));
//! report.print_terminal();
//! ```

pub mod checks;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod textscan;

pub use checks::RuleEngine;
pub use cli::Cli;
pub use parser::AnalysisContext;
pub use report::{Finding, Report, Severity};

/// Runs the full structural pipeline on one source unit.
///
/// Tokenizes, parses, and evaluates all checks. Never fails: lexical
/// problems surface as Low-severity findings and unrecognized syntax is
/// skipped.
///
/// # Arguments
///
/// * `file_path` - Path identifier used in the findings
/// * `source_code` - Raw C source text
pub fn analyze_source(file_path: &str, source_code: String) -> Vec<Finding> {
    let context = AnalysisContext::from_source(file_path, source_code);
    RuleEngine::new().run_all(&context)
}
