//! # CLI Module
//!
//! This module defines the command-line interface for c-sentinel using
//! the `clap` derive macros for declarative argument parsing.
//!
//! ## Commands
//!
//! - `scan` - Analyze C source files for insecure coding patterns
//! - `list` - Display available checks and the dangerous-function table
//! - `version` - Show version information

use crate::report::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// c-sentinel command-line interface.
///
/// A static analysis security scanner for C source code. Detects
/// insecure library calls, unbounded reads, and format string misuse.
#[derive(Parser, Debug)]
#[command(name = "c-sentinel")]
#[command(version)]
#[command(about = "Static analysis security scanner for C source code")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the c-sentinel CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan C source files for insecure coding patterns.
    ///
    /// Analyzes `.c` and `.h` files for dangerous library calls,
    /// unbounded input reads, and format string vulnerabilities.
    Scan {
        /// Path to the file or directory to scan.
        ///
        /// If a directory is specified, all `.c` and `.h` files within it
        /// will be analyzed.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Scan directories recursively.
        ///
        /// When enabled, subdirectories will also be searched for C source files.
        #[arg(short, long, default_value_t = true)]
        recursive: bool,

        /// Output format for the security report.
        ///
        /// Supported formats:
        /// - `terminal`: Colorized console output (default)
        /// - `json`: Machine-readable JSON format
        /// - `markdown`: Human-readable Markdown report
        #[arg(short, long, default_value = "terminal")]
        format: String,

        /// Output directory for the Markdown report.
        ///
        /// If not specified, reports are printed to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum severity level to include in results.
        ///
        /// Valid values: critical, high, medium, low, info
        #[arg(short, long)]
        severity: Option<Severity>,

        /// Use the textual fallback scanner instead of structural analysis.
        ///
        /// Faster and more tolerant, but findings carry no enclosing
        /// function context.
        #[arg(short, long)]
        textual: bool,
    },

    /// List all available checks.
    ///
    /// Displays the ID, name, and description of each registered check
    /// and the dangerous-function catalogue.
    List,

    /// Print version information.
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    /// Verify that the CLI definition is valid.
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_parses_severity() {
        let cli = Cli::parse_from(["c-sentinel", "scan", "src", "--severity", "high"]);
        match cli.command {
            Commands::Scan { severity, .. } => assert_eq!(severity, Some(Severity::High)),
            _ => panic!("expected scan command"),
        }
    }
}
