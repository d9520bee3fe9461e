//! # c-sentinel CLI Entry Point
//!
//! This module provides the main entry point for the c-sentinel
//! command-line security scanner.

use anyhow::Result;
use c_sentinel::report::Finding;
use c_sentinel::textscan::TextScanner;
use c_sentinel::{Cli, Report, RuleEngine, Severity};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

/// ASCII art banner displayed at startup.
const BANNER: &str = r#"
   ____       ____             _   _            _
  / ___|     / ___|  ___ _ __ | |_(_)_ __   ___| |
 | |   _____ \___ \ / _ \ '_ \| __| | '_ \ / _ \ |
 | |__|_____| ___) |  __/ | | | |_| | | | |  __/ |
  \____|     |____/ \___|_| |_|\__|_|_| |_|\___|_|

            C Source Code Security Scanner
"#;

/// Application entry point.
///
/// Initializes the logging system, displays the banner, parses command-line
/// arguments, and dispatches to the appropriate command handler.
///
/// # Returns
///
/// Returns `Ok(())` on successful execution, or an error if any operation fails.
/// Exits with status 1 when a scan reports findings.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", BANNER.cyan().bold());

    let cli = Cli::parse();

    match cli.command {
        c_sentinel::cli::Commands::Scan {
            path,
            recursive,
            format,
            output,
            severity,
            textual,
        } => {
            let total = run_scan(path, recursive, format, output, severity, textual)?;
            if total > 0 {
                std::process::exit(1);
            }
        }
        c_sentinel::cli::Commands::List => {
            list_checks();
        }
        c_sentinel::cli::Commands::Version => {
            println!(
                "{} {}",
                "c-sentinel version:".green(),
                env!("CARGO_PKG_VERSION").yellow()
            );
        }
    }

    Ok(())
}

/// Executes the security scan operation.
///
/// This function orchestrates the complete scanning workflow:
/// 1. Collects C source files from the specified path
/// 2. Analyzes each file (structural pipeline or textual fallback)
/// 3. Applies the minimum-severity filter
/// 4. Renders the report in the requested format
///
/// # Arguments
///
/// * `path` - The file or directory path to scan
/// * `recursive` - Whether to scan directories recursively
/// * `format` - Output format: "terminal", "json", or "markdown"
/// * `output` - Optional output directory for the Markdown report
/// * `min_severity` - Optional minimum severity level to include
/// * `textual` - Use the regex fallback instead of structural analysis
///
/// # Returns
///
/// The number of reported findings after filtering.
fn run_scan(
    path: PathBuf,
    recursive: bool,
    format: String,
    output: Option<PathBuf>,
    min_severity: Option<Severity>,
    textual: bool,
) -> Result<usize> {
    println!(
        "{} {}",
        "[*] Scanning:".green().bold(),
        path.display().to_string().yellow()
    );

    let all_findings = perform_scan(&path, recursive, textual)?;

    let report = Report::new(all_findings, path.clone());
    let report = match min_severity {
        Some(min) => {
            let filtered: Vec<Finding> = report.findings_at_or_above(min).cloned().collect();
            Report::new(filtered, path)
        }
        None => report,
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "markdown" => {
            let md = report.to_markdown();
            if let Some(ref out_path) = output {
                let report_path = out_path.join("security_report.md");
                std::fs::write(&report_path, &md)?;
                println!(
                    "{} {}",
                    "[+] Report saved to:".green(),
                    report_path.display().to_string().yellow()
                );
            } else {
                println!("{}", md);
            }
        }
        _ => {
            report.print_terminal();
            println!("\n{}", "=".repeat(60).cyan());
            report.print_summary();
        }
    }

    Ok(report.summary.total)
}

/// Performs the actual scanning logic on a file or directory.
fn perform_scan(path: &PathBuf, recursive: bool, textual: bool) -> Result<Vec<Finding>> {
    use indicatif::{ProgressBar, ProgressStyle};

    let files = if path.is_file() {
        vec![path.clone()]
    } else {
        collect_c_files(path, recursive)?
    };

    if files.is_empty() {
        return Ok(Vec::new());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let scanner = if textual {
        Some(TextScanner::new())
    } else {
        None
    };
    let engine = RuleEngine::new();
    let mut all_findings = Vec::new();

    for file_path in &files {
        pb.set_message(format!(
            "Analyzing {}",
            file_path.file_name().unwrap_or_default().to_string_lossy()
        ));

        if let Some(ref text_scanner) = scanner {
            match std::fs::read_to_string(file_path) {
                Ok(source) => {
                    all_findings.extend(text_scanner.scan(&file_path.to_string_lossy(), &source));
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {}", file_path.display(), e);
                }
            }
        } else {
            match c_sentinel::parser::parse_c_file(file_path) {
                Ok(context) => {
                    all_findings.extend(engine.run_all(&context));
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {}", file_path.display(), e);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(all_findings)
}

/// Collects C source files from a directory.
///
/// Traverses the specified directory and collects all `.c` and `.h`
/// files.
///
/// # Arguments
///
/// * `dir` - The directory to search
/// * `recursive` - Whether to search subdirectories
///
/// # Returns
///
/// A vector of paths to C source files.
fn collect_c_files(dir: &PathBuf, recursive: bool) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map_or(false, |ext| ext == "c" || ext == "h")
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    Ok(files)
}

/// Displays all available checks and the dangerous-function catalogue.
fn list_checks() {
    let engine = RuleEngine::new();

    println!("{}", "[*] Available Checks:".green().bold());
    println!("{}", "-".repeat(60).cyan());

    for check in engine.checks() {
        println!("  {} {}", check.id().cyan().bold(), check.name().white());
        println!("     {}", check.description().dimmed());
        println!();
    }

    println!("{}", "[*] Dangerous Function Catalogue:".green().bold());
    println!("{}", "-".repeat(60).cyan());

    for entry in c_sentinel::checks::DANGEROUS_CALLS {
        println!(
            "  {:<10} {} {}",
            entry.name.yellow(),
            entry.severity.colored_label(),
            entry.kind.to_string().white()
        );
    }
}
