//! Check command implementation
//!
//! This module implements the `treeguard check` command, which:
//! - Loads treeguard.toml and the rules file
//! - Captures the project tree and compiles the rules against it
//! - Reports files that are not allowed or are explicitly forbidden
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::TargetArgs;
use crate::cli::common::{EXIT_SUCCESS, EXIT_VIOLATIONS, Project, exit_code_for, load_project};
use crate::config::{ColorOption, OutputFormat};
use crate::engine::checker::CheckReport;
use crate::error::GuardError;
use crate::output::{HumanFormatter, JsonlFormatter};

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (every file is allowed)
/// - 1: Violations found
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error in the rules file
pub fn run_check(target: &TargetArgs, color: Option<ColorOption>) -> i32 {
    match run_check_inner(target, color) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_VIOLATIONS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Internal implementation of check command
fn run_check_inner(target: &TargetArgs, color: Option<ColorOption>) -> Result<bool, GuardError> {
    let project = load_project(target)?;
    let format = project.format(target);

    if format == OutputFormat::Human {
        eprintln!(
            "Checking {} files with {} patterns...",
            project.snapshot.file_count(),
            project.patterns.len()
        );
    }

    let report = project.check()?;
    tracing::info!(
        violations = report.violations.len(),
        not_allowed = report.not_allowed().count(),
        forbidden = report.forbidden().count(),
        "check finished"
    );

    match format {
        OutputFormat::Human => print_human_output(&project, &report, color)?,
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format_report(&report)),
    }

    Ok(report.passed())
}

/// Print human-readable output
fn print_human_output(
    project: &Project,
    report: &CheckReport,
    color: Option<ColorOption>,
) -> Result<(), GuardError> {
    if report.passed() {
        eprintln!("repository looks good");
        return Ok(());
    }

    HumanFormatter::new(project.color(color)).write_report(report)?;
    eprintln!();
    eprintln!(
        "Check FAILED: {} path(s) violate {}",
        report.violations.len(),
        project.rules_path.display()
    );
    Ok(())
}
