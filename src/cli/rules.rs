//! Rules command implementation
//!
//! This module implements the `treeguard rules` command, which compiles the
//! rules file against the current tree and prints the resulting patterns
//! with the rule each one came from. Useful when a placeholder or
//! conditional does not expand the way its author expected.

use crate::cli::args::TargetArgs;
use crate::cli::common::{EXIT_SUCCESS, exit_code_for, load_project};
use crate::config::{ColorOption, OutputFormat};
use crate::error::GuardError;
use crate::output::{HumanFormatter, JsonlFormatter};

/// Run the rules command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error in the rules file
pub fn run_rules(target: &TargetArgs, color: Option<ColorOption>) -> i32 {
    match run_rules_inner(target, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_rules_inner(target: &TargetArgs, color: Option<ColorOption>) -> Result<(), GuardError> {
    let project = load_project(target)?;

    match project.format(target) {
        OutputFormat::Human => {
            if project.patterns.is_empty() {
                eprintln!("No patterns compiled from {}", project.rules_path.display());
                return Ok(());
            }
            HumanFormatter::new(project.color(color)).write_rules(&project.patterns)?;
            if let Some(ignored) = &project.ignored {
                eprintln!("plus {} line(s) from .gitignore allowing ignored files", ignored.len());
            }
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format_rules(&project.patterns)),
    }

    Ok(())
}
