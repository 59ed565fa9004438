//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading settings, locating
//! and compiling the rules file, and capturing the project snapshot.

use crate::cli::args::TargetArgs;
use crate::config::{ColorOption, OutputFormat, Settings};
use crate::engine::checker::{self, CheckReport};
use crate::engine::file_walker::TreeSnapshot;
use crate::error::{CompileError, ConfigError, GuardError};
use crate::rules::compile;
use crate::rules::gitignore::IgnoredPaths;
use crate::types::CompiledPattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Everything a command needs to know about the project being checked
#[derive(Debug)]
pub struct Project {
    pub settings: Settings,
    /// Rules file the patterns were compiled from
    pub rules_path: PathBuf,
    pub snapshot: TreeSnapshot,
    pub patterns: Vec<CompiledPattern>,
    /// Root .gitignore, when ignored files count as allowed
    pub ignored: Option<IgnoredPaths>,
}

impl Project {
    /// Output format, command line first, then settings
    pub fn format(&self, target: &TargetArgs) -> OutputFormat {
        target.format.unwrap_or(self.settings.output.format)
    }

    /// Color option, command line first, then settings
    pub fn color(&self, color: Option<ColorOption>) -> ColorOption {
        color.unwrap_or(self.settings.output.color)
    }

    /// Checks the snapshot against the compiled rules
    ///
    /// Files ignored by git are allowed when gitignore ingestion is on.
    pub fn check(&self) -> Result<CheckReport, CompileError> {
        match &self.ignored {
            Some(ignored) => checker::check_allowing(&self.snapshot, &self.patterns, |path| {
                ignored.is_ignored(path)
            }),
            None => checker::check(&self.snapshot, &self.patterns),
        }
    }
}

/// Loads settings, snapshots the project directory and compiles the rules
///
/// # Errors
///
/// Returns `GuardError::Config` if the settings are invalid or the rules file
/// cannot be read, `GuardError::Walk` if the directory cannot be traversed and
/// `GuardError::Compile` if the rules do not compile.
pub fn load_project(target: &TargetArgs) -> Result<Project, GuardError> {
    let settings = Settings::discover(&target.directory)?;
    let rules_path = resolve_rules_path(target, &settings);
    let contents = read_rules(&rules_path)?;
    tracing::info!(path = %rules_path.display(), "using rules file");

    let snapshot = TreeSnapshot::capture(&target.directory, &settings.treeguard.exclude)?;
    tracing::info!(
        directory = %target.directory.display(),
        files = snapshot.file_count(),
        "traversed directory structure"
    );

    let patterns = compile(&display_name(&rules_path), &contents, &snapshot)?;
    tracing::info!(patterns = patterns.len(), "compiled rules");

    let ignored = if target.gitignore || settings.treeguard.gitignore {
        IgnoredPaths::load(&target.directory).map_err(ConfigError::Gitignore)?
    } else {
        None
    };

    Ok(Project {
        settings,
        rules_path,
        snapshot,
        patterns,
        ignored,
    })
}

/// Picks the rules file: `--config`, then treeguard.toml, then `.treeguard`
pub(crate) fn resolve_rules_path(target: &TargetArgs, settings: &Settings) -> PathBuf {
    match &target.config {
        Some(path) => path.clone(),
        None => settings.rules_path(&target.directory),
    }
}

/// Reads the rules file, reporting a missing file distinctly
pub(crate) fn read_rules(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::RulesNotFound(path.to_path_buf()),
        _ => ConfigError::Io(e),
    })
}

/// Name used for a rules file in diagnostics
fn display_name(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

/// Maps an error to the process exit code
pub fn exit_code_for(error: &GuardError) -> i32 {
    if error.is_parse_error() {
        EXIT_PARSE_ERROR
    } else {
        EXIT_ERROR
    }
}
