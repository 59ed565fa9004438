//! Error types for treeguard
//!
//! This module defines the error types used throughout treeguard, following
//! a hierarchical structure: rule-file parse errors, compilation errors that
//! wrap filesystem query failures, configuration errors, and a top-level
//! error that unifies them for library callers.

use crate::engine::file_walker::FileWalkerError;
use crate::engine::matcher::MatchError;
use crate::types::SourceLocation;
use std::path::PathBuf;

/// An invalid line in a rules file
///
/// Raised by the parser and the placeholder expander. Always fatal: a rule set
/// with a single bad line is not compiled at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source_file}:{line}: {message}")]
pub struct ParseError {
    /// Rules file the offending line belongs to
    pub source_file: String,
    /// 1-based line number in the original file
    pub line: u32,
    /// What is wrong with the line
    pub message: String,
}

impl ParseError {
    /// Creates a parse error attributed to the given location
    pub fn at(location: &SourceLocation, message: impl Into<String>) -> Self {
        Self {
            source_file: location.source_file.clone(),
            line: location.line,
            message: message.into(),
        }
    }

    /// Returns the location this error points at
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.source_file.clone(), self.line)
    }
}

/// Errors produced while compiling a rules file
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The rules file itself is malformed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A filesystem query issued on behalf of a rule failed
    #[error("{location}: {source}")]
    Match {
        location: SourceLocation,
        source: MatchError,
    },
}

impl CompileError {
    /// Wraps a match failure with the location of the rule that issued it
    pub(crate) fn matching(location: &SourceLocation, source: MatchError) -> Self {
        CompileError::Match {
            location: location.clone(),
            source,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The rules file could not be found
    #[error("rules file does not exist: {}", .0.display())]
    RulesNotFound(PathBuf),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML in treeguard.toml
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// The root .gitignore could not be read or holds an invalid glob
    #[error("Invalid .gitignore: {0}")]
    Gitignore(ignore::Error),

    /// Semantically invalid settings
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level error type for treeguard
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rules file could not be compiled
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Directory traversal failed
    #[error("File walker error: {0}")]
    Walk(#[from] FileWalkerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GuardError {
    /// Returns true if the error originates from a malformed rules file
    pub fn is_parse_error(&self) -> bool {
        matches!(self, GuardError::Compile(CompileError::Parse(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::at(
            &SourceLocation::new(".treeguard", 3),
            "missing conditional antecedent",
        );
        assert_eq!(
            err.to_string(),
            ".treeguard:3: missing conditional antecedent"
        );
        assert_eq!(err.location(), SourceLocation::new(".treeguard", 3));
    }

    #[test]
    fn test_compile_error_wraps_parse_error_transparently() {
        let err: CompileError =
            ParseError::at(&SourceLocation::new("rules", 1), "no nested conditionals").into();
        assert_eq!(err.to_string(), "rules:1: no nested conditionals");
    }

    #[test]
    fn test_guard_error_parse_classification() {
        let parse: GuardError = CompileError::from(ParseError::at(
            &SourceLocation::new("rules", 1),
            "missing conditional consequence",
        ))
        .into();
        assert!(parse.is_parse_error());

        let config: GuardError = ConfigError::Validation("bad".to_string()).into();
        assert!(!config.is_parse_error());
    }

    #[test]
    fn test_gitignore_error_is_a_config_error() {
        let err: GuardError = ConfigError::Gitignore(ignore::Error::Glob {
            glob: Some("src/{a".to_string()),
            err: "unclosed alternate group".to_string(),
        })
        .into();
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("Invalid .gitignore"));
    }

    #[test]
    fn test_rules_not_found_display() {
        let err = ConfigError::RulesNotFound(PathBuf::from("missing/.treeguard"));
        assert_eq!(
            err.to_string(),
            "rules file does not exist: missing/.treeguard"
        );
    }
}
