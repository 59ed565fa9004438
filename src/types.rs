#![forbid(unsafe_code)]

//! Core domain types for treeguard
//!
//! This module defines the values that flow through the rule-compilation
//! pipeline. All of them are plain immutable values: every stage builds new
//! ones instead of editing its input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marks an expression as a negative pattern
pub const NEGATION_SYMBOL: char = '!';

/// Where a rule came from, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Name of the rules file as given by the caller
    pub source_file: String,
    /// 1-based line number in the original file
    pub line: u32,
}

impl SourceLocation {
    pub fn new(source_file: impl Into<String>, line: u32) -> Self {
        Self {
            source_file: source_file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_file, self.line)
    }
}

/// One side of a directive: a glob pattern and whether it is negated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    pub pattern: String,
    pub negated: bool,
}

impl Expression {
    pub fn new(pattern: impl Into<String>, negated: bool) -> Self {
        Self {
            pattern: pattern.into(),
            negated,
        }
    }

    /// Creates a non-negated expression
    pub fn positive(pattern: impl Into<String>) -> Self {
        Self::new(pattern, false)
    }

    /// Creates a negated expression
    pub fn negative(pattern: impl Into<String>) -> Self {
        Self::new(pattern, true)
    }

    /// Returns a copy of this expression with a different pattern
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self::new(pattern, self.negated)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NEGATION_SYMBOL, self.pattern)
        } else {
            write!(f, "{}", self.pattern)
        }
    }
}

/// A parsed rules-file line: an antecedent and an optional consequence
///
/// Without a consequence the antecedent is the rule itself. With a
/// consequence, the consequence only applies when the antecedent's condition
/// holds against the directory.
///
/// Placeholder expansion produces values of this same type, one per match,
/// each keeping the location of the line it was expanded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub antecedent: Expression,
    pub consequence: Option<Expression>,
    pub location: SourceLocation,
}

impl Directive {
    /// Creates an unconditional directive
    pub fn unconditional(antecedent: Expression, location: SourceLocation) -> Self {
        Self {
            antecedent,
            consequence: None,
            location,
        }
    }

    /// Creates a conditional directive
    pub fn conditional(
        antecedent: Expression,
        consequence: Expression,
        location: SourceLocation,
    ) -> Self {
        Self {
            antecedent,
            consequence: Some(consequence),
            location,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.consequence.is_some()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.consequence {
            Some(consequence) => write!(f, "{} => {}", self.antecedent, consequence),
            None => write!(f, "{}", self.antecedent),
        }
    }
}

/// A final glob pattern produced by compilation
///
/// Positive patterns list files that are allowed to exist; negative patterns
/// list files that must not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPattern {
    pub pattern: String,
    pub negated: bool,
    pub location: SourceLocation,
}

impl CompiledPattern {
    /// Builds a compiled pattern from an expression
    pub fn from_expression(expression: &Expression, location: &SourceLocation) -> Self {
        Self {
            pattern: expression.pattern.clone(),
            negated: expression.negated,
            location: location.clone(),
        }
    }

    pub fn new(pattern: impl Into<String>, negated: bool, location: SourceLocation) -> Self {
        Self {
            pattern: pattern.into(),
            negated,
            location,
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NEGATION_SYMBOL, self.pattern)
        } else {
            write!(f, "{}", self.pattern)
        }
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}
