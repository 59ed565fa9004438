#![forbid(unsafe_code)]

//! treeguard: declarative file layout enforcement
//!
//! A `.treeguard` file lists the paths a repository may contain. Positive
//! patterns allow files, `!` patterns forbid them, `a => b` rules apply `b`
//! only when `a` matches something, and a `%` placeholder in an antecedent
//! instantiates the rule once per matching path. treeguard compiles those
//! rules against a snapshot of the tree and reports every file that is not
//! allowed or is explicitly forbidden.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{CompileError, ConfigError, GuardError, ParseError};

// Re-export core domain types for convenient access
pub use engine::{
    CheckReport, PathMatcher, TreeSnapshot, Violation, ViolationKind, check, check_allowing,
};
pub use rules::compile;
pub use types::{CompiledPattern, Directive, Expression, GlobPattern, SourceLocation};
