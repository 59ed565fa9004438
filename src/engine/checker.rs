#![forbid(unsafe_code)]

//! Layout checking
//!
//! Applies a compiled rule set to a snapshot. A file violates the layout when
//! no positive pattern allows it, and any entry matched by a negative pattern
//! is forbidden outright.

use crate::engine::file_walker::TreeSnapshot;
use crate::engine::matcher::PathMatcher;
use crate::error::CompileError;
use crate::types::{CompiledPattern, SourceLocation};
use std::collections::HashSet;

/// Why a path is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// No positive pattern allows the file
    NotAllowed,
    /// A negative pattern matches the path
    Forbidden {
        pattern: String,
        location: SourceLocation,
    },
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::NotAllowed => "not_allowed",
            ViolationKind::Forbidden { .. } => "forbidden",
        }
    }
}

/// A path that must not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path relative to the project root
    pub path: String,
    pub kind: ViolationKind,
}

/// Outcome of checking a snapshot against a rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Unallowed files in snapshot order, then forbidden paths in rule order
    pub violations: Vec<Violation>,
    /// Number of files in the snapshot
    pub files_checked: usize,
    /// Number of patterns applied
    pub patterns_applied: usize,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of the given kind
    pub fn not_allowed(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.kind == ViolationKind::NotAllowed)
    }

    pub fn forbidden(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| matches!(v.kind, ViolationKind::Forbidden { .. }))
    }
}

/// Checks every file in `snapshot` against `patterns`
///
/// Each path is reported at most once; a path that is both unallowed and
/// forbidden is reported as forbidden by the first negative pattern matching
/// it.
///
/// # Errors
///
/// Returns `CompileError::Match` with the pattern's location if a pattern is
/// not a valid glob.
pub fn check(
    snapshot: &TreeSnapshot,
    patterns: &[CompiledPattern],
) -> Result<CheckReport, CompileError> {
    check_allowing(snapshot, patterns, |_| false)
}

/// Like [`check`], but files for which `also_allowed` returns true need no
/// positive pattern
///
/// Negative patterns still apply to those files.
pub fn check_allowing<F>(
    snapshot: &TreeSnapshot,
    patterns: &[CompiledPattern],
    also_allowed: F,
) -> Result<CheckReport, CompileError>
where
    F: Fn(&str) -> bool,
{
    let mut allowed: HashSet<String> = HashSet::new();
    let mut forbidden: Vec<Violation> = Vec::new();
    let mut forbidden_paths: HashSet<String> = HashSet::new();

    for pattern in patterns {
        let matches = snapshot
            .matches(&pattern.pattern)
            .map_err(|e| CompileError::matching(&pattern.location, e))?;

        if pattern.negated {
            for path in matches {
                if forbidden_paths.insert(path.clone()) {
                    forbidden.push(Violation {
                        path,
                        kind: ViolationKind::Forbidden {
                            pattern: pattern.pattern.clone(),
                            location: pattern.location.clone(),
                        },
                    });
                }
            }
        } else {
            allowed.extend(matches);
        }
    }

    let mut violations: Vec<Violation> = snapshot
        .files()
        .filter(|file| !allowed.contains(*file) && !forbidden_paths.contains(*file))
        .filter(|file| !also_allowed(*file))
        .map(|file| Violation {
            path: file.to_string(),
            kind: ViolationKind::NotAllowed,
        })
        .collect();
    violations.extend(forbidden);

    tracing::debug!(
        files = snapshot.file_count(),
        patterns = patterns.len(),
        violations = violations.len(),
        "checked layout"
    );

    Ok(CheckReport {
        violations,
        files_checked: snapshot.file_count(),
        patterns_applied: patterns.len(),
    })
}
