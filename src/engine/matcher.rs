//! Glob queries against a directory snapshot
//!
//! `PathMatcher` is the single capability the rule compiler uses to look at
//! the filesystem. The production implementation answers from a
//! `TreeSnapshot`; tests can supply any other implementation.

use crate::engine::file_walker::{EntryKind, TreeSnapshot};
use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

/// Errors raised while evaluating a glob query
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
}

/// Evaluates glob patterns against a fixed directory tree
///
/// Returned paths are relative to the tree root, use `/` as separator and are
/// ordered deterministically for a given tree.
pub trait PathMatcher {
    /// Returns every path matched by `pattern`
    fn matches(&self, pattern: &str) -> Result<Vec<String>, MatchError>;

    /// Returns true if `pattern` matches at least one path
    fn any_match(&self, pattern: &str) -> Result<bool, MatchError> {
        Ok(!self.matches(pattern)?.is_empty())
    }
}

impl<M: PathMatcher + ?Sized> PathMatcher for &M {
    fn matches(&self, pattern: &str) -> Result<Vec<String>, MatchError> {
        (**self).matches(pattern)
    }

    fn any_match(&self, pattern: &str) -> Result<bool, MatchError> {
        (**self).any_match(pattern)
    }
}

/// Compiles a rule pattern into a glob matcher
///
/// `*` and `?` never cross a `/`; `**` spans any number of segments.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, MatchError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| MatchError::InvalidGlob {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Strips the leading `./` a rule may use to spell a root-relative path
pub fn normalize_pattern(pattern: &str) -> &str {
    pattern.strip_prefix("./").unwrap_or(pattern)
}

/// A query pattern split into its glob and the kind of entries it selects
struct Query {
    glob: GlobMatcher,
    directories_only: bool,
}

impl Query {
    fn new(pattern: &str) -> Result<Self, MatchError> {
        let pattern = normalize_pattern(pattern);
        let directories_only = pattern.ends_with('/');
        let glob = compile_glob(pattern.trim_end_matches('/'))?;
        Ok(Self {
            glob,
            directories_only,
        })
    }
}

impl PathMatcher for TreeSnapshot {
    /// Matches files and directories; a pattern ending in `/` matches
    /// directories only and reports them with a trailing `/`.
    fn matches(&self, pattern: &str) -> Result<Vec<String>, MatchError> {
        let query = Query::new(pattern)?;

        let matched = self
            .entries()
            .iter()
            .filter(|entry| !query.directories_only || entry.kind == EntryKind::Directory)
            .filter(|entry| query.glob.is_match(&entry.path))
            .map(|entry| {
                if query.directories_only {
                    format!("{}/", entry.path)
                } else {
                    entry.path.clone()
                }
            })
            .collect();

        Ok(matched)
    }

    fn any_match(&self, pattern: &str) -> Result<bool, MatchError> {
        let query = Query::new(pattern)?;
        Ok(self
            .entries()
            .iter()
            .filter(|entry| !query.directories_only || entry.kind == EntryKind::Directory)
            .any(|entry| query.glob.is_match(&entry.path)))
    }
}
