//! Rules file compilation
//!
//! Runs the whole pipeline over the text of a rules file:
//! preprocess, parse, expand placeholders, resolve conditionals.

use crate::engine::matcher::PathMatcher;
use crate::error::CompileError;
use crate::rules::{conditional, parser, placeholder, source};
use crate::types::CompiledPattern;

/// Compiles the rules in `contents` into concrete glob patterns
///
/// `source_file` is only used to attribute diagnostics. Every filesystem
/// query goes through `matcher`.
///
/// # Errors
///
/// Fails on the first malformed line (`CompileError::Parse`) or the first
/// failed query (`CompileError::Match`); no partial rule set is returned.
pub fn compile<M>(
    source_file: &str,
    contents: &str,
    matcher: &M,
) -> Result<Vec<CompiledPattern>, CompileError>
where
    M: PathMatcher + ?Sized,
{
    let lines = source::preprocess(contents);
    let directives = parser::parse(source_file, &lines)?;
    tracing::debug!(source_file, directives = directives.len(), "parsed rules file");

    let rules = placeholder::expand(matcher, directives)?;
    tracing::debug!(source_file, rules = rules.len(), "expanded placeholders");

    let patterns = conditional::resolve(matcher, rules)?;
    tracing::debug!(source_file, patterns = patterns.len(), "resolved conditionals");

    Ok(patterns)
}
