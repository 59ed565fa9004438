//! Placeholder expansion
//!
//! An antecedent may contain one `%`. The directive is then instantiated once
//! per path matched by the antecedent with `%` read as `*`, substituting the
//! fragment the placeholder stood for into both sides:
//!
//! ```text
//! lib/%.js => test/%.spec.js
//! ```
//!
//! with `lib/a.js` and `lib/b.js` on disk becomes
//!
//! ```text
//! lib/a.js => test/a.spec.js
//! lib/b.js => test/b.spec.js
//! ```
//!
//! The placeholder may stand for part of a file name or for a whole directory
//! name (`src/%/index.js`, `packages/%/`).

use crate::engine::matcher::{PathMatcher, normalize_pattern};
use crate::error::{CompileError, ParseError};
use crate::types::Directive;

/// Captures a path fragment
pub const PLACEHOLDER_SYMBOL: char = '%';

/// Stands in for the placeholder while probing the directory
pub const WILDCARD_SYMBOL: char = '*';

const RECURSIVE_WILDCARD: &str = "**";

pub(crate) const MULTIPLE_PLACEHOLDERS: &str =
    "conditional antecedents must have a single placeholder symbol";
pub(crate) const NEGATIVE_PLACEHOLDER: &str =
    "placeholder antecedents must not be negative patterns";

/// Expands every placeholder directive into concrete ones
///
/// Directives without a placeholder are returned unchanged, in place.
///
/// # Errors
///
/// Returns `CompileError::Parse` for a negated placeholder antecedent or an
/// antecedent with more than one placeholder, and `CompileError::Match` if the
/// wildcard query fails.
pub fn expand<M>(matcher: &M, directives: Vec<Directive>) -> Result<Vec<Directive>, CompileError>
where
    M: PathMatcher + ?Sized,
{
    let expanded = directives
        .into_iter()
        .map(|directive| expand_directive(matcher, directive))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expanded.into_iter().flatten().collect())
}

fn expand_directive<M>(matcher: &M, directive: Directive) -> Result<Vec<Directive>, CompileError>
where
    M: PathMatcher + ?Sized,
{
    let antecedent = &directive.antecedent;
    let placeholders = antecedent.pattern.matches(PLACEHOLDER_SYMBOL).count();

    if placeholders == 0 {
        return Ok(vec![directive]);
    }
    if antecedent.negated {
        return Err(ParseError::at(&directive.location, NEGATIVE_PLACEHOLDER).into());
    }
    if placeholders > 1 {
        return Err(ParseError::at(&directive.location, MULTIPLE_PLACEHOLDERS).into());
    }

    let template = PlaceholderPattern::new(&antecedent.pattern);
    let wildcard = template.wildcard();
    let matches = matcher
        .matches(&wildcard)
        .map_err(|e| CompileError::matching(&directive.location, e))?;

    let rules: Vec<Directive> = matches
        .iter()
        .filter_map(|path| {
            let value = template.capture(path);
            if value.is_none() {
                tracing::debug!(
                    location = %directive.location,
                    %path,
                    pattern = %antecedent.pattern,
                    "match does not bind the placeholder, skipping"
                );
            }
            value
        })
        .map(|value| instantiate(&directive, value))
        .collect();

    tracing::debug!(
        location = %directive.location,
        pattern = %wildcard,
        matches = matches.len(),
        rules = rules.len(),
        "expanded placeholder directive"
    );

    Ok(rules)
}

/// Substitutes `value` for every placeholder on both sides of `directive`
fn instantiate(directive: &Directive, value: &str) -> Directive {
    let substitute = |pattern: &str| pattern.replace(PLACEHOLDER_SYMBOL, value);

    Directive {
        antecedent: directive
            .antecedent
            .with_pattern(substitute(&directive.antecedent.pattern)),
        consequence: directive
            .consequence
            .as_ref()
            .map(|consequence| consequence.with_pattern(substitute(&consequence.pattern))),
        location: directive.location.clone(),
    }
}

/// Position of the placeholder's segment in a matched path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Index counted from the first segment
    Start(usize),
    /// Distance counted back from the end (1 is the last segment)
    End(usize),
}

/// An antecedent pattern with exactly one placeholder, viewed as path segments
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlaceholderPattern<'a> {
    segments: Vec<&'a str>,
    anchor: Anchor,
    index: usize,
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> PlaceholderPattern<'a> {
    /// Splits `pattern` into segments and locates the placeholder
    ///
    /// The caller guarantees that `pattern` holds exactly one placeholder.
    fn new(pattern: &'a str) -> Self {
        let segments: Vec<&str> = normalize_pattern(pattern).split('/').collect();
        let index = segments
            .iter()
            .position(|segment| segment.contains(PLACEHOLDER_SYMBOL))
            .unwrap_or_default();
        let (prefix, suffix) = segments[index]
            .split_once(PLACEHOLDER_SYMBOL)
            .unwrap_or((segments[index], ""));

        // A recursive wildcard before the placeholder makes its depth vary, so
        // locate it from the end of the path instead.
        let anchor = if segments[..index].contains(&RECURSIVE_WILDCARD) {
            Anchor::End(segments.len() - index)
        } else {
            Anchor::Start(index)
        };

        Self {
            segments,
            anchor,
            index,
            prefix,
            suffix,
        }
    }

    /// The pattern with the placeholder read as a wildcard
    fn wildcard(&self) -> String {
        let mut segments: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        segments[self.index] = format!("{}{}{}", self.prefix, WILDCARD_SYMBOL, self.suffix);
        segments.join("/")
    }

    /// Extracts the fragment the placeholder matched in `path`
    fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        let segments: Vec<&str> = path.split('/').collect();
        let position = match self.anchor {
            Anchor::Start(index) => index,
            Anchor::End(distance) => segments.len().checked_sub(distance)?,
        };

        segments
            .get(position)?
            .strip_prefix(self.prefix)?
            .strip_suffix(self.suffix)
    }
}
