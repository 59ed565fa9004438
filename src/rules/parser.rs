//! Directive parsing
//!
//! Turns preprocessed lines into directives. A line is either a single
//! expression or two expressions joined by the conditional separator:
//!
//! ```text
//! LICENSE                     # must be allowed
//! !dist/**                    # must not exist
//! lib/*.js => test/*.js       # test files are allowed only if lib files exist
//! !dist/* => .npmignore       # .npmignore is allowed only without a dist/
//! ```

use crate::error::ParseError;
use crate::rules::source::SourceLine;
use crate::types::{Directive, Expression, NEGATION_SYMBOL, SourceLocation};

/// Separates the antecedent from the consequence
pub const CONDITIONAL_SEPARATOR: &str = "=>";

pub(crate) const NESTED_CONDITIONALS: &str = "no nested conditionals";
pub(crate) const MISSING_ANTECEDENT: &str = "missing conditional antecedent";
pub(crate) const MISSING_CONSEQUENCE: &str = "missing conditional consequence";

/// Parses every line into a directive
///
/// # Errors
///
/// Fails on the first malformed line with a `ParseError` pointing at it.
pub fn parse(source_file: &str, lines: &[SourceLine]) -> Result<Vec<Directive>, ParseError> {
    lines
        .iter()
        .map(|line| parse_line(source_file, line))
        .collect()
}

fn parse_line(source_file: &str, line: &SourceLine) -> Result<Directive, ParseError> {
    let location = SourceLocation::new(source_file, line.line_number);
    let fragments: Vec<&str> = line.text.split(CONDITIONAL_SEPARATOR).collect();

    let (antecedent, consequence) = match fragments.as_slice() {
        [antecedent] => (*antecedent, None),
        [antecedent, consequence] => (*antecedent, Some(*consequence)),
        _ => return Err(ParseError::at(&location, NESTED_CONDITIONALS)),
    };

    let antecedent =
        parse_expression(antecedent).ok_or_else(|| ParseError::at(&location, MISSING_ANTECEDENT))?;

    match consequence {
        None => Ok(Directive::unconditional(antecedent, location)),
        Some(text) => {
            let consequence = parse_expression(text)
                .ok_or_else(|| ParseError::at(&location, MISSING_CONSEQUENCE))?;
            Ok(Directive::conditional(antecedent, consequence, location))
        }
    }
}

/// Parses one side of a directive, `None` if it holds no pattern
fn parse_expression(text: &str) -> Option<Expression> {
    let text = text.trim();
    let (pattern, negated) = match text.strip_prefix(NEGATION_SYMBOL) {
        Some(rest) => (rest.trim(), true),
        None => (text, false),
    };

    (!pattern.is_empty()).then(|| Expression::new(pattern, negated))
}
