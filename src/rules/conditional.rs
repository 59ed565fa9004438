//! Conditional resolution
//!
//! Reduces expanded directives to the final pattern list. Unconditional
//! directives become patterns directly; conditional ones are decided by a
//! single query of their antecedent.

use crate::engine::matcher::PathMatcher;
use crate::error::CompileError;
use crate::types::{CompiledPattern, Directive};

/// Resolves every directive into zero or one compiled pattern
///
/// A conditional directive emits its consequence when its antecedent holds:
/// a positive antecedent holds when it matches something, a negated one when
/// it matches nothing. Output order follows input order.
///
/// # Errors
///
/// Returns `CompileError::Match` if an antecedent query fails.
pub fn resolve<M>(matcher: &M, rules: Vec<Directive>) -> Result<Vec<CompiledPattern>, CompileError>
where
    M: PathMatcher + ?Sized,
{
    let resolved = rules
        .iter()
        .map(|rule| resolve_rule(matcher, rule))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(resolved.into_iter().flatten().collect())
}

fn resolve_rule<M>(matcher: &M, rule: &Directive) -> Result<Option<CompiledPattern>, CompileError>
where
    M: PathMatcher + ?Sized,
{
    let Some(consequence) = &rule.consequence else {
        return Ok(Some(CompiledPattern::from_expression(
            &rule.antecedent,
            &rule.location,
        )));
    };

    let matched = matcher
        .any_match(&rule.antecedent.pattern)
        .map_err(|e| CompileError::matching(&rule.location, e))?;
    let holds = matched != rule.antecedent.negated;

    tracing::debug!(
        location = %rule.location,
        antecedent = %rule.antecedent,
        holds,
        "resolved conditional"
    );

    Ok(holds.then(|| CompiledPattern::from_expression(consequence, &rule.location)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::file_walker::TreeSnapshot;
    use crate::engine::matcher::MatchError;
    use crate::types::{Expression, SourceLocation};
    use std::cell::RefCell;

    fn location(line: u32) -> SourceLocation {
        SourceLocation::new("rules", line)
    }

    /// Records every query and answers from a fixed list of matching patterns
    struct RecordingMatcher {
        matching: Vec<&'static str>,
        queries: RefCell<Vec<String>>,
    }

    impl PathMatcher for RecordingMatcher {
        fn matches(&self, pattern: &str) -> Result<Vec<String>, MatchError> {
            self.queries.borrow_mut().push(pattern.to_string());
            if self.matching.iter().any(|candidate| *candidate == pattern) {
                Ok(vec![pattern.to_string()])
            } else {
                Ok(vec![])
            }
        }
    }

    #[test]
    fn test_unconditional_passthrough() {
        let snapshot = TreeSnapshot::default();
        let rules = vec![Directive::unconditional(
            Expression::positive("lib/*.js"),
            location(1),
        )];
        let patterns = resolve(&snapshot, rules).unwrap();
        assert_eq!(
            patterns,
            vec![CompiledPattern::new("lib/*.js", false, location(1))]
        );
    }

    #[test]
    fn test_unconditional_negative_passthrough() {
        let snapshot = TreeSnapshot::default();
        let rules = vec![Directive::unconditional(
            Expression::negative("dist/**"),
            location(2),
        )];
        let patterns = resolve(&snapshot, rules).unwrap();
        assert!(patterns[0].negated);
        assert_eq!(patterns[0].pattern, "dist/**");
    }

    #[test]
    fn test_conditional_kept_on_match() {
        let snapshot = TreeSnapshot::from_paths(["lib/a.js"]);
        let rules = vec![Directive::conditional(
            Expression::positive("lib/*.js"),
            Expression::positive("test/*.js"),
            location(1),
        )];
        let patterns = resolve(&snapshot, rules).unwrap();
        assert_eq!(
            patterns,
            vec![CompiledPattern::new("test/*.js", false, location(1))]
        );
    }

    #[test]
    fn test_conditional_dropped_without_match() {
        let snapshot = TreeSnapshot::from_paths(["src/a.js"]);
        let rules = vec![Directive::conditional(
            Expression::positive("lib/*.js"),
            Expression::positive("test/*.js"),
            location(1),
        )];
        assert!(resolve(&snapshot, rules).unwrap().is_empty());
    }

    #[test]
    fn test_negated_antecedent_inverts_condition() {
        let rule = Directive::conditional(
            Expression::negative("dist/*"),
            Expression::positive("ok"),
            location(1),
        );

        let without_dist = TreeSnapshot::from_paths(["src/a.js"]);
        let patterns = resolve(&without_dist, vec![rule.clone()]).unwrap();
        assert_eq!(patterns, vec![CompiledPattern::new("ok", false, location(1))]);

        let with_dist = TreeSnapshot::from_paths(["dist/bundle.js"]);
        assert!(resolve(&with_dist, vec![rule]).unwrap().is_empty());
    }

    #[test]
    fn test_consequence_negation_is_independent() {
        let snapshot = TreeSnapshot::default();
        let rule = Directive::conditional(
            Expression::negative("package.json"),
            Expression::negative("node_modules/**"),
            location(5),
        );
        let patterns = resolve(&snapshot, vec![rule]).unwrap();
        assert_eq!(
            patterns,
            vec![CompiledPattern::new("node_modules/**", true, location(5))]
        );
    }

    #[test]
    fn test_one_query_per_conditional_in_order() {
        let matcher = RecordingMatcher {
            matching: vec!["a"],
            queries: RefCell::new(Vec::new()),
        };
        let rules = vec![
            Directive::conditional(Expression::positive("a"), Expression::positive("x"), location(1)),
            Directive::unconditional(Expression::positive("plain"), location(2)),
            Directive::conditional(Expression::positive("b"), Expression::positive("y"), location(3)),
            Directive::conditional(Expression::negative("c"), Expression::positive("z"), location(4)),
        ];

        let patterns = resolve(&matcher, rules).unwrap();
        let emitted: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        assert_eq!(emitted, vec!["x", "plain", "z"]);
        assert_eq!(*matcher.queries.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_failure_carries_rule_location() {
        let snapshot = TreeSnapshot::from_paths(["a"]);
        let rules = vec![Directive::conditional(
            Expression::positive("[broken"),
            Expression::positive("x"),
            location(9),
        )];
        match resolve(&snapshot, rules).unwrap_err() {
            CompileError::Match { location: at, .. } => assert_eq!(at, location(9)),
            other => panic!("expected match error, got {other:?}"),
        }
    }
}
