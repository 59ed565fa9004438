#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Violations are listed one path per line under a header; forbidden paths
//! name the rule that forbids them. Rule listings are rendered as aligned
//! `(file:line) pattern` rows.

use crate::config::ColorOption;
use crate::engine::checker::{CheckReport, ViolationKind};
use crate::types::CompiledPattern;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    /// Creates a formatter honoring the given color option
    pub fn new(color: ColorOption) -> Self {
        let color = match color {
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
            ColorOption::Auto if io::IsTerminal::is_terminal(&io::stdout()) => ColorChoice::Auto,
            ColorOption::Auto => ColorChoice::Never,
        };
        Self { color }
    }

    /// Format a check report as plain text
    pub fn format_report(&self, report: &CheckReport) -> String {
        let mut buffer = NoColor::new(Vec::new());
        // Writing into memory cannot fail.
        let _ = self.render_report(&mut buffer, report);
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }

    /// Write a check report to stdout
    pub fn write_report(&self, report: &CheckReport) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        self.render_report(&mut stdout, report)
    }

    /// Format a compiled rule set as plain text
    pub fn format_rules(&self, patterns: &[CompiledPattern]) -> String {
        let mut buffer = NoColor::new(Vec::new());
        let _ = self.render_rules(&mut buffer, patterns);
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }

    /// Write a compiled rule set to stdout
    pub fn write_rules(&self, patterns: &[CompiledPattern]) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        self.render_rules(&mut stdout, patterns)
    }

    fn render_report<W: WriteColor>(&self, out: &mut W, report: &CheckReport) -> io::Result<()> {
        if report.passed() {
            return Ok(());
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "ERROR:")?;
        out.reset()?;
        writeln!(out, " the following files must not exist:")?;
        writeln!(out)?;

        for violation in &report.violations {
            write!(out, "{}", violation.path)?;
            if let ViolationKind::Forbidden { pattern, location } = &violation.kind {
                out.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(out, "  (forbidden by !{} at {})", pattern, location)?;
                out.reset()?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    fn render_rules<W: WriteColor>(&self, out: &mut W, patterns: &[CompiledPattern]) -> io::Result<()> {
        let locations: Vec<String> = patterns
            .iter()
            .map(|pattern| format!("({})", pattern.location))
            .collect();
        let width = locations.iter().map(String::len).max().unwrap_or(0);

        for (location, pattern) in locations.iter().zip(patterns) {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, "{:<width$}", location)?;
            out.reset()?;

            if pattern.negated {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            }
            writeln!(out, "  {}", pattern)?;
            out.reset()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::checker::Violation;
    use crate::types::SourceLocation;

    fn report(violations: Vec<Violation>) -> CheckReport {
        CheckReport {
            violations,
            files_checked: 3,
            patterns_applied: 2,
        }
    }

    #[test]
    fn test_passed_report_is_empty() {
        let formatter = HumanFormatter::new(ColorOption::Never);
        assert_eq!(formatter.format_report(&report(vec![])), "");
    }

    #[test]
    fn test_report_lists_violations() {
        let formatter = HumanFormatter::new(ColorOption::Never);
        let output = formatter.format_report(&report(vec![
            Violation {
                path: "README.txt".to_string(),
                kind: ViolationKind::NotAllowed,
            },
            Violation {
                path: "dist/app.js".to_string(),
                kind: ViolationKind::Forbidden {
                    pattern: "dist/**".to_string(),
                    location: SourceLocation::new(".treeguard", 3),
                },
            },
        ]));

        assert_eq!(
            output,
            "ERROR: the following files must not exist:\n\n\
             README.txt\n\
             dist/app.js  (forbidden by !dist/** at .treeguard:3)\n"
        );
    }

    #[test]
    fn test_rules_are_aligned() {
        let formatter = HumanFormatter::new(ColorOption::Always);
        let output = formatter.format_rules(&[
            CompiledPattern::new("LICENSE", false, SourceLocation::new(".treeguard", 1)),
            CompiledPattern::new("dist/**", true, SourceLocation::new(".treeguard", 12)),
        ]);

        assert_eq!(
            output,
            "(.treeguard:1)   LICENSE\n(.treeguard:12)  !dist/**\n"
        );
    }

    #[test]
    fn test_empty_rules() {
        let formatter = HumanFormatter::new(ColorOption::Never);
        assert_eq!(formatter.format_rules(&[]), "");
    }
}
