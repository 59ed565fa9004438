#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All violation (or rule) records, in report order
//! 2. One status record

use crate::engine::checker::{CheckReport, ViolationKind};
use crate::types::CompiledPattern;
use serde::Serialize;

/// JSONL output formatter
///
/// Formats check reports and rule sets as JSON Lines (one JSON object per line).
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a check report as JSONL
    ///
    /// Returns a string with one JSON object per line:
    /// - First: All violation records, in report order
    /// - Finally: One status record
    pub fn format_report(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        for violation in &report.violations {
            let (pattern, rule) = match &violation.kind {
                ViolationKind::NotAllowed => (None, None),
                ViolationKind::Forbidden { pattern, location } => {
                    (Some(pattern.clone()), Some(location.to_string()))
                }
            };
            push_line(
                &mut output,
                &ViolationRecord {
                    record_type: "violation",
                    path: violation.path.clone(),
                    reason: violation.kind.as_str(),
                    pattern,
                    rule,
                },
            );
        }

        push_line(
            &mut output,
            &CheckStatusRecord {
                record_type: "status",
                passed: report.passed(),
                files_checked: report.files_checked as u64,
                patterns_applied: report.patterns_applied as u64,
                violations: report.violations.len() as u64,
            },
        );

        output
    }

    /// Format a compiled rule set as JSONL
    pub fn format_rules(&self, patterns: &[CompiledPattern]) -> String {
        let mut output = String::new();

        for pattern in patterns {
            push_line(
                &mut output,
                &RuleRecord {
                    record_type: "rule",
                    pattern: pattern.pattern.clone(),
                    negated: pattern.negated,
                    file: pattern.location.source_file.clone(),
                    line: pattern.location.line,
                },
            );
        }

        let negative = patterns.iter().filter(|p| p.negated).count() as u64;
        push_line(
            &mut output,
            &RulesStatusRecord {
                record_type: "status",
                rules: patterns.len() as u64,
                positive: patterns.len() as u64 - negative,
                negative,
            },
        );

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Violation record for JSONL output
#[derive(Debug, Serialize)]
struct ViolationRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    path: String,
    reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

/// Status record closing a check report
#[derive(Debug, Serialize)]
struct CheckStatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    patterns_applied: u64,
    violations: u64,
}

/// One compiled pattern
#[derive(Debug, Serialize)]
struct RuleRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    pattern: String,
    negated: bool,
    file: String,
    line: u32,
}

/// Status record closing a rule listing
#[derive(Debug, Serialize)]
struct RulesStatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    rules: u64,
    positive: u64,
    negative: u64,
}
