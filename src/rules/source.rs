//! Line preprocessing for rules files
//!
//! Strips comments and drops blank lines while remembering where every
//! surviving line sits in the original text.

/// Starts a comment that runs to the end of the line
pub const COMMENT_SYMBOL: char = '#';

/// One logical line of a rules file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line text with comments removed and whitespace trimmed
    pub text: String,
    /// 1-based position of the line in the original text
    pub line_number: u32,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line_number: u32) -> Self {
        Self {
            text: text.into(),
            line_number,
        }
    }
}

/// Splits `contents` into logical lines
///
/// Everything from the first `#` onwards is dropped (there is no quoting).
/// Lines that are empty afterwards are discarded; line numbers keep counting
/// them so diagnostics point at the real file position.
pub fn preprocess(contents: &str) -> Vec<SourceLine> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = strip_comment(raw).trim();
            (!text.is_empty()).then(|| SourceLine::new(text, index as u32 + 1))
        })
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_SYMBOL) {
        Some(index) => &line[..index],
        None => line,
    }
}
