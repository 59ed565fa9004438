#![forbid(unsafe_code)]

//! Rules file language and its compiler
//!
//! The language has one rule per line:
//!
//! - `pattern` allows files matching `pattern`
//! - `!pattern` forbids files matching `pattern`
//! - `a => b` applies `b` only if `a` matches something (`!a => b`: only if
//!   it matches nothing)
//! - `%` in the left-hand side repeats the rule for every value it can take

pub mod compiler;
pub mod conditional;
pub mod gitignore;
pub mod parser;
pub mod placeholder;
pub mod source;

pub use compiler::compile;
pub use source::SourceLine;
