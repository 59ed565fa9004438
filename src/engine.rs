//! Directory snapshot, glob queries and layout checking

pub mod checker;
pub mod file_walker;
pub mod matcher;

pub use checker::{CheckReport, Violation, ViolationKind, check, check_allowing};
pub use file_walker::{FileWalkerError, TreeSnapshot};
pub use matcher::{MatchError, PathMatcher};
