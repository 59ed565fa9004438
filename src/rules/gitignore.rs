//! `.gitignore` ingestion
//!
//! A project may opt in to treating files ignored by git as allowed. The root
//! ignore file is parsed with the `ignore` crate's gitignore matcher, so
//! anchoring, directory-only lines and `!` re-inclusions follow git's own
//! rules. Negative rules in the rules file still apply to ignored files.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Name of the ignore file read from the project root
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Snapshot paths are already relative, so the matcher root must not strip
/// any prefix from them.
const RELATIVE_ROOT: &str = ".";

/// Paths ignored by a project's root `.gitignore`
#[derive(Debug, Clone)]
pub struct IgnoredPaths {
    matcher: Gitignore,
}

impl IgnoredPaths {
    /// Reads `<directory>/.gitignore`
    ///
    /// A missing file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read, or the glob error of
    /// the first line that does not parse.
    pub fn load(directory: &Path) -> Result<Option<Self>, ignore::Error> {
        let path = directory.join(GITIGNORE_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no gitignore to ingest");
            return Ok(None);
        }

        let mut builder = GitignoreBuilder::new(RELATIVE_ROOT);
        if let Some(error) = builder.add(&path) {
            return Err(error);
        }
        let ignored = Self {
            matcher: builder.build()?,
        };

        tracing::info!(
            path = %path.display(),
            ignores = ignored.matcher.num_ignores(),
            whitelists = ignored.matcher.num_whitelists(),
            "ingested gitignore"
        );
        Ok(Some(ignored))
    }

    /// Builds the matcher from gitignore lines held in memory
    ///
    /// # Errors
    ///
    /// Returns the glob error of the first line that does not parse.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, ignore::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = GitignoreBuilder::new(RELATIVE_ROOT);
        for line in lines {
            builder.add_line(None, line)?;
        }
        Ok(Self {
            matcher: builder.build()?,
        })
    }

    /// Returns true if the file at `path`, or one of its parent directories,
    /// is ignored
    pub fn is_ignored(&self, path: &str) -> bool {
        self.matcher
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }

    /// Number of ignore and re-inclusion lines
    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }
}
