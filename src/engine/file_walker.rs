//! Directory traversal into an in-memory snapshot
//!
//! A run walks the project tree exactly once. Every glob query issued while
//! compiling and checking rules is answered from the resulting snapshot, so
//! all queries of a run observe the same state of the tree.

use crate::types::GlobPattern;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Version-control metadata directory, never part of a snapshot
const GIT_DIRECTORY: &str = ".git";

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kind of a snapshot entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// A path in the snapshot, relative to the snapshot root
///
/// Paths always use `/` as separator and never carry a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A single, immutable view of a directory tree
///
/// Entries are kept in depth-first order with siblings sorted by name, which
/// is also the order queries report their matches in.
#[derive(Debug, Clone, Default)]
pub struct TreeSnapshot {
    root: PathBuf,
    entries: Vec<TreeEntry>,
}

impl TreeSnapshot {
    /// Walks `root` and records every file and directory below it
    ///
    /// Hidden files are included and ignore files (`.gitignore`, `.ignore`)
    /// are not consulted: the rules decide what may exist. The `.git`
    /// directory is always skipped. Entries matching any `exclude` pattern are
    /// left out, and an excluded directory is not descended into.
    ///
    /// # Errors
    ///
    /// Returns `FileWalkerError::InvalidGlob` for a malformed exclude pattern
    /// and `FileWalkerError::Walk` as soon as any entry cannot be read.
    pub fn capture(root: &Path, exclude: &[GlobPattern]) -> Result<Self, FileWalkerError> {
        if !root.is_dir() {
            return Err(FileWalkerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("project directory does not exist: {}", root.display()),
            )));
        }

        let exclude_set = build_globset(exclude)?;
        let filter_root = root.to_path_buf();

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.depth() > 0 && entry.file_name() == GIT_DIRECTORY {
                    return false;
                }
                match relative_path(&filter_root, entry.path()) {
                    Some(relative) if !relative.is_empty() => !exclude_set.is_match(&relative),
                    _ => true,
                }
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result?;
            if entry.depth() == 0 {
                continue;
            }

            let Some(path) = relative_path(root, entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping entry outside of the project root");
                continue;
            };

            let kind = if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(TreeEntry { path, kind });
        }

        entries.sort_by(|a, b| compare_paths(&a.path, &b.path));
        tracing::debug!(root = %root.display(), entries = entries.len(), "captured directory snapshot");

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Builds a snapshot from a list of relative paths without touching disk
    ///
    /// A path ending in `/` denotes a directory, anything else a file. Parent
    /// directories are added implicitly.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut files = BTreeSet::new();
        let mut directories = BTreeSet::new();

        for raw in paths {
            let raw = raw.as_ref().trim_start_matches("./");
            let is_dir = raw.ends_with('/');
            let path = raw.trim_end_matches('/');
            if path.is_empty() {
                continue;
            }

            let mut parent = path;
            while let Some((head, _)) = parent.rsplit_once('/') {
                directories.insert(head.to_string());
                parent = head;
            }

            if is_dir {
                directories.insert(path.to_string());
            } else {
                files.insert(path.to_string());
            }
        }

        let mut entries: Vec<TreeEntry> = directories
            .into_iter()
            .map(TreeEntry::directory)
            .chain(files.into_iter().map(TreeEntry::file))
            .collect();
        entries.sort_by(|a, b| compare_paths(&a.path, &b.path));

        Self {
            root: PathBuf::from("."),
            entries,
        }
    }

    /// Directory the snapshot was taken from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All entries, files and directories, in snapshot order
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// All file paths in snapshot order
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_dir())
            .map(|entry| entry.path.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Orders paths depth-first, comparing segment by segment
fn compare_paths(a: &str, b: &str) -> Ordering {
    a.split('/').cmp(b.split('/'))
}

/// Converts `path` to a `/`-separated string relative to `root`
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(segments.join("/"))
}

/// Builds a GlobSet from patterns
fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern.as_str())
            .literal_separator(true)
            .build()
            .map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| FileWalkerError::InvalidGlob {
        pattern: "<globset>".to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(snapshot: &TreeSnapshot) -> Vec<&str> {
        snapshot.entries().iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_from_paths_infers_parent_directories() {
        let snapshot = TreeSnapshot::from_paths(["lib/a/b.js", "README.md"]);
        assert_eq!(paths(&snapshot), vec!["README.md", "lib", "lib/a", "lib/a/b.js"]);
        assert!(snapshot.entries()[1].is_dir());
        assert!(snapshot.entries()[2].is_dir());
        assert_eq!(snapshot.file_count(), 2);
    }

    #[test]
    fn test_from_paths_trailing_slash_is_directory() {
        let snapshot = TreeSnapshot::from_paths(["dist/"]);
        assert_eq!(snapshot.entries(), &[TreeEntry::directory("dist")]);
        assert_eq!(snapshot.files().count(), 0);
    }

    #[test]
    fn test_depth_first_order() {
        let snapshot = TreeSnapshot::from_paths(["lib-x.js", "lib/a.js", "lib2/b.js"]);
        assert_eq!(
            paths(&snapshot),
            vec!["lib", "lib/a.js", "lib-x.js", "lib2", "lib2/b.js"]
        );
    }

    #[test]
    fn test_build_globset_invalid() {
        let patterns = vec![GlobPattern::new("[invalid")];
        assert!(build_globset(&patterns).is_err());
    }

    #[test]
    fn test_capture_basic() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("lib")).unwrap();
        fs::write(temp_dir.path().join("lib/a.js"), "").unwrap();
        fs::write(temp_dir.path().join(".hidden"), "").unwrap();

        let snapshot = TreeSnapshot::capture(temp_dir.path(), &[]).unwrap();
        assert_eq!(paths(&snapshot), vec![".hidden", "lib", "lib/a.js"]);
        assert_eq!(snapshot.root(), temp_dir.path());
    }

    #[test]
    fn test_capture_skips_git_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".git/objects")).unwrap();
        fs::write(temp_dir.path().join(".git/HEAD"), "ref").unwrap();
        fs::write(temp_dir.path().join(".gitignore"), "target/\n").unwrap();

        let snapshot = TreeSnapshot::capture(temp_dir.path(), &[]).unwrap();
        assert_eq!(paths(&snapshot), vec![".gitignore"]);
    }

    #[test]
    fn test_capture_does_not_honor_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();
        fs::write(temp_dir.path().join("debug.log"), "").unwrap();

        let snapshot = TreeSnapshot::capture(temp_dir.path(), &[]).unwrap();
        assert!(snapshot.files().any(|f| f == "debug.log"));
    }

    #[test]
    fn test_capture_with_exclude_prunes_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("target/debug")).unwrap();
        fs::write(temp_dir.path().join("target/debug/app"), "").unwrap();
        fs::write(temp_dir.path().join("Cargo.toml"), "").unwrap();

        let exclude = vec![GlobPattern::new("target")];
        let snapshot = TreeSnapshot::capture(temp_dir.path(), &exclude).unwrap();
        assert_eq!(paths(&snapshot), vec!["Cargo.toml"]);
    }

    #[test]
    fn test_capture_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = TreeSnapshot::capture(&temp_dir.path().join("nope"), &[]);
        assert!(matches!(result, Err(FileWalkerError::Io(_))));
    }
}
