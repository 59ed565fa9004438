//! Test utilities for treeguard integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Writes `contents` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Creates a project with the given rules file and empty files at `paths`
pub fn project(rules: &str, paths: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), ".treeguard", rules);
    for path in paths {
        if let Some(directory) = path.strip_suffix('/') {
            fs::create_dir_all(temp_dir.path().join(directory)).unwrap();
        } else {
            write_file(temp_dir.path(), path, "");
        }
    }
    temp_dir
}
