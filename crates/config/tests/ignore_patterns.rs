//! Integration tests for `.tomeignore` pattern matching
#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;
use tempfile::TempDir;
use tome_config::{IGNORE_FILE_NAME, IgnoreMatcher};
use tome_core::path::AbsPath;

#[test]
fn test_ignore_patterns_with_negation() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::new(fs::canonicalize(temp.path()).unwrap()).unwrap();

    fs::write(
        root.as_path().join(IGNORE_FILE_NAME),
        r"
# Helper libraries sourced by scripts, never run directly
lib/
*.bak
README*

# Hide every experiment except the one that is ready
experimental/*
!experimental/ready

# Re-ignore a single file inside an otherwise visible dir
db/scratch
",
    )
    .unwrap();

    let matcher = IgnoreMatcher::load(&root).unwrap();

    // (path, is_dir, expected_ignored, description)
    let test_cases = [
        ("lib", true, true, "Directory pattern"),
        ("lib/common.sh", false, true, "Inside ignored directory"),
        ("deploy.bak", false, true, "Glob *.bak"),
        ("README.md", false, true, "Glob README*"),
        ("deploy", false, false, "No matching pattern"),
        ("experimental/wip", false, true, "Matches experimental/*"),
        ("experimental/ready", false, false, "Re-included by negation"),
        ("db/scratch", false, true, "Nested exact path"),
        ("db/backup", false, false, "Sibling of ignored file"),
    ];

    for (rel, is_dir, expected, description) in test_cases {
        let path = root.as_path().join(rel);
        assert_eq!(
            matcher.is_ignored(&path, is_dir),
            expected,
            "{description}: {rel}"
        );
    }
}

#[test]
fn test_no_ignore_file() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::new(fs::canonicalize(temp.path()).unwrap()).unwrap();

    let matcher = IgnoreMatcher::load(&root).unwrap();

    assert!(!matcher.is_ignored(&root.as_path().join("lib/common.sh"), false));
}
