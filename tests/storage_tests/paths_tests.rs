//! Tests for the path resolver
//!
//! These tests verify:
//! - Collection/resource/temp path construction
//! - Existence resolution (bare path first, then `.json`)
//! - Lexical normalization of the root path

use std::fs;
use std::path::{Path, PathBuf};

use scribe::storage::paths::{
    collection_dir, is_single_segment, is_temp_file, normalize, resolve_existing, resource_path,
    temp_path,
};
use scribe::storage::Resolved;
use tempfile::TempDir;

// =============================================================================
// Path Construction Tests
// =============================================================================

#[test]
fn test_collection_dir() {
    assert_eq!(collection_dir(Path::new("db"), "users"), PathBuf::from("db/users"));
}

#[test]
fn test_resource_path_appends_extension() {
    assert_eq!(
        resource_path(Path::new("db"), "users", "john"),
        PathBuf::from("db/users/john.json")
    );
}

#[test]
fn test_resource_path_keeps_dotted_names() {
    assert_eq!(
        resource_path(Path::new("db"), "releases", "v1.2"),
        PathBuf::from("db/releases/v1.2.json")
    );
}

#[test]
fn test_temp_path() {
    let record = resource_path(Path::new("db"), "users", "john");
    assert_eq!(temp_path(&record), PathBuf::from("db/users/john.json.tmp"));
}

#[test]
fn test_is_temp_file() {
    assert!(is_temp_file(Path::new("db/users/john.json.tmp")));
    assert!(!is_temp_file(Path::new("db/users/john.json")));
    assert!(!is_temp_file(Path::new("db/users/notes.tmp")));
    assert!(!is_temp_file(Path::new("db/users")));
}

#[test]
fn test_is_single_segment() {
    assert!(is_single_segment("users"));
    assert!(is_single_segment("v1.2"));
    assert!(is_single_segment("john.json"));

    assert!(!is_single_segment(""));
    assert!(!is_single_segment("."));
    assert!(!is_single_segment(".."));
    assert!(!is_single_segment("../x"));
    assert!(!is_single_segment("./x"));
    assert!(!is_single_segment("a/b"));
    assert!(!is_single_segment("a/"));
    assert!(!is_single_segment("/abs"));
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_resolve_record_without_extension() {
    let temp = TempDir::new().unwrap();
    let record = temp.path().join("john.json");
    fs::write(&record, b"{}").unwrap();

    let resolved = resolve_existing(&temp.path().join("john")).unwrap();

    assert_eq!(resolved, Resolved::File(record));
    assert!(!resolved.is_dir());
}

#[test]
fn test_resolve_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("users");
    fs::create_dir(&dir).unwrap();

    let resolved = resolve_existing(&dir).unwrap();

    assert!(resolved.is_dir());
    assert_eq!(resolved.path(), dir.as_path());
}

#[test]
fn test_resolve_bare_path_wins() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("users");
    fs::create_dir(&dir).unwrap();
    fs::write(temp.path().join("users.json"), b"{}").unwrap();

    assert_eq!(resolve_existing(&dir).unwrap(), Resolved::Directory(dir));
}

#[test]
fn test_resolve_missing() {
    let temp = TempDir::new().unwrap();

    let err = resolve_existing(&temp.path().join("ghost")).unwrap_err();

    assert!(err.is_not_found());
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[test]
fn test_normalize_relative() {
    assert_eq!(normalize(Path::new("./a//b/../c")), PathBuf::from("a/c"));
    assert_eq!(normalize(Path::new("db/")), PathBuf::from("db"));
}

#[test]
fn test_normalize_empty_and_dot() {
    assert_eq!(normalize(Path::new("")), PathBuf::from("."));
    assert_eq!(normalize(Path::new(".")), PathBuf::from("."));
    assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
}

#[test]
fn test_normalize_leading_parent_dirs() {
    assert_eq!(normalize(Path::new("../../db")), PathBuf::from("../../db"));
    assert_eq!(normalize(Path::new("a/../../db")), PathBuf::from("../db"));
}

#[cfg(unix)]
#[test]
fn test_normalize_absolute() {
    assert_eq!(normalize(Path::new("/var/./lib/../db")), PathBuf::from("/var/db"));
    assert_eq!(normalize(Path::new("/../db")), PathBuf::from("/db"));
    assert_eq!(normalize(Path::new("/")), PathBuf::from("/"));
}
