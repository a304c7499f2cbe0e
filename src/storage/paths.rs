//! Path Resolver
//!
//! Pure mapping from (collection, resource) names to filesystem paths.
//! Only `resolve_existing` touches the disk, and only to stat.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ScribeError};

/// Extension of a stored record
pub const RECORD_EXTENSION: &str = ".json";

/// Suffix appended to a record path while it is being written
pub const TEMP_SUFFIX: &str = ".tmp";

/// What an existing path turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A directory (a collection, or anything else that is a directory)
    Directory(PathBuf),

    /// A record file (or any other non-directory entry)
    File(PathBuf),
}

impl Resolved {
    /// The path that actually exists on disk
    pub fn path(&self) -> &Path {
        match self {
            Resolved::Directory(path) | Resolved::File(path) => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Resolved::Directory(_))
    }
}

/// `root/collection`
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// `root/collection/resource.json`
///
/// The extension is appended to the name, so `v1.2` maps to `v1.2.json`.
pub fn resource_path(root: &Path, collection: &str, resource: &str) -> PathBuf {
    with_suffix(&collection_dir(root, collection).join(resource), RECORD_EXTENSION)
}

/// Sibling temp file a record is staged in before the rename
/// `users/john.json` → `users/john.json.tmp`
pub fn temp_path(record: &Path) -> PathBuf {
    with_suffix(record, TEMP_SUFFIX)
}

/// True for a staged write left behind (`*.json.tmp`)
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(".json.tmp"))
        .unwrap_or(false)
}

/// True when `name` is exactly one normal path component
///
/// Rejects `.`, `..`, absolute paths, prefixes and any embedded or trailing
/// separator, so a name can never address anything outside its parent.
pub fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) => segment == name,
        _ => false,
    }
}

/// Resolve a path given without its `.json` extension
///
/// The bare path wins if it exists (this is how collection directories are
/// found); otherwise `path.json` is tried. Neither existing is `NotFound`.
pub fn resolve_existing(path: &Path) -> Result<Resolved> {
    if let Some(resolved) = stat(path)? {
        return Ok(resolved);
    }

    let record = with_suffix(path, RECORD_EXTENSION);
    match stat(&record)? {
        Some(resolved) => Ok(resolved),
        None => Err(ScribeError::not_found(path)),
    }
}

/// Lexically clean a path
///
/// - drops `.` components and repeated separators
/// - folds `name/..`
/// - keeps leading `..` on relative paths, drops `..` directly under the root
/// - an empty result becomes `.`
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

// =============================================================================
// Private Helpers
// =============================================================================

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// `Ok(None)` when the path does not exist
fn stat(path: &Path) -> Result<Option<Resolved>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Some(Resolved::Directory(path.to_path_buf()))),
        Ok(_) => Ok(Some(Resolved::File(path.to_path_buf()))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScribeError::io(path)(e)),
    }
}
