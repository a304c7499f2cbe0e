//! Store Module
//!
//! The record store: one JSON file per resource, one directory per collection.
//!
//! ## Responsibilities
//! - Bootstrap the root directory on open
//! - Serialize writes and deletes per collection
//! - Publish records atomically (temp file + rename)
//! - Read, enumerate and delete records

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, ScribeError};
use crate::logger::Logger;
use crate::storage::paths;
use crate::storage::{LockRegistry, Resolved};

/// An embedded document store rooted at one directory
///
/// ## Concurrency Model: per-collection writer, lock-free readers
///
/// - **Writes / deletes**: serialized per collection by the lock registry
///   - Same collection: one mutation at a time
///   - Different collections: fully parallel
///
/// - **Reads** (read / read_all): take no lock
///   - A record only changes through `rename`, so a reader sees either the
///     previous complete file or the new complete file
///
/// Nothing here coordinates across processes. Two stores opened on the same
/// directory (in one process or several) do not share locks.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Normalized root directory
    root: PathBuf,

    /// One lock per collection touched by a mutation
    locks: LockRegistry,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Normalize the root path
    /// 2. Reuse the directory if it exists, otherwise create it (with parents)
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        let root = paths::normalize(&config.data_dir);
        let logger = Arc::clone(&config.logger);

        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(format_args!(
                    "Using '{}' (database already exists)",
                    root.display()
                ));
            }
            Ok(_) => {
                return Err(ScribeError::Io {
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "path exists but is not a directory",
                    ),
                    path: root,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                logger.debug(format_args!("Creating database at '{}'...", root.display()));
                create_dir_all(&root)?;
            }
            Err(e) => return Err(ScribeError::io(&root)(e)),
        }

        Ok(Self {
            config,
            root,
            locks: LockRegistry::new(),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().data_dir(path.as_ref()).build();
        Self::open(config)
    }

    /// Write a record, creating the collection if needed
    ///
    /// Steps:
    /// 1. Acquire the collection lock
    /// 2. Serialize as tab-indented JSON plus a trailing newline
    /// 3. Stage the bytes in `<resource>.json.tmp`
    /// 4. Rename over `<resource>.json`
    ///
    /// A crash before step 4 leaves the previous version intact (or no file
    /// on a first write) and at most a stale temp file.
    ///
    /// Both names must be a single path segment: empty names, `.`, `..` and
    /// anything containing a separator are `InvalidArgument`.
    pub fn write<T>(&self, collection: &str, resource: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        require_name(collection, "missing collection name, no place to save the record")?;
        require_name(resource, "missing resource name, unable to save an unnamed record")?;

        let lock = self.locks.acquire(collection);
        let _guard = lock.lock();

        let dir = paths::collection_dir(&self.root, collection);
        let record = paths::resource_path(&self.root, collection, resource);
        let temp = paths::temp_path(&record);

        create_dir_all(&dir)?;
        let bytes = encode(value)?;

        let sync = self.config.sync_strategy == SyncStrategy::EveryWrite;
        if let Err(e) = stage(&temp, &bytes, sync) {
            let _ = fs::remove_file(&temp);
            return Err(ScribeError::io(&temp)(e));
        }

        if let Err(e) = fs::rename(&temp, &record) {
            let _ = fs::remove_file(&temp);
            return Err(ScribeError::io(&record)(e));
        }

        if sync {
            sync_dir(&dir).map_err(ScribeError::io(&dir))?;
        }

        Ok(())
    }

    /// Read a record into a value of type `T`
    ///
    /// `resource` is resolved as-is first, then with `.json` appended.
    /// A name that resolves to a directory or to a staged `.json.tmp` file is
    /// not a record (`NotFound`).
    pub fn read<T>(&self, collection: &str, resource: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        require_name(collection, "missing collection name, unable to read the record")?;
        require_name(resource, "missing resource name, unable to read an unnamed record")?;

        let target = paths::collection_dir(&self.root, collection).join(resource);
        let record = match paths::resolve_existing(&target)? {
            Resolved::File(path) if !paths::is_temp_file(&path) => path,
            _ => return Err(ScribeError::not_found(target)),
        };

        let content = read_to_string(&record)?;
        decode(&record, &content)
    }

    /// Raw JSON text of every record in a collection
    ///
    /// Order is whatever the OS returns. Staged temp files and
    /// subdirectories are skipped. The first unreadable file aborts the
    /// whole listing.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>> {
        let records = self.collect_records(collection)?;
        Ok(records.into_iter().map(|(_, content)| content).collect())
    }

    /// Every record in a collection, decoded into `T`
    ///
    /// Same enumeration as [`Store::read_all`]; the first record that does
    /// not decode aborts with `Decode`.
    pub fn read_all_as<T>(&self, collection: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.collect_records(collection)?
            .iter()
            .map(|(path, content)| decode(path, content))
            .collect()
    }

    /// Delete a record, or a whole collection when `resource` is empty
    ///
    /// The target resolves like [`Store::read`]. A directory is removed
    /// recursively, whichever slot named it. Nothing to delete is `NotFound`.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        require_name(collection, "missing collection name, refusing to delete the store root")?;

        let lock = self.locks.acquire(collection);
        let _guard = lock.lock();

        let dir = paths::collection_dir(&self.root, collection);
        let target = if resource.is_empty() {
            dir
        } else {
            require_name(resource, "resource name must be a single path segment")?;
            dir.join(resource)
        };

        match paths::resolve_existing(&target)? {
            Resolved::Directory(path) => fs::remove_dir_all(&path).map_err(ScribeError::io(&path)),
            Resolved::File(path) => fs::remove_file(&path).map_err(ScribeError::io(&path)),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the (normalized) root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the configured logger
    pub fn logger(&self) -> &dyn Logger {
        self.config.logger.as_ref()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// (path, raw content) of every record file in a collection
    fn collect_records(&self, collection: &str) -> Result<Vec<(PathBuf, String)>> {
        require_name(collection, "missing collection name, unable to list records")?;

        let dir = paths::collection_dir(&self.root, collection);
        if !paths::resolve_existing(&dir)?.is_dir() {
            return Err(ScribeError::not_found(dir));
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir).map_err(ScribeError::io(&dir))? {
            let entry = entry.map_err(ScribeError::io(&dir))?;
            let path = entry.path();

            if paths::is_temp_file(&path) {
                continue;
            }
            if entry.file_type().map_err(ScribeError::io(&path))?.is_dir() {
                continue;
            }

            let content = read_to_string(&path)?;
            records.push((path, content));
        }

        Ok(records)
    }
}

// =============================================================================
// File Helpers
// =============================================================================

/// Names must be non-empty and stay inside their parent directory
fn require_name(name: &str, message: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ScribeError::InvalidArgument(message.to_string()));
    }
    if !paths::is_single_segment(name) {
        return Err(ScribeError::InvalidArgument(format!(
            "'{}' is not a single path segment",
            name
        )));
    }
    Ok(())
}

/// `mkdir -p` with owner-writable, world-readable permissions
fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path).map_err(ScribeError::io(path))
}

fn encode<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut serializer).map_err(ScribeError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn decode<T>(path: &Path, content: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(content).map_err(|source| ScribeError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the staged copy, optionally fsyncing it before it gets renamed
fn stage(temp: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let mut file = File::create(temp)?;
    file.write_all(bytes)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

/// fsync a directory so a rename inside it is durable
///
/// Not every platform can open a directory; that case is skipped. A failing
/// fsync on an opened directory is returned.
fn sync_dir(dir: &Path) -> io::Result<()> {
    match File::open(dir) {
        Ok(handle) => handle.sync_all(),
        Err(_) => Ok(()),
    }
}

/// A file that vanished between resolve and read is reported as `NotFound`
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ScribeError::not_found(path)
        } else {
            ScribeError::io(path)(e)
        }
    })
}
