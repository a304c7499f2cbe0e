//! Storage Module
//!
//! Filesystem layout and per-collection locking.
//!
//! ## Responsibilities
//! - Map collection/resource names to paths
//! - Resolve a name to an existing record file or collection directory
//! - Hand out one exclusive lock per collection
//!
//! ## On-Disk Layout
//! ```text
//! {root}/
//! ├── users/                  (collection)
//! │   ├── john.json           (resource)
//! │   ├── paul.json
//! │   └── paul.json.tmp       (staged write, never read as a record)
//! └── orders/
//!     └── 1001.json
//! ```

pub mod paths;
mod locks;

pub use locks::{CollectionLock, LockRegistry};
pub use paths::Resolved;
