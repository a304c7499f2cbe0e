//! # Scribe
//!
//! An embedded document store that keeps every record as a JSON file:
//! - One directory per collection, one `<name>.json` file per resource
//! - Crash-consistent writes (stage to `.json.tmp`, then rename)
//! - Per-collection write locks, lock-free reads
//! - Human-readable, pretty-printed records
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Callers                              │
//! │                   (Multiple Threads)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │          write / read / read_all / delete                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ LockRegistry│          │    paths    │
//!   │(1 per coll.)│          │ (resolver)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                     {root}/{collection}/{resource}.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use scribe::Store;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let store = Store::open_path("./db")?;
//! store.write("users", "john", &User { name: "John".into() })?;
//! let john: User = store.read("users", "john")?;
//! store.delete("users", "john")?;
//! # Ok::<(), scribe::ScribeError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logger;

pub mod storage;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ScribeError, Result};
pub use config::{Config, SyncStrategy};
pub use logger::{ConsoleLogger, Level, Logger, NullLogger};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Scribe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
