//! Configuration for Scribe
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::logger::{ConsoleLogger, Logger};

/// Main configuration for a Scribe store
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory of the store
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {collection}/
    ///           ├── {resource}.json
    ///           └── {resource}.json.tmp   (only while a write is in flight)
    pub data_dir: PathBuf,

    /// Sync strategy: whether record writes are fsynced before they become visible
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------
    /// Receives the store's diagnostic messages
    pub logger: Arc<dyn Logger>,
}

/// Record write sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStrategy {
    /// Rename without fsync; the OS decides when bytes reach the disk
    #[default]
    OsBuffered,

    /// fsync the temp file before the rename and the directory after it
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./scribe_data"),
            sync_strategy: SyncStrategy::OsBuffered,
            logger: Arc::new(ConsoleLogger::default()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("sync_strategy", &self.sync_strategy)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root of every collection)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the record write sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Replace the default console logger
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.config.logger = logger;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
