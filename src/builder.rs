//! Store builder for flexible configuration
//!
//! This module provides a builder pattern for creating stores with a custom
//! bounding region, default precision and snapshot persistence.

use crate::config::Config;
use crate::db::DB;
use crate::error::Result;
use geotrie_types::Region;
use std::path::PathBuf;

/// Builder for store configuration with optional snapshot persistence.
#[derive(Debug, Default)]
pub struct DBBuilder {
    snapshot_path: Option<PathBuf>,
    config: Config,
}

impl DBBuilder {
    /// Create a new builder with default in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist to a snapshot file at `path`, loading it on build if it exists.
    #[cfg(feature = "snapshot")]
    pub fn snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Configure for in-memory storage with no persistence.
    pub fn in_memory(mut self) -> Self {
        self.snapshot_path = None;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Bounding region for the codec.
    pub fn region(mut self, region: Region) -> Self {
        self.config = self.config.with_region(region);
        self
    }

    /// Precision used by location writes.
    pub fn precision(mut self, precision: usize) -> Self {
        self.config = self.config.with_precision(precision);
        self
    }

    /// Snapshot automatically after `ops` mutating operations.
    #[cfg(feature = "snapshot")]
    pub fn auto_snapshot_ops(mut self, ops: usize) -> Self {
        self.config = self.config.with_auto_snapshot_ops(ops);
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<DB> {
        match self.snapshot_path {
            #[cfg(feature = "snapshot")]
            Some(path) => DB::open_with_config(path, self.config),
            _ => DB::memory_with_config(self.config),
        }
    }
}
