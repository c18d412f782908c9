//! In-memory storage backend implementation.

use super::{StorageBackend, scan_ordered};
use crate::compute::geohash::Geohash;
use crate::error::{GeotrieError, Result};
use bytes::Bytes;
use std::collections::BTreeMap;

/// In-memory storage backend using an ordered map
///
/// Created open. Closing discards the data.
pub struct MemoryBackend {
    data: BTreeMap<String, Bytes>,
    open: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            open: true,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(GeotrieError::BackendClosed)
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.data.clear();
        self.open = false;
        Ok(())
    }

    fn set(&mut self, geohash: &Geohash, value: Bytes) -> Result<()> {
        self.ensure_open()?;
        self.data.insert(geohash.as_str().to_string(), value);
        Ok(())
    }

    fn get(&self, geohash: &Geohash) -> Result<Option<Bytes>> {
        self.ensure_open()?;
        Ok(self.data.get(geohash.as_str()).cloned())
    }

    fn scan_prefix(&self, prefix: &Geohash) -> Result<BTreeMap<String, Bytes>> {
        self.ensure_open()?;
        Ok(scan_ordered(&self.data, prefix.as_str()))
    }

    fn len(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.data.len())
    }
}
