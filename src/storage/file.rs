//! Snapshot-backed storage backend.

use super::snapshot::SnapshotFile;
use super::{StorageBackend, scan_ordered};
use crate::compute::geohash::Geohash;
use crate::config::SnapshotConfig;
use crate::error::{GeotrieError, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;

/// Ordered map persisted to a snapshot file.
///
/// Created closed. `open` loads the file (creating it when missing), `sync`
/// and `close` write the whole map back.
pub struct FileBackend {
    snapshot: SnapshotFile,
    data: BTreeMap<String, Bytes>,
    open: bool,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            snapshot: SnapshotFile::new(path, SnapshotConfig::default()),
            data: BTreeMap::new(),
            open: false,
        }
    }

    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(GeotrieError::BackendClosed)
        }
    }

    fn write_back(&mut self) -> Result<()> {
        let records: Vec<(&String, &Bytes)> = self.data.iter().collect();
        self.snapshot.save(&records)
    }
}

impl StorageBackend for FileBackend {
    fn open(&mut self) -> Result<()> {
        if self.open {
            return Ok(());
        }

        if !self.snapshot.exists() {
            self.snapshot.save::<(String, Bytes)>(&[])?;
        }

        let records: Vec<(String, Bytes)> = self.snapshot.load()?;
        self.data = records.into_iter().collect();
        self.open = true;
        log::debug!(
            "Opened file backend {} with {} geohashes",
            self.path().display(),
            self.data.len()
        );
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.write_back()?;
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

    fn sync(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.write_back()
    }
}
