//! Pluggable flat key-value backends keyed by geohash.
//!
//! Where the trie store attaches many keyed entries to each cell, a backend
//! holds a single value per geohash and answers region queries with an
//! ordered prefix scan. Lexicographic order of geohash strings equals the
//! trie's pre-order under the alphabet, so a range scan starting at the
//! prefix visits exactly the cell's descendants.

use crate::compute::geohash::Geohash;
use crate::error::Result;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Bound;

#[cfg(feature = "snapshot")]
mod file;
mod memory;
#[cfg(feature = "snapshot")]
pub mod snapshot;

#[cfg(feature = "snapshot")]
pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "snapshot")]
pub use snapshot::SnapshotFile;

/// Trait for storage backend implementations
///
/// Every operation other than `open` fails with
/// [`GeotrieError::BackendClosed`](crate::GeotrieError::BackendClosed)
/// while the backend is closed.
pub trait StorageBackend: Send + Sync {
    /// Make the backend ready for use, loading any persisted state
    fn open(&mut self) -> Result<()>;

    /// Persist pending state and release the backend
    fn close(&mut self) -> Result<()>;

    /// Insert or replace the value stored at a geohash
    fn set(&mut self, geohash: &Geohash, value: Bytes) -> Result<()>;

    /// Get the value stored at a geohash
    fn get(&self, geohash: &Geohash) -> Result<Option<Bytes>>;

    /// Returns every entry whose geohash starts with `prefix`, in key order
    fn scan_prefix(&self, prefix: &Geohash) -> Result<BTreeMap<String, Bytes>>;

    /// Number of stored geohashes
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Flush any pending writes to persistent storage
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Ordered prefix scan over a map keyed by geohash strings.
pub(crate) fn scan_ordered(map: &BTreeMap<String, Bytes>, prefix: &str) -> BTreeMap<String, Bytes> {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
