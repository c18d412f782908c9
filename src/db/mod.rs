//! Prefix store: a trie of geohash cells, each carrying a key/value map.
//!
//! Every operation validates its geohash first. Writes take the write lock;
//! reads and enumerations hold the read lock for their whole traversal, so
//! many readers proceed together while a writer is excluded.

use crate::compute::geohash::{Geohash, Geohasher};
use crate::config::Config;
use crate::error::{GeotrieError, Result};
use geotrie_types::{Location, StoreStats};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

mod node;

use node::Node;

#[cfg(feature = "snapshot")]
use crate::storage::SnapshotFile;
#[cfg(feature = "snapshot")]
use std::path::Path;

/// Data stored at each populated cell, keyed by geohash.
pub type RegionData = BTreeMap<String, BTreeMap<String, String>>;

#[cfg(feature = "snapshot")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SnapshotEntry {
    geohash: String,
    key: String,
    value: String,
}

struct Inner {
    root: Node,
    #[cfg(feature = "snapshot")]
    snapshot: Option<SnapshotFile>,
}

/// In-memory geohash prefix store.
///
/// Thread-safe: share it behind an `Arc`.
///
/// ```rust
/// use geotrie::DB;
///
/// let db = DB::memory()?;
/// db.set("9g3w81", "name", "Zocalo")?;
/// db.set("9g3w8", "city", "CDMX")?;
///
/// assert_eq!(db.get("9g3w81", "name")?, "Zocalo");
/// assert_eq!(db.get_all_children("9g3")?.len(), 2);
/// assert!(db.get("9g3w81", "missing").is_err());
/// # Ok::<(), geotrie::GeotrieError>(())
/// ```
pub struct DB {
    inner: RwLock<Inner>,
    hasher: Geohasher,
    config: Config,
    ops_count: AtomicU64,
}

impl DB {
    pub fn builder() -> crate::builder::DBBuilder {
        crate::builder::DBBuilder::new()
    }

    /// Create an in-memory store with default configuration.
    pub fn memory() -> Result<Self> {
        Self::memory_with_config(Config::default())
    }

    /// Create an in-memory store with custom configuration.
    pub fn memory_with_config(config: Config) -> Result<Self> {
        config.validate().map_err(GeotrieError::InvalidConfig)?;
        Ok(Self {
            inner: RwLock::new(Inner {
                root: Node::root(),
                #[cfg(feature = "snapshot")]
                snapshot: None,
            }),
            hasher: Geohasher::new(config.region),
            config,
            ops_count: AtomicU64::new(0),
        })
    }

    /// Open a store backed by a snapshot file, loading it if present.
    #[cfg(feature = "snapshot")]
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let db = Self::memory_with_config(config)?;
        let snapshot = SnapshotFile::new(path, db.config.snapshot.clone());
        let entries: Vec<SnapshotEntry> = snapshot.load()?;

        {
            let mut inner = db.inner.write();
            for entry in entries {
                let geohash =
                    Geohash::parse(entry.geohash).map_err(|_| GeotrieError::InvalidFormat)?;
                inner
                    .root
                    .walk_or_create(&geohash)
                    .data_mut()
                    .insert(entry.key, entry.value);
            }
            inner.snapshot = Some(snapshot);
        }

        Ok(db)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Codec over the configured region.
    pub fn hasher(&self) -> &Geohasher {
        &self.hasher
    }

    /// Stores `value` under `key` at `geohash`, creating the path as needed.
    pub fn set(
        &self,
        geohash: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let geohash = Geohash::parse(geohash)?;
        let mut inner = self.inner.write();
        inner
            .root
            .walk_or_create(&geohash)
            .data_mut()
            .insert(key.into(), value.into());
        self.after_write(&mut inner);
        Ok(())
    }

    /// Encodes `location` at the configured precision and stores the entry
    /// there. Returns the geohash used.
    pub fn insert_at(
        &self,
        location: Location,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Geohash> {
        let geohash = self.hasher.encode(location, self.config.precision);
        self.set(geohash.as_str(), key, value)?;
        Ok(geohash)
    }

    pub fn get(&self, geohash: &str, key: &str) -> Result<String> {
        let geohash = Geohash::parse(geohash)?;
        let inner = self.read();
        let node = Self::find(&inner.root, &geohash)?;
        node.data()
            .get(key)
            .cloned()
            .ok_or_else(|| GeotrieError::KeyNotFound {
                geohash: geohash.into_string(),
                key: key.to_string(),
            })
    }

    /// Every entry stored exactly at `geohash`.
    pub fn get_all_data(&self, geohash: &str) -> Result<BTreeMap<String, String>> {
        let geohash = Geohash::parse(geohash)?;
        let inner = self.read();
        let node = Self::find(&inner.root, &geohash)?;
        Ok(node
            .data()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Paths of `geohash` and every descendant that holds data, pre-order by
    /// alphabet index.
    pub fn get_all_children(&self, geohash: &str) -> Result<Vec<String>> {
        let geohash = Geohash::parse(geohash)?;
        let inner = self.read();
        let node = Self::find(&inner.root, &geohash)?;
        let mut results = Vec::new();
        node.collect_populated(&mut results);
        Ok(results)
    }

    /// Removes `key` at `geohash` and returns its value. The node stays in
    /// place even when its last entry goes; see [`prune`](Self::prune).
    pub fn delete(&self, geohash: &str, key: &str) -> Result<String> {
        let geohash = Geohash::parse(geohash)?;
        let mut inner = self.inner.write();
        let node = inner
            .root
            .walk_mut(&geohash)
            .ok_or_else(|| GeotrieError::GeohashNotFound(geohash.to_string()))?;
        let value = node
            .data_mut()
            .remove(key)
            .ok_or_else(|| GeotrieError::KeyNotFound {
                geohash: geohash.to_string(),
                key: key.to_string(),
            })?;
        self.after_write(&mut inner);
        Ok(value)
    }

    /// Empties the data at `geohash`, leaving descendants untouched.
    pub fn clear(&self, geohash: &str) -> Result<()> {
        let geohash = Geohash::parse(geohash)?;
        let mut inner = self.inner.write();
        let node = inner
            .root
            .walk_mut(&geohash)
            .ok_or_else(|| GeotrieError::GeohashNotFound(geohash.to_string()))?;
        node.data_mut().clear();
        self.after_write(&mut inner);
        Ok(())
    }

    /// Whether a node exists for `geohash`, populated or not.
    pub fn contains(&self, geohash: &str) -> Result<bool> {
        let geohash = Geohash::parse(geohash)?;
        Ok(self.read().root.walk(&geohash).is_some())
    }

    /// Every populated cell under `geohash` (inclusive) with its data.
    pub fn region_data(&self, geohash: &str) -> Result<RegionData> {
        let geohash = Geohash::parse(geohash)?;
        let inner = self.read();
        let node = Self::find(&inner.root, &geohash)?;
        let mut results = BTreeMap::new();
        node.collect_entries(&mut results);
        Ok(results)
    }

    /// Region data of `geohash` and its eight neighbours, merged.
    ///
    /// Neighbours are computed over the configured region. Cells with no node
    /// are skipped; if none of the nine cells holds anything the result is
    /// [`GeotrieError::GeohashNotFound`].
    pub fn neighbors_data(&self, geohash: &str) -> Result<RegionData> {
        let center = Geohash::parse(geohash)?;
        let neighbors = self.hasher.neighbors(&center);

        let inner = self.read();
        let mut results = BTreeMap::new();
        let cells = std::iter::once(&center).chain(neighbors.iter().map(|(_, cell)| cell));
        for cell in cells {
            if let Some(node) = inner.root.walk(cell) {
                node.collect_entries(&mut results);
            }
        }

        if results.is_empty() {
            return Err(GeotrieError::GeohashNotFound(center.into_string()));
        }
        Ok(results)
    }

    /// Drops nodes that hold no data and have no descendants. Returns the
    /// number of nodes removed.
    pub fn prune(&self) -> usize {
        let removed = self.inner.write().root.prune();
        self.ops_count.fetch_add(1, Ordering::Relaxed);
        log::debug!("Pruned {} empty nodes", removed);
        removed
    }

    pub fn stats(&self) -> StoreStats {
        let counts = self.inner.read().root.counts();
        StoreStats {
            node_count: counts.nodes,
            populated_nodes: counts.populated,
            entry_count: counts.entries,
            operations_count: self.ops_count.load(Ordering::Relaxed),
        }
    }

    /// Writes every entry to the snapshot file.
    ///
    /// In-memory stores have no snapshot file and return
    /// [`GeotrieError::InvalidConfig`].
    #[cfg(feature = "snapshot")]
    pub fn snapshot(&self) -> Result<()> {
        let mut inner = self.inner.write();
        Self::save_snapshot(&mut inner)
    }

    #[cfg(feature = "snapshot")]
    fn save_snapshot(inner: &mut Inner) -> Result<()> {
        let mut entries = Vec::new();
        inner.root.for_each_entry(&mut |geohash, key, value| {
            entries.push(SnapshotEntry {
                geohash: geohash.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            });
        });

        match inner.snapshot.as_mut() {
            Some(snapshot) => snapshot.save(&entries),
            None => Err(GeotrieError::InvalidConfig(
                "Store has no snapshot path".into(),
            )),
        }
    }

    fn read(&self) -> parking_lot::RwLockReadGuard<'_, Inner> {
        self.ops_count.fetch_add(1, Ordering::Relaxed);
        self.inner.read()
    }

    fn find<'a>(root: &'a Node, geohash: &Geohash) -> Result<&'a Node> {
        root.walk(geohash)
            .ok_or_else(|| GeotrieError::GeohashNotFound(geohash.to_string()))
    }

    #[allow(unused_variables)]
    fn after_write(&self, inner: &mut Inner) {
        self.ops_count.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "snapshot")]
        {
            let due = match inner.snapshot.as_mut() {
                Some(snapshot) => {
                    snapshot.record_operation();
                    snapshot.should_snapshot()
                }
                None => false,
            };
            if due && let Err(e) = Self::save_snapshot(inner) {
                log::warn!("Automatic snapshot failed, will retry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: [&str; 9] = [
        "9", "9e", "9ew", "9ewm", "9ewmq", "9b", "9bn", "9bnr", "9bnrt",
    ];

    fn seeded() -> DB {
        let db = DB::memory().unwrap();
        for (i, path) in REGION.iter().enumerate() {
            db.set(path, "precision", format!("{}", i)).unwrap();
        }
        db
    }

    #[test]
    fn test_set_get() {
        let db = DB::memory().unwrap();
        db.set("9q8y", "name", "San Francisco").unwrap();
        assert_eq!(db.get("9q8y", "name").unwrap(), "San Francisco");
    }

    #[test]
    fn test_set_overwrites() {
        let db = DB::memory().unwrap();
        db.set("u", "k", "v1").unwrap();
        db.set("u", "k", "v2").unwrap();
        assert_eq!(db.get("u", "k").unwrap(), "v2");
    }

    #[test]
    fn test_invalid_geohash_everywhere() {
        let db = seeded();
        for bad in ["", "9a", "9?"] {
            assert!(matches!(db.set(bad, "k", "v"), Err(GeotrieError::InvalidGeohash(_))));
            assert!(matches!(db.get(bad, "k"), Err(GeotrieError::InvalidGeohash(_))));
            assert!(matches!(db.get_all_data(bad), Err(GeotrieError::InvalidGeohash(_))));
            assert!(matches!(db.get_all_children(bad), Err(GeotrieError::InvalidGeohash(_))));
            assert!(matches!(db.delete(bad, "k"), Err(GeotrieError::InvalidGeohash(_))));
            assert!(matches!(db.clear(bad), Err(GeotrieError::InvalidGeohash(_))));
        }
    }

    #[test]
    fn test_missing_path_and_key() {
        let db = seeded();
        assert!(matches!(db.get("9q", "precision"), Err(GeotrieError::GeohashNotFound(_))));
        assert!(matches!(db.get("9e", "other"), Err(GeotrieError::KeyNotFound { .. })));
        assert!(matches!(db.get_all_data("8"), Err(GeotrieError::GeohashNotFound(_))));
        assert!(matches!(db.clear("8"), Err(GeotrieError::GeohashNotFound(_))));
    }

    #[test]
    fn test_intermediate_nodes_exist_empty() {
        let db = DB::memory().unwrap();
        db.set("9bnr", "k", "v").unwrap();
        assert!(db.contains("9b").unwrap());
        assert!(db.get_all_data("9b").unwrap().is_empty());
        assert!(matches!(db.get("9b", "k"), Err(GeotrieError::KeyNotFound { .. })));
    }

    #[test]
    fn test_delete_twice() {
        let db = seeded();
        assert_eq!(db.delete("9bn", "precision").unwrap(), "6");
        assert!(matches!(
            db.delete("9bn", "precision"),
            Err(GeotrieError::KeyNotFound { .. })
        ));
        // Node remains after its last key goes.
        assert!(db.contains("9bn").unwrap());
        assert!(db.get_all_data("9bn").unwrap().is_empty());
    }

    #[test]
    fn test_clear_keeps_children() {
        let db = seeded();
        db.clear("9e").unwrap();
        assert!(db.get_all_data("9e").unwrap().is_empty());
        let children = db.get_all_children("9e").unwrap();
        assert_eq!(children, vec!["9ew", "9ewm", "9ewmq"]);
    }

    #[test]
    fn test_get_all_children_region() {
        let db = seeded();
        let mut children = db.get_all_children("9").unwrap();
        children.sort();
        let mut expected: Vec<String> = REGION.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(children, expected);
        assert!(matches!(
            db.get_all_children("9q"),
            Err(GeotrieError::GeohashNotFound(_))
        ));
    }

    #[test]
    fn test_region_data() {
        let db = seeded();
        let region = db.region_data("9b").unwrap();
        assert_eq!(region.len(), 4);
        assert_eq!(region["9bnrt"]["precision"], "8");
    }

    #[test]
    fn test_neighbors_data() {
        let db = DB::memory().unwrap();
        for (path, label) in [
            ("b", "North West"),
            ("c", "North"),
            ("f", "North East"),
            ("8", "West"),
            ("9", "Center"),
            ("d", "East"),
            ("2", "South West"),
            ("3", "South"),
            ("6", "South East"),
            ("u", "Far away"),
        ] {
            db.set(path, "label", label).unwrap();
        }

        let data = db.neighbors_data("9").unwrap();
        assert_eq!(data.len(), 9);
        assert!(!data.contains_key("u"));

        // Only the centre cell's own neighbourhood is consulted.
        let data = db.neighbors_data("c").unwrap();
        assert!(data.contains_key("9"));

        assert!(matches!(
            db.neighbors_data("00"),
            Err(GeotrieError::GeohashNotFound(_))
        ));
    }

    #[test]
    fn test_insert_at_uses_configured_precision() {
        let db = DB::memory_with_config(Config::default().with_precision(6)).unwrap();
        let geohash = db
            .insert_at(Location::new(19.43265922422016, -99.13317967733457), "name", "Zocalo")
            .unwrap();
        assert_eq!(geohash, "9g3w81");
        assert_eq!(db.get("9g3w81", "name").unwrap(), "Zocalo");
    }

    #[test]
    fn test_prune_and_stats() {
        let db = seeded();
        db.set("zzzz", "k", "v").unwrap();
        db.delete("zzzz", "k").unwrap();

        let before = db.stats();
        assert_eq!(before.populated_nodes, 9);
        assert_eq!(before.entry_count, 9);
        // root + 9 region nodes + z, zz, zzz, zzzz
        assert_eq!(before.node_count, 14);

        assert_eq!(db.prune(), 4);
        let after = db.stats();
        assert_eq!(after.node_count, 10);
        assert_eq!(after.empty_nodes(), 1);
        assert!(after.operations_count > before.operations_count);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            precision: 0,
            ..Config::default()
        };
        assert!(matches!(
            DB::memory_with_config(config),
            Err(GeotrieError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn test_snapshot_without_path() {
        let db = seeded();
        assert!(matches!(db.snapshot(), Err(GeotrieError::InvalidConfig(_))));
    }
}
