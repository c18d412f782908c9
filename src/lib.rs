//! Geohash codec with a prefix-indexed spatial key-value store.
//!
//! ## Features
//! - **Codec**: bit-exact, interoperable geohash encoding and decoding over a
//!   configurable bounding region, with one-shot coordinate wraparound
//! - **Neighbours**: the eight adjacent cells of any geohash at the same
//!   precision
//! - **Prefix store**: a 32-ary trie of cells carrying key/value entries, with
//!   point reads and writes, prefix enumeration and neighbour aggregation
//! - **Backends**: flat ordered key-value backends keyed by geohash, in
//!   memory or persisted to a snapshot file
//!
//! ```rust
//! use geotrie::{DB, Location, compute::geohash};
//!
//! let hash = geohash::encode(19.43265922422016, -99.13317967733457, 12);
//! assert_eq!(hash, "9g3w81t7mqpx");
//!
//! let db = DB::memory()?;
//! db.insert_at(Location::new(19.43265922422016, -99.13317967733457), "name", "Zocalo")?;
//! let nearby = db.neighbors_data(&hash.truncate(6).to_string())?;
//! assert_eq!(nearby["9g3w81t7mqpx"]["name"], "Zocalo");
//! # Ok::<(), geotrie::GeotrieError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;
pub mod storage;

pub use builder::DBBuilder;
pub use db::{DB, RegionData};
pub use error::{GeotrieError, Result};

pub use compute::geohash::{Direction, Geohash, Geohasher, Neighbors};
pub use compute::validation;
pub use config::{Config, SnapshotConfig};
pub use geotrie_types::{GLOBE, Location, Region, StoreStats};

#[cfg(feature = "snapshot")]
pub use storage::FileBackend;
pub use storage::{MemoryBackend, StorageBackend};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{DB, DBBuilder, GeotrieError, Result};

    pub use crate::{Direction, Geohash, Geohasher, Neighbors};

    pub use crate::{Config, Location, Region};

    pub use crate::{MemoryBackend, StorageBackend};

    #[cfg(feature = "snapshot")]
    pub use crate::FileBackend;
}
