//! # geotrie-types
//!
//! Geometric value types shared by the geotrie codec and store.
//!
//! - **Location**: an immutable latitude/longitude pair
//! - **Region**: an axis-aligned bounding box given by its south-west and
//!   north-east corners
//! - **StoreStats**: counters reported by a geotrie store
//!
//! Both types are `Copy`, serializable with Serde and convert to and from the
//! `geo` crate's `Point` and `Rect` primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geotrie_types::location::Location;
//! use geotrie_types::region::{GLOBE, Region};
//!
//! let rome = Location::new(41.9022, 12.4537);
//! assert!(GLOBE.contains(&rome));
//!
//! let italy = Region::new(Location::new(35.5, 6.6), Location::new(47.1, 18.5));
//! assert!(italy.contains(&rome));
//! ```

pub mod location;
pub mod region;
pub mod stats;

pub use location::Location;
pub use region::{GLOBE, Region};
pub use stats::StoreStats;
