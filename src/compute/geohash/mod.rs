//! Geohash codec: alphabet, encoding, decoding and neighbour computation.
//!
//! The free functions use the global `[-90, 90] x [-180, 180]` region. Use a
//! [`Geohasher`] for any other bounding region.
//!
//! ```rust
//! use geotrie::compute::geohash;
//!
//! let hash = geohash::encode(-33.85684190426881, 151.21525191838856, 12);
//! assert_eq!(hash, "r3gx2ux9dg0p");
//!
//! let cell = geohash::decode(&hash.truncate(5));
//! assert_eq!(cell.center().latitude().round(), -34.0);
//! ```

pub mod alphabet;
mod codec;
mod hash;
mod neighbors;

pub use codec::Geohasher;
pub use hash::Geohash;
pub use neighbors::{Direction, Neighbors};

use geotrie_types::{Location, Region};

/// Encodes `(latitude, longitude)` at `precision` over the whole globe.
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Geohash {
    Geohasher::globe().encode(Location::new(latitude, longitude), precision)
}

/// Decodes a geohash into its cell over the whole globe.
pub fn decode(geohash: &Geohash) -> Region {
    Geohasher::globe().decode(geohash)
}

/// The eight neighbours of a geohash over the whole globe.
pub fn neighbors(geohash: &Geohash) -> Neighbors {
    Geohasher::globe().neighbors(geohash)
}
