//! Binary-subdivision encoder and decoder.
//!
//! Bits are produced most significant first, alternating axis and starting
//! with longitude. A `1` bit selects the upper half (east / north); a
//! coordinate exactly on the midpoint takes the lower half.

use super::alphabet::{self, BITS, BITS_PER_CHAR};
use super::hash::Geohash;
use crate::error::{GeotrieError, Result};
use geotrie_types::{GLOBE, Location, Region};
use serde::{Deserialize, Serialize};

/// Geohash codec over a bounding region.
///
/// The default region is the whole globe. Geohashes produced over any other
/// region only decode correctly with a codec over the identical region.
///
/// # Examples
///
/// ```
/// use geotrie::{Geohasher, Location};
///
/// let hasher = Geohasher::default();
/// let hash = hasher.encode(Location::new(41.90216070037718, 12.453725061736066), 12);
/// assert_eq!(hash, "sr2y7kh9bbfk");
///
/// let cell = hasher.decode(&hash);
/// assert!(cell.contains(&Location::new(41.90216070037718, 12.453725061736066)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geohasher {
    region: Region,
}

impl Geohasher {
    pub const fn new(region: Region) -> Self {
        Self { region }
    }

    /// Codec over `[-90, 90] x [-180, 180]`.
    pub const fn globe() -> Self {
        Self::new(GLOBE)
    }

    pub const fn region(&self) -> Region {
        self.region
    }

    /// Folds a coordinate lying outside the region back inside, one axis at a
    /// time: `x < min` becomes `max - (min - x)` and `x > max` becomes
    /// `min + (x - max)`. Applied once, so inputs more than one region width
    /// out of bounds stay out of bounds.
    pub fn normalize(&self, location: Location) -> Location {
        let (min, max) = (self.region.min(), self.region.max());
        Location::new(
            wrap(location.latitude(), min.latitude(), max.latitude()),
            wrap(location.longitude(), min.longitude(), max.longitude()),
        )
    }

    /// Encodes a location into a geohash of `precision` characters.
    ///
    /// Out-of-region coordinates are normalized first. A precision of zero is
    /// treated as one, since the empty string is not a geohash. NaN and
    /// infinite coordinates produce an unspecified (but valid) geohash.
    pub fn encode(&self, location: Location, precision: usize) -> Geohash {
        let precision = precision.max(1);
        let location = self.normalize(location);
        let (latitude, longitude) = (location.latitude(), location.longitude());

        let mut min_lat = self.region.min().latitude();
        let mut max_lat = self.region.max().latitude();
        let mut min_lon = self.region.min().longitude();
        let mut max_lon = self.region.max().longitude();

        let mut hash = String::with_capacity(precision);
        let mut value = 0u8;
        let mut bit = 0usize;
        let mut even = true;

        while hash.len() < precision {
            if even {
                let mid = (min_lon + max_lon) / 2.0;
                if longitude > mid {
                    value |= BITS[bit];
                    min_lon = mid;
                } else {
                    max_lon = mid;
                }
            } else {
                let mid = (min_lat + max_lat) / 2.0;
                if latitude > mid {
                    value |= BITS[bit];
                    min_lat = mid;
                } else {
                    max_lat = mid;
                }
            }
            even = !even;

            if bit < BITS_PER_CHAR - 1 {
                bit += 1;
            } else {
                hash.push(alphabet::char_at(value) as char);
                value = 0;
                bit = 0;
            }
        }

        Geohash::from_encoded(hash)
    }

    /// Like [`encode`](Self::encode), but reports a location outside the
    /// region as [`GeotrieError::OutOfRange`] instead of normalizing it.
    pub fn encode_checked(&self, location: Location, precision: usize) -> Result<Geohash> {
        if !location.is_finite() || !self.region.contains(&location) {
            return Err(GeotrieError::OutOfRange {
                latitude: location.latitude(),
                longitude: location.longitude(),
            });
        }
        Ok(self.encode(location, precision))
    }

    /// Decodes a geohash into the cell it addresses.
    pub fn decode(&self, geohash: &Geohash) -> Region {
        let mut min_lat = self.region.min().latitude();
        let mut max_lat = self.region.max().latitude();
        let mut min_lon = self.region.min().longitude();
        let mut max_lon = self.region.max().longitude();
        let mut even = true;

        for value in geohash.digits() {
            for mask in BITS {
                let set = value & mask != 0;
                if even {
                    let mid = (min_lon + max_lon) / 2.0;
                    if set {
                        min_lon = mid;
                    } else {
                        max_lon = mid;
                    }
                } else {
                    let mid = (min_lat + max_lat) / 2.0;
                    if set {
                        min_lat = mid;
                    } else {
                        max_lat = mid;
                    }
                }
                even = !even;
            }
        }

        Region::new(
            Location::new(min_lat, min_lon),
            Location::new(max_lat, max_lon),
        )
    }
}

impl Default for Geohasher {
    fn default() -> Self {
        Self::globe()
    }
}

fn wrap(x: f64, min: f64, max: f64) -> f64 {
    if x < min {
        max - (min - x)
    } else if x > max {
        min + (x - max)
    } else {
        x
    }
}
