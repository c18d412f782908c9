//! Adjacent cells at the same precision.
//!
//! Each neighbour is found by stepping one cell width / height away from the
//! center of the decoded cell and re-encoding. Longitude steps across the
//! antimeridian wrap around. Latitude steps past a pole are folded by the
//! same one-shot wraparound, so the "north" neighbour of a polar cell lands
//! near the opposite pole. Callers that care about polar adjacency should
//! filter those results.

use super::codec::Geohasher;
use super::hash::Geohash;
use geotrie_types::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass direction of a neighbouring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "nw")]
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
        }
    }

    /// `(latitude, longitude)` step in cell units.
    fn offsets(&self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::NorthEast => (1.0, 1.0),
            Direction::East => (0.0, 1.0),
            Direction::SouthEast => (-1.0, 1.0),
            Direction::South => (-1.0, 0.0),
            Direction::SouthWest => (-1.0, -1.0),
            Direction::West => (0.0, -1.0),
            Direction::NorthWest => (1.0, -1.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight cells around a geohash. Serializes as an object keyed by
/// `n`, `ne`, `e`, `se`, `s`, `sw`, `w`, `nw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub n: Geohash,
    pub ne: Geohash,
    pub e: Geohash,
    pub se: Geohash,
    pub s: Geohash,
    pub sw: Geohash,
    pub w: Geohash,
    pub nw: Geohash,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> &Geohash {
        match direction {
            Direction::North => &self.n,
            Direction::NorthEast => &self.ne,
            Direction::East => &self.e,
            Direction::SouthEast => &self.se,
            Direction::South => &self.s,
            Direction::SouthWest => &self.sw,
            Direction::West => &self.w,
            Direction::NorthWest => &self.nw,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Geohash)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

impl Geohasher {
    /// Computes the eight neighbours of `geohash`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geotrie::{Geohash, Geohasher};
    ///
    /// let neighbors = Geohasher::globe().neighbors(&Geohash::parse("9")?);
    /// assert_eq!(neighbors.n, "c");
    /// assert_eq!(neighbors.sw, "2");
    /// # Ok::<(), geotrie::GeotrieError>(())
    /// ```
    pub fn neighbors(&self, geohash: &Geohash) -> Neighbors {
        Neighbors {
            n: self.neighbor(geohash, Direction::North),
            ne: self.neighbor(geohash, Direction::NorthEast),
            e: self.neighbor(geohash, Direction::East),
            se: self.neighbor(geohash, Direction::SouthEast),
            s: self.neighbor(geohash, Direction::South),
            sw: self.neighbor(geohash, Direction::SouthWest),
            w: self.neighbor(geohash, Direction::West),
            nw: self.neighbor(geohash, Direction::NorthWest),
        }
    }

    /// Computes the single neighbour of `geohash` in `direction`.
    pub fn neighbor(&self, geohash: &Geohash, direction: Direction) -> Geohash {
        let cell = self.decode(geohash);
        let center = cell.center();
        let (dlat, dlon) = direction.offsets();
        let target = Location::new(
            center.latitude() + dlat * cell.height(),
            center.longitude() + dlon * cell.width(),
        );
        self.encode(target, geohash.precision())
    }
}
