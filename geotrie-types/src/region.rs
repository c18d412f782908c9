use crate::location::Location;
use geo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The whole WGS84-style globe: `[-90, 90] x [-180, 180]`.
pub const GLOBE: Region = Region::new(Location::new(-90.0, -180.0), Location::new(90.0, 180.0));

/// An axis-aligned bounding box.
///
/// `min` is the south-west (bottom-left) corner and `max` the north-east
/// (top-right) corner. Geohash cells are regions, and so is the bounding area
/// a codec subdivides.
///
/// # Examples
///
/// ```
/// use geotrie_types::location::Location;
/// use geotrie_types::region::Region;
///
/// let r = Region::new(Location::new(-90.0, -180.0), Location::new(90.0, 180.0));
/// assert_eq!(r.center(), Location::new(0.0, 0.0));
/// assert_eq!(r.width(), 360.0);
/// assert_eq!(r.height(), 180.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    min: Location,
    max: Location,
}

impl Region {
    /// Create a region from its south-west and north-east corners.
    pub const fn new(min: Location, max: Location) -> Self {
        Self { min, max }
    }

    /// Create a region from its four bounds.
    pub const fn from_bounds(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self::new(Location::new(min_lat, min_lon), Location::new(max_lat, max_lon))
    }

    /// South-west corner.
    pub const fn min(&self) -> Location {
        self.min
    }

    /// North-east corner.
    pub const fn max(&self) -> Location {
        self.max
    }

    /// Midpoint of the region.
    pub fn center(&self) -> Location {
        Location::new(
            (self.min.latitude() + self.max.latitude()) / 2.0,
            (self.min.longitude() + self.max.longitude()) / 2.0,
        )
    }

    /// Longitude extent.
    pub fn width(&self) -> f64 {
        (self.max.longitude() - self.min.longitude()).abs()
    }

    /// Latitude extent.
    pub fn height(&self) -> f64 {
        (self.max.latitude() - self.min.latitude()).abs()
    }

    /// Check if a location lies within the region, borders included.
    pub fn contains(&self, location: &Location) -> bool {
        location.latitude() >= self.min.latitude()
            && location.latitude() <= self.max.latitude()
            && location.longitude() >= self.min.longitude()
            && location.longitude() <= self.max.longitude()
    }

    /// Finite bounds with a strictly positive extent on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.latitude() < self.max.latitude()
            && self.min.longitude() < self.max.longitude()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(self.min.to_point().0, self.max.to_point().0)
    }
}

impl Default for Region {
    fn default() -> Self {
        GLOBE
    }
}

impl From<Rect<f64>> for Region {
    fn from(rect: Rect<f64>) -> Self {
        Self::from_bounds(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }
}

impl From<Region> for Rect<f64> {
    fn from(region: Region) -> Self {
        region.to_rect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globe() {
        let min = Location::new(-90.0, -180.0);
        let max = Location::new(90.0, 180.0);
        let r = Region::new(min, max);
        assert_eq!(r, GLOBE);
        assert_eq!(r.min(), min);
        assert_eq!(r.max(), max);
        assert_eq!(r.center().latitude(), 0.0);
        assert_eq!(r.center().longitude(), 0.0);
    }

    #[test]
    fn test_contains_includes_borders() {
        let r = Region::from_bounds(0.0, 10.0, 20.0, 40.0);
        assert!(r.contains(&Location::new(0.0, 20.0)));
        assert!(r.contains(&Location::new(10.0, 40.0)));
        assert!(r.contains(&Location::new(5.0, 30.0)));
        assert!(!r.contains(&Location::new(-0.1, 30.0)));
        assert!(!r.contains(&Location::new(5.0, 40.1)));
    }

    #[test]
    fn test_well_formed() {
        assert!(GLOBE.is_well_formed());
        assert!(!Region::from_bounds(10.0, 10.0, 0.0, 1.0).is_well_formed());
        assert!(!Region::from_bounds(0.0, 1.0, 5.0, -5.0).is_well_formed());
        assert!(!Region::from_bounds(f64::NAN, 1.0, 0.0, 1.0).is_well_formed());
    }

    #[test]
    fn test_rect_round_trip() {
        let r = Region::from_bounds(-33.9, -33.8, 151.2, 151.3);
        let rect: Rect<f64> = r.into();
        assert_eq!(rect.min().x, 151.2);
        assert_eq!(rect.min().y, -33.9);
        assert_eq!(Region::from(rect), r);
    }
}
