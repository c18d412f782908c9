use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate pair of latitude and longitude, in degrees.
///
/// Note the argument order: latitude comes first, which is the opposite of
/// the `geo` crate's `(x, y)` convention. Conversions to and from
/// `geo::Point` map longitude to `x` and latitude to `y`.
///
/// # Examples
///
/// ```
/// use geotrie_types::location::Location;
///
/// let gdl = Location::new(20.643896, -103.416687);
/// assert_eq!(gdl.latitude(), 20.643896);
/// assert_eq!(gdl.longitude(), -103.416687);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "latitude")]
    lat: f64,
    #[serde(rename = "longitude")]
    lon: f64,
}

impl Location {
    /// Create a new location from latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            lat: latitude,
            lon: longitude,
        }
    }

    /// Get the latitude (y).
    pub const fn latitude(&self) -> f64 {
        self.lat
    }

    /// Get the longitude (x).
    pub const fn longitude(&self) -> f64 {
        self.lon
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        location.to_point()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accessors() {
        let l = Location::new(20.643896, -103.416687);
        assert_eq!(l.latitude(), 20.643896);
        assert_eq!(l.longitude(), -103.416687);
    }

    #[test]
    fn test_point_conversion_swaps_axes() {
        let l = Location::new(40.7128, -74.0060);
        let p: Point<f64> = l.into();
        assert_eq!(p.x(), -74.0060);
        assert_eq!(p.y(), 40.7128);
        assert_eq!(Location::from(p), l);
    }

    #[test]
    fn test_serde_field_names() {
        let l = Location::new(1.5, -2.5);
        let json = serde_json::to_string(&l).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.5}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_is_finite() {
        assert!(Location::new(0.0, 0.0).is_finite());
        assert!(!Location::new(f64::NAN, 0.0).is_finite());
        assert!(!Location::new(0.0, f64::INFINITY).is_finite());
    }
}
