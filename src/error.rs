//! Error types for geotrie.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeotrieError>;

#[derive(Debug, Error)]
pub enum GeotrieError {
    /// The string is empty or holds a character outside the geohash alphabet.
    #[error("Invalid character in geohash (base32): {0:?}")]
    InvalidGeohash(String),

    /// Well-formed geohash with no node in the store.
    #[error("Geohash not found: {0}")]
    GeohashNotFound(String),

    #[error("Key {key:?} not found at geohash {geohash}")]
    KeyNotFound { geohash: String, key: String },

    /// Coordinates outside the configured bounding region, reported by the
    /// checked encoder only.
    #[error("Location ({latitude}, {longitude}) is outside the bounding region")]
    OutOfRange { latitude: f64, longitude: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid snapshot format")]
    InvalidFormat,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend is closed")]
    BackendClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeotrieError {
    /// Errors a network host would report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GeotrieError::GeohashNotFound(_) | GeotrieError::KeyNotFound { .. }
        )
    }

    /// Errors caused by malformed caller input.
    pub fn is_invalid(&self) -> bool {
        matches!(
            self,
            GeotrieError::InvalidGeohash(_) | GeotrieError::OutOfRange { .. }
        )
    }
}

#[cfg(feature = "snapshot")]
impl From<bincode::Error> for GeotrieError {
    fn from(err: bincode::Error) -> Self {
        GeotrieError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(GeotrieError::GeohashNotFound("9q".into()).is_not_found());
        assert!(
            GeotrieError::KeyNotFound {
                geohash: "9".into(),
                key: "k".into()
            }
            .is_not_found()
        );
        assert!(GeotrieError::InvalidGeohash("a".into()).is_invalid());
        assert!(!GeotrieError::InvalidGeohash("a".into()).is_not_found());
        assert!(!GeotrieError::BackendClosed.is_invalid());
    }

    #[test]
    fn test_error_messages() {
        let err = GeotrieError::KeyNotFound {
            geohash: "9bnr".into(),
            key: "name".into(),
        };
        assert_eq!(err.to_string(), "Key \"name\" not found at geohash 9bnr");
        assert_eq!(
            GeotrieError::InvalidGeohash(String::new()).to_string(),
            "Invalid character in geohash (base32): \"\""
        );
    }
}
