//! Validated geohash strings.

use crate::compute::geohash::alphabet;
use crate::compute::validation;
use crate::error::{GeotrieError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// A non-empty string of geohash alphabet characters.
///
/// The length is the precision. Holding a `Geohash` is proof the string
/// passed validation, so decoding and store traversal never see a foreign
/// character.
///
/// # Examples
///
/// ```
/// use geotrie::Geohash;
///
/// let hash: Geohash = "9g3w81".parse()?;
/// assert_eq!(hash.precision(), 6);
/// assert_eq!(hash.truncate(3).as_str(), "9g3");
/// assert!("9g3".parse::<Geohash>()?.is_prefix_of(&hash));
///
/// assert!("".parse::<Geohash>().is_err());
/// # Ok::<(), geotrie::GeotrieError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Geohash(String);

impl Geohash {
    /// Parses and validates a geohash string.
    pub fn parse<S: Into<String>>(geohash: S) -> Result<Self> {
        let geohash = geohash.into();
        validation::validate(&geohash)?;
        Ok(Self(geohash))
    }

    /// Wraps a string the encoder built from alphabet characters.
    pub(crate) fn from_encoded(geohash: String) -> Self {
        debug_assert!(validation::is_valid(&geohash));
        Self(geohash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters.
    pub fn precision(&self) -> usize {
        self.0.len()
    }

    /// The 5-bit value of each character, in order.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .bytes()
            .map(|b| alphabet::index_of(b).unwrap_or_default())
    }

    /// The enclosing cell one character shorter, `None` at precision 1.
    pub fn parent(&self) -> Option<Geohash> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_string()))
    }

    /// The enclosing cell at `precision` characters, clamped to
    /// `1..=self.precision()`.
    pub fn truncate(&self, precision: usize) -> Geohash {
        let precision = precision.clamp(1, self.0.len());
        Self(self.0[..precision].to_string())
    }

    /// The cell of `self` contains the cell of `other`.
    pub fn is_prefix_of(&self, other: &Geohash) -> bool {
        other.0.starts_with(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Geohash {
    type Err = GeotrieError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Geohash {
    type Error = GeotrieError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Geohash {
    type Error = GeotrieError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Geohash> for String {
    fn from(geohash: Geohash) -> Self {
        geohash.0
    }
}

impl AsRef<str> for Geohash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Geohash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Geohash {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Geohash {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
