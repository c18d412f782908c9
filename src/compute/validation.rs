//! Validation for geohash strings and precisions.

use crate::compute::geohash::alphabet;
use crate::error::{GeotrieError, Result};

/// Longest precision accepted by configuration. Beyond this the cells are
/// smaller than an `f64` can tell apart.
pub const MAX_PRECISION: usize = 24;

/// Checks that `geohash` is non-empty and made only of alphabet characters.
///
/// # Examples
///
/// ```
/// use geotrie::compute::validation::is_valid;
///
/// assert!(is_valid("9g3w81t7mqpx"));
/// assert!(!is_valid("abcdefgh"));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(geohash: &str) -> bool {
    !geohash.is_empty() && geohash.bytes().all(|b| alphabet::index_of(b).is_some())
}

/// Like [`is_valid`], reporting failure as [`GeotrieError::InvalidGeohash`].
///
/// # Examples
///
/// ```
/// use geotrie::compute::validation::validate;
///
/// assert!(validate("sr2y7kh9bbfk").is_ok());
/// assert!(validate("wxyz?!_#").is_err());
/// ```
pub fn validate(geohash: &str) -> Result<()> {
    if is_valid(geohash) {
        Ok(())
    } else {
        Err(GeotrieError::InvalidGeohash(geohash.to_string()))
    }
}

/// Validates a precision for use as a configured default.
pub fn validate_precision(precision: usize) -> Result<()> {
    if precision == 0 {
        return Err(GeotrieError::InvalidConfig(
            "Precision must be greater than zero".into(),
        ));
    }

    if precision > MAX_PRECISION {
        return Err(GeotrieError::InvalidConfig(format!(
            "Precision out of range [1, {}]: {}",
            MAX_PRECISION, precision
        )));
    }

    Ok(())
}
