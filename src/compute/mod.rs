pub mod geohash;
pub mod validation;
