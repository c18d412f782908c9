//! Configuration for geotrie stores.

use crate::compute::validation;
use geotrie_types::{GLOBE, Region};
use serde::de::Error;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Precision used when writing by location
    #[serde(default = "Config::default_precision")]
    pub precision: usize,

    /// Bounding region the codec subdivides
    #[serde(default = "Config::default_region")]
    pub region: Region,

    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    /// Write a snapshot automatically after this many mutating operations
    #[serde(default)]
    pub auto_snapshot_ops: Option<usize>,
}

impl Config {
    const fn default_region() -> Region {
        GLOBE
    }

    const fn default_precision() -> usize {
        12
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        assert!(precision > 0, "Precision must be greater than zero");

        if precision > 16 {
            log::warn!(
                "Precision of {} is finer than a double can usefully resolve on the globe; \
                trailing characters will carry little information.",
                precision
            );
        }

        self.precision = precision;
        self
    }

    pub fn with_auto_snapshot_ops(mut self, ops: usize) -> Self {
        assert!(ops > 0, "Auto snapshot interval must be greater than zero");
        self.snapshot.auto_snapshot_ops = Some(ops);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validation::validate_precision(self.precision).map_err(|e| e.to_string())?;

        if !self.region.is_well_formed() {
            return Err(format!(
                "Region must be finite with min < max on both axes, got {}",
                self.region
            ));
        }

        if let Some(ops) = self.snapshot.auto_snapshot_ops
            && ops == 0
        {
            return Err("Auto snapshot interval must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            region: Self::default_region(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::validation::MAX_PRECISION;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.region, GLOBE);
        assert_eq!(config.precision, 12);
        assert!(config.snapshot.auto_snapshot_ops.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_region(Region::from_bounds(0.0, 10.0, 0.0, 20.0))
            .with_precision(7)
            .with_auto_snapshot_ops(50);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config = Config::from_json(r#"{"precision": 5}"#).unwrap();
        assert_eq!(config.precision, 5);
        assert_eq!(config.region, GLOBE);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(Config::from_json(r#"{"precison": 5}"#).is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::from_json(r#"{"precision": 0}"#).is_err());
        assert!(Config::from_json(&format!(r#"{{"precision": {}}}"#, MAX_PRECISION + 1)).is_err());

        let degenerate = Config::default().with_region(Region::from_bounds(5.0, 5.0, 0.0, 1.0));
        assert!(degenerate.validate().is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = Config::default().with_precision(9);
        let toml_str = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&toml_str).unwrap(), config);
    }
}
