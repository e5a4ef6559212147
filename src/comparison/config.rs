// Run configuration for before/after comparison
//
// Values come from an optional TOML file; command-line flags override them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::comparator::Direction;

/// Default minimum confidence (percent) for a result to count as significant
pub const DEFAULT_MIN_CONFIDENCE: f64 = 99.0;

/// Errors loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a comparison run
///
/// # Example
/// ```
/// use perfcmp::comparison::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.min_confidence, 99.0);
/// assert!(!config.invert);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Treat lower values as better (timings rather than scores)
    pub invert: bool,

    /// Minimum confidence, in percent, for a result to be reported as significant
    ///
    /// - 99.0 (default): p < 0.01
    /// - 95.0: p < 0.05, more results flagged, more false positives
    pub min_confidence: f64,

    /// Test names for files without a header row
    ///
    /// Must list exactly one name per column. When absent the built-in
    /// names are used positionally.
    pub labels: Option<Vec<String>>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            invert: false,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            labels: None,
        }
    }
}

impl ComparisonConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_invert(self.invert)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be in [0, 100], got {}",
                self.min_confidence
            )));
        }

        if let Some(labels) = &self.labels {
            if labels.is_empty() {
                return Err(ConfigError::Invalid(
                    "labels must not be empty when given".to_string(),
                ));
            }
            for (i, label) in labels.iter().enumerate() {
                if labels[..i].contains(label) {
                    return Err(ConfigError::Invalid(format!(
                        "duplicate label '{}'",
                        label
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ComparisonConfig::default();
        assert!(!config.invert);
        assert_eq!(config.min_confidence, 99.0);
        assert!(config.labels.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.direction(), Direction::HigherIsBetter);
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_min_confidence() {
        let mut config = ComparisonConfig::default();
        config.min_confidence = 150.0;
        assert!(config.validate().is_err());

        config.min_confidence = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_duplicate_labels_rejected() {
        let mut config = ComparisonConfig::default();
        config.labels = Some(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_empty_labels_rejected() {
        let mut config = ComparisonConfig::default();
        config.labels = Some(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config: ComparisonConfig = toml::from_str("invert = true").unwrap();
        assert!(config.invert);
        assert_eq!(config.min_confidence, 99.0);
        assert_eq!(config.direction(), Direction::LowerIsBetter);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_confidence = 95.0").unwrap();
        writeln!(file, "labels = [\"startup\", \"render\"]").unwrap();

        let config = ComparisonConfig::from_file(file.path()).unwrap();
        assert_eq!(config.min_confidence, 95.0);
        assert_eq!(
            config.labels,
            Some(vec!["startup".to_string(), "render".to_string()])
        );
    }

    #[test]
    fn test_from_file_unknown_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_conf = 95.0").unwrap();

        assert!(matches!(
            ComparisonConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            ComparisonConfig::from_file(Path::new("/nonexistent/perfcmp.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
