//! Publishing configuration.
//!
//! The defaults are the reporting store's fixed contract; a TOML file can
//! override them (the CLI reads one only when `TESTLABEL_CONFIG` is set).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BUCKET: &str = "psi-reporting-data";
pub const DEFAULT_KEY_PREFIX: &str = "external_data/automated_test_data";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Where reports are uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub bucket: String,
    /// Key prefix, without a trailing slash.
    pub key_prefix: String,
    pub region: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl PublishConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: PublishConfig = toml::from_str(content)?;
        config.key_prefix = config.key_prefix.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::EmptyField("bucket"));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::EmptyField("region"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reporting_contract() {
        let config = PublishConfig::default();
        assert_eq!(config.bucket, "psi-reporting-data");
        assert_eq!(config.key_prefix, "external_data/automated_test_data");
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(PublishConfig::from_toml("").unwrap(), PublishConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let config = PublishConfig::from_toml(
            r#"
bucket = "staging-reports"
key_prefix = "tmp/labels/"
"#,
        )
        .unwrap();
        assert_eq!(config.bucket, "staging-reports");
        assert_eq!(config.key_prefix, "tmp/labels");
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn empty_bucket_is_rejected() {
        assert!(matches!(
            PublishConfig::from_toml(r#"bucket = """#),
            Err(ConfigError::EmptyField("bucket"))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PublishConfig::from_file(Path::new("/no/such/testlabel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
