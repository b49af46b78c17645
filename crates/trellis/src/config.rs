//! YAML configuration.
//!
//! Every field is optional. A missing file yields the defaults; a file that
//! fails to parse is an [`Error::Config`].
//!
//! ```yaml
//! graph:
//!   directed: false
//!   default-weight: 1.0
//! output:
//!   json: false
//!   color: true
//! log-level: "trellis=info"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "trellis.yaml";

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "trellis=info,trellis_graph=info,trellis_events=info";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrellisConfig {
    /// Graph loading defaults.
    pub graph: GraphConfig,

    /// Output defaults.
    pub output: OutputSettings,

    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
}

/// `graph:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GraphConfig {
    /// Whether graphs are directed unless `--directed`/`--undirected` is given.
    pub directed: bool,

    /// Weight for edge records without a `weight` field.
    pub default_weight: f64,
}

/// `output:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputSettings {
    /// Emit JSON instead of text.
    pub json: bool,

    /// Colorize text output. `NO_COLOR` still wins.
    pub color: bool,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            output: OutputSettings::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            default_weight: trellis_graph::DEFAULT_WEIGHT,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

impl TrellisConfig {
    /// Load configuration, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to a YAML null, not an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let weight = self.graph.default_weight;
        if !weight.is_finite() || weight.abs() > trellis_graph::MAX_WEIGHT {
            return Err(Error::Config(format!(
                "graph.default-weight must be finite and at most {:e} in magnitude, got {weight}",
                trellis_graph::MAX_WEIGHT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = TrellisConfig::default();
        assert!(!config.graph.directed);
        assert_eq!(config.graph.default_weight, 1.0);
        assert!(!config.output.json);
        assert!(config.output.color);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  \n")]
    #[case::empty_mapping("{}")]
    fn blank_documents_yield_defaults(#[case] content: &str) {
        assert_eq!(TrellisConfig::parse(content).unwrap(), TrellisConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = TrellisConfig::parse("graph:\n  directed: true\n").unwrap();
        assert!(config.graph.directed);
        assert_eq!(config.graph.default_weight, 1.0);
        assert!(config.output.color);
    }

    #[test]
    fn kebab_case_keys() {
        let config = TrellisConfig::parse(
            "graph:\n  default-weight: 2.5\noutput:\n  json: true\n  color: false\nlog-level: debug\n",
        )
        .unwrap();
        assert_eq!(config.graph.default_weight, 2.5);
        assert!(config.output.json);
        assert!(!config.output.color);
        assert_eq!(config.log_level, "debug");
    }

    #[rstest]
    #[case::bad_type("graph:\n  directed: maybe\n")]
    #[case::not_a_mapping("- just\n- a list\n")]
    #[case::infinite_weight("graph:\n  default-weight: .inf\n")]
    #[case::oversized_weight("graph:\n  default-weight: -1.0e200\n")]
    fn invalid_config_is_rejected(#[case] content: &str) {
        assert!(matches!(TrellisConfig::parse(content), Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = TrellisConfig::load_or_default(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, TrellisConfig::default());
    }

    #[test]
    fn written_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        let mut config = TrellisConfig::default();
        config.graph.directed = true;
        config.output.json = true;

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("default-weight"));
        fs::write(&path, yaml).unwrap();
        assert_eq!(TrellisConfig::load_or_default(&path).unwrap(), config);
    }
}
