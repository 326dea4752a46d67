//! Configuration loading for the dashboard overview.
//!
//! The overview settings live in an optional YAML file. Every field has a
//! default, so an empty file (or no file) yields the standard dashboard.
//!
//! ```yaml
//! summary:
//!   top_players_limit: 5
//!   free_agent_preview: 4
//!   placeholder_metrics: false
//! ```

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Overview (summary builder) settings.
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Settings for the summary builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryConfig {
    /// How many players the top-players list holds.
    #[serde(default = "default_top_players_limit")]
    pub top_players_limit: usize,

    /// How many free agents the overview card previews.
    #[serde(default = "default_free_agent_preview")]
    pub free_agent_preview: usize,

    /// Whether to emit synthesized match/tournament counts.
    #[serde(default)]
    pub placeholder_metrics: bool,
}

const fn default_top_players_limit() -> usize {
    5
}

const fn default_free_agent_preview() -> usize {
    4
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_players_limit: default_top_players_limit(),
            free_agent_preview: default_free_agent_preview(),
            placeholder_metrics: false,
        }
    }
}

impl DashboardConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = DashboardConfig::from_yaml_str("").unwrap();
        assert_eq!(config.summary.top_players_limit, 5);
        assert_eq!(config.summary.free_agent_preview, 4);
        assert!(!config.summary.placeholder_metrics);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config =
            DashboardConfig::from_yaml_str("summary:\n  top_players_limit: 10\n").unwrap();
        assert_eq!(config.summary.top_players_limit, 10);
        assert_eq!(config.summary.free_agent_preview, 4);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = DashboardConfig::from_yaml_str("summary: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DashboardConfig::load(Path::new("/nonexistent/rosterdash.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
