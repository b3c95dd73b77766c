use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime settings for the console binary. Every field has a default, so an
/// empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    pub telemetry_interval_ms: u64,
    /// Fixed seed for every simulator; entropy when absent.
    pub seed: Option<u64>,
    pub live_mode: bool,
    /// How long the scripted session keeps a task in the air.
    pub demo_seconds: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: 2000,
            seed: None,
            live_mode: true,
            demo_seconds: 10,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
        Self::from_json(&text)
    }

    /// The first argument, when present, names a JSON config file.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        match args.nth(1) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(ConsoleConfig::from_json("{}").unwrap(), ConsoleConfig::default());
        assert_eq!(ConsoleConfig::default().telemetry_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_config_overrides() {
        let config = ConsoleConfig::from_json(r#"{"telemetryIntervalMs": 250, "seed": 17}"#).unwrap();
        assert_eq!(config.telemetry_interval(), Duration::from_millis(250));
        assert_eq!(config.seed, Some(17));
        assert!(config.live_mode);
    }

    #[test]
    fn no_argument_means_defaults() {
        let args = vec!["skyclean".to_string()];
        assert_eq!(ConsoleConfig::from_args(args.into_iter()).unwrap(), ConsoleConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let args = vec!["skyclean".to_string(), "/nonexistent/skyclean.json".to_string()];
        let err = ConsoleConfig::from_args(args.into_iter()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/skyclean.json"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(ConsoleConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            ConsoleConfig::from_json(r#"{"seed": "abc"}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
