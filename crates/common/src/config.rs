//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where downloaded archives and extractions are stored.
    pub data_dir: PathBuf,

    /// Default sampling parameters.
    pub sampling: SamplingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default sampling parameters.
///
/// These are the fallbacks for `clipsift sample` when the matching CLI
/// flag is not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingDefaults {
    /// Number of clips to draw.
    pub num: usize,

    /// Random seed for the weighted draw.
    pub seed: u64,

    /// Bottom aesthetic-score quantile dropped in the Bright bucket.
    pub aesthetic_q_bright: f64,

    /// Bottom aesthetic-score quantile dropped in non-Bright buckets.
    pub aesthetic_q_dark: f64,

    /// Minimum clip duration in seconds; shorter clips are dropped.
    pub min_duration_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipsift=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs_default_data(),
            sampling: SamplingDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            num: 1000,
            seed: 42,
            aesthetic_q_bright: 0.05,
            aesthetic_q_dark: 0.02,
            min_duration_secs: 3.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipsift").join("config.json")
}

/// Default data directory.
fn dirs_default_data() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("clipsift").join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_defaults_match_documented_values() {
        let defaults = SamplingDefaults::default();
        assert_eq!(defaults.num, 1000);
        assert_eq!(defaults.seed, 42);
        assert!((defaults.aesthetic_q_bright - 0.05).abs() < 1e-12);
        assert!((defaults.aesthetic_q_dark - 0.02).abs() < 1e-12);
        assert!((defaults.min_duration_secs - 3.0).abs() < 1e-12);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sampling.num, config.sampling.num);
        assert_eq!(back.logging.level, config.logging.level);
    }
}
