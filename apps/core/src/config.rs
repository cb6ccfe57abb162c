use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "launchpad";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub max_results: usize,
    pub max_app_results: usize,
    pub max_file_results: usize,
    pub max_clipboard_results: usize,
    pub app_scan_depth: usize,
    pub clipboard_capacity: usize,
    pub clipboard_poll_interval_ms: u64,
    pub clipboard_title_chars: usize,
    /// Overrides the platform start-menu style roots when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_roots: Option<Vec<PathBuf>>,
    /// Overrides Desktop/Documents/Downloads when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_roots: Option<Vec<PathBuf>>,
    pub log_level: String,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: 8,
            max_app_results: 5,
            max_file_results: 3,
            max_clipboard_results: 2,
            app_scan_depth: 3,
            clipboard_capacity: 50,
            clipboard_poll_interval_ms: 1_000,
            clipboard_title_chars: 60,
            app_roots: None,
            file_roots: None,
            log_level: "info".to_string(),
            config_path: stable_app_data_dir().join(CONFIG_FILE_NAME),
        }
    }
}

impl Config {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(self.log_level.trim()).unwrap_or(log::LevelFilter::Info)
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().join(APP_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME))
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.max_results == 0 || cfg.max_results > 100 {
        return Err("max_results out of range".into());
    }

    let per_source = [
        ("max_app_results", cfg.max_app_results),
        ("max_file_results", cfg.max_file_results),
        ("max_clipboard_results", cfg.max_clipboard_results),
    ];
    for (name, value) in per_source {
        if value > cfg.max_results {
            return Err(format!("{name} exceeds max_results"));
        }
    }

    if cfg.app_scan_depth > 16 {
        return Err("app_scan_depth out of range".into());
    }

    if cfg.clipboard_capacity == 0 || cfg.clipboard_capacity > 10_000 {
        return Err("clipboard_capacity out of range".into());
    }

    if !(50..=60_000).contains(&cfg.clipboard_poll_interval_ms) {
        return Err("clipboard_poll_interval_ms out of range".into());
    }

    if cfg.clipboard_title_chars == 0 {
        return Err("clipboard_title_chars must be positive".into());
    }

    if log::LevelFilter::from_str(cfg.log_level.trim()).is_err() {
        return Err(format!("unknown log_level '{}'", cfg.log_level));
    }

    Ok(())
}

/// Reads the config at `path` (or the default location). A missing file
/// yields defaults; a present but malformed or out-of-range file is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| stable_app_data_dir().join(CONFIG_FILE_NAME));

    let mut cfg = match std::fs::read_to_string(&config_path) {
        Ok(raw) => toml::from_str::<Config>(&raw).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_path,
                source,
            })
        }
    };
    cfg.config_path = config_path;

    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let encoded = toml::to_string_pretty(cfg)?;
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Io {
        path: cfg.config_path.clone(),
        source,
    })
}
