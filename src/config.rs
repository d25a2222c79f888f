use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::constants::{
    CONFIG_FILE, EXCHANGE_RATE_FILE, PROGRESS_LOG_FILE, SOURCE_URL, SQL_DB_NAME, SQL_TABLE_NAME,
    TARGET_CSV_FILE,
};
use crate::common::error::{EtlError, Result};

/// Locations and names used by a run. Every field falls back to the built-in constant.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EtlConfig {
    pub url: String,
    pub exchange_rate_path: PathBuf,
    pub csv_path: PathBuf,
    pub log_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    /// HTTP timeout; absent means the request may block indefinitely
    pub timeout_seconds: Option<u64>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: SOURCE_URL.to_string(),
            exchange_rate_path: PathBuf::from(EXCHANGE_RATE_FILE),
            csv_path: PathBuf::from(TARGET_CSV_FILE),
            log_path: PathBuf::from(PROGRESS_LOG_FILE),
            db_path: PathBuf::from(SQL_DB_NAME),
            table_name: SQL_TABLE_NAME.to_string(),
            timeout_seconds: None,
        }
    }
}

impl EtlConfig {
    /// Load from an explicit file, else from `banks_etl.toml` if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: EtlConfig = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(EtlError::Config("table_name must not be empty".into()));
        }
        if self.url.trim().is_empty() {
            return Err(EtlError::Config("url must not be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
