use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::filter;

pub const DEFAULT_FILE_NAME: &str = "config.toml";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_API_BASE: &str = "/api";
/// Time given to the backend and the chain to agree after a confirmed link.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 2000;

/// What a directory refresh does to selection edits not yet submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSync {
    /// Reset to the on-chain linked set.
    #[default]
    Replace,
    /// Reset to the on-chain linked set, then re-apply pending toggles.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Path prefix of the backend endpoints. Takes precedence over `page_path`.
    pub api_base: Option<String>,
    /// Page path of the hosting dashboard, used to derive `api_base`.
    pub page_path: Option<String>,
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    #[serde(default)]
    pub selection_sync: SelectionSync,
    /// log level, can be "info", "debug", "trace".
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_refresh_delay_ms() -> u64 {
    DEFAULT_REFRESH_DELAY_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_base: None,
            page_path: None,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            selection_sync: SelectionSync::default(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Default location of the configuration file.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hotwallet-link").join(DEFAULT_FILE_NAME))
}

/// Derive the endpoint prefix from a dashboard page path: the first segment
/// holding a `:` names the process, e.g. `/operator:hypergrid:ware.hypr/x`
/// gives `/operator:hypergrid:ware.hypr/api`.
pub fn api_base_from_page_path(page_path: &str) -> String {
    page_path
        .split('/')
        .find(|segment| segment.contains(':'))
        .map(|segment| format!("/{}/api", segment))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound,
                _ => ConfigError::ReadingFile(format!("Reading configuration file: {}", e)),
            })
            .and_then(|file_content| {
                toml::from_str::<Config>(&file_content).map_err(|e| {
                    ConfigError::ReadingFile(format!("Parsing configuration file: {}", e))
                })
            })?;

        // check if log_level field is valid
        config.log_level()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(&self)
            .map_err(|e| ConfigError::WritingFile(format!("Failed to serialize config: {}", e)))?;

        let mut config_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ConfigError::WritingFile(e.to_string()))?;

        config_file.write_all(content.as_bytes()).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            ConfigError::WritingFile(e.to_string())
        })?;

        tracing::info!("Done writing configuration file");
        Ok(())
    }

    pub fn api_base(&self) -> String {
        match (&self.api_base, &self.page_path) {
            (Some(base), _) => base.clone(),
            (None, Some(page_path)) => api_base_from_page_path(page_path),
            (None, None) => DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn log_level(&self) -> Result<filter::LevelFilter, ConfigError> {
        if let Some(level) = &self.log_level {
            match level.as_ref() {
                "error" => Ok(filter::LevelFilter::ERROR),
                "warn" => Ok(filter::LevelFilter::WARN),
                "info" => Ok(filter::LevelFilter::INFO),
                "debug" => Ok(filter::LevelFilter::DEBUG),
                "trace" => Ok(filter::LevelFilter::TRACE),
                _ => Err(ConfigError::InvalidField(
                    "log_level",
                    format!("Unknown value '{}'", level),
                )),
            }
        } else {
            Ok(filter::LevelFilter::INFO)
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    NotFound,
    #[error("Invalid value for field '{0}': {1}")]
    InvalidField(&'static str, String),
    #[error("{0}")]
    ReadingFile(String),
    #[error("{0}")]
    WritingFile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_resolution() {
        assert_eq!(
            api_base_from_page_path("/operator:hypergrid:ware.hypr/operator"),
            "/operator:hypergrid:ware.hypr/api"
        );
        assert_eq!(api_base_from_page_path("/dashboard/operator"), "/api");
        assert_eq!(api_base_from_page_path(""), "/api");

        let mut config = Config {
            page_path: Some("/node:proc:pkg/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_base(), "/node:proc:pkg/api");
        config.api_base = Some("/custom".to_string());
        assert_eq!(config.api_base(), "/custom");
        assert_eq!(Config::default().api_base(), "/api");
    }

    #[test]
    fn parse_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            selection_sync = "merge"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.refresh_delay(), Duration::from_millis(2000));
        assert_eq!(config.selection_sync, SelectionSync::Merge);
        assert_eq!(config.log_level().unwrap(), filter::LevelFilter::DEBUG);
    }

    #[test]
    fn file_roundtrip_and_level_check() {
        let dir = std::env::temp_dir().join(format!("hotwallet-link-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(DEFAULT_FILE_NAME);

        assert_eq!(
            Config::from_file(&dir.join("missing.toml")),
            Err(ConfigError::NotFound)
        );

        let config = Config {
            server_url: "http://node.local:8080".to_string(),
            refresh_delay_ms: 500,
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);

        std::fs::write(&path, "log_level = \"loud\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::InvalidField("log_level", _))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
