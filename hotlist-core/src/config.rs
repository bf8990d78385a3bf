use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub request_limit: u32,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// Snapshot file; `None` resolves to `<config_dir>/hotlist/trending.json`.
    pub file: Option<PathBuf>,
    /// Serve the cached snapshot only while younger than this many seconds.
    /// `None` serves it until the next explicit refresh.
    pub max_age_seconds: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.bilibili.com/x/web-interface/wbi/search/square".to_owned(),
            request_limit: 10,
            request_timeout_seconds: 10,
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl CacheConfig {
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_seconds.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Path of the configuration file
    pub fn config_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("could not locate the config directory")?;

        let app_config_dir = config_dir.join("hotlist");
        std::fs::create_dir_all(&app_config_dir)?;

        Ok(app_config_dir.join("config.json"))
    }

    /// Loads the configuration from disk, or falls back to defaults and
    /// writes them out so the file exists for the next run.
    pub fn load() -> Self {
        match Self::load_from_file() {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "could not load configuration, using defaults");
                let default_config = Self::default();
                if let Err(save_error) = default_config.save() {
                    warn!(error = %save_error, "could not save default configuration");
                }
                default_config
            }
        }
    }

    fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_file_path()?;
        let config_content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_file_path()?;
        let config_json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, config_json)?;
        Ok(())
    }

    /// Where the snapshot lives: the configured override, or the default
    /// location next to the configuration file.
    pub fn cache_file(&self) -> PathBuf {
        match &self.cache.file {
            Some(path) => path.clone(),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hotlist")
                .join("trending.json"),
        }
    }
}
