//! Dashboard configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. Environment variables override the file.
//!
//! | Variable               | Field               | Default      |
//! |------------------------|---------------------|--------------|
//! | `DASHBOARD_CONFIG`     | path of the file    | none         |
//! | `DASHBOARD_DATA_URL`   | `data_url`          | dummy feed   |
//! | `DASHBOARD_STATIC_DIR` | `server.static_dir` | `dist`       |
//! | `PORT`                 | `server.port`       | `3000`       |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chart::ChartScope;
use crate::query::{Criteria, DEFAULT_PAGE_SIZE};
use crate::source::DEFAULT_DATA_URL;

pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

/// Upper bound for the configured delays, one day.
const MAX_DELAY_MS: u64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_url: String,
    /// Page size the dashboard starts with.
    pub page_size: usize,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Quiet period before a search keystroke is applied.
    pub debounce_ms: u64,
    pub chart_scope: ChartScope,
    pub analytics: AnalyticsConfig,
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            debounce_ms: 300,
            chart_scope: ChartScope::default(),
            analytics: AnalyticsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub endpoint: String,
    /// Queue length that triggers an immediate flush.
    pub batch_size: usize,
    pub flush_interval_ms: u64,
    /// Consecutive failed sends before a batch is dropped.
    pub max_retries: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.analytics.example.com/track".to_string(),
            batch_size: 50,
            flush_interval_ms: 5000,
            max_retries: 3,
        }
    }
}

impl AnalyticsConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub robots_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: PathBuf::from("dist"),
            robots_path: PathBuf::from("robots.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("invalid config json: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// The file named by `DASHBOARD_CONFIG` (defaults when unset), then
    /// process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(%path, "loading dashboard config");
                Self::load(path)?
            }
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a port number: {port}")))?;
        }
        if let Some(url) = lookup("DASHBOARD_DATA_URL") {
            self.data_url = url;
        }
        if let Some(dir) = lookup("DASHBOARD_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".into()));
        }
        if !self.page_size_options.contains(&self.page_size) {
            return Err(ConfigError::Invalid(format!(
                "page_size {} is not one of page_size_options {:?}",
                self.page_size, self.page_size_options
            )));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::Invalid("page_size_options must be positive".into()));
        }
        if self.analytics.batch_size == 0 {
            return Err(ConfigError::Invalid("analytics.batch_size must be positive".into()));
        }
        for (name, value) in [
            ("debounce_ms", self.debounce_ms),
            ("analytics.flush_interval_ms", self.analytics.flush_interval_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} exceeds {MAX_DELAY_MS}"
                )));
            }
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Criteria the dashboard starts from and resets to.
    pub fn initial_criteria(&self) -> Criteria {
        Criteria {
            page_size: self.page_size,
            ..Criteria::default()
        }
    }
}
