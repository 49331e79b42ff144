//! Configuration loading for Metabolab.
//! Reads metabolab.toml from the current directory or the path in METABOLAB_CONFIG,
//! then applies environment overrides (PORT, METABOLAB_STATIC_DIR).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "METABOLAB_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "metabolab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built single-page app shell.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host()       -> String  { "0.0.0.0".to_string() }
fn default_port()       -> u16     { 3001 }
fn default_static_dir() -> PathBuf { PathBuf::from("build") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_seed_points")]
    pub seed_points: usize,
    /// Number of trailing history entries returned by /api/data.
    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_history_capacity() -> usize { 100 }
fn default_seed_points()      -> usize { 20 }
fn default_window()           -> usize { 20 }

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            seed_points: default_seed_points(),
            window: default_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollSettings {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
    #[serde(default = "default_inertia_duration")]
    pub inertia_duration_secs: f64,
}

fn default_stiffness()        -> f64 { 100.0 }
fn default_damping()          -> f64 { 30.0 }
fn default_mass()             -> f64 { 1.0 }
fn default_rest_delta()       -> f64 { 0.001 }
fn default_rest_speed()       -> f64 { 0.01 }
fn default_inertia_duration() -> f64 { 1.2 }

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
            inertia_duration_secs: default_inertia_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_fallback_points")]
    pub fallback_points: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_poll_interval_ms()   -> u64   { 2_000 }
fn default_fallback_points()    -> usize { 10 }
fn default_request_timeout_ms() -> u64   { 1_500 }

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            fallback_points: default_fallback_points(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// A missing `metabolab.toml` falls back to built-in defaults, but a file
    /// named explicitly through METABOLAB_CONFIG must exist.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else if explicit.is_some() {
            return Err(ConfigError::NotFound(path));
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`, so callers (and tests)
    /// decide where variables come from.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a valid port: {port:?}")))?;
        }
        if let Some(dir) = lookup("METABOLAB_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let feed = &self.feed;
        if feed.history_capacity == 0 {
            return Err(ConfigError::Invalid("feed.history_capacity must be at least 1".into()));
        }
        if feed.window == 0 {
            return Err(ConfigError::Invalid("feed.window must be at least 1".into()));
        }
        if feed.seed_points > feed.history_capacity {
            return Err(ConfigError::Invalid(format!(
                "feed.seed_points ({}) exceeds feed.history_capacity ({})",
                feed.seed_points, feed.history_capacity
            )));
        }

        let scroll = &self.scroll;
        for (name, value) in [
            ("scroll.stiffness", scroll.stiffness),
            ("scroll.mass", scroll.mass),
            ("scroll.rest_delta", scroll.rest_delta),
            ("scroll.rest_speed", scroll.rest_speed),
            ("scroll.inertia_duration_secs", scroll.inertia_duration_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(scroll.damping.is_finite() && scroll.damping >= 0.0) {
            return Err(ConfigError::Invalid("scroll.damping must not be negative".into()));
        }

        if self.chart.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("chart.poll_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
