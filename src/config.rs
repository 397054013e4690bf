use config::{Config, ConfigError, Environment, File};
use crate::models::MenuItem;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub images: ImageSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub landing: LandingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Menu API origin (deck source, detail lookup, recommendation service)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSettings {
    /// Origin prefixed onto relative image paths
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckSettings {
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    /// Served when the deck source is unreachable
    #[serde(default)]
    pub fallback: Vec<MenuItem>,
}

impl DeckSettings {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            fallback: Vec::new(),
        }
    }
}

fn default_transition_ms() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl SessionSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_ttl_secs() -> u64 { 900 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LandingSettings {
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,
    #[serde(default = "default_suggestions_path")]
    pub suggestions_path: String,
    /// Public origin used when building share links
    #[serde(default)]
    pub share_origin: String,
}

impl LandingSettings {
    pub fn min_display(&self) -> Duration {
        Duration::from_millis(self.min_display_ms)
    }

    pub fn page_url(&self) -> String {
        format!("{}{}", self.share_origin.trim_end_matches('/'), self.suggestions_path)
    }
}

impl Default for LandingSettings {
    fn default() -> Self {
        Self {
            min_display_ms: default_min_display_ms(),
            suggestions_path: default_suggestions_path(),
            share_origin: String::new(),
        }
    }
}

fn default_min_display_ms() -> u64 { 1000 }
fn default_suggestions_path() -> String { "/suggestions".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with RAMEN_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RAMEN__API__BASE_URL -> api.base_url
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RAMEN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
