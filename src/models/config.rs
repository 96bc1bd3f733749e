//! Configuration model.
//!
//! Loaded from `~/.config/opencast/config.toml` (or `--config`):
//!
//! ```toml
//! [server]
//! host = "192.168.1.127"
//! port = 8080
//!
//! [playback]
//! idle_image = "assets/offair.jpg"
//! tick_interval_ms = 1000
//! command_timeout_secs = 10
//!
//! [[displays]]
//! name = "livingroom"
//! address = "192.168.1.102"
//!
//! [[catalogs]]
//! kind = "local"
//! source = "/Volumes/External/"
//! ```
//!
//! `OPENCAST_MEDIA_HOST` and `OPENCAST_MEDIA_PORT` override `[server]`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media HTTP server the displays fetch videos from.
    pub server: ServerConfig,
    /// Reconciliation settings.
    pub playback: PlaybackConfig,
    /// Displays to drive, in registration order.
    pub displays: Vec<DisplayConfig>,
    /// Catalog sources, in registration order.
    pub catalogs: Vec<CatalogConfig>,
}

/// Media server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host the displays reach the media server on.
    pub host: String,
    /// Media server port.
    pub port: u16,
}

/// Playback and reconciliation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Image shown on displays that are not playing.
    pub idle_image: PathBuf,
    /// Delay between reconciliation ticks in milliseconds.
    pub tick_interval_ms: u64,
    /// Upper bound for a single casting command in seconds.
    pub command_timeout_secs: u64,
}

/// A display entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub name: String,
    pub address: String,
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog type tag, e.g. `local`.
    pub kind: String,
    /// Source location, e.g. a directory.
    pub source: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Base URL videos are served from.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Apply `OPENCAST_MEDIA_HOST` / `OPENCAST_MEDIA_PORT` when set.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("OPENCAST_MEDIA_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("OPENCAST_MEDIA_PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("OPENCAST_MEDIA_PORT is not a port: {}", port)))?;
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            idle_image: PathBuf::from("assets/offair.jpg"),
            tick_interval_ms: 1000,
            command_timeout_secs: 10,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

impl Config {
    /// Reject values the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.playback.tick_interval_ms == 0 {
            return Err(Error::Config("playback.tick_interval_ms must be > 0".into()));
        }
        if self.playback.command_timeout_secs == 0 {
            return Err(Error::Config("playback.command_timeout_secs must be > 0".into()));
        }
        if let Some(display) = self.displays.iter().find(|d| d.name.trim().is_empty()) {
            return Err(Error::Config(format!(
                "display with address {} has an empty name",
                display.address
            )));
        }
        Ok(())
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opencast")
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from file.
///
/// An explicit `path` must exist. Without one, the default location is used
/// and defaults are returned when it does not exist. Environment overrides are
/// applied last.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(Error::Config(format!("config file not found: {}", p.display())));
            }
            p.to_path_buf()
        }
        None => default_config_path(),
    };

    let mut config = if config_path.exists() {
        tracing::debug!("Loading config from {}", config_path.display());
        let content = std::fs::read_to_string(&config_path)?;
        parse_config(&content)?
    } else {
        tracing::debug!("No config at {}, using defaults", config_path.display());
        Config::default()
    };

    config.server.apply_env()?;
    Ok(config)
}
