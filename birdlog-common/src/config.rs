//! Bootstrap configuration loading
//!
//! Settings are resolved per field in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`BIRDLOG_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is never fatal: the service starts on defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port for birdlog-api
pub const DEFAULT_PORT: u16 = 5780;

/// Default bind host (loopback only)
pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const ENV_DATABASE: &str = "BIRDLOG_DATABASE";
pub const ENV_PORT: &str = "BIRDLOG_PORT";
pub const ENV_SEED_DIR: &str = "BIRDLOG_SEED_DIR";

/// Configuration as read from the TOML file
///
/// Every field is optional; absent fields fall through to the compiled defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP bind host
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Directory holding species.csv, sightings.csv and checklists.csv
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the config file if one is available.
    ///
    /// An explicitly requested file must exist. Without one, the platform
    /// config location is tried and its absence yields defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading config file: {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config file: {}", path.display());
                Self::load(&path)
            }
            _ => {
                warn!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Platform config file location (`~/.config/birdlog/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("birdlog").join("config.toml"))
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed_dir: Option<PathBuf>,
}

/// Fully resolved bootstrap configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub seed_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Merge command line, environment, TOML and defaults
    pub fn resolve(cli: CliOverrides, file: TomlConfig) -> Result<Self> {
        let database_path = cli
            .database_path
            .or_else(|| env_path(ENV_DATABASE))
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from("birdlog.db"));

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw)))?,
                Err(_) => file.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let host = cli
            .host
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let seed_dir = cli
            .seed_dir
            .or_else(|| env_path(ENV_SEED_DIR))
            .or(file.seed_dir)
            .unwrap_or_else(|| PathBuf::from("seed"));

        Ok(Self {
            database_path,
            host,
            port,
            seed_dir,
            log_level: file.logging.level,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
