//! Process configuration, read once at start-up.
//!
//! | variable           | default   |
//! |--------------------|-----------|
//! | `HOST`             | `0.0.0.0` |
//! | `PORT`             | `4000`    |
//! | `SE_EPHE_PATH`     | `ephe`    |
//! | `SE_REQUIRE_FILES` | `false`   |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_EPHE_PATH: &str = "ephe";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("ephemeris directory {0} does not exist or is not a directory")]
    MissingEphemerisDir(PathBuf),
}

/// Settings handed to the ephemeris engine's constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemerisConfig {
    /// Directory holding the `.se1` data files.
    pub ephe_path: PathBuf,
    /// When set, a silent fallback to the built-in analytical ephemeris is
    /// reported as the ephemeris being unavailable.
    pub require_data_files: bool,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        EphemerisConfig {
            ephe_path: PathBuf::from(DEFAULT_EPHE_PATH),
            require_data_files: false,
        }
    }
}

impl EphemerisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ephe_path.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::MissingEphemerisDir(self.ephe_path.clone()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub ephemeris: EphemerisConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ephemeris: EphemerisConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                var: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        let ephe_path = lookup("SE_EPHE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.ephemeris.ephe_path);

        let require_data_files = match lookup("SE_REQUIRE_FILES") {
            Some(raw) => parse_flag("SE_REQUIRE_FILES", &raw)?,
            None => defaults.ephemeris.require_data_files,
        };

        Ok(ServerConfig {
            host,
            port,
            ephemeris: EphemerisConfig {
                ephe_path,
                require_data_files,
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                var: "HOST",
                value: self.host.clone(),
                reason: e.to_string(),
            })
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
