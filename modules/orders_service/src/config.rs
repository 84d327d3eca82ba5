//! Configuration for the orders service
//!
//! Layered with figment: serde defaults, then an optional YAML file, then
//! `ORDERS__`-prefixed environment variables (`__` separates nesting levels,
//! e.g. `ORDERS__DATABASE__URL`).

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "ORDERS__";

/// Orders service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection pool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL (`postgres://...` or `sqlite://...`)
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// How long to wait for a pooled connection, e.g. `"5s"`
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Log every SQL statement through tracing
    #[serde(default)]
    pub sqlx_logging: bool,

    /// Create missing tables on startup
    #[serde(default = "default_true")]
    pub bootstrap_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            sqlx_logging: false,
            bootstrap_schema: true,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional YAML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid orders service configuration")
    }
}

fn default_database_url() -> String {
    "sqlite://orders.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8087))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
            assert!(config.database.bootstrap_schema);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "orders.yaml",
                r#"
database:
  url: "postgres://orders@localhost/orders"
  max_connections: 4
  connect_timeout: "750ms"
logging:
  json: true
"#,
            )?;

            let config = Config::load(Some(Path::new("orders.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.database.url, "postgres://orders@localhost/orders");
            assert_eq!(config.database.max_connections, 4);
            assert_eq!(config.database.min_connections, 1);
            assert_eq!(config.database.connect_timeout, Duration::from_millis(750));
            assert!(config.logging.json);
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("orders.yaml", "server:\n  bind_addr: \"0.0.0.0:9000\"\n")?;
            jail.set_env("ORDERS__SERVER__BIND_ADDR", "127.0.0.1:9100");
            jail.set_env("ORDERS__LOGGING__LEVEL", "debug");

            let config = Config::load(Some(Path::new("orders.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.server.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9100)));
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("orders.yaml", "database:\n  pool_size: 3\n")?;
            assert!(Config::load(Some(Path::new("orders.yaml"))).is_err());
            Ok(())
        });
    }
}
