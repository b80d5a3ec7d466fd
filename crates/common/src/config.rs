//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Contact form configuration.
    #[serde(default)]
    pub contact: ContactConfig,
    /// Initial admin user seeded at startup.
    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Contact form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    /// Seconds to wait before a new question from the same IP is persisted.
    #[serde(default = "default_throttle_window_secs")]
    pub throttle_window_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            throttle_window_secs: default_throttle_window_secs(),
        }
    }
}

/// Initial admin user configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Admin display name.
    pub admin_name: String,
    /// Admin email (login identifier).
    pub admin_email: String,
    /// Admin password (hashed before storage).
    pub admin_password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_throttle_window_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `QUILL_ENV`)
    /// 3. Environment variables with `QUILL_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("QUILL_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("QUILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("QUILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_config_default_window() {
        let contact = ContactConfig::default();
        assert_eq!(contact.throttle_window_secs, 60);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let raw = r#"
            [server]
            url = "https://example.com"

            [database]
            url = "postgres://localhost/quill"
        "#;

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.contact.throttle_window_secs, 60);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_seed_section() {
        let raw = r#"
            [server]
            url = "https://example.com"

            [database]
            url = "postgres://localhost/quill"

            [seed]
            admin_name = "John Smith"
            admin_email = "john.smith@example.com"
            admin_password = "12345678"
        "#;

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let seed = config.seed.unwrap();
        assert_eq!(seed.admin_email, "john.smith@example.com");
    }
}
