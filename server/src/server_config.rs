use std::net::SocketAddr;
use std::path::PathBuf;

use common::config::{ConfigContentProvider, ConfigLoader, Validate};
use serde::{Deserialize, Serialize};

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DATABASE_URL: &str = "sqlite:snake_scores.db?mode=rwc";
const SUPPORTED_SCHEMES: &[&str] = &["postgres://", "postgresql://", "sqlite:"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub static_files_path: PathBuf,
    pub log_level: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            static_files_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            log_level: "info".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("listen_addr '{}' is invalid: {}", self.listen_addr, e))?;

        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".to_string());
        }

        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
            // The URL itself is left out: it may carry credentials.
            return Err(format!(
                "database.url must start with one of {}",
                SUPPORTED_SCHEMES.join(", ")
            ));
        }
        if self.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Loads the YAML config, then lets `env` override the database URL.
pub fn load_server_config<TProvider, TEnv>(
    provider: TProvider,
    env: TEnv,
) -> Result<ServerConfig, String>
where
    TProvider: ConfigContentProvider,
    TEnv: Fn(&str) -> Option<String>,
{
    ConfigLoader::new(provider).load(|config: &mut ServerConfig| {
        if let Some(url) = env(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.database.url = url;
        }
    })
}
