use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Default document store address
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/csgo-trading";

/// Keys read from the process environment
const ENV_KEYS: &[&str] = &[
    "API_HOST",
    "API_PORT",
    "PORT",
    "API_WORKERS",
    "CORS_ORIGIN",
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "STORAGE",
    "LOG_LEVEL",
];

/// Which trade store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin
    pub cors_origin: String,
    /// Falls back to actix's per-core default when unset
    pub workers: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub storage: StorageBackend,
    pub log_level: String,
    pub extra: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_origin: "*".to_string(),
                workers: None,
            },
            database: DatabaseSettings {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 5,
            },
            storage: StorageBackend::Postgres,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

/// Load configuration: defaults, then the file named by `CONFIG_FILE`,
/// then the process environment.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(path) = env::var("CONFIG_FILE") {
        load_from_file(&mut config, Path::new(&path))?;
    }

    load_from_env(&mut config)?;

    Ok(config)
}

/// Load configuration from environment variables
fn load_from_env(config: &mut Config) -> Result<()> {
    for key in ENV_KEYS {
        if let Ok(value) = env::var(key) {
            apply(config, key, &value)?;
        }
    }
    Ok(())
}

/// Load configuration from a `KEY=value` file
fn load_from_file(config: &mut Config, path: &Path) -> Result<()> {
    let file = File::open(path).context("Failed to open configuration file")?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line.context("Failed to read line from configuration file")?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(index) = line.find('=') {
            let key = line[..index].trim();
            let value = line[index + 1..].trim();
            apply(config, key, value)?;
        }
    }

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "API_HOST" => config.api.host = value.to_string(),
        "API_PORT" | "PORT" => config.api.port = parse(key, value)?,
        "API_WORKERS" => config.api.workers = Some(parse(key, value)?),
        "CORS_ORIGIN" => config.api.cors_origin = value.to_string(),
        "DATABASE_URL" => config.database.url = value.to_string(),
        "DATABASE_MAX_CONNECTIONS" => config.database.max_connections = parse(key, value)?,
        "STORAGE" => config.storage = value.parse().map_err(|e: String| anyhow!(e))?,
        "LOG_LEVEL" => config.log_level = value.to_string(),
        _ => {
            config.extra.insert(key.to_string(), value.to_string());
        }
    }
    Ok(())
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", key, value))
}
