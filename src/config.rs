// src/config.rs
use std::{env, path::PathBuf, str::FromStr};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    public_base_url: String,
    storage_root: PathBuf,
    staging_dir: PathBuf,
    default_page_size: u32,
    max_upload_bytes: usize,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://cms.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MAX_CONNECTIONS: u32 = 16;

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(default_public_base_url)
            .trim_end_matches('/')
            .to_string();
        if public_base_url.is_empty() {
            return Err(ConfigError::Invalid("PUBLIC_BASE_URL cannot be empty".into()));
        }

        let storage_root = lookup("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("storage/public"));
        let staging_dir = lookup("STORAGE_STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("storage/staging"));
        if staging_dir.starts_with(&storage_root) {
            return Err(ConfigError::Invalid(
                "STORAGE_STAGING_DIR must not live inside STORAGE_ROOT".into(),
            ));
        }

        let default_page_size = parse_or(&lookup, "DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "DEFAULT_PAGE_SIZE must be at least 1".into(),
            ));
        }
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            public_base_url,
            storage_root,
            staging_dir,
            default_page_size,
            max_upload_bytes,
            allowed_origins,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Origin that image references are issued under, without a trailing slash.
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn storage_root(&self) -> &PathBuf {
        &self.storage_root
    }

    pub fn staging_dir(&self) -> &PathBuf {
        &self.staging_dir
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}
