use std::{env, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DB_URL: &str = "guialocal.db";
const DEFAULT_DB_CONNECTION_POOL_SIZE: u32 = 10;
const DEFAULT_IMAGE_DIR: &str = "images";
const DEFAULT_IMAGE_BASE_URL: &str = "/images";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to read the configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration, read from an optional TOML file and
/// overridable through environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub db_url: Option<String>,
    pub db_connection_pool_size: Option<u32>,
    /// Secret for signing login tokens.
    pub token_secret: Option<String>,
    pub image_store: Option<ImageStoreConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", tag = "kind")]
pub enum ImageStoreConfig {
    /// Remote image store behind an HTTP API.
    #[serde(rename = "http", rename_all = "kebab-case")]
    Http { api_base_url: String, api_key: String },
    /// Images stored on the local file system.
    #[serde(rename = "local-dir", rename_all = "kebab-case")]
    LocalDir { path: String, base_url: String },
}

impl Config {
    pub fn load(file: Option<&Path>) -> Result<Self, Error> {
        let mut config = match file {
            Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        if let Ok(db_url) = env::var("DATABASE_URL") {
            config.db_url = Some(db_url);
        }
        if let Ok(secret) = env::var("TOKEN_SECRET") {
            config.token_secret = Some(secret);
        }
        Ok(config)
    }

    pub fn db_url(&self) -> &str {
        self.db_url.as_deref().unwrap_or(DEFAULT_DB_URL)
    }

    pub fn db_connection_pool_size(&self) -> u32 {
        self.db_connection_pool_size
            .unwrap_or(DEFAULT_DB_CONNECTION_POOL_SIZE)
    }

    pub fn image_store(&self) -> ImageStoreConfig {
        self.image_store.clone().unwrap_or(ImageStoreConfig::LocalDir {
            path: DEFAULT_IMAGE_DIR.to_string(),
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_file() {
        let config: Config = toml::from_str(
            r#"
            db-url = "/var/lib/guialocal/guialocal.db"
            token-secret = "sssht"

            [image-store]
            kind = "http"
            api-base-url = "https://images.example/api"
            api-key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_url(), "/var/lib/guialocal/guialocal.db");
        assert!(matches!(
            config.image_store(),
            ImageStoreConfig::Http { .. }
        ));
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.db_url(), "guialocal.db");
        assert_eq!(config.db_connection_pool_size(), 10);
        assert!(matches!(
            config.image_store(),
            ImageStoreConfig::LocalDir { .. }
        ));
    }
}
