use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote VIN decoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Endpoint template; `{vin}` is replaced with the requested VIN
    #[serde(default = "default_decoder_url_template")]
    pub url_template: String,
    /// Per-request timeout for the decoder call
    #[serde(default = "default_decoder_timeout", with = "duration_serde::duration")]
    pub timeout: Duration,
    #[serde(default = "default_decoder_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Scratch directory for export artifacts (system temp dir when unset)
    #[serde(default)]
    pub temp_path: Option<PathBuf>,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_decoder_url_template() -> String {
    DEFAULT_DECODER_URL_TEMPLATE.to_string()
}

fn default_decoder_timeout() -> Duration {
    Duration::from_secs(DEFAULT_DECODER_TIMEOUT_SECS)
}

fn default_decoder_user_agent() -> String {
    DEFAULT_DECODER_USER_AGENT.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            url_template: default_decoder_url_template(),
            timeout: default_decoder_timeout(),
            user_agent: default_decoder_user_agent(),
        }
    }
}

impl DecoderConfig {
    /// Render the decoder URL for a VIN.
    ///
    /// The VIN is percent-encoded so reserved characters (`#`, `?`, `/`)
    /// stay inside the path segment.
    pub fn url_for(&self, vin: &str) -> String {
        self.url_template
            .replace(VIN_PLACEHOLDER, &urlencoding::encode(vin))
    }
}

impl StorageConfig {
    /// Resolve the directory export scratch files are written to
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_path.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Config {
    /// Layer defaults, the TOML file (if present) and `VIN_PROXY_*` environment variables
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if Path::new(config_file).exists() {
            info!("Loading configuration from: {}", config_file);
        } else {
            debug!("Config file {} not found, using defaults and environment", config_file);
        }

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration from {config_file}"))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.decoder.url_template.contains(VIN_PLACEHOLDER) {
            return Err(AppError::configuration(format!(
                "decoder.url_template must contain the {VIN_PLACEHOLDER} placeholder: {}",
                self.decoder.url_template
            )));
        }
        if self.web.port == 0 {
            return Err(AppError::configuration("web.port must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.decoder.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_decoder_url_rendering() {
        let decoder = DecoderConfig::default();
        assert_eq!(
            decoder.url_for("1M2AX09C88M003743"),
            "https://vpic.nhtsa.dot.gov/api/vehicles/decodevin/1M2AX09C88M003743?format=json"
        );
    }

    #[test]
    fn test_decoder_url_encodes_reserved_characters() {
        let decoder = DecoderConfig::default();
        assert_eq!(
            decoder.url_for("1M2AX09C88M00374#"),
            "https://vpic.nhtsa.dot.gov/api/vehicles/decodevin/1M2AX09C88M00374%23?format=json"
        );
        assert_eq!(
            decoder.url_for("1M2AX09C8/M0?3743"),
            "https://vpic.nhtsa.dot.gov/api/vehicles/decodevin/1M2AX09C8%2FM0%3F3743?format=json"
        );
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let mut config = Config::default();
        config.decoder.url_template = "https://example.com/decode".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration { .. })
        ));
    }

    #[test]
    fn test_layered_loading() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "vin.toml",
                r#"
                [web]
                port = 9000

                [decoder]
                timeout = "5s"
                "#,
            )?;
            jail.set_env("VIN_PROXY_DATABASE__URL", "sqlite::memory:");

            let config = Config::load_from_file("vin.toml").expect("config should load");
            assert_eq!(config.web.port, 9000);
            assert_eq!(config.web.host, DEFAULT_HOST);
            assert_eq!(config.decoder.timeout, Duration::from_secs(5));
            assert_eq!(config.database.url, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from_file("absent.toml").expect("defaults should load");
            assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
            Ok(())
        });
    }
}
