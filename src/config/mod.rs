use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Base URLs of the MicroBank services. Deployments usually front all of
/// them with one gateway, so every URL defaults to the gateway port.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_service_url")]
    pub auth_url: String,
    #[serde(default = "default_service_url")]
    pub banking_url: String,
    #[serde(default = "default_service_url")]
    pub admin_url: String,
    #[serde(default = "default_service_url")]
    pub audit_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth_url: default_service_url(),
            banking_url: default_service_url(),
            admin_url: default_service_url(),
            audit_url: default_service_url(),
        }
    }
}

fn default_service_url() -> String {
    "http://localhost:8083".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// File the session token is persisted in between invocations.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bankctl")
        .join("token")
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
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
    "warn".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    /// Point every service at one base URL. Used by the `--api-url` flag,
    /// which assumes a gateway deployment.
    pub fn override_api_url(&mut self, url: &str) {
        self.services.auth_url = url.to_string();
        self.services.banking_url = url.to_string();
        self.services.admin_url = url.to_string();
        self.services.audit_url = url.to_string();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_gateway() {
        let config = Config::default();
        assert_eq!(config.services.auth_url, "http://localhost:8083");
        assert_eq!(config.services.audit_url, "http://localhost:8083");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.services.banking_url, "http://localhost:8083");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [services]
            banking_url = "http://banking.internal:8082"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.services.banking_url, "http://banking.internal:8082");
        assert_eq!(config.services.auth_url, "http://localhost:8083");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_api_url_covers_all_services() {
        let mut config = Config::default();
        config.override_api_url("http://gateway:9000");
        assert_eq!(config.services.auth_url, "http://gateway:9000");
        assert_eq!(config.services.banking_url, "http://gateway:9000");
        assert_eq!(config.services.admin_url, "http://gateway:9000");
        assert_eq!(config.services.audit_url, "http://gateway:9000");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.services.auth_url, "http://localhost:8083");
    }

    #[test]
    fn test_token_file_override() {
        let config: Config = toml::from_str(
            r#"
            [auth]
            token_file = "/tmp/bankctl-test-token"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.auth.token_file,
            PathBuf::from("/tmp/bankctl-test-token")
        );
    }
}
