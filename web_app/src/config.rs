//! Application configuration management with security considerations.
//!
//! This module handles all configuration values required for the storefront.
//! Sensitive fields are marked and must never be logged.
//!
//! # Security Notes
//! - `bold_secret_key` signs the payment integrity hash and verifies webhooks
//! - Production environments should use secure secret management systems

use anyhow::Context;
use envconfig::Envconfig;
use std::sync::OnceLock;

/// Application configuration loaded from environment variables.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/mawa.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost", "tienda.mawa.co"
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: CSRF protection password (UUID format)
    pub csrf_pass: String,

    /// 🔒 SENSITIVE: CSRF protection salt (UUID format)
    pub csrf_salt: String,

    /// Bold payment button api key (SEMI-SENSITIVE)
    /// Exposed to the browser inside the payment widget tag
    pub bold_api_key: Option<String>,

    /// 🔒 SENSITIVE: Bold secret key
    /// Signs the integrity hash and the payment webhooks
    pub bold_secret_key: Option<String>,

    /// Url of the trusted integrity hash endpoint (NON-SENSITIVE)
    /// Defaults to this same server
    pub integrity_hash_endpoint: Option<String>,

    /// 🔒 SENSITIVE: Logfire write token, telemetry stays local when missing
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }

    /// Endpoint the order flow asks for the payment integrity hash
    pub fn integrity_hash_endpoint(&self) -> String {
        match &self.integrity_hash_endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.to_string(),
            _ => format!("{}/api/bold/integrity-hash", self.base_url()),
        }
    }

    /// Bold secret key, `None` when unset or blank
    pub fn bold_secret(&self) -> Option<&str> {
        self.bold_secret_key
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    /// Bold api key, `None` when unset or blank
    pub fn bold_api_key(&self) -> Option<&str> {
        self.bold_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Global application configuration, set once by [init_config]
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Loads the configuration from the environment into [APP_CONFIG]
pub fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()
        .context("failed to load application configuration from environment")?;

    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow::anyhow!("application configuration was already initialized"))
}

/// Shortcut to the loaded configuration
pub fn app_config() -> anyhow::Result<&'static AppConfig> {
    APP_CONFIG.get().context("failed to get app config")
}
