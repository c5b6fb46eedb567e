//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub actor: ActorConfig,
    pub federation: FederationConfig,
    pub request_log: RequestLogConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 8080)
    pub port: u16,
    /// Public domain (e.g., "social.example.com")
    ///
    /// Every canonical federation URI is derived from this value, so it
    /// must match the public-facing domain exactly or remote discovery
    /// cross-checks will fail.
    pub domain: String,
    /// Protocol ("http" or "https")
    pub protocol: String,
}

impl ServerConfig {
    /// Get the base URL for the instance
    ///
    /// # Returns
    /// Full URL like "https://social.example.com"
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol, self.domain)
    }
}

/// Presentation fields for the synthetic local actor
///
/// This node resolves every username to the same synthetic identity;
/// these fields fill in the parts of the actor document that are not
/// derived from the username.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    /// Display name shown in the actor document
    #[serde(default = "default_display_name")]
    pub display_name: String,
    /// Profile summary (HTML fragment)
    #[serde(default = "default_summary")]
    pub summary: String,
    /// PEM-encoded public key; empty means "no key configured"
    #[serde(default)]
    pub public_key_pem: String,
    /// Path to the shared avatar image served for every actor
    #[serde(default = "default_icon_path")]
    pub icon_path: PathBuf,
}

fn default_display_name() -> String {
    "Debug".to_string()
}

fn default_summary() -> String {
    "<p>Synthetic debug account.</p>".to_string()
}

fn default_icon_path() -> PathBuf {
    PathBuf::from("public/icon.png")
}

/// Outbound federation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FederationConfig {
    /// Timeout for outbound activity delivery in seconds
    pub delivery_timeout_seconds: u64,
}

/// Debug request log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RequestLogConfig {
    /// Enable the NDJSON request log
    pub enabled: bool,
    /// Path to the log file
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (DRIFTPUB_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.protocol", "https")?
            .set_default("federation.delivery_timeout_seconds", 10)?
            .set_default("request_log.enabled", true)?
            .set_default("request_log.path", "request.log")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (DRIFTPUB_*)
            .add_source(
                Environment::with_prefix("DRIFTPUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.server.domain.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "server.domain must not be empty".to_string(),
            ));
        }

        if self.server.domain.contains('/') {
            return Err(crate::error::AppError::Config(
                "server.domain must be a bare hostname, not a URL".to_string(),
            ));
        }

        if !matches!(self.server.protocol.as_str(), "http" | "https") {
            return Err(crate::error::AppError::Config(
                "server.protocol must be \"http\" or \"https\"".to_string(),
            ));
        }

        if self.federation.delivery_timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "federation.delivery_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
