//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin the sign-in message is bound to.
    #[serde(default = "default_app_origin")]
    pub app_origin: String,

    // === Wallet Configuration ===
    /// File holding the persisted wallet address. Memory-only when unset.
    #[serde(default)]
    pub storage_path: Option<String>,

    /// Private key for the local wallet provider (hex, starts with 0x).
    /// No provider is injected when unset.
    #[serde(default)]
    pub wallet_private_key: Option<String>,

    // === Data Service ===
    /// Add the artificial delays of the mock service layer.
    #[serde(default = "default_true")]
    pub simulate_latency: bool,

    /// Use a remote backend instead of the in-process fixtures.
    #[serde(default)]
    pub backend_url: Option<String>,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_app_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            app_origin: default_app_origin(),
            storage_path: None,
            wallet_private_key: None,
            simulate_latency: true,
            backend_url: None,
            rust_log: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let origin = url::Url::parse(&self.app_origin)
            .map_err(|e| format!("APP_ORIGIN is not a valid url: {}", e))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err("APP_ORIGIN must use http or https".to_string());
        }

        if let Some(key) = &self.wallet_private_key {
            let hex_part = key
                .strip_prefix("0x")
                .ok_or_else(|| "WALLET_PRIVATE_KEY must start with 0x".to_string())?;
            if hex_part.len() != 64 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err("WALLET_PRIVATE_KEY must be 32 bytes of hex".to_string());
            }
        }

        if let Some(backend) = &self.backend_url {
            url::Url::parse(backend).map_err(|e| format!("BACKEND_URL is not a valid url: {}", e))?;
        }

        Ok(())
    }

    /// Validate, converting failure into [`AppError::InvalidConfig`].
    pub fn validated(self) -> crate::Result<Self> {
        self.validate().map_err(AppError::InvalidConfig)?;
        Ok(self)
    }

    /// Origin as used in the sign-in message, without a trailing slash.
    pub fn origin(&self) -> &str {
        self.app_origin.trim_end_matches('/')
    }
}
