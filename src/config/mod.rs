use std::env;

use crate::core::{AppError, Result};

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Browser origin of the dashboard, for CORS. Unset means permissive
    /// (development)
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            },
            server: ServerConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if let Some(origin) = &self.app.cors_allowed_origin {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(AppError::Configuration(format!(
                    "CORS_ALLOWED_ORIGIN must be a full origin, got: {}",
                    origin
                )));
            }
        }

        Ok(())
    }
}
