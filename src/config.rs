//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Duration;

use crate::constants::{
    DEFAULT_ANALYTICS_WINDOW_DAYS, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JWT_EXPIRY_MINUTES,
    DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_ABSOLUTE_TIMEOUT_HOURS,
    DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES, MAX_ANALYTICS_WINDOW_DAYS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub analytics: AnalyticsConfig,
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
    pub request_timeout_secs: u64,
    /// Take the client address from `X-Forwarded-For`; only safe behind a proxy that sets it
    pub trust_proxy_headers: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

/// Session timeout configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_timeout_minutes: i64,
    pub absolute_timeout_hours: i64,
}

/// Analytics configuration
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub default_window_days: i64,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            session: SessionConfig::from_env()?,
            analytics: AnalyticsConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }
}

/// Read an environment variable, falling back to a default, and parse it
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            trust_proxy_headers: parse_var("TRUST_PROXY_HEADERS", false)?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_minutes: parse_var("JWT_EXPIRY_MINUTES", DEFAULT_JWT_EXPIRY_MINUTES)?,
            refresh_token_expiry_days: parse_var(
                "REFRESH_TOKEN_EXPIRY_DAYS",
                DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS,
            )?,
        };

        if config.expiry_minutes <= 0 {
            return Err(ConfigError::InvalidValue("JWT_EXPIRY_MINUTES".to_string()));
        }
        if config.refresh_token_expiry_days <= 0 {
            return Err(ConfigError::InvalidValue("REFRESH_TOKEN_EXPIRY_DAYS".to_string()));
        }

        Ok(config)
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            idle_timeout_minutes: parse_var(
                "SESSION_IDLE_TIMEOUT_MINUTES",
                DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES,
            )?,
            absolute_timeout_hours: parse_var(
                "SESSION_ABSOLUTE_TIMEOUT_HOURS",
                DEFAULT_SESSION_ABSOLUTE_TIMEOUT_HOURS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Both limits must be positive and the idle limit may not exceed the absolute one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_timeout_minutes <= 0 {
            return Err(ConfigError::InvalidValue("SESSION_IDLE_TIMEOUT_MINUTES".to_string()));
        }
        if self.absolute_timeout_hours <= 0 || self.idle_timeout() > self.absolute_timeout() {
            return Err(ConfigError::InvalidValue("SESSION_ABSOLUTE_TIMEOUT_HOURS".to_string()));
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::minutes(self.idle_timeout_minutes)
    }

    pub fn absolute_timeout(&self) -> Duration {
        Duration::hours(self.absolute_timeout_hours)
    }
}

impl AnalyticsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_window_days =
            parse_var("ANALYTICS_DEFAULT_WINDOW_DAYS", DEFAULT_ANALYTICS_WINDOW_DAYS)?;

        if !(1..=MAX_ANALYTICS_WINDOW_DAYS).contains(&default_window_days) {
            return Err(ConfigError::InvalidValue("ANALYTICS_DEFAULT_WINDOW_DAYS".to_string()));
        }

        Ok(Self { default_window_days })
    }
}

impl CorsConfig {
    fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_default();

        Self { allowed_origins }
    }
}

/// Split a comma-separated origin list, dropping blanks and a lone `*`
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_string)
        .collect()
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            json_logs: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            trust_proxy_headers: false,
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_session_config_validation() {
        let ok = SessionConfig {
            idle_timeout_minutes: 30,
            absolute_timeout_hours: 12,
        };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.idle_timeout(), Duration::minutes(30));
        assert_eq!(ok.absolute_timeout(), Duration::hours(12));

        let zero_idle = SessionConfig {
            idle_timeout_minutes: 0,
            absolute_timeout_hours: 12,
        };
        assert!(zero_idle.validate().is_err());

        // Idle limit longer than the absolute limit is rejected
        let inverted = SessionConfig {
            idle_timeout_minutes: 180,
            absolute_timeout_hours: 2,
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins("https://a.example, https://b.example ,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(split_origins("*").is_empty());
        assert!(split_origins("").is_empty());
    }
}
