use std::env;

/// Configuration errors raised while reading the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for environment variable {0}")]
    InvalidVar(&'static str),
}

/// Application configuration sourced from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub default_pagination_limit: i64,
    pub maximum_pagination_limit: i64,
    pub token_ttl_hours: i64,
}

impl Config {
    /// Reads the configuration from environment variables, applying
    /// defaults for everything except the database URL and JWT secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: optional_parsed("PORT", 3000)?,
            default_pagination_limit: optional_parsed("DEFAULT_PAGINATION_LIMIT", 20)?,
            maximum_pagination_limit: optional_parsed("MAXIMUM_PAGINATION_LIMIT", 100)?,
            token_ttl_hours: optional_parsed("TOKEN_TTL_HOURS", 5)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional_parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar(name)),
        Err(_) => Ok(default),
    }
}
