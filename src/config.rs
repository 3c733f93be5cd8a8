// src/config.rs

use std::{env, fmt, str::FromStr};

use dotenvy::dotenv;

/// Dev frontends allowed by default when `CORS_ORIGINS` is unset.
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:8080,http://127.0.0.1:8080,http://localhost:8081,http://127.0.0.1:8081";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_max_lifetime_secs: u64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
}

/// Why the environment could not be turned into a [`Config`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A required variable is unset.
    Missing(&'static str),
    /// A variable is set but does not parse as the expected type.
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration: parse_or("JWT_EXPIRATION", 24 * 60 * 60)?,
            rust_log,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            cors_origins,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 25)?,
            db_min_connections: parse_or("DB_MIN_CONNECTIONS", 5)?,
            db_max_lifetime_secs: parse_or("DB_MAX_LIFETIME_SECS", 300)?,
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            admin_email: env::var("ADMIN_EMAIL").ok(),
        })
    }
}

/// Reads an optional variable. Unset means `default`; set but unparsable is an error.
fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_value(key, env::var(key).ok(), default)
}

fn parse_value<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    let parsed = value.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_value_uses_default() {
        assert_eq!(parse_value::<u32>("DB_MAX_CONNECTIONS", None, 25), Ok(25));
    }

    #[test]
    fn set_value_is_parsed() {
        assert_eq!(
            parse_value::<u64>("JWT_EXPIRATION", Some(" 3600 ".to_string()), 86400),
            Ok(3600)
        );
    }

    #[test]
    fn unparsable_value_is_rejected() {
        let err = parse_value::<u32>("DB_MAX_CONNECTIONS", Some("lots".to_string()), 25)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "lots".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "DB_MAX_CONNECTIONS has an invalid value: \"lots\""
        );
    }
}
