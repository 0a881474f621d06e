use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl JwtConfig {
    /// Rules every signing config must satisfy, wherever it was built.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "JWT_SECRET is not set".into(),
            ));
        }
        if self.ttl_minutes <= 0 {
            return Err(ConfigError::InvalidConfiguration(
                "JWT_TTL_MINUTES must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub hash_work_factor: u32,
    pub client_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL")
            .ok_or_else(|| ConfigError::InvalidConfiguration("DATABASE_URL is not set".into()))?;

        let jwt = JwtConfig {
            secret: var("JWT_SECRET").unwrap_or_default(),
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "userdesk".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "userdesk-users".into()),
            ttl_minutes: parse_or(&var, "JWT_TTL_MINUTES", 60i64)?,
        };
        jwt.check()?;

        let hash_work_factor = parse_or(&var, "HASH_WORK_FACTOR", 2u32)?;
        if hash_work_factor == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "HASH_WORK_FACTOR must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            jwt,
            hash_work_factor,
            client_url: var("CLIENT_URL").unwrap_or_else(|| "http://localhost:3000".into()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidConfiguration(format!("{key} is not a valid number"))),
        None => Ok(default),
    }
}
