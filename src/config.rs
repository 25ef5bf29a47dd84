/*
 * Responsibility
 * - Load settings from the environment (.env first, then process env)
 * - Validate them at startup (missing values fail the boot)
 * - development / test / production profiles
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_SECRET_KEY: &str = "notsosecretkey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            "test" | "testing" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub db_pool_size: u32,

    pub service_name: String,
    pub current_version: String,

    // HS256 key for access tokens
    pub secret_key: String,
    pub access_token_leeway_seconds: u64,

    pub request_timeout_seconds: u64,
    pub max_body_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("db_pool_size", &self.db_pool_size)
            .field("service_name", &self.service_name)
            .field("current_version", &self.current_version)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (process env in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 5000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DB_POOL_SIZE"))?,
            None => 10,
        };

        let service_name =
            lookup("SERVICE_NAME").unwrap_or_else(|| "Vendor Management System".to_string());

        let current_version =
            lookup("CURRENT_VERSION").unwrap_or_else(|| "development".to_string());

        // The fallback key is only acceptable outside production.
        let secret_key = match lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(key) => key,
            None if app_env.is_production() => return Err(ConfigError::Missing("SECRET_KEY")),
            None => DEFAULT_SECRET_KEY.to_string(),
        };

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 60,
        };

        let request_timeout_seconds = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("MAX_BODY_BYTES"))?,
            None => 1024 * 1024,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_pool_size,
            service_name,
            current_version,
            secret_key,
            access_token_leeway_seconds,
            request_timeout_seconds,
            max_body_bytes,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
