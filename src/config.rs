use anyhow::Context;
use std::env;
use tracing::warn;

const DEFAULT_DATABASE_URL: &str = "clinic.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_LOGIN_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub pool_size: u32,
    /// Login tokens older than this are refused.
    pub login_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            login_ttl_secs: DEFAULT_LOGIN_TTL_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            warn!("DATABASE_URL not set, using {}", defaults.database_url);
            defaults.database_url.clone()
        });
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| defaults.bind_addr.clone());

        let pool_size = match env::var("DB_POOL_SIZE") {
            Ok(v) => v.parse().context("DB_POOL_SIZE must be a positive integer")?,
            Err(_) => defaults.pool_size,
        };
        let login_ttl_secs = match env::var("LOGIN_TTL_SECS") {
            Ok(v) => v.parse().context("LOGIN_TTL_SECS must be an integer")?,
            Err(_) => defaults.login_ttl_secs,
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
            login_ttl_secs,
        })
    }
}
