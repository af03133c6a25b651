use std::env;
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string; leads stay in memory when absent.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Single origin allowed by CORS; any origin when absent.
    pub allowed_origin: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBindAddr(addr) => write!(f, "BIND_ADDR is not a socket address: {}", addr),
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            bind_addr,
            allowed_origin: non_empty("ALLOWED_ORIGIN"),
        })
    }
}
