use std::net::SocketAddr;

use crate::error::StartupError;

pub const DATABASE_URI: &str = "DATABASE_URI";
pub const PORT: &str = "PORT";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_uri: String,
    pub port: u16,
}

impl Config {
    /// Reads configuration from the process environment, after loading a
    /// `.env` file from the working directory if one exists.
    pub fn from_env() -> Result<Self, StartupError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_uri = lookup(DATABASE_URI)
            .filter(|v| !v.trim().is_empty())
            .ok_or(StartupError::MissingConfig(DATABASE_URI))?;

        let port = match lookup(PORT) {
            Some(raw) => raw.trim().parse().map_err(|_| StartupError::InvalidConfig {
                key: PORT,
                reason: format!("'{raw}' is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { database_uri, port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
