use chrono::{Local, NaiveDate};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("BIND_ADDR must be an IP address, got '{0}'")]
    InvalidBindAddr(String),

    #[error("DASHBOARD_START_DATE must be YYYY-MM-DD, got '{0}'")]
    InvalidStartDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Initial month cursor.
    pub start_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let ip = match lookup("BIND_ADDR") {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidBindAddr(value))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let start_date = match lookup("DASHBOARD_START_DATE") {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| ConfigError::InvalidStartDate(value))?,
            None => Local::now().date_naive(),
        };

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            start_date,
        })
    }
}
