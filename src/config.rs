use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use dotenvy::dotenv;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then overrides defaults from `SHEET_INSIGHTS_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(host) = lookup("SHEET_INSIGHTS_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("Invalid SHEET_INSIGHTS_HOST '{}'", host))?;
        }
        if let Some(port) = lookup("SHEET_INSIGHTS_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid SHEET_INSIGHTS_PORT '{}'", port))?;
        }
        if let Some(size) = lookup("SHEET_INSIGHTS_MAX_FILE_SIZE") {
            config.max_file_size = size
                .parse()
                .with_context(|| format!("Invalid SHEET_INSIGHTS_MAX_FILE_SIZE '{}'", size))?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
