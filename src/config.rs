//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::registry::IdStrategy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listening port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address (IPv4 or IPv6 literal).
    #[serde(default = "default_host")]
    pub host: String,

    // === Registry Behaviour ===
    /// How new student ids are assigned: `count` or `sequence`.
    #[serde(default)]
    pub id_strategy: IdStrategy,

    /// Start with the two seed records.
    #[serde(default = "default_true")]
    pub seed_students: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            id_strategy: IdStrategy::default(),
            seed_students: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST must be an IP address, got {:?}", self.host));
        }

        Ok(())
    }

    /// Log filter directive: `rust_log`, or crate-level debug when verbose.
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose {
            "student_registry=debug,tower_http=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Socket address to bind the HTTP server to.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("HOST must be an IP address, got {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
