//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr};

use health_assistant_core::CoreConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// Environment (development, production)
    pub environment: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,

    /// Model locations and validation policy
    pub core: CoreConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            core: CoreConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            environment: "development".to_string(),
            log_json: false,
            core: CoreConfig::default(),
        }
    }
}
