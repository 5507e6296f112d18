use std::env;

use crate::derive::SaltPolicy;
use crate::secrets::DEFAULT_CAPACITY;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub templates_dir: String,
    pub secret_salt: SaltPolicy,
    /// Maximum (device, interface) entries in the secret hash cache
    pub secret_cache_size: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        let salt = get_env("ISIS_SECRET_SALT", "random");
        let secret_salt = salt.parse().unwrap_or_else(|e| {
            tracing::warn!("{} - falling back to random salts", e);
            SaltPolicy::Random
        });

        let secret_cache_size = get_env("ISIS_SECRET_CACHE_SIZE", "")
            .parse()
            .unwrap_or(DEFAULT_CAPACITY);

        Self {
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            templates_dir: get_env("TEMPLATES_DIR", "/configs/templates"),
            secret_salt,
            secret_cache_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            templates_dir: "/configs/templates".to_string(),
            secret_salt: SaltPolicy::Random,
            secret_cache_size: DEFAULT_CAPACITY,
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
