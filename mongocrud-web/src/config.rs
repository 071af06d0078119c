use anyhow::{Context, Result};
use std::{env, time::Duration};

use mongocrud::mongodb::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub server_address: String,
    pub connect_timeout: Duration,
    pub operation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            mongodb_uri: text("MONGODB_URI", "mongodb://localhost:27017"),
            database: text("MONGODB_DATABASE", "test3"),
            collection: text("MONGODB_COLLECTION", "clients"),
            server_address: text("SERVER_ADDRESS", "0.0.0.0:8000"),
            connect_timeout: seconds(&lookup, "CONNECT_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            operation_timeout: seconds(&lookup, "OPERATION_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT),
        })
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{key} must be a whole number of seconds, got {raw:?}"))
        })
        .transpose()
}
