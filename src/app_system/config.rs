use std::env;
use tracing_subscriber::EnvFilter;
use crate::app_system::SystemError;

pub const CHANNEL_BUFFER_VAR: &str = "ORDERS_CHANNEL_BUFFER";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Runtime settings for [`OrderSystem`](crate::app_system::OrderSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of each actor's request queue.
    pub channel_buffer: usize,
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, SystemError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SystemError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(CHANNEL_BUFFER_VAR) {
            config.channel_buffer = match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(SystemError::Config {
                        key: CHANNEL_BUFFER_VAR,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(size) => size,
                Err(e) => {
                    return Err(SystemError::Config {
                        key: CHANNEL_BUFFER_VAR,
                        reason: format!("{} ({:?})", e, raw),
                    })
                }
            };
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
            config.env_filter()?;
        }

        Ok(config)
    }

    /// Parses [`log_filter`](Self::log_filter) into a subscriber filter.
    pub fn env_filter(&self) -> Result<EnvFilter, SystemError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| SystemError::Config {
            key: LOG_FILTER_VAR,
            reason: format!("{} ({:?})", e, self.log_filter),
        })
    }
}
