use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub booking_api: BookingApiConfig,
    #[serde(default)]
    pub watch: WatchRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    // Local-development booking service
    "http://localhost:5000".to_string()
}

impl Default for BookingApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Approval-watch timing. These used to be inline literals; keeping them
/// here makes the 10s interval and 5 minute ceiling operator-tunable.
#[derive(Debug, Deserialize, Clone)]
pub struct WatchRules {
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_max_wait_seconds")]
    pub max_wait_seconds: u64,
}

fn default_poll_interval_seconds() -> u64 {
    10
}

fn default_max_wait_seconds() -> u64 {
    300
}

impl Default for WatchRules {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval_seconds(),
            max_wait_seconds: default_max_wait_seconds(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of ROOST)
            // Eg.. `ROOST__BOOKING_API__BASE_URL=...` would set the base url
            .add_source(config::Environment::with_prefix("ROOST").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
