#![allow(dead_code)]

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use troophq_core::settings::{
    api_server::ApiServer, lockout::LockoutSettings, rate_limiting::RateLimitingConfig,
};

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,
    pub api: ApiServer,
    #[serde(default)]
    pub lockout: LockoutSettings,
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
    /// Path to the privilege matrix; the built-in defaults are used when the
    /// file does not exist
    #[serde(default = "default_privileges_file")]
    pub privileges_file: String,
}

fn default_privileges_file() -> String {
    "config/privileges.yaml".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debug: false,
            api: ApiServer::default(),
            lockout: LockoutSettings::default(),
            rate_limiting: RateLimitingConfig::default(),
            privileges_file: default_privileges_file(),
        }
    }
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("TROOPHQ")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("TROOPHQ_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("debug", false)?
            .set_default("api.bind_address", "0.0.0.0:21380")?
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment());

        let s = builder.build()?;
        s.try_deserialize()
    }
}
