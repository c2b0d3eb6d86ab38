mod basic;
mod store;

pub use basic::BasicConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// SQLite store settings (see `store` table in config.toml).
    #[serde(default)]
    pub store: StoreConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "TOOLBOARD_";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and `TOOLBOARD_*` env vars.
    ///
    /// Nested keys use `__` as separator, e.g. `TOOLBOARD_BASIC__SECRET_KEY`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from all layers.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
