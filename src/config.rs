use std::{path::Path, time::Duration};

use anyhow::{Context, Error};
use common::DEFAULT_DEVICE_ADDRESS;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the panel web server listens
    pub listen_addr: String,
    /// Initial ESP32 address, editable from the panel afterwards
    pub device_address: String,
    pub request_timeout_ms: u64,
    /// How long the address field has to sit idle before an edit commits
    pub address_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            device_address: DEFAULT_DEVICE_ADDRESS.to_string(),
            request_timeout_ms: 5000,
            address_debounce_ms: 500,
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        Self::load_or_default(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, Error> {
        let path = path.as_ref();
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            ron::from_str(&config).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// A missing file means defaults. A file that exists but doesn't parse is
    /// still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, Error> {
        if path.as_ref().exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn address_debounce(&self) -> Duration {
        Duration::from_millis(self.address_debounce_ms)
    }
}
