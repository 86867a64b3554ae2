//! Client configuration.
//!
//! A `Config` names the messaging service, the signed-in identity, and the
//! log poll cadence. Session management itself lives outside this crate; the
//! credential arrives here fully formed and is treated as opaque.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SyncError};

fn default_poll_interval() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the messaging service, e.g. `https://dm.example.com`.
    pub service_url: String,
    /// Identity credential of the signed-in account. Sent verbatim in the
    /// `Authorization` header and used as the sender of optimistic messages.
    pub did: String,
    /// Seconds between chat log polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Config {
    pub fn new(service_url: impl Into<String>, did: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            did: did.into(),
            poll_interval_secs: default_poll_interval(),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SyncError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// The service URL, validated.
    pub fn service_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.service_url)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
