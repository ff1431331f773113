//! Configuration loading for the kefbridge binary.
//!
//! A TOML file (default: the platform config dir, e.g.
//! `~/.config/kefbridge/config.toml`) merged with `KEFBRIDGE_`-prefixed
//! environment variables, translated into `kefbridge_core` types. The
//! speaker list is deliberately `Option`: its absence is a configuration
//! error the caller reports without crashing.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use kefbridge_core::{DEFAULT_POLL_INTERVAL_SECS, SpeakerConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level bridge configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// The speakers to bridge. `None` when the file has no `[[speakers]]`
    /// entries at all -- reported as a logged configuration error, never
    /// a crash.
    pub speakers: Option<Vec<SpeakerEntry>>,
}

/// One `[[speakers]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeakerEntry {
    pub name: String,
    /// Host name or IP of the speaker.
    pub ip: String,
    pub model: String,
    /// Seconds between background polls.
    #[serde(default = "default_polling_interval")]
    pub polling_interval: u64,
}

fn default_polling_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl BridgeConfig {
    /// Load from `path` (or the default location) overlaid with
    /// `KEFBRIDGE_`-prefixed environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(default_config_path, Path::to_path_buf);
        debug!(path = %path.display(), "loading configuration");
        Self::from_figment(Figment::from(Toml::file(path)).merge(Env::prefixed("KEFBRIDGE_")))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Translate the raw entries into core speaker configurations,
    /// preserving list order.
    pub fn speaker_configs(&self) -> Option<Vec<SpeakerConfig>> {
        self.speakers.as_ref().map(|entries| {
            entries
                .iter()
                .map(|entry| SpeakerConfig {
                    name: entry.name.clone(),
                    address: entry.ip.clone(),
                    model: entry.model.clone(),
                    poll_interval_secs: entry.polling_interval,
                })
                .collect()
        })
    }
}

/// Default config file location: `<platform config dir>/kefbridge/config.toml`,
/// falling back to the working directory when no home is available.
pub fn config_path() -> PathBuf {
    default_config_path()
}

fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "kefbridge").map_or_else(
        || PathBuf::from("kefbridge.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}
