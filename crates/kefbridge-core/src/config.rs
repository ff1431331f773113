// ── Speaker configuration ──

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Poll cadence used when a speaker entry does not set one.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Configuration for one bridged speaker.
///
/// Supplied externally at startup and immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerConfig {
    /// Display name for the accessory.
    pub name: String,
    /// Host name or IP of the speaker. Also the accessory's identity:
    /// [`AccessoryId`](crate::AccessoryId) is derived from it.
    pub address: String,
    /// Model string carried in the accessory context (e.g. "LS50 Wireless II").
    pub model: String,
    /// Seconds between background polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl SpeakerConfig {
    /// Effective poll interval. Zero falls back to the default rather
    /// than producing a busy loop.
    pub fn poll_interval(&self) -> Duration {
        let secs = if self.poll_interval_secs == 0 {
            DEFAULT_POLL_INTERVAL_SECS
        } else {
            self.poll_interval_secs
        };
        Duration::from_secs(secs)
    }
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
