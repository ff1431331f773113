// ── Wire payloads ──
//
// Typed request/response shapes for the speaker's control surface.
// The device omits fields it has nothing to say about, so the player
// status models everything as Option and the accessors pick defaults.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Host power state as reported by `/api/v1/host/get_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    #[serde(rename = "powerOn")]
    On,
    #[serde(rename = "standby")]
    Standby,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// The six inputs the speaker accepts on `/api/v1/host/set_source`.
///
/// Parsing is the write-side validation gate: a string that does not
/// round-trip through [`Source`] never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Wifi,
    Bluetooth,
    Tv,
    Optical,
    Coaxial,
    Analog,
}

/// Response body of `/api/v1/host/get_status`.
#[derive(Debug, Clone, Deserialize)]
pub struct HostStatus {
    pub status: PowerState,
}

/// Response body of `/api/v1/player/get_player_status`.
///
/// `source` and `state` stay free-form strings on the read side -- the
/// device reports values outside the settable vocabulary (e.g. during
/// firmware-driven playback), and the bridge only ever compares them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStatus {
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_state_wire_names() {
        let on: PowerState = serde_json::from_str("\"powerOn\"").unwrap();
        let standby: PowerState = serde_json::from_str("\"standby\"").unwrap();
        assert!(on.is_on());
        assert!(!standby.is_on());
    }

    #[test]
    fn source_parses_lowercase_only() {
        assert_eq!("optical".parse::<Source>().unwrap(), Source::Optical);
        assert!("hdmi".parse::<Source>().is_err());
        assert!("".parse::<Source>().is_err());
    }

    #[test]
    fn source_displays_as_wire_value() {
        assert_eq!(Source::Bluetooth.to_string(), "bluetooth");
    }

    #[test]
    fn player_status_tolerates_missing_fields() {
        let status: PlayerStatus = serde_json::from_str("{}").unwrap();
        assert_eq!(status.volume, None);
        assert_eq!(status.source, None);
        assert_eq!(status.state, None);
    }
}
