// ── Speaker HTTP client ──
//
// Thin request layer over the speaker's control surface. Actions are
// POSTs with a JSON body, queries are GETs. One client per speaker;
// cloning shares the underlying connection pool.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{HostStatus, PlayerStatus, PowerState, Source};

/// TCP port of the speaker's HTTP control API.
pub const CONTROL_PORT: u16 = 50001;

const SET_POWER_ON: &str = "/api/v1/host/set_power_on";
const SET_STANDBY: &str = "/api/v1/host/set_standby";
const GET_STATUS: &str = "/api/v1/host/get_status";
const SET_SOURCE: &str = "/api/v1/host/set_source";
const SET_MUTE: &str = "/api/v1/player/set_mute";
const SET_UNMUTE: &str = "/api/v1/player/set_unmute";
const TOGGLE_PLAY_PAUSE: &str = "/api/v1/player/toggle_play_pause";
const SET_VOLUME: &str = "/api/v1/player/set_volume";
const GET_PLAYER_STATUS: &str = "/api/v1/player/get_player_status";

/// Client for one speaker's control API.
///
/// Holds only the target base URL; no device state is cached, so every
/// accessor reflects what the speaker reported on that call.
#[derive(Debug, Clone)]
pub struct SpeakerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SpeakerClient {
    /// Create a client for the speaker at `address` (host name or IP),
    /// targeting the standard control port.
    pub fn new(address: &str) -> Result<Self, Error> {
        let base_url =
            Url::parse(&format!("http://{address}:{CONTROL_PORT}")).map_err(|e| {
                Error::InvalidArgument {
                    message: format!("invalid speaker address {address:?}: {e}"),
                }
            })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Create a client with an explicit base URL and pre-built
    /// `reqwest::Client` (used by tests to point at a mock server).
    pub fn with_base_url(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The speaker's base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Wake the speaker from standby.
    pub async fn power_on(&self) -> Result<(), Error> {
        self.command(SET_POWER_ON, &serde_json::json!({})).await
    }

    /// Put the speaker into standby.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.command(SET_STANDBY, &serde_json::json!({})).await
    }

    pub async fn mute(&self) -> Result<(), Error> {
        self.command(SET_MUTE, &serde_json::json!({})).await
    }

    pub async fn unmute(&self) -> Result<(), Error> {
        self.command(SET_UNMUTE, &serde_json::json!({})).await
    }

    pub async fn toggle_play_pause(&self) -> Result<(), Error> {
        self.command(TOGGLE_PLAY_PAUSE, &serde_json::json!({})).await
    }

    /// Set the playback volume.
    ///
    /// Rejects values outside `[0, 100]` before issuing any request.
    pub async fn set_volume(&self, volume: i64) -> Result<(), Error> {
        if !(0..=100).contains(&volume) {
            return Err(Error::InvalidArgument {
                message: format!("volume must be between 0 and 100, got {volume}"),
            });
        }
        self.command(SET_VOLUME, &serde_json::json!({ "volume": volume }))
            .await
    }

    /// Switch the input source.
    ///
    /// `source` must name one of the six recognized inputs; anything else
    /// is rejected before issuing any request.
    pub async fn set_source(&self, source: &str) -> Result<(), Error> {
        let source: Source = source.parse().map_err(|_| Error::InvalidArgument {
            message: format!(
                "invalid source {source:?}, must be one of: \
                 wifi, bluetooth, tv, optical, coaxial, analog"
            ),
        })?;
        self.command(SET_SOURCE, &serde_json::json!({ "source": source }))
            .await
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current playback volume; 0 when the speaker omits the field.
    pub async fn volume(&self) -> Result<i64, Error> {
        Ok(self.player_status().await?.volume.unwrap_or(0))
    }

    /// Current input source; `"unknown"` when the speaker omits the field.
    pub async fn source(&self) -> Result<String, Error> {
        Ok(self
            .player_status()
            .await?
            .source
            .unwrap_or_else(|| "unknown".to_owned()))
    }

    /// Whether the speaker reports active playback.
    pub async fn is_playing(&self) -> Result<bool, Error> {
        Ok(self.player_status().await?.state.as_deref() == Some("playing"))
    }

    /// Raw player status payload.
    pub async fn player_status(&self) -> Result<PlayerStatus, Error> {
        self.query(GET_PLAYER_STATUS).await
    }

    /// Host power state.
    ///
    /// This accessor never fails: any transport, status, or decode problem
    /// is reported as [`PowerState::Standby`]. An unreachable speaker and
    /// one that is off look the same to the bridge, and that is the safe
    /// answer for both.
    pub async fn status(&self) -> PowerState {
        match self.query::<HostStatus>(GET_STATUS).await {
            Ok(host) => host.status,
            Err(e) => {
                debug!(error = %e, "host status unavailable, reporting standby");
                PowerState::Standby
            }
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{endpoint}")
    }

    /// POST an action with a JSON body. Success is the status code; the
    /// response body is ignored.
    async fn command(&self, endpoint: &str, body: &serde_json::Value) -> Result<(), Error> {
        let url = self.endpoint_url(endpoint);
        debug!("POST {url}");

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::CommandFailed {
                endpoint: endpoint.to_owned(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::CommandFailed {
                endpoint: endpoint.to_owned(),
                message: format!("status: {}", status.as_u16()),
            });
        }
        Ok(())
    }

    /// GET a status endpoint and decode the JSON body.
    async fn query<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {url}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::QueryFailed {
                endpoint: endpoint.to_owned(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::QueryFailed {
                endpoint: endpoint.to_owned(),
                message: format!("status: {}", status.as_u16()),
            });
        }

        resp.json().await.map_err(|e| Error::Decode {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
        })
    }
}
