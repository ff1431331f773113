// ── Accessory handler ──
//
// Binds one speaker's client to one accessory's characteristics.
// Host-facing get/set methods never return an error: device failures
// are logged and replaced with a safe default. The background poll
// task pushes fresh power/volume readings into the sink between host
// requests.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use kefbridge_api::SpeakerClient;

use crate::accessory::{Characteristic, CharacteristicSink, Value};

/// Handler for one speaker accessory.
///
/// Constructing a handler starts its poll task; [`stop`](Self::stop)
/// cancels it. The controller guarantees at most one live handler per
/// accessory id.
pub struct AccessoryHandler {
    client: SpeakerClient,
    cancel: CancellationToken,
}

impl AccessoryHandler {
    /// Bind `client` to `sink` and start polling at `poll_interval`.
    pub fn new(
        client: SpeakerClient,
        sink: Arc<dyn CharacteristicSink>,
        poll_interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        tokio::spawn(poll_task(
            client.clone(),
            sink,
            poll_interval,
            cancel.clone(),
        ));
        Self { client, cancel }
    }

    /// Cancel the poll task. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    // ── Power ────────────────────────────────────────────────────────

    pub async fn set_power(&self, on: bool) {
        let result = if on {
            self.client.power_on().await
        } else {
            self.client.shutdown().await
        };
        if let Err(e) = result {
            warn!(speaker = %self.client.base_url(), error = %e, "failed to set power state");
        }
    }

    pub async fn power(&self) -> bool {
        // status() already degrades to standby on failure.
        self.client.status().await.is_on()
    }

    // ── Mute (derived from volume, never stored) ─────────────────────

    pub async fn set_mute(&self, muted: bool) {
        let result = if muted {
            self.client.mute().await
        } else {
            self.client.unmute().await
        };
        if let Err(e) = result {
            warn!(speaker = %self.client.base_url(), error = %e, "failed to set mute state");
        }
    }

    pub async fn mute(&self) -> bool {
        match self.client.volume().await {
            Ok(volume) => volume == 0,
            Err(e) => {
                warn!(speaker = %self.client.base_url(), error = %e, "failed to read mute state");
                false
            }
        }
    }

    // ── Volume (repurposed secondary service) ────────────────────────

    /// Secondary-service On: switching it off drops the volume to zero;
    /// switching it on is a no-op (the level characteristic follows).
    pub async fn set_volume_active(&self, active: bool) {
        if active {
            return;
        }
        if let Err(e) = self.client.set_volume(0).await {
            warn!(speaker = %self.client.base_url(), error = %e, "failed to zero volume");
        }
    }

    pub async fn volume_active(&self) -> bool {
        match self.client.volume().await {
            Ok(volume) => volume > 0,
            Err(e) => {
                warn!(speaker = %self.client.base_url(), error = %e, "failed to read volume state");
                false
            }
        }
    }

    pub async fn set_volume(&self, volume: i64) {
        if let Err(e) = self.client.set_volume(volume).await {
            warn!(speaker = %self.client.base_url(), error = %e, "failed to set volume");
        }
    }

    pub async fn volume(&self) -> i64 {
        match self.client.volume().await {
            Ok(volume) => volume,
            Err(e) => {
                warn!(speaker = %self.client.base_url(), error = %e, "failed to read volume");
                0
            }
        }
    }
}

/// Fixed-interval poll pushing power and volume into the sink.
///
/// A failed volume read logs and skips that tick's pushes; the loop
/// always continues. Each tick's work completes before the next fires,
/// so a slow speaker stretches the cadence instead of overlapping it.
async fn poll_task(
    client: SpeakerClient,
    sink: Arc<dyn CharacteristicSink>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let status = client.status().await;
                match client.volume().await {
                    Ok(volume) => {
                        sink.update(Characteristic::Power, Value::Bool(status.is_on()));
                        sink.update(Characteristic::VolumeLevel, Value::Int(volume));
                    }
                    Err(e) => {
                        warn!(speaker = %client.base_url(), error = %e, "poll failed");
                    }
                }
            }
        }
    }
    debug!(speaker = %client.base_url(), "poll task stopped");
}
