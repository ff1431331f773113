//! Standalone bridge mode.
//!
//! Loads the speaker list from configuration, reconciles it against an
//! in-process registry, and leaves the poll loops running until Ctrl-C.
//! The registry adapter here is the non-hosted stand-in for a real
//! accessory framework: it logs registrations and characteristic
//! updates instead of forwarding them to a host.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use kefbridge_config::BridgeConfig;
use kefbridge_core::{
    AccessoryId, AccessoryRecord, AccessoryRegistry, Characteristic, CharacteristicSink,
    CoreError, PlatformController, Value,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn run(global: &GlobalOpts) -> Result<(), CliError> {
    let config = BridgeConfig::load(global.config.as_deref())?;

    let registry = Arc::new(LogRegistry::default());
    let mut controller = PlatformController::new(registry);
    controller.reconcile(config.speaker_configs().as_deref())?;

    if controller.handler_count() == 0 {
        warn!("bridge is running with no speakers");
    }
    info!(
        speakers = controller.handler_count(),
        "bridge running, press Ctrl-C to stop"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to wait for shutdown signal");
    }

    info!("shutting down");
    controller.shutdown();
    Ok(())
}

// ── Standalone registry adapter ─────────────────────────────────────

/// Sink that logs every pushed value and remembers the latest.
struct LogSink {
    name: String,
    values: Mutex<HashMap<Characteristic, Value>>,
}

impl CharacteristicSink for LogSink {
    fn update(&self, characteristic: Characteristic, value: Value) {
        info!(
            speaker = %self.name,
            characteristic = %characteristic,
            value = ?value,
            "characteristic updated"
        );
        if let Ok(mut values) = self.values.lock() {
            values.insert(characteristic, value);
        }
    }

    fn value(&self, characteristic: Characteristic) -> Option<Value> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(&characteristic).copied())
    }
}

/// Registry that keeps one sink per accessory for the process lifetime.
#[derive(Default)]
struct LogRegistry {
    sinks: Mutex<HashMap<AccessoryId, Arc<LogSink>>>,
}

impl AccessoryRegistry for LogRegistry {
    fn upsert(&self, record: &AccessoryRecord) -> Result<Arc<dyn CharacteristicSink>, CoreError> {
        let mut sinks = self.sinks.lock().map_err(|_| CoreError::Registry {
            message: "registry lock poisoned".into(),
        })?;
        let sink = sinks
            .entry(record.id)
            .or_insert_with(|| {
                Arc::new(LogSink {
                    name: record.context.display_name.clone(),
                    values: Mutex::new(HashMap::new()),
                })
            })
            .clone();
        info!(
            accessory = %record.context.display_name,
            model = %record.context.model,
            id = %record.id,
            "accessory registered"
        );
        Ok(sink)
    }

    fn remove(&self, id: AccessoryId) -> Result<(), CoreError> {
        let mut sinks = self.sinks.lock().map_err(|_| CoreError::Registry {
            message: "registry lock poisoned".into(),
        })?;
        sinks.remove(&id);
        info!(%id, "accessory removed");
        Ok(())
    }
}
