// ── Platform controller ──
//
// Reconciles the configured speaker list against previously cached
// accessory records: at most one of create/update per speaker, then a
// removal pass for records no longer configured. Runs once per
// lifecycle event, never concurrently with itself.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info};

use kefbridge_api::SpeakerClient;

use crate::accessory::{
    AccessoryContext, AccessoryId, AccessoryRecord, AccessoryRegistry, CharacteristicSink,
};
use crate::config::SpeakerConfig;
use crate::error::CoreError;
use crate::handler::AccessoryHandler;

/// Owns the accessory records and their handlers.
pub struct PlatformController {
    registry: Arc<dyn AccessoryRegistry>,
    accessories: HashMap<AccessoryId, AccessoryRecord>,
    handlers: HashMap<AccessoryId, AccessoryHandler>,
}

impl PlatformController {
    pub fn new(registry: Arc<dyn AccessoryRegistry>) -> Self {
        Self {
            registry,
            accessories: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Seed a record restored from the host's cache. Called before the
    /// first [`reconcile`](Self::reconcile) so cached accessories are
    /// updated rather than re-created.
    pub fn restore(&mut self, record: AccessoryRecord) {
        info!(accessory = %record.context.display_name, "loading accessory from cache");
        self.accessories.insert(record.id, record);
    }

    /// Reconcile the configured speakers against the known records.
    ///
    /// An absent speaker list is a configuration error, reported via
    /// logging only -- the bridge keeps running with whatever it has.
    /// Speakers are processed in list order; the removal pass runs only
    /// after every configured speaker has been handled.
    pub fn reconcile(&mut self, speakers: Option<&[SpeakerConfig]>) -> Result<(), CoreError> {
        let Some(speakers) = speakers else {
            error!("no speakers configured");
            return Ok(());
        };

        let mut discovered = Vec::with_capacity(speakers.len());
        for speaker in speakers {
            let id = AccessoryId::from_address(&speaker.address);
            discovered.push(id);

            let sink = if let Some(record) = self.accessories.get_mut(&id) {
                info!(speaker = %speaker.name, %id, "restoring existing accessory");
                record.context.display_name = speaker.name.clone();
                record.context.model = speaker.model.clone();
                self.registry.upsert(record)?
            } else {
                info!(speaker = %speaker.name, %id, "adding new accessory");
                let record = AccessoryRecord::new(
                    speaker.address.as_str(),
                    AccessoryContext {
                        display_name: speaker.name.clone(),
                        model: speaker.model.clone(),
                    },
                );
                let sink = self.registry.upsert(&record)?;
                self.accessories.insert(id, record);
                sink
            };

            self.bind_handler(id, speaker, sink)?;
        }

        let orphaned: Vec<AccessoryId> = self
            .accessories
            .keys()
            .filter(|id| !discovered.contains(id))
            .copied()
            .collect();
        for id in orphaned {
            if let Some(record) = self.accessories.remove(&id) {
                info!(accessory = %record.context.display_name, %id, "removing accessory no longer configured");
                self.registry.remove(id)?;
            }
            if let Some(handler) = self.handlers.remove(&id) {
                handler.stop();
            }
        }

        Ok(())
    }

    /// Bind a fresh handler (and speaker client) for `id`, stopping any
    /// predecessor so exactly one poll task exists per accessory.
    fn bind_handler(
        &mut self,
        id: AccessoryId,
        speaker: &SpeakerConfig,
        sink: Arc<dyn CharacteristicSink>,
    ) -> Result<(), CoreError> {
        let client = SpeakerClient::new(&speaker.address)?;
        let handler = AccessoryHandler::new(client, sink, speaker.poll_interval());
        if let Some(old) = self.handlers.insert(id, handler) {
            old.stop();
        }
        Ok(())
    }

    /// Stop every handler. Used on shutdown.
    pub fn shutdown(&mut self) {
        for (_, handler) in self.handlers.drain() {
            handler.stop();
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn accessory(&self, id: AccessoryId) -> Option<&AccessoryRecord> {
        self.accessories.get(&id)
    }

    pub fn accessory_ids(&self) -> Vec<AccessoryId> {
        self.accessories.keys().copied().collect()
    }

    /// The live handler for `id`, used by host adapters to route
    /// characteristic get/set requests.
    pub fn handler(&self, id: AccessoryId) -> Option<&AccessoryHandler> {
        self.handlers.get(&id)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
