#![allow(clippy::unwrap_used, dead_code)]
// In-memory fakes for the host-framework capability traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kefbridge_core::{
    AccessoryId, AccessoryRecord, AccessoryRegistry, Characteristic, CharacteristicSink,
    CoreError, Value,
};

/// Records every pushed value; counts updates so tests can assert the
/// poll stopped.
#[derive(Default)]
pub struct FakeSink {
    values: Mutex<HashMap<Characteristic, Value>>,
    updates: AtomicUsize,
}

impl FakeSink {
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl CharacteristicSink for FakeSink {
    fn update(&self, characteristic: Characteristic, value: Value) {
        self.values.lock().unwrap().insert(characteristic, value);
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    fn value(&self, characteristic: Characteristic) -> Option<Value> {
        self.values.lock().unwrap().get(&characteristic).copied()
    }
}

/// Registry fake: vends one `FakeSink` per accessory id and records
/// every upsert and removal.
#[derive(Default)]
pub struct FakeRegistry {
    sinks: Mutex<HashMap<AccessoryId, Arc<FakeSink>>>,
    pub upserted: Mutex<Vec<AccessoryId>>,
    pub removed: Mutex<Vec<AccessoryId>>,
}

impl FakeRegistry {
    pub fn sink(&self, id: AccessoryId) -> Option<Arc<FakeSink>> {
        self.sinks.lock().unwrap().get(&id).cloned()
    }

    pub fn upserted_ids(&self) -> Vec<AccessoryId> {
        self.upserted.lock().unwrap().clone()
    }

    pub fn removed_ids(&self) -> Vec<AccessoryId> {
        self.removed.lock().unwrap().clone()
    }
}

impl AccessoryRegistry for FakeRegistry {
    fn upsert(&self, record: &AccessoryRecord) -> Result<Arc<dyn CharacteristicSink>, CoreError> {
        let sink = Arc::clone(
            self.sinks
                .lock()
                .unwrap()
                .entry(record.id)
                .or_default(),
        );
        self.upserted.lock().unwrap().push(record.id);
        Ok(sink)
    }

    fn remove(&self, id: AccessoryId) -> Result<(), CoreError> {
        self.sinks.lock().unwrap().remove(&id);
        self.removed.lock().unwrap().push(id);
        Ok(())
    }
}
