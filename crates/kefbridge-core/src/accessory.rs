// ── Accessory object model ──
//
// Identity, records, and the two capability traits that stand in for
// the host framework: a per-accessory characteristic sink and the
// registry that persists accessory records across restarts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::error::CoreError;

// ── AccessoryId ─────────────────────────────────────────────────────

/// Deterministic accessory identity, derived from the speaker's address.
///
/// The same address always maps to the same id, so a record cached by
/// the host is matched back up with its speaker after a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessoryId(Uuid);

impl AccessoryId {
    /// Derive the id for a speaker address (UUIDv5 over the address).
    pub fn from_address(address: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, address.as_bytes()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Accessory records ───────────────────────────────────────────────

/// Mutable context carried on an accessory record. Updated in place
/// when reconciliation finds the speaker still configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryContext {
    pub display_name: String,
    pub model: String,
}

/// One host-visible accessory: identity plus its context bag.
///
/// Created on first discovery, restored from the host's cache on later
/// startups, removed when its speaker leaves the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryRecord {
    pub id: AccessoryId,
    pub address: String,
    pub context: AccessoryContext,
}

impl AccessoryRecord {
    pub fn new(address: impl Into<String>, context: AccessoryContext) -> Self {
        let address = address.into();
        Self {
            id: AccessoryId::from_address(&address),
            address,
            context,
        }
    }
}

// ── Characteristics ─────────────────────────────────────────────────

/// The characteristics one speaker accessory exposes.
///
/// `VolumeActive` and `VolumeLevel` live on the repurposed secondary
/// service (On / Brightness); `Power` and `Mute` on the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Characteristic {
    Power,
    Mute,
    VolumeActive,
    VolumeLevel,
}

/// A characteristic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
}

impl Value {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

// ── Capability traits ───────────────────────────────────────────────

/// Push side of one accessory's characteristics.
///
/// The poll task writes through this directly, bypassing the handler's
/// get methods, so the host sees fresh state without asking for it.
pub trait CharacteristicSink: Send + Sync {
    /// Push a fresh value into the host-visible characteristic.
    fn update(&self, characteristic: Characteristic, value: Value);

    /// Last pushed value, if any.
    fn value(&self, characteristic: Characteristic) -> Option<Value>;
}

/// The host framework's accessory registry.
///
/// `upsert` covers both first registration and context updates and
/// vends the sink bound to that accessory's characteristics.
pub trait AccessoryRegistry: Send + Sync {
    fn upsert(&self, record: &AccessoryRecord) -> Result<Arc<dyn CharacteristicSink>, CoreError>;

    fn remove(&self, id: AccessoryId) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic_per_address() {
        let a = AccessoryId::from_address("192.168.1.100");
        let b = AccessoryId::from_address("192.168.1.100");
        let c = AccessoryId::from_address("192.168.1.101");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn record_id_matches_address_derivation() {
        let record = AccessoryRecord::new(
            "192.168.1.100",
            AccessoryContext {
                display_name: "Living Room".into(),
                model: "LS50 Wireless II".into(),
            },
        );
        assert_eq!(record.id, AccessoryId::from_address("192.168.1.100"));
    }

    #[test]
    fn value_accessors_are_type_checked() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Int(30).as_int(), Some(30));
        assert_eq!(Value::Int(30).as_bool(), None);
    }
}
