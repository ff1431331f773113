//! Accessory lifecycle and device-state polling for kefbridge.
//!
//! This crate owns the glue between configured speakers and whatever
//! accessory host the bridge is plugged into:
//!
//! - **[`PlatformController`]** — reconciles the configured speaker list
//!   against previously cached accessory records: one create *or* update
//!   per configured speaker, then a removal pass for records that are no
//!   longer configured. Never creates a second handler for the same id.
//!
//! - **[`AccessoryHandler`]** — binds one [`SpeakerClient`] to one
//!   accessory's characteristics. Get/set requests from the host go
//!   straight to the network; a background poll task pushes fresh power
//!   and volume readings into the characteristics between requests.
//!   Every device error is logged and replaced with a safe default --
//!   nothing ever propagates to the host.
//!
//! - **Capability traits** ([`CharacteristicSink`], [`AccessoryRegistry`])
//!   — the host framework's object model, reduced to the two seams the
//!   core needs. The binary ships a standalone logging adapter; tests use
//!   in-memory fakes.
//!
//! [`SpeakerClient`]: kefbridge_api::SpeakerClient

pub mod accessory;
pub mod config;
pub mod error;
pub mod handler;
pub mod platform;

pub use accessory::{
    AccessoryContext, AccessoryId, AccessoryRecord, AccessoryRegistry, Characteristic,
    CharacteristicSink, Value,
};
pub use config::{DEFAULT_POLL_INTERVAL_SECS, SpeakerConfig};
pub use error::CoreError;
pub use handler::AccessoryHandler;
pub use platform::PlatformController;
