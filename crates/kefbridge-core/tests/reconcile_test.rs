#![allow(clippy::unwrap_used)]
// Platform controller reconciliation against an in-memory registry.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use kefbridge_core::{
    AccessoryContext, AccessoryId, AccessoryRecord, PlatformController, SpeakerConfig,
};

use common::FakeRegistry;

const ADDR_A: &str = "192.0.2.10";
const ADDR_B: &str = "192.0.2.11";
const ADDR_C: &str = "192.0.2.12";

fn speaker(name: &str, address: &str) -> SpeakerConfig {
    SpeakerConfig {
        name: name.into(),
        address: address.into(),
        model: "LS50 Wireless II".into(),
        poll_interval_secs: 10,
    }
}

fn cached_record(address: &str, name: &str) -> AccessoryRecord {
    AccessoryRecord::new(
        address,
        AccessoryContext {
            display_name: name.into(),
            model: "LSX".into(),
        },
    )
}

#[tokio::test]
async fn reconcile_creates_updates_and_removes() {
    let registry = Arc::new(FakeRegistry::default());
    let mut controller = PlatformController::new(Arc::clone(&registry) as Arc<dyn kefbridge_core::AccessoryRegistry>);

    // A is known from the cache (with a stale name); C is cached but no
    // longer configured; B has never been seen.
    controller.restore(cached_record(ADDR_A, "Old Name"));
    controller.restore(cached_record(ADDR_C, "Gone"));

    let speakers = vec![speaker("Living Room", ADDR_A), speaker("Office", ADDR_B)];
    controller.reconcile(Some(&speakers)).unwrap();

    let id_a = AccessoryId::from_address(ADDR_A);
    let id_b = AccessoryId::from_address(ADDR_B);
    let id_c = AccessoryId::from_address(ADDR_C);

    // A restored-and-updated, B created, C gone.
    let mut ids = controller.accessory_ids();
    ids.sort_by_key(|id| id.to_string());
    let mut expected = vec![id_a, id_b];
    expected.sort_by_key(|id| id.to_string());
    assert_eq!(ids, expected);

    assert_eq!(
        controller.accessory(id_a).unwrap().context.display_name,
        "Living Room"
    );
    assert_eq!(
        controller.accessory(id_a).unwrap().context.model,
        "LS50 Wireless II"
    );
    assert_eq!(
        controller.accessory(id_b).unwrap().context.display_name,
        "Office"
    );

    // Exactly one handler per configured speaker, none for C.
    assert_eq!(controller.handler_count(), 2);
    assert!(controller.handler(id_a).is_some());
    assert!(controller.handler(id_b).is_some());
    assert!(controller.handler(id_c).is_none());

    // Registry saw one upsert each for A and B, and the removal of C.
    let mut upserted = registry.upserted_ids();
    upserted.sort_by_key(|id| id.to_string());
    let mut expected_upserts = vec![id_a, id_b];
    expected_upserts.sort_by_key(|id| id.to_string());
    assert_eq!(upserted, expected_upserts);
    assert_eq!(registry.removed_ids(), vec![id_c]);
    assert!(registry.sink(id_c).is_none());

    controller.shutdown();
}

#[tokio::test]
async fn missing_speaker_list_is_logged_not_fatal() {
    let registry = Arc::new(FakeRegistry::default());
    let mut controller = PlatformController::new(Arc::clone(&registry) as Arc<dyn kefbridge_core::AccessoryRegistry>);
    controller.restore(cached_record(ADDR_C, "Gone"));

    controller.reconcile(None).unwrap();

    // Nothing was touched: cached record stays, no handlers, no registry calls.
    assert_eq!(
        controller.accessory_ids(),
        vec![AccessoryId::from_address(ADDR_C)]
    );
    assert_eq!(controller.handler_count(), 0);
    assert!(registry.upserted_ids().is_empty());
    assert!(registry.removed_ids().is_empty());
}

#[tokio::test]
async fn repeated_reconcile_keeps_one_handler_per_speaker() {
    let registry = Arc::new(FakeRegistry::default());
    let mut controller = PlatformController::new(Arc::clone(&registry) as Arc<dyn kefbridge_core::AccessoryRegistry>);

    let speakers = vec![speaker("Living Room", ADDR_A), speaker("Office", ADDR_B)];
    controller.reconcile(Some(&speakers)).unwrap();
    controller.reconcile(Some(&speakers)).unwrap();

    assert_eq!(controller.handler_count(), 2);
    assert_eq!(controller.accessory_ids().len(), 2);

    controller.shutdown();
}

#[tokio::test]
async fn empty_speaker_list_removes_everything() {
    let registry = Arc::new(FakeRegistry::default());
    let mut controller = PlatformController::new(Arc::clone(&registry) as Arc<dyn kefbridge_core::AccessoryRegistry>);

    let speakers = vec![speaker("Living Room", ADDR_A)];
    controller.reconcile(Some(&speakers)).unwrap();
    assert_eq!(controller.handler_count(), 1);

    controller.reconcile(Some(&[])).unwrap();

    assert!(controller.accessory_ids().is_empty());
    assert_eq!(controller.handler_count(), 0);
    assert_eq!(
        registry.removed_ids(),
        vec![AccessoryId::from_address(ADDR_A)]
    );
}
