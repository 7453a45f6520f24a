//! End-to-end resolution ladder scenarios.
//!
//! These tests drive the whole ladder through in-memory collaborators:
//! address resolution, catalog lookup, rate filtering, sorting, persistence,
//! and selection.

use std::sync::Arc;

use rust_decimal_macros::dec;

use storepoint_core::{DestinationId, Rate, StoreId};
use storepoint_engine::{
    AvailableStore, InMemorySelectionStore, PickupResolver, PickupStore, ResolutionFailure,
    SelectionStore, StoreQuery,
};

use storepoint_integration_tests::fixtures;

#[test]
fn test_unresolved_address_short_circuits() {
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10)]),
        InMemorySelectionStore::new(),
    );

    let mut request = fixtures::request(&[(20, dec!(5.00))]);
    request.location = fixtures::unknown_location();
    let result = resolver.resolve(&request).expect("no collaborator fault");

    assert_eq!(result.failure, Some(ResolutionFailure::DestinationNotFound));
    assert_eq!(result.cost, None);
    assert_eq!(result.destination_id, None);
    assert_eq!(result.delivery_time, None);
    // Nothing was persisted for the identity either.
    assert_eq!(resolver.pickup_point_count(request.identity), None);
}

#[test]
fn test_empty_catalog_reports_no_active_stores() {
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(Vec::new()),
        InMemorySelectionStore::new(),
    );

    let result = resolver
        .resolve(&fixtures::request(&[]))
        .expect("no collaborator fault");

    assert_eq!(result.failure, Some(ResolutionFailure::NoActiveStores));
}

#[test]
fn test_unpriced_stores_report_no_available_stores() {
    // Both stores are geographically eligible, neither has a configured rate.
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10), fixtures::store(2, 21, 20)]),
        InMemorySelectionStore::new(),
    );

    let result = resolver
        .resolve(&fixtures::request(&[]))
        .expect("no collaborator fault");

    assert_eq!(result.failure, Some(ResolutionFailure::NoAvailableStores));
}

#[test]
fn test_rate_filter_then_lowest_position_selection() {
    // Store 1 (pos 20) has no rate; store 2 (pos 10) is priced at 5.00.
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 20), fixtures::store(2, 21, 10)]),
        InMemorySelectionStore::new(),
    );

    let request = fixtures::request(&[(21, dec!(5.00))]);
    let result = resolver.resolve(&request).expect("no collaborator fault");

    assert!(result.is_success());
    assert_eq!(result.cost, Some(Rate::ZERO));
    assert_eq!(result.destination_id, Some(DestinationId::new(21)));
    assert_eq!(result.delivery_time.as_deref(), Some("2-4 days"));

    // Only the priced store was persisted.
    let cached = resolver.pickup_points(request.identity);
    let ids: Vec<StoreId> = cached.iter().map(AvailableStore::id).collect();
    assert_eq!(ids, vec![StoreId::new(2)]);
}

#[test]
fn test_customer_pick_wins_over_position_order() {
    let selections = Arc::new(InMemorySelectionStore::new());
    let request = fixtures::request(&[(20, dec!(5.00)), (21, dec!(3.00))]);
    selections.set_user_choice(request.identity, Some(StoreId::new(1)));

    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 20), fixtures::store(2, 21, 10)]),
        Arc::clone(&selections),
    );
    let result = resolver.resolve(&request).expect("no collaborator fault");

    // Store 1 sits at the higher position but is the customer's pick.
    assert_eq!(result.destination_id, Some(DestinationId::new(20)));
}

#[test]
fn test_stale_pick_falls_back_without_changing_outcome() {
    let selections = Arc::new(InMemorySelectionStore::new());
    let request = fixtures::request(&[(21, dec!(5.00))]);
    // The pick names store 1, which rate filtering drops.
    selections.set_user_choice(request.identity, Some(StoreId::new(1)));

    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 20), fixtures::store(2, 21, 10)]),
        Arc::clone(&selections),
    );
    let result = resolver.resolve(&request).expect("no collaborator fault");

    assert!(result.is_success());
    assert_eq!(result.destination_id, Some(DestinationId::new(21)));
    // The stale pick stays recorded for when the store returns.
    assert_eq!(selections.user_choice(request.identity), Some(StoreId::new(1)));
}

#[test]
fn test_re_resolution_overwrites_cached_set() {
    let selections = Arc::new(InMemorySelectionStore::new());
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10), fixtures::store(2, 21, 20)]),
        Arc::clone(&selections),
    );

    // First estimate prices both stores; the second only store 2.
    let both = fixtures::request(&[(20, dec!(5.00)), (21, dec!(3.00))]);
    resolver.resolve(&both).expect("no collaborator fault");
    assert_eq!(resolver.pickup_point_count(both.identity), Some(2));

    let only_second = fixtures::request(&[(21, dec!(3.00))]);
    resolver.resolve(&only_second).expect("no collaborator fault");

    let cached = resolver.pickup_points(only_second.identity);
    let ids: Vec<StoreId> = cached.iter().map(AvailableStore::id).collect();
    assert_eq!(ids, vec![StoreId::new(2)]);
}

#[test]
fn test_decorator_narrows_the_catalog_query() {
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10), fixtures::store(2, 21, 20)]),
        InMemorySelectionStore::new(),
    )
    .with_decorator(|query: &mut StoreQuery| {
        query.add_predicate(|store: &PickupStore| store.id != StoreId::new(1));
    });

    let request = fixtures::request(&[(20, dec!(5.00)), (21, dec!(3.00))]);
    let result = resolver.resolve(&request).expect("no collaborator fault");

    // Store 1 would win on position, but the decorator filtered it out.
    assert_eq!(result.destination_id, Some(DestinationId::new(21)));
}

#[test]
fn test_failure_kinds_serialize_as_stable_keys() {
    // The API contract: failure kinds are snake_case strings the storefront
    // maps to localized messages.
    let json = serde_json::to_value(ResolutionFailure::DestinationNotFound)
        .expect("serializable failure");
    assert_eq!(json, serde_json::json!("destination_not_found"));

    let json =
        serde_json::to_value(ResolutionFailure::NoActiveStores).expect("serializable failure");
    assert_eq!(json, serde_json::json!("no_active_stores"));

    let json =
        serde_json::to_value(ResolutionFailure::NoAvailableStores).expect("serializable failure");
    assert_eq!(json, serde_json::json!("no_available_stores"));
}
