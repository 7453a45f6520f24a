//! Selection cache and pickup-point aggregate query scenarios.

use std::sync::Arc;

use rust_decimal_macros::dec;

use storepoint_core::{Rate, StoreId};
use storepoint_engine::{
    AvailableStore, InMemorySelectionStore, PickupResolver, SelectionStore,
};

use storepoint_integration_tests::fixtures;

#[test]
fn test_min_cost_and_count_follow_the_cached_set() {
    let selections = Arc::new(InMemorySelectionStore::new());
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10), fixtures::store(2, 21, 20)]),
        Arc::clone(&selections),
    );
    let request = fixtures::request(&[(20, dec!(5.00)), (21, dec!(3.00))]);

    // Nothing computed yet: both aggregates are absent, not zero.
    assert_eq!(resolver.min_pickup_cost(request.identity), None);
    assert_eq!(resolver.pickup_point_count(request.identity), None);
    assert!(resolver.pickup_points(request.identity).is_empty());

    resolver.resolve(&request).expect("no collaborator fault");

    assert_eq!(
        resolver.min_pickup_cost(request.identity),
        Some(Rate::new(dec!(3.00)))
    );
    assert_eq!(resolver.pickup_point_count(request.identity), Some(2));
}

#[test]
fn test_zero_rate_is_a_real_minimum() {
    // A configured free pickup is a valid minimum; only unset rates are
    // excluded from the set entirely.
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10), fixtures::store(2, 21, 20)]),
        InMemorySelectionStore::new(),
    );
    let request = fixtures::request(&[(20, dec!(0)), (21, dec!(3.00))]);
    resolver.resolve(&request).expect("no collaborator fault");

    assert_eq!(resolver.min_pickup_cost(request.identity), Some(Rate::ZERO));
}

#[test]
fn test_selection_store_round_trip() {
    let selections = InMemorySelectionStore::new();
    let identity = fixtures::identity();

    let stores: Vec<AvailableStore> = vec![
        AvailableStore {
            store: fixtures::store(1, 20, 10),
            pickup_rate: Rate::new(dec!(5.00)),
            delivery_time: Some("1 day".to_owned()),
        },
        AvailableStore {
            store: fixtures::store(2, 21, 20),
            pickup_rate: Rate::new(dec!(3.00)),
            delivery_time: None,
        },
    ];

    selections.put(identity, stores.clone());
    assert_eq!(selections.get(identity), Some(stores));
}

#[test]
fn test_aggregates_are_scoped_per_identity() {
    let selections = Arc::new(InMemorySelectionStore::new());
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![fixtures::store(1, 20, 10)]),
        Arc::clone(&selections),
    );
    let request = fixtures::request(&[(20, dec!(5.00))]);
    resolver.resolve(&request).expect("no collaborator fault");

    // A different shipping line within the same cart sees nothing.
    let other = storepoint_engine::ShipmentIdentity::new(
        storepoint_core::GroupKey::new(1),
        storepoint_core::ShippingMethodId::new(9),
    );
    assert_eq!(resolver.min_pickup_cost(other), None);
    assert_eq!(resolver.pickup_point_count(other), None);
}

#[test]
fn test_cached_order_matches_position_order() {
    let resolver = PickupResolver::new(
        fixtures::destination_rules(),
        fixtures::catalog(vec![
            fixtures::store(1, 20, 30),
            fixtures::store(2, 21, 10),
            fixtures::store(3, 22, 20),
        ]),
        InMemorySelectionStore::new(),
    );
    let request = fixtures::request(&[
        (20, dec!(5.00)),
        (21, dec!(3.00)),
        (22, dec!(4.00)),
    ]);
    resolver.resolve(&request).expect("no collaborator fault");

    let ids: Vec<StoreId> = resolver
        .pickup_points(request.identity)
        .iter()
        .map(AvailableStore::id)
        .collect();
    assert_eq!(
        ids,
        vec![StoreId::new(2), StoreId::new(3), StoreId::new(1)]
    );
}
