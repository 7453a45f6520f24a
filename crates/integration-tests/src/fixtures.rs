//! Shared fixtures for the resolution scenarios.
//!
//! The fixture catalog models a small Seattle-area deployment: destination 10
//! is the zip-level area the test address resolves to, and each store prices
//! pickup through its own main destination (20, 21, ...).

use std::collections::HashMap;

use rust_decimal::Decimal;

use storepoint_core::{
    DestinationId, GroupKey, LangCode, ManualRate, ObjectStatus, Rate, ShippingMethodId, StoreId,
    TenantScope,
};
use storepoint_engine::{
    CarrierConfig, DestinationRule, InMemoryCatalog, Location, PickupStore, RuleBasedResolver,
    ShipmentIdentity, ShipmentRequest, StoreDescription,
};

/// The destination the test address resolves to.
pub const RESOLVED_DESTINATION: i32 = 10;

/// The active storefront language for all fixtures.
#[must_use]
pub fn lang() -> LangCode {
    LangCode::parse("en").expect("valid code")
}

/// An address inside the resolvable zip area.
#[must_use]
pub fn seattle_location() -> Location {
    Location {
        country: Some("US".to_owned()),
        state: Some("WA".to_owned()),
        city: Some("Seattle".to_owned()),
        zipcode: Some("98101".to_owned()),
        address: Some("1916 Pike Pl".to_owned()),
    }
}

/// An address no destination rule covers.
#[must_use]
pub fn unknown_location() -> Location {
    Location {
        country: Some("DE".to_owned()),
        city: Some("Berlin".to_owned()),
        zipcode: Some("10115".to_owned()),
        ..Location::default()
    }
}

/// A resolver rule set mapping the Seattle zip to [`RESOLVED_DESTINATION`].
#[must_use]
pub fn destination_rules() -> RuleBasedResolver {
    RuleBasedResolver::new(vec![DestinationRule {
        destination_id: DestinationId::new(RESOLVED_DESTINATION),
        status: ObjectStatus::Active,
        countries: vec!["US".to_owned()],
        zipcodes: vec!["98101".to_owned()],
        ..DestinationRule::default()
    }])
}

/// An active store serving the resolved destination, priced through `main`.
#[must_use]
pub fn store(id: i32, main: i32, position: i32) -> PickupStore {
    let mut descriptions = HashMap::new();
    descriptions.insert(
        lang(),
        StoreDescription {
            name: format!("Store {id}"),
            description: None,
        },
    );
    PickupStore {
        id: StoreId::new(id),
        status: ObjectStatus::Active,
        main_destination_id: Some(DestinationId::new(main)),
        pickup_destination_ids: [DestinationId::new(RESOLVED_DESTINATION)]
            .into_iter()
            .collect(),
        position,
        descriptions,
        company_id: None,
    }
}

/// A catalog whose active destination rows cover every store's main
/// destination.
#[must_use]
pub fn catalog(stores: Vec<PickupStore>) -> InMemoryCatalog {
    let main_destinations: Vec<DestinationId> = stores
        .iter()
        .filter_map(|s| s.main_destination_id)
        .collect();
    InMemoryCatalog::new(stores, main_destinations)
}

/// A request for identity `(1, 2)` with the given per-destination rates.
#[must_use]
pub fn request(rates: &[(i32, Decimal)]) -> ShipmentRequest {
    let mut carrier = CarrierConfig {
        default_delivery_time: Some("2-4 days".to_owned()),
        ..CarrierConfig::default()
    };
    for (destination, amount) in rates {
        carrier.rates.insert(
            DestinationId::new(*destination),
            ManualRate::Amount(Rate::new(*amount)),
        );
    }
    ShipmentRequest {
        identity: identity(),
        location: seattle_location(),
        carrier,
        scope: TenantScope::Shared,
        lang: lang(),
        fallback_destination_id: None,
    }
}

/// The identity every fixture request uses.
#[must_use]
pub const fn identity() -> ShipmentIdentity {
    ShipmentIdentity::new(GroupKey::new(1), ShippingMethodId::new(2))
}
