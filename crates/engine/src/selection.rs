//! Session-scoped selection state.
//!
//! Each resolution overwrites the cached store set for its identity; the
//! customer's explicit store pick is written separately (by a storefront
//! action outside this engine) and survives re-resolution. The record is a
//! cache, not an audit log.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use storepoint_core::{Rate, StoreId};

use crate::request::ShipmentIdentity;
use crate::store::AvailableStore;

/// Cached selection state for one identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// The ordered store set from the most recent successful resolution.
    pub stores: Vec<AvailableStore>,
    /// The customer's explicit store pick, if any.
    pub user_choice: Option<StoreId>,
}

/// Persisted per-identity selection state.
///
/// Writers are partitioned by identity; last-write-wins within one identity.
/// The host serializes concurrent requests for the same identity (e.g. a
/// session-level lock held by the caller).
pub trait SelectionStore {
    /// Overwrite the cached store set for an identity. The customer's pick is
    /// untouched.
    fn put(&self, identity: ShipmentIdentity, stores: Vec<AvailableStore>);

    /// The cached ordered store set; `None` when nothing has been computed
    /// for the identity yet.
    fn get(&self, identity: ShipmentIdentity) -> Option<Vec<AvailableStore>>;

    /// The customer's explicit pick, set externally.
    fn user_choice(&self, identity: ShipmentIdentity) -> Option<StoreId>;

    /// Record or clear the customer's explicit pick.
    fn set_user_choice(&self, identity: ShipmentIdentity, store_id: Option<StoreId>);

    /// Minimum pickup rate over the cached store set.
    ///
    /// `None` when nothing has been cached; a missing rate is never treated
    /// as zero.
    fn min_pickup_cost(&self, identity: ShipmentIdentity) -> Option<Rate> {
        self.get(identity)?
            .into_iter()
            .map(|store| store.pickup_rate)
            .min()
    }

    /// Number of cached pickup points.
    ///
    /// `None` when no store set has been computed, so "not computed yet" is
    /// distinguishable from a counted result.
    fn pickup_point_count(&self, identity: ShipmentIdentity) -> Option<usize> {
        match self.get(identity) {
            Some(stores) if !stores.is_empty() => Some(stores.len()),
            _ => None,
        }
    }

    /// The cached ordered pickup points, for store pickers.
    fn pickup_points(&self, identity: ShipmentIdentity) -> Vec<AvailableStore> {
        self.get(identity).unwrap_or_default()
    }
}

impl<T: SelectionStore + ?Sized> SelectionStore for Arc<T> {
    fn put(&self, identity: ShipmentIdentity, stores: Vec<AvailableStore>) {
        (**self).put(identity, stores);
    }

    fn get(&self, identity: ShipmentIdentity) -> Option<Vec<AvailableStore>> {
        (**self).get(identity)
    }

    fn user_choice(&self, identity: ShipmentIdentity) -> Option<StoreId> {
        (**self).user_choice(identity)
    }

    fn set_user_choice(&self, identity: ShipmentIdentity, store_id: Option<StoreId>) {
        (**self).set_user_choice(identity, store_id);
    }
}

/// In-memory selection store, shared across request handlers.
#[derive(Debug, Default)]
pub struct InMemorySelectionStore {
    records: RwLock<HashMap<ShipmentIdentity, SelectionRecord>>,
}

impl InMemorySelectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for InMemorySelectionStore {
    fn put(&self, identity: ShipmentIdentity, stores: Vec<AvailableStore>) {
        let mut records = self.records.write().expect("selection store lock poisoned");
        records.entry(identity).or_default().stores = stores;
    }

    fn get(&self, identity: ShipmentIdentity) -> Option<Vec<AvailableStore>> {
        let records = self.records.read().expect("selection store lock poisoned");
        records.get(&identity).map(|record| record.stores.clone())
    }

    fn user_choice(&self, identity: ShipmentIdentity) -> Option<StoreId> {
        let records = self.records.read().expect("selection store lock poisoned");
        records.get(&identity).and_then(|record| record.user_choice)
    }

    fn set_user_choice(&self, identity: ShipmentIdentity, store_id: Option<StoreId>) {
        let mut records = self.records.write().expect("selection store lock poisoned");
        records.entry(identity).or_default().user_choice = store_id;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal_macros::dec;

    use storepoint_core::{DestinationId, GroupKey, ObjectStatus, Rate, ShippingMethodId};

    use super::*;
    use crate::store::PickupStore;

    fn identity(group: i32, method: i32) -> ShipmentIdentity {
        ShipmentIdentity::new(GroupKey::new(group), ShippingMethodId::new(method))
    }

    fn available(id: i32) -> AvailableStore {
        AvailableStore {
            store: PickupStore {
                id: StoreId::new(id),
                status: ObjectStatus::Active,
                main_destination_id: Some(DestinationId::new(1)),
                pickup_destination_ids: [DestinationId::new(1)].into_iter().collect(),
                position: 0,
                descriptions: HashMap::new(),
                company_id: None,
            },
            pickup_rate: Rate::new(dec!(5.00)),
            delivery_time: None,
        }
    }

    #[test]
    fn test_put_get_round_trip() {
        let store = InMemorySelectionStore::new();
        let id = identity(1, 2);
        let stores = vec![available(1), available(2)];

        store.put(id, stores.clone());
        assert_eq!(store.get(id), Some(stores));
    }

    #[test]
    fn test_get_is_none_before_any_put() {
        let store = InMemorySelectionStore::new();
        assert_eq!(store.get(identity(1, 2)), None);
    }

    #[test]
    fn test_put_overwrites_previous_set() {
        let store = InMemorySelectionStore::new();
        let id = identity(1, 2);

        store.put(id, vec![available(1)]);
        store.put(id, vec![available(2)]);

        let cached = store.get(id).expect("record exists");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached.first().map(AvailableStore::id), Some(StoreId::new(2)));
    }

    #[test]
    fn test_identities_are_partitioned() {
        let store = InMemorySelectionStore::new();
        store.put(identity(1, 2), vec![available(1)]);
        store.put(identity(1, 3), vec![available(2)]);

        assert_eq!(
            store.get(identity(1, 2)).map(|s| s.len()),
            Some(1)
        );
        assert_eq!(store.get(identity(2, 2)), None);
    }

    #[test]
    fn test_user_choice_survives_put() {
        let store = InMemorySelectionStore::new();
        let id = identity(1, 2);

        store.set_user_choice(id, Some(StoreId::new(7)));
        store.put(id, vec![available(1)]);

        assert_eq!(store.user_choice(id), Some(StoreId::new(7)));
    }

    #[test]
    fn test_min_cost_and_count_over_cached_set() {
        let store = InMemorySelectionStore::new();
        let id = identity(1, 2);

        assert_eq!(store.min_pickup_cost(id), None);
        assert_eq!(store.pickup_point_count(id), None);

        let mut cheap = available(2);
        cheap.pickup_rate = Rate::new(dec!(3.00));
        store.put(id, vec![available(1), cheap]);

        assert_eq!(store.min_pickup_cost(id), Some(Rate::new(dec!(3.00))));
        assert_eq!(store.pickup_point_count(id), Some(2));
    }

    #[test]
    fn test_user_choice_can_be_cleared() {
        let store = InMemorySelectionStore::new();
        let id = identity(1, 2);

        store.set_user_choice(id, Some(StoreId::new(7)));
        store.set_user_choice(id, None);

        assert_eq!(store.user_choice(id), None);
    }
}
