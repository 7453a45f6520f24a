//! Pickup store records and their rate-enriched form.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use storepoint_core::{CompanyId, DestinationId, LangCode, ObjectStatus, Rate, StoreId};

/// Localized description of a pickup store.
///
/// Stores without a description row for the request's active language are
/// excluded from resolution: a store the customer cannot read cannot be
/// offered for pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescription {
    /// Customer-facing store name.
    pub name: String,
    /// Free-form pickup directions (opening hours, entrance, etc.).
    pub description: Option<String>,
}

/// A physical location a shipment can be collected from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupStore {
    pub id: StoreId,
    pub status: ObjectStatus,
    /// Destination whose manual rate prices pickup at this store.
    pub main_destination_id: Option<DestinationId>,
    /// Destinations this store can serve. Membership is a set-containment
    /// test, not equality: one store may serve many destinations (e.g.
    /// postal-code ranges).
    pub pickup_destination_ids: BTreeSet<DestinationId>,
    /// Display/priority ordering; lower positions sort first.
    pub position: i32,
    /// Per-language descriptions; only the active-language row is considered.
    pub descriptions: HashMap<LangCode, StoreDescription>,
    /// Owning company, enforced under a company-scoped tenant.
    pub company_id: Option<CompanyId>,
}

impl PickupStore {
    /// Returns `true` if this store can serve the given destination.
    #[must_use]
    pub fn serves(&self, destination_id: DestinationId) -> bool {
        self.pickup_destination_ids.contains(&destination_id)
    }

    /// The store description for a language, if one exists.
    #[must_use]
    pub fn description(&self, lang: &LangCode) -> Option<&StoreDescription> {
        self.descriptions.get(lang)
    }
}

/// A pickup store enriched with its manual rate and delivery time.
///
/// Construction guarantees the rate was configured: stores whose main
/// destination has an unset manual rate never become available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableStore {
    pub store: PickupStore,
    /// The configured manual rate for the store's main destination.
    pub pickup_rate: Rate,
    /// Per-destination delivery-time override, else the carrier default.
    pub delivery_time: Option<String>,
}

impl AvailableStore {
    /// The underlying store's identifier.
    #[must_use]
    pub fn id(&self) -> StoreId {
        self.store.id
    }

    /// The underlying store's display position.
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.store.position
    }

    /// The destination whose rate prices pickup at this store.
    #[must_use]
    pub const fn main_destination_id(&self) -> Option<DestinationId> {
        self.store.main_destination_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_serving(ids: &[i32]) -> PickupStore {
        PickupStore {
            id: StoreId::new(1),
            status: ObjectStatus::Active,
            main_destination_id: Some(DestinationId::new(10)),
            pickup_destination_ids: ids.iter().map(|id| DestinationId::new(*id)).collect(),
            position: 0,
            descriptions: HashMap::new(),
            company_id: None,
        }
    }

    #[test]
    fn test_serves_is_membership_not_equality() {
        let store = store_serving(&[10, 11, 12]);
        assert!(store.serves(DestinationId::new(11)));
        assert!(!store.serves(DestinationId::new(13)));
    }

    #[test]
    fn test_description_lookup_by_language() {
        let mut store = store_serving(&[10]);
        let en = LangCode::parse("en").expect("valid code");
        let de = LangCode::parse("de").expect("valid code");
        store.descriptions.insert(
            en.clone(),
            StoreDescription {
                name: "Harbor St. pickup counter".to_owned(),
                description: None,
            },
        );

        assert!(store.description(&en).is_some());
        assert!(store.description(&de).is_none());
    }
}
