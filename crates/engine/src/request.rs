//! Shipment-estimate request and resolution result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storepoint_core::{
    DestinationId, GroupKey, LangCode, ManualRate, Rate, ShippingMethodId, TenantScope,
};

/// A customer delivery address before destination resolution.
///
/// All fields are optional: a cart early in checkout may carry only a country
/// or a zip code. The destination resolver decides whether this is enough to
/// identify a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
}

/// Composite key scoping persisted selection state to one shipping line
/// within one cart session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentIdentity {
    pub group_key: GroupKey,
    pub shipping_method_id: ShippingMethodId,
}

impl ShipmentIdentity {
    /// Create an identity from its parts.
    #[must_use]
    pub const fn new(group_key: GroupKey, shipping_method_id: ShippingMethodId) -> Self {
        Self {
            group_key,
            shipping_method_id,
        }
    }
}

/// Carrier configuration for one shipping method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// Delivery time shown when no per-destination override exists.
    pub default_delivery_time: Option<String>,
    /// Manual rate table keyed by destination. Destinations absent from the
    /// table are unset, not free.
    pub rates: HashMap<DestinationId, ManualRate>,
    /// Per-destination delivery-time overrides.
    pub delivery_times: HashMap<DestinationId, String>,
}

impl CarrierConfig {
    /// The manual rate for a destination; absent table entries are unset.
    #[must_use]
    pub fn rate_for(&self, destination_id: DestinationId) -> ManualRate {
        self.rates
            .get(&destination_id)
            .copied()
            .unwrap_or(ManualRate::Unset)
    }

    /// The delivery time for a destination: the per-destination override if
    /// present, else the carrier default.
    #[must_use]
    pub fn delivery_time_for(&self, destination_id: DestinationId) -> Option<&str> {
        self.delivery_times
            .get(&destination_id)
            .map(String::as_str)
            .or(self.default_delivery_time.as_deref())
    }
}

/// One inbound shipment-estimate request.
///
/// Immutable for the duration of one resolution. Session and tenant context
/// are explicit fields rather than ambient state, so a request is
/// self-contained and reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub identity: ShipmentIdentity,
    pub location: Location,
    pub carrier: CarrierConfig,
    pub scope: TenantScope,
    /// Active storefront language; only store descriptions in this language
    /// are considered.
    pub lang: LangCode,
    /// Destination carried from previously computed rate info, used when the
    /// selection step produces no store.
    pub fallback_destination_id: Option<DestinationId>,
}

/// Domain outcome of a failed resolution.
///
/// These are values on [`PickupResolution`], not faults: each kind maps to a
/// presentation message in the caller's locale. Collaborator faults surface
/// as errors through their own contracts instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFailure {
    /// The delivery address did not resolve to a known destination.
    #[error("no destination matches the delivery address")]
    DestinationNotFound,
    /// No active store serves the resolved destination.
    #[error("no active pickup stores serve the destination")]
    NoActiveStores,
    /// Every geographically eligible store lacked a configured manual rate.
    #[error("no pickup stores remain after rate filtering")]
    NoAvailableStores,
}

/// Output of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupResolution {
    /// Zero placeholder on success, absent on failure. Real pricing is
    /// assigned by a downstream pricing stage, never by this engine.
    pub cost: Option<Rate>,
    pub failure: Option<ResolutionFailure>,
    pub delivery_time: Option<String>,
    pub destination_id: Option<DestinationId>,
}

impl PickupResolution {
    /// A terminal failure outcome with no cost, time, or destination.
    #[must_use]
    pub const fn failed(failure: ResolutionFailure) -> Self {
        Self {
            cost: None,
            failure: Some(failure),
            delivery_time: None,
            destination_id: None,
        }
    }

    /// Returns `true` when the resolution carries no failure.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Shipping service metadata for carrier listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarrierInfo {
    pub name: &'static str,
    pub tracking_url: &'static str,
}
