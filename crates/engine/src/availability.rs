//! Rate availability filtering.
//!
//! Geographic eligibility is not enough: a store whose main destination has
//! no configured manual rate cannot be used for pickup and is dropped here.
//! Surviving stores are enriched with their rate and delivery time.

use crate::request::CarrierConfig;
use crate::store::{AvailableStore, PickupStore};

/// Attach manual rates and delivery times to active stores, dropping stores
/// the carrier cannot price.
///
/// Input order is preserved, so catalog order carries through to sorting.
#[must_use]
pub fn filter_available(
    active_stores: Vec<PickupStore>,
    carrier: &CarrierConfig,
) -> Vec<AvailableStore> {
    active_stores
        .into_iter()
        .filter_map(|store| {
            let destination_id = store.main_destination_id?;
            let pickup_rate = carrier.rate_for(destination_id).as_rate()?;
            let delivery_time = carrier
                .delivery_time_for(destination_id)
                .map(ToOwned::to_owned);

            Some(AvailableStore {
                store,
                pickup_rate,
                delivery_time,
            })
        })
        .collect()
}
