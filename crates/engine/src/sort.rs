//! Deterministic store ordering.

use crate::store::AvailableStore;

/// Sort available stores ascending by declared position.
///
/// The sort is stable: stores sharing a position keep their input order, and
/// sorting the same sequence twice yields an identical result.
pub fn sort_by_position(stores: &mut [AvailableStore]) {
    stores.sort_by_key(AvailableStore::position);
}
