//! Store selection strategies.
//!
//! The selection step is an explicit ordered ladder: each strategy either
//! picks a store or has no opinion, and the resolver takes the first pick.
//! This keeps each rung testable in isolation and lets deployments insert
//! their own rungs (e.g. "nearest to the customer") without rewriting the
//! ladder.

use storepoint_core::StoreId;

use crate::store::AvailableStore;

/// Context handed to selection strategies.
///
/// `stores` is the sorted available set (ascending by position); the customer
/// pick, if any, was read from the selection store before the ladder runs.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub stores: &'a [AvailableStore],
    pub user_choice: Option<StoreId>,
}

/// One rung of the selection ladder.
pub trait SelectionStrategy: Send + Sync {
    /// Pick a store, or return `None` to pass to the next rung.
    fn select<'a>(&self, ctx: &SelectionContext<'a>) -> Option<&'a AvailableStore>;
}

/// Honors the customer's persisted pick when it names a store that is still
/// in the available set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserChoice;

impl SelectionStrategy for UserChoice {
    fn select<'a>(&self, ctx: &SelectionContext<'a>) -> Option<&'a AvailableStore> {
        let choice = ctx.user_choice?;
        ctx.stores.iter().find(|store| store.id() == choice)
    }
}

/// Falls back to the lowest-position store.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestPosition;

impl SelectionStrategy for LowestPosition {
    fn select<'a>(&self, ctx: &SelectionContext<'a>) -> Option<&'a AvailableStore> {
        ctx.stores.first()
    }
}

/// The default ladder: the customer's explicit pick, then the lowest
/// position.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn SelectionStrategy>> {
    vec![Box::new(UserChoice), Box::new(LowestPosition)]
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal_macros::dec;

    use storepoint_core::{DestinationId, ObjectStatus, Rate};

    use super::*;
    use crate::store::PickupStore;

    fn available(id: i32, position: i32) -> AvailableStore {
        AvailableStore {
            store: PickupStore {
                id: StoreId::new(id),
                status: ObjectStatus::Active,
                main_destination_id: Some(DestinationId::new(1)),
                pickup_destination_ids: [DestinationId::new(1)].into_iter().collect(),
                position,
                descriptions: HashMap::new(),
                company_id: None,
            },
            pickup_rate: Rate::new(dec!(5.00)),
            delivery_time: None,
        }
    }

    #[test]
    fn test_user_choice_picks_named_store_regardless_of_position() {
        let stores = vec![available(1, 10), available(2, 20)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: Some(StoreId::new(2)),
        };

        let picked = UserChoice.select(&ctx).map(AvailableStore::id);
        assert_eq!(picked, Some(StoreId::new(2)));
    }

    #[test]
    fn test_user_choice_has_no_opinion_when_pick_is_gone() {
        let stores = vec![available(1, 10)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: Some(StoreId::new(9)),
        };

        assert!(UserChoice.select(&ctx).is_none());
    }

    #[test]
    fn test_user_choice_has_no_opinion_without_a_pick() {
        let stores = vec![available(1, 10)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: None,
        };

        assert!(UserChoice.select(&ctx).is_none());
    }

    #[test]
    fn test_lowest_position_takes_the_first_sorted_store() {
        let stores = vec![available(2, 10), available(1, 20)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: None,
        };

        let picked = LowestPosition.select(&ctx).map(AvailableStore::id);
        assert_eq!(picked, Some(StoreId::new(2)));
    }

    #[test]
    fn test_default_ladder_prefers_user_choice() {
        let stores = vec![available(1, 10), available(2, 20)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: Some(StoreId::new(2)),
        };

        let picked = default_strategies()
            .iter()
            .find_map(|strategy| strategy.select(&ctx))
            .map(AvailableStore::id);
        assert_eq!(picked, Some(StoreId::new(2)));
    }

    #[test]
    fn test_default_ladder_falls_back_to_lowest_position() {
        let stores = vec![available(1, 10), available(2, 20)];
        let ctx = SelectionContext {
            stores: &stores,
            user_choice: Some(StoreId::new(9)),
        };

        let picked = default_strategies()
            .iter()
            .find_map(|strategy| strategy.select(&ctx))
            .map(AvailableStore::id);
        assert_eq!(picked, Some(StoreId::new(1)));
    }
}
