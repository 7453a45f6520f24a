//! Resolution orchestration.
//!
//! The resolver walks a ladder with early exits:
//!
//! 1. Resolve the destination - no identifier is a terminal
//!    [`ResolutionFailure::DestinationNotFound`].
//! 2. Look up active stores - empty is [`ResolutionFailure::NoActiveStores`].
//! 3. Attach manual rates - empty after filtering is
//!    [`ResolutionFailure::NoAvailableStores`].
//! 4. Sort by position and persist the set for the request's identity.
//! 5. Run the selection ladder (customer pick, then lowest position).
//! 6. Assemble the resolution. Cost stays the zero placeholder; pricing is a
//!    downstream stage.

use tracing::{debug, instrument};

use storepoint_core::Rate;

use crate::availability::filter_available;
use crate::catalog::{CatalogError, QueryDecorator, StoreCatalog, StoreQuery};
use crate::destination::DestinationResolver;
use crate::request::{
    CarrierInfo, PickupResolution, ResolutionFailure, ShipmentIdentity, ShipmentRequest,
};
use crate::selection::SelectionStore;
use crate::sort::sort_by_position;
use crate::store::AvailableStore;
use crate::strategy::{SelectionContext, SelectionStrategy, default_strategies};

/// Collaborator fault during resolution.
///
/// Domain outcomes (unknown destination, no stores) are values on
/// [`PickupResolution`], never errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The store catalog backend could not be queried.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Shipping service metadata for carrier listings.
#[must_use]
pub const fn carrier_info() -> CarrierInfo {
    CarrierInfo {
        name: "Store pickup",
        tracking_url: "#",
    }
}

/// The pickup-point resolution engine.
///
/// Holds the injected collaborators plus the query decorators and selection
/// ladder. One resolver serves many requests; all per-request state lives in
/// the [`ShipmentRequest`] and the selection store.
pub struct PickupResolver<D, C, S> {
    destinations: D,
    catalog: C,
    selections: S,
    decorators: Vec<Box<dyn QueryDecorator>>,
    strategies: Vec<Box<dyn SelectionStrategy>>,
}

impl<D, C, S> PickupResolver<D, C, S>
where
    D: DestinationResolver,
    C: StoreCatalog,
    S: SelectionStore,
{
    /// Create a resolver with the default selection ladder and no query
    /// decorators.
    #[must_use]
    pub fn new(destinations: D, catalog: C, selections: S) -> Self {
        Self {
            destinations,
            catalog,
            selections,
            decorators: Vec::new(),
            strategies: default_strategies(),
        }
    }

    /// Register a query decorator, run in registration order at
    /// query-construction time.
    #[must_use]
    pub fn with_decorator(mut self, decorator: impl QueryDecorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Replace the selection ladder.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn SelectionStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Resolve one shipment request to a pickup outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] only for collaborator faults; every domain
    /// outcome, including the failure kinds, is carried on the returned
    /// [`PickupResolution`].
    #[instrument(
        skip(self, request),
        fields(
            group_key = %request.identity.group_key,
            shipping_method_id = %request.identity.shipping_method_id,
        )
    )]
    pub fn resolve(&self, request: &ShipmentRequest) -> Result<PickupResolution, ResolveError> {
        let Some(destination_id) = self.destinations.resolve(&request.location) else {
            debug!("delivery address did not resolve to a destination");
            return Ok(PickupResolution::failed(
                ResolutionFailure::DestinationNotFound,
            ));
        };

        let mut query = StoreQuery::new(destination_id, request.lang.clone(), request.scope);
        for decorator in &self.decorators {
            decorator.decorate(&mut query);
        }

        let active_stores = self.catalog.active_stores(&query)?;
        if active_stores.is_empty() {
            debug!(%destination_id, "no active stores serve the destination");
            return Ok(PickupResolution::failed(ResolutionFailure::NoActiveStores));
        }

        let mut available = filter_available(active_stores, &request.carrier);
        if available.is_empty() {
            debug!(%destination_id, "all stores dropped by rate filtering");
            return Ok(PickupResolution::failed(
                ResolutionFailure::NoAvailableStores,
            ));
        }

        sort_by_position(&mut available);
        self.selections.put(request.identity, available.clone());
        debug!(
            %destination_id,
            store_count = available.len(),
            "persisted available store set"
        );

        let ctx = SelectionContext {
            stores: &available,
            user_choice: self.selections.user_choice(request.identity),
        };
        let selected = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.select(&ctx));

        let destination_id = selected
            .and_then(AvailableStore::main_destination_id)
            .or(request.fallback_destination_id);

        Ok(PickupResolution {
            // Zero for now; the manual rate amount is added by the pricing
            // stage downstream.
            cost: Some(Rate::ZERO),
            failure: None,
            delivery_time: selected.and_then(|store| store.delivery_time.clone()),
            destination_id,
        })
    }

    /// Minimum pickup rate over the cached store set for an identity.
    ///
    /// `None` when nothing has been cached; a missing rate is never treated
    /// as zero.
    #[must_use]
    pub fn min_pickup_cost(&self, identity: ShipmentIdentity) -> Option<Rate> {
        self.selections.min_pickup_cost(identity)
    }

    /// Number of cached pickup points for an identity.
    ///
    /// `None` when no store set has been computed, so "not computed yet" is
    /// distinguishable from a counted result.
    #[must_use]
    pub fn pickup_point_count(&self, identity: ShipmentIdentity) -> Option<usize> {
        self.selections.pickup_point_count(identity)
    }

    /// The cached ordered pickup points for an identity, for store pickers.
    #[must_use]
    pub fn pickup_points(&self, identity: ShipmentIdentity) -> Vec<AvailableStore> {
        self.selections.pickup_points(identity)
    }
}
