//! Storepoint Engine - Pickup-point resolution.
//!
//! Given a shipment-estimate request (destination address, carrier
//! configuration, tenant scope), the engine determines which physical pickup
//! stores are eligible, computes per-store cost and delivery time, and
//! resolves a single selected store from the customer's persisted explicit
//! pick with deterministic fallback ordering.
//!
//! # Architecture
//!
//! The engine is a synchronous, request-scoped library. It owns the decision
//! logic only; address books, store catalogs, and selection state are
//! collaborators injected through traits:
//!
//! - [`DestinationResolver`] - maps a delivery address to a destination
//! - [`StoreCatalog`] - queries active stores for a destination
//! - [`SelectionStore`] - session-scoped cache of computed store sets and the
//!   customer's explicit pick, keyed by [`ShipmentIdentity`]
//!
//! Resolution runs a ladder with early exits: resolve destination, look up
//! active stores, attach manual rates (dropping stores the carrier cannot
//! price), sort by position, persist, select. Failed rungs produce a
//! [`ResolutionFailure`] value on the result - never an `Err`. `Err` is
//! reserved for collaborator faults.
//!
//! # Concurrency
//!
//! One resolution corresponds to one inbound estimate request and completes
//! before returning. Writers to the [`SelectionStore`] are partitioned by
//! identity; the host must serialize concurrent requests for the same
//! identity.
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod availability;
pub mod catalog;
pub mod destination;
pub mod request;
pub mod resolver;
pub mod selection;
pub mod sort;
pub mod store;
pub mod strategy;

pub use availability::filter_available;
pub use catalog::{CatalogError, InMemoryCatalog, QueryDecorator, StoreCatalog, StoreQuery};
pub use destination::{DestinationResolver, DestinationRule, RuleBasedResolver};
pub use request::{
    CarrierConfig, CarrierInfo, Location, PickupResolution, ResolutionFailure, ShipmentIdentity,
    ShipmentRequest,
};
pub use resolver::{PickupResolver, ResolveError, carrier_info};
pub use selection::{InMemorySelectionStore, SelectionRecord, SelectionStore};
pub use sort::sort_by_position;
pub use store::{AvailableStore, PickupStore, StoreDescription};
pub use strategy::{
    LowestPosition, SelectionContext, SelectionStrategy, UserChoice, default_strategies,
};
