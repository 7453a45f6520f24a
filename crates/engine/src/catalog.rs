//! Active-store catalog lookup.
//!
//! The catalog answers one question: which stores pass the active-store
//! predicate for a destination? The predicate requires, all at once: store
//! status active, a description row for the active language, the destination
//! in the store's served set, a main destination assigned and itself active,
//! and tenant visibility under the query's scope.
//!
//! Deployment-specific business rules hook in as [`QueryDecorator`]s: the
//! resolver runs them against the [`StoreQuery`] before handing it to the
//! catalog, so extra predicates narrow the result without touching engine
//! code.

use std::collections::BTreeSet;

use thiserror::Error;

use storepoint_core::{DestinationId, LangCode, TenantScope};

use crate::store::PickupStore;

/// Fault from the catalog backend. Distinct from an empty result, which is a
/// domain outcome the caller decides about.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("store catalog backend error: {0}")]
    Backend(String),
}

/// Parameters for one active-store lookup.
pub struct StoreQuery {
    pub destination_id: DestinationId,
    pub lang: LangCode,
    pub scope: TenantScope,
    predicates: Vec<Box<dyn Fn(&PickupStore) -> bool + Send + Sync>>,
}

impl StoreQuery {
    /// Create a query with the base predicate only.
    #[must_use]
    pub fn new(destination_id: DestinationId, lang: LangCode, scope: TenantScope) -> Self {
        Self {
            destination_id,
            lang,
            scope,
            predicates: Vec::new(),
        }
    }

    /// Add an extra predicate; a store must satisfy every added predicate in
    /// addition to the base predicate.
    pub fn add_predicate(
        &mut self,
        predicate: impl Fn(&PickupStore) -> bool + Send + Sync + 'static,
    ) {
        self.predicates.push(Box::new(predicate));
    }

    /// Evaluate the extra predicates added by decorators.
    #[must_use]
    pub fn permits(&self, store: &PickupStore) -> bool {
        self.predicates.iter().all(|predicate| predicate(store))
    }
}

impl std::fmt::Debug for StoreQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreQuery")
            .field("destination_id", &self.destination_id)
            .field("lang", &self.lang)
            .field("scope", &self.scope)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Business-rule extension point invoked at query-construction time.
pub trait QueryDecorator: Send + Sync {
    /// Mutate the query before it reaches the catalog.
    fn decorate(&self, query: &mut StoreQuery);
}

impl<F> QueryDecorator for F
where
    F: Fn(&mut StoreQuery) + Send + Sync,
{
    fn decorate(&self, query: &mut StoreQuery) {
        self(query);
    }
}

/// Queries stores eligible for pickup at a destination.
pub trait StoreCatalog {
    /// Stores passing the active-store predicate, in catalog order.
    ///
    /// The catalog order is preserved into sorting, where it breaks position
    /// ties. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backing store cannot be queried.
    fn active_stores(&self, query: &StoreQuery) -> Result<Vec<PickupStore>, CatalogError>;
}

/// Store catalog backed by in-memory rows.
///
/// The server builds one per request from its database snapshot; tests build
/// them directly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stores: Vec<PickupStore>,
    active_destinations: BTreeSet<DestinationId>,
}

impl InMemoryCatalog {
    /// Create a catalog from store rows and the set of destination ids whose
    /// rows are active.
    #[must_use]
    pub fn new(
        stores: Vec<PickupStore>,
        active_destinations: impl IntoIterator<Item = DestinationId>,
    ) -> Self {
        Self {
            stores,
            active_destinations: active_destinations.into_iter().collect(),
        }
    }
}

impl StoreCatalog for InMemoryCatalog {
    fn active_stores(&self, query: &StoreQuery) -> Result<Vec<PickupStore>, CatalogError> {
        Ok(self
            .stores
            .iter()
            .filter(|store| {
                store.status.is_active()
                    && store.description(&query.lang).is_some()
                    && store.serves(query.destination_id)
                    && store
                        .main_destination_id
                        .is_some_and(|id| self.active_destinations.contains(&id))
                    && query.scope.allows(store.company_id)
                    && query.permits(store)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use storepoint_core::{CompanyId, ObjectStatus, StoreId};

    use super::*;
    use crate::store::StoreDescription;

    fn lang() -> LangCode {
        LangCode::parse("en").expect("valid code")
    }

    fn store(id: i32, main: i32, serves: &[i32]) -> PickupStore {
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
            pickup_destination_ids: serves.iter().map(|d| DestinationId::new(*d)).collect(),
            position: 0,
            descriptions,
            company_id: None,
        }
    }

    fn query(destination: i32) -> StoreQuery {
        StoreQuery::new(DestinationId::new(destination), lang(), TenantScope::Shared)
    }

    fn lookup(catalog: &InMemoryCatalog, query: &StoreQuery) -> Vec<StoreId> {
        catalog
            .active_stores(query)
            .expect("in-memory catalog never fails")
            .into_iter()
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn test_predicate_requires_destination_membership() {
        let catalog = InMemoryCatalog::new(
            vec![store(1, 10, &[10, 11]), store(2, 10, &[12])],
            [DestinationId::new(10)],
        );

        assert_eq!(lookup(&catalog, &query(11)), vec![StoreId::new(1)]);
        assert_eq!(lookup(&catalog, &query(13)), Vec::<StoreId>::new());
    }

    #[test]
    fn test_inactive_store_is_excluded() {
        let mut inactive = store(1, 10, &[10]);
        inactive.status = ObjectStatus::Disabled;
        let catalog = InMemoryCatalog::new(
            vec![inactive, store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        assert_eq!(lookup(&catalog, &query(10)), vec![StoreId::new(2)]);
    }

    #[test]
    fn test_missing_language_description_excludes() {
        let mut undescribed = store(1, 10, &[10]);
        undescribed.descriptions.clear();
        let catalog = InMemoryCatalog::new(
            vec![undescribed, store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        assert_eq!(lookup(&catalog, &query(10)), vec![StoreId::new(2)]);
    }

    #[test]
    fn test_missing_main_destination_excludes() {
        let mut unassigned = store(1, 10, &[10]);
        unassigned.main_destination_id = None;
        let catalog = InMemoryCatalog::new(
            vec![unassigned, store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        assert_eq!(lookup(&catalog, &query(10)), vec![StoreId::new(2)]);
    }

    #[test]
    fn test_inactive_main_destination_row_excludes() {
        // Store 1's main destination row (20) is not active.
        let catalog = InMemoryCatalog::new(
            vec![store(1, 20, &[10]), store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        assert_eq!(lookup(&catalog, &query(10)), vec![StoreId::new(2)]);
    }

    #[test]
    fn test_company_scope_filters_foreign_stores() {
        let mut ours = store(1, 10, &[10]);
        ours.company_id = Some(CompanyId::new(5));
        let mut theirs = store(2, 10, &[10]);
        theirs.company_id = Some(CompanyId::new(6));

        let catalog = InMemoryCatalog::new(vec![ours, theirs], [DestinationId::new(10)]);
        let mut scoped = query(10);
        scoped.scope = TenantScope::Company(CompanyId::new(5));

        assert_eq!(lookup(&catalog, &scoped), vec![StoreId::new(1)]);
    }

    #[test]
    fn test_decorator_predicate_narrows_result() {
        let catalog = InMemoryCatalog::new(
            vec![store(1, 10, &[10]), store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        let mut narrowed = query(10);
        let decorator = |q: &mut StoreQuery| {
            q.add_predicate(|s: &PickupStore| s.id != StoreId::new(1));
        };
        decorator.decorate(&mut narrowed);

        assert_eq!(lookup(&catalog, &narrowed), vec![StoreId::new(2)]);
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = InMemoryCatalog::new(
            vec![store(3, 10, &[10]), store(1, 10, &[10]), store(2, 10, &[10])],
            [DestinationId::new(10)],
        );

        assert_eq!(
            lookup(&catalog, &query(10)),
            vec![StoreId::new(3), StoreId::new(1), StoreId::new(2)]
        );
    }
}
