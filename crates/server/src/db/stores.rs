//! Pickup store repository.

use std::collections::{BTreeSet, HashMap};

use sqlx::PgPool;

use storepoint_core::{CompanyId, DestinationId, LangCode, ObjectStatus, StoreId};
use storepoint_engine::{PickupStore, StoreDescription};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct StoreRow {
    store_id: StoreId,
    status: String,
    main_destination_id: Option<DestinationId>,
    position: i32,
    company_id: Option<CompanyId>,
    name: String,
    description: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ServedRow {
    store_id: StoreId,
    destination_id: DestinationId,
}

/// Repository for pickup store rows.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All stores carrying a description in the given language, with their
    /// served destination sets, in catalog order.
    ///
    /// The language join mirrors the engine's predicate: a store without a
    /// description in the active language never reaches resolution anyway.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for an unknown status value.
    pub async fn stores_for_lang(
        &self,
        lang: &LangCode,
    ) -> Result<Vec<PickupStore>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as(
            r"
            SELECT s.store_id, s.status, s.main_destination_id, s.position,
                   s.company_id, d.name, d.description
            FROM pickup_stores s
            JOIN pickup_store_descriptions d
              ON d.store_id = s.store_id AND d.lang_code = $1
            ORDER BY s.store_id
            ",
        )
        .bind(lang.as_str())
        .fetch_all(self.pool)
        .await?;

        let served: Vec<ServedRow> = sqlx::query_as(
            r"
            SELECT store_id, destination_id
            FROM pickup_store_destinations
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut served_by_store: HashMap<StoreId, BTreeSet<DestinationId>> = HashMap::new();
        for row in served {
            served_by_store
                .entry(row.store_id)
                .or_default()
                .insert(row.destination_id);
        }

        rows.into_iter()
            .map(|row| {
                let status: ObjectStatus =
                    row.status.parse().map_err(RepositoryError::DataCorruption)?;
                let mut descriptions = HashMap::new();
                descriptions.insert(
                    lang.clone(),
                    StoreDescription {
                        name: row.name,
                        description: row.description,
                    },
                );

                Ok(PickupStore {
                    id: row.store_id,
                    status,
                    main_destination_id: row.main_destination_id,
                    pickup_destination_ids: served_by_store
                        .remove(&row.store_id)
                        .unwrap_or_default(),
                    position: row.position,
                    descriptions,
                    company_id: row.company_id,
                })
            })
            .collect()
    }
}
