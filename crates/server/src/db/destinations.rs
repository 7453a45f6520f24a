//! Destination repository.
//!
//! Destinations and their matching criteria feed the engine's rule-based
//! destination resolver. Rules are loaded in `position` order, so narrower
//! destinations (zip-level) should carry lower positions than broader ones.

use std::collections::HashMap;

use sqlx::PgPool;

use storepoint_core::{DestinationId, ObjectStatus};
use storepoint_engine::DestinationRule;

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct DestinationRow {
    destination_id: DestinationId,
    status: String,
}

#[derive(sqlx::FromRow)]
struct CriterionRow {
    destination_id: DestinationId,
    kind: String,
    value: String,
}

/// Repository for destination rows and matching criteria.
pub struct DestinationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DestinationRepository<'a> {
    /// Create a new destination repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load matching rules in evaluation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for an unknown status or criterion
    /// kind.
    pub async fn load_rules(&self) -> Result<Vec<DestinationRule>, RepositoryError> {
        let rows: Vec<DestinationRow> = sqlx::query_as(
            r"
            SELECT destination_id, status
            FROM destinations
            ORDER BY position, destination_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let criteria: Vec<CriterionRow> = sqlx::query_as(
            r"
            SELECT destination_id, kind, value
            FROM destination_criteria
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_destination: HashMap<DestinationId, Vec<(String, String)>> = HashMap::new();
        for criterion in criteria {
            by_destination
                .entry(criterion.destination_id)
                .or_default()
                .push((criterion.kind, criterion.value));
        }

        rows.into_iter()
            .map(|row| {
                let status: ObjectStatus =
                    row.status.parse().map_err(RepositoryError::DataCorruption)?;
                let mut rule = DestinationRule {
                    destination_id: row.destination_id,
                    status,
                    ..DestinationRule::default()
                };
                for (kind, value) in by_destination.remove(&row.destination_id).unwrap_or_default()
                {
                    match kind.as_str() {
                        "country" => rule.countries.push(value),
                        "state" => rule.states.push(value),
                        "city" => rule.cities.push(value),
                        "zipcode" => rule.zipcodes.push(value),
                        other => {
                            return Err(RepositoryError::DataCorruption(format!(
                                "unknown destination criterion kind: {other}"
                            )));
                        }
                    }
                }
                Ok(rule)
            })
            .collect()
    }

    /// Ids of destination rows with active status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_ids(&self) -> Result<Vec<DestinationId>, RepositoryError> {
        let ids: Vec<DestinationId> = sqlx::query_scalar(
            r"
            SELECT destination_id
            FROM destinations
            WHERE status = 'active'
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
