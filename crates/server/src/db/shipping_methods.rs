//! Shipping method repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use storepoint_core::{DestinationId, ManualRate, ObjectStatus, ShippingMethodId};
use storepoint_engine::CarrierConfig;

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct MethodRow {
    status: String,
    default_delivery_time: Option<String>,
}

#[derive(sqlx::FromRow)]
struct RateRow {
    destination_id: DestinationId,
    rate_amount: Option<Decimal>,
    delivery_time: Option<String>,
}

/// Repository for shipping method configuration.
pub struct ShippingMethodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShippingMethodRepository<'a> {
    /// Create a new shipping method repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Carrier configuration for an active shipping method.
    ///
    /// Returns `None` when the method is unknown or not active. A `NULL`
    /// rate amount maps to an unset manual rate, never to zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for an unknown status value.
    pub async fn carrier_config(
        &self,
        shipping_method_id: ShippingMethodId,
    ) -> Result<Option<CarrierConfig>, RepositoryError> {
        let method: Option<MethodRow> = sqlx::query_as(
            r"
            SELECT status, default_delivery_time
            FROM shipping_methods
            WHERE shipping_method_id = $1
            ",
        )
        .bind(shipping_method_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(method) = method else {
            return Ok(None);
        };
        let status: ObjectStatus = method
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        if !status.is_active() {
            return Ok(None);
        }

        let rates: Vec<RateRow> = sqlx::query_as(
            r"
            SELECT destination_id, rate_amount, delivery_time
            FROM shipping_method_rates
            WHERE shipping_method_id = $1
            ",
        )
        .bind(shipping_method_id)
        .fetch_all(self.pool)
        .await?;

        let mut carrier = CarrierConfig {
            default_delivery_time: method.default_delivery_time,
            ..CarrierConfig::default()
        };
        for row in rates {
            carrier
                .rates
                .insert(row.destination_id, ManualRate::from_db(row.rate_amount));
            if let Some(time) = row.delivery_time {
                carrier.delivery_times.insert(row.destination_id, time);
            }
        }

        Ok(Some(carrier))
    }
}
