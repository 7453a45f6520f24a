//! Database operations for the pickup catalog `PostgreSQL`.
//!
//! # Database: `storepoint`
//!
//! ## Tables
//!
//! - `destinations` / `destination_criteria` - Resolvable delivery targets
//! - `pickup_stores` / `pickup_store_descriptions` - Physical pickup stores
//! - `pickup_store_destinations` - Destinations each store can serve
//! - `shipping_methods` / `shipping_method_rates` - Carrier configuration
//!   and the manual rate table (NULL amount = unset)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p storepoint-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod destinations;
pub mod shipping_methods;
pub mod stores;

pub use destinations::DestinationRepository;
pub use shipping_methods::ShippingMethodRepository;
pub use stores::StoreRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
