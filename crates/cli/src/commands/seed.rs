//! Seed the pickup catalog from a YAML file.
//!
//! The file declares destinations (with matching criteria), pickup stores
//! (with per-language descriptions and served destinations), and shipping
//! methods (with their manual rate tables). A rate amount of `null` leaves
//! the destination unset - not free. See
//! `crates/cli/seed/catalog.example.yaml` for the format.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{error, info};

use storepoint_core::{LangCode, ObjectStatus};
use storepoint_server::db;

/// Top-level seed file structure.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
    #[serde(default)]
    pub stores: Vec<StoreConfig>,
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethodConfig>,
}

/// One destination with its matching criteria.
#[derive(Debug, Deserialize)]
pub struct DestinationConfig {
    pub id: i32,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub zipcodes: Vec<String>,
}

/// One pickup store with its served destinations and descriptions.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub id: i32,
    #[serde(default = "default_status")]
    pub status: String,
    pub main_destination_id: Option<i32>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub serves: Vec<i32>,
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(default)]
    pub descriptions: HashMap<String, StoreDescriptionConfig>,
}

/// One per-language store description.
#[derive(Debug, Deserialize)]
pub struct StoreDescriptionConfig {
    pub name: String,
    pub description: Option<String>,
}

/// One shipping method with its manual rate table.
#[derive(Debug, Deserialize)]
pub struct ShippingMethodConfig {
    pub id: i32,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub default_delivery_time: Option<String>,
    #[serde(default)]
    pub rates: Vec<RateConfig>,
}

/// One manual rate row. A `null` amount means the destination stays unset.
#[derive(Debug, Deserialize)]
pub struct RateConfig {
    pub destination_id: i32,
    pub amount: Option<Decimal>,
    pub delivery_time: Option<String>,
}

fn default_status() -> String {
    "active".to_owned()
}

/// Validate enum values and referential integrity before touching the
/// database.
fn validate_config(config: &CatalogConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let destination_ids: HashSet<i32> = config.destinations.iter().map(|d| d.id).collect();

    for destination in &config.destinations {
        if destination.status.parse::<ObjectStatus>().is_err() {
            errors.push(format!(
                "destination {}: invalid status {:?}",
                destination.id, destination.status
            ));
        }
    }

    for store in &config.stores {
        if store.status.parse::<ObjectStatus>().is_err() {
            errors.push(format!(
                "store {}: invalid status {:?}",
                store.id, store.status
            ));
        }
        if let Some(main) = store.main_destination_id
            && !destination_ids.contains(&main)
        {
            errors.push(format!(
                "store {}: unknown main destination {main}",
                store.id
            ));
        }
        for served in &store.serves {
            if !destination_ids.contains(served) {
                errors.push(format!("store {}: unknown destination {served}", store.id));
            }
        }
        for lang in store.descriptions.keys() {
            if LangCode::parse(lang).is_err() {
                errors.push(format!("store {}: invalid language {lang:?}", store.id));
            }
        }
    }

    for method in &config.shipping_methods {
        if method.status.parse::<ObjectStatus>().is_err() {
            errors.push(format!(
                "shipping method {}: invalid status {:?}",
                method.id, method.status
            ));
        }
        for rate in &method.rates {
            if !destination_ids.contains(&rate.destination_id) {
                errors.push(format!(
                    "shipping method {}: unknown destination {}",
                    method.id, rate.destination_id
                ));
            }
        }
    }

    errors
}

/// Seed the pickup catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `clear_existing` - If true, truncate the catalog tables first
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot be
/// read or validated, or database operations fail.
pub async fn catalog(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREPOINT_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "STOREPOINT_DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let config: CatalogConfig = serde_yaml::from_str(&content)?;

    let errors = validate_config(&config);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!(
        destinations = config.destinations.len(),
        stores = config.stores.len(),
        shipping_methods = config.shipping_methods.len(),
        "Catalog validated"
    );

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    if clear_existing {
        info!("Clearing existing catalog");
        sqlx::query(
            r"
            TRUNCATE shipping_method_rates, shipping_methods,
                     pickup_store_destinations, pickup_store_descriptions,
                     pickup_stores, destination_criteria, destinations
            ",
        )
        .execute(&pool)
        .await?;
    }

    insert_destinations(&pool, &config.destinations).await?;
    insert_stores(&pool, &config.stores).await?;
    insert_shipping_methods(&pool, &config.shipping_methods).await?;

    info!("Seeding complete!");
    info!("  Destinations: {}", config.destinations.len());
    info!("  Stores: {}", config.stores.len());
    info!("  Shipping methods: {}", config.shipping_methods.len());

    Ok(())
}

async fn insert_destinations(
    pool: &PgPool,
    destinations: &[DestinationConfig],
) -> Result<(), sqlx::Error> {
    for destination in destinations {
        sqlx::query(
            r"
            INSERT INTO destinations (destination_id, status, position)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(destination.id)
        .bind(&destination.status)
        .bind(destination.position)
        .execute(pool)
        .await?;

        let criteria = [
            ("country", &destination.countries),
            ("state", &destination.states),
            ("city", &destination.cities),
            ("zipcode", &destination.zipcodes),
        ];
        for (kind, values) in criteria {
            for value in values {
                sqlx::query(
                    r"
                    INSERT INTO destination_criteria (destination_id, kind, value)
                    VALUES ($1, $2, $3)
                    ",
                )
                .bind(destination.id)
                .bind(kind)
                .bind(value)
                .execute(pool)
                .await?;
            }
        }
    }
    Ok(())
}

async fn insert_stores(pool: &PgPool, stores: &[StoreConfig]) -> Result<(), sqlx::Error> {
    for store in stores {
        sqlx::query(
            r"
            INSERT INTO pickup_stores
                (store_id, status, main_destination_id, position, company_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(store.id)
        .bind(&store.status)
        .bind(store.main_destination_id)
        .bind(store.position)
        .bind(store.company_id)
        .execute(pool)
        .await?;

        for (lang, description) in &store.descriptions {
            sqlx::query(
                r"
                INSERT INTO pickup_store_descriptions
                    (store_id, lang_code, name, description)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(store.id)
            .bind(lang)
            .bind(&description.name)
            .bind(&description.description)
            .execute(pool)
            .await?;
        }

        for destination_id in &store.serves {
            sqlx::query(
                r"
                INSERT INTO pickup_store_destinations (store_id, destination_id)
                VALUES ($1, $2)
                ",
            )
            .bind(store.id)
            .bind(destination_id)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

async fn insert_shipping_methods(
    pool: &PgPool,
    methods: &[ShippingMethodConfig],
) -> Result<(), sqlx::Error> {
    for method in methods {
        sqlx::query(
            r"
            INSERT INTO shipping_methods
                (shipping_method_id, name, status, default_delivery_time)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(method.id)
        .bind(&method.name)
        .bind(&method.status)
        .bind(&method.default_delivery_time)
        .execute(pool)
        .await?;

        for rate in &method.rates {
            sqlx::query(
                r"
                INSERT INTO shipping_method_rates
                    (shipping_method_id, destination_id, rate_amount, delivery_time)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(method.id)
            .bind(rate.destination_id)
            .bind(rate.amount)
            .bind(&rate.delivery_time)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}
