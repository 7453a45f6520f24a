//! Shipment estimate route handler.
//!
//! One estimate request loads the carrier configuration and catalog snapshot
//! from `PostgreSQL`, then runs the synchronous resolution engine against
//! them. All session-scoped state lives in the shared selection store, keyed
//! by `(group_key, shipping_method_id)`.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use storepoint_core::{
    CompanyId, DestinationId, GroupKey, LangCode, Rate, ShippingMethodId, StoreId, TenantScope,
};
use storepoint_engine::{
    AvailableStore, InMemoryCatalog, Location, PickupResolution, PickupResolver, RuleBasedResolver,
    ShipmentIdentity, ShipmentRequest,
};

use crate::db::{DestinationRepository, ShippingMethodRepository, StoreRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shipment estimate request body.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub group_key: GroupKey,
    pub shipping_method_id: ShippingMethodId,
    /// Delivery address; may be partial early in checkout.
    #[serde(default)]
    pub location: Location,
    /// Company the storefront resolved for this cart (multi-tenant mode).
    pub company_id: Option<CompanyId>,
    /// Storefront language; the server default applies when absent.
    pub lang: Option<LangCode>,
    /// Destination from previously computed rate info.
    pub fallback_destination_id: Option<DestinationId>,
}

/// One pickup point in a response.
#[derive(Debug, Serialize)]
pub struct PickupPointView {
    pub store_id: StoreId,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
    pub pickup_rate: Rate,
    pub delivery_time: Option<String>,
    pub main_destination_id: Option<DestinationId>,
}

impl PickupPointView {
    /// Project an available store into its response shape for a language.
    pub(crate) fn from_available(store: &AvailableStore, lang: &LangCode) -> Self {
        let description = store.store.description(lang);
        Self {
            store_id: store.id(),
            name: description.map(|d| d.name.clone()).unwrap_or_default(),
            description: description.and_then(|d| d.description.clone()),
            position: store.position(),
            pickup_rate: store.pickup_rate,
            delivery_time: store.delivery_time.clone(),
            main_destination_id: store.main_destination_id(),
        }
    }
}

/// Shipment estimate response body.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub resolution: PickupResolution,
    /// The ordered available stores for this estimate; empty on failure.
    pub stores: Vec<PickupPointView>,
}

/// Resolve pickup availability for one shipping line.
///
/// POST /v1/estimate
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown or inactive shipping method,
/// `AppError::BadRequest` when multi-tenant mode is on and no company was
/// given, and `AppError::Database` for repository faults. Domain failures
/// (unresolved destination, no stores) are carried on the response body.
#[instrument(
    skip(state, body),
    fields(
        group_key = %body.group_key,
        shipping_method_id = %body.shipping_method_id,
    )
)]
pub async fn estimate(
    State(state): State<AppState>,
    Json(body): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>> {
    let lang = body
        .lang
        .clone()
        .unwrap_or_else(|| state.config().default_lang.clone());
    let scope = tenant_scope(&state, body.company_id)?;

    let carrier = ShippingMethodRepository::new(state.pool())
        .carrier_config(body.shipping_method_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("shipping method {}", body.shipping_method_id))
        })?;

    let destinations = DestinationRepository::new(state.pool());
    let rules = destinations.load_rules().await?;
    let active_ids = destinations.active_ids().await?;
    let stores = StoreRepository::new(state.pool())
        .stores_for_lang(&lang)
        .await?;

    let request = ShipmentRequest {
        identity: ShipmentIdentity::new(body.group_key, body.shipping_method_id),
        location: body.location,
        carrier,
        scope,
        lang: lang.clone(),
        fallback_destination_id: body.fallback_destination_id,
    };

    let resolver = PickupResolver::new(
        RuleBasedResolver::new(rules),
        InMemoryCatalog::new(stores, active_ids),
        state.selections(),
    );
    let resolution = resolver.resolve(&request)?;

    let stores = if resolution.is_success() {
        resolver
            .pickup_points(request.identity)
            .iter()
            .map(|store| PickupPointView::from_available(store, &lang))
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(EstimateResponse { resolution, stores }))
}

/// Map the configured tenancy mode and the request's company to a scope.
fn tenant_scope(state: &AppState, company_id: Option<CompanyId>) -> Result<TenantScope> {
    if state.config().multi_tenant {
        company_id.map(TenantScope::Company).ok_or_else(|| {
            AppError::BadRequest("company_id is required in multi-tenant mode".to_string())
        })
    } else {
        Ok(TenantScope::Shared)
    }
}
