//! Pickup point query and selection route handlers.
//!
//! These endpoints answer from the session-scoped selection cache written by
//! the estimate route; nothing here recomputes availability.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use storepoint_core::{GroupKey, LangCode, Rate, ShippingMethodId, StoreId};
use storepoint_engine::{SelectionStore, ShipmentIdentity};

use crate::error::Result;
use crate::routes::estimate::PickupPointView;
use crate::state::AppState;

/// Identity query parameters.
#[derive(Debug, Deserialize)]
pub struct IdentityParams {
    pub group_key: GroupKey,
    pub shipping_method_id: ShippingMethodId,
    /// Storefront language; the server default applies when absent.
    pub lang: Option<LangCode>,
}

/// Pickup points summary for one shipping line.
#[derive(Debug, Serialize)]
pub struct PickupPointsResponse {
    /// The cached ordered stores from the most recent successful resolution.
    pub stores: Vec<PickupPointView>,
    /// Minimum pickup rate over the cached set; absent when nothing cached.
    pub min_cost: Option<Rate>,
    /// Count of cached stores; absent when no set has been computed.
    pub count: Option<usize>,
}

/// Cached pickup points for one shipping line.
///
/// GET /v1/pickup-points
///
/// # Errors
///
/// Infallible today; kept fallible for parity with the other handlers.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IdentityParams>,
) -> Result<Json<PickupPointsResponse>> {
    let identity = ShipmentIdentity::new(params.group_key, params.shipping_method_id);
    let lang = params
        .lang
        .unwrap_or_else(|| state.config().default_lang.clone());
    let selections = state.selections();

    let stores = selections
        .pickup_points(identity)
        .iter()
        .map(|store| PickupPointView::from_available(store, &lang))
        .collect();

    Ok(Json(PickupPointsResponse {
        stores,
        min_cost: selections.min_pickup_cost(identity),
        count: selections.pickup_point_count(identity),
    }))
}

/// Selection update body.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub group_key: GroupKey,
    pub shipping_method_id: ShippingMethodId,
    /// The chosen store, or `null` to clear the pick.
    pub store_id: Option<StoreId>,
}

/// Record the customer's explicit store pick.
///
/// PUT /v1/pickup-points/selection
///
/// The pick is validated lazily: if the named store has dropped out of the
/// available set by the next resolution, the engine falls back to position
/// order.
pub async fn set_selection(
    State(state): State<AppState>,
    Json(body): Json<SelectionRequest>,
) -> StatusCode {
    let identity = ShipmentIdentity::new(body.group_key, body.shipping_method_id);
    state.selections().set_user_choice(identity, body.store_id);
    StatusCode::NO_CONTENT
}
