//! HTTP route handlers for the estimation API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (verifies database)
//!
//! # Estimation
//! POST /v1/estimate                - Resolve pickup availability for one
//!                                    shipping line
//!
//! # Pickup points
//! GET  /v1/pickup-points           - Cached store list, min cost, and count
//!                                    for an identity
//! PUT  /v1/pickup-points/selection - Set or clear the customer's store pick
//! ```

pub mod estimate;
pub mod pickup_points;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the versioned API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/estimate", post(estimate::estimate))
        .route("/v1/pickup-points", get(pickup_points::list))
        .route(
            "/v1/pickup-points/selection",
            put(pickup_points::set_selection),
        )
}
