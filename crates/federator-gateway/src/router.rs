//! Axum router wiring.

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().server.max_body_bytes;
    Router::new()
        .route("/", get(transport::index::index))
        .route(
            "/receive",
            post(transport::receive::receive).layer(DefaultBodyLimit::max(max_body)),
        )
        .route("/federate", get(transport::federate::federate))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
