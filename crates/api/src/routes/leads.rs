//! Route definitions for lead ingestion.

use std::convert::Infallible;

use axum::routing::{get, post};
use axum::Router;

use crate::cors::build_cors_layer;
use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET     /        -> info
/// POST    /        -> ingest
/// OPTIONS /        -> preflight
/// POST    /leads   -> ingest
/// GET     /stats   -> stats
/// ```
///
/// The CORS layer wraps each method router, so an `OPTIONS` on a route
/// without its own handler falls through to the layer's preflight answer.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(leads::info)
                .post(leads::ingest)
                .layer::<_, Infallible>(build_cors_layer())
                .options(leads::preflight),
        )
        .route("/leads", post(leads::ingest).layer(build_cors_layer()))
        .route("/stats", get(leads::stats).layer(build_cors_layer()))
}
