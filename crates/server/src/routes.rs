use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod customers;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health plus the customer API.
pub fn build_router(state: ServerState, cors: CorsLayer, max_body_bytes: usize) -> Router {
    let public = Router::new().route("/health", get(health));

    let api = Router::new()
        .route("/api/customers", get(customers::list).post(customers::create))
        .route(
            "/api/customers/:id",
            get(customers::get_one)
                .put(customers::replace)
                .patch(customers::merge)
                .delete(customers::delete),
        )
        .route(
            "/api/customers/:id/picture",
            get(customers::get_picture)
                .put(customers::put_picture)
                .delete(customers::delete_picture),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and friends
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
