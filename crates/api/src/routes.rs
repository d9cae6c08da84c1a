use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Management routes. Every operation accepts GET and POST; POST may carry
/// its parameters in a url-encoded form body.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/addHost",
            get(handlers::add_host).post(handlers::add_host),
        )
        .route(
            "/addDomain",
            get(handlers::add_domain).post(handlers::add_domain),
        )
        .route("/update", get(handlers::update).post(handlers::update))
        .route(
            "/delDomain",
            get(handlers::delete_domain).post(handlers::delete_domain),
        )
        .with_state(state)
}
