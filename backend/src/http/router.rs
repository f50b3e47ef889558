//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route(
            "/segments",
            get(handlers::list_segments).post(handlers::create_segment),
        )
        .route(
            "/segments/{id}",
            get(handlers::get_segment)
                .put(handlers::update_segment)
                .delete(handlers::delete_segment),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_v1)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Arc::new(LocalRepository::new()));
        let _router = create_router(state);
    }
}
