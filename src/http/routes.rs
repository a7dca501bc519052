use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::get_status))
        // Selection and compression
        .route("/media/select", post(handlers::select_media))
        .route("/media/menu", get(handlers::get_menu))
        .route("/media/method", post(handlers::choose_method))
        .route("/media/compress", post(handlers::compress_now))
        .route("/media/reset", post(handlers::reset))
        // Recording list
        .route(
            "/recordings",
            get(handlers::list_recordings).post(handlers::add_recording),
        )
        .route("/recordings/:index", delete(handlers::delete_recording))
        .route("/recordings/:index/save", post(handlers::save_recording))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
