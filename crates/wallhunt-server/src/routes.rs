//! Router configuration for the API server.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Scraped search
        .route("/wallpapers", get(handlers::search_wallpapers))
        // Alternative source
        .route("/images", get(handlers::search_images))
        // Byte proxy and desktop integration
        .route("/download", get(handlers::download_image))
        .route("/set-wallpaper", post(handlers::set_wallpaper))
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
