use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::items::{add_item, delete_item, list_items},
    state::AppState,
};

/// Static asset directory shipped with the crate.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Create the application router with all routes and middleware.
///
/// Paths that match no route are looked up in `static_dir`.
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/add", post(add_item))
        .route("/delete/{id}", post(delete_item))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
