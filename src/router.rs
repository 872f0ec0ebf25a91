use crate::handlers::{assets, catalog};
use crate::middleware::logging;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;

pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/files", get(catalog::list_files))
        .route("/download", get(catalog::download_file))
        // Static assets from the public directory
        .route("/", get(assets::serve_index))
        .route("/{*path}", get(assets::serve_asset))
        .layer(middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
