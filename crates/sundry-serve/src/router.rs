//! The static file service.

use std::path::Path;

use axum::Router;
use axum::middleware;
use tower_http::services::ServeDir;

use crate::headers::dev_headers;

/// Serve `root` with development headers on every response.
///
/// Directories answer with their `index.html`.
pub fn router(root: &Path) -> Router {
    let files = ServeDir::new(root).append_index_html_on_directories(true);
    Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(dev_headers))
}
