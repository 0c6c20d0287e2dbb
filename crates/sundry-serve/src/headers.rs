//! Response headers for serving installable web apps during development.
//!
//! Every response allows any origin and permits a service worker scoped to
//! `/`. Scripts, styles and pages are never cached so edits show up on the
//! next reload, and a few types are forced to what browsers expect for PWAs.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, max-age=0",
    ),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

fn extension(path: &str) -> Option<String> {
    let name = path.rsplit('/').next()?;
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Content type forced for `path`, if any.
///
/// ```
/// use sundry_serve::headers::mime_override;
///
/// assert_eq!(mime_override("/app.js"), Some("application/javascript"));
/// assert_eq!(mime_override("/manifest.webmanifest"), Some("application/manifest+json"));
/// assert_eq!(mime_override("/style.css"), None);
/// ```
pub fn mime_override(path: &str) -> Option<&'static str> {
    match extension(path)?.as_str() {
        "js" => Some("application/javascript"),
        "json" => Some("application/json"),
        "webmanifest" => Some("application/manifest+json"),
        _ => None,
    }
}

/// Whether responses for `path` must not be cached.
///
/// Directory paths count as pages since they serve `index.html`.
pub fn is_no_cache(path: &str) -> bool {
    if path.ends_with('/') {
        return true;
    }
    matches!(extension(path).as_deref(), Some("js" | "css" | "html"))
}

fn insert_all(headers: &mut HeaderMap, pairs: &[(HeaderName, &'static str)]) {
    for (name, value) in pairs {
        headers.insert(name.clone(), HeaderValue::from_static(*value));
    }
}

fn insert_common(headers: &mut HeaderMap) {
    insert_all(headers, &CORS_HEADERS);
    headers.insert(SERVICE_WORKER_ALLOWED, HeaderValue::from_static("/"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
}

/// Middleware adding the development headers to every response and
/// logging one access line per request.
///
/// `OPTIONS` requests are answered here with 204 and never reach the
/// file service.
pub async fn dev_headers(req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if method == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        insert_common(resp.headers_mut());
        log::info!("{peer} - {method} {path} {}", resp.status().as_u16());
        return resp;
    }

    let mut resp = next.run(req).await;
    log::info!("{peer} - {method} {path} {}", resp.status().as_u16());
    let ok = resp.status().is_success();
    let headers = resp.headers_mut();

    insert_common(headers);
    if is_no_cache(&path) {
        insert_all(headers, &NO_CACHE_HEADERS);
    }
    if ok && let Some(mime) = mime_override(&path) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    }
    resp
}
