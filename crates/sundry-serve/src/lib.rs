//! Static development server for installable web apps.
//!
//! Serves a directory over HTTP or HTTPS with headers that keep service
//! workers registrable and stop browsers caching scripts while you edit.
//! HTTPS certificates come from `mkcert` (or `openssl` as a fallback) so
//! the app can be installed from a phone on the same network.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod certs;
pub mod error;
pub mod headers;
pub mod net;
pub mod router;
pub mod server;

pub use certs::{
    CertPrograms, CertTool, TlsFiles, default_hosts, ensure_certificates, ensure_certificates_with,
};
pub use error::{Error, Result};
pub use headers::{is_no_cache, mime_override};
pub use net::local_ip;
pub use router::router;
pub use server::{ServeOptions, banner, serve, serve_http, serve_https};
