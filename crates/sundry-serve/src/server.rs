//! Running the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;

use crate::certs::TlsFiles;
use crate::error::{Error, Result};
use crate::net::local_ip;
use crate::router::router;

/// Default plain HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default HTTPS port.
pub const DEFAULT_HTTPS_PORT: u16 = 8443;

/// How long in-flight requests get to finish after Ctrl-C.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// What to serve and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    /// Document root
    pub root: PathBuf,
    /// Interface to listen on
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Certificate and key; `None` serves plain HTTP
    pub tls: Option<TlsFiles>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_HTTP_PORT,
            tls: None,
        }
    }
}

impl ServeOptions {
    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    fn check_root(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(Error::Root(self.root.clone()))
        }
    }
}

/// The startup text: where to connect and, for HTTPS, how to set up a phone.
pub fn banner(opts: &ServeOptions, port: u16, lan_ip: Option<IpAddr>) -> String {
    let scheme = if opts.tls.is_some() { "https" } else { "http" };
    let rule = "=".repeat(60);
    let mut lines = vec![
        rule.clone(),
        format!("Serving {} over {}", opts.root.display(), scheme.to_uppercase()),
        rule.clone(),
        format!("  Local:    {scheme}://localhost:{port}"),
    ];
    match lan_ip {
        Some(ip) => lines.push(format!("  Network:  {scheme}://{ip}:{port}")),
        None => lines.push("  Network:  (LAN address unavailable)".to_string()),
    }
    if opts.tls.is_some() {
        lines.push(String::new());
        lines.push("First-time setup on iPhone/iPad:".to_string());
        lines.push("  1. Run `mkcert -CAROOT` and AirDrop rootCA.pem to the device".to_string());
        lines.push("  2. Settings > General > VPN & Device Management: install the profile".to_string());
        lines.push(
            "  3. Settings > General > About > Certificate Trust Settings: enable full trust"
                .to_string(),
        );
        lines.push("  4. Open the Network URL in Safari, then Share > Add to Home Screen".to_string());
    }
    lines.push(String::new());
    lines.push("Press Ctrl-C to stop".to_string());
    lines.push(rule);
    lines.join("\n")
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

/// Serve plain HTTP until Ctrl-C.
pub async fn serve_http(opts: &ServeOptions) -> Result<()> {
    opts.check_root()?;
    let addr = opts.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    let port = listener
        .local_addr()
        .map(|a| a.port())
        .unwrap_or(opts.port);

    println!("{}", banner(opts, port, local_ip()));
    log::info!("Listening on {addr}");

    let app = router(&opts.root).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(ctrl_c())
        .await
        .map_err(Error::Server)?;

    println!("Server stopped");
    Ok(())
}

/// Serve HTTPS with the certificate in `opts.tls` until Ctrl-C.
pub async fn serve_https(opts: &ServeOptions) -> Result<()> {
    opts.check_root()?;
    let files = opts.tls.clone().unwrap_or_default();
    let config = RustlsConfig::from_pem_file(&files.cert, &files.key)
        .await
        .map_err(Error::Tls)?;
    let addr = opts.addr();

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        ctrl_c().await;
        shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let lan_ip = local_ip();
    let listening = handle.clone();
    let tls_opts = ServeOptions {
        tls: Some(files),
        ..opts.clone()
    };
    tokio::spawn(async move {
        if let Some(bound) = listening.listening().await {
            println!("{}", banner(&tls_opts, bound.port(), lan_ip));
            log::info!("Listening on {bound}");
        }
    });

    axum_server::bind_rustls(addr, config)
        .handle(handle)
        .serve(router(&opts.root).into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::AddrInUse | std::io::ErrorKind::PermissionDenied => {
                Error::Bind { addr, source }
            }
            _ => Error::Server(source),
        })?;

    println!("Server stopped");
    Ok(())
}

/// Serve HTTPS when `opts.tls` is set, plain HTTP otherwise.
pub async fn serve(opts: &ServeOptions) -> Result<()> {
    if opts.tls.is_some() {
        serve_https(opts).await
    } else {
        serve_http(opts).await
    }
}
