//! `sundry serve`

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use sundry_core::SundryConfig;
use sundry_serve::{ServeOptions, TlsFiles, default_hosts, ensure_certificates, local_ip};

/// Flags given on the command line.
#[derive(Debug, Default)]
pub struct ServeFlags {
    pub root: Option<PathBuf>,
    pub port: Option<u16>,
    pub https: bool,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

/// Merge flags over the `[server]` config table.
pub fn options(config: &SundryConfig, flags: ServeFlags) -> Result<ServeOptions> {
    let server = &config.server;
    let bind: IpAddr = server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", server.bind))?;
    let https = flags.https || flags.cert.is_some();
    let default_port = if https {
        server.https_port
    } else {
        server.http_port
    };
    let tls = https.then(|| {
        TlsFiles::new(
            flags.cert.unwrap_or_else(|| server.cert_file.clone()),
            flags.key.unwrap_or_else(|| server.key_file.clone()),
        )
    });
    Ok(ServeOptions {
        root: flags.root.unwrap_or_else(|| server.root.clone()),
        bind,
        port: flags.port.unwrap_or(default_port),
        tls,
    })
}

pub async fn run(config: &SundryConfig, flags: ServeFlags) -> Result<()> {
    let opts = options(config, flags)?;
    if let Some(files) = &opts.tls {
        let tool = ensure_certificates(files, &default_hosts(local_ip()))?;
        tracing::info!("Certificate: {tool}");
    }
    sundry_serve::serve(&opts).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_config() {
        let opts = options(&SundryConfig::default(), ServeFlags::default()).unwrap();
        assert_eq!(opts.port, 8000);
        assert_eq!(opts.root, PathBuf::from("."));
        assert!(opts.tls.is_none());
    }

    #[test]
    fn test_https_uses_https_port_and_config_certs() {
        let flags = ServeFlags {
            https: true,
            ..ServeFlags::default()
        };
        let opts = options(&SundryConfig::default(), flags).unwrap();
        assert_eq!(opts.port, 8443);
        assert_eq!(opts.tls, Some(TlsFiles::default()));
    }

    #[test]
    fn test_flags_override() {
        let flags = ServeFlags {
            root: Some(PathBuf::from("site")),
            port: Some(9000),
            cert: Some(PathBuf::from("c.pem")),
            key: Some(PathBuf::from("k.pem")),
            ..ServeFlags::default()
        };
        let opts = options(&SundryConfig::default(), flags).unwrap();
        assert_eq!(opts.port, 9000);
        assert_eq!(opts.root, PathBuf::from("site"));
        assert_eq!(opts.tls, Some(TlsFiles::new("c.pem", "k.pem")));
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = SundryConfig::default();
        config.server.bind = "not-an-ip".to_string();
        assert!(options(&config, ServeFlags::default()).is_err());
    }
}
