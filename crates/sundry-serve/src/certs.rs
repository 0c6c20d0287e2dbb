//! Locally trusted certificates for HTTPS development.
//!
//! iOS only installs PWAs and registers service workers over HTTPS, so the
//! server needs a certificate the phone will accept. `mkcert` creates one
//! signed by a local CA that can be installed on the device; `openssl`
//! is the fallback and produces a self-signed certificate instead.

use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Default certificate file name.
pub const DEFAULT_CERT: &str = "localhost.pem";

/// Default private key file name.
pub const DEFAULT_KEY: &str = "localhost-key.pem";

/// Certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    /// PEM certificate
    pub cert: PathBuf,
    /// PEM private key
    pub key: PathBuf,
}

impl Default for TlsFiles {
    fn default() -> Self {
        Self {
            cert: PathBuf::from(DEFAULT_CERT),
            key: PathBuf::from(DEFAULT_KEY),
        }
    }
}

impl TlsFiles {
    /// Create from explicit paths.
    pub fn new(cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
        }
    }

    /// Both files are present.
    pub fn exist(&self) -> bool {
        self.cert.is_file() && self.key.is_file()
    }
}

/// How the certificate in use came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertTool {
    /// Files were already there.
    Existing,
    /// Generated by mkcert; trusted once its CA is installed.
    Mkcert,
    /// Self-signed by openssl; browsers will warn.
    Openssl,
}

impl fmt::Display for CertTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing => f.write_str("existing certificate"),
            Self::Mkcert => f.write_str("mkcert"),
            Self::Openssl => f.write_str("openssl (self-signed)"),
        }
    }
}

/// Host names the certificate should cover.
pub fn default_hosts(lan_ip: Option<IpAddr>) -> Vec<String> {
    let mut hosts = vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
        "::1".to_string(),
    ];
    if let Some(ip) = lan_ip {
        hosts.push(ip.to_string());
    }
    hosts
}

/// External commands used to create certificates.
///
/// Each entry is a program followed by any leading arguments; the
/// tool-specific arguments are appended after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertPrograms {
    /// mkcert command
    pub mkcert: Vec<String>,
    /// openssl command
    pub openssl: Vec<String>,
}

impl Default for CertPrograms {
    fn default() -> Self {
        Self {
            mkcert: vec!["mkcert".to_string()],
            openssl: vec!["openssl".to_string()],
        }
    }
}

fn run(command: &[String], args: &[&str]) -> std::result::Result<(), String> {
    let Some((program, leading)) = command.split_first() else {
        return Err("no program configured".to_string());
    };
    log::debug!("Running {} {}", command.join(" "), args.join(" "));
    match Command::new(program).args(leading).args(args).output() {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(format!(
            "{program} exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )),
        Err(e) => Err(format!("{program} could not be started: {e}")),
    }
}

fn path_arg(path: &Path) -> std::result::Result<&str, String> {
    path.to_str()
        .ok_or_else(|| format!("{} is not valid UTF-8", path.display()))
}

fn create_parents(files: &TlsFiles) -> Result<()> {
    for path in [&files.cert, &files.key] {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| sundry_core::Error::io_with_path(e, parent))?;
        }
    }
    Ok(())
}

fn with_mkcert(
    mkcert: &[String],
    files: &TlsFiles,
    hosts: &[String],
) -> std::result::Result<(), String> {
    run(mkcert, &["-install"])?;
    let mut args = vec![
        "-cert-file",
        path_arg(&files.cert)?,
        "-key-file",
        path_arg(&files.key)?,
    ];
    args.extend(hosts.iter().map(String::as_str));
    run(mkcert, &args)
}

fn with_openssl(openssl: &[String], files: &TlsFiles) -> std::result::Result<(), String> {
    run(
        openssl,
        &[
            "req",
            "-x509",
            "-newkey",
            "rsa:4096",
            "-keyout",
            path_arg(&files.key)?,
            "-out",
            path_arg(&files.cert)?,
            "-days",
            "365",
            "-nodes",
            "-subj",
            "/CN=localhost",
        ],
    )
}

/// Make sure `files` exist, generating them when they do not.
///
/// Tries mkcert first, then openssl.
pub fn ensure_certificates(files: &TlsFiles, hosts: &[String]) -> Result<CertTool> {
    ensure_certificates_with(&CertPrograms::default(), files, hosts)
}

/// [`ensure_certificates`] with explicit tool commands.
pub fn ensure_certificates_with(
    programs: &CertPrograms,
    files: &TlsFiles,
    hosts: &[String],
) -> Result<CertTool> {
    if files.exist() {
        log::info!("Using existing certificate {}", files.cert.display());
        return Ok(CertTool::Existing);
    }
    create_parents(files)?;

    log::info!("Generating certificate for {}", hosts.join(", "));
    let mkcert_err = match with_mkcert(&programs.mkcert, files, hosts) {
        Ok(()) if files.exist() => return Ok(CertTool::Mkcert),
        Ok(()) => "mkcert reported success but wrote no files".to_string(),
        Err(e) => e,
    };
    log::warn!("mkcert failed: {mkcert_err}");

    let openssl_err = match with_openssl(&programs.openssl, files) {
        Ok(()) if files.exist() => {
            log::warn!("Using a self-signed certificate; browsers will show a warning");
            return Ok(CertTool::Openssl);
        }
        Ok(()) => "openssl reported success but wrote no files".to_string(),
        Err(e) => e,
    };
    log::warn!("openssl failed: {openssl_err}");

    Err(Error::certificate(format!(
        "could not create {} and {}.\n  mkcert: {mkcert_err}\n  openssl: {openssl_err}\n\
         Install mkcert (macOS: `brew install mkcert`, Linux: see \
         https://github.com/FiloSottile/mkcert) and run this command again.",
        files.cert.display(),
        files.key.display()
    )))
}
