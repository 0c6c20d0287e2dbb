//! Configuration for the sundry tools.
//!
//! A single TOML file holds one table per tool. Every field has a default,
//! so a missing file (or a missing table) simply means defaults.
//!
//! ```toml
//! [catalog]
//! path = "data/catalog.json"
//!
//! [server]
//! root = "."
//! http_port = 8000
//! https_port = 8443
//! ```
//!
//! The file is located by [`SundryConfig::resolve_config_path`]:
//!
//! 1. an explicit path (the `--config` flag)
//! 2. the `SUNDRY_CONFIG` environment variable
//! 3. `<platform config dir>/sundry/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name used for the config directory and environment variables.
pub const PROJECT_NAME: &str = "sundry";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SUNDRY_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SundryConfig {
    /// Catalog tool settings
    pub catalog: CatalogConfig,
    /// Icon generator settings
    pub icons: IconsConfig,
    /// Dev server settings
    pub server: ServerConfig,
    /// Portal generator settings
    pub portal: PortalConfig,
    /// Chart generator settings
    pub chart: ChartConfig,
}

/// `[catalog]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the catalog JSON file
    pub path: PathBuf,
    /// Fields every record must carry
    pub required_fields: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/catalog.json"),
            required_fields: ["id", "title", "formats", "description"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// `[icons]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Output directory for `icon-<size>.png`
    pub out_dir: PathBuf,
    /// Square sizes to render
    pub sizes: Vec<u32>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("icons"),
            sizes: vec![192, 512],
        }
    }
}

/// `[server]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory served as the site root
    pub root: PathBuf,
    /// Bind address
    pub bind: String,
    /// Plain HTTP port
    pub http_port: u16,
    /// HTTPS port
    pub https_port: u16,
    /// PEM certificate for HTTPS
    pub cert_file: PathBuf,
    /// PEM private key for HTTPS
    pub key_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bind: "0.0.0.0".to_string(),
            http_port: 8000,
            https_port: 8443,
            cert_file: PathBuf::from("localhost.pem"),
            key_file: PathBuf::from("localhost-key.pem"),
        }
    }
}

/// `[portal]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Directory where portal pages are written when a manifest names a
    /// relative output file
    pub out_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
        }
    }
}

/// `[chart]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output directory for SVG charts and the dashboard
    pub out_dir: PathBuf,
    /// Market total, in trillions, that holdings are normalized to
    pub total: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("charts"),
            total: 36.0,
        }
    }
}

impl SundryConfig {
    /// Default config file location: `<config dir>/sundry/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve which config file to use.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok();
        Self::resolve_with(explicit, from_env.as_deref())
    }

    fn resolve_with(explicit: Option<&str>, from_env: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(crate::expand_tilde(path));
        }
        if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
            return Some(crate::expand_tilde(path));
        }
        Self::default_config_path()
    }

    /// Load configuration.
    ///
    /// An explicit path that does not exist is an error; an implicit one
    /// falls back to defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize as a generic TOML value, for dotted-key lookups.
    pub fn to_toml_value(&self) -> Result<toml::Value> {
        toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Defaults
    // ------------------------------------------------------------------------

    #[test]
    fn test_defaults_match_tool_conventions() {
        let config = SundryConfig::default();
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.server.https_port, 8443);
        assert_eq!(config.icons.sizes, vec![192, 512]);
        assert_eq!(config.catalog.path, PathBuf::from("data/catalog.json"));
        assert_eq!(config.chart.total, 36.0);
        assert_eq!(
            config.catalog.required_fields,
            vec!["id", "title", "formats", "description"]
        );
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = SundryConfig::from_toml_str("[server]\nhttp_port = 9000\n").unwrap();
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.server.https_port, 8443);
        assert_eq!(config.icons, IconsConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SundryConfig::from_toml_str("").unwrap();
        assert_eq!(config, SundryConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SundryConfig::from_toml_str("[server\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = SundryConfig::default();
        config.icons.sizes = vec![64, 128];
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[icons]"));
        assert_eq!(SundryConfig::from_toml_str(&text).unwrap(), config);
    }

    // ------------------------------------------------------------------------
    // Resolution and loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_prefers_explicit() {
        let path = SundryConfig::resolve_with(Some("/a/config.toml"), Some("/b/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/a/config.toml")));
    }

    #[test]
    fn test_resolve_uses_env_value() {
        let path = SundryConfig::resolve_with(None, Some("/b/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/b/config.toml")));
    }

    #[test]
    fn test_resolve_ignores_blank_env_value() {
        let path = SundryConfig::resolve_with(None, Some("  "));
        assert_eq!(path, SundryConfig::default_config_path());
    }

    #[test]
    fn test_load_explicit_missing_is_error() {
        let err = SundryConfig::load(Some("/nonexistent/sundry.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\npath = \"cat.json\"\n").unwrap();
        let config = SundryConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("cat.json"));
    }

    #[test]
    fn test_to_toml_value_has_tables() {
        let value = SundryConfig::default().to_toml_value().unwrap();
        let table = value.as_table().unwrap();
        for key in ["catalog", "icons", "server", "portal", "chart"] {
            assert!(table.contains_key(key), "missing [{key}]");
        }
    }
}
