//! Handlers for the `config` subcommands.

use std::path::PathBuf;

use sundry_core::config::PROJECT_NAME;
use sundry_core::{Error, Result, SundryConfig};

use crate::cli::ConfigAction;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a `config` subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = SundryConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let value = lookup(config_path, key)?;
    println!("{}", format_toml_value(&value));
    Ok(())
}

fn lookup(config_path: Option<&str>, key: &str) -> Result<toml::Value> {
    let config = SundryConfig::load(config_path)?.to_toml_value()?;
    get_nested_value(&config, key)
        .cloned()
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a default configuration file; returns where it went.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => sundry_core::expand_tilde(p),
        None => SundryConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    let toml_str = SundryConfig::default().to_toml_string()?;
    sundry_core::write_atomic(&path, toml_str.as_bytes())?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(format_toml_value).collect();
            format!("[{}]", parts.join(", "))
        }
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_default(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SundryConfig::default().to_toml_string().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    // ------------------------------------------------------------------------
    // cmd_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_path_explicit() {
        assert!(cmd_config_path(Some("/explicit/config.toml")).is_ok());
    }

    // ------------------------------------------------------------------------
    // cmd_config_get tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_lookup_nested_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let value = lookup(Some(&path), "server.http_port").unwrap();
        assert_eq!(value, toml::Value::Integer(8000));
    }

    #[test]
    fn test_lookup_reads_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chart]\ntotal = 40.5\n").unwrap();
        let value = lookup(path.to_str(), "chart.total").unwrap();
        assert_eq!(value, toml::Value::Float(40.5));
        // Unset sections keep their defaults.
        let value = lookup(path.to_str(), "icons.sizes").unwrap();
        assert_eq!(format_toml_value(&value), "[192, 512]");
    }

    #[test]
    fn test_cmd_config_get_missing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let result = cmd_config_get(Some(&path), "nonexistent.key");
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_cmd_config_get_missing_explicit_file() {
        let result = cmd_config_get(Some("/nonexistent/sundry.toml"), "server.bind");
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------------
    // cmd_config_init tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sundry").join("config.toml");

        let written = cmd_config_init(path.to_str(), false).unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[catalog]"));
        assert!(content.contains("[server]"));
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let result = cmd_config_init(path.to_str(), false);
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_config_init(path.to_str(), true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("http_port"));
    }

    // ------------------------------------------------------------------------
    // get_nested_value tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value_top_level() {
        let val: toml::Value = toml::from_str("port = 8080").unwrap();
        assert_eq!(get_nested_value(&val, "port"), Some(&toml::Value::Integer(8080)));
    }

    #[test]
    fn test_get_nested_value_nested() {
        let val: toml::Value = toml::from_str("[server]\nport = 3000").unwrap();
        assert_eq!(
            get_nested_value(&val, "server.port"),
            Some(&toml::Value::Integer(3000))
        );
    }

    #[test]
    fn test_get_nested_value_through_scalar() {
        let val: toml::Value = toml::from_str("port = 8080").unwrap();
        assert!(get_nested_value(&val, "port.inner").is_none());
    }

    // ------------------------------------------------------------------------
    // format_toml_value tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_format_toml_value_scalars() {
        assert_eq!(format_toml_value(&toml::Value::String("x".into())), "x");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
        assert_eq!(format_toml_value(&toml::Value::Float(36.0)), "36");
    }
}
