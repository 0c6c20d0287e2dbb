//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Small tools for library sites: icons, catalogs, portals, charts, dev servers
#[derive(Parser, Debug)]
#[command(name = "sundry", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate PWA icons
    Icons {
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Icon size in pixels; repeat for several sizes
        #[arg(long = "size")]
        sizes: Vec<u32>,
    },

    /// Inspect and repair the library catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Build documentation portals
    Portal {
        #[command(subcommand)]
        action: PortalAction,
    },

    /// Render treasury ownership charts
    Chart {
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Market size in trillions the data is normalized to
        #[arg(long)]
        total: Option<f64>,

        /// Print the summary table only
        #[arg(long)]
        summary_only: bool,
    },

    /// Serve a directory for local PWA development
    Serve {
        /// Document root
        #[arg(long)]
        root: Option<PathBuf>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Serve HTTPS with a locally trusted certificate
        #[arg(long)]
        https: bool,

        /// Certificate file (PEM)
        #[arg(long, requires = "key")]
        cert: Option<PathBuf>,

        /// Private key file (PEM)
        #[arg(long, requires = "cert")]
        key: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogAction {
    /// Check structure and integrity
    Validate {
        /// Catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge a batch of details into matching records
    Enrich {
        /// JSON file of `{ "details": { id: {...} } }`
        #[arg(long)]
        batch: PathBuf,

        /// Catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add placeholder details to records without any
    Fill {
        /// Catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add missing item types and optionally drop nulls
    Migrate {
        /// Catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Remove fields whose value is null
        #[arg(long)]
        remove_nulls: bool,

        /// Report without writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PortalAction {
    /// Build one page per manifest
    Build {
        /// Portal manifest files (TOML)
        #[arg(required = true)]
        manifests: Vec<PathBuf>,

        /// Directory to write pages into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `server.http_port`
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
