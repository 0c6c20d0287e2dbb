//! Sundry Core: shared error type, configuration, and utilities.
//!
//! Every sundry tool crate depends on this one. It has no internal sundry
//! dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error type and Result alias
//! - [`config`]: `SundryConfig` and its TOML resolution rules
//! - [`util`]: ID normalization and path helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod util;

pub use config::SundryConfig;
pub use error::{Error, Result};

pub use util::ids::{id_from_path, normalize_id};
pub use util::paths::{expand_tilde, write_atomic};
