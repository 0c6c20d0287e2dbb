//! Utility modules for ID handling and paths.
//!
//! # Modules
//!
//! - [`ids`]: ID normalization and computation
//! - [`paths`]: Tilde expansion and atomic file writes

pub mod ids;
pub mod paths;
