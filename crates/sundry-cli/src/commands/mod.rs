//! Handlers for the tool subcommands.
//!
//! Each handler takes the loaded configuration plus its flags; flags win
//! over configuration values.

pub mod catalog;
pub mod chart;
pub mod icons;
pub mod portal;
pub mod serve;

/// Whether a command succeeded in the sense that matters for the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything went fine.
    Ok,
    /// The command ran but found problems (e.g. an invalid catalog).
    Problems,
}
