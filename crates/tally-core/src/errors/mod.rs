//! Error taxonomy of the scoring core.

pub mod diagnostic;

pub use diagnostic::{codes, Diagnostic, DiagnosticSink, Severity};

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or compiling a scoring configuration.
///
/// These abort before any scoring runs; problems that merely make a
/// configuration questionable surface as [`Diagnostic`]s from
/// [`crate::config::validate_config`] instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid input pattern {pattern:?} in subtask group '{group}': {message}")]
    InvalidPattern {
        group: String,
        pattern: String,
        message: String,
    },
}
