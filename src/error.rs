//! Error types.

use thiserror::Error;

/// Result alias for domr operations.
pub type Result<T> = std::result::Result<T, DomrError>;

/// Errors returned by domr operations.
///
/// Per-host resolution failures are not errors: the resolver always hands
/// back a [`ResolutionRecord`](crate::ResolutionRecord). Only input
/// acquisition and host name encoding surface here.
#[derive(Debug, Error)]
pub enum DomrError {
    /// I/O failed while reading hosts or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The hosts file could not be opened or read.
    #[error("cannot open {path}: {source}")]
    CannotOpen {
        /// The path as given on the command line.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// No host tokens were supplied at all.
    #[error("no hosts definition")]
    NoHosts,

    /// The name cannot be encoded as a DNS query name.
    #[error("invalid hostname/domain: {name} ({reason})")]
    InvalidName {
        /// The offending name, including any appended domain.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}
