//! Base error type.
//!
//! Sub-crates define their own error enums (`NetworkError`, `InfraError`,
//! `SimError`, `OutputError`) and either wrap `CoreError` or stay separate;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `ft-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ft-core`.
pub type CoreResult<T> = Result<T, CoreError>;
