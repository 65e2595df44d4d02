//! Error types for key handling

use thiserror::Error;

/// Result type for key operations
pub type Result<T> = std::result::Result<T, Error>;

/// Key errors
///
/// Signature verification failure is deliberately *not* here: a bad
/// signature is an expected, checked outcome and comes back as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Seed or identifier error from the types layer
    #[error("value error: {0}")]
    Value(#[from] ledger_types::Error),
}
