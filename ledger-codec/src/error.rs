//! Error types for the canonical codec

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Codec errors
///
/// Structural errors (unknown tags, mismatched types, truncation) mean
/// the input is corrupt or not canonical: callers should reject the
/// data, not retry. Value errors bubble up from the underlying value
/// types unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Field tag not present in the registry
    #[error("unknown field: type {type_code}, ordinal {ordinal}")]
    UnknownField {
        /// Type-class code from the tag
        type_code: u8,
        /// Field ordinal from the tag
        ordinal: u8,
    },

    /// Field tag encountered twice in one object
    #[error("duplicate field: {0}")]
    DuplicateField(&'static str),

    /// Field payload does not match the registry type class
    #[error("type mismatch for field {0}")]
    TypeMismatch(&'static str),

    /// Required field absent from the object
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Transaction discriminator outside the closed variant set
    #[error("unknown transaction type {0}")]
    UnknownTransactionType(u16),

    /// Ledger-entry discriminator outside the closed variant set
    #[error("unknown ledger entry type {0:#04x}")]
    UnknownLedgerEntryType(u16),

    /// Input ended inside a field
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Malformed field tag bytes
    #[error("invalid field tag")]
    InvalidTag,

    /// Variable-length payload beyond the 3-byte prefix range
    #[error("variable-length payload too long: {0} bytes")]
    UnsupportedLength(usize),

    /// Length prefix byte outside every tier
    #[error("invalid length prefix")]
    InvalidLengthPrefix,

    /// Input continues past the end of a fixed-layout structure
    #[error("trailing bytes after fixed-layout structure")]
    TrailingBytes,

    /// Path set bytes violate the step grammar
    #[error("malformed path set")]
    MalformedPathSet,

    /// Value or identifier error from the types layer
    #[error("value error: {0}")]
    Value(#[from] ledger_types::Error),
}
