//! Error types for ledger value and identifier handling

use thiserror::Error;

/// Result type for value/identifier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing, canonicalizing or encoding values
/// and identifiers.
///
/// Parse and range errors are ordinary, recoverable outcomes: callers
/// reject the input and move on. None of these variants indicates a bug
/// in the library itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input does not match the decimal number grammar
    #[error("malformed number: {0:?}")]
    Malformed(String),

    /// Number has more significant digits than a mantissa can carry
    #[error("number has too many digits: {0:?}")]
    Overlong(String),

    /// Magnitude exceeds the representable range
    #[error("value overflow")]
    Overflow,

    /// Native unit count exceeds the native range
    #[error("native amount overflow")]
    NativeOverflow,

    /// Division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Arithmetic across native and issued-currency values
    #[error("incompatible nativeness")]
    IncompatibleNativeness,

    /// Currency code is not native, 3-character or 40-hex
    #[error("invalid currency: {0:?}")]
    InvalidCurrency(String),

    /// Amount string or components violate the amount invariants
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Issued-currency amount without an issuer
    #[error("issued-currency amount requires an issuer: {0:?}")]
    MissingIssuer(String),

    /// Base58 payload could not be decoded
    #[error("invalid base58 encoding: {0:?}")]
    InvalidEncoding(String),

    /// Base58 checksum does not match the payload
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// Decoded version byte differs from the expected one
    #[error("version mismatch: expected {expected:#04x}, got {actual:#04x}")]
    VersionMismatch {
        /// Version byte the caller asked for
        expected: u8,
        /// Version byte found in the payload
        actual: u8,
    },

    /// Binary form violates the canonical layout
    #[error("invalid binary value")]
    InvalidBinary,

    /// Byte slice has the wrong length for a fixed-size identifier
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
    },
}
