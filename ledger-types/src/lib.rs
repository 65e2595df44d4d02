//! LedgerWire value types
//!
//! Canonical decimal values, currencies, amounts and fixed-size
//! identifiers for an XRP-Ledger-compatible wire format. Everything in
//! this crate is pure data: construction canonicalizes, operations
//! return fresh values, and nothing performs I/O or reads a clock.
//!
//! # Invariants
//!
//! - Values are canonical after every operation (mantissa window,
//!   exponent bounds, positive zero)
//! - Arithmetic is integer-exact with the protocol's rounding rules;
//!   floating point only ever touches demurrage scaling
//! - Identifiers are fixed-width and checked at construction

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod amount;
pub mod base58;
pub mod currency;
pub mod error;
pub mod hash;
pub mod value;

// Re-exports
pub use amount::{ledger_time, Amount, LEDGER_EPOCH_OFFSET};
pub use base58::{Seed, Version};
pub use currency::{Currency, CurrencyKind};
pub use error::{Error, Result};
pub use hash::{sha512_half, AccountId, Hash128, Hash160, Hash256, PublicKey};
pub use value::Value;
