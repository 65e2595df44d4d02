//! LedgerWire canonical codec
//!
//! Field-tagged binary serialization, the closed transaction and
//! ledger-entry variant sets, and the content-hashing scheme of an
//! XRP-Ledger-compatible network. One encoder serves hashing, signing
//! and transport; the byte output is canonical regardless of how an
//! object was constructed.
//!
//! # Invariants
//!
//! - Fields serialize in (type-class, ordinal) order, always
//! - Absent fields and empty variable-length fields emit nothing
//! - Decoding never panics on untrusted bytes; corrupt input is an error
//! - The registry and hash-domain constants are compile-time data

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod decode;
pub mod encode;
pub mod entry;
pub mod error;
pub mod fields;
pub mod hashing;
pub mod meta;
pub mod object;
pub mod paths;
pub mod tx;

// Re-exports
pub use decode::{decode, Reader};
pub use encode::{encode, EncodeMode};
pub use entry::{AccountRoot, LedgerEntry, LedgerEntryType, Offer, RippleState};
pub use error::{Error, Result};
pub use fields::{FieldDef, FieldId};
pub use hashing::LedgerHeader;
pub use meta::{AffectedNode, TransactionMeta};
pub use object::{FieldValue, StObject};
pub use paths::{Path, PathSet, PathStep};
pub use tx::{
    AccountSet, Memo, OfferCancel, OfferCreate, Payment, Transaction, TransactionType, TrustSet,
    TxCommon,
};
