//! LedgerWire key derivation and signing
//!
//! ECDSA account-family derivation, Ed25519 keys, and signature
//! checking over signing hashes. Keys are derived from 16-byte seeds
//! (or passphrases) and addressed by the base58 account form of
//! RIPEMD-160(SHA-256(public key)).
//!
//! # Invariants
//!
//! - Derivation is deterministic: one seed and sequence always yield
//!   the same key on every machine
//! - Ed25519 rejects family sequences loudly; it never signs with a
//!   silently substituted key
//! - Verification failure is a `false`, never an error

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod ecdsa;
pub mod ed25519;
pub mod error;
pub mod keypair;

// Re-exports
pub use ecdsa::EcdsaKeyPair;
pub use ed25519::Ed25519KeyPair;
pub use error::{Error, Result};
pub use keypair::{account_id_for_key, verify_signature, KeyPair};
