//! Key-pair trait and account derivation
//!
//! Both signature schemes expose the same surface: derive a public key
//! for a family sequence, sign a 32-byte signing hash, check a
//! signature. Accounts are addressed by RIPEMD-160(SHA-256(key)) of the
//! compressed public key, whatever the scheme.

use ledger_types::{AccountId, Hash256, PublicKey};
use ripemd::Ripemd160;
use secp256k1::ecdsa::Signature as EcdsaSignature;
use secp256k1::{Message, PublicKey as SecpPublicKey, SECP256K1};
use sha2::{Digest, Sha256};

/// A key pair able to sign ledger signing hashes
///
/// `sequence` selects a child key of the account family; `None` means
/// the root key itself.
pub trait KeyPair {
    /// Public key for a family sequence
    fn public_key(&self, sequence: Option<u32>) -> PublicKey;

    /// Sign a signing hash with the key for `sequence`
    fn sign(&self, sequence: Option<u32>, hash: &Hash256) -> Vec<u8>;

    /// Check a signature against the key for `sequence`
    ///
    /// A bad signature is an expected outcome, not an error.
    fn verify(&self, sequence: Option<u32>, hash: &Hash256, signature: &[u8]) -> bool;

    /// Account identifier for a family sequence
    fn account_id(&self, sequence: Option<u32>) -> AccountId {
        account_id_for_key(&self.public_key(sequence))
    }

    /// Base58 address for a family sequence
    fn address(&self, sequence: Option<u32>) -> String {
        self.account_id(sequence).to_string()
    }
}

/// Account identifier of a public key
pub fn account_id_for_key(key: &PublicKey) -> AccountId {
    let sha = Sha256::digest(key.as_bytes());
    let ripe = Ripemd160::digest(sha);
    AccountId::from_bytes(ripe.into())
}

/// Check a signature given only the public key
///
/// The key's prefix byte selects the scheme: 0xED is Ed25519, anything
/// else is compressed ECDSA with a DER signature.
pub fn verify_signature(key: &PublicKey, hash: &Hash256, signature: &[u8]) -> bool {
    if key.is_ed25519() {
        let mut point = [0u8; 32];
        point.copy_from_slice(&key.as_bytes()[1..]);
        let verifying = match ed25519_dalek::VerifyingKey::from_bytes(&point) {
            Ok(verifying) => verifying,
            Err(_) => return false,
        };
        let signature = match ed25519_dalek::Signature::from_slice(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        use ed25519_dalek::Verifier;
        verifying.verify(hash.as_bytes(), &signature).is_ok()
    } else {
        let public = match SecpPublicKey::from_slice(key.as_bytes()) {
            Ok(public) => public,
            Err(_) => return false,
        };
        let signature = match EcdsaSignature::from_der(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        let message = Message::from_digest(*hash.as_bytes());
        SECP256K1.verify_ecdsa(&message, &signature, &public).is_ok()
    }
}
