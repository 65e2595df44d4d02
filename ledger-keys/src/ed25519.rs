//! Ed25519 keys
//!
//! One seed, one key: Ed25519 has no account-family derivation. Passing
//! any sequence number is a caller bug and aborts immediately rather
//! than silently signing with the root key.

use crate::error::Result;
use crate::keypair::KeyPair;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier};
use ledger_types::{sha512_half, Hash256, PublicKey, Seed};

/// Ed25519 key pair
#[derive(Debug, Clone)]
pub struct Ed25519KeyPair {
    /// Signing key expanded from the seed
    signing: SigningKey,
}

impl Ed25519KeyPair {
    /// Derive the key pair from a seed
    ///
    /// The private key is the half-SHA-512 expansion of the 16-byte
    /// seed, matching the reference network.
    pub fn from_seed(seed: &Seed) -> Self {
        let expanded = sha512_half(seed.as_bytes());
        Self {
            signing: SigningKey::from_bytes(expanded.as_bytes()),
        }
    }

    /// Derive from a passphrase (seed = half-SHA-512 of the text)
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::from_seed(&Seed::from_passphrase(passphrase))
    }

    /// Derive from the base58 `s...` seed encoding
    pub fn from_encoded_seed(encoded: &str) -> Result<Self> {
        let seed: Seed = encoded.parse()?;
        Ok(Self::from_seed(&seed))
    }

    /// Abort on any family sequence
    ///
    /// # Panics
    ///
    /// Panics when `sequence` is not `None`; account families are an
    /// ECDSA feature and ignoring the argument would silently sign with
    /// the wrong key.
    fn require_root(sequence: Option<u32>) {
        if sequence.is_some() {
            panic!("Ed25519 keys do not support account-family sequences");
        }
    }
}

impl KeyPair for Ed25519KeyPair {
    fn public_key(&self, sequence: Option<u32>) -> PublicKey {
        Self::require_root(sequence);
        let mut bytes = [0u8; 33];
        bytes[0] = 0xED;
        bytes[1..].copy_from_slice(self.signing.verifying_key().as_bytes());
        PublicKey::from_bytes(bytes)
    }

    fn sign(&self, sequence: Option<u32>, hash: &Hash256) -> Vec<u8> {
        Self::require_root(sequence);
        self.signing.sign(hash.as_bytes()).to_bytes().to_vec()
    }

    fn verify(&self, sequence: Option<u32>, hash: &Hash256, signature: &[u8]) -> bool {
        Self::require_root(sequence);
        let signature = match Signature::from_slice(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        self.signing
            .verifying_key()
            .verify(hash.as_bytes(), &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::verify_signature;

    fn key() -> Ed25519KeyPair {
        Ed25519KeyPair::from_passphrase("masterpassphrase")
    }

    #[test]
    fn test_public_key_carries_the_scheme_prefix() {
        let public = key().public_key(None);
        assert!(public.is_ed25519());
        assert_eq!(public.as_bytes()[0], 0xED);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = key();
        let hash = Hash256::from_bytes([0x11u8; 32]);
        let signature = key.sign(None, &hash);
        assert_eq!(signature.len(), 64);
        assert!(key.verify(None, &hash, &signature));

        // Tampered hash fails
        let other = Hash256::from_bytes([0x12u8; 32]);
        assert!(!key.verify(None, &other, &signature));

        // Free-standing verification against the public key agrees
        assert!(verify_signature(&key.public_key(None), &hash, &signature));
    }

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(
            key().public_key(None).as_bytes(),
            key().public_key(None).as_bytes()
        );
    }

    #[test]
    #[should_panic(expected = "account-family sequences")]
    fn test_sequence_argument_aborts() {
        let _ = key().public_key(Some(0));
    }

    #[test]
    #[should_panic(expected = "account-family sequences")]
    fn test_sequence_argument_aborts_signing() {
        let _ = key().sign(Some(1), &Hash256::from_bytes([0u8; 32]));
    }
}
