//! ECDSA keys with account-family derivation
//!
//! The root scalar comes from hashing the seed with an incrementing
//! counter until the digest is a valid scalar. Child keys add a second
//! derived scalar to the root, so any sequence number yields a fresh,
//! deterministic key, and child *public* keys are derivable from the
//! root public key alone.

use crate::error::Result;
use crate::keypair::KeyPair;
use ledger_types::{sha512_half, Hash256, PublicKey, Seed};
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey as SecpPublicKey, Scalar, SecretKey, SECP256K1};
use tracing::trace;

/// ECDSA key pair over the secp256k1 curve
#[derive(Debug, Clone)]
pub struct EcdsaKeyPair {
    /// Root private scalar (the family generator)
    root_secret: SecretKey,
    /// Root public key
    root_public: SecpPublicKey,
}

impl EcdsaKeyPair {
    /// Derive the root key pair from a seed
    pub fn from_seed(seed: &Seed) -> Self {
        let root_secret = scalar_search(|counter| {
            let mut buf = Vec::with_capacity(20);
            buf.extend_from_slice(seed.as_bytes());
            buf.extend_from_slice(&counter.to_be_bytes());
            sha512_half(&buf)
        });
        let root_public = root_secret.public_key(&SECP256K1);
        Self {
            root_secret,
            root_public,
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

    /// Key pair for a family sequence; `None` is the root pair
    fn derived_pair(&self, sequence: Option<u32>) -> (SecretKey, SecpPublicKey) {
        let sequence = match sequence {
            None => return (self.root_secret, self.root_public),
            Some(sequence) => sequence,
        };
        let root_public = self.root_public.serialize();
        let derived = scalar_search(|counter| {
            let mut buf = Vec::with_capacity(41);
            buf.extend_from_slice(&root_public);
            buf.extend_from_slice(&sequence.to_be_bytes());
            buf.extend_from_slice(&counter.to_be_bytes());
            sha512_half(&buf)
        });
        trace!(sequence, "derived family child key");
        let tweak = Scalar::from(derived);
        let secret = self
            .root_secret
            .add_tweak(&tweak)
            .expect("child scalar collapsed to zero");
        (secret, secret.public_key(&SECP256K1))
    }
}

impl KeyPair for EcdsaKeyPair {
    fn public_key(&self, sequence: Option<u32>) -> PublicKey {
        let (_, public) = self.derived_pair(sequence);
        PublicKey::from_bytes(public.serialize())
    }

    fn sign(&self, sequence: Option<u32>, hash: &Hash256) -> Vec<u8> {
        let (secret, _) = self.derived_pair(sequence);
        let message = Message::from_digest(*hash.as_bytes());
        SECP256K1
            .sign_ecdsa(&message, &secret)
            .serialize_der()
            .to_vec()
    }

    fn verify(&self, sequence: Option<u32>, hash: &Hash256, signature: &[u8]) -> bool {
        let signature = match Signature::from_der(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        let (_, public) = self.derived_pair(sequence);
        let message = Message::from_digest(*hash.as_bytes());
        SECP256K1.verify_ecdsa(&message, &signature, &public).is_ok()
    }
}

/// First counter whose digest is a valid nonzero scalar below the
/// curve order
///
/// Each attempt succeeds with overwhelming probability; the loop exists
/// for exactness, not because retries are expected.
fn scalar_search(hash_at: impl Fn(u32) -> Hash256) -> SecretKey {
    for counter in 0..=u32::MAX {
        if let Ok(secret) = SecretKey::from_slice(hash_at(counter).as_bytes()) {
            return secret;
        }
        trace!(counter, "derivation digest out of range, retrying");
    }
    unreachable!("no valid scalar in the entire counter space")
}
