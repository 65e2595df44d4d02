//! Fixed-size identifiers and digest helpers
//!
//! All protocol identifiers are fixed-width byte arrays with exact,
//! checked construction. The half-SHA-512 digest defined here is the
//! basis of every content hash and of key derivation.

use crate::base58;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::fmt;
use std::str::FromStr;

macro_rules! impl_fixed_bytes {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Width in bytes
            pub const LEN: usize = $len;

            /// All-zero identifier
            pub fn zero() -> Self {
                Self { bytes: [0u8; $len] }
            }

            /// Create from a byte array
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self { bytes }
            }

            /// Create from a slice, checking the length
            pub fn from_slice(slice: &[u8]) -> Result<Self> {
                let bytes: [u8; $len] = slice.try_into().map_err(|_| Error::InvalidLength {
                    expected: $len,
                    actual: slice.len(),
                })?;
                Ok(Self { bytes })
            }

            /// Create from a hex string
            pub fn from_hex(s: &str) -> Result<Self> {
                let raw = hex::decode(s).map_err(|_| Error::InvalidEncoding(s.to_string()))?;
                Self::from_slice(&raw)
            }

            /// Get bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.bytes
            }

            /// Uppercase hex rendering
            pub fn to_hex(&self) -> String {
                hex::encode_upper(self.bytes)
            }

            /// Check whether every byte is zero
            pub fn is_zero(&self) -> bool {
                self.bytes.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

/// 128-bit hash (e.g. an email hash on an account)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash128 {
    /// Hash bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 16],
}

/// 160-bit hash (currency codes, compact identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash160 {
    /// Hash bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 20],
}

/// 256-bit hash (content hashes, ledger indexes, signing hashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash256 {
    /// Hash bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 32],
}

impl_fixed_bytes!(Hash128, 16);
impl_fixed_bytes!(Hash160, 20);
impl_fixed_bytes!(Hash256, 32);

impl fmt::Display for Hash128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// 160-bit account identifier
///
/// Derived from a public key as RIPEMD-160(SHA-256(key)). The text form
/// is the base58 address with version byte 0x00 and a 4-byte checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId {
    /// Account bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 20],
}

impl_fixed_bytes!(AccountId, 20);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58::encode_versioned(base58::Version::Account, &self.bytes))
    }
}

impl FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let payload = base58::decode_versioned(s, base58::Version::Account)?;
        Self::from_slice(&payload)
    }
}

/// Compressed public key (33 bytes)
///
/// ECDSA keys carry an SEC1 02/03 parity prefix; Ed25519 keys are
/// marked with a 0xED prefix byte ahead of the 32-byte point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    /// Key bytes, prefix included
    #[serde(with = "serde_bytes")]
    bytes: [u8; 33],
}

impl_fixed_bytes!(PublicKey, 33);

impl PublicKey {
    /// Check for the Ed25519 prefix byte
    pub fn is_ed25519(&self) -> bool {
        self.bytes[0] == 0xED
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            base58::encode_versioned(base58::Version::AccountPublic, &self.bytes)
        )
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let payload = base58::decode_versioned(s, base58::Version::AccountPublic)?;
        Self::from_slice(&payload)
    }
}

/// First 32 bytes of a SHA-512 digest
///
/// The protocol truncates SHA-512 instead of using SHA-256 directly;
/// every content hash and derived key is built on this primitive.
pub fn sha512_half(data: &[u8]) -> Hash256 {
    let digest = Sha512::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest[..32]);
    Hash256::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_length_check() {
        assert!(Hash256::from_slice(&[0u8; 32]).is_ok());
        let err = Hash256::from_slice(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLength {
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let hash = Hash160::from_hex("0000000000000000000000005553440000000000").unwrap();
        assert_eq!(hash.to_hex(), "0000000000000000000000005553440000000000");
    }

    #[test]
    fn test_sha512_half_width() {
        let digest = sha512_half(b"content");
        assert_eq!(digest.as_bytes().len(), 32);

        // Deterministic
        assert_eq!(digest, sha512_half(b"content"));
        assert_ne!(digest, sha512_half(b"other"));
    }

    #[test]
    fn test_account_address_round_trip() {
        // Well-known root account of the reference network
        let account = AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap();
        assert_eq!(account.to_string(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");

        let parsed: AccountId = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap();
        assert_eq!(parsed, account);
    }

    #[test]
    fn test_zero_account() {
        assert!(AccountId::zero().is_zero());
        assert!(!AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8")
            .unwrap()
            .is_zero());
    }
}
