//! Version-byte + checksum base58 text encoding
//!
//! Addresses, seeds and public keys share one text form: a version byte,
//! the payload, and the first 4 bytes of a double SHA-256 over both,
//! base58-encoded with the protocol's own alphabet (not the Bitcoin one).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Protocol base58 alphabet
const LEDGER_ALPHABET: bs58::Alphabet =
    bs58::Alphabet::new_unwrap(b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz");

/// Version byte identifying what a base58 payload is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Account address (`r...`)
    Account,
    /// Node public key (`n...`)
    NodePublic,
    /// Family seed (`s...`)
    FamilySeed,
    /// Account public key
    AccountPublic,
}

impl Version {
    /// The version byte on the wire
    pub fn byte(self) -> u8 {
        match self {
            Version::Account => 0x00,
            Version::NodePublic => 0x1C,
            Version::FamilySeed => 0x21,
            Version::AccountPublic => 0x23,
        }
    }
}

/// First 4 bytes of SHA-256(SHA-256(data))
fn checksum(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut check = [0u8; 4];
    check.copy_from_slice(&second[..4]);
    check
}

/// Encode `version || payload || checksum` as base58 text
pub fn encode_versioned(version: Version, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 5);
    data.push(version.byte());
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    bs58::encode(data).with_alphabet(&LEDGER_ALPHABET).into_string()
}

/// Decode base58 text, verifying checksum and version byte
///
/// Returns the payload without the version byte. A checksum failure
/// means a mistyped or corrupted string; a version mismatch means a
/// well-formed string of the wrong kind (e.g. an address where a seed
/// was expected).
pub fn decode_versioned(s: &str, expected: Version) -> Result<Vec<u8>> {
    let raw = bs58::decode(s)
        .with_alphabet(&LEDGER_ALPHABET)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding(s.to_string()))?;
    if raw.len() < 5 {
        return Err(Error::InvalidEncoding(s.to_string()));
    }

    let (data, check) = raw.split_at(raw.len() - 4);
    if checksum(data) != check {
        return Err(Error::ChecksumMismatch);
    }
    if data[0] != expected.byte() {
        return Err(Error::VersionMismatch {
            expected: expected.byte(),
            actual: data[0],
        });
    }
    Ok(data[1..].to_vec())
}

/// 128-bit seed for key derivation
///
/// Seeds are the root secret: anyone holding the seed can derive every
/// key in the account family. The text form is the `s...` family-seed
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Seed bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 16],
}

impl Seed {
    /// Create from a byte array
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Create from a slice, checking the length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = slice.try_into().map_err(|_| Error::InvalidLength {
            expected: 16,
            actual: slice.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Derive a seed from a passphrase
    ///
    /// The seed is the first 16 bytes of SHA-512 over the raw passphrase
    /// bytes, matching the reference network's wallet tooling.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let digest = Sha512::digest(passphrase.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self { bytes }
    }

    /// Generate a random seed
    pub fn random() -> Self {
        Self {
            bytes: rand::random::<[u8; 16]>(),
        }
    }

    /// Get bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_versioned(Version::FamilySeed, &self.bytes))
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let payload = decode_versioned(s, Version::FamilySeed)?;
        Self::from_slice(&payload)
    }
}
