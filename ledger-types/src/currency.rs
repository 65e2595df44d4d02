//! 160-bit currency codes
//!
//! A currency is one of four layouts sharing the same 20 bytes:
//!
//! - the native marker (all zeros), rendered `XRP`
//! - a standard 3-character code at bytes 12..15
//! - a demurrage code: version byte 0x01, 3-character code, reference
//!   time, and an IEEE-754 e-folding time in seconds
//! - anything else, treated as an opaque 160-bit code in hex

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds per year used for demurrage rate display
const YEAR_SECONDS: f64 = 31_536_000.0;

/// Layout class of a currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyKind {
    /// The native asset marker
    Native,
    /// Plain 3-character code
    Standard,
    /// Code carrying demurrage parameters
    Demurrage,
    /// Unrecognized 160-bit code
    Opaque,
}

/// 160-bit currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// Code bytes
    #[serde(with = "serde_bytes")]
    bytes: [u8; 20],
}

impl Currency {
    /// The native asset marker
    pub fn native() -> Self {
        Self { bytes: [0u8; 20] }
    }

    /// Standard currency from a 3-character code
    ///
    /// The literal native code is mapped to the native marker; a standard
    /// currency must never spell the native asset.
    pub fn from_code(code: &str) -> Result<Self> {
        if code == "XRP" {
            return Ok(Self::native());
        }
        let code = code.as_bytes();
        if code.len() != 3 || !code.iter().all(|b| b.is_ascii_graphic()) {
            return Err(Error::InvalidCurrency(
                String::from_utf8_lossy(code).into_owned(),
            ));
        }
        let mut bytes = [0u8; 20];
        bytes[12..15].copy_from_slice(code);
        Ok(Self { bytes })
    }

    /// Demurrage currency from a code, reference time and e-folding time
    ///
    /// The reference time is in ledger-epoch seconds; a negative e-folding
    /// time makes the asset decay.
    pub fn demurrage(code: &str, reference_time: u32, e_folding: f64) -> Result<Self> {
        let code = code.as_bytes();
        if code.len() != 3 || !code.iter().all(|b| b.is_ascii_graphic()) {
            return Err(Error::InvalidCurrency(
                String::from_utf8_lossy(code).into_owned(),
            ));
        }
        let mut bytes = [0u8; 20];
        bytes[0] = 0x01;
        bytes[1..4].copy_from_slice(code);
        bytes[4..8].copy_from_slice(&reference_time.to_be_bytes());
        bytes[8..16].copy_from_slice(&e_folding.to_bits().to_be_bytes());
        Ok(Self { bytes })
    }

    /// Create from a byte array
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self { bytes }
    }

    /// Create from a slice, checking the length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 20] = slice.try_into().map_err(|_| Error::InvalidLength {
            expected: 20,
            actual: slice.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Create from 40 hex digits
    pub fn from_hex(s: &str) -> Result<Self> {
        let raw = hex::decode(s).map_err(|_| Error::InvalidCurrency(s.to_string()))?;
        Self::from_slice(&raw)
    }

    /// Get bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// Uppercase hex rendering of the raw code
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// Whether this is the native marker
    pub fn is_native(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Layout class of this code
    pub fn kind(&self) -> CurrencyKind {
        if self.is_native() {
            return CurrencyKind::Native;
        }
        if self.bytes[0] == 0x01 {
            return CurrencyKind::Demurrage;
        }
        let standard = self.bytes[..12].iter().all(|b| *b == 0)
            && self.bytes[15..].iter().all(|b| *b == 0)
            && self.bytes[12..15].iter().all(|b| b.is_ascii_graphic());
        if standard {
            CurrencyKind::Standard
        } else {
            CurrencyKind::Opaque
        }
    }

    /// 3-character code for standard and demurrage currencies
    pub fn code(&self) -> Option<String> {
        match self.kind() {
            CurrencyKind::Native => Some("XRP".to_string()),
            CurrencyKind::Standard => {
                Some(String::from_utf8_lossy(&self.bytes[12..15]).into_owned())
            }
            CurrencyKind::Demurrage => {
                Some(String::from_utf8_lossy(&self.bytes[1..4]).into_owned())
            }
            CurrencyKind::Opaque => None,
        }
    }

    /// Demurrage reference time in ledger-epoch seconds
    pub fn reference_time(&self) -> Option<u32> {
        match self.kind() {
            CurrencyKind::Demurrage => Some(u32::from_be_bytes(
                self.bytes[4..8].try_into().unwrap(),
            )),
            _ => None,
        }
    }

    /// Demurrage e-folding time in seconds
    pub fn e_folding(&self) -> Option<f64> {
        match self.kind() {
            CurrencyKind::Demurrage => Some(f64::from_bits(u64::from_be_bytes(
                self.bytes[8..16].try_into().unwrap(),
            ))),
            _ => None,
        }
    }

    /// Scale factor for the value of this currency at `now`
    ///
    /// Non-demurrage currencies are unaffected and return 1. Demurrage
    /// currencies scale by `exp(elapsed / e_folding)` where elapsed is
    /// measured from the code's reference time.
    ///
    /// # Panics
    ///
    /// Panics when the computed factor is non-finite or non-positive;
    /// a demurrage code yielding such a rate cannot come from a correctly
    /// constructed currency, so this is a logic error, not bad input.
    pub fn interest_factor(&self, now: i64) -> f64 {
        let (reference, e_folding) = match (self.reference_time(), self.e_folding()) {
            (Some(reference), Some(e_folding)) => (reference, e_folding),
            _ => return 1.0,
        };
        let elapsed = now as f64 - f64::from(reference);
        let factor = (elapsed / e_folding).exp();
        if !factor.is_finite() || factor <= 0.0 {
            panic!("impossible demurrage factor {} for currency {}", factor, self);
        }
        factor
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            CurrencyKind::Native => write!(f, "XRP"),
            CurrencyKind::Standard => write!(f, "{}", self.code().unwrap()),
            CurrencyKind::Demurrage => {
                let rate = (YEAR_SECONDS / self.e_folding().unwrap()).exp() - 1.0;
                write!(f, "{} ({:.2}%pa)", self.code().unwrap(), rate * 100.0)
            }
            CurrencyKind::Opaque => write!(f, "{}", hex::encode_upper(self.bytes)),
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "XRP" {
            return Ok(Self::native());
        }
        if s.len() == 3 {
            return Self::from_code(s);
        }
        if s.len() == 40 {
            return Self::from_hex(s);
        }
        Err(Error::InvalidCurrency(s.to_string()))
    }
}
