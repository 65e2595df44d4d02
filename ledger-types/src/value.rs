//! Canonical fixed-point decimal values
//!
//! The protocol stores every quantity as a sign, a 16-digit mantissa and
//! a bounded power-of-ten exponent (issued currencies), or as an integer
//! count of drops (the native asset). All arithmetic here is integer
//! arithmetic with the protocol's mandated rounding; no floating point
//! touches a value on the hashing/signing path.
//!
//! # Invariants
//!
//! - Issued nonzero values keep the mantissa in [10^15, 10^16) and the
//!   exponent in [-96, 80]; zero is positive with a reserved exponent.
//! - Native values keep the exponent at 0 and the drop count <= 9*10^18.
//! - Values are immutable; every operation returns a new canonical value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// Smallest canonical mantissa for a nonzero issued value
pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;

/// Largest canonical mantissa for an issued value
pub const MAX_MANTISSA: u64 = 9_999_999_999_999_999;

/// Smallest canonical exponent; anything below collapses to zero
pub const MIN_EXPONENT: i64 = -96;

/// Largest canonical exponent; anything above is an overflow
pub const MAX_EXPONENT: i64 = 80;

/// Largest representable drop count for the native asset
pub const MAX_NATIVE: u64 = 9_000_000_000_000_000_000;

/// Drops per display unit of the native asset
pub const DROPS_PER_UNIT: u64 = 1_000_000;

/// Reserved exponent marking an issued zero
const ZERO_EXPONENT: i64 = -100;

/// Exponent bias used by the 8-byte wire form
const EXPONENT_BIAS: i64 = 97;

/// Wire bit marking an issued (non-native) value
const NOT_NATIVE_BIT: u64 = 1 << 63;

/// Wire bit marking a non-negative value
const POSITIVE_BIT: u64 = 1 << 62;

/// Wire mask for the issued mantissa (54 bits)
const MANTISSA_MASK: u64 = (1 << 54) - 1;

/// Wire mask for the native drop count (62 bits)
const NATIVE_MASK: u64 = (1 << 62) - 1;

/// Divisor applied to the double-width multiply intermediate
const MULTIPLY_SCALE: u128 = 100_000_000_000_000;

/// Multiplier applied to the dividend before long division
const DIVIDE_SCALE: u128 = 100_000_000_000_000_000;

/// Canonical fixed-point decimal value
///
/// Either a native drop count or an issued mantissa/exponent pair; see
/// the module docs for the canonical-form invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    /// Native asset (drops) rather than issued currency
    native: bool,
    /// Sign; canonical zero is always positive
    negative: bool,
    /// Mantissa, or the drop count for native values
    mantissa: u64,
    /// Power-of-ten exponent; 0 for native values
    exponent: i64,
}

impl Value {
    /// Zero of the requested nativeness
    pub fn zero(native: bool) -> Self {
        Self {
            native,
            negative: false,
            mantissa: 0,
            exponent: if native { 0 } else { ZERO_EXPONENT },
        }
    }

    /// Native value from a signed drop count
    pub fn from_drops(drops: i64) -> Self {
        Self {
            native: true,
            negative: drops < 0 && drops != 0,
            mantissa: drops.unsigned_abs(),
            exponent: 0,
        }
    }

    /// Issued value from sign, mantissa and exponent, canonicalized
    pub fn new_issued(negative: bool, mantissa: u64, exponent: i64) -> Result<Self> {
        Self::canonical_issued(negative, mantissa, exponent)
    }

    /// Parse the decimal grammar `[sign]digits[.digits][(e|E)[sign]digits]`
    ///
    /// Native parsing treats input containing a decimal point as display
    /// units (scaled by the drop factor); input without one is a raw drop
    /// count.
    pub fn parse(s: &str, native: bool) -> Result<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let mut negative = false;
        match bytes.first() {
            Some(&b'+') => pos += 1,
            Some(&b'-') => {
                negative = true;
                pos += 1;
            }
            _ => {}
        }

        let mut mantissa: u64 = 0;
        let push_digit = |mantissa: &mut u64, d: u8| -> Result<()> {
            *mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(d)))
                .ok_or_else(|| Error::Overlong(s.to_string()))?;
            Ok(())
        };

        let mut int_digits = 0;
        while let Some(d) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
            push_digit(&mut mantissa, d - b'0')?;
            int_digits += 1;
            pos += 1;
        }
        if int_digits == 0 {
            return Err(Error::Malformed(s.to_string()));
        }

        let mut frac_digits: i64 = 0;
        let mut has_point = false;
        if bytes.get(pos) == Some(&b'.') {
            has_point = true;
            pos += 1;
            while let Some(d) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                push_digit(&mut mantissa, d - b'0')?;
                frac_digits += 1;
                pos += 1;
            }
            if frac_digits == 0 {
                return Err(Error::Malformed(s.to_string()));
            }
        }

        let mut exponent: i64 = 0;
        if matches!(bytes.get(pos), Some(&b'e') | Some(&b'E')) {
            pos += 1;
            let mut exp_negative = false;
            match bytes.get(pos) {
                Some(&b'+') => pos += 1,
                Some(&b'-') => {
                    exp_negative = true;
                    pos += 1;
                }
                _ => {}
            }
            let mut exp_digits = 0;
            while let Some(d) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                // Saturate: canonicalization turns extremes into
                // overflow or silent underflow as appropriate.
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(i64::from(d - b'0'));
                exp_digits += 1;
                pos += 1;
            }
            if exp_digits == 0 {
                return Err(Error::Malformed(s.to_string()));
            }
            if exp_negative {
                exponent = -exponent;
            }
        }

        if pos != bytes.len() {
            return Err(Error::Malformed(s.to_string()));
        }

        let exponent = exponent.saturating_sub(frac_digits);
        if native {
            let exponent = if has_point {
                exponent.saturating_add(6)
            } else {
                exponent
            };
            Self::canonical_native(negative, mantissa, exponent)
        } else {
            Self::canonical_issued(negative, mantissa, exponent)
        }
    }

    /// Whether this is a native (drop-count) value
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Whether the value is negative
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Mantissa (drop count for native values)
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Exponent (0 for native values, the zero sentinel for issued zero)
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Zero of the same nativeness
    pub fn zero_like(&self) -> Self {
        Self::zero(self.native)
    }

    /// Value with the opposite sign (zero stays positive)
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            Self {
                negative: !self.negative,
                ..*self
            }
        }
    }

    /// Magnitude of the value
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..*self
        }
    }

    /// Exact sum
    ///
    /// Operands of differing nativeness do not share a unit and cannot be
    /// summed. For issued values the smaller-exponent operand is
    /// right-shifted to align exponents, silently dropping digits below
    /// the larger exponent; this truncation is protocol behavior.
    pub fn add(&self, other: &Value) -> Result<Value> {
        if self.native != other.native {
            return Err(Error::IncompatibleNativeness);
        }
        if self.native {
            return Self::from_signed(true, self.signed_mantissa() + other.signed_mantissa(), 0);
        }
        if self.is_zero() {
            return Ok(*other);
        }
        if other.is_zero() {
            return Ok(*self);
        }

        let (mut ma, mut ea) = (self.signed_mantissa(), self.exponent);
        let (mut mb, mut eb) = (other.signed_mantissa(), other.exponent);
        while ea < eb {
            ma /= 10;
            ea += 1;
        }
        while eb < ea {
            mb /= 10;
            eb += 1;
        }
        Self::from_signed(false, ma + mb, ea)
    }

    /// Exact difference; same alignment rules as [`Value::add`]
    pub fn subtract(&self, other: &Value) -> Result<Value> {
        self.add(&other.negate())
    }

    /// Product with protocol rounding
    ///
    /// Issued operands are normalized into the mantissa window, multiplied
    /// through a 128-bit intermediate scaled down by 10^14, and biased by
    /// +7 before truncation. Native times native is an exact checked drop
    /// multiply.
    pub fn multiply(&self, other: &Value) -> Result<Value> {
        if self.is_zero() || other.is_zero() {
            return Ok(self.zero_like());
        }
        if self.native && other.native {
            let product = self
                .mantissa
                .checked_mul(other.mantissa)
                .filter(|p| *p <= MAX_NATIVE)
                .ok_or(Error::NativeOverflow)?;
            return Ok(Self {
                native: true,
                negative: self.negative != other.negative,
                mantissa: product,
                exponent: 0,
            });
        }

        let (ma, ea) = self.windowed();
        let (mb, eb) = other.windowed();
        let product = u128::from(ma) * u128::from(mb) / MULTIPLY_SCALE + 7;
        let signed = apply_sign(product, self.negative != other.negative);
        Self::from_signed(self.native, signed, ea + eb + 14)
    }

    /// Quotient with protocol rounding
    ///
    /// The dividend mantissa is scaled up by 10^17 through a 128-bit
    /// intermediate, divided, and biased by +5 before truncation.
    pub fn divide(&self, other: &Value) -> Result<Value> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(self.zero_like());
        }

        let (ma, ea) = self.windowed();
        let (mb, eb) = other.windowed();
        let quotient = u128::from(ma) * DIVIDE_SCALE / u128::from(mb) + 5;
        let signed = apply_sign(quotient, self.negative != other.negative);
        Self::from_signed(self.native, signed, ea - eb - 17)
    }

    /// Quotient as an issued value regardless of operand nativeness
    ///
    /// Native operands are first rescaled from drops to display units so
    /// that a ratio of native amounts is a unit-free rate.
    pub fn ratio(&self, other: &Value) -> Result<Value> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Value::zero(false));
        }
        let a = self.as_issued_units()?;
        let b = other.as_issued_units()?;
        a.divide(&b)
    }

    /// Exact ordering; no floating point involved
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if other.negative {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                return if self.negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {}
        }
        if self.negative != other.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let (ma, ea, ra) = self.windowed_sticky();
        let (mb, eb, rb) = other.windowed_sticky();
        let magnitude = ea.cmp(&eb).then(ma.cmp(&mb)).then(ra.cmp(&rb));
        if self.negative {
            magnitude.reverse()
        } else {
            magnitude
        }
    }

    /// Exact equality via [`Value::compare`]
    pub fn equals(&self, other: &Value) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Canonical 8-byte wire form
    ///
    /// Native drop counts above 62 bits have no wire representation and
    /// return an overflow.
    pub fn to_wire(&self) -> Result<[u8; 8]> {
        let bits = if self.native {
            if self.mantissa > NATIVE_MASK {
                return Err(Error::Overflow);
            }
            let sign = if self.negative { 0 } else { POSITIVE_BIT };
            sign | self.mantissa
        } else if self.is_zero() {
            NOT_NATIVE_BIT
        } else {
            let sign = if self.negative { 0 } else { POSITIVE_BIT };
            let exponent = (self.exponent + EXPONENT_BIAS) as u64;
            NOT_NATIVE_BIT | sign | (exponent << 54) | self.mantissa
        };
        Ok(bits.to_be_bytes())
    }

    /// Decode the canonical 8-byte wire form
    pub fn from_wire(bytes: [u8; 8]) -> Result<Value> {
        let bits = u64::from_be_bytes(bytes);
        if bits & NOT_NATIVE_BIT == 0 {
            let negative = bits & POSITIVE_BIT == 0;
            let mantissa = bits & NATIVE_MASK;
            if mantissa == 0 {
                if negative {
                    return Err(Error::InvalidBinary);
                }
                return Ok(Value::zero(true));
            }
            return Ok(Value {
                native: true,
                negative,
                mantissa,
                exponent: 0,
            });
        }

        if bits == NOT_NATIVE_BIT {
            return Ok(Value::zero(false));
        }
        let negative = bits & POSITIVE_BIT == 0;
        let exponent = ((bits >> 54) & 0xFF) as i64 - EXPONENT_BIAS;
        let mantissa = bits & MANTISSA_MASK;
        if !(MIN_MANTISSA..=MAX_MANTISSA).contains(&mantissa)
            || !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent)
        {
            return Err(Error::InvalidBinary);
        }
        Ok(Value {
            native: false,
            negative,
            mantissa,
            exponent,
        })
    }

    /// Approximate magnitude as a float; demurrage scaling only, never
    /// on the canonical arithmetic path
    pub(crate) fn to_f64(&self) -> f64 {
        let magnitude = self.mantissa as f64 * 10f64.powi(self.exponent as i32);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Signed mantissa widened for intermediate arithmetic
    fn signed_mantissa(&self) -> i128 {
        apply_sign(u128::from(self.mantissa), self.negative)
    }

    /// Mantissa normalized into the canonical window, exponent adjusted
    fn windowed(&self) -> (u64, i64) {
        let (m, e, _) = self.windowed_sticky();
        (m, e)
    }

    /// Windowed mantissa plus a flag for digits lost while shifting down
    fn windowed_sticky(&self) -> (u64, i64, bool) {
        let mut m = self.mantissa;
        let mut e = if self.native { 0 } else { self.exponent };
        let mut lost = false;
        while m > MAX_MANTISSA {
            lost |= m % 10 != 0;
            m /= 10;
            e += 1;
        }
        while m < MIN_MANTISSA {
            m *= 10;
            e -= 1;
        }
        (m, e, lost)
    }

    /// Issued copy with drops rescaled to display units
    fn as_issued_units(&self) -> Result<Value> {
        if !self.native {
            return Ok(*self);
        }
        Self::canonical_issued(self.negative, self.mantissa, -6)
    }

    /// Canonicalize a signed intermediate into a value
    fn from_signed(native: bool, mantissa: i128, exponent: i64) -> Result<Value> {
        let negative = mantissa < 0;
        let magnitude =
            u64::try_from(mantissa.unsigned_abs()).map_err(|_| Error::Overflow)?;
        if native {
            Self::canonical_native(negative, magnitude, exponent)
        } else {
            Self::canonical_issued(negative, magnitude, exponent)
        }
    }

    /// Canonicalize an issued value
    fn canonical_issued(negative: bool, mut mantissa: u64, mut exponent: i64) -> Result<Value> {
        if mantissa == 0 {
            return Ok(Value::zero(false));
        }
        while mantissa < MIN_MANTISSA {
            mantissa *= 10;
            exponent -= 1;
        }
        while mantissa > MAX_MANTISSA {
            mantissa /= 10;
            exponent += 1;
        }
        if exponent < MIN_EXPONENT {
            // Deliberate silent underflow
            trace!(exponent, "issued value underflowed to zero");
            return Ok(Value::zero(false));
        }
        if exponent > MAX_EXPONENT {
            return Err(Error::Overflow);
        }
        Ok(Value {
            native: false,
            negative,
            mantissa,
            exponent,
        })
    }

    /// Canonicalize a native value, shifting the exponent to 0
    fn canonical_native(negative: bool, mut mantissa: u64, mut exponent: i64) -> Result<Value> {
        if mantissa == 0 {
            return Ok(Value::zero(true));
        }
        while exponent > 0 {
            mantissa = mantissa.checked_mul(10).ok_or(Error::Overflow)?;
            exponent -= 1;
        }
        while exponent < 0 && mantissa > 0 {
            mantissa /= 10;
            exponent += 1;
        }
        if mantissa == 0 {
            // Fractional drops truncate away entirely
            trace!("native value underflowed to zero");
            return Ok(Value::zero(true));
        }
        if mantissa > MAX_NATIVE {
            return Err(Error::Overflow);
        }
        Ok(Value {
            native: true,
            negative,
            mantissa,
            exponent: 0,
        })
    }
}

/// Apply a sign to a widened magnitude
fn apply_sign(magnitude: u128, negative: bool) -> i128 {
    let m = magnitude as i128;
    if negative {
        -m
    } else {
        m
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let sign = if self.negative { "-" } else { "" };

        if self.native {
            let whole = self.mantissa / DROPS_PER_UNIT;
            let frac = self.mantissa % DROPS_PER_UNIT;
            if frac == 0 {
                return write!(f, "{}{}", sign, whole);
            }
            let frac = format!("{:06}", frac);
            return write!(f, "{}{}.{}", sign, whole, frac.trim_end_matches('0'));
        }

        let digits = self.mantissa.to_string();
        let full_len = digits.len() as i64;
        let trimmed = digits.trim_end_matches('0');

        if self.exponent != 0 && !(-25..=-5).contains(&self.exponent) {
            let exponent = self.exponent + (full_len - trimmed.len() as i64);
            return write!(f, "{}{}e{}", sign, trimmed, exponent);
        }

        // Positional decimal; the canonical exponent is close enough to
        // zero that padding stays short.
        let point = full_len + self.exponent;
        if point <= 0 {
            let zeros = "0".repeat((-point) as usize);
            write!(f, "{}0.{}{}", sign, zeros, trimmed)
        } else if point as usize >= trimmed.len() {
            let zeros = "0".repeat(point as usize - trimmed.len());
            write!(f, "{}{}{}", sign, trimmed, zeros)
        } else {
            let (whole, frac) = trimmed.split_at(point as usize);
            write!(f, "{}{}.{}", sign, whole, frac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued(s: &str) -> Value {
        Value::parse(s, false).unwrap()
    }

    fn native(s: &str) -> Value {
        Value::parse(s, true).unwrap()
    }

    #[test]
    fn test_parse_native_drops_and_units() {
        // Without a point the input is raw drops
        assert_eq!(native("1").to_string(), "0.000001");
        // With a point the input is display units
        assert_eq!(native("1.0").to_string(), "1");
        assert_eq!(native("0.5").to_string(), "0.5");
        assert_eq!(native("-3.75").to_string(), "-3.75");
    }

    #[test]
    fn test_native_addition_renders_in_units() {
        let sum = native("150").add(&native("50")).unwrap();
        assert_eq!(sum.to_string(), "0.0002");
    }

    #[test]
    fn test_canonical_scientific_rendering() {
        let value = Value::new_issued(false, 1_230_000_000_000_000, -4).unwrap();
        assert_eq!(value.to_string(), "123e9");
    }

    #[test]
    fn test_display_positional_window() {
        assert_eq!(issued("0.5").to_string(), "0.5");
        assert_eq!(issued("12.34").to_string(), "12.34");
        assert_eq!(issued("0.0001").to_string(), "0.0001");
        assert_eq!(issued("1e-30").to_string(), "1e-30");
        assert_eq!(issued("-42").to_string(), "-42");
        assert_eq!(issued("0").to_string(), "0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-", "1.", ".5", "1e", "1x", "1.2.3", "e5", "1 "] {
            assert!(
                matches!(Value::parse(bad, false), Err(Error::Malformed(_))),
                "{:?} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_parse_overlong_mantissa() {
        let err = Value::parse("123456789012345678901", false).unwrap_err();
        assert!(matches!(err, Error::Overlong(_)));
    }

    #[test]
    fn test_parse_idempotent_canonicalization() {
        for s in ["1", "0.5", "123e9", "1e-30", "-12.34", "0"] {
            let once = issued(s);
            let twice = issued(&once.to_string());
            assert_eq!(once, twice, "round-trip of {:?}", s);
        }
    }

    #[test]
    fn test_add_requires_matching_nativeness() {
        let err = native("1").add(&issued("1")).unwrap_err();
        assert_eq!(err, Error::IncompatibleNativeness);
    }

    #[test]
    fn test_add_alignment_truncates_low_digits() {
        // 1e16 has exponent 1; adding 4 truncates the low digit entirely
        let big = issued("1e16");
        let sum = big.add(&issued("4")).unwrap();
        assert_eq!(sum, big);
        // But 5 survives the right-shift... it does not: 5/10 == 0
        let sum = big.add(&issued("5")).unwrap();
        assert_eq!(sum, big);
        // A full unit of the bigger exponent does land
        let sum = big.add(&issued("10")).unwrap();
        assert_eq!(sum.to_string(), "1000000000000001e1");
    }

    #[test]
    fn test_multiply_rounds_like_the_protocol() {
        assert_eq!(issued("2").multiply(&issued("3")).unwrap().to_string(), "6");
        assert_eq!(
            issued("1.5").multiply(&issued("1.5")).unwrap().to_string(),
            "2.25"
        );
        let third = issued("1").divide(&issued("3")).unwrap();
        assert_eq!(third.to_string(), "0.3333333333333333");
        assert_eq!(issued("6").divide(&issued("2")).unwrap().to_string(), "3");
    }

    #[test]
    fn test_multiply_zero_yields_zero_like() {
        let product = native("100").multiply(&Value::zero(true)).unwrap();
        assert!(product.is_zero());
        assert!(product.is_native());
    }

    #[test]
    fn test_native_multiply_overflow() {
        let a = Value::from_drops(4_000_000_000_000_000_000);
        let err = a.multiply(&Value::from_drops(3)).unwrap_err();
        assert_eq!(err, Error::NativeOverflow);
    }

    #[test]
    fn test_divide_by_zero() {
        let err = issued("1").divide(&Value::zero(false)).unwrap_err();
        assert_eq!(err, Error::DivisionByZero);
    }

    #[test]
    fn test_ratio_of_native_operands() {
        // 1 unit over 2 units, not drops over drops
        let ratio = native("1.0").ratio(&native("2.0")).unwrap();
        assert!(!ratio.is_native());
        assert_eq!(ratio.to_string(), "0.5");
    }

    #[test]
    fn test_compare_is_exact() {
        assert_eq!(issued("1").compare(&issued("1")), Ordering::Equal);
        assert_eq!(issued("-1").compare(&issued("1")), Ordering::Less);
        assert_eq!(issued("1e10").compare(&issued("2")), Ordering::Greater);
        assert_eq!(issued("-1e10").compare(&issued("-2")), Ordering::Less);
        assert_eq!(
            Value::zero(false).compare(&issued("-1")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_underflow_collapses_to_zero() {
        let tiny = issued("1e-97");
        assert!(tiny.is_zero());
        // And zero is positive
        assert!(!tiny.is_negative());
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(Value::parse("1e96", false).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn test_wire_round_trip_issued() {
        for s in ["1", "-1", "0.5", "123e9", "1e-30", "0", "-9999999999999999e80"] {
            let value = issued(s);
            let wire = value.to_wire().unwrap();
            assert_eq!(Value::from_wire(wire).unwrap(), value, "wire of {:?}", s);
        }
    }

    #[test]
    fn test_wire_round_trip_native() {
        for drops in [0i64, 1, -1, 200, 1_000_000, -4_611_686_018_427_387_903] {
            let value = Value::from_drops(drops);
            let wire = value.to_wire().unwrap();
            assert_eq!(Value::from_wire(wire).unwrap(), value, "wire of {}", drops);
        }
    }

    #[test]
    fn test_wire_fixture_one_issued_unit() {
        // "1" of an issued currency: sign bit, exponent -15 biased to 82,
        // mantissa 10^15
        let wire = issued("1").to_wire().unwrap();
        assert_eq!(hex::encode_upper(wire), "D4838D7EA4C68000");
    }

    #[test]
    fn test_wire_fixture_zero_issued() {
        let wire = Value::zero(false).to_wire().unwrap();
        assert_eq!(hex::encode_upper(wire), "8000000000000000");
    }

    #[test]
    fn test_wire_fixture_native() {
        // 1,000,000 drops, positive bit set
        let wire = Value::from_drops(1_000_000).to_wire().unwrap();
        assert_eq!(hex::encode_upper(wire), "40000000000F4240");
    }

    #[test]
    fn test_wire_rejects_noncanonical() {
        // Negative native zero
        assert!(Value::from_wire([0u8; 8]).is_err());
        // Issued mantissa below the window
        let bits: u64 = (1 << 63) | (1 << 62) | (82u64 << 54) | 1;
        assert!(Value::from_wire(bits.to_be_bytes()).is_err());
    }

    #[test]
    fn test_negate_and_abs_produce_new_values() {
        let value = issued("-2.5");
        assert_eq!(value.negate().to_string(), "2.5");
        assert_eq!(value.abs().to_string(), "2.5");
        // Original untouched
        assert_eq!(value.to_string(), "-2.5");
        // Zero never becomes negative
        assert!(!Value::zero(false).negate().is_negative());
    }
}
