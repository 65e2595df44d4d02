//! Property-based tests for canonical value invariants
//!
//! These tests use proptest to verify the core guarantees:
//! - Canonicalization is idempotent through the text form
//! - The 8-byte wire form round-trips exactly
//! - Addition is commutative and zero is its identity
//! - Nativeness never mixes silently

use ledger_types::{Amount, Error, Value};
use proptest::prelude::*;

/// Strategy for canonical issued values away from the range edges
fn issued_strategy() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        1_000_000_000_000_000u64..=9_999_999_999_999_999u64,
        -30i64..=30i64,
    )
        .prop_map(|(negative, mantissa, exponent)| {
            Value::new_issued(negative, mantissa, exponent).unwrap()
        })
}

/// Strategy for canonical issued values across the whole exponent range
fn issued_full_range_strategy() -> impl Strategy<Value = Value> {
    (
        any::<bool>(),
        1_000_000_000_000_000u64..=9_999_999_999_999_999u64,
        -96i64..=80i64,
    )
        .prop_map(|(negative, mantissa, exponent)| {
            Value::new_issued(negative, mantissa, exponent).unwrap()
        })
}

/// Strategy for native drop counts within the wire range
fn native_strategy() -> impl Strategy<Value = Value> {
    (-4_000_000_000_000_000_000i64..=4_000_000_000_000_000_000i64).prop_map(Value::from_drops)
}

proptest! {
    #[test]
    fn prop_text_round_trip_is_identity(value in issued_full_range_strategy()) {
        let reparsed = Value::parse(&value.to_string(), false).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn prop_native_text_round_trip_is_identity(value in native_strategy()) {
        let reparsed = Value::parse(&value.to_string(), true).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn prop_wire_round_trip_issued(value in issued_full_range_strategy()) {
        let wire = value.to_wire().unwrap();
        prop_assert_eq!(Value::from_wire(wire).unwrap(), value);
    }

    #[test]
    fn prop_wire_round_trip_native(value in native_strategy()) {
        let wire = value.to_wire().unwrap();
        prop_assert_eq!(Value::from_wire(wire).unwrap(), value);
    }

    #[test]
    fn prop_add_is_commutative(a in issued_strategy(), b in issued_strategy()) {
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn prop_add_zero_is_identity(value in issued_full_range_strategy()) {
        let sum = value.add(&value.zero_like()).unwrap();
        prop_assert_eq!(sum, value);
    }

    #[test]
    fn prop_subtract_self_is_zero(value in issued_strategy()) {
        let difference = value.subtract(&value).unwrap();
        prop_assert!(difference.is_zero());
        prop_assert!(!difference.is_negative());
    }

    #[test]
    fn prop_multiply_by_zero_is_zero_like(value in issued_strategy()) {
        let product = value.multiply(&Value::zero(false)).unwrap();
        prop_assert!(product.is_zero());
        prop_assert_eq!(product.is_native(), value.is_native());
    }

    #[test]
    fn prop_divide_by_zero_errors(value in issued_strategy()) {
        prop_assert_eq!(
            value.divide(&Value::zero(false)).unwrap_err(),
            Error::DivisionByZero
        );
    }

    #[test]
    fn prop_mixed_nativeness_always_errors(
        issued in issued_strategy(),
        native in native_strategy(),
    ) {
        prop_assert_eq!(
            issued.add(&native).unwrap_err(),
            Error::IncompatibleNativeness
        );
        prop_assert_eq!(
            native.subtract(&issued).unwrap_err(),
            Error::IncompatibleNativeness
        );
    }

    #[test]
    fn prop_compare_is_antisymmetric(a in issued_strategy(), b in issued_strategy()) {
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    #[test]
    fn prop_negate_is_involutive(value in issued_full_range_strategy()) {
        prop_assert_eq!(value.negate().negate(), value);
    }

    #[test]
    fn prop_serde_round_trip(value in issued_full_range_strategy()) {
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_amount_machine_round_trip(value in issued_strategy()) {
        let amount = Amount::parse(&format!(
            "{}/USD/rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            value
        ))
        .unwrap();
        let reparsed = Amount::parse(&amount.machine()).unwrap();
        prop_assert_eq!(reparsed, amount);
    }
}
