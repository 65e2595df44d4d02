//! Amounts: a value plus the asset it is denominated in
//!
//! Native amounts are a bare drop count; issued amounts carry a currency
//! code and the issuing account. Demurrage currencies are time-adjusted
//! through an explicit `now` argument; the core never reads a clock.

use crate::currency::Currency;
use crate::error::{Error, Result};
use crate::hash::AccountId;
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Unix timestamp of the ledger epoch (2000-01-01T00:00:00Z)
pub const LEDGER_EPOCH_OFFSET: i64 = 946_684_800;

/// Convert a wall-clock time to ledger-epoch seconds
pub fn ledger_time(now: DateTime<Utc>) -> i64 {
    now.timestamp() - LEDGER_EPOCH_OFFSET
}

/// A value denominated in a concrete asset
///
/// Invariant: native amounts carry the native currency marker and a zero
/// issuer; issued amounts require a non-zero issuer.
///
/// Arithmetic checks only nativeness compatibility, exactly like the
/// reference network: adding amounts of different currencies or issuers
/// is not rejected here. Callers are responsible for operating on
/// matching assets only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Numeric value
    value: Value,
    /// Asset denomination
    currency: Currency,
    /// Issuing account; zero for native amounts
    issuer: AccountId,
}

impl Amount {
    /// Build an amount, enforcing the nativeness/issuer invariant
    pub fn new(value: Value, currency: Currency, issuer: AccountId) -> Result<Self> {
        if value.is_native() != currency.is_native() {
            return Err(Error::InvalidAmount(format!(
                "value and currency disagree on nativeness: {} vs {}",
                value, currency
            )));
        }
        if value.is_native() && !issuer.is_zero() {
            return Err(Error::InvalidAmount(
                "native amounts take no issuer".to_string(),
            ));
        }
        if !value.is_native() && issuer.is_zero() {
            return Err(Error::MissingIssuer(value.to_string()));
        }
        Ok(Self {
            value,
            currency,
            issuer,
        })
    }

    /// Native amount from a signed drop count
    pub fn from_drops(drops: i64) -> Self {
        Self {
            value: Value::from_drops(drops),
            currency: Currency::native(),
            issuer: AccountId::zero(),
        }
    }

    /// Parse `value[/currency[/issuer]]`
    ///
    /// A missing currency segment means the native asset, as does a
    /// literal native code; issued currencies require an issuer segment.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, '/');
        let value_part = parts.next().unwrap_or_default();
        let currency_part = parts.next();
        let issuer_part = parts.next();

        let currency = match currency_part {
            None => Currency::native(),
            Some(c) => c.parse::<Currency>()?,
        };
        if currency.is_native() {
            if issuer_part.is_some() {
                return Err(Error::InvalidAmount(s.to_string()));
            }
            let value = Value::parse(value_part, true)?;
            return Ok(Self {
                value,
                currency,
                issuer: AccountId::zero(),
            });
        }

        let issuer = match issuer_part {
            Some(i) => parse_issuer(i)?,
            None => return Err(Error::MissingIssuer(s.to_string())),
        };
        let value = Value::parse(value_part, false)?;
        Self::new(value, currency, issuer)
    }

    /// Numeric value as stored (pre-interest)
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Asset denomination
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Issuing account; zero for native amounts
    pub fn issuer(&self) -> &AccountId {
        &self.issuer
    }

    /// Whether this is a native amount
    pub fn is_native(&self) -> bool {
        self.value.is_native()
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Amount with demurrage interest applied at `now`
    ///
    /// Non-demurrage currencies come back unchanged. The adjusted value
    /// travels through the decimal grammar so scaling picks up the same
    /// canonicalization as any parsed value.
    pub fn apply_interest(&self, now: DateTime<Utc>) -> Result<Self> {
        let factor = self.currency.interest_factor(ledger_time(now));
        if factor == 1.0 {
            return Ok(*self);
        }
        trace!(currency = %self.currency, factor, "applying demurrage interest");
        let adjusted = Value::parse(&format!("{:e}", self.value.to_f64() * factor), false)?;
        Ok(Self {
            value: adjusted,
            currency: self.currency,
            issuer: self.issuer,
        })
    }

    /// Sum at `now`; interest is applied to both operands first
    pub fn add(&self, other: &Amount, now: DateTime<Utc>) -> Result<Amount> {
        self.binary_op(other, now, Value::add)
    }

    /// Difference at `now`
    pub fn subtract(&self, other: &Amount, now: DateTime<Utc>) -> Result<Amount> {
        self.binary_op(other, now, Value::subtract)
    }

    /// Product at `now`
    pub fn multiply(&self, other: &Amount, now: DateTime<Utc>) -> Result<Amount> {
        self.binary_op(other, now, Value::multiply)
    }

    /// Quotient at `now`
    pub fn divide(&self, other: &Amount, now: DateTime<Utc>) -> Result<Amount> {
        self.binary_op(other, now, Value::divide)
    }

    /// Unit-free rate between two amounts at `now`
    pub fn ratio(&self, other: &Amount, now: DateTime<Utc>) -> Result<Value> {
        let a = self.apply_interest(now)?;
        let b = other.apply_interest(now)?;
        a.value.ratio(&b.value)
    }

    /// Amount with the value negated
    pub fn negate(&self) -> Amount {
        Amount {
            value: self.value.negate(),
            ..*self
        }
    }

    /// Stored (pre-interest) rendering, for protocol-exact round-trips
    pub fn machine(&self) -> String {
        self.render(&self.value)
    }

    /// Interest-adjusted rendering at `now`
    pub fn format_at(&self, now: DateTime<Utc>) -> Result<String> {
        let adjusted = self.apply_interest(now)?;
        Ok(self.render(adjusted.value()))
    }

    fn render(&self, value: &Value) -> String {
        if self.is_native() {
            format!("{}/XRP", value)
        } else {
            format!("{}/{}/{}", value, self.currency, self.issuer)
        }
    }

    fn binary_op(
        &self,
        other: &Amount,
        now: DateTime<Utc>,
        op: fn(&Value, &Value) -> Result<Value>,
    ) -> Result<Amount> {
        let a = self.apply_interest(now)?;
        let b = other.apply_interest(now)?;
        let value = op(&a.value, &b.value)?;
        Ok(Amount {
            value,
            currency: self.currency,
            issuer: self.issuer,
        })
    }
}

/// Issuer segment: base58 address or raw 160-bit hex
fn parse_issuer(s: &str) -> Result<AccountId> {
    match s.parse::<AccountId>() {
        Ok(account) => Ok(account),
        Err(_) if s.len() == 40 => AccountId::from_hex(s),
        Err(err) => Err(err),
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.machine())
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
