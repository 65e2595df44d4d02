//! Payment path sets
//!
//! A path set is a list of paths; a path is a list of steps. Each step
//! names any of an account to ripple through, a currency to convert to,
//! and an issuer, flagged in a leading type byte. Paths are separated by
//! 0xFF and the whole set ends with 0x00.

use crate::decode::Reader;
use crate::error::{Error, Result};
use bytes::{BufMut, BytesMut};
use ledger_types::{AccountId, Currency};

/// Step flag: an account to ripple through
const STEP_ACCOUNT: u8 = 0x01;
/// Step flag: a currency to convert into
const STEP_CURRENCY: u8 = 0x10;
/// Step flag: an issuer for the new currency
const STEP_ISSUER: u8 = 0x20;
/// Separator between paths
const PATH_BOUNDARY: u8 = 0xFF;
/// Terminator of the whole set
const PATH_SET_END: u8 = 0x00;

/// One step along a payment path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStep {
    /// Account to ripple through
    pub account: Option<AccountId>,
    /// Currency to convert into
    pub currency: Option<Currency>,
    /// Issuer of the new currency
    pub issuer: Option<AccountId>,
}

impl PathStep {
    fn type_byte(&self) -> u8 {
        let mut byte = 0;
        if self.account.is_some() {
            byte |= STEP_ACCOUNT;
        }
        if self.currency.is_some() {
            byte |= STEP_CURRENCY;
        }
        if self.issuer.is_some() {
            byte |= STEP_ISSUER;
        }
        byte
    }
}

/// One payment path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(pub Vec<PathStep>);

/// A set of alternative payment paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet(pub Vec<Path>);

impl PathSet {
    /// Whether the set holds no paths
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize the step/boundary byte layout
    pub(crate) fn write(&self, buf: &mut BytesMut) -> Result<()> {
        for (index, path) in self.0.iter().enumerate() {
            if index > 0 {
                buf.put_u8(PATH_BOUNDARY);
            }
            if path.0.is_empty() {
                return Err(Error::MalformedPathSet);
            }
            for step in &path.0 {
                let type_byte = step.type_byte();
                if type_byte == 0 {
                    return Err(Error::MalformedPathSet);
                }
                buf.put_u8(type_byte);
                if let Some(account) = &step.account {
                    buf.put_slice(account.as_bytes());
                }
                if let Some(currency) = &step.currency {
                    buf.put_slice(currency.as_bytes());
                }
                if let Some(issuer) = &step.issuer {
                    buf.put_slice(issuer.as_bytes());
                }
            }
        }
        buf.put_u8(PATH_SET_END);
        Ok(())
    }

    /// Parse the step/boundary byte layout
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<PathSet> {
        let mut paths = Vec::new();
        let mut current = Path::default();
        loop {
            let marker = reader.u8()?;
            match marker {
                PATH_SET_END => {
                    if current.0.is_empty() {
                        return Err(Error::MalformedPathSet);
                    }
                    paths.push(current);
                    return Ok(PathSet(paths));
                }
                PATH_BOUNDARY => {
                    if current.0.is_empty() {
                        return Err(Error::MalformedPathSet);
                    }
                    paths.push(std::mem::take(&mut current));
                }
                type_byte => {
                    if type_byte & !(STEP_ACCOUNT | STEP_CURRENCY | STEP_ISSUER) != 0 {
                        return Err(Error::MalformedPathSet);
                    }
                    let mut step = PathStep::default();
                    if type_byte & STEP_ACCOUNT != 0 {
                        step.account = Some(AccountId::from_slice(reader.take(20)?)?);
                    }
                    if type_byte & STEP_CURRENCY != 0 {
                        step.currency = Some(Currency::from_slice(reader.take(20)?)?);
                    }
                    if type_byte & STEP_ISSUER != 0 {
                        step.issuer = Some(AccountId::from_slice(reader.take(20)?)?);
                    }
                    current.0.push(step);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(fill: u8) -> AccountId {
        AccountId::from_bytes([fill; 20])
    }

    #[test]
    fn test_path_set_round_trip() {
        let set = PathSet(vec![
            Path(vec![
                PathStep {
                    account: Some(account(1)),
                    ..Default::default()
                },
                PathStep {
                    currency: Some(Currency::from_code("USD").unwrap()),
                    issuer: Some(account(2)),
                    ..Default::default()
                },
            ]),
            Path(vec![PathStep {
                currency: Some(Currency::native()),
                ..Default::default()
            }]),
        ]);

        let mut buf = BytesMut::new();
        set.write(&mut buf).unwrap();
        // account step + currency/issuer step + boundary + currency step + end
        assert_eq!(buf.len(), 21 + 41 + 1 + 21 + 1);

        let mut reader = Reader::new(&buf);
        let parsed = PathSet::read(&mut reader).unwrap();
        assert_eq!(parsed, set);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_empty_step_is_malformed() {
        let set = PathSet(vec![Path(vec![PathStep::default()])]);
        let mut buf = BytesMut::new();
        assert_eq!(set.write(&mut buf).unwrap_err(), Error::MalformedPathSet);
    }

    #[test]
    fn test_truncated_step_is_eof() {
        let mut bytes = vec![STEP_ACCOUNT];
        bytes.extend_from_slice(&[0u8; 10]);
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            PathSet::read(&mut reader).unwrap_err(),
            Error::UnexpectedEof
        );
    }

    #[test]
    fn test_unknown_step_flag_is_malformed() {
        let bytes = [0x40u8];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            PathSet::read(&mut reader).unwrap_err(),
            Error::MalformedPathSet
        );
    }
}
