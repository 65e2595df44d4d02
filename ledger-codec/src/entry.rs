//! Ledger entries: the closed state-object variant set
//!
//! Entries carry two distinct identifiers: the ledger index, a stable
//! lookup key derived from identity fields, and the content hash, which
//! changes whenever the entry's fields change. Index derivations live in
//! [`crate::hashing`]; each variant here knows which of its fields feed
//! its index.

use crate::decode::decode;
use crate::encode::{encode, EncodeMode};
use crate::error::{Error, Result};
use crate::fields::{self, FieldId};
use crate::hashing;
use crate::object::{FieldValue, StObject};
use crate::tx::check_known_fields;
use ledger_types::{AccountId, Amount, Hash128, Hash256};
use std::fmt;

/// Ledger-entry discriminator codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEntryType {
    /// An account and its native balance
    AccountRoot,
    /// An offer resting on the exchange
    Offer,
    /// A trust line between two accounts
    RippleState,
}

impl LedgerEntryType {
    /// Wire code of this entry type
    pub fn code(self) -> u16 {
        match self {
            LedgerEntryType::AccountRoot => 0x61,
            LedgerEntryType::Offer => 0x6F,
            LedgerEntryType::RippleState => 0x72,
        }
    }

    /// Type for a wire code, if it is in the variant set
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x61 => Some(LedgerEntryType::AccountRoot),
            0x6F => Some(LedgerEntryType::Offer),
            0x72 => Some(LedgerEntryType::RippleState),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LedgerEntryType::AccountRoot => "AccountRoot",
            LedgerEntryType::Offer => "Offer",
            LedgerEntryType::RippleState => "RippleState",
        };
        write!(f, "{}", name)
    }
}

/// An account and its native balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRoot {
    /// The account
    pub account: AccountId,
    /// Native balance in drops
    pub balance: Amount,
    /// Next valid transaction sequence
    pub sequence: u32,
    /// Number of owned ledger objects
    pub owner_count: u32,
    /// Entry flags; zero is still present on the wire
    pub flags: u32,
    /// Hash of the last transaction touching this entry
    pub previous_txn_id: Hash256,
    /// Ledger sequence of that transaction
    pub previous_txn_lgr_seq: u32,
    /// Delegated signing key
    pub regular_key: Option<AccountId>,
    /// Hash of the account's email
    pub email_hash: Option<Hash128>,
    /// Domain owned by the account
    pub domain: Option<Vec<u8>>,
    /// Encryption key for messaging
    pub message_key: Option<Vec<u8>>,
    /// Transfer fee rate in billionths
    pub transfer_rate: Option<u32>,
}

impl AccountRoot {
    const FIELDS: &'static [FieldId] = &[
        fields::LEDGER_ENTRY_TYPE,
        fields::ACCOUNT,
        fields::BALANCE,
        fields::SEQUENCE,
        fields::OWNER_COUNT,
        fields::FLAGS,
        fields::PREVIOUS_TXN_ID,
        fields::PREVIOUS_TXN_LGR_SEQ,
        fields::REGULAR_KEY,
        fields::EMAIL_HASH,
        fields::DOMAIN,
        fields::MESSAGE_KEY,
        fields::TRANSFER_RATE,
    ];

    /// Stable lookup key for this account's entry
    pub fn index(&self) -> Hash256 {
        hashing::account_index(&self.account)
    }

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::ACCOUNT, FieldValue::Account(self.account))?;
        object.set(fields::BALANCE, FieldValue::Amount(self.balance))?;
        object.set(fields::SEQUENCE, FieldValue::UInt32(self.sequence))?;
        object.set(fields::OWNER_COUNT, FieldValue::UInt32(self.owner_count))?;
        object.set(fields::FLAGS, FieldValue::UInt32(self.flags))?;
        object.set(fields::PREVIOUS_TXN_ID, FieldValue::Hash256(self.previous_txn_id))?;
        object.set(
            fields::PREVIOUS_TXN_LGR_SEQ,
            FieldValue::UInt32(self.previous_txn_lgr_seq),
        )?;
        if let Some(key) = self.regular_key {
            object.set(fields::REGULAR_KEY, FieldValue::Account(key))?;
        }
        if let Some(email_hash) = self.email_hash {
            object.set(fields::EMAIL_HASH, FieldValue::Hash128(email_hash))?;
        }
        if let Some(domain) = &self.domain {
            object.set(fields::DOMAIN, FieldValue::Blob(domain.clone()))?;
        }
        if let Some(key) = &self.message_key {
            object.set(fields::MESSAGE_KEY, FieldValue::Blob(key.clone()))?;
        }
        if let Some(rate) = self.transfer_rate {
            object.set(fields::TRANSFER_RATE, FieldValue::UInt32(rate))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[Self::FIELDS])?;
        Ok(Self {
            account: *object.expect_account(fields::ACCOUNT)?,
            balance: *object.expect_amount(fields::BALANCE)?,
            sequence: *object.expect_u32(fields::SEQUENCE)?,
            owner_count: *object.expect_u32(fields::OWNER_COUNT)?,
            flags: *object.expect_u32(fields::FLAGS)?,
            previous_txn_id: *object.expect_hash256(fields::PREVIOUS_TXN_ID)?,
            previous_txn_lgr_seq: *object.expect_u32(fields::PREVIOUS_TXN_LGR_SEQ)?,
            regular_key: object.get_account(fields::REGULAR_KEY)?.copied(),
            email_hash: object.get_hash128(fields::EMAIL_HASH)?.copied(),
            domain: object.get_blob(fields::DOMAIN)?.cloned(),
            message_key: object.get_blob(fields::MESSAGE_KEY)?.cloned(),
            transfer_rate: object.get_u32(fields::TRANSFER_RATE)?.copied(),
        })
    }
}

/// An offer resting on the exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Owning account
    pub account: AccountId,
    /// Sequence of the transaction that placed the offer
    pub sequence: u32,
    /// Amount the taker must pay
    pub taker_pays: Amount,
    /// Amount the taker gets
    pub taker_gets: Amount,
    /// Order-book directory holding this offer
    pub book_directory: Hash256,
    /// Position hint in the book directory
    pub book_node: u64,
    /// Position hint in the owner directory
    pub owner_node: u64,
    /// Entry flags
    pub flags: u32,
    /// Expiration in ledger-epoch seconds
    pub expiration: Option<u32>,
    /// Hash of the last transaction touching this entry
    pub previous_txn_id: Hash256,
    /// Ledger sequence of that transaction
    pub previous_txn_lgr_seq: u32,
}

impl Offer {
    const FIELDS: &'static [FieldId] = &[
        fields::LEDGER_ENTRY_TYPE,
        fields::ACCOUNT,
        fields::SEQUENCE,
        fields::TAKER_PAYS,
        fields::TAKER_GETS,
        fields::BOOK_DIRECTORY,
        fields::BOOK_NODE,
        fields::OWNER_NODE,
        fields::FLAGS,
        fields::EXPIRATION,
        fields::PREVIOUS_TXN_ID,
        fields::PREVIOUS_TXN_LGR_SEQ,
    ];

    /// Stable lookup key for this offer
    pub fn index(&self) -> Hash256 {
        hashing::offer_index(&self.account, self.sequence)
    }

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::ACCOUNT, FieldValue::Account(self.account))?;
        object.set(fields::SEQUENCE, FieldValue::UInt32(self.sequence))?;
        object.set(fields::TAKER_PAYS, FieldValue::Amount(self.taker_pays))?;
        object.set(fields::TAKER_GETS, FieldValue::Amount(self.taker_gets))?;
        object.set(fields::BOOK_DIRECTORY, FieldValue::Hash256(self.book_directory))?;
        object.set(fields::BOOK_NODE, FieldValue::UInt64(self.book_node))?;
        object.set(fields::OWNER_NODE, FieldValue::UInt64(self.owner_node))?;
        object.set(fields::FLAGS, FieldValue::UInt32(self.flags))?;
        if let Some(expiration) = self.expiration {
            object.set(fields::EXPIRATION, FieldValue::UInt32(expiration))?;
        }
        object.set(fields::PREVIOUS_TXN_ID, FieldValue::Hash256(self.previous_txn_id))?;
        object.set(
            fields::PREVIOUS_TXN_LGR_SEQ,
            FieldValue::UInt32(self.previous_txn_lgr_seq),
        )?;
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[Self::FIELDS])?;
        Ok(Self {
            account: *object.expect_account(fields::ACCOUNT)?,
            sequence: *object.expect_u32(fields::SEQUENCE)?,
            taker_pays: *object.expect_amount(fields::TAKER_PAYS)?,
            taker_gets: *object.expect_amount(fields::TAKER_GETS)?,
            book_directory: *object.expect_hash256(fields::BOOK_DIRECTORY)?,
            book_node: *object.expect_u64(fields::BOOK_NODE)?,
            owner_node: *object.expect_u64(fields::OWNER_NODE)?,
            flags: *object.expect_u32(fields::FLAGS)?,
            expiration: object.get_u32(fields::EXPIRATION)?.copied(),
            previous_txn_id: *object.expect_hash256(fields::PREVIOUS_TXN_ID)?,
            previous_txn_lgr_seq: *object.expect_u32(fields::PREVIOUS_TXN_LGR_SEQ)?,
        })
    }
}

/// A trust line between two accounts
///
/// The line is one shared entry; "low" and "high" refer to the byte
/// ordering of the two accounts, so both sides derive the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleState {
    /// Balance from the low account's perspective
    pub balance: Amount,
    /// Limit set by the low account
    pub low_limit: Amount,
    /// Limit set by the high account
    pub high_limit: Amount,
    /// Entry flags
    pub flags: u32,
    /// Position hint in the low account's owner directory
    pub low_node: Option<u64>,
    /// Position hint in the high account's owner directory
    pub high_node: Option<u64>,
    /// Low side incoming quality
    pub low_quality_in: Option<u32>,
    /// Low side outgoing quality
    pub low_quality_out: Option<u32>,
    /// High side incoming quality
    pub high_quality_in: Option<u32>,
    /// High side outgoing quality
    pub high_quality_out: Option<u32>,
    /// Hash of the last transaction touching this entry
    pub previous_txn_id: Hash256,
    /// Ledger sequence of that transaction
    pub previous_txn_lgr_seq: u32,
}

impl RippleState {
    const FIELDS: &'static [FieldId] = &[
        fields::LEDGER_ENTRY_TYPE,
        fields::BALANCE,
        fields::LOW_LIMIT,
        fields::HIGH_LIMIT,
        fields::FLAGS,
        fields::LOW_NODE,
        fields::HIGH_NODE,
        fields::LOW_QUALITY_IN,
        fields::LOW_QUALITY_OUT,
        fields::HIGH_QUALITY_IN,
        fields::HIGH_QUALITY_OUT,
        fields::PREVIOUS_TXN_ID,
        fields::PREVIOUS_TXN_LGR_SEQ,
    ];

    /// Stable lookup key for this trust line
    ///
    /// Derived from both participants and the currency; the account
    /// ordering inside the derivation makes it side-independent.
    pub fn index(&self) -> Hash256 {
        hashing::trust_line_index(
            self.low_limit.issuer(),
            self.high_limit.issuer(),
            self.balance.currency(),
        )
    }

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::BALANCE, FieldValue::Amount(self.balance))?;
        object.set(fields::LOW_LIMIT, FieldValue::Amount(self.low_limit))?;
        object.set(fields::HIGH_LIMIT, FieldValue::Amount(self.high_limit))?;
        object.set(fields::FLAGS, FieldValue::UInt32(self.flags))?;
        if let Some(node) = self.low_node {
            object.set(fields::LOW_NODE, FieldValue::UInt64(node))?;
        }
        if let Some(node) = self.high_node {
            object.set(fields::HIGH_NODE, FieldValue::UInt64(node))?;
        }
        if let Some(quality) = self.low_quality_in {
            object.set(fields::LOW_QUALITY_IN, FieldValue::UInt32(quality))?;
        }
        if let Some(quality) = self.low_quality_out {
            object.set(fields::LOW_QUALITY_OUT, FieldValue::UInt32(quality))?;
        }
        if let Some(quality) = self.high_quality_in {
            object.set(fields::HIGH_QUALITY_IN, FieldValue::UInt32(quality))?;
        }
        if let Some(quality) = self.high_quality_out {
            object.set(fields::HIGH_QUALITY_OUT, FieldValue::UInt32(quality))?;
        }
        object.set(fields::PREVIOUS_TXN_ID, FieldValue::Hash256(self.previous_txn_id))?;
        object.set(
            fields::PREVIOUS_TXN_LGR_SEQ,
            FieldValue::UInt32(self.previous_txn_lgr_seq),
        )?;
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[Self::FIELDS])?;
        Ok(Self {
            balance: *object.expect_amount(fields::BALANCE)?,
            low_limit: *object.expect_amount(fields::LOW_LIMIT)?,
            high_limit: *object.expect_amount(fields::HIGH_LIMIT)?,
            flags: *object.expect_u32(fields::FLAGS)?,
            low_node: object.get_u64(fields::LOW_NODE)?.copied(),
            high_node: object.get_u64(fields::HIGH_NODE)?.copied(),
            low_quality_in: object.get_u32(fields::LOW_QUALITY_IN)?.copied(),
            low_quality_out: object.get_u32(fields::LOW_QUALITY_OUT)?.copied(),
            high_quality_in: object.get_u32(fields::HIGH_QUALITY_IN)?.copied(),
            high_quality_out: object.get_u32(fields::HIGH_QUALITY_OUT)?.copied(),
            previous_txn_id: *object.expect_hash256(fields::PREVIOUS_TXN_ID)?,
            previous_txn_lgr_seq: *object.expect_u32(fields::PREVIOUS_TXN_LGR_SEQ)?,
        })
    }
}

/// Any ledger entry in the closed variant set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    /// An account and its native balance
    AccountRoot(AccountRoot),
    /// An offer resting on the exchange
    Offer(Offer),
    /// A trust line between two accounts
    RippleState(RippleState),
}

impl LedgerEntry {
    /// Discriminator of this entry
    pub fn entry_type(&self) -> LedgerEntryType {
        match self {
            LedgerEntry::AccountRoot(_) => LedgerEntryType::AccountRoot,
            LedgerEntry::Offer(_) => LedgerEntryType::Offer,
            LedgerEntry::RippleState(_) => LedgerEntryType::RippleState,
        }
    }

    /// Stable lookup key, independent of mutable content
    pub fn index(&self) -> Hash256 {
        match self {
            LedgerEntry::AccountRoot(entry) => entry.index(),
            LedgerEntry::Offer(entry) => entry.index(),
            LedgerEntry::RippleState(entry) => entry.index(),
        }
    }

    /// Convert to the generic field-tagged form
    pub fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        object.set(
            fields::LEDGER_ENTRY_TYPE,
            FieldValue::UInt16(self.entry_type().code()),
        )?;
        match self {
            LedgerEntry::AccountRoot(entry) => entry.write(&mut object)?,
            LedgerEntry::Offer(entry) => entry.write(&mut object)?,
            LedgerEntry::RippleState(entry) => entry.write(&mut object)?,
        }
        Ok(object)
    }

    /// Build from the generic form, dispatching on the discriminator
    pub fn from_object(object: &StObject) -> Result<Self> {
        let code = *object.expect_u16(fields::LEDGER_ENTRY_TYPE)?;
        let entry_type =
            LedgerEntryType::from_code(code).ok_or(Error::UnknownLedgerEntryType(code))?;
        match entry_type {
            LedgerEntryType::AccountRoot => {
                AccountRoot::read(object).map(LedgerEntry::AccountRoot)
            }
            LedgerEntryType::Offer => Offer::read(object).map(LedgerEntry::Offer),
            LedgerEntryType::RippleState => {
                RippleState::read(object).map(LedgerEntry::RippleState)
            }
        }
    }

    /// Canonical bytes in the requested mode
    pub fn encode(&self, mode: EncodeMode) -> Result<Vec<u8>> {
        encode(&self.to_object()?, mode)
    }

    /// Decode canonical bytes into a variant
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::from_object(&decode(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_types::Value;

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn account() -> AccountId {
        AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap()
    }

    /// Neutral issuer used on trust-line balances
    fn account_one() -> AccountId {
        AccountId::from_hex("0000000000000000000000000000000000000001").unwrap()
    }

    fn account_root() -> AccountRoot {
        AccountRoot {
            account: account(),
            balance: Amount::from_drops(100_000_000),
            sequence: 5,
            owner_count: 2,
            flags: 0,
            previous_txn_id: Hash256::from_bytes([7u8; 32]),
            previous_txn_lgr_seq: 123,
            regular_key: None,
            email_hash: None,
            domain: Some(b"example.com".to_vec()),
            message_key: None,
            transfer_rate: None,
        }
    }

    fn trust_line() -> RippleState {
        let currency = ledger_types::Currency::from_code("USD").unwrap();
        let balance =
            Amount::new(Value::parse("25", false).unwrap(), currency, account_one()).unwrap();
        RippleState {
            balance,
            low_limit: Amount::parse(&format!("100/USD/{}", ISSUER)).unwrap(),
            high_limit: Amount::parse("50/USD/0123456789ABCDEF0123456789ABCDEF01234567").unwrap(),
            flags: 0x0001_0000,
            low_node: Some(0),
            high_node: Some(0),
            low_quality_in: None,
            low_quality_out: None,
            high_quality_in: None,
            high_quality_out: None,
            previous_txn_id: Hash256::from_bytes([9u8; 32]),
            previous_txn_lgr_seq: 500,
        }
    }

    #[test]
    fn test_account_root_round_trip() {
        let entry = LedgerEntry::AccountRoot(account_root());
        let raw = entry.encode(EncodeMode::Raw).unwrap();
        assert_eq!(LedgerEntry::decode(&raw).unwrap(), entry);
    }

    #[test]
    fn test_ripple_state_round_trip() {
        let entry = LedgerEntry::RippleState(trust_line());
        let raw = entry.encode(EncodeMode::Raw).unwrap();
        assert_eq!(LedgerEntry::decode(&raw).unwrap(), entry);
    }

    #[test]
    fn test_offer_round_trip() {
        let entry = LedgerEntry::Offer(Offer {
            account: account(),
            sequence: 42,
            taker_pays: Amount::from_drops(7_000_000),
            taker_gets: Amount::parse(&format!("5/USD/{}", ISSUER)).unwrap(),
            book_directory: Hash256::from_bytes([3u8; 32]),
            book_node: 0,
            owner_node: 1,
            flags: 0,
            expiration: None,
            previous_txn_id: Hash256::from_bytes([1u8; 32]),
            previous_txn_lgr_seq: 77,
        });
        let raw = entry.encode(EncodeMode::Raw).unwrap();
        assert_eq!(LedgerEntry::decode(&raw).unwrap(), entry);
    }

    #[test]
    fn test_index_is_content_independent() {
        let mut entry = account_root();
        let index = entry.index();

        // Mutating content changes the bytes but not the index
        let before = LedgerEntry::AccountRoot(entry.clone())
            .encode(EncodeMode::Raw)
            .unwrap();
        entry.balance = Amount::from_drops(99_000_000);
        entry.sequence = 6;
        let after = LedgerEntry::AccountRoot(entry.clone())
            .encode(EncodeMode::Raw)
            .unwrap();
        assert_ne!(before, after);
        assert_eq!(entry.index(), index);
    }

    #[test]
    fn test_unknown_entry_type_is_rejected() {
        let mut object = StObject::new();
        object
            .set(fields::LEDGER_ENTRY_TYPE, FieldValue::UInt16(0x99))
            .unwrap();
        assert_eq!(
            LedgerEntry::from_object(&object).unwrap_err(),
            Error::UnknownLedgerEntryType(0x99)
        );
    }
}
