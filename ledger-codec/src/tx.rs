//! Transactions: the closed variant set
//!
//! The protocol's transaction set is fixed and known, so variants are a
//! tagged enum matched exhaustively, not an open trait. Every variant
//! shares the common header fields and converts losslessly to and from
//! the generic field-tagged object form that the codec serializes.

use crate::decode::decode;
use crate::encode::{encode, EncodeMode};
use crate::error::{Error, Result};
use crate::fields::{self, FieldId};
use crate::object::{FieldValue, StObject};
use crate::paths::PathSet;
use ledger_types::{AccountId, Amount, Hash128, Hash256};
use std::fmt;

/// Transaction discriminator codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Move value between accounts
    Payment,
    /// Adjust account settings
    AccountSet,
    /// Place an offer on the exchange
    OfferCreate,
    /// Withdraw an offer
    OfferCancel,
    /// Create or modify a trust line
    TrustSet,
}

impl TransactionType {
    /// Wire code of this transaction type
    pub fn code(self) -> u16 {
        match self {
            TransactionType::Payment => 0,
            TransactionType::AccountSet => 3,
            TransactionType::OfferCreate => 7,
            TransactionType::OfferCancel => 8,
            TransactionType::TrustSet => 20,
        }
    }

    /// Type for a wire code, if it is in the variant set
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(TransactionType::Payment),
            3 => Some(TransactionType::AccountSet),
            7 => Some(TransactionType::OfferCreate),
            8 => Some(TransactionType::OfferCancel),
            20 => Some(TransactionType::TrustSet),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Payment => "Payment",
            TransactionType::AccountSet => "AccountSet",
            TransactionType::OfferCreate => "OfferCreate",
            TransactionType::OfferCancel => "OfferCancel",
            TransactionType::TrustSet => "TrustSet",
        };
        write!(f, "{}", name)
    }
}

/// Attached memo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memo {
    /// Memo type identifier
    pub memo_type: Option<Vec<u8>>,
    /// Memo payload
    pub memo_data: Option<Vec<u8>>,
    /// Payload format hint
    pub memo_format: Option<Vec<u8>>,
}

impl Memo {
    fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        if let Some(memo_type) = &self.memo_type {
            object.set(fields::MEMO_TYPE, FieldValue::Blob(memo_type.clone()))?;
        }
        if let Some(memo_data) = &self.memo_data {
            object.set(fields::MEMO_DATA, FieldValue::Blob(memo_data.clone()))?;
        }
        if let Some(memo_format) = &self.memo_format {
            object.set(fields::MEMO_FORMAT, FieldValue::Blob(memo_format.clone()))?;
        }
        Ok(object)
    }

    fn from_object(object: &StObject) -> Result<Self> {
        check_known_fields(
            object,
            &[&[fields::MEMO_TYPE, fields::MEMO_DATA, fields::MEMO_FORMAT]],
        )?;
        Ok(Self {
            memo_type: object.get_blob(fields::MEMO_TYPE)?.cloned(),
            memo_data: object.get_blob(fields::MEMO_DATA)?.cloned(),
            memo_format: object.get_blob(fields::MEMO_FORMAT)?.cloned(),
        })
    }
}

/// Header fields shared by every transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxCommon {
    /// Sending account
    pub account: AccountId,
    /// Transaction fee in drops
    pub fee: Amount,
    /// Account sequence number
    pub sequence: u32,
    /// Bit flags
    pub flags: Option<u32>,
    /// Last ledger this transaction may appear in
    pub last_ledger_sequence: Option<u32>,
    /// Arbitrary sender tag
    pub source_tag: Option<u32>,
    /// Hash of the account's previous transaction
    pub account_txn_id: Option<Hash256>,
    /// Attached memos
    pub memos: Vec<Memo>,
    /// Public key the signature verifies against
    pub signing_pub_key: Option<Vec<u8>>,
    /// Transaction signature; excluded from the signing form
    pub txn_signature: Option<Vec<u8>>,
}

impl TxCommon {
    /// Header with only the required fields set
    pub fn new(account: AccountId, sequence: u32, fee: Amount) -> Self {
        Self {
            account,
            fee,
            sequence,
            flags: None,
            last_ledger_sequence: None,
            source_tag: None,
            account_txn_id: None,
            memos: Vec::new(),
            signing_pub_key: None,
            txn_signature: None,
        }
    }

    /// Fields this header may occupy
    const FIELDS: &'static [FieldId] = &[
        fields::TRANSACTION_TYPE,
        fields::ACCOUNT,
        fields::FEE,
        fields::SEQUENCE,
        fields::FLAGS,
        fields::LAST_LEDGER_SEQUENCE,
        fields::SOURCE_TAG,
        fields::ACCOUNT_TXN_ID,
        fields::MEMOS,
        fields::SIGNING_PUB_KEY,
        fields::TXN_SIGNATURE,
    ];

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::ACCOUNT, FieldValue::Account(self.account))?;
        object.set(fields::FEE, FieldValue::Amount(self.fee))?;
        object.set(fields::SEQUENCE, FieldValue::UInt32(self.sequence))?;
        if let Some(flags) = self.flags {
            object.set(fields::FLAGS, FieldValue::UInt32(flags))?;
        }
        if let Some(last) = self.last_ledger_sequence {
            object.set(fields::LAST_LEDGER_SEQUENCE, FieldValue::UInt32(last))?;
        }
        if let Some(tag) = self.source_tag {
            object.set(fields::SOURCE_TAG, FieldValue::UInt32(tag))?;
        }
        if let Some(id) = self.account_txn_id {
            object.set(fields::ACCOUNT_TXN_ID, FieldValue::Hash256(id))?;
        }
        if !self.memos.is_empty() {
            let mut items = Vec::with_capacity(self.memos.len());
            for memo in &self.memos {
                items.push((fields::MEMO, memo.to_object()?));
            }
            object.set(fields::MEMOS, FieldValue::Array(items))?;
        }
        if let Some(key) = &self.signing_pub_key {
            object.set(fields::SIGNING_PUB_KEY, FieldValue::Blob(key.clone()))?;
        }
        if let Some(signature) = &self.txn_signature {
            object.set(fields::TXN_SIGNATURE, FieldValue::Blob(signature.clone()))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        let memos = match object.get_array(fields::MEMOS)? {
            None => Vec::new(),
            Some(items) => {
                let mut memos = Vec::with_capacity(items.len());
                for (id, item) in items {
                    if *id != fields::MEMO {
                        return Err(Error::TypeMismatch("Memos"));
                    }
                    memos.push(Memo::from_object(item)?);
                }
                memos
            }
        };
        Ok(Self {
            account: *object.expect_account(fields::ACCOUNT)?,
            fee: *object.expect_amount(fields::FEE)?,
            sequence: *object.expect_u32(fields::SEQUENCE)?,
            flags: object.get_u32(fields::FLAGS)?.copied(),
            last_ledger_sequence: object.get_u32(fields::LAST_LEDGER_SEQUENCE)?.copied(),
            source_tag: object.get_u32(fields::SOURCE_TAG)?.copied(),
            account_txn_id: object.get_hash256(fields::ACCOUNT_TXN_ID)?.copied(),
            memos,
            signing_pub_key: object.get_blob(fields::SIGNING_PUB_KEY)?.cloned(),
            txn_signature: object.get_blob(fields::TXN_SIGNATURE)?.cloned(),
        })
    }
}

/// Reject fields outside the variant's allowed set
pub(crate) fn check_known_fields(object: &StObject, allowed: &[&[FieldId]]) -> Result<()> {
    for id in object.field_ids() {
        if !allowed.iter().any(|set| set.contains(&id)) {
            return Err(Error::UnknownField {
                type_code: id.type_code,
                ordinal: id.ordinal,
            });
        }
    }
    Ok(())
}

/// Move value between accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Common header
    pub common: TxCommon,
    /// Amount to deliver
    pub amount: Amount,
    /// Receiving account
    pub destination: AccountId,
    /// Arbitrary destination tag
    pub destination_tag: Option<u32>,
    /// Invoice being paid
    pub invoice_id: Option<Hash256>,
    /// Maximum amount to spend
    pub send_max: Option<Amount>,
    /// Minimum amount to deliver
    pub deliver_min: Option<Amount>,
    /// Alternative payment paths
    pub paths: Option<PathSet>,
}

impl Payment {
    const FIELDS: &'static [FieldId] = &[
        fields::AMOUNT,
        fields::DESTINATION,
        fields::DESTINATION_TAG,
        fields::INVOICE_ID,
        fields::SEND_MAX,
        fields::DELIVER_MIN,
        fields::PATHS,
    ];

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::AMOUNT, FieldValue::Amount(self.amount))?;
        object.set(fields::DESTINATION, FieldValue::Account(self.destination))?;
        if let Some(tag) = self.destination_tag {
            object.set(fields::DESTINATION_TAG, FieldValue::UInt32(tag))?;
        }
        if let Some(invoice) = self.invoice_id {
            object.set(fields::INVOICE_ID, FieldValue::Hash256(invoice))?;
        }
        if let Some(send_max) = self.send_max {
            object.set(fields::SEND_MAX, FieldValue::Amount(send_max))?;
        }
        if let Some(deliver_min) = self.deliver_min {
            object.set(fields::DELIVER_MIN, FieldValue::Amount(deliver_min))?;
        }
        if let Some(paths) = &self.paths {
            object.set(fields::PATHS, FieldValue::PathSet(paths.clone()))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[TxCommon::FIELDS, Self::FIELDS])?;
        Ok(Self {
            common: TxCommon::read(object)?,
            amount: *object.expect_amount(fields::AMOUNT)?,
            destination: *object.expect_account(fields::DESTINATION)?,
            destination_tag: object.get_u32(fields::DESTINATION_TAG)?.copied(),
            invoice_id: object.get_hash256(fields::INVOICE_ID)?.copied(),
            send_max: object.get_amount(fields::SEND_MAX)?.copied(),
            deliver_min: object.get_amount(fields::DELIVER_MIN)?.copied(),
            paths: object.get_path_set(fields::PATHS)?.cloned(),
        })
    }
}

/// Adjust account settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSet {
    /// Common header
    pub common: TxCommon,
    /// Domain owned by the account
    pub domain: Option<Vec<u8>>,
    /// Hash of the account's email
    pub email_hash: Option<Hash128>,
    /// Encryption key for messaging
    pub message_key: Option<Vec<u8>>,
    /// Transfer fee rate in billionths
    pub transfer_rate: Option<u32>,
    /// Account flag to set
    pub set_flag: Option<u32>,
    /// Account flag to clear
    pub clear_flag: Option<u32>,
}

impl AccountSet {
    const FIELDS: &'static [FieldId] = &[
        fields::DOMAIN,
        fields::EMAIL_HASH,
        fields::MESSAGE_KEY,
        fields::TRANSFER_RATE,
        fields::SET_FLAG,
        fields::CLEAR_FLAG,
    ];

    fn write(&self, object: &mut StObject) -> Result<()> {
        if let Some(domain) = &self.domain {
            object.set(fields::DOMAIN, FieldValue::Blob(domain.clone()))?;
        }
        if let Some(email_hash) = self.email_hash {
            object.set(fields::EMAIL_HASH, FieldValue::Hash128(email_hash))?;
        }
        if let Some(key) = &self.message_key {
            object.set(fields::MESSAGE_KEY, FieldValue::Blob(key.clone()))?;
        }
        if let Some(rate) = self.transfer_rate {
            object.set(fields::TRANSFER_RATE, FieldValue::UInt32(rate))?;
        }
        if let Some(flag) = self.set_flag {
            object.set(fields::SET_FLAG, FieldValue::UInt32(flag))?;
        }
        if let Some(flag) = self.clear_flag {
            object.set(fields::CLEAR_FLAG, FieldValue::UInt32(flag))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[TxCommon::FIELDS, Self::FIELDS])?;
        Ok(Self {
            common: TxCommon::read(object)?,
            domain: object.get_blob(fields::DOMAIN)?.cloned(),
            email_hash: object.get_hash128(fields::EMAIL_HASH)?.copied(),
            message_key: object.get_blob(fields::MESSAGE_KEY)?.cloned(),
            transfer_rate: object.get_u32(fields::TRANSFER_RATE)?.copied(),
            set_flag: object.get_u32(fields::SET_FLAG)?.copied(),
            clear_flag: object.get_u32(fields::CLEAR_FLAG)?.copied(),
        })
    }
}

/// Place an offer on the exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCreate {
    /// Common header
    pub common: TxCommon,
    /// Amount the taker must pay
    pub taker_pays: Amount,
    /// Amount the taker gets
    pub taker_gets: Amount,
    /// Expiration in ledger-epoch seconds
    pub expiration: Option<u32>,
    /// Existing offer to replace
    pub offer_sequence: Option<u32>,
}

impl OfferCreate {
    const FIELDS: &'static [FieldId] = &[
        fields::TAKER_PAYS,
        fields::TAKER_GETS,
        fields::EXPIRATION,
        fields::OFFER_SEQUENCE,
    ];

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::TAKER_PAYS, FieldValue::Amount(self.taker_pays))?;
        object.set(fields::TAKER_GETS, FieldValue::Amount(self.taker_gets))?;
        if let Some(expiration) = self.expiration {
            object.set(fields::EXPIRATION, FieldValue::UInt32(expiration))?;
        }
        if let Some(sequence) = self.offer_sequence {
            object.set(fields::OFFER_SEQUENCE, FieldValue::UInt32(sequence))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[TxCommon::FIELDS, Self::FIELDS])?;
        Ok(Self {
            common: TxCommon::read(object)?,
            taker_pays: *object.expect_amount(fields::TAKER_PAYS)?,
            taker_gets: *object.expect_amount(fields::TAKER_GETS)?,
            expiration: object.get_u32(fields::EXPIRATION)?.copied(),
            offer_sequence: object.get_u32(fields::OFFER_SEQUENCE)?.copied(),
        })
    }
}

/// Withdraw an offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCancel {
    /// Common header
    pub common: TxCommon,
    /// Sequence of the offer to cancel
    pub offer_sequence: u32,
}

impl OfferCancel {
    const FIELDS: &'static [FieldId] = &[fields::OFFER_SEQUENCE];

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::OFFER_SEQUENCE, FieldValue::UInt32(self.offer_sequence))
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[TxCommon::FIELDS, Self::FIELDS])?;
        Ok(Self {
            common: TxCommon::read(object)?,
            offer_sequence: *object.expect_u32(fields::OFFER_SEQUENCE)?,
        })
    }
}

/// Create or modify a trust line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustSet {
    /// Common header
    pub common: TxCommon,
    /// Trust limit toward the issuer
    pub limit_amount: Amount,
    /// Quality for incoming balances, in billionths
    pub quality_in: Option<u32>,
    /// Quality for outgoing balances, in billionths
    pub quality_out: Option<u32>,
}

impl TrustSet {
    const FIELDS: &'static [FieldId] = &[
        fields::LIMIT_AMOUNT,
        fields::QUALITY_IN,
        fields::QUALITY_OUT,
    ];

    fn write(&self, object: &mut StObject) -> Result<()> {
        object.set(fields::LIMIT_AMOUNT, FieldValue::Amount(self.limit_amount))?;
        if let Some(quality) = self.quality_in {
            object.set(fields::QUALITY_IN, FieldValue::UInt32(quality))?;
        }
        if let Some(quality) = self.quality_out {
            object.set(fields::QUALITY_OUT, FieldValue::UInt32(quality))?;
        }
        Ok(())
    }

    fn read(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[TxCommon::FIELDS, Self::FIELDS])?;
        Ok(Self {
            common: TxCommon::read(object)?,
            limit_amount: *object.expect_amount(fields::LIMIT_AMOUNT)?,
            quality_in: object.get_u32(fields::QUALITY_IN)?.copied(),
            quality_out: object.get_u32(fields::QUALITY_OUT)?.copied(),
        })
    }
}

/// Any transaction in the closed variant set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Move value between accounts
    Payment(Payment),
    /// Adjust account settings
    AccountSet(AccountSet),
    /// Place an offer on the exchange
    OfferCreate(OfferCreate),
    /// Withdraw an offer
    OfferCancel(OfferCancel),
    /// Create or modify a trust line
    TrustSet(TrustSet),
}

impl Transaction {
    /// Discriminator of this transaction
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::Payment(_) => TransactionType::Payment,
            Transaction::AccountSet(_) => TransactionType::AccountSet,
            Transaction::OfferCreate(_) => TransactionType::OfferCreate,
            Transaction::OfferCancel(_) => TransactionType::OfferCancel,
            Transaction::TrustSet(_) => TransactionType::TrustSet,
        }
    }

    /// Common header fields
    pub fn common(&self) -> &TxCommon {
        match self {
            Transaction::Payment(tx) => &tx.common,
            Transaction::AccountSet(tx) => &tx.common,
            Transaction::OfferCreate(tx) => &tx.common,
            Transaction::OfferCancel(tx) => &tx.common,
            Transaction::TrustSet(tx) => &tx.common,
        }
    }

    /// Mutable common header fields
    pub fn common_mut(&mut self) -> &mut TxCommon {
        match self {
            Transaction::Payment(tx) => &mut tx.common,
            Transaction::AccountSet(tx) => &mut tx.common,
            Transaction::OfferCreate(tx) => &mut tx.common,
            Transaction::OfferCancel(tx) => &mut tx.common,
            Transaction::TrustSet(tx) => &mut tx.common,
        }
    }

    /// Convert to the generic field-tagged form
    pub fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        object.set(
            fields::TRANSACTION_TYPE,
            FieldValue::UInt16(self.transaction_type().code()),
        )?;
        self.common().write(&mut object)?;
        match self {
            Transaction::Payment(tx) => tx.write(&mut object)?,
            Transaction::AccountSet(tx) => tx.write(&mut object)?,
            Transaction::OfferCreate(tx) => tx.write(&mut object)?,
            Transaction::OfferCancel(tx) => tx.write(&mut object)?,
            Transaction::TrustSet(tx) => tx.write(&mut object)?,
        }
        Ok(object)
    }

    /// Build from the generic form, dispatching on the discriminator
    pub fn from_object(object: &StObject) -> Result<Self> {
        let code = *object.expect_u16(fields::TRANSACTION_TYPE)?;
        let tx_type =
            TransactionType::from_code(code).ok_or(Error::UnknownTransactionType(code))?;
        match tx_type {
            TransactionType::Payment => Payment::read(object).map(Transaction::Payment),
            TransactionType::AccountSet => AccountSet::read(object).map(Transaction::AccountSet),
            TransactionType::OfferCreate => {
                OfferCreate::read(object).map(Transaction::OfferCreate)
            }
            TransactionType::OfferCancel => {
                OfferCancel::read(object).map(Transaction::OfferCancel)
            }
            TransactionType::TrustSet => TrustSet::read(object).map(Transaction::TrustSet),
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

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn account() -> AccountId {
        AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap()
    }

    fn destination() -> AccountId {
        AccountId::from_hex("0123456789ABCDEF0123456789ABCDEF01234567").unwrap()
    }

    fn signed_payment() -> Payment {
        let mut common = TxCommon::new(account(), 1, Amount::from_drops(10));
        common.signing_pub_key = Some(
            hex::decode("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020")
                .unwrap(),
        );
        common.txn_signature = Some(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        Payment {
            common,
            amount: Amount::from_drops(1_000_000),
            destination: destination(),
            destination_tag: None,
            invoice_id: None,
            send_max: None,
            deliver_min: None,
            paths: None,
        }
    }

    #[test]
    fn test_reference_payment_encoding() {
        // Byte-exact reference encoding: field order, tags, length
        // prefixes and amount layouts all pinned down.
        let tx = Transaction::Payment(signed_payment());
        let raw = tx.encode(EncodeMode::Raw).unwrap();
        let expected = concat!(
            "120000",
            "2400000001",
            "6140000000000F4240",
            "68400000000000000A",
            "73210330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020",
            "7404DEADBEEF",
            "8114B5F762798A53D543A014CAF8B297CFF8F2F937E8",
            "83140123456789ABCDEF0123456789ABCDEF01234567",
        );
        assert_eq!(hex::encode_upper(&raw), expected);
    }

    #[test]
    fn test_signing_form_drops_the_signature() {
        let tx = Transaction::Payment(signed_payment());
        let raw = hex::encode_upper(tx.encode(EncodeMode::Raw).unwrap());
        let signing = hex::encode_upper(tx.encode(EncodeMode::Signing).unwrap());
        assert_eq!(raw.replace("7404DEADBEEF", ""), signing);
    }

    #[test]
    fn test_payment_round_trip() {
        let mut payment = signed_payment();
        payment.destination_tag = Some(99);
        payment.send_max = Some(Amount::parse(&format!("5/USD/{}", ISSUER)).unwrap());
        payment.common.memos = vec![Memo {
            memo_type: Some(b"text".to_vec()),
            memo_data: Some(b"invoice 7".to_vec()),
            memo_format: None,
        }];
        let tx = Transaction::Payment(payment);
        let raw = tx.encode(EncodeMode::Raw).unwrap();
        assert_eq!(Transaction::decode(&raw).unwrap(), tx);
    }

    #[test]
    fn test_trust_set_round_trip() {
        let tx = Transaction::TrustSet(TrustSet {
            common: TxCommon::new(account(), 4, Amount::from_drops(12)),
            limit_amount: Amount::parse(&format!("1000/USD/{}", ISSUER)).unwrap(),
            quality_in: Some(1_000_000_000),
            quality_out: None,
        });
        let raw = tx.encode(EncodeMode::Raw).unwrap();
        assert_eq!(Transaction::decode(&raw).unwrap(), tx);
    }

    #[test]
    fn test_offer_round_trips() {
        let create = Transaction::OfferCreate(OfferCreate {
            common: TxCommon::new(account(), 8, Amount::from_drops(12)),
            taker_pays: Amount::from_drops(5_000_000),
            taker_gets: Amount::parse(&format!("3/EUR/{}", ISSUER)).unwrap(),
            expiration: Some(700_000_000),
            offer_sequence: None,
        });
        let raw = create.encode(EncodeMode::Raw).unwrap();
        assert_eq!(Transaction::decode(&raw).unwrap(), create);

        let cancel = Transaction::OfferCancel(OfferCancel {
            common: TxCommon::new(account(), 9, Amount::from_drops(12)),
            offer_sequence: 8,
        });
        let raw = cancel.encode(EncodeMode::Raw).unwrap();
        assert_eq!(Transaction::decode(&raw).unwrap(), cancel);
    }

    #[test]
    fn test_account_set_round_trip() {
        let tx = Transaction::AccountSet(AccountSet {
            common: TxCommon::new(account(), 2, Amount::from_drops(10)),
            domain: Some(b"example.com".to_vec()),
            email_hash: Some(Hash128::from_bytes([0xAB; 16])),
            message_key: None,
            transfer_rate: Some(1_002_000_000),
            set_flag: Some(8),
            clear_flag: None,
        });
        let raw = tx.encode(EncodeMode::Raw).unwrap();
        assert_eq!(Transaction::decode(&raw).unwrap(), tx);
    }

    #[test]
    fn test_unknown_discriminator_is_rejected() {
        let mut object = StObject::new();
        object
            .set(fields::TRANSACTION_TYPE, FieldValue::UInt16(99))
            .unwrap();
        assert_eq!(
            Transaction::from_object(&object).unwrap_err(),
            Error::UnknownTransactionType(99)
        );
    }

    #[test]
    fn test_foreign_field_is_rejected_for_variant() {
        // A Payment must not carry a TrustSet limit
        let mut object = Transaction::Payment(signed_payment()).to_object().unwrap();
        object
            .set(
                fields::LIMIT_AMOUNT,
                FieldValue::Amount(Amount::parse(&format!("1/USD/{}", ISSUER)).unwrap()),
            )
            .unwrap();
        let err = Transaction::from_object(&object).unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let mut object = StObject::new();
        object
            .set(fields::TRANSACTION_TYPE, FieldValue::UInt16(0))
            .unwrap();
        object
            .set(fields::ACCOUNT, FieldValue::Account(account()))
            .unwrap();
        let err = Transaction::from_object(&object).unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
    }
}
