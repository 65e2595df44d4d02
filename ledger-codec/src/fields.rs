//! Field registry: the static table behind the canonical codec
//!
//! Every serializable field is identified by a (type-class, ordinal)
//! pair. The registry maps tags to descriptors and back, carries the
//! signing-exclusion flag, and defines the canonical sort order: the
//! pair itself, compared numerically. The table is a compile-time
//! constant, built once, immutable, shared freely.

use crate::error::{Error, Result};

/// Type-class codes used in field tags
pub mod type_code {
    /// 16-bit unsigned integer
    pub const UINT16: u8 = 1;
    /// 32-bit unsigned integer
    pub const UINT32: u8 = 2;
    /// 64-bit unsigned integer
    pub const UINT64: u8 = 3;
    /// 128-bit hash
    pub const HASH128: u8 = 4;
    /// 256-bit hash
    pub const HASH256: u8 = 5;
    /// Amount (8 or 48 bytes)
    pub const AMOUNT: u8 = 6;
    /// Variable-length byte string
    pub const BLOB: u8 = 7;
    /// Account identifier (length-prefixed 20 bytes)
    pub const ACCOUNT: u8 = 8;
    /// Nested object, sentinel-terminated
    pub const OBJECT: u8 = 14;
    /// Array of nested objects, sentinel-terminated
    pub const ARRAY: u8 = 15;
    /// 8-bit unsigned integer
    pub const UINT8: u8 = 16;
    /// Payment path set
    pub const PATH_SET: u8 = 18;
}

/// Field identifier: type class plus ordinal
///
/// The derived ordering is the canonical field order of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    /// Type-class code
    pub type_code: u8,
    /// Ordinal within the type class
    pub ordinal: u8,
}

/// Field descriptor carried by the registry
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Canonical field name
    pub name: &'static str,
    /// Tag identifying the field
    pub id: FieldId,
    /// Omitted from signing-mode serialization
    pub signing_excluded: bool,
}

macro_rules! field_table {
    ($($konst:ident => $name:literal, $type:ident, $ordinal:literal, $excluded:literal;)*) => {
        $(
            #[doc = concat!("`", $name, "` field tag")]
            pub const $konst: FieldId = FieldId {
                type_code: type_code::$type,
                ordinal: $ordinal,
            };
        )*

        /// Every known field, sorted by canonical (type, ordinal) order
        pub static FIELDS: &[FieldDef] = &[
            $(
                FieldDef {
                    name: $name,
                    id: $konst,
                    signing_excluded: $excluded,
                },
            )*
        ];
    };
}

field_table! {
    LEDGER_ENTRY_TYPE     => "LedgerEntryType", UINT16, 1, false;
    TRANSACTION_TYPE      => "TransactionType", UINT16, 2, false;

    FLAGS                 => "Flags", UINT32, 2, false;
    SOURCE_TAG            => "SourceTag", UINT32, 3, false;
    SEQUENCE              => "Sequence", UINT32, 4, false;
    PREVIOUS_TXN_LGR_SEQ  => "PreviousTxnLgrSeq", UINT32, 5, false;
    LEDGER_SEQUENCE       => "LedgerSequence", UINT32, 6, false;
    EXPIRATION            => "Expiration", UINT32, 10, false;
    TRANSFER_RATE         => "TransferRate", UINT32, 11, false;
    OWNER_COUNT           => "OwnerCount", UINT32, 13, false;
    DESTINATION_TAG       => "DestinationTag", UINT32, 14, false;
    HIGH_QUALITY_IN       => "HighQualityIn", UINT32, 16, false;
    HIGH_QUALITY_OUT      => "HighQualityOut", UINT32, 17, false;
    LOW_QUALITY_IN        => "LowQualityIn", UINT32, 18, false;
    LOW_QUALITY_OUT       => "LowQualityOut", UINT32, 19, false;
    QUALITY_IN            => "QualityIn", UINT32, 20, false;
    QUALITY_OUT           => "QualityOut", UINT32, 21, false;
    OFFER_SEQUENCE        => "OfferSequence", UINT32, 25, false;
    LAST_LEDGER_SEQUENCE  => "LastLedgerSequence", UINT32, 27, false;
    TRANSACTION_INDEX     => "TransactionIndex", UINT32, 28, false;
    SET_FLAG              => "SetFlag", UINT32, 33, false;
    CLEAR_FLAG            => "ClearFlag", UINT32, 34, false;

    BOOK_NODE             => "BookNode", UINT64, 3, false;
    OWNER_NODE            => "OwnerNode", UINT64, 4, false;
    LOW_NODE              => "LowNode", UINT64, 7, false;
    HIGH_NODE             => "HighNode", UINT64, 8, false;

    EMAIL_HASH            => "EmailHash", HASH128, 1, false;

    PREVIOUS_TXN_ID       => "PreviousTxnID", HASH256, 5, false;
    LEDGER_INDEX          => "LedgerIndex", HASH256, 6, false;
    ACCOUNT_TXN_ID        => "AccountTxnID", HASH256, 9, false;
    BOOK_DIRECTORY        => "BookDirectory", HASH256, 16, false;
    INVOICE_ID            => "InvoiceID", HASH256, 17, false;

    AMOUNT                => "Amount", AMOUNT, 1, false;
    BALANCE               => "Balance", AMOUNT, 2, false;
    LIMIT_AMOUNT          => "LimitAmount", AMOUNT, 3, false;
    TAKER_PAYS            => "TakerPays", AMOUNT, 4, false;
    TAKER_GETS            => "TakerGets", AMOUNT, 5, false;
    LOW_LIMIT             => "LowLimit", AMOUNT, 6, false;
    HIGH_LIMIT            => "HighLimit", AMOUNT, 7, false;
    FEE                   => "Fee", AMOUNT, 8, false;
    SEND_MAX              => "SendMax", AMOUNT, 9, false;
    DELIVER_MIN           => "DeliverMin", AMOUNT, 10, false;
    DELIVERED_AMOUNT      => "DeliveredAmount", AMOUNT, 18, false;

    MESSAGE_KEY           => "MessageKey", BLOB, 2, false;
    SIGNING_PUB_KEY       => "SigningPubKey", BLOB, 3, false;
    TXN_SIGNATURE         => "TxnSignature", BLOB, 4, true;
    SIGNATURE             => "Signature", BLOB, 6, true;
    DOMAIN                => "Domain", BLOB, 7, false;
    MEMO_TYPE             => "MemoType", BLOB, 12, false;
    MEMO_DATA             => "MemoData", BLOB, 13, false;
    MEMO_FORMAT           => "MemoFormat", BLOB, 14, false;

    ACCOUNT               => "Account", ACCOUNT, 1, false;
    OWNER                 => "Owner", ACCOUNT, 2, false;
    DESTINATION           => "Destination", ACCOUNT, 3, false;
    ISSUER                => "Issuer", ACCOUNT, 4, false;
    REGULAR_KEY           => "RegularKey", ACCOUNT, 8, false;

    OBJECT_END            => "ObjectEndMarker", OBJECT, 1, false;
    TRANSACTION_META_DATA => "TransactionMetaData", OBJECT, 2, false;
    CREATED_NODE          => "CreatedNode", OBJECT, 3, false;
    DELETED_NODE          => "DeletedNode", OBJECT, 4, false;
    MODIFIED_NODE         => "ModifiedNode", OBJECT, 5, false;
    PREVIOUS_FIELDS       => "PreviousFields", OBJECT, 6, false;
    FINAL_FIELDS          => "FinalFields", OBJECT, 7, false;
    NEW_FIELDS            => "NewFields", OBJECT, 8, false;
    MEMO                  => "Memo", OBJECT, 10, false;

    ARRAY_END             => "ArrayEndMarker", ARRAY, 1, false;
    AFFECTED_NODES        => "AffectedNodes", ARRAY, 8, false;
    MEMOS                 => "Memos", ARRAY, 9, false;

    TRANSACTION_RESULT    => "TransactionResult", UINT8, 3, false;

    PATHS                 => "Paths", PATH_SET, 1, false;
}

/// Look up a field descriptor by tag
pub fn field_by_id(id: FieldId) -> Option<&'static FieldDef> {
    FIELDS
        .binary_search_by(|def| def.id.cmp(&id))
        .ok()
        .map(|index| &FIELDS[index])
}

/// Look up a field descriptor by canonical name
pub fn field_by_name(name: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|def| def.name == name)
}

/// Descriptor for a tag that must be registered
///
/// Objects are only ever built through the registry, so a miss here
/// means corrupt input, not a bug.
pub fn expect_field(id: FieldId) -> Result<&'static FieldDef> {
    field_by_id(id).ok_or(Error::UnknownField {
        type_code: id.type_code,
        ordinal: id.ordinal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in FIELDS.windows(2) {
            assert!(
                pair[0].id < pair[1].id,
                "{} must sort before {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let def = field_by_id(TRANSACTION_TYPE).unwrap();
        assert_eq!(def.name, "TransactionType");
        assert!(field_by_id(FieldId { type_code: 11, ordinal: 1 }).is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let def = field_by_name("TxnSignature").unwrap();
        assert_eq!(def.id, TXN_SIGNATURE);
        assert!(def.signing_excluded);
        assert!(field_by_name("NoSuchField").is_none());
    }

    #[test]
    fn test_signature_fields_are_signing_excluded() {
        for def in FIELDS {
            let excluded = def.name == "TxnSignature" || def.name == "Signature";
            assert_eq!(def.signing_excluded, excluded, "{}", def.name);
        }
    }

    #[test]
    fn test_canonical_order_counts_uint8_late() {
        // UInt8 has type code 16 and sorts after objects and arrays
        assert!(TRANSACTION_RESULT > ARRAY_END);
        assert!(TRANSACTION_TYPE < FLAGS);
    }
}
