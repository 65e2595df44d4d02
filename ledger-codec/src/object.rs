//! Generic field-tagged objects
//!
//! An [`StObject`] is an ordered map from field tags to typed values.
//! Keeping fields in a map keyed by tag makes canonical ordering a
//! structural property: iteration order is serialization order, no
//! matter how the object was built. Absence of a key is the only way to
//! express an absent field; there is no "present with default".

use crate::error::{Error, Result};
use crate::fields::{expect_field, FieldId};
use crate::paths::PathSet;
use ledger_types::{AccountId, Amount, Hash128, Hash256};
use std::collections::BTreeMap;

/// A typed field payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),
    /// 128-bit hash
    Hash128(Hash128),
    /// 256-bit hash
    Hash256(Hash256),
    /// Amount
    Amount(Amount),
    /// Variable-length byte string
    Blob(Vec<u8>),
    /// Account identifier
    Account(AccountId),
    /// Nested object
    Object(StObject),
    /// Array of tagged nested objects
    Array(Vec<(FieldId, StObject)>),
    /// Payment path set
    PathSet(PathSet),
}

impl FieldValue {
    /// Type-class code of this payload
    pub fn type_code(&self) -> u8 {
        use crate::fields::type_code;
        match self {
            FieldValue::UInt8(_) => type_code::UINT8,
            FieldValue::UInt16(_) => type_code::UINT16,
            FieldValue::UInt32(_) => type_code::UINT32,
            FieldValue::UInt64(_) => type_code::UINT64,
            FieldValue::Hash128(_) => type_code::HASH128,
            FieldValue::Hash256(_) => type_code::HASH256,
            FieldValue::Amount(_) => type_code::AMOUNT,
            FieldValue::Blob(_) => type_code::BLOB,
            FieldValue::Account(_) => type_code::ACCOUNT,
            FieldValue::Object(_) => type_code::OBJECT,
            FieldValue::Array(_) => type_code::ARRAY,
            FieldValue::PathSet(_) => type_code::PATH_SET,
        }
    }

    /// Whether this payload serializes to nothing and is omitted
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Blob(bytes) => bytes.is_empty(),
            FieldValue::Array(items) => items.is_empty(),
            FieldValue::PathSet(paths) => paths.is_empty(),
            _ => false,
        }
    }
}

macro_rules! typed_accessors {
    ($get:ident, $expect:ident, $variant:ident, $ty:ty) => {
        #[doc = concat!("Field as `", stringify!($ty), "`, if present")]
        pub fn $get(&self, id: FieldId) -> Result<Option<&$ty>> {
            match self.fields.get(&id) {
                None => Ok(None),
                Some(FieldValue::$variant(value)) => Ok(Some(value)),
                Some(_) => Err(Error::TypeMismatch(expect_field(id)?.name)),
            }
        }

        #[doc = concat!("Required field as `", stringify!($ty), "`")]
        pub fn $expect(&self, id: FieldId) -> Result<&$ty> {
            self.$get(id)?
                .ok_or_else(|| match expect_field(id) {
                    Ok(def) => Error::MissingField(def.name),
                    Err(err) => err,
                })
        }
    };
}

/// Ordered field-tagged object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StObject {
    /// Fields keyed by tag; iteration order is canonical order
    fields: BTreeMap<FieldId, FieldValue>,
}

impl StObject {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, validating the tag against the registry
    pub fn set(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        let def = expect_field(id)?;
        if value.type_code() != id.type_code {
            return Err(Error::TypeMismatch(def.name));
        }
        self.fields.insert(id, value);
        Ok(())
    }

    /// Insert a freshly decoded field, rejecting duplicates
    pub(crate) fn insert_decoded(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        let def = expect_field(id)?;
        if self.fields.insert(id, value).is_some() {
            return Err(Error::DuplicateField(def.name));
        }
        Ok(())
    }

    /// Raw field payload, if present
    pub fn get(&self, id: FieldId) -> Option<&FieldValue> {
        self.fields.get(&id)
    }

    /// Whether the field is present
    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Number of present fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are present
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.fields.iter()
    }

    /// Tags of all present fields, canonical order
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    typed_accessors!(get_u8, expect_u8, UInt8, u8);
    typed_accessors!(get_u16, expect_u16, UInt16, u16);
    typed_accessors!(get_u32, expect_u32, UInt32, u32);
    typed_accessors!(get_u64, expect_u64, UInt64, u64);
    typed_accessors!(get_hash128, expect_hash128, Hash128, Hash128);
    typed_accessors!(get_hash256, expect_hash256, Hash256, Hash256);
    typed_accessors!(get_amount, expect_amount, Amount, Amount);
    typed_accessors!(get_blob, expect_blob, Blob, Vec<u8>);
    typed_accessors!(get_account, expect_account, Account, AccountId);
    typed_accessors!(get_object, expect_object, Object, StObject);
    typed_accessors!(get_array, expect_array, Array, Vec<(FieldId, StObject)>);
    typed_accessors!(get_path_set, expect_path_set, PathSet, PathSet);
}
