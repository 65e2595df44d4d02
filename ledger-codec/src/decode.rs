//! Canonical binary decoding
//!
//! The reader walks tagged fields, recursing into sentinel-terminated
//! objects and arrays. Corrupt input (unknown tags, duplicate or
//! mistyped fields, truncation) comes back as an error, never a panic:
//! decoded bytes are untrusted.

use crate::error::{Error, Result};
use crate::fields::{self, expect_field, type_code, FieldId};
use crate::object::{FieldValue, StObject};
use crate::paths::PathSet;
use ledger_types::{AccountId, Amount, Currency, Hash128, Hash256, Value};
use tracing::trace;

/// Cursor over an immutable byte slice
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether everything has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consume one byte
    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Consume a big-endian u16
    pub fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take(2)?.try_into().unwrap()))
    }

    /// Consume a big-endian u32
    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    /// Consume a big-endian u64
    pub fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take(8)?.try_into().unwrap()))
    }

    /// Consume a 1-, 2- or 3-byte field tag
    pub(crate) fn read_tag(&mut self) -> Result<FieldId> {
        let first = self.u8()?;
        let mut type_code = first >> 4;
        let mut ordinal = first & 0x0F;
        if type_code == 0 {
            type_code = self.u8()?;
            if type_code < 16 {
                return Err(Error::InvalidTag);
            }
        }
        if ordinal == 0 {
            ordinal = self.u8()?;
            if ordinal < 16 {
                return Err(Error::InvalidTag);
            }
        }
        Ok(FieldId { type_code, ordinal })
    }

    /// Consume the 3-tier variable-length prefix
    pub(crate) fn read_vl(&mut self) -> Result<usize> {
        let first = usize::from(self.u8()?);
        if first <= 192 {
            return Ok(first);
        }
        if first <= 240 {
            let second = usize::from(self.u8()?);
            return Ok(193 + (first - 193) * 256 + second);
        }
        if first <= 254 {
            let second = usize::from(self.u8()?);
            let third = usize::from(self.u8()?);
            return Ok(12_481 + (first - 241) * 65_536 + second * 256 + third);
        }
        Err(Error::InvalidLengthPrefix)
    }
}

/// Decode a top-level object, consuming the whole input
pub fn decode(data: &[u8]) -> Result<StObject> {
    let mut reader = Reader::new(data);
    let object = read_object_until(&mut reader, None)?;
    trace!(fields = object.len(), "decoded object");
    Ok(object)
}

/// Read fields until the sentinel (nested) or end of input (top level)
pub(crate) fn read_object_until(
    reader: &mut Reader<'_>,
    end: Option<FieldId>,
) -> Result<StObject> {
    let mut object = StObject::new();
    loop {
        if end.is_none() && reader.is_empty() {
            break;
        }
        let id = reader.read_tag()?;
        if end == Some(id) {
            break;
        }
        let value = read_value(reader, id)?;
        object.insert_decoded(id, value)?;
    }
    Ok(object)
}

fn read_value(reader: &mut Reader<'_>, id: FieldId) -> Result<FieldValue> {
    let def = expect_field(id)?;
    // A sentinel outside its own container is corrupt framing
    if id == fields::OBJECT_END || id == fields::ARRAY_END {
        return Err(Error::InvalidTag);
    }
    let value = match id.type_code {
        type_code::UINT8 => FieldValue::UInt8(reader.u8()?),
        type_code::UINT16 => FieldValue::UInt16(reader.u16()?),
        type_code::UINT32 => FieldValue::UInt32(reader.u32()?),
        type_code::UINT64 => FieldValue::UInt64(reader.u64()?),
        type_code::HASH128 => FieldValue::Hash128(Hash128::from_slice(reader.take(16)?)?),
        type_code::HASH256 => FieldValue::Hash256(Hash256::from_slice(reader.take(32)?)?),
        type_code::AMOUNT => FieldValue::Amount(read_amount(reader)?),
        type_code::BLOB => {
            let len = reader.read_vl()?;
            FieldValue::Blob(reader.take(len)?.to_vec())
        }
        type_code::ACCOUNT => {
            let len = reader.read_vl()?;
            if len != AccountId::LEN {
                return Err(Error::TypeMismatch(def.name));
            }
            FieldValue::Account(AccountId::from_slice(reader.take(len)?)?)
        }
        type_code::OBJECT => {
            FieldValue::Object(read_object_until(reader, Some(fields::OBJECT_END))?)
        }
        type_code::ARRAY => FieldValue::Array(read_array(reader)?),
        type_code::PATH_SET => FieldValue::PathSet(PathSet::read(reader)?),
        _ => return Err(Error::TypeMismatch(def.name)),
    };
    Ok(value)
}

fn read_array(reader: &mut Reader<'_>) -> Result<Vec<(FieldId, StObject)>> {
    let mut items = Vec::new();
    loop {
        let id = reader.read_tag()?;
        if id == fields::ARRAY_END {
            break;
        }
        let def = expect_field(id)?;
        if id.type_code != type_code::OBJECT || id == fields::OBJECT_END {
            return Err(Error::TypeMismatch(def.name));
        }
        let object = read_object_until(reader, Some(fields::OBJECT_END))?;
        items.push((id, object));
    }
    Ok(items)
}

/// An amount is 8 bytes, or 48 when the value is issued
fn read_amount(reader: &mut Reader<'_>) -> Result<Amount> {
    let value = Value::from_wire(reader.take(8)?.try_into().unwrap())?;
    if value.is_native() {
        return Ok(Amount::new(value, Currency::native(), AccountId::zero())?);
    }
    let currency = Currency::from_slice(reader.take(20)?)?;
    let issuer = AccountId::from_slice(reader.take(20)?)?;
    Ok(Amount::new(value, currency, issuer)?)
}
