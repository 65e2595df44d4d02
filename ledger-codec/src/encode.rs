//! Canonical binary encoding
//!
//! One serializer serves hashing, signing and wire transport: fields are
//! emitted in canonical (type, ordinal) order with their tags, nested
//! objects and arrays close with sentinel tags, and variable-length
//! payloads carry the 3-tier length prefix.

use crate::error::{Error, Result};
use crate::fields::{self, expect_field, FieldId};
use crate::object::{FieldValue, StObject};
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// Largest length encodable in one prefix byte
const VL_TIER1_MAX: usize = 192;
/// Largest length encodable in two prefix bytes
const VL_TIER2_MAX: usize = 12_480;
/// Largest length encodable in three prefix bytes
const VL_TIER3_MAX: usize = 918_744;

/// What the encoding will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Every present field; content hashing and wire transport
    Raw,
    /// Signing-excluded fields omitted; the pre-signature message
    Signing,
}

/// Serialize an object to its canonical bytes
pub fn encode(object: &StObject, mode: EncodeMode) -> Result<Vec<u8>> {
    let mut buf = BytesMut::new();
    write_object(&mut buf, object, mode)?;
    trace!(bytes = buf.len(), ?mode, "encoded object");
    Ok(buf.to_vec())
}

/// Emit the fields of an object, canonical order, no terminator
fn write_object(buf: &mut BytesMut, object: &StObject, mode: EncodeMode) -> Result<()> {
    for (id, value) in object.iter() {
        let def = expect_field(*id)?;
        if mode == EncodeMode::Signing && def.signing_excluded {
            continue;
        }
        // Absent and empty serialize identically: not at all
        if value.is_empty() {
            continue;
        }
        write_tag(buf, *id);
        write_value(buf, value, mode)?;
    }
    Ok(())
}

fn write_value(buf: &mut BytesMut, value: &FieldValue, mode: EncodeMode) -> Result<()> {
    match value {
        FieldValue::UInt8(v) => buf.put_u8(*v),
        FieldValue::UInt16(v) => buf.put_u16(*v),
        FieldValue::UInt32(v) => buf.put_u32(*v),
        FieldValue::UInt64(v) => buf.put_u64(*v),
        FieldValue::Hash128(v) => buf.put_slice(v.as_bytes()),
        FieldValue::Hash256(v) => buf.put_slice(v.as_bytes()),
        FieldValue::Amount(amount) => {
            buf.put_slice(&amount.value().to_wire()?);
            if !amount.is_native() {
                buf.put_slice(amount.currency().as_bytes());
                buf.put_slice(amount.issuer().as_bytes());
            }
        }
        FieldValue::Blob(bytes) => {
            write_vl(buf, bytes.len())?;
            buf.put_slice(bytes);
        }
        FieldValue::Account(account) => {
            write_vl(buf, account.as_bytes().len())?;
            buf.put_slice(account.as_bytes());
        }
        FieldValue::Object(object) => {
            write_object(buf, object, mode)?;
            write_tag(buf, fields::OBJECT_END);
        }
        FieldValue::Array(items) => {
            for (id, object) in items {
                write_tag(buf, *id);
                write_object(buf, object, mode)?;
                write_tag(buf, fields::OBJECT_END);
            }
            write_tag(buf, fields::ARRAY_END);
        }
        FieldValue::PathSet(paths) => paths.write(buf)?,
    }
    Ok(())
}

/// Emit a 1-, 2- or 3-byte field tag
pub(crate) fn write_tag(buf: &mut BytesMut, id: FieldId) {
    let type_nibble = if id.type_code < 16 { id.type_code } else { 0 };
    let ordinal_nibble = if id.ordinal < 16 { id.ordinal } else { 0 };
    buf.put_u8((type_nibble << 4) | ordinal_nibble);
    if type_nibble == 0 {
        buf.put_u8(id.type_code);
    }
    if ordinal_nibble == 0 {
        buf.put_u8(id.ordinal);
    }
}

/// Emit the 3-tier variable-length prefix
pub(crate) fn write_vl(buf: &mut BytesMut, len: usize) -> Result<()> {
    if len <= VL_TIER1_MAX {
        buf.put_u8(len as u8);
    } else if len <= VL_TIER2_MAX {
        let adjusted = len - VL_TIER1_MAX - 1;
        buf.put_u8(193 + (adjusted / 256) as u8);
        buf.put_u8((adjusted % 256) as u8);
    } else if len <= VL_TIER3_MAX {
        let adjusted = len - VL_TIER2_MAX - 1;
        buf.put_u8(241 + (adjusted / 65_536) as u8);
        buf.put_u8(((adjusted / 256) % 256) as u8);
        buf.put_u8((adjusted % 256) as u8);
    } else {
        return Err(Error::UnsupportedLength(len));
    }
    Ok(())
}
