//! Transaction metadata
//!
//! Metadata records what a transaction did: the entries it created,
//! modified or deleted, each with generic before/after field maps. The
//! inner maps stay generic on purpose: they are partial snapshots of
//! entries, not complete entries.

use crate::decode::decode;
use crate::encode::{encode, EncodeMode};
use crate::entry::LedgerEntryType;
use crate::error::{Error, Result};
use crate::fields::{self, FieldId};
use crate::object::{FieldValue, StObject};
use crate::tx::check_known_fields;
use ledger_types::{Amount, Hash256};

/// What happened to one ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffectedNode {
    /// Entry came into existence
    Created {
        /// Kind of the entry
        entry_type: LedgerEntryType,
        /// Stable index of the entry
        ledger_index: Hash256,
        /// Fields of the new entry
        new_fields: StObject,
    },
    /// Entry changed
    Modified {
        /// Kind of the entry
        entry_type: LedgerEntryType,
        /// Stable index of the entry
        ledger_index: Hash256,
        /// Hash of the previous transaction touching the entry
        previous_txn_id: Option<Hash256>,
        /// Ledger sequence of that transaction
        previous_txn_lgr_seq: Option<u32>,
        /// Fields as they were, only the changed ones
        previous_fields: Option<StObject>,
        /// Fields as they are now
        final_fields: Option<StObject>,
    },
    /// Entry ceased to exist
    Deleted {
        /// Kind of the entry
        entry_type: LedgerEntryType,
        /// Stable index of the entry
        ledger_index: Hash256,
        /// Last state of the entry
        final_fields: StObject,
    },
}

impl AffectedNode {
    const FIELDS: &'static [FieldId] = &[
        fields::LEDGER_ENTRY_TYPE,
        fields::LEDGER_INDEX,
        fields::PREVIOUS_TXN_ID,
        fields::PREVIOUS_TXN_LGR_SEQ,
        fields::PREVIOUS_FIELDS,
        fields::FINAL_FIELDS,
        fields::NEW_FIELDS,
    ];

    fn wrapper(&self) -> FieldId {
        match self {
            AffectedNode::Created { .. } => fields::CREATED_NODE,
            AffectedNode::Modified { .. } => fields::MODIFIED_NODE,
            AffectedNode::Deleted { .. } => fields::DELETED_NODE,
        }
    }

    fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        match self {
            AffectedNode::Created {
                entry_type,
                ledger_index,
                new_fields,
            } => {
                object.set(
                    fields::LEDGER_ENTRY_TYPE,
                    FieldValue::UInt16(entry_type.code()),
                )?;
                object.set(fields::LEDGER_INDEX, FieldValue::Hash256(*ledger_index))?;
                object.set(fields::NEW_FIELDS, FieldValue::Object(new_fields.clone()))?;
            }
            AffectedNode::Modified {
                entry_type,
                ledger_index,
                previous_txn_id,
                previous_txn_lgr_seq,
                previous_fields,
                final_fields,
            } => {
                object.set(
                    fields::LEDGER_ENTRY_TYPE,
                    FieldValue::UInt16(entry_type.code()),
                )?;
                object.set(fields::LEDGER_INDEX, FieldValue::Hash256(*ledger_index))?;
                if let Some(id) = previous_txn_id {
                    object.set(fields::PREVIOUS_TXN_ID, FieldValue::Hash256(*id))?;
                }
                if let Some(seq) = previous_txn_lgr_seq {
                    object.set(fields::PREVIOUS_TXN_LGR_SEQ, FieldValue::UInt32(*seq))?;
                }
                if let Some(previous) = previous_fields {
                    object.set(fields::PREVIOUS_FIELDS, FieldValue::Object(previous.clone()))?;
                }
                if let Some(r#final) = final_fields {
                    object.set(fields::FINAL_FIELDS, FieldValue::Object(r#final.clone()))?;
                }
            }
            AffectedNode::Deleted {
                entry_type,
                ledger_index,
                final_fields,
            } => {
                object.set(
                    fields::LEDGER_ENTRY_TYPE,
                    FieldValue::UInt16(entry_type.code()),
                )?;
                object.set(fields::LEDGER_INDEX, FieldValue::Hash256(*ledger_index))?;
                object.set(fields::FINAL_FIELDS, FieldValue::Object(final_fields.clone()))?;
            }
        }
        Ok(object)
    }

    fn from_object(wrapper: FieldId, object: &StObject) -> Result<Self> {
        check_known_fields(object, &[Self::FIELDS])?;
        let code = *object.expect_u16(fields::LEDGER_ENTRY_TYPE)?;
        let entry_type =
            LedgerEntryType::from_code(code).ok_or(Error::UnknownLedgerEntryType(code))?;
        let ledger_index = *object.expect_hash256(fields::LEDGER_INDEX)?;

        if wrapper == fields::CREATED_NODE {
            Ok(AffectedNode::Created {
                entry_type,
                ledger_index,
                new_fields: object.expect_object(fields::NEW_FIELDS)?.clone(),
            })
        } else if wrapper == fields::MODIFIED_NODE {
            Ok(AffectedNode::Modified {
                entry_type,
                ledger_index,
                previous_txn_id: object.get_hash256(fields::PREVIOUS_TXN_ID)?.copied(),
                previous_txn_lgr_seq: object.get_u32(fields::PREVIOUS_TXN_LGR_SEQ)?.copied(),
                previous_fields: object.get_object(fields::PREVIOUS_FIELDS)?.cloned(),
                final_fields: object.get_object(fields::FINAL_FIELDS)?.cloned(),
            })
        } else if wrapper == fields::DELETED_NODE {
            Ok(AffectedNode::Deleted {
                entry_type,
                ledger_index,
                final_fields: object.expect_object(fields::FINAL_FIELDS)?.clone(),
            })
        } else {
            Err(Error::TypeMismatch("AffectedNodes"))
        }
    }
}

/// Everything a transaction did to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMeta {
    /// Position of the transaction within its ledger
    pub transaction_index: u32,
    /// Engine result code
    pub transaction_result: u8,
    /// Entries the transaction touched
    pub affected_nodes: Vec<AffectedNode>,
    /// Amount actually delivered by a payment
    pub delivered_amount: Option<Amount>,
}

impl TransactionMeta {
    const FIELDS: &'static [FieldId] = &[
        fields::TRANSACTION_INDEX,
        fields::TRANSACTION_RESULT,
        fields::AFFECTED_NODES,
        fields::DELIVERED_AMOUNT,
    ];

    /// Convert to the generic field-tagged form
    pub fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        object.set(
            fields::TRANSACTION_INDEX,
            FieldValue::UInt32(self.transaction_index),
        )?;
        object.set(
            fields::TRANSACTION_RESULT,
            FieldValue::UInt8(self.transaction_result),
        )?;
        let mut items = Vec::with_capacity(self.affected_nodes.len());
        for node in &self.affected_nodes {
            items.push((node.wrapper(), node.to_object()?));
        }
        object.set(fields::AFFECTED_NODES, FieldValue::Array(items))?;
        if let Some(delivered) = self.delivered_amount {
            object.set(fields::DELIVERED_AMOUNT, FieldValue::Amount(delivered))?;
        }
        Ok(object)
    }

    /// Build from the generic form
    pub fn from_object(object: &StObject) -> Result<Self> {
        check_known_fields(object, &[Self::FIELDS])?;
        let affected_nodes = match object.get_array(fields::AFFECTED_NODES)? {
            None => Vec::new(),
            Some(items) => {
                let mut nodes = Vec::with_capacity(items.len());
                for (wrapper, item) in items {
                    nodes.push(AffectedNode::from_object(*wrapper, item)?);
                }
                nodes
            }
        };
        Ok(Self {
            transaction_index: *object.expect_u32(fields::TRANSACTION_INDEX)?,
            transaction_result: *object.expect_u8(fields::TRANSACTION_RESULT)?,
            affected_nodes,
            delivered_amount: object.get_amount(fields::DELIVERED_AMOUNT)?.copied(),
        })
    }

    /// Canonical bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(&self.to_object()?, EncodeMode::Raw)
    }

    /// Decode canonical bytes
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::from_object(&decode(data)?)
    }
}
