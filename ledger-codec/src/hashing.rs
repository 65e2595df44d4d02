//! Content addressing
//!
//! Every identifier on the network is the first half of a SHA-512
//! digest over a 4-byte big-endian domain prefix and protocol-specific
//! content. The domain prefix keeps hashes from one context from ever
//! colliding with another. Ledger indexes use a single namespace byte
//! instead: they address *what* an entry is, not its current bytes.

use crate::decode::Reader;
use crate::encode::{write_vl, EncodeMode};
use crate::error::{Error, Result};
use crate::tx::Transaction;
use bytes::{BufMut, BytesMut};
use ledger_types::{sha512_half, AccountId, Currency, Hash256};

/// 4-byte hash-domain prefixes
pub mod prefix {
    /// Transaction identifier (`TXN\0`)
    pub const TRANSACTION_ID: u32 = 0x5458_4E00;
    /// Transaction-with-metadata tree node (`SND\0`)
    pub const TX_NODE: u32 = 0x534E_4400;
    /// State-tree leaf node (`MLN\0`)
    pub const LEAF_NODE: u32 = 0x4D4C_4E00;
    /// Tree inner node (`MIN\0`)
    pub const INNER_NODE: u32 = 0x4D49_4E00;
    /// Ledger header (`LWR\0`)
    pub const LEDGER_HEADER: u32 = 0x4C57_5200;
    /// Single-signature signing data (`STX\0`)
    pub const SIGNING: u32 = 0x5354_5800;
}

/// Ledger-index namespace bytes
pub mod namespace {
    /// Account entries
    pub const ACCOUNT: u8 = b'a';
    /// Owner directories
    pub const OWNER_DIRECTORY: u8 = b'O';
    /// Offers
    pub const OFFER: u8 = b'o';
    /// Trust lines
    pub const TRUST_LINE: u8 = b'r';
}

/// Half-SHA-512 over a domain prefix and content
pub fn prefixed_hash(prefix: u32, content: &[u8]) -> Hash256 {
    let mut buf = Vec::with_capacity(4 + content.len());
    buf.extend_from_slice(&prefix.to_be_bytes());
    buf.extend_from_slice(content);
    sha512_half(&buf)
}

/// Transaction identifier: the hash of the raw encoding
pub fn transaction_id(tx: &Transaction) -> Result<Hash256> {
    Ok(prefixed_hash(
        prefix::TRANSACTION_ID,
        &tx.encode(EncodeMode::Raw)?,
    ))
}

/// The message actually signed: the signing-form encoding
pub fn signing_hash(tx: &Transaction) -> Result<Hash256> {
    Ok(prefixed_hash(
        prefix::SIGNING,
        &tx.encode(EncodeMode::Signing)?,
    ))
}

/// Transaction-tree node: length-prefixed transaction and metadata
/// blobs followed by the transaction id
pub fn tx_node_hash(tx_blob: &[u8], meta_blob: &[u8], tx_id: Hash256) -> Result<Hash256> {
    let mut buf = BytesMut::new();
    buf.put_u32(prefix::TX_NODE);
    write_vl(&mut buf, tx_blob.len())?;
    buf.put_slice(tx_blob);
    write_vl(&mut buf, meta_blob.len())?;
    buf.put_slice(meta_blob);
    buf.put_slice(tx_id.as_bytes());
    Ok(sha512_half(&buf))
}

/// State-tree leaf node: entry bytes followed by the entry index
pub fn leaf_node_hash(entry_blob: &[u8], index: Hash256) -> Hash256 {
    let mut buf = BytesMut::new();
    buf.put_u32(prefix::LEAF_NODE);
    buf.put_slice(entry_blob);
    buf.put_slice(index.as_bytes());
    sha512_half(&buf)
}

/// Tree inner node over its 16 children; empty slots are the zero hash
pub fn inner_node_hash(children: &[Hash256; 16]) -> Hash256 {
    let mut buf = BytesMut::with_capacity(4 + 16 * 32);
    buf.put_u32(prefix::INNER_NODE);
    for child in children {
        buf.put_slice(child.as_bytes());
    }
    sha512_half(&buf)
}

fn namespace_index(space: u8, content: &[&[u8]]) -> Hash256 {
    let mut buf = BytesMut::new();
    buf.put_u8(space);
    for chunk in content {
        buf.put_slice(chunk);
    }
    sha512_half(&buf)
}

/// Index of an account's root entry
pub fn account_index(account: &AccountId) -> Hash256 {
    namespace_index(namespace::ACCOUNT, &[account.as_bytes()])
}

/// Index of an account's owner directory
pub fn owner_directory_index(account: &AccountId) -> Hash256 {
    namespace_index(namespace::OWNER_DIRECTORY, &[account.as_bytes()])
}

/// Index of an offer, keyed by owner and placing sequence
pub fn offer_index(account: &AccountId, sequence: u32) -> Hash256 {
    namespace_index(
        namespace::OFFER,
        &[account.as_bytes(), &sequence.to_be_bytes()],
    )
}

/// Index of a trust line between two accounts in one currency
///
/// The lower account (by byte value) goes first, so both participants
/// compute the same index.
pub fn trust_line_index(a: &AccountId, b: &AccountId, currency: &Currency) -> Hash256 {
    let (low, high) = if a.as_bytes() <= b.as_bytes() {
        (a, b)
    } else {
        (b, a)
    };
    namespace_index(
        namespace::TRUST_LINE,
        &[low.as_bytes(), high.as_bytes(), currency.as_bytes()],
    )
}

/// Ledger header: the fixed-layout fields every ledger hash covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerHeader {
    /// Ledger sequence number
    pub sequence: u32,
    /// Total drops in existence
    pub total_coins: u64,
    /// Hash of the previous ledger
    pub parent_hash: Hash256,
    /// Root of the transaction tree
    pub transaction_hash: Hash256,
    /// Root of the state tree
    pub account_hash: Hash256,
    /// Close time of the previous ledger, ledger-epoch seconds
    pub parent_close_time: u32,
    /// Close time of this ledger, ledger-epoch seconds
    pub close_time: u32,
    /// Close-time resolution in seconds
    pub close_resolution: u8,
    /// Close flags
    pub close_flags: u8,
}

impl LedgerHeader {
    /// Serialized width of the fixed layout
    pub const LEN: usize = 118;

    /// Fixed-layout bytes, all integers big-endian
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        buf.put_u32(self.sequence);
        buf.put_u64(self.total_coins);
        buf.put_slice(self.parent_hash.as_bytes());
        buf.put_slice(self.transaction_hash.as_bytes());
        buf.put_slice(self.account_hash.as_bytes());
        buf.put_u32(self.parent_close_time);
        buf.put_u32(self.close_time);
        buf.put_u8(self.close_resolution);
        buf.put_u8(self.close_flags);
        buf.to_vec()
    }

    /// Parse the fixed layout, rejecting any length deviation
    pub fn from_wire(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);
        let header = Self {
            sequence: reader.u32()?,
            total_coins: reader.u64()?,
            parent_hash: Hash256::from_slice(reader.take(32)?)?,
            transaction_hash: Hash256::from_slice(reader.take(32)?)?,
            account_hash: Hash256::from_slice(reader.take(32)?)?,
            parent_close_time: reader.u32()?,
            close_time: reader.u32()?,
            close_resolution: reader.u8()?,
            close_flags: reader.u8()?,
        };
        if !reader.is_empty() {
            return Err(Error::TrailingBytes);
        }
        Ok(header)
    }

    /// Hash identifying this ledger
    pub fn hash(&self) -> Hash256 {
        prefixed_hash(prefix::LEDGER_HEADER, &self.to_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::{Payment, Transaction, TxCommon};
    use ledger_types::Amount;

    fn account() -> AccountId {
        AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap()
    }

    fn payment(signature: Vec<u8>) -> Transaction {
        let mut common = TxCommon::new(account(), 1, Amount::from_drops(10));
        common.signing_pub_key = Some(vec![0x02; 33]);
        common.txn_signature = Some(signature);
        Transaction::Payment(Payment {
            common,
            amount: Amount::from_drops(1_000_000),
            destination: AccountId::from_bytes([9u8; 20]),
            destination_tag: None,
            invoice_id: None,
            send_max: None,
            deliver_min: None,
            paths: None,
        })
    }

    #[test]
    fn test_signing_hash_ignores_the_signature() {
        let a = payment(vec![0xDE, 0xAD]);
        let b = payment(vec![0xBE, 0xEF, 0x01]);
        // Same signing hash, different identifiers
        assert_eq!(signing_hash(&a).unwrap(), signing_hash(&b).unwrap());
        assert_ne!(transaction_id(&a).unwrap(), transaction_id(&b).unwrap());
    }

    #[test]
    fn test_domains_never_collide() {
        let content = b"same bytes";
        assert_ne!(
            prefixed_hash(prefix::TRANSACTION_ID, content),
            prefixed_hash(prefix::SIGNING, content)
        );
    }

    #[test]
    fn test_tx_node_hash_binds_all_parts() {
        let tx_id = Hash256::from_bytes([1u8; 32]);
        let base = tx_node_hash(b"tx", b"meta", tx_id).unwrap();
        assert_ne!(tx_node_hash(b"tx2", b"meta", tx_id).unwrap(), base);
        assert_ne!(tx_node_hash(b"tx", b"meta2", tx_id).unwrap(), base);
        assert_ne!(
            tx_node_hash(b"tx", b"meta", Hash256::from_bytes([2u8; 32])).unwrap(),
            base
        );
    }

    #[test]
    fn test_inner_node_of_empty_slots() {
        let empty = [Hash256::zero(); 16];
        let mut one_child = empty;
        one_child[3] = Hash256::from_bytes([1u8; 32]);
        assert_ne!(inner_node_hash(&empty), inner_node_hash(&one_child));
        // Position matters
        let mut other_slot = empty;
        other_slot[4] = Hash256::from_bytes([1u8; 32]);
        assert_ne!(inner_node_hash(&one_child), inner_node_hash(&other_slot));
    }

    #[test]
    fn test_trust_line_index_is_side_independent() {
        let a = AccountId::from_bytes([1u8; 20]);
        let b = AccountId::from_bytes([2u8; 20]);
        let usd = Currency::from_code("USD").unwrap();
        assert_eq!(
            trust_line_index(&a, &b, &usd),
            trust_line_index(&b, &a, &usd)
        );
        // But the currency is part of the key
        let eur = Currency::from_code("EUR").unwrap();
        assert_ne!(
            trust_line_index(&a, &b, &usd),
            trust_line_index(&a, &b, &eur)
        );
    }

    #[test]
    fn test_index_namespaces_are_distinct() {
        let owner = account();
        assert_ne!(account_index(&owner), owner_directory_index(&owner));
        assert_ne!(offer_index(&owner, 1), offer_index(&owner, 2));
    }

    #[test]
    fn test_ledger_header_round_trip_and_hash() {
        let header = LedgerHeader {
            sequence: 40_000,
            total_coins: 99_999_999_999_000_000,
            parent_hash: Hash256::from_bytes([1u8; 32]),
            transaction_hash: Hash256::from_bytes([2u8; 32]),
            account_hash: Hash256::from_bytes([3u8; 32]),
            parent_close_time: 700_000_000,
            close_time: 700_000_010,
            close_resolution: 10,
            close_flags: 0,
        };
        let wire = header.to_wire();
        assert_eq!(wire.len(), LedgerHeader::LEN);
        assert_eq!(LedgerHeader::from_wire(&wire).unwrap(), header);
        assert_eq!(header.hash(), header.hash());

        let mut long = wire.clone();
        long.push(0);
        assert_eq!(LedgerHeader::from_wire(&long).unwrap_err(), Error::TrailingBytes);
        assert_eq!(
            LedgerHeader::from_wire(&wire[..50]).unwrap_err(),
            Error::UnexpectedEof
        );
    }
}
