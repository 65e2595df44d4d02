//! End-to-end signing flow
//!
//! Build a payment, hash its signing form, sign, attach the signature,
//! and check that the final wire bytes verify: the full path a bridge
//! service walks before submitting a transaction.

use ledger_codec::{hashing, EncodeMode, Payment, Transaction, TxCommon};
use ledger_keys::{verify_signature, EcdsaKeyPair, KeyPair};
use ledger_types::{AccountId, Amount};

fn unsigned_payment(key: &EcdsaKeyPair, sequence: Option<u32>) -> Transaction {
    let account = key.account_id(sequence);
    let mut common = TxCommon::new(account, 1, Amount::from_drops(10));
    common.signing_pub_key = Some(key.public_key(sequence).as_bytes().to_vec());
    Transaction::Payment(Payment {
        common,
        amount: Amount::from_drops(25_000_000),
        destination: AccountId::from_hex("0123456789ABCDEF0123456789ABCDEF01234567").unwrap(),
        destination_tag: Some(42),
        invoice_id: None,
        send_max: None,
        deliver_min: None,
        paths: None,
    })
}

#[test]
fn sign_encode_decode_verify() {
    let key = EcdsaKeyPair::from_passphrase("masterpassphrase");
    let mut tx = unsigned_payment(&key, Some(0));

    // Sign the signing-form hash and attach the signature
    let to_sign = hashing::signing_hash(&tx).unwrap();
    let signature = key.sign(Some(0), &to_sign);
    tx.common_mut().txn_signature = Some(signature);

    // Final wire bytes round-trip and still verify
    let wire = tx.encode(EncodeMode::Raw).unwrap();
    let received = Transaction::decode(&wire).unwrap();
    let rehashed = hashing::signing_hash(&received).unwrap();
    assert_eq!(rehashed, to_sign);

    let public = received.common().signing_pub_key.clone().unwrap();
    let public = ledger_types::PublicKey::from_slice(&public).unwrap();
    let signature = received.common().txn_signature.clone().unwrap();
    assert!(verify_signature(&public, &rehashed, &signature));

    // The content hash covers the signature; the signing hash does not
    assert_ne!(
        hashing::transaction_id(&received).unwrap(),
        hashing::signing_hash(&received).unwrap()
    );
}

#[test]
fn signature_from_another_family_sequence_fails() {
    let key = EcdsaKeyPair::from_passphrase("masterpassphrase");
    let tx = unsigned_payment(&key, Some(0));
    let to_sign = hashing::signing_hash(&tx).unwrap();

    // Signed with the sequence-1 key, checked against sequence 0
    let foreign = key.sign(Some(1), &to_sign);
    assert!(!verify_signature(&key.public_key(Some(0)), &to_sign, &foreign));
    assert!(verify_signature(&key.public_key(Some(1)), &to_sign, &foreign));
}

#[test]
fn tx_node_hash_composes_transaction_and_metadata() {
    let key = EcdsaKeyPair::from_passphrase("masterpassphrase");
    let tx = unsigned_payment(&key, Some(0));
    let tx_blob = tx.encode(EncodeMode::Raw).unwrap();
    let tx_id = hashing::transaction_id(&tx).unwrap();

    let meta = ledger_codec::TransactionMeta {
        transaction_index: 0,
        transaction_result: 0,
        affected_nodes: vec![],
        delivered_amount: Some(Amount::from_drops(25_000_000)),
    };
    let meta_blob = meta.encode().unwrap();

    let node = hashing::tx_node_hash(&tx_blob, &meta_blob, tx_id).unwrap();
    // Any change to the metadata moves the node hash
    let mut other = meta;
    other.transaction_index = 1;
    let other_node = hashing::tx_node_hash(&tx_blob, &other.encode().unwrap(), tx_id).unwrap();
    assert_ne!(node, other_node);
}
