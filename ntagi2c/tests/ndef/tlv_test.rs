#[path = "../common/mod.rs"]
mod common;

use ntagi2c::ndef::{NdefTlv, TlvHeader};
use ntagi2c::prelude::*;

#[test]
fn hello_fixture_decodes() {
    let tlv = NdefTlv::decode(&common::fixtures::hello_tlv()).unwrap();
    let msg = NdefMessage::parse(tlv.payload()).unwrap();
    assert_eq!(msg.first_text().as_deref(), Some("Hello"));
}

#[test]
fn header_needs_its_length_bytes() {
    match TlvHeader::parse(&[0x03, 0xFF, 0x01]) {
        Err(Error::InvalidLength { expected: 4, actual: 3 }) => {}
        other => panic!("expected InvalidLength, got {:?}", other),
    }
}

#[test]
fn truncated_payload_is_rejected() {
    match NdefTlv::decode(&[0x03, 0x05, 0xD1, 0x01]) {
        Err(Error::InvalidLength { .. }) => {}
        other => panic!("expected InvalidLength, got {:?}", other),
    }
}

#[test]
fn oversized_payload_cannot_be_framed() {
    match NdefTlv::new(vec![0; 70_000]).encode() {
        Err(Error::DataTooLong { length: 70_000, .. }) => {}
        other => panic!("expected DataTooLong, got {:?}", other.map(|b| b.len())),
    }
}
