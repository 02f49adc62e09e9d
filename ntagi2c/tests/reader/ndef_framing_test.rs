#[path = "../common/mod.rs"]
mod common;

use ntagi2c::ndef::{DEFAULT_NDEF_MESSAGE, EMPTY_NDEF_TLV, default_message};
use ntagi2c::prelude::*;
use ntagi2c::reader::NoProgress;
use ntagi2c::test_support::{demo_board_tag, full_reader_for, minimal_reader_for, text_tag};

#[test]
fn hello_lands_as_tlv_at_ndef_start() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let message = NdefMessage::text("Hello").unwrap();
    reader.write_ndef_message(&message, &mut NoProgress).unwrap();

    let expected = common::fixtures::hello_tlv();
    let stored = tag.state().bytes(0, 0x06, expected.len());
    assert_eq!(stored, expected);

    let back = reader.read_ndef_message().unwrap();
    assert_eq!(back, message);
}

#[test]
fn read_fetches_only_the_pages_it_needs() {
    let tag = text_tag(TagProduct::Ntag1k, "Hello").unwrap();
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let msg = reader.read_ndef_message().unwrap();
    assert_eq!(msg.first_text().as_deref(), Some("Hello"));
    // header page, then pages 7..=9 for the rest of the 14-byte TLV
    assert_eq!(
        tag.state().commands_with_code(0x3A),
        vec![vec![0x3A, 0x06, 0x06], vec![0x3A, 0x07, 0x09]]
    );
}

#[test]
fn extended_length_round_trip() {
    let tag = demo_board_tag(TagProduct::Ntag2k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag2k).unwrap();
    let text = "x".repeat(1200);
    let message = NdefMessage::text(&text).unwrap();
    reader.write_ndef_message(&message, &mut NoProgress).unwrap();

    let header = tag.state().bytes(0, 0x06, 4);
    assert_eq!(header[0], 0x03);
    assert_eq!(header[1], 0xFF);
    assert_eq!(
        u16::from_be_bytes([header[2], header[3]]) as usize,
        message.to_bytes().unwrap().len()
    );
    assert_eq!(reader.read_ndef_message().unwrap().first_text(), Some(text));
}

#[test]
fn empty_tlv_reads_as_empty_message() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    reader.write_empty_ndef().unwrap();
    assert_eq!(tag.state().page(0, 0x06), EMPTY_NDEF_TLV);
    assert!(reader.read_ndef_message().unwrap().is_empty());
}

#[test]
fn missing_tlv_is_malformed() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    tag.state().set_page(0, 0x06, [0x01, 0x03, 0xA0, 0x0C]);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    match reader.read_ndef_message() {
        Err(Error::MalformedTag(_)) => {}
        other => panic!("expected MalformedTag, got {:?}", other),
    }
}

#[test]
fn default_message_restores_factory_content() {
    let tag = demo_board_tag(TagProduct::NtagPlus2k);
    let mut reader = full_reader_for(&tag, TagProduct::NtagPlus2k).unwrap();
    reader.write_default_ndef().unwrap();
    let stored = tag.state().bytes(0, 0x06, DEFAULT_NDEF_MESSAGE.len() + 2);
    assert_eq!(&stored[..2], &[0x03, 0x60]);
    assert_eq!(&stored[2..], &DEFAULT_NDEF_MESSAGE[..]);
    assert_eq!(reader.read_ndef_message().unwrap(), default_message());
}

#[test]
fn bare_layout_starts_at_page_4() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k)
        .unwrap()
        .with_layout(MemoryLayout::BARE);
    reader.write_empty_ndef().unwrap();
    assert_eq!(tag.state().page(0, 0x04), EMPTY_NDEF_TLV);
    assert_eq!(reader.write_capacity().unwrap(), 888);
}
