#[path = "../common/mod.rs"]
mod common;

use ntagi2c::constants::MINIMAL_FIRST_SECTOR_BYTES;
use ntagi2c::prelude::*;
use ntagi2c::reader::NoProgress;
use ntagi2c::test_support::minimal_reader_for;

#[test]
fn partial_group_is_sliced_from_anchored_read() {
    let tag = common::helpers::passive_only_tag(TagProduct::Ntag1k);
    let content: Vec<u8> = (0u8..24).collect();
    tag.state().load(0, 0x20, &content);
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag1k).unwrap();

    let data = reader.read_range(0x20, 0x25).unwrap();
    assert_eq!(data, content);
    assert_eq!(
        tag.state().commands_with_code(0x30),
        vec![vec![0x30, 0x20], vec![0x30, 0x22]]
    );
}

#[test]
fn end_is_clamped_to_sector0_on_1k() {
    let tag = common::helpers::passive_only_tag(TagProduct::Ntag1k);
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let data = reader.read_range(0xFC, 0x120).unwrap();
    assert_eq!(data.len(), 16);
}

#[test]
fn plus_2k_reads_stop_at_e1() {
    let tag = common::helpers::passive_only_tag(TagProduct::NtagPlus2k);
    let mut reader = minimal_reader_for(&tag, TagProduct::NtagPlus2k).unwrap();
    assert_eq!(reader.read_range(0xDE, 0xE1).unwrap().len(), 16);
    match reader.read_range(0xDE, 0xE2) {
        Err(Error::SectorNotSupported(_)) => {}
        other => panic!("expected SectorNotSupported, got {:?}", other),
    }
}

#[test]
fn oversized_write_on_2k_needs_sector_select() {
    let tag = common::helpers::passive_only_tag(TagProduct::Ntag2k);
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag2k).unwrap();
    let data = vec![0xAB; MINIMAL_FIRST_SECTOR_BYTES];
    match reader.write_range(&data, &mut NoProgress) {
        Err(Error::SectorNotSupported(_)) => {}
        other => panic!("expected SectorNotSupported, got {:?}", other),
    }
    assert!(tag.state().commands_with_code(0xA2).is_empty());
}

#[test]
fn progress_is_cumulative() {
    let tag = common::helpers::passive_only_tag(TagProduct::Ntag1k);
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let mut seen = Vec::new();
    let mut sink = |n: usize| seen.push(n);
    reader.write_range(&[9u8; 13], &mut sink).unwrap();
    assert_eq!(seen, vec![4, 8, 12, 13]);
}
