#[path = "../common/mod.rs"]
mod common;

use ntagi2c::prelude::*;
use ntagi2c::reader::{NoProgress, ReadStep, plan_read};
use ntagi2c::test_support::{demo_board_tag, full_reader_for};
use ntagi2c::transport::{MockTag, SimulatedTag};

#[test]
fn read_across_sectors_selects_between_chunks() {
    common::helpers::init_logger();
    let tag = demo_board_tag(TagProduct::Ntag2k);
    {
        let mut state = tag.state();
        state.load(0, 0xF0, &[0x11; 64]);
        state.load(1, 0x00, &[0x22; 68]);
    }
    let mut reader = full_reader_for(&tag, TagProduct::Ntag2k).unwrap();
    let data = reader.read_range(0xF0, 0x110).unwrap();

    assert_eq!(data.len(), (0x110 - 0xF0 + 1) * 4);
    assert!(data[..64].iter().all(|b| *b == 0x11));
    assert!(data[64..].iter().all(|b| *b == 0x22));

    let state = tag.state();
    assert_eq!(state.sector_selects(), vec![1, 0]);
    assert_eq!(state.sector, 0);
    // the select sits between the two FAST_READs
    let order: Vec<u8> = state
        .log
        .iter()
        .filter_map(|p| p.first().copied())
        .filter(|c| *c == 0x3A || *c == 0xC2)
        .collect();
    assert_eq!(order, vec![0x3A, 0xC2, 0x3A, 0xC2]);
}

#[test]
fn fast_read_chunks_follow_transceive_limit() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag1k).with_max_transceive_len(34));
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let data = reader.read_range(0x00, 0x1F).unwrap();
    assert_eq!(data.len(), 32 * 4);
    // (34 - 2) / 4 = 8 pages per FAST_READ
    let reads = tag.state().commands_with_code(0x3A);
    assert_eq!(reads.len(), 4);
    assert_eq!(reads[1], vec![0x3A, 0x08, 0x0F]);
}

#[test]
fn plan_for_plus_2k_keeps_configuration_registers_out() {
    let steps = plan_read(TagProduct::NtagPlus2k, 0x00, 0x1E1, 62, 0);
    let mut sector = 0u8;
    for step in &steps {
        match *step {
            ReadStep::SelectSector(s) => sector = s,
            ReadStep::FastRead { start, end } => {
                assert!(start <= end);
                if sector == 0 {
                    assert!(end <= 0xE1, "sector 0 read reaches {:#x}", end);
                }
            }
        }
    }
    assert_eq!(steps.last(), Some(&ReadStep::SelectSector(0)));
}

#[test]
fn write_range_fills_both_sectors_of_2k() {
    let tag = demo_board_tag(TagProduct::Ntag2k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag2k).unwrap();
    let capacity = reader.write_capacity().unwrap();
    assert_eq!(capacity, 1904 - 8);
    let data: Vec<u8> = (0..capacity).map(|i| (i % 251) as u8).collect();
    reader.write_range(&data, &mut NoProgress).unwrap();

    let state = tag.state();
    let first = state.bytes(0, 0x06, (0x100 - 0x06) * 4);
    assert_eq!(first, data[..first.len()].to_vec());
    let rest = state.bytes(1, 0x00, data.len() - first.len());
    assert_eq!(rest, data[first.len()..].to_vec());
    assert_eq!(state.sector, 0);
}

#[test]
fn write_range_over_capacity_is_rejected() {
    let tag = demo_board_tag(TagProduct::NtagPlus1k);
    let mut reader = full_reader_for(&tag, TagProduct::NtagPlus1k).unwrap();
    match reader.write_range(&vec![0u8; 881], &mut NoProgress) {
        Err(Error::DataTooLong { length, capacity }) => {
            assert_eq!(length, 881);
            assert_eq!(capacity, 880);
        }
        other => panic!("expected DataTooLong, got {:?}", other),
    }
}

#[test]
fn write_raw_at_crosses_from_sector0_tail() {
    let tag = demo_board_tag(TagProduct::NtagPlus2k);
    let mut reader = full_reader_for(&tag, TagProduct::NtagPlus2k).unwrap();
    reader
        .write_raw_at(&[0x77; 12], 0xE0, &mut NoProgress)
        .unwrap();
    let state = tag.state();
    assert_eq!(state.page(0, 0xE0), [0x77; 4]);
    assert_eq!(state.page(0, 0xE1), [0x77; 4]);
    assert_eq!(state.page(1, 0x00), [0x77; 4]);
}

#[test]
fn uid_is_read_from_first_pages() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let uid = reader.read_uid().unwrap();
    assert_eq!(uid.as_bytes()[0], 0x04);
    assert_eq!(&uid.as_bytes()[3..], &[0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn lost_tag_surfaces_transport_error() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    tag.state().present = false;
    match reader.read_range(0, 3) {
        Err(e) if e.is_transport() => {}
        other => panic!("expected a transport error, got {:?}", other),
    }
}
