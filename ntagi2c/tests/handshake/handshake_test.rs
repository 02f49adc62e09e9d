#[path = "../common/mod.rs"]
mod common;

use ntagi2c::handshake::HandshakeRow;
use ntagi2c::prelude::*;
use ntagi2c::test_support::{demo_board_tag, fast_handshake, full_reader_for, minimal_reader_for};
use ntagi2c::transport::{MockTag, SimulatedTag};

#[test]
fn granted_claim_is_visible_on_the_tag() {
    let tag = demo_board_tag(TagProduct::Ntag2k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag2k).unwrap();
    let hs = Handshake::new(fast_handshake(10));

    assert!(hs.acquire(&mut reader).unwrap().is_granted());
    let row = tag.state().page(0, 0x05);
    assert_eq!(HandshakeRow::decode(&row), Some(HandshakeRow::new(SlotState::Busy)));

    hs.release(&mut reader).unwrap();
    let row = tag.state().page(0, 0x05);
    assert_eq!(HandshakeRow::decode(&row), Some(HandshakeRow::new(SlotState::Idle)));
}

#[test]
fn busy_embedded_side_degrades_after_retries() {
    common::helpers::init_logger();
    let tag = common::helpers::busy_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let outcome = Handshake::new(fast_handshake(7)).acquire(&mut reader).unwrap();
    assert_eq!(outcome, Acquire::Degraded { attempts: 7 });
    assert_eq!(outcome.attempts(), 7);
    // the phone row was never claimed
    assert!(tag.state().commands_with_code(0xA2).is_empty());
}

#[test]
fn embedded_side_frees_the_memory_midway() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag1k).with_embedded_script(
        [SlotState::Busy, SlotState::Busy, SlotState::Busy],
        Some(SlotState::Idle),
    ));
    let mut reader = minimal_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let outcome = Handshake::new(fast_handshake(10)).acquire(&mut reader).unwrap();
    assert_eq!(outcome, Acquire::Granted { attempts: 4 });
}

#[test]
fn check_only_makes_a_single_attempt() {
    let tag = common::helpers::busy_tag(TagProduct::Ntag1k);
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let hs = Handshake::new(fast_handshake(1000));
    assert!(!hs.check_only(&mut reader).unwrap());
    assert_eq!(tag.state().status_observations, 1);
}

#[test]
fn custom_status_page() {
    let tag = MockTag::new({
        let mut sim = SimulatedTag::new(TagProduct::Ntag1k)
            .with_embedded_script([], Some(SlotState::Idle));
        sim.status_page = 0x10;
        sim
    });
    let mut reader = full_reader_for(&tag, TagProduct::Ntag1k).unwrap();
    let mut config = fast_handshake(3);
    config.status_page = 0x10;
    assert!(Handshake::new(config).acquire(&mut reader).unwrap().is_granted());
    assert_eq!(tag.state().page(0, 0x11), [0xFD, 0x02, 0x01, 0x00]);
}
