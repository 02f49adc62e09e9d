#[path = "../common/mod.rs"]
mod common;

use ntagi2c::prelude::*;
use ntagi2c::transport::{MockTag, SimulatedTag};

fn all_products() -> Vec<TagProduct> {
    vec![
        TagProduct::Ntag1k,
        TagProduct::Ntag2k,
        TagProduct::Ntag1kT,
        TagProduct::Ntag2kT,
        TagProduct::Ntag1kV,
        TagProduct::Ntag2kV,
        TagProduct::NtagPlus1k,
        TagProduct::NtagPlus2k,
    ]
}

#[test]
fn every_product_gets_a_full_reader_when_get_version_works() {
    common::helpers::init_logger();
    for product in all_products() {
        let tag = MockTag::new(SimulatedTag::new(product));
        let mut reader = probe(&tag).unwrap();
        assert_eq!(reader.kind(), ReaderKind::Full, "{}", product);
        assert_eq!(reader.product().unwrap(), product);
    }
}

#[test]
fn probe_never_holds_two_connections() {
    let cases = vec![
        SimulatedTag::new(TagProduct::Ntag2k),
        SimulatedTag::new(TagProduct::Ntag2k).without_get_version(),
        SimulatedTag::new(TagProduct::Ntag2k).with_min_timeout(60),
        SimulatedTag::new(TagProduct::NtagPlus1k)
            .without_get_version()
            .without_sector_select(),
    ];
    for sim in cases {
        let tag = MockTag::new(sim);
        let _reader = probe(&tag).unwrap();
        let state = tag.state();
        assert_eq!(state.connect_conflicts, 0);
        assert!(state.open_connection.is_none());
    }
}

#[test]
fn timeout_gate_at_exactly_the_limit_skips_active_probes() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag1k).with_min_timeout(50));
    let reader = probe(&tag).unwrap();
    assert_eq!(reader.kind(), ReaderKind::Minimal);
    // GET_VERSION went out over MifareUltralight only
    assert_eq!(tag.state().commands_with_code(0x60).len(), 1);
    assert!(tag.state().commands_with_code(0xC2).is_empty());
}

#[test]
fn custom_timeout_limit_is_honoured() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag1k).with_min_timeout(60));
    let config = ProbeConfig {
        sector_select_timeout_limit_ms: 100,
        ..ProbeConfig::default()
    };
    let reader = probe_with(&tag, &config).unwrap();
    assert_eq!(reader.kind(), ReaderKind::Full);
}

#[test]
fn ultralight_only_tag_gets_minimal_reader() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag2kT))
        .with_technologies(vec![Technology::MifareUltralight, Technology::Ndef]);
    let mut reader = probe(&tag).unwrap();
    assert_eq!(reader.kind(), ReaderKind::Minimal);
    assert_eq!(reader.product().unwrap(), TagProduct::Ntag2kT);
}

#[test]
fn total_failure_reports_last_error() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::Ntag1k));
    tag.state().present = false;
    match probe(&tag) {
        Err(Error::ReaderUnavailable { last_error }) => {
            assert!(last_error.contains("tag was lost"), "{}", last_error);
        }
        Err(other) => panic!("expected ReaderUnavailable, got {:?}", other),
        Ok(reader) => panic!("expected ReaderUnavailable, got a {} reader", reader.kind()),
    }
}
