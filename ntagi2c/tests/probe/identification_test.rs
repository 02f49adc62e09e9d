#[path = "../common/mod.rs"]
mod common;

use ntagi2c::prelude::*;
use ntagi2c::product::{identify_capability_container, identify_passive};
use ntagi2c::protocol::VersionInfo;
use ntagi2c::transport::{MockTag, SimulatedTag};

#[test]
fn capability_container_signatures() {
    assert_eq!(
        identify_capability_container(&common::fixtures::page0_1k()).unwrap(),
        Capacity::OneK
    );
    assert_eq!(
        identify_capability_container(&common::fixtures::page0_2k()).unwrap(),
        Capacity::TwoK
    );
}

#[test]
fn wrong_vendor_is_unsupported() {
    let mut page0 = common::fixtures::page0_1k();
    page0[0] = 0x05;
    match identify_capability_container(&page0) {
        Err(Error::UnsupportedTag) => {}
        other => panic!("expected UnsupportedTag, got {:?}", other),
    }
}

#[test]
fn short_page_is_invalid_length() {
    match identify_capability_container(&[0x04, 0x00]) {
        Err(Error::InvalidLength { .. }) => {}
        other => panic!("expected InvalidLength, got {:?}", other),
    }
}

#[test]
fn passive_path_tells_plus_from_standard() {
    for product in [
        TagProduct::Ntag1k,
        TagProduct::Ntag2k,
        TagProduct::NtagPlus1k,
        TagProduct::NtagPlus2k,
    ] {
        let tag = MockTag::new(SimulatedTag::new(product));
        let mut transport = tag.open(Technology::MifareUltralight).unwrap();
        transport.connect().unwrap();
        let found = identify_passive(|page| transport.read_pages(page)).unwrap();
        assert_eq!(found, product);
    }
}

#[test]
fn unreadable_session_page_falls_back_to_standard() {
    let tag = MockTag::new(SimulatedTag::new(TagProduct::NtagPlus2k).with_failing_page(0, 0xEC));
    let mut transport = tag.open(Technology::MifareUltralight).unwrap();
    transport.connect().unwrap();
    let found = identify_passive(|page| transport.read_pages(page)).unwrap();
    assert_eq!(found, TagProduct::Ntag2k);
}

#[test]
fn version_answer_bytes() {
    let raw = hex::decode("0004040502021503").unwrap();
    let info = VersionInfo::decode(&raw).unwrap();
    assert_eq!(TagProduct::from_version(&info), TagProduct::NtagPlus2k);
    assert_eq!(info.to_bytes().to_vec(), raw);
}
