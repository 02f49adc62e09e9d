#[path = "../common/mod.rs"]
mod common;

use ntagi2c::prelude::*;
use ntagi2c::test_support::{demo_board_tag, fast_demo_config};

#[test]
fn hello_end_to_end() {
    common::helpers::init_logger();
    let tag = demo_board_tag(TagProduct::NtagPlus2k);
    let mut demo = Demo::discover(&tag, fast_demo_config()).unwrap();

    let report = match demo.run(DemoRequest::WriteText("Hello".into())).unwrap() {
        DemoReport::Write(report) => report,
        other => panic!("expected a write report, got {:?}", other),
    };
    assert_eq!(report.handshake, Acquire::Granted { attempts: 1 });
    assert_eq!(report.stats.bytes, 15);
    assert!(report.stats.to_string().starts_with("Speed (15 Byte / "));

    assert_eq!(
        tag.state().bytes(0, 0x06, 15),
        common::fixtures::hello_tlv()
    );
    assert_eq!(demo.read_ndef().unwrap().first_text().as_deref(), Some("Hello"));
}

#[test]
fn read_once_returns_whole_content() {
    let tag = demo_board_tag(TagProduct::Ntag2k);
    let mut demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    let report = demo.read_once().unwrap();
    // pages 0..=(1904 + 16) / 4
    assert_eq!(report.data.len(), 481 * 4);
    assert_eq!(&report.data[..1], &[0x04]);
    // handshake row released after the read
    assert_eq!(tag.state().page(0, 0x05), [0xFD, 0x02, 0x00, 0x00]);
}

#[test]
fn temperature_record_is_decoded() {
    let text = common::fixtures::temperature_text();
    let tag = ntagi2c::test_support::text_tag(TagProduct::Ntag1k, &text).unwrap();
    let mut demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    let report = demo.read_once().unwrap();
    let temperature = report.temperature.unwrap();
    assert_eq!(temperature.current, 235);
    assert_eq!(temperature.history, [231, 228, 226, 240, 251]);
}

#[test]
fn write_and_reset_helpers() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    demo.write_default_ndef().unwrap();
    assert_eq!(demo.read_ndef().unwrap().records().len(), 2);
    demo.write_empty_ndef().unwrap();
    assert!(demo.read_ndef().unwrap().is_empty());
    demo.reset_tag_content().unwrap();
    assert_eq!(tag.state().bytes(0, 0x06, 16), vec![0u8; 16]);
    assert_eq!(demo.product().unwrap(), TagProduct::Ntag1k);
}

#[test]
fn text_larger_than_memory_is_too_long() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let mut demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    match demo.write_text(&"y".repeat(900)) {
        Err(Error::DataTooLong { .. }) => {}
        other => panic!("expected DataTooLong, got {:?}", other),
    }
    // the claim is withdrawn even when the write fails
    assert_eq!(tag.state().page(0, 0x05), [0xFD, 0x02, 0x00, 0x00]);
}
