#[path = "../common/mod.rs"]
mod common;

use ntagi2c::ndef::{DEFAULT_NDEF_MESSAGE, default_message};
use ntagi2c::prelude::*;
use proptest::prelude::*;

#[test]
fn factory_message_has_poster_and_application_record() {
    let msg = NdefMessage::parse(&DEFAULT_NDEF_MESSAGE).unwrap();
    assert_eq!(msg, default_message());
    let records = msg.records();
    assert_eq!(records[0].record_type, b"Sp".to_vec());
    assert_eq!(records[1].tnf, Tnf::External);
    assert_eq!(records[1].payload, b"com.nxp.ntagi2cdemo_".to_vec());
}

#[test]
fn uri_prefix_abbreviation() {
    let rec = NdefRecord::uri("https://www.nxp.com");
    assert_eq!(rec.payload[0], 0x02);
    assert_eq!(&rec.payload[1..], b"nxp.com");
    assert_eq!(rec.as_uri().as_deref(), Some("https://www.nxp.com"));
}

#[test]
fn record_with_id_round_trips() {
    let rec = NdefRecord::text("de", "Hallo").with_id(b"t1");
    let msg = NdefMessage::new(vec![rec.clone()]);
    let back = NdefMessage::parse(&msg.to_bytes().unwrap()).unwrap();
    assert_eq!(back.records(), &[rec]);
    assert_eq!(back.records()[0].text_language().as_deref(), Some("de"));
}

#[test]
fn chunked_record_is_rejected() {
    // MB | ME | CF | SR, well-known
    match NdefMessage::parse(&[0xF1, 0x01, 0x01, 0x54, 0x00]) {
        Err(Error::NdefFormat(_)) => {}
        other => panic!("expected NdefFormat, got {:?}", other),
    }
}

#[test]
fn utf16_text_is_decoded() {
    let mut payload = vec![0x82, b'e', b'n'];
    for unit in "Grüße".encode_utf16() {
        payload.extend_from_slice(&unit.to_be_bytes());
    }
    let rec = NdefRecord::new(Tnf::WellKnown, b"T", payload);
    assert_eq!(rec.text_content().as_deref(), Some("Grüße"));
}

proptest! {
    #[test]
    fn text_messages_survive_serialization(text in "\\PC{1,300}") {
        let msg = NdefMessage::text(&text).unwrap();
        let back = NdefMessage::parse(&msg.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back.first_text(), Some(text));
    }
}
