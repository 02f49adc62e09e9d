#[path = "../common/mod.rs"]
mod common;

use ntagi2c::prelude::*;

#[test]
fn parses_record_inside_tag_dump() {
    let mut content = hex::decode("04a1b2dbc3d4e5f6d2480000e1106d00").unwrap();
    content.extend_from_slice(&[0xFD, 0x02, 0x00, 0x00, 0xFD, 0x02, 0x01, 0x00]);
    content.extend_from_slice(&[0x03, 0x46, 0xD1, 0x01, 0x42, 0x54, 0x02]);
    content.extend_from_slice(b"en");
    content.extend_from_slice(common::fixtures::temperature_text().as_bytes());
    let report = TemperatureReport::parse(&content).unwrap();
    assert_eq!(report.current, 235);
    assert_eq!(report.current_fahrenheit(), 74.3);
}

#[test]
fn blank_padded_fields() {
    let mut content = b"en".to_vec();
    content.extend_from_slice(b"TEMP0    5TEMP1   10TEMP2  100TEMP3 1000TEMP410000TEMP5     ");
    let report = TemperatureReport::parse(&content).unwrap();
    assert_eq!(report.current, 5);
    assert_eq!(report.history, [10, 100, 1000, 10000, 0]);
}
