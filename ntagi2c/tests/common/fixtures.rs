// fixtures.rs — commonly used tag contents

use ntagi2c::constants::{CC_SIGNATURE_1K, CC_SIGNATURE_2K};

/// NDEF TLV holding the English text record "Hello", terminator included.
pub fn hello_tlv() -> Vec<u8> {
    hex::decode("030cd101085402656e48656c6c6ffe").unwrap()
}

/// First 16 bytes of a tag with the given capability container.
pub fn page0_with(cc: [u8; 4]) -> Vec<u8> {
    let mut page0 = hex::decode("04a1b2dbc3d4e5f6d248000000").unwrap();
    page0.truncate(12);
    page0.extend_from_slice(&cc);
    page0
}

pub fn page0_1k() -> Vec<u8> {
    page0_with(CC_SIGNATURE_1K)
}

pub fn page0_2k() -> Vec<u8> {
    page0_with(CC_SIGNATURE_2K)
}

/// A text record as the demo firmware publishes temperatures: current
/// reading 23.5 C followed by five history slots.
pub fn temperature_text() -> String {
    [
        "TEMP0  235",
        "TEMP1  231",
        "TEMP2  228",
        "TEMP3  226",
        "TEMP4  240",
        "TEMP5  251",
    ]
    .concat()
}
