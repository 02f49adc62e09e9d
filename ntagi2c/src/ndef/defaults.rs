// ntagi2c/src/ndef/defaults.rs
//! Factory contents of the demo board.

use crate::constants::{TLV_NDEF, TLV_TERMINATOR};
use crate::ndef::{NdefMessage, NdefRecord};

/// `03 00 FE 00`: an empty NDEF TLV, terminator and padding.
pub const EMPTY_NDEF_TLV: [u8; 4] = [TLV_NDEF, 0x00, TLV_TERMINATOR, 0x00];

/// Smart poster "NTAG I2C EXPLORER" -> http://www.nxp.com/demoboard/OM5569,
/// followed by an Android application record.
pub const DEFAULT_NDEF_MESSAGE: [u8; 96] = [
    0x91, 0x02, 0x35, 0x53, 0x70, 0x91, 0x01, 0x14, 0x54, 0x02, 0x65, 0x6E, 0x4E, 0x54, 0x41, 0x47,
    0x20, 0x49, 0x32, 0x43, 0x20, 0x45, 0x58, 0x50, 0x4C, 0x4F, 0x52, 0x45, 0x52, 0x51, 0x01, 0x19,
    0x55, 0x01, 0x6E, 0x78, 0x70, 0x2E, 0x63, 0x6F, 0x6D, 0x2F, 0x64, 0x65, 0x6D, 0x6F, 0x62, 0x6F,
    0x61, 0x72, 0x64, 0x2F, 0x4F, 0x4D, 0x35, 0x35, 0x36, 0x39, 0x54, 0x0F, 0x14, 0x61, 0x6E, 0x64,
    0x72, 0x6F, 0x69, 0x64, 0x2E, 0x63, 0x6F, 0x6D, 0x3A, 0x70, 0x6B, 0x67, 0x63, 0x6F, 0x6D, 0x2E,
    0x6E, 0x78, 0x70, 0x2E, 0x6E, 0x74, 0x61, 0x67, 0x69, 0x32, 0x63, 0x64, 0x65, 0x6D, 0x6F, 0x5F,
];

/// Title of the default smart poster.
pub const DEFAULT_POSTER_TITLE: &str = "NTAG I2C EXPLORER";
    /// URI of the default smart poster.
    pub const DEFAULT_POSTER_URI: &str = "http://www.nxp.com/demoboard/OM5569";
/// Package named by the default application record.
pub const DEFAULT_APPLICATION: &str = "com.nxp.ntagi2cdemo_";

/// The factory message as records.
pub fn default_message() -> NdefMessage {
    NdefMessage::new(vec![
        NdefRecord::smart_poster(DEFAULT_POSTER_TITLE, DEFAULT_POSTER_URI),
        NdefRecord::android_application(DEFAULT_APPLICATION),
    ])
}

/// TLV-wrapped factory message padded to whole pages (25 pages).
pub fn default_ndef_bytes() -> Vec<u8> {
    let mut out = Vec::with_capacity(DEFAULT_NDEF_MESSAGE.len() + 4);
    out.push(TLV_NDEF);
    out.push(DEFAULT_NDEF_MESSAGE.len() as u8);
    out.extend_from_slice(&DEFAULT_NDEF_MESSAGE);
    out.push(TLV_TERMINATOR);
    out.push(0x00);
    out
}
