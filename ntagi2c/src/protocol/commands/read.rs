// ntagi2c/src/protocol/commands/read.rs
//! READ and FAST_READ frames.

/// Encode READ (0x30): four pages starting at `page`
pub fn encode_read(page: u8) -> Vec<u8> {
    vec![crate::constants::CMD_READ, page]
}

/// Encode FAST_READ (0x3A): pages `start..=end`
pub fn encode_fast_read(start: u8, end: u8) -> Vec<u8> {
    vec![crate::constants::CMD_FAST_READ, start, end]
}
