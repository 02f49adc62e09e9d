// ntagi2c/src/protocol/commands/sector.rs
//! The two SECTOR_SELECT packets.

use crate::constants::{CMD_SECTOR_SELECT, SECTOR_SELECT_PACKET1_ARG};

/// Encode SECTOR_SELECT packet 1 (`C2 FF`)
pub fn encode_sector_select_packet1() -> Vec<u8> {
    vec![CMD_SECTOR_SELECT, SECTOR_SELECT_PACKET1_ARG]
}

/// Encode SECTOR_SELECT packet 2: the sector number followed by three RFU bytes
pub fn encode_sector_select_packet2(sector: u8) -> Vec<u8> {
    vec![sector, 0x00, 0x00, 0x00]
}
