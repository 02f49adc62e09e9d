// ntagi2c/src/protocol/commands/write.rs
//! WRITE frame.

use crate::types::Block;

/// Encode WRITE (0xA2)
/// Layout: command_code(1) + page(1) + data(4)
pub fn encode_write(page: u8, data: &Block) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + crate::constants::BLOCK_SIZE);
    buf.push(crate::constants::CMD_WRITE);
    buf.push(page);
    buf.extend_from_slice(data.as_bytes());
    buf
}
