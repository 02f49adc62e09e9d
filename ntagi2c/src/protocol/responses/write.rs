// ntagi2c/src/protocol/responses/write.rs
//! ACK/NAK answers to WRITE and SECTOR_SELECT.

use crate::constants::ACK;
use crate::protocol::parser::reject_nak;
use crate::{Error, Result};

/// Check a WRITE / SECTOR_SELECT packet 1 answer. Some transports swallow
/// the 4-bit ACK and hand back an empty answer; that counts as success.
pub fn decode_ack(data: &[u8]) -> Result<()> {
    reject_nak(data)?;
    match data {
        [] | [ACK] => Ok(()),
        other => Err(Error::Transport(format!(
            "unexpected answer to write: {}",
            crate::utils::bytes_to_hex_spaced(other)
        ))),
    }
}
