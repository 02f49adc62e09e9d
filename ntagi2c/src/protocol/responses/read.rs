// ntagi2c/src/protocol/responses/read.rs
//! Page data returned by READ and FAST_READ.

use crate::protocol::parser::{ensure_len, reject_nak};

/// Decode a READ/FAST_READ answer, returning exactly `expected` bytes.
pub fn decode_pages(data: &[u8], expected: usize) -> crate::Result<Vec<u8>> {
    reject_nak(data)?;
    ensure_len(data, expected)?;
    Ok(data[..expected].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_read_is_rejected() {
        match decode_pages(&[0u8; 12], 16) {
            Err(crate::Error::InvalidLength { expected: 16, actual: 12 }) => {}
            other => panic!("expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn trailing_bytes_are_dropped() {
        let data: Vec<u8> = (0..18).collect();
        assert_eq!(decode_pages(&data, 16).unwrap(), (0..16).collect::<Vec<u8>>());
    }
}
