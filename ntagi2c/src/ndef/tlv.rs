// ntagi2c/src/ndef/tlv.rs
//! Type 2 tag TLV framing around an NDEF message.

use crate::constants::{TLV_EXTENDED_LENGTH, TLV_NDEF, TLV_TERMINATOR};
use crate::protocol::parser::{be_u16_at, byte_at, ensure_len};
use crate::{Error, Result};

/// Largest payload the 3-byte length form can describe.
pub const MAX_TLV_PAYLOAD: usize = u16::MAX as usize;

/// Decoded NDEF TLV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvHeader {
    /// 2 for the short form, 4 for the extended form
    pub header_len: usize,
    /// Length of the value that follows the header.
    pub payload_len: usize,
}

impl TlvHeader {
    /// Header plus payload, without the terminator.
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }

    /// Parse the first bytes of an NDEF TLV. Needs 2 bytes for the short
    /// form and 4 for the extended form.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let kind = byte_at(bytes, 0)?;
        if kind != TLV_NDEF {
            return Err(Error::MalformedTag(format!(
                "expected NDEF TLV (0x03), found {:#04x}",
                kind
            )));
        }
        match byte_at(bytes, 1)? {
            TLV_EXTENDED_LENGTH => Ok(Self {
                header_len: 4,
                payload_len: be_u16_at(bytes, 2)? as usize,
            }),
            len => Ok(Self {
                header_len: 2,
                payload_len: len as usize,
            }),
        }
    }

    /// Header for a payload of `payload_len` bytes, three-byte form past 254.
    pub fn for_payload(payload_len: usize) -> Result<Self> {
        if payload_len > MAX_TLV_PAYLOAD {
            return Err(Error::DataTooLong {
                length: payload_len,
                capacity: MAX_TLV_PAYLOAD,
            });
        }
        let header_len = if payload_len < TLV_EXTENDED_LENGTH as usize { 2 } else { 4 };
        Ok(Self {
            header_len,
            payload_len,
        })
    }

    /// Header bytes.
    pub fn encode(&self) -> Vec<u8> {
        if self.header_len == 2 {
            vec![TLV_NDEF, self.payload_len as u8]
        } else {
            let len = (self.payload_len as u16).to_be_bytes();
            vec![TLV_NDEF, TLV_EXTENDED_LENGTH, len[0], len[1]]
        }
    }
}

/// An NDEF message TLV: `03 len payload`, followed by the `FE` terminator
/// when written to a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefTlv {
    payload: Vec<u8>,
}

impl NdefTlv {
    /// TLV around an encoded message.
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// Encoded message.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Take the encoded message.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Bytes as written to the tag, terminator included.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = TlvHeader::for_payload(self.payload.len())?;
        let mut out = header.encode();
        out.reserve(self.payload.len() + 1);
        out.extend_from_slice(&self.payload);
        out.push(TLV_TERMINATOR);
        Ok(out)
    }

    /// Decode from the start of `bytes`. Bytes after the payload, including
    /// the terminator, are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = TlvHeader::parse(bytes)?;
        ensure_len(bytes, header.total_len())?;
        Ok(Self {
            payload: bytes[header.header_len..header.total_len()].to_vec(),
        })
    }
}
