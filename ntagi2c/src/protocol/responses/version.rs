// ntagi2c/src/protocol/responses/version.rs
//! The eight-byte GET_VERSION answer.

use crate::constants::VERSION_LEN;
use crate::protocol::parser::{byte_at, ensure_len};

/// The 8-byte GET_VERSION answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    /// Fixed header byte.
    pub header: u8,
    /// Vendor id, 0x04 for NXP.
    pub vendor: u8,
    /// Product type, 0x04 for NTAG.
    pub product_type: u8,
    /// Product subtype.
    pub subtype: u8,
    /// Major product version.
    pub major: u8,
    /// Minor product version.
    pub minor: u8,
    /// Encoded storage size.
    pub storage_size: u8,
    /// Protocol type.
    pub protocol_type: u8,
}

impl VersionInfo {
    /// Decode an eight-byte answer.
    pub fn decode(data: &[u8]) -> crate::Result<Self> {
        ensure_len(data, VERSION_LEN)?;
        Ok(Self {
            header: byte_at(data, 0)?,
            vendor: byte_at(data, 1)?,
            product_type: byte_at(data, 2)?,
            subtype: byte_at(data, 3)?,
            major: byte_at(data, 4)?,
            minor: byte_at(data, 5)?,
            storage_size: byte_at(data, 6)?,
            protocol_type: byte_at(data, 7)?,
        })
    }

    /// The answer as sent by the tag.
    pub fn to_bytes(&self) -> [u8; VERSION_LEN] {
        [
            self.header,
            self.vendor,
            self.product_type,
            self.subtype,
            self.major,
            self.minor,
            self.storage_size,
            self.protocol_type,
        ]
    }
}
