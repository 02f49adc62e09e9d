// ntagi2c/src/types.rs
//! Page-sized and UID value types.

use crate::Error;
use crate::constants::BLOCK_SIZE;
use std::convert::TryFrom;

/// One 4-byte page of tag memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    /// Page from its four bytes.
    pub const fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// The four bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Take up to four bytes from `chunk`, zero-padding the rest.
    pub fn padded(chunk: &[u8]) -> Self {
        let mut arr = [0u8; BLOCK_SIZE];
        let n = chunk.len().min(BLOCK_SIZE);
        arr[..n].copy_from_slice(&chunk[..n]);
        Self(arr)
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// 7-byte UID of an NTAG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid([u8; 7]);

impl Uid {
    /// UID from its seven bytes.
    pub fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// The seven bytes.
    pub fn as_bytes(&self) -> &[u8; 7] {
        &self.0
    }

    /// Uppercase hex, no separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Extract the UID from the first two pages, skipping the check byte
    /// BCC0 at offset 3.
    pub fn from_pages(pages: &[u8]) -> crate::Result<Self> {
        crate::protocol::parser::ensure_len(pages, 8)?;
        let mut arr = [0u8; 7];
        arr[..3].copy_from_slice(&pages[..3]);
        arr[3..].copy_from_slice(&pages[4..8]);
        Ok(Self(arr))
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 7 {
            return Err(Error::InvalidLength {
                expected: 7,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 7];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::utils::bytes_to_hex_spaced(self.as_bytes()))
    }
}
