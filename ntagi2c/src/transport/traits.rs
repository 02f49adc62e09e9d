// ntagi2c/src/transport/traits.rs
//! Transport and tag-handle traits implemented by NFC stacks.

use crate::constants::DEFAULT_MAX_TRANSCEIVE_LEN;
use crate::protocol::{Command, Response};
use crate::types::Block;
use crate::{Error, Result};

/// NFC technologies a discovered tag may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    /// ISO 14443-3A.
    NfcA,
    /// ISO 14443-3B.
    NfcB,
    /// JIS 6319-4.
    NfcF,
    /// ISO 15693.
    NfcV,
    /// ISO 14443-4.
    IsoDep,
    /// MIFARE Classic.
    MifareClassic,
    /// MIFARE Ultralight and NTAG.
    MifareUltralight,
    /// NDEF formatted.
    Ndef,
    /// Can be NDEF formatted.
    NdefFormatable,
}

impl Technology {
    /// Decode one byte of the technology list handed over at discovery.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::NfcA),
            0x02 => Some(Self::NfcB),
            0x03 => Some(Self::NfcF),
            0x04 => Some(Self::NfcV),
            0x05 => Some(Self::IsoDep),
            0x06 => Some(Self::MifareClassic),
            0x07 => Some(Self::MifareUltralight),
            0x08 => Some(Self::Ndef),
            0x09 => Some(Self::NdefFormatable),
            _ => None,
        }
    }

    /// Numeric id used by `from_id`.
    pub fn id(self) -> u8 {
        match self {
            Self::NfcA => 0x01,
            Self::NfcB => 0x02,
            Self::NfcF => 0x03,
            Self::NfcV => 0x04,
            Self::IsoDep => 0x05,
            Self::MifareClassic => 0x06,
            Self::MifareUltralight => 0x07,
            Self::Ndef => 0x08,
            Self::NdefFormatable => 0x09,
        }
    }

    /// Decode a technology list, skipping ids this crate does not know.
    pub fn parse_list(ids: &[u8]) -> Vec<Self> {
        ids.iter().filter_map(|id| Self::from_id(*id)).collect()
    }
}

/// One open-able connection to a tag, for a single technology.
///
/// Implementations only need `transceive` and the connection management
/// methods; the page helpers are built on top of `transceive`.
pub trait Transport: Send {
    /// Technology of this connection.
    fn technology(&self) -> Technology;

    /// Open the connection.
    fn connect(&mut self) -> Result<()>;

    /// Close the connection.
    fn close(&mut self) -> Result<()>;

    /// True while the connection is open.
    fn is_connected(&self) -> bool;

    /// Send raw bytes and return the tag's answer.
    fn transceive(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Request a transceive timeout. The transport may round it up.
    fn set_timeout(&mut self, timeout_ms: u64) -> Result<()>;

    /// Timeout currently in effect.
    fn timeout(&self) -> u64;

    /// Largest frame the link accepts.
    fn max_transceive_len(&self) -> usize {
        DEFAULT_MAX_TRANSCEIVE_LEN
    }

    /// Encode `cmd`, send it, decode the answer.
    fn execute(&mut self, cmd: &Command) -> Result<Response> {
        let payload = cmd.encode();
        #[cfg(feature = "diagnostics")]
        log::trace!("-> {}", crate::utils::bytes_to_hex_spaced(&payload));
        let raw = self.transceive(&payload)?;
        #[cfg(feature = "diagnostics")]
        log::trace!("<- {}", crate::utils::bytes_to_hex_spaced(&raw));
        Response::decode(cmd, &raw)
    }

    /// READ: 16 bytes starting at `page` of the current sector.
    fn read_pages(&mut self, page: u8) -> Result<Vec<u8>> {
        match self.execute(&Command::Read { page })? {
            Response::Pages(data) => Ok(data),
            other => Err(Error::Transport(format!(
                "unexpected answer to READ: {:?}",
                other
            ))),
        }
    }

    /// WRITE one page of the current sector.
    fn write_page(&mut self, page: u8, data: &Block) -> Result<()> {
        self.execute(&Command::Write { page, data: *data })?;
        Ok(())
    }
}

/// An opaque handle to a discovered tag. Each `open` hands out a fresh,
/// not-yet-connected transport for the requested technology.
pub trait TagHandle {
    /// Technologies the tag exposes.
    fn technologies(&self) -> Vec<Technology>;

    /// New connection over `technology`.
    fn open(&self, technology: Technology) -> Result<Box<dyn Transport>>;

    /// True if `technology` is among `technologies`.
    fn supports(&self, technology: Technology) -> bool {
        self.technologies().contains(&technology)
    }
}
