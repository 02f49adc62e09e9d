// ntagi2c/src/protocol/commands/mod.rs
//! Encoders for the NTAG I2C command set.

pub mod read;
pub mod sector;
pub mod version;
pub mod write;

pub use read::{encode_fast_read, encode_read};
pub use sector::{encode_sector_select_packet1, encode_sector_select_packet2};
pub use version::encode_get_version;
pub use write::encode_write;

use crate::types::Block;

/// NTAG commands used by the readers. Per-command encoders live in
/// `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// GET_VERSION.
    GetVersion,
    /// READ of four pages from `page`.
    Read { page: u8 },
    /// FAST_READ of `start..=end`.
    FastRead { start: u8, end: u8 },
    /// WRITE of one page.
    Write { page: u8, data: Block },
    /// First packet of SECTOR_SELECT; the tag ACKs it.
    SectorSelect,
    /// Second packet of SECTOR_SELECT; the tag confirms it by staying silent.
    SectorSelectTarget { sector: u8 },
}

impl Command {
    /// First byte of the frame.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::GetVersion => crate::constants::CMD_GET_VERSION,
            Self::Read { .. } => crate::constants::CMD_READ,
            Self::FastRead { .. } => crate::constants::CMD_FAST_READ,
            Self::Write { .. } => crate::constants::CMD_WRITE,
            Self::SectorSelect => crate::constants::CMD_SECTOR_SELECT,
            // packet 2 has no command byte of its own
            Self::SectorSelectTarget { sector } => *sector,
        }
    }

    /// Encode the command into the bytes handed to `Transport::transceive`.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::GetVersion => encode_get_version(),
            Self::Read { page } => encode_read(*page),
            Self::FastRead { start, end } => encode_fast_read(*start, *end),
            Self::Write { page, data } => encode_write(*page, data),
            Self::SectorSelect => encode_sector_select_packet1(),
            Self::SectorSelectTarget { sector } => encode_sector_select_packet2(*sector),
        }
    }

    /// Number of answer bytes a successful command yields.
    pub fn expected_response_len(&self) -> usize {
        match self {
            Self::GetVersion => crate::constants::VERSION_LEN,
            Self::Read { .. } => {
                crate::constants::READ_PAGES_PER_COMMAND as usize * crate::constants::BLOCK_SIZE
            }
            Self::FastRead { start, end } => {
                (usize::from(*end).saturating_sub(usize::from(*start)) + 1)
                    * crate::constants::BLOCK_SIZE
            }
            Self::Write { .. } | Self::SectorSelect => 1,
            Self::SectorSelectTarget { .. } => 0,
        }
    }
}
