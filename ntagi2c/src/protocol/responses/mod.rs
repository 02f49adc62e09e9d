// ntagi2c/src/protocol/responses/mod.rs
//! Decoders for the answers to each command.

pub mod read;
pub mod version;
pub mod write;

pub use read::decode_pages;
pub use version::VersionInfo;
pub use write::decode_ack;

use crate::protocol::Command;

/// Decoded answer to a `Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Answer to GET_VERSION.
    Version(VersionInfo),
    /// Page data.
    Pages(Vec<u8>),
    /// Positive acknowledgement.
    Ack,
    /// SECTOR_SELECT packet 2 answers with silence.
    Silent,
}

impl Response {
    /// Decode the raw answer for the command that produced it.
    pub fn decode(cmd: &Command, data: &[u8]) -> crate::Result<Self> {
        crate::protocol::parser::reject_nak(data)?;
        match cmd {
            Command::GetVersion => Ok(Self::Version(VersionInfo::decode(data)?)),
            Command::Read { .. } | Command::FastRead { .. } => {
                Ok(Self::Pages(decode_pages(data, cmd.expected_response_len())?))
            }
            Command::Write { .. } | Command::SectorSelect => {
                decode_ack(data)?;
                Ok(Self::Ack)
            }
            Command::SectorSelectTarget { .. } => Ok(Self::Silent),
        }
    }
}
