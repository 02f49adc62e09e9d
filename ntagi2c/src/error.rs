// ntagi2c/src/error.rs
//! Error type shared by every layer of the crate.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// I/O failure talking to the tag. Transient: reconnecting may help.
    #[error("transport error: {0}")]
    Transport(String),

    /// The tag did not answer in time.
    #[error("operation timed out")]
    Timeout,

    /// The tag answered with a 4-bit NAK instead of data or ACK.
    #[error("tag answered NAK {0:#04x}")]
    Nak(u8),

    /// No open connection to the tag.
    #[error("tag is not connected")]
    NotConnected,

    /// A frame or field had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The tag is not an NTAG I2C product.
    #[error("unsupported tag: no known product signature matched")]
    UnsupportedTag,

    /// Neither reader could be set up for the tag.
    #[error("no reader available for this tag (last error: {last_error})")]
    ReaderUnavailable { last_error: String },

    /// The address lies outside what the reader can reach.
    #[error("sector addressing not supported: {0}")]
    SectorNotSupported(String),

    /// The data does not fit the user memory.
    #[error("data too long: {length} bytes exceeds capacity of {capacity} bytes")]
    DataTooLong { length: usize, capacity: usize },

    /// Tag content that does not parse.
    #[error("malformed tag: {0}")]
    MalformedTag(String),

    /// Invalid NDEF record or message.
    #[error("ndef format error: {0}")]
    NdefFormat(String),

    /// Writing a message with no records.
    #[error("refusing to write an empty message")]
    EmptyMessage,
}

impl Error {
    /// True for the errors that come from the link to the tag rather than
    /// from the content of the tag or the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout | Self::Nak(_) | Self::NotConnected
        )
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
