// ntagi2c/src/constants.rs
//! Protocol constants shared across the crate

/// GET_VERSION command code
pub const CMD_GET_VERSION: u8 = 0x60;

/// READ command code: returns 4 pages (16 bytes) starting at the given page
pub const CMD_READ: u8 = 0x30;

/// FAST_READ command code: returns pages `start..=end`
pub const CMD_FAST_READ: u8 = 0x3A;

/// WRITE command code: writes one 4-byte page
pub const CMD_WRITE: u8 = 0xA2;

/// SECTOR_SELECT command code (packet 1 is `C2 FF`, packet 2 carries the sector)
pub const CMD_SECTOR_SELECT: u8 = 0xC2;

/// Second byte of SECTOR_SELECT packet 1
pub const SECTOR_SELECT_PACKET1_ARG: u8 = 0xFF;

/// 4-bit ACK answered to WRITE and SECTOR_SELECT packet 1
pub const ACK: u8 = 0x0A;

/// 4-bit NAK codes (invalid argument, CRC error, auth counter overflow, EEPROM write error)
pub const NAK_CODES: [u8; 4] = [0x00, 0x01, 0x04, 0x05];

/// Size of one page (block) in bytes
pub const BLOCK_SIZE: usize = 4;

/// Size of the SRAM pass-through window in bytes
pub const SRAM_SIZE: usize = 64;

/// Number of pages returned by one READ command
pub const READ_PAGES_PER_COMMAND: u16 = 4;

/// Number of pages in one sector
pub const PAGES_PER_SECTOR: u16 = 256;

/// Length of the GET_VERSION answer
pub const VERSION_LEN: usize = 8;

/// Nominal maximum transceive length of NFC-A transports
pub const DEFAULT_MAX_TRANSCEIVE_LEN: usize = 253;

/// NXP manufacturer code (first UID byte and GET_VERSION vendor byte)
pub const NXP_VENDOR_ID: u8 = 0x04;

/// Capability container signature at bytes 12..16 of page 0 on 1k tags
pub const CC_SIGNATURE_1K: [u8; 4] = [0xE1, 0x10, 0x6D, 0x00];

/// Capability container signature at bytes 12..16 of page 0 on 2k tags
pub const CC_SIGNATURE_2K: [u8; 4] = [0xE1, 0x10, 0xEA, 0x00];

/// Bytes the minimal reader may write into sector 0: pages 0x04..0xFF
pub const MINIMAL_FIRST_SECTOR_BYTES: usize = (0xFF - 0x04) * BLOCK_SIZE;

/// TLV type of an NDEF message
pub const TLV_NDEF: u8 = 0x03;

/// Terminator TLV
pub const TLV_TERMINATOR: u8 = 0xFE;

/// Length byte marking the 3-byte extended length form
pub const TLV_EXTENDED_LENGTH: u8 = 0xFF;

/// Proprietary TLV type used by the handshake rows
pub const HANDSHAKE_MARKER: u8 = 0xFD;

/// Length byte of the handshake rows
pub const HANDSHAKE_MARKER_LEN: u8 = 0x02;

/// Timeout requested while probing
pub const PROBE_TIMEOUT_MS: u64 = 20;

/// Transports that cannot go below this timeout are too slow for sector select
pub const SECTOR_SELECT_TIMEOUT_LIMIT_MS: u64 = 50;

/// Handshake polling budget
pub const HANDSHAKE_MAX_RETRIES: u32 = 1000;

/// Sleep between handshake observations
pub const HANDSHAKE_POLL_INTERVAL_MS: u64 = 5;

/// Sleep between read loop cycles
pub const READ_LOOP_INTERVAL_MS: u64 = 10;
