// ntagi2c/src/handshake.rs
//! Shared-memory handshake with the embedded host.
//!
//! Two status rows sit in front of the NDEF area: the embedded side owns
//! `status_page`, the phone owns the page after it. Each row is
//! `FD 02 <state> 00`. The phone claims the memory by writing Busy into its
//! row and confirming that the embedded row still reads Idle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use derive_more::Display;

pub use crate::config::HandshakeConfig;
use crate::constants::{BLOCK_SIZE, HANDSHAKE_MARKER, HANDSHAKE_MARKER_LEN};
use crate::reader::{NoProgress, TagReader};
use crate::types::Block;
use crate::{Error, Result};

/// Claim state of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotState {
    /// Side is not touching the shared memory.
    #[display(fmt = "idle")]
    Idle,
    /// Side is using the shared memory.
    #[display(fmt = "busy")]
    Busy,
}

impl SlotState {
    /// Encoded state byte.
    pub const fn byte(self) -> u8 {
        match self {
            Self::Idle => 0x00,
            Self::Busy => 0x01,
        }
    }

    /// `None` for anything but the two defined state bytes.
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Self::Idle),
            0x01 => Some(Self::Busy),
            _ => None,
        }
    }
}

/// One encoded status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeRow {
    /// State announced by this side.
    pub state: SlotState,
}

impl HandshakeRow {
    /// Row announcing `state`.
    pub const fn new(state: SlotState) -> Self {
        Self { state }
    }

    /// Page image of the row.
    pub fn to_block(self) -> Block {
        Block::from_bytes([HANDSHAKE_MARKER, HANDSHAKE_MARKER_LEN, self.state.byte(), 0x00])
    }

    /// `None` unless the page is exactly `FD 02 00 00` or `FD 02 01 00`,
    /// e.g. on a tag that was never set up for the demo firmware.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        match *bytes {
            [HANDSHAKE_MARKER, HANDSHAKE_MARKER_LEN, state, 0x00] => {
                SlotState::from_byte(state).map(Self::new)
            }
            _ => None,
        }
    }
}

/// Outcome of `Handshake::acquire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// The embedded side is idle and the phone row is marked busy.
    Granted { attempts: u32 },
    /// Retries ran out; the caller goes ahead without exclusive access
    Degraded { attempts: u32 },
    /// The embedded side stayed busy for every attempt.
    Cancelled { attempts: u32 },
}

impl Acquire {
    /// True for `Granted`.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Attempts made, whatever the outcome.
    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Granted { attempts } | Self::Degraded { attempts } | Self::Cancelled { attempts } => {
                attempts
            }
        }
    }
}

/// Both rows as last read from the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Row written by the embedded host, if it parsed.
    pub embedded: Option<HandshakeRow>,
    /// Row written by the phone, if it parsed.
    pub phone: Option<HandshakeRow>,
}

impl Observation {
    fn embedded_idle(&self) -> bool {
        matches!(self.embedded, Some(HandshakeRow { state: SlotState::Idle }))
    }

    fn phone_busy(&self) -> bool {
        matches!(self.phone, Some(HandshakeRow { state: SlotState::Busy }))
    }
}

/// Status-row handshake with the embedded host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Handshake {
    config: HandshakeConfig,
}

impl Handshake {
    /// Handshake with the given polling settings.
    pub fn new(config: HandshakeConfig) -> Self {
        Self { config }
    }

    /// Polling settings.
    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Read both status rows.
    pub fn observe(&self, reader: &mut dyn TagReader) -> Result<Observation> {
        let page = self.config.status_page;
        let raw = reader.read_range(page, page + 1)?;
        if raw.len() < 2 * BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: 2 * BLOCK_SIZE,
                actual: raw.len(),
            });
        }
        Ok(Observation {
            embedded: HandshakeRow::decode(&raw[..BLOCK_SIZE]),
            phone: HandshakeRow::decode(&raw[BLOCK_SIZE..2 * BLOCK_SIZE]),
        })
    }

    fn write_phone(&self, reader: &mut dyn TagReader, state: SlotState) -> Result<()> {
        let block = HandshakeRow::new(state).to_block();
        reader.write_raw_at(block.as_bytes(), self.config.phone_status_page(), &mut NoProgress)
    }

    /// One claim attempt: true when the phone row reads Busy while the
    /// embedded row stays Idle. A lost claim is withdrawn.
    pub fn try_once(&self, reader: &mut dyn TagReader) -> Result<bool> {
        if !self.observe(reader)?.embedded_idle() {
            return Ok(false);
        }
        self.write_phone(reader, SlotState::Busy)?;
        let seen = self.observe(reader)?;
        if seen.embedded_idle() && seen.phone_busy() {
            return Ok(true);
        }
        self.write_phone(reader, SlotState::Idle)?;
        Ok(false)
    }

    /// Single attempt without retrying.
    pub fn check_only(&self, reader: &mut dyn TagReader) -> Result<bool> {
        self.try_once(reader)
    }

    /// Poll the status rows until the embedded side is idle, then mark the phone busy.
    pub fn acquire(&self, reader: &mut dyn TagReader) -> Result<Acquire> {
        self.acquire_until(reader, &AtomicBool::new(false))
    }

    /// Retry `try_once` up to `max_retries` times, `poll_interval` apart,
    /// until granted or `stop` is raised.
    pub fn acquire_until(&self, reader: &mut dyn TagReader, stop: &AtomicBool) -> Result<Acquire> {
        let max = self.config.max_retries.max(1);
        for attempt in 1..=max {
            if stop.load(Ordering::Relaxed) {
                return Ok(Acquire::Cancelled {
                    attempts: attempt - 1,
                });
            }
            if self.try_once(reader)? {
                log::trace!("handshake granted after {} attempt(s)", attempt);
                return Ok(Acquire::Granted { attempts: attempt });
            }
            if attempt < max && !self.config.poll_interval.is_zero() {
                thread::sleep(self.config.poll_interval);
            }
        }
        log::warn!(
            "embedded side stayed busy for {} attempts, continuing without the lock",
            max
        );
        Ok(Acquire::Degraded { attempts: max })
    }

    /// Hand the memory back to the embedded side.
    pub fn release(&self, reader: &mut dyn TagReader) -> Result<()> {
        self.write_phone(reader, SlotState::Idle)
    }
}
