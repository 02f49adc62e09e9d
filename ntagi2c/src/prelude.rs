// ntagi2c/src/prelude.rs
//! Re-exports of the types most callers need.

pub use crate::config::{DemoConfig, HandshakeConfig, ProbeConfig, ReadLoopConfig};
pub use crate::demo::{
    CycleStats, Demo, DemoReport, DemoRequest, ReadLoop, ReadReport, TemperatureReport,
    WriteReport,
};
pub use crate::handshake::{Acquire, Handshake, SlotState};
pub use crate::ndef::{NdefMessage, NdefRecord, Tnf};
pub use crate::probe::{probe, probe_with};
pub use crate::product::{Capacity, TagProduct, Variant};
pub use crate::reader::{FullReader, MinimalReader, ProgressSink, ReaderKind, TagReader};
pub use crate::registers::{MemoryLayout, MemoryRegister};
pub use crate::transport::{TagHandle, Technology, Transport};
pub use crate::{Block, Error, Result, Uid};

#[cfg(feature = "async")]
pub use crate::demo::{AsyncDemo, AsyncTagIo};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
