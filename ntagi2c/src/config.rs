// ntagi2c/src/config.rs
//! Runtime knobs. Defaults match the LPC8N04 demo firmware.

use std::time::Duration;

use crate::constants::{
    HANDSHAKE_MAX_RETRIES, HANDSHAKE_POLL_INTERVAL_MS, PROBE_TIMEOUT_MS, READ_LOOP_INTERVAL_MS,
    SECTOR_SELECT_TIMEOUT_LIMIT_MS,
};
use crate::registers::MemoryLayout;
use crate::utils::ms;

/// Capability probe settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeConfig {
    /// Timeout requested on the NfcA connection before the active probes
    pub probe_timeout_ms: u64,
    /// Active probes are skipped when the transport reports a timeout at or above this
    pub sector_select_timeout_limit_ms: u64,
    /// Layout handed to the reader the probe returns
    pub layout: MemoryLayout,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: PROBE_TIMEOUT_MS,
            sector_select_timeout_limit_ms: SECTOR_SELECT_TIMEOUT_LIMIT_MS,
            layout: MemoryLayout::default(),
        }
    }
}

impl ProbeConfig {
    /// Use `layout` for the Plus sector-0 boundary.
    pub fn with_layout(mut self, layout: MemoryLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Handshake polling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandshakeConfig {
    /// Status-row polls before giving up on the embedded host.
    pub max_retries: u32,
    /// Pause between status-row polls.
    pub poll_interval: Duration,
    /// Embedded side's status row; the phone's row is the page after it
    pub status_page: u16,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            max_retries: HANDSHAKE_MAX_RETRIES,
            poll_interval: ms(HANDSHAKE_POLL_INTERVAL_MS),
            status_page: MemoryLayout::DEMO_BOARD.status_page,
        }
    }
}

impl HandshakeConfig {
    /// Defaults with the status row taken from `layout`.
    pub fn for_layout(layout: MemoryLayout) -> Self {
        Self {
            status_page: layout.status_page,
            ..Self::default()
        }
    }

    /// Set the number of polls.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the pause between polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Page holding the phone's status row.
    pub fn phone_status_page(&self) -> u16 {
        self.status_page + 1
    }
}

/// Everything a `Demo` needs besides the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoConfig {
    /// Reader selection.
    pub probe: ProbeConfig,
    /// Status-row polling.
    pub handshake: HandshakeConfig,
    /// Background read cycle pacing.
    pub read_loop: ReadLoopConfig,
}

impl DemoConfig {
    /// Replace the handshake settings.
    pub fn with_handshake(mut self, handshake: HandshakeConfig) -> Self {
        self.handshake = handshake;
        self
    }

    /// Set the pause between background read cycles.
    pub fn with_loop_interval(mut self, interval: Duration) -> Self {
        self.read_loop.interval = interval;
        self
    }
}

/// Background read loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadLoopConfig {
    /// Sleep between cycles; also the granularity of cancellation
    pub interval: Duration,
}

impl Default for ReadLoopConfig {
    fn default() -> Self {
        Self {
            interval: ms(READ_LOOP_INTERVAL_MS),
        }
    }
}
