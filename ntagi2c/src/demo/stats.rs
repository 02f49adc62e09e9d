// ntagi2c/src/demo/stats.rs
//! Byte and timing figures for one write or read cycle.

use std::fmt;
use std::time::Duration;

use crate::utils::elapsed_ms;

/// Transfer size and duration of one read or write cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleStats {
    /// Bytes read or written.
    pub bytes: usize,
    /// Wall time of the cycle.
    pub elapsed: Duration,
}

impl CycleStats {
    /// Figures for one cycle.
    pub fn new(bytes: usize, elapsed: Duration) -> Self {
        Self { bytes, elapsed }
    }

    /// Elapsed time in whole milliseconds, never below 1.
    pub fn elapsed_ms(&self) -> u64 {
        elapsed_ms(self.elapsed)
    }

    /// Throughput; zero when no time elapsed.
    pub fn bytes_per_second(&self) -> f64 {
        self.bytes as f64 * 1000.0 / self.elapsed_ms() as f64
    }
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Speed ({} Byte / {} ms): {:.0} Bytes/s",
            self.bytes,
            self.elapsed_ms(),
            self.bytes_per_second()
        )
    }
}
