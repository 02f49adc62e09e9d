//! Timing helpers: default transceive timeout and millisecond conversions.

use std::time::Duration;

/// Transceive timeout a freshly opened transport starts with.
pub const DEFAULT_TRANSCEIVE_TIMEOUT_MS: u64 = 618;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Elapsed time in whole milliseconds, never zero so throughput figures
/// stay finite.
pub fn elapsed_ms(d: Duration) -> u64 {
    (d.as_millis() as u64).max(1)
}
