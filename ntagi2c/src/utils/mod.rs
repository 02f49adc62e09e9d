//! Small helpers shared across the crate: hex formatting for traces and
//! page dumps, and millisecond/Duration conversions.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
