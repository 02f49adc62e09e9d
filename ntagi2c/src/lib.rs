// ntagi2c/src/lib.rs

//! ntagi2c
//!
//! Command and memory layer for NXP NTAG I2C tags: product identification,
//! capability probing, sector-aware page access, NDEF framing and the
//! status-row handshake used by the LPC8N04 demo board.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod demo;
pub mod error;
pub mod handshake;
pub mod ndef;
pub mod prelude;
pub mod probe;
pub mod product;
pub mod protocol;
pub mod reader;
pub mod registers;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// `crate::Error`, `crate::Result` and the newtypes are used throughout the
// crate and by the prelude.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
