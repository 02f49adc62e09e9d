// ntagi2c/src/protocol/mod.rs
//! Wire format of the tag commands and their answers.

pub mod commands;
pub mod parser;
pub mod responses;

pub use commands::*;
pub use responses::*;
