// ntagi2c/src/ndef/mod.rs
//! NDEF message model and the TLV container it is stored in.

pub mod defaults;
pub mod message;
pub mod tlv;

pub use defaults::{DEFAULT_NDEF_MESSAGE, EMPTY_NDEF_TLV, default_message, default_ndef_bytes};
pub use message::{NdefMessage, NdefRecord, Tnf};
pub use tlv::{NdefTlv, TlvHeader};
