// ntagi2c/src/protocol/commands/version.rs
//! GET_VERSION frame.

/// Encode GET_VERSION (0x60)
pub fn encode_get_version() -> Vec<u8> {
    vec![crate::constants::CMD_GET_VERSION]
}
