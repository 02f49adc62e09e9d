//! Hexadecimal helpers for trace output and page dumps.

use std::fmt::Write;

use crate::constants::BLOCK_SIZE;

/// Lowercase hex without separators: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Lowercase hex with one space between bytes: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// One line per 4-byte page, prefixed with the page address:
///
/// ```text
/// 04: fd 02 00 00
/// 05: fd 02 01 00
/// ```
pub fn format_pages(first_page: u16, bytes: &[u8]) -> String {
    let mut s = String::new();
    for (i, page) in bytes.chunks(BLOCK_SIZE).enumerate() {
        let _ = writeln!(
            &mut s,
            "{:02x}: {}",
            first_page as usize + i,
            bytes_to_hex_spaced(page)
        );
    }
    s
}

/// Parse a hex string, ignoring ASCII whitespace.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }
    cleaned
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|e| format!("invalid hex pair '{}': {}", text, e))
        })
        .collect()
}
