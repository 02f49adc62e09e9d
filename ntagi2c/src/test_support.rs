//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize simulated-tag setup so tests across the crate
//! and the tests/ directory build the same fixtures.
#![allow(dead_code)]

use std::time::Duration;

use crate::config::{DemoConfig, HandshakeConfig};
use crate::handshake::SlotState;
use crate::ndef::{NdefMessage, NdefTlv};
use crate::product::TagProduct;
use crate::reader::{FullReader, MinimalReader, TagReader};
use crate::registers::MemoryLayout;
use crate::transport::{MockTag, SimulatedTag, Technology};
use crate::Result;

/// A tag whose embedded side always reads Idle, so every handshake is
/// granted on the first attempt.
#[doc(hidden)]
pub fn demo_board_tag(product: TagProduct) -> MockTag {
    MockTag::new(SimulatedTag::new(product).with_embedded_script([], Some(SlotState::Idle)))
}

/// A demo-board tag already holding `text` as its NDEF message.
#[doc(hidden)]
pub fn text_tag(product: TagProduct, text: &str) -> Result<MockTag> {
    let tag = demo_board_tag(product);
    if let Some(message) = NdefMessage::text(text) {
        let bytes = NdefTlv::new(message.to_bytes()?).encode()?;
        let page = MemoryLayout::DEMO_BOARD.ndef_begin as u8;
        tag.state().load(0, page, &bytes);
    }
    Ok(tag)
}

/// Connected full reader over NfcA with the product already known.
#[doc(hidden)]
pub fn full_reader_for(tag: &MockTag, product: TagProduct) -> Result<FullReader> {
    let mut reader = FullReader::new(Box::new(tag.transport(Technology::NfcA)), Some(product));
    reader.connect()?;
    Ok(reader)
}

/// Connected minimal reader over MifareUltralight.
#[doc(hidden)]
pub fn minimal_reader_for(tag: &MockTag, product: TagProduct) -> Result<MinimalReader> {
    let mut reader =
        MinimalReader::new(Box::new(tag.transport(Technology::MifareUltralight)), product);
    reader.connect()?;
    Ok(reader)
}

/// Handshake settings that never sleep.
#[doc(hidden)]
pub fn fast_handshake(max_retries: u32) -> HandshakeConfig {
    HandshakeConfig::default()
        .with_max_retries(max_retries)
        .with_poll_interval(Duration::ZERO)
}

/// Demo settings with a non-sleeping handshake and a short loop interval.
#[doc(hidden)]
pub fn fast_demo_config() -> DemoConfig {
    DemoConfig::default()
        .with_handshake(fast_handshake(5))
        .with_loop_interval(Duration::from_millis(1))
}
