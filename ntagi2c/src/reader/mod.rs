// ntagi2c/src/reader/mod.rs
//! Tag readers.
//!
//! Two implementations share the `TagReader` contract. `FullReader` uses
//! FAST_READ and SECTOR_SELECT and reaches both sectors of a 2k tag.
//! `MinimalReader` only has READ and WRITE and stays in sector 0.
//!
//! Pages are addressed logically: `0x000..=0x0FF` is sector 0 and the
//! pages after the last user page of sector 0 continue in sector 1.

pub mod full;
pub mod minimal;

pub use full::{FullReader, ReadStep, plan_read};
pub use minimal::MinimalReader;

use derive_more::Display;

use crate::constants::{BLOCK_SIZE, SRAM_SIZE};
use crate::ndef::{EMPTY_NDEF_TLV, NdefMessage, NdefTlv, TlvHeader, default_ndef_bytes};
use crate::product::TagProduct;
use crate::registers::{MemoryLayout, MemoryRegister};
use crate::types::Uid;
use crate::{Error, Result};

/// Receives the cumulative number of bytes written after each page.
pub trait ProgressSink {
    /// Called after each page with the bytes written so far.
    fn on_progress(&mut self, bytes_written: usize);
}

impl<F: FnMut(usize)> ProgressSink for F {
    fn on_progress(&mut self, bytes_written: usize) {
        self(bytes_written)
    }
}

/// Sink that drops progress reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _bytes_written: usize) {}
}

/// Which reader the capability check settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReaderKind {
    /// FAST_READ and SECTOR_SELECT available.
    #[display(fmt = "full")]
    Full,
    /// READ and WRITE on sector 0 only.
    #[display(fmt = "minimal")]
    Minimal,
}

/// Bytes available to `write_range` for `product` when the NDEF TLV starts
/// at `layout.ndef_begin`.
pub fn ndef_capacity(product: TagProduct, layout: MemoryLayout) -> usize {
    let skipped = usize::from(
        layout
            .ndef_begin
            .saturating_sub(MemoryRegister::UserMemoryBegin.page()),
    ) * BLOCK_SIZE;
    product.memory_size().saturating_sub(skipped)
}

/// Common reader contract.
pub trait TagReader: Send {
    /// Which reader this is.
    fn kind(&self) -> ReaderKind;

    /// Open the connection.
    fn connect(&mut self) -> Result<()>;

    /// Close the connection.
    fn close(&mut self) -> Result<()>;

    /// True while the connection is open.
    fn is_connected(&self) -> bool;

    /// Product of the tag, identified at most once per session.
    fn product(&mut self) -> Result<TagProduct>;

    /// Register addresses in use.
    fn layout(&self) -> MemoryLayout;

    /// Read pages `start..=end`.
    fn read_range(&mut self, start: u16, end: u16) -> Result<Vec<u8>>;

    /// Write `data` from the start of the NDEF area, page by page.
    fn write_range(&mut self, data: &[u8], progress: &mut dyn ProgressSink) -> Result<()>;

    /// Write `data` page by page from `start`.
    fn write_raw_at(
        &mut self,
        data: &[u8],
        start: u16,
        progress: &mut dyn ProgressSink,
    ) -> Result<()>;

    /// Largest payload `write_range` accepts.
    fn write_capacity(&mut self) -> Result<usize> {
        let product = self.product()?;
        Ok(ndef_capacity(product, self.layout()))
    }

    /// Bytes per page.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Bytes of pass-through SRAM.
    fn sram_size(&self) -> usize {
        SRAM_SIZE
    }

    /// Read the seven-byte UID from the first pages.
    fn read_uid(&mut self) -> Result<Uid> {
        let pages = self.read_range(0, 1)?;
        Uid::from_pages(&pages)
    }

    /// Replace the NDEF area with an empty NDEF TLV.
    fn write_empty_ndef(&mut self) -> Result<()> {
        let start = self.layout().ndef_begin;
        self.write_raw_at(&EMPTY_NDEF_TLV, start, &mut NoProgress)
    }

    /// Restore the factory smart poster message.
    fn write_default_ndef(&mut self) -> Result<()> {
        let start = self.layout().ndef_begin;
        self.write_raw_at(&default_ndef_bytes(), start, &mut NoProgress)
    }

    /// Serialize, wrap in an NDEF TLV with terminator and write.
    fn write_ndef_message(
        &mut self,
        message: &NdefMessage,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let bytes = NdefTlv::new(message.to_bytes()?).encode()?;
        self.write_range(&bytes, progress)
    }

    /// Read the NDEF TLV at the start of the NDEF area and parse its message.
    fn read_ndef_message(&mut self) -> Result<NdefMessage> {
        let start = self.layout().ndef_begin;
        let mut raw = self.read_range(start, start)?;
        let header = TlvHeader::parse(&raw)?;
        if header.payload_len == 0 {
            return Ok(NdefMessage::default());
        }
        let pages = header.total_len().div_ceil(BLOCK_SIZE);
        if pages > 1 {
            let end = usize::from(start) + pages - 1;
            let end = u16::try_from(end).map_err(|_| {
                Error::SectorNotSupported(format!("NDEF TLV of {} bytes", header.total_len()))
            })?;
            raw.extend(self.read_range(start + 1, end)?);
        }
        if raw.len() < header.total_len() {
            return Err(Error::SectorNotSupported(format!(
                "NDEF TLV of {} bytes runs past addressable memory ({} bytes read)",
                header.total_len(),
                raw.len()
            )));
        }
        log::debug!(
            "read NDEF TLV: {} byte header, {} byte message",
            header.header_len,
            header.payload_len
        );
        NdefMessage::parse(&raw[header.header_len..header.total_len()])
    }
}
