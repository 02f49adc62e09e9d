// ntagi2c/src/reader/minimal.rs
//! Reader that only uses READ and WRITE on sector 0.

use crate::constants::{BLOCK_SIZE, MINIMAL_FIRST_SECTOR_BYTES, READ_PAGES_PER_COMMAND};
use crate::product::TagProduct;
use crate::reader::{ProgressSink, ReaderKind, TagReader, ndef_capacity};
use crate::registers::{MemoryLayout, MemoryRegister};
use crate::session::TagSession;
use crate::transport::Transport;
use crate::types::Block;
use crate::{Error, Result};

const LAST_SECTOR0_PAGE: u16 = 0xFF;

/// Reader restricted to READ and WRITE in sector 0.
///
/// Built by the probe once the product is known. On 2k tags only the first
/// sector's user memory is reachable.
#[derive(Debug)]
pub struct MinimalReader {
    session: TagSession,
    product: TagProduct,
    layout: MemoryLayout,
}

impl MinimalReader {
    /// Reader for a tag already known to be `product`.
    pub fn new(transport: Box<dyn Transport>, product: TagProduct) -> Self {
        Self {
            session: TagSession::with_product(transport, product),
            product,
            layout: MemoryLayout::default(),
        }
    }

    /// Use `layout` for register addresses.
    pub fn with_layout(mut self, layout: MemoryLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Session state.
    pub fn session(&self) -> &TagSession {
        &self.session
    }

    /// Bytes of user memory from `start` to the end of sector 0. On Plus
    /// tags that end is 0xE1, before the configuration registers.
    fn first_sector_room(&self, start: u16) -> usize {
        let first = MemoryRegister::UserMemoryBegin.page();
        let user_pages = (self.product.sector0_last_user_page() + 1).saturating_sub(first);
        let room = MINIMAL_FIRST_SECTOR_BYTES.min(usize::from(user_pages) * BLOCK_SIZE);
        let skipped = usize::from(start.saturating_sub(first)) * BLOCK_SIZE;
        room.saturating_sub(skipped)
    }

    fn check_last_page(&self, last: usize) -> Result<()> {
        let limit = self.product.sector0_last_user_page();
        if last > usize::from(limit) {
            return Err(Error::SectorNotSupported(format!(
                "page {:#x} is past the last user page {:#x} of sector 0",
                last, limit
            )));
        }
        Ok(())
    }

    fn write_pages(
        &mut self,
        start: u16,
        data: &[u8],
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        for (i, chunk) in data.chunks(BLOCK_SIZE).enumerate() {
            let page = start + i as u16;
            self.check_last_page(usize::from(page))?;
            self.session.write_page(page as u8, &Block::padded(chunk))?;
            progress.on_progress(((i + 1) * BLOCK_SIZE).min(data.len()));
        }
        Ok(())
    }
}

impl TagReader for MinimalReader {
    fn kind(&self) -> ReaderKind {
        ReaderKind::Minimal
    }

    fn connect(&mut self) -> Result<()> {
        self.session.connect()
    }

    fn close(&mut self) -> Result<()> {
        self.session.close()
    }

    fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    fn product(&mut self) -> Result<TagProduct> {
        Ok(self.product)
    }

    fn layout(&self) -> MemoryLayout {
        self.layout
    }

    fn write_capacity(&mut self) -> Result<usize> {
        let capacity = ndef_capacity(self.product, self.layout);
        if self.product.is_two_k() {
            Ok(capacity.min(self.first_sector_room(self.layout.ndef_begin)))
        } else {
            Ok(capacity)
        }
    }

    fn read_range(&mut self, start: u16, end: u16) -> Result<Vec<u8>> {
        if self.product.is_two_k() && end > self.product.sector0_last_user_page() {
            return Err(Error::SectorNotSupported(format!(
                "page {:#x} needs SECTOR_SELECT",
                end
            )));
        }
        let end = end.min(LAST_SECTOR0_PAGE);
        let mut out = Vec::new();
        if start > end {
            return Ok(out);
        }

        let mut page = start;
        while page + (READ_PAGES_PER_COMMAND - 1) <= end {
            out.extend(self.session.read_page(page as u8)?);
            page += READ_PAGES_PER_COMMAND;
        }
        if page <= end {
            // read the last full group ending at `end` and keep the tail
            let anchor = end.saturating_sub(READ_PAGES_PER_COMMAND - 1);
            let block = self.session.read_page(anchor as u8)?;
            let from = usize::from(page - anchor) * BLOCK_SIZE;
            let to = usize::from(end - anchor + 1) * BLOCK_SIZE;
            let tail = block.get(from..to).ok_or(Error::InvalidLength {
                expected: to,
                actual: block.len(),
            })?;
            out.extend_from_slice(tail);
        }
        Ok(out)
    }

    fn write_range(&mut self, data: &[u8], progress: &mut dyn ProgressSink) -> Result<()> {
        let start = self.layout.ndef_begin;
        if self.product.is_two_k() {
            let room = self.first_sector_room(start);
            if data.len() > room {
                return Err(Error::SectorNotSupported(format!(
                    "{} bytes do not fit the {} bytes of sector 0",
                    data.len(),
                    room
                )));
            }
        }
        let capacity = ndef_capacity(self.product, self.layout);
        if data.len() > capacity {
            return Err(Error::DataTooLong {
                length: data.len(),
                capacity,
            });
        }
        self.write_pages(start, data, progress)
    }

    fn write_raw_at(
        &mut self,
        data: &[u8],
        start: u16,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let last = usize::from(start) + data.len().div_ceil(BLOCK_SIZE) - 1;
        self.check_last_page(last)?;
        self.write_pages(start, data, progress)
    }
}
