// ntagi2c/src/reader/full.rs
//! Reader for tags that answer GET_VERSION or SECTOR_SELECT: FAST_READ
//! spans, sector switching and the whole user memory.

use crate::constants::{BLOCK_SIZE, PAGES_PER_SECTOR};
use crate::product::{TagProduct, identify_passive, physical_page};
use crate::reader::{ProgressSink, ReaderKind, TagReader, ndef_capacity};
use crate::registers::MemoryLayout;
use crate::session::TagSession;
use crate::transport::Transport;
use crate::types::Block;
use crate::{Error, Result};

/// One step of a sector-aware read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStep {
    /// Switch to a sector.
    SelectSector(u8),
    /// Read `start..=end` in the current sector.
    FastRead { start: u8, end: u8 },
}

/// Plan the reads for logical pages `start..=end`.
///
/// Chunks hold at most `max_pages` pages and never straddle a sector. A
/// select precedes the first chunk of every sector other than `current`,
/// and sector 0 is selected again at the end when the plan left it.
pub fn plan_read(
    product: TagProduct,
    start: u16,
    end: u16,
    max_pages: u16,
    current: u8,
) -> Vec<ReadStep> {
    let end = end.min(product.last_readable_page());
    let max_pages = max_pages.max(1);
    let mut steps = Vec::new();
    let mut selected = current;
    let mut logical = start;
    while logical <= end {
        let (sector, page) = physical_page(product, logical);
        let mut sector_end = logical + (PAGES_PER_SECTOR - 1 - u16::from(page));
        if sector == 0 && product.is_two_k() {
            sector_end = sector_end.min(product.sector0_last_user_page());
        }
        let chunk_end = end.min(logical + max_pages - 1).min(sector_end);
        if sector != selected {
            steps.push(ReadStep::SelectSector(sector));
            selected = sector;
        }
        steps.push(ReadStep::FastRead {
            start: page,
            end: page + (chunk_end - logical) as u8,
        });
        logical = chunk_end + 1;
    }
    if selected != 0 {
        steps.push(ReadStep::SelectSector(0));
    }
    steps
}

/// Reader for pairings that support FAST_READ and SECTOR_SELECT.
#[derive(Debug)]
pub struct FullReader {
    session: TagSession,
    layout: MemoryLayout,
}

impl FullReader {
    /// `product` is `None` when it is identified on first use.
    pub fn new(transport: Box<dyn Transport>, product: Option<TagProduct>) -> Self {
        let session = match product {
            Some(p) => TagSession::with_product(transport, p),
            None => TagSession::new(transport),
        };
        Self {
            session,
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

    /// Sector holding the SRAM window.
    pub fn sram_sector(&mut self) -> Result<u8> {
        Ok(self.product()?.sram_sector())
    }

    /// GET_VERSION, falling back to the capability container when the
    /// command fails. The failed command can leave the transport unusable,
    /// so the session is re-established around the fallback.
    fn identify(&mut self) -> Result<TagProduct> {
        match self.session.get_version() {
            Ok(info) => Ok(TagProduct::from_version(&info)),
            Err(e) => {
                log::debug!("GET_VERSION failed ({}), matching capability container", e);
                self.session.reconnect()?;
                let product = identify_passive(|page| self.session.read_page(page))?;
                self.session.reconnect()?;
                Ok(product)
            }
        }
    }

    fn select(&mut self, sector: u8) -> Result<()> {
        if self.session.sector() != sector {
            self.session.select_sector(sector)?;
        }
        Ok(())
    }

    /// Select sector 0 after a failed operation. The original error is what
    /// the caller sees, so a failure here is only logged.
    fn restore_sector0(&mut self) {
        if let Err(e) = self.select(0) {
            log::debug!("could not restore sector 0: {}", e);
        }
    }

    fn execute_plan(&mut self, steps: &[ReadStep]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for step in steps {
            match *step {
                ReadStep::SelectSector(sector) => self.session.select_sector(sector)?,
                ReadStep::FastRead { start, end } => {
                    out.extend(self.session.fast_read(start, end)?);
                }
            }
        }
        Ok(out)
    }

    fn write_pages(
        &mut self,
        product: TagProduct,
        start: u16,
        data: &[u8],
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        for (i, chunk) in data.chunks(BLOCK_SIZE).enumerate() {
            let (sector, page) = physical_page(product, start + i as u16);
            self.select(sector)?;
            self.session.write_page(page, &Block::padded(chunk))?;
            progress.on_progress(((i + 1) * BLOCK_SIZE).min(data.len()));
        }
        self.select(0)
    }

    /// Write `data` from logical page `start`, crossing into sector 1 as
    /// needed, and leave sector 0 selected, also on failure.
    fn write_from(
        &mut self,
        start: u16,
        data: &[u8],
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let product = self.product()?;
        let last = usize::from(product.last_logical_page());
        let pages = data.len().div_ceil(BLOCK_SIZE);
        let last_written = usize::from(start) + pages - 1;
        if last_written > last {
            return Err(Error::DataTooLong {
                length: data.len(),
                capacity: (last + 1).saturating_sub(usize::from(start)) * BLOCK_SIZE,
            });
        }

        match self.write_pages(product, start, data, progress) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.restore_sector0();
                Err(e)
            }
        }
    }
}

impl TagReader for FullReader {
    fn kind(&self) -> ReaderKind {
        ReaderKind::Full
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
        if let Some(p) = self.session.product() {
            return Ok(p);
        }
        let product = self.identify()?;
        log::debug!("identified {}", product);
        self.session.set_product(product);
        Ok(product)
    }

    fn layout(&self) -> MemoryLayout {
        self.layout
    }

    fn read_range(&mut self, start: u16, end: u16) -> Result<Vec<u8>> {
        let product = self.product()?;
        let steps = plan_read(
            product,
            start,
            end,
            self.session.max_fast_read_pages(),
            self.session.sector(),
        );
        match self.execute_plan(&steps) {
            Ok(data) => Ok(data),
            Err(e) => {
                self.restore_sector0();
                Err(e)
            }
        }
    }

    fn write_range(&mut self, data: &[u8], progress: &mut dyn ProgressSink) -> Result<()> {
        let product = self.product()?;
        let capacity = ndef_capacity(product, self.layout);
        if data.len() > capacity {
            return Err(Error::DataTooLong {
                length: data.len(),
                capacity,
            });
        }
        self.write_from(self.layout.ndef_begin, data, progress)
    }

    fn write_raw_at(
        &mut self,
        data: &[u8],
        start: u16,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        self.write_from(start, data, progress)
    }
}
