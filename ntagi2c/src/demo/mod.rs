// ntagi2c/src/demo/mod.rs
//! Demo-board workflows on top of a reader: text writes and read cycles
//! coordinated with the embedded host through the handshake rows.

pub mod read_loop;
pub mod report;
pub mod stats;

#[cfg(feature = "async")]
pub mod async_api;

pub use read_loop::ReadLoop;
pub use report::{DemoReport, DemoRequest, ReadReport, TemperatureReport, WriteReport};
pub use stats::CycleStats;

#[cfg(feature = "async")]
pub use async_api::{AsyncDemo, AsyncTagIo};

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use crate::config::DemoConfig;
use crate::constants::BLOCK_SIZE;
use crate::handshake::{Acquire, Handshake};
use crate::ndef::NdefMessage;
use crate::probe::probe_with;
use crate::product::TagProduct;
use crate::reader::{NoProgress, ReaderKind, TagReader};
use crate::transport::TagHandle;
use crate::{Error, Result};

/// A connected reader plus the handshake used to share the tag with the
/// embedded host.
pub struct Demo {
    reader: Box<dyn TagReader>,
    handshake: Handshake,
    config: DemoConfig,
}

impl Demo {
    /// Demo over `reader` with the given settings.
    pub fn new(reader: Box<dyn TagReader>, config: DemoConfig) -> Self {
        Self {
            reader,
            handshake: Handshake::new(config.handshake),
            config,
        }
    }

    /// Probe `tag`, connect the chosen reader and wrap it.
    pub fn discover(tag: &dyn TagHandle, config: DemoConfig) -> Result<Self> {
        let mut reader = probe_with(tag, &config.probe)?;
        reader.connect()?;
        log::info!("using {} reader", reader.kind());
        Ok(Self::new(reader, config))
    }

    /// Settings in use.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// The underlying reader.
    pub fn reader(&mut self) -> &mut dyn TagReader {
        &mut *self.reader
    }

    /// Give the reader back.
    pub fn into_reader(self) -> Box<dyn TagReader> {
        self.reader
    }

    /// Product of the tag, identified on first use.
    pub fn product(&mut self) -> Result<TagProduct> {
        self.reader.product()
    }

    /// Carry out one request.
    pub fn run(&mut self, request: DemoRequest) -> Result<DemoReport> {
        match request {
            DemoRequest::WriteText(text) => self.write_text(&text).map(DemoReport::Write),
            DemoRequest::ReadOnce => self.read_once().map(DemoReport::Read),
        }
    }

    /// Write `text` as a single text record while holding the handshake.
    pub fn write_text(&mut self, text: &str) -> Result<WriteReport> {
        let message = NdefMessage::text(text).ok_or(Error::EmptyMessage)?;
        let started = Instant::now();
        let handshake = self.handshake.acquire(&mut *self.reader)?;

        let mut written = 0usize;
        let mut progress = |n: usize| {
            written = n;
            log::trace!("wrote {} bytes", n);
        };
        let result = self.reader.write_ndef_message(&message, &mut progress);
        let released = self.handshake.release(&mut *self.reader);
        result?;
        released?;

        let stats = CycleStats::new(written, started.elapsed());
        log::debug!("{}", stats);
        Ok(WriteReport { stats, handshake })
    }

    /// One handshake-guarded read of the whole tag content.
    pub fn read_once(&mut self) -> Result<ReadReport> {
        let never = AtomicBool::new(false);
        match self.read_cycle(&never)? {
            Some(report) => Ok(report),
            None => Err(Error::Transport("read cycle cancelled".into())),
        }
    }

    /// `None` when `stop` was raised before the read started.
    pub(crate) fn read_cycle(&mut self, stop: &AtomicBool) -> Result<Option<ReadReport>> {
        let started = Instant::now();
        let handshake = self.handshake.acquire_until(&mut *self.reader, stop)?;
        if let Acquire::Cancelled { .. } = handshake {
            return Ok(None);
        }
        let result = self.read_tag_content();
        let released = self.handshake.release(&mut *self.reader);
        let data = result?;
        released?;

        let stats = CycleStats::new(data.len(), started.elapsed());
        log::debug!("{}", stats);
        let temperature = TemperatureReport::parse(&data);
        Ok(Some(ReadReport {
            data,
            stats,
            handshake,
            temperature,
        }))
    }

    /// Pages `0..=(memory_size + 16) / 4`, limited to sector 0 for the
    /// minimal reader.
    pub fn read_tag_content(&mut self) -> Result<Vec<u8>> {
        let product = self.reader.product()?;
        let mut end = ((product.memory_size() + 16) / BLOCK_SIZE) as u16;
        if self.reader.kind() == ReaderKind::Minimal {
            end = end.min(product.sector0_last_user_page());
        }
        self.reader.read_range(0, end)
    }

    /// Read and parse the NDEF message in user memory.
    pub fn read_ndef(&mut self) -> Result<NdefMessage> {
        self.reader.read_ndef_message()
    }

    /// Zero the NDEF area.
    pub fn reset_tag_content(&mut self) -> Result<()> {
        let capacity = self.reader.write_capacity()?;
        self.reader.write_range(&vec![0u8; capacity], &mut NoProgress)
    }

    /// Replace the user memory content with an empty NDEF TLV.
    pub fn write_empty_ndef(&mut self) -> Result<()> {
        self.reader.write_empty_ndef()
    }

    /// Write the smart poster and application record the board ships with.
    pub fn write_default_ndef(&mut self) -> Result<()> {
        self.reader.write_default_ndef()
    }

    /// Move the demo into a background thread that reads the tag every
    /// `read_loop.interval` and hands each result to `on_report`. The loop
    /// ends after the first error.
    pub fn start_read_loop<F>(self, on_report: F) -> ReadLoop
    where
        F: FnMut(Result<ReadReport>) + Send + 'static,
    {
        ReadLoop::spawn(self, on_report)
    }
}

impl std::fmt::Debug for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Demo")
            .field("reader", &self.reader.kind())
            .field("handshake", &self.handshake)
            .field("config", &self.config)
            .finish()
    }
}
