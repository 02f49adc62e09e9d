// ntagi2c/src/transport/mock.rs
//! In-memory tag that answers the command set, for tests and demos.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::constants::{
    ACK, BLOCK_SIZE, CMD_FAST_READ, CMD_GET_VERSION, CMD_READ, CMD_SECTOR_SELECT, CMD_WRITE,
    CC_SIGNATURE_1K, CC_SIGNATURE_2K, DEFAULT_MAX_TRANSCEIVE_LEN, NXP_VENDOR_ID,
    PAGES_PER_SECTOR, READ_PAGES_PER_COMMAND, SECTOR_SELECT_PACKET1_ARG, VERSION_LEN,
};
use crate::handshake::{HandshakeRow, SlotState};
use crate::product::{Capacity, TagProduct};
use crate::registers::{MemoryLayout, MemoryRegister};
use crate::transport::traits::{TagHandle, Technology, Transport};
use crate::{Error, Result};

const SECTOR_BYTES: usize = PAGES_PER_SECTOR as usize * BLOCK_SIZE;
const NAK_INVALID_ARGUMENT: u8 = 0x00;

/// In-memory NTAG I2C used by unit tests, integration tests and demos.
///
/// It speaks the raw command set (GET_VERSION, READ, FAST_READ, WRITE,
/// SECTOR_SELECT) against two 256-page sectors and can play the embedded
/// side of the handshake from a script.
#[derive(Debug, Clone)]
pub struct SimulatedTag {
    /// Product the tag reports.
    pub product: TagProduct,
    /// Memory, one vector per sector.
    pub sectors: Vec<Vec<u8>>,
    /// Sector currently selected.
    pub sector: usize,
    /// Whether GET_VERSION is answered.
    pub supports_get_version: bool,
    /// Whether SECTOR_SELECT is answered.
    pub supports_sector_select: bool,
    /// GET_VERSION answer replacing the product's own
    pub version_answer: Option<[u8; VERSION_LEN]>,
    /// Lowest timeout the transport can honour
    pub min_timeout_ms: u64,
    /// Frame limit reported to callers.
    pub max_transceive_len: usize,
    /// Cleared to simulate the tag leaving the field
    pub present: bool,
    /// Technology of the open connection, if any.
    pub open_connection: Option<Technology>,
    /// Set after an unsupported command; cleared by the next connect
    pub halted: bool,
    /// True between the two SECTOR_SELECT packets.
    pub sector_select_pending: bool,
    /// Every packet received, in order
    pub log: Vec<Vec<u8>>,
    /// Connections opened so far.
    pub connects: usize,
    /// Connect attempts rejected because another connection was open
    pub connect_conflicts: usize,
    /// (sector, page) pairs whose reads and writes answer NAK
    pub failing_pages: Vec<(usize, u8)>,
    /// Embedded-side states played into the status row, one per observation
    pub embedded_script: VecDeque<SlotState>,
    /// State played once the script is exhausted; `None` leaves the row alone
    pub embedded_default: Option<SlotState>,
    /// Page of the phone status row.
    pub status_page: u8,
    /// Number of reads that covered the status row while a script was active
    pub status_observations: usize,
}

impl SimulatedTag {
    /// A blank tag of the given product with its UID and capability
    /// container in place.
    pub fn new(product: TagProduct) -> Self {
        let mut tag = Self {
            product,
            sectors: vec![vec![0u8; SECTOR_BYTES]; 2],
            sector: 0,
            supports_get_version: true,
            supports_sector_select: true,
            version_answer: None,
            min_timeout_ms: 0,
            max_transceive_len: DEFAULT_MAX_TRANSCEIVE_LEN,
            present: true,
            open_connection: None,
            halted: false,
            sector_select_pending: false,
            log: Vec::new(),
            connects: 0,
            connect_conflicts: 0,
            failing_pages: Vec::new(),
            embedded_script: VecDeque::new(),
            embedded_default: None,
            status_page: MemoryLayout::DEMO_BOARD.status_page as u8,
            status_observations: 0,
        };
        tag.set_page(0, 0, [NXP_VENDOR_ID, 0x3A, 0x5C, 0x88 ^ NXP_VENDOR_ID ^ 0x3A ^ 0x5C]);
        tag.set_page(0, 1, [0x12, 0x34, 0x56, 0x78]);
        tag.set_page(0, 2, [0x12 ^ 0x34 ^ 0x56 ^ 0x78, 0x48, 0x00, 0x00]);
        let cc = match product.capacity() {
            Some(Capacity::TwoK) => CC_SIGNATURE_2K,
            _ => CC_SIGNATURE_1K,
        };
        tag.set_page(0, MemoryRegister::CapabilityContainer.wire_page(), cc);
        tag.set_page(0, MemoryRegister::Configuration.wire_page(), [0x01, 0x00, 0xF8, 0x48]);
        if product.is_plus() {
            tag.set_page(0, MemoryRegister::SessionPlus.wire_page(), [0x09, 0x00, 0xF8, 0x48]);
        }
        tag
    }

    /// Answer GET_VERSION with `answer` instead of the product's version.
    pub fn with_version_answer(mut self, answer: [u8; VERSION_LEN]) -> Self {
        self.version_answer = Some(answer);
        self
    }

    /// Phone/tag pairing that cannot issue GET_VERSION.
    pub fn without_get_version(mut self) -> Self {
        self.supports_get_version = false;
        self
    }

    /// Phone/tag pairing that cannot issue SECTOR_SELECT.
    pub fn without_sector_select(mut self) -> Self {
        self.supports_sector_select = false;
        self
    }

    /// Fail transceives when the timeout is below `ms`.
    pub fn with_min_timeout(mut self, ms: u64) -> Self {
        self.min_timeout_ms = ms;
        self
    }

    /// Set the reported frame limit.
    pub fn with_max_transceive_len(mut self, len: usize) -> Self {
        self.max_transceive_len = len;
        self
    }

    /// Answer NAK to reads and writes of `page` in `sector`.
    pub fn with_failing_page(mut self, sector: usize, page: u8) -> Self {
        self.failing_pages.push((sector, page));
        self
    }

    /// Queue embedded-side states; each read covering the status row
    /// consumes one.
    pub fn with_embedded_script<I>(mut self, states: I, then: Option<SlotState>) -> Self
    where
        I: IntoIterator<Item = SlotState>,
    {
        self.embedded_script = states.into_iter().collect();
        self.embedded_default = then;
        self
    }

    /// Contents of one page.
    pub fn page(&self, sector: usize, page: u8) -> [u8; BLOCK_SIZE] {
        let off = page as usize * BLOCK_SIZE;
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&self.sectors[sector][off..off + BLOCK_SIZE]);
        out
    }

    /// Overwrite one page.
    pub fn set_page(&mut self, sector: usize, page: u8, data: [u8; BLOCK_SIZE]) {
        let off = page as usize * BLOCK_SIZE;
        self.sectors[sector][off..off + BLOCK_SIZE].copy_from_slice(&data);
    }

    /// `len` bytes of sector memory starting at `page`.
    pub fn bytes(&self, sector: usize, page: u8, len: usize) -> Vec<u8> {
        let off = page as usize * BLOCK_SIZE;
        let end = (off + len).min(SECTOR_BYTES);
        self.sectors[sector][off..end].to_vec()
    }

    /// Copy `data` into sector memory starting at `page`.
    pub fn load(&mut self, sector: usize, page: u8, data: &[u8]) {
        let off = page as usize * BLOCK_SIZE;
        let end = (off + data.len()).min(SECTOR_BYTES);
        self.sectors[sector][off..end].copy_from_slice(&data[..end - off]);
    }

    /// Sector numbers carried by SECTOR_SELECT packet 2, in order.
    pub fn sector_selects(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut pending = false;
        for packet in &self.log {
            if pending {
                if let Some(s) = packet.first() {
                    out.push(*s);
                }
                pending = false;
            } else if packet.as_slice() == [CMD_SECTOR_SELECT, SECTOR_SELECT_PACKET1_ARG] {
                pending = true;
            }
        }
        out
    }

    /// Packets whose first byte is `code`.
    pub fn commands_with_code(&self, code: u8) -> Vec<Vec<u8>> {
        self.log
            .iter()
            .filter(|p| p.first() == Some(&code))
            .cloned()
            .collect()
    }

    fn halt(&mut self, why: &str) -> Result<Vec<u8>> {
        self.halted = true;
        Err(Error::Transport(why.to_string()))
    }

    fn observe_status_row(&mut self, start: u8, count: u16) {
        if self.sector != 0 {
            return;
        }
        let covers = (0..count).any(|i| (start as u16 + i) % PAGES_PER_SECTOR == self.status_page as u16);
        if !covers {
            return;
        }
        let next = self
            .embedded_script
            .pop_front()
            .or(self.embedded_default);
        if let Some(state) = next {
            self.status_observations += 1;
            let row = HandshakeRow::new(state);
            self.set_page(0, self.status_page, *row.to_block().as_bytes());
        }
    }

    fn read_span(&mut self, start: u8, count: u16) -> Result<Vec<u8>> {
        let nak = (0..count).any(|i| {
            let page = ((start as u16 + i) % PAGES_PER_SECTOR) as u8;
            self.failing_pages.contains(&(self.sector, page))
        });
        if nak {
            return Ok(vec![NAK_INVALID_ARGUMENT]);
        }
        self.observe_status_row(start, count);
        let mut out = Vec::with_capacity(count as usize * BLOCK_SIZE);
        for i in 0..count {
            let page = ((start as u16 + i) % PAGES_PER_SECTOR) as u8;
            out.extend_from_slice(&self.page(self.sector, page));
        }
        Ok(out)
    }

    /// Answer one packet the way the tag would.
    pub fn process(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.log.push(data.to_vec());
        if !self.present {
            return Err(Error::Transport("tag was lost".into()));
        }
        if self.halted {
            return Err(Error::Transport("tag is halted".into()));
        }

        if self.sector_select_pending {
            self.sector_select_pending = false;
            return match data {
                [sector, 0x00, 0x00, 0x00] if (*sector as usize) < self.sectors.len() => {
                    self.sector = *sector as usize;
                    // passive ACK: the tag stays silent
                    Err(Error::Timeout)
                }
                _ => Ok(vec![NAK_INVALID_ARGUMENT]),
            };
        }

        match *data {
            [CMD_GET_VERSION] if !self.supports_get_version => {
                self.halt("GET_VERSION not supported")
            }
            [CMD_GET_VERSION] => match (self.version_answer, self.product.version_info()) {
                (Some(answer), _) => Ok(answer.to_vec()),
                (None, Some(info)) => Ok(info.to_bytes().to_vec()),
                (None, None) => self.halt("GET_VERSION not supported"),
            },
            [CMD_READ, page] => self.read_span(page, READ_PAGES_PER_COMMAND),
            [CMD_FAST_READ, start, end] => {
                if end < start {
                    return Ok(vec![NAK_INVALID_ARGUMENT]);
                }
                let count = (end - start) as u16 + 1;
                if count as usize * BLOCK_SIZE > self.max_transceive_len {
                    return Err(Error::Transport("transceive length exceeded".into()));
                }
                self.read_span(start, count)
            }
            [CMD_WRITE, page, a, b, c, d] => {
                if self.failing_pages.contains(&(self.sector, page)) {
                    return Ok(vec![NAK_INVALID_ARGUMENT]);
                }
                self.set_page(self.sector, page, [a, b, c, d]);
                Ok(vec![ACK])
            }
            [CMD_SECTOR_SELECT, SECTOR_SELECT_PACKET1_ARG] => {
                if self.supports_sector_select {
                    self.sector_select_pending = true;
                    Ok(vec![ACK])
                } else {
                    self.halt("SECTOR_SELECT not supported")
                }
            }
            _ => self.halt("unknown command"),
        }
    }
}

fn lock(tag: &Mutex<SimulatedTag>) -> MutexGuard<'_, SimulatedTag> {
    tag.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tag handle backed by a shared `SimulatedTag`.
#[derive(Debug, Clone)]
pub struct MockTag {
    tag: Arc<Mutex<SimulatedTag>>,
    technologies: Vec<Technology>,
}

impl MockTag {
    /// Handle to a simulated tag.
    pub fn new(tag: SimulatedTag) -> Self {
        Self {
            tag: Arc::new(Mutex::new(tag)),
            technologies: vec![
                Technology::NfcA,
                Technology::MifareUltralight,
                Technology::Ndef,
            ],
        }
    }

    /// Set the technologies the tag reports.
    pub fn with_technologies(mut self, technologies: Vec<Technology>) -> Self {
        self.technologies = technologies;
        self
    }

    /// Inspect or mutate the simulated tag.
    pub fn state(&self) -> MutexGuard<'_, SimulatedTag> {
        lock(&self.tag)
    }

    /// A transport for `technology` that skips the technology check.
    pub fn transport(&self, technology: Technology) -> MockTransport {
        MockTransport::new(Arc::clone(&self.tag), technology)
    }
}

impl TagHandle for MockTag {
    fn technologies(&self) -> Vec<Technology> {
        self.technologies.clone()
    }

    fn open(&self, technology: Technology) -> Result<Box<dyn Transport>> {
        if !self.technologies.contains(&technology) {
            return Err(Error::Transport(format!(
                "{:?} is not available on this tag",
                technology
            )));
        }
        Ok(Box::new(self.transport(technology)))
    }
}

/// Mock transport for unit tests. It forwards packets to the shared
/// simulated tag and enforces the one-open-connection rule.
#[derive(Debug)]
pub struct MockTransport {
    tag: Arc<Mutex<SimulatedTag>>,
    technology: Technology,
    connected: bool,
    timeout_ms: u64,
}

impl MockTransport {
    /// Connection to `tag` over `technology`.
    pub fn new(tag: Arc<Mutex<SimulatedTag>>, technology: Technology) -> Self {
        Self {
            tag,
            technology,
            connected: false,
            timeout_ms: crate::utils::DEFAULT_TRANSCEIVE_TIMEOUT_MS,
        }
    }
}

impl Transport for MockTransport {
    fn technology(&self) -> Technology {
        self.technology
    }

    fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }
        let mut tag = lock(&self.tag);
        if !tag.present {
            return Err(Error::Transport("tag was lost".into()));
        }
        if tag.open_connection.is_some() {
            tag.connect_conflicts += 1;
            return Err(Error::Transport("another connection is already open".into()));
        }
        tag.open_connection = Some(self.technology);
        tag.halted = false;
        tag.sector_select_pending = false;
        tag.connects += 1;
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.connected {
            lock(&self.tag).open_connection = None;
            self.connected = false;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn transceive(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        lock(&self.tag).process(data)
    }

    fn set_timeout(&mut self, timeout_ms: u64) -> Result<()> {
        let floor = lock(&self.tag).min_timeout_ms;
        self.timeout_ms = timeout_ms.max(floor);
        Ok(())
    }

    fn timeout(&self) -> u64 {
        self.timeout_ms
    }

    fn max_transceive_len(&self) -> usize {
        lock(&self.tag).max_transceive_len
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
