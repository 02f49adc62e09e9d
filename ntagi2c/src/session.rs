// ntagi2c/src/session.rs
//! One connection to a tag plus the sector it currently has selected.

use crate::constants::BLOCK_SIZE;
use crate::product::TagProduct;
use crate::protocol::parser::reject_nak;
use crate::protocol::{Command, Response, VersionInfo};
use crate::transport::Transport;
use crate::types::Block;
use crate::{Error, Result};

/// The live connection to one tag, the product once known and the sector
/// currently selected. Owned by exactly one reader.
pub struct TagSession {
    transport: Box<dyn Transport>,
    product: Option<TagProduct>,
    sector: u8,
}

impl TagSession {
    /// Session for a tag of unknown product.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            product: None,
            sector: 0,
        }
    }

    /// Session for a tag already identified.
    pub fn with_product(transport: Box<dyn Transport>, product: TagProduct) -> Self {
        Self {
            transport,
            product: Some(product),
            sector: 0,
        }
    }

    /// Open the connection; a new connection starts in sector 0.
    pub fn connect(&mut self) -> Result<()> {
        self.transport.connect()?;
        // a fresh activation always starts in sector 0
        self.sector = 0;
        Ok(())
    }

    /// Close the connection.
    pub fn close(&mut self) -> Result<()> {
        self.transport.close()
    }

    /// True while the connection is open.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Close and open again.
    pub fn reconnect(&mut self) -> Result<()> {
        self.close()?;
        self.connect()
    }

    /// Product, once identified.
    pub fn product(&self) -> Option<TagProduct> {
        self.product
    }

    /// Record the product.
    pub fn set_product(&mut self, product: TagProduct) {
        self.product = Some(product);
    }

    /// Sector currently selected.
    pub fn sector(&self) -> u8 {
        self.sector
    }

    /// Largest frame the link accepts.
    pub fn max_transceive_len(&self) -> usize {
        self.transport.max_transceive_len()
    }

    /// The underlying transport.
    pub fn transport_mut(&mut self) -> &mut dyn Transport {
        &mut *self.transport
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.transport.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    /// Send GET_VERSION.
    pub fn get_version(&mut self) -> Result<VersionInfo> {
        self.ensure_connected()?;
        match self.transport.execute(&Command::GetVersion)? {
            Response::Version(info) => Ok(info),
            other => Err(Error::Transport(format!(
                "unexpected answer to GET_VERSION: {:?}",
                other
            ))),
        }
    }

    /// Two-packet SECTOR_SELECT. The tag confirms packet 2 by not
    /// answering, so a timeout there is success.
    pub fn select_sector(&mut self, sector: u8) -> Result<()> {
        self.ensure_connected()?;
        self.transport.execute(&Command::SectorSelect)?;
        match self
            .transport
            .transceive(&Command::SectorSelectTarget { sector }.encode())
        {
            Err(Error::Timeout) => {}
            Ok(raw) => reject_nak(&raw)?,
            Err(e) => return Err(e),
        }
        log::debug!("selected sector {}", sector);
        self.sector = sector;
        Ok(())
    }

    /// READ at `page` of the current sector: 16 bytes.
    pub fn read_page(&mut self, page: u8) -> Result<Vec<u8>> {
        self.ensure_connected()?;
        self.transport.read_pages(page)
    }

    /// FAST_READ of pages `start..=end` of the current sector.
    pub fn fast_read(&mut self, start: u8, end: u8) -> Result<Vec<u8>> {
        self.ensure_connected()?;
        match self.transport.execute(&Command::FastRead { start, end })? {
            Response::Pages(data) => Ok(data),
            other => Err(Error::Transport(format!(
                "unexpected answer to FAST_READ: {:?}",
                other
            ))),
        }
    }

    /// WRITE one page in the current sector.
    pub fn write_page(&mut self, page: u8, data: &Block) -> Result<()> {
        self.ensure_connected()?;
        self.transport.write_page(page, data)
    }

    /// Pages one FAST_READ may cover without exceeding the transceive limit.
    pub fn max_fast_read_pages(&self) -> u16 {
        let limit = match self.product {
            Some(p) => self.max_transceive_len().min(p.max_transceive_len()),
            None => self.max_transceive_len(),
        };
        (limit.saturating_sub(2) / BLOCK_SIZE).max(1) as u16
    }
}

impl std::fmt::Debug for TagSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSession")
            .field("technology", &self.transport.technology())
            .field("connected", &self.transport.is_connected())
            .field("product", &self.product)
            .field("sector", &self.sector)
            .finish()
    }
}
