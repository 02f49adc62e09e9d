// ntagi2c/src/probe.rs
//! Capability probe.
//!
//! Picks the reader a phone/tag pairing supports by trying progressively
//! less capable command sets. Each step opens its own connection and
//! releases it before the next step runs; the chosen reader gets a fresh,
//! unconnected transport.

use crate::config::ProbeConfig;
use crate::product::{TagProduct, identify_passive};
use crate::protocol::{Command, Response};
use crate::reader::{FullReader, MinimalReader, TagReader};
use crate::transport::{TagHandle, Technology, Transport};
use crate::{Error, Result};

/// A connected transport that is closed when dropped.
struct OpenConnection {
    transport: Box<dyn Transport>,
}

impl OpenConnection {
    fn open(tag: &dyn TagHandle, technology: Technology) -> Result<Self> {
        let transport = tag.open(technology)?;
        Ok(Self { transport })
    }

    fn connect(mut self) -> Result<Self> {
        self.transport.connect()?;
        Ok(self)
    }

    fn get_version(&mut self) -> Result<TagProduct> {
        match self.transport.execute(&Command::GetVersion)? {
            Response::Version(info) => Ok(TagProduct::from_version(&info)),
            other => Err(Error::Transport(format!(
                "unexpected answer to GET_VERSION: {:?}",
                other
            ))),
        }
    }
}

impl Drop for OpenConnection {
    fn drop(&mut self) {
        if let Err(e) = self.transport.close() {
            log::debug!("closing probe connection failed: {}", e);
        }
    }
}

fn connected(tag: &dyn TagHandle, technology: Technology) -> Result<OpenConnection> {
    OpenConnection::open(tag, technology)?.connect()
}

/// Probe with default settings.
pub fn probe(tag: &dyn TagHandle) -> Result<Box<dyn TagReader>> {
    probe_with(tag, &ProbeConfig::default())
}

/// Run the probe ladder and return an unconnected reader.
///
/// Failed steps fall through to the next one. Only when every step failed
/// is `ReaderUnavailable` returned, carrying the last failure.
pub fn probe_with(tag: &dyn TagHandle, config: &ProbeConfig) -> Result<Box<dyn TagReader>> {
    let mut last_error = String::from("tag exposes neither NfcA nor MifareUltralight");

    if tag.supports(Technology::NfcA) {
        match probe_nfca(tag, config) {
            Ok(Some(reader)) => return Ok(reader),
            Ok(None) => {}
            Err(e) => {
                log::debug!("NfcA probe failed: {}", e);
                last_error = e.to_string();
            }
        }
    }

    if tag.supports(Technology::MifareUltralight) {
        match probe_minimal(tag, config) {
            Ok(reader) => return Ok(reader),
            Err(e) => {
                log::debug!("minimal probe failed: {}", e);
                last_error = e.to_string();
            }
        }
    }

    log::warn!("no usable reader for this tag: {}", last_error);
    Err(Error::ReaderUnavailable { last_error })
}

/// Steps 1 to 3. `Ok(None)` means the pairing is too slow for the active
/// probes.
fn probe_nfca(tag: &dyn TagHandle, config: &ProbeConfig) -> Result<Option<Box<dyn TagReader>>> {
    let mut conn = OpenConnection::open(tag, Technology::NfcA)?;
    conn.transport.set_timeout(config.probe_timeout_ms)?;
    let timeout = conn.transport.timeout();
    if timeout >= config.sector_select_timeout_limit_ms {
        log::debug!(
            "transceive timeout is {} ms, skipping FAST_READ/SECTOR_SELECT probes",
            timeout
        );
        return Ok(None);
    }
    let mut conn = conn.connect()?;

    match conn.get_version() {
        Ok(product) if product.is_known() => {
            drop(conn);
            log::debug!("GET_VERSION identified {}", product);
            return full_reader(tag, Some(product), config).map(Some);
        }
        Ok(product) => {
            // some other tag type; leave it to the minimal path
            log::debug!("GET_VERSION answered with {}", product);
            return Ok(None);
        }
        Err(e) => log::debug!("GET_VERSION failed: {}", e),
    }
    drop(conn);

    // a failed command can leave the tag halted; start over
    let mut conn = connected(tag, Technology::NfcA)?;
    match conn.transport.execute(&Command::SectorSelect)? {
        Response::Ack => {
            drop(conn);
            log::debug!("SECTOR_SELECT acknowledged, product identified on first use");
            full_reader(tag, None, config).map(Some)
        }
        other => Err(Error::Transport(format!(
            "unexpected answer to SECTOR_SELECT: {:?}",
            other
        ))),
    }
}

fn full_reader(
    tag: &dyn TagHandle,
    product: Option<TagProduct>,
    config: &ProbeConfig,
) -> Result<Box<dyn TagReader>> {
    let transport = tag.open(Technology::NfcA)?;
    Ok(Box::new(FullReader::new(transport, product).with_layout(config.layout)))
}

/// Step 4: GET_VERSION over MifareUltralight, then the capability
/// container.
fn probe_minimal(tag: &dyn TagHandle, config: &ProbeConfig) -> Result<Box<dyn TagReader>> {
    let product = {
        let mut conn = connected(tag, Technology::MifareUltralight)?;
        match conn.get_version() {
            Ok(product) if product.is_known() => Some(product),
            Ok(_) => None,
            Err(e) => {
                log::debug!("GET_VERSION over MifareUltralight failed: {}", e);
                None
            }
        }
    };

    let product = match product {
        Some(p) => p,
        None => {
            let mut conn = connected(tag, Technology::MifareUltralight)?;
            identify_passive(|page| conn.transport.read_pages(page))?
        }
    };
    log::debug!("minimal reader for {}", product);

    let transport = tag.open(Technology::MifareUltralight)?;
    Ok(Box::new(MinimalReader::new(transport, product).with_layout(config.layout)))
}
