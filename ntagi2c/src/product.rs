// ntagi2c/src/product.rs
//! Tag product identification.
//!
//! The active path decodes a GET_VERSION answer. The passive path is used
//! when the transport cannot issue GET_VERSION: it pattern-matches the
//! capability container in page 0 and then peeks at the session registers
//! to tell the Plus variants apart.

use derive_more::Display;

use crate::constants::{
    BLOCK_SIZE, CC_SIGNATURE_1K, CC_SIGNATURE_2K, DEFAULT_MAX_TRANSCEIVE_LEN, NXP_VENDOR_ID,
    PAGES_PER_SECTOR,
};
use crate::protocol::VersionInfo;
use crate::protocol::parser::{byte_at, slice_at};
use crate::registers::MemoryRegister;
use crate::{Error, Result};

/// Storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capacity {
    /// About 1 kB of user memory.
    #[display(fmt = "1k")]
    OneK,
    /// About 2 kB of user memory.
    #[display(fmt = "2k")]
    TwoK,
}

/// Silicon variant within a storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// First generation.
    Standard,
    /// T variant.
    T,
    /// V variant.
    V,
    /// NTAG I2C plus.
    Plus,
}

/// Tag family, determined once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagProduct {
    /// NTAG I2C 1k.
    #[display(fmt = "NTAG I2C 1k")]
    Ntag1k,
    /// NTAG I2C 2k.
    #[display(fmt = "NTAG I2C 2k")]
    Ntag2k,
    /// NTAG I2C 1k T.
    #[display(fmt = "NTAG I2C 1k T")]
    Ntag1kT,
    /// NTAG I2C 2k T.
    #[display(fmt = "NTAG I2C 2k T")]
    Ntag2kT,
    /// NTAG I2C 1k V.
    #[display(fmt = "NTAG I2C 1k V")]
    Ntag1kV,
    /// NTAG I2C 2k V.
    #[display(fmt = "NTAG I2C 2k V")]
    Ntag2kV,
    /// NTAG I2C plus 1k.
    #[display(fmt = "NTAG I2C plus 1k")]
    NtagPlus1k,
    /// NTAG I2C plus 2k.
    #[display(fmt = "NTAG I2C plus 2k")]
    NtagPlus2k,
    /// Anything else.
    #[display(fmt = "unknown tag")]
    Unknown,
}

// GET_VERSION fields of the NTAG I2C family
const PRODUCT_TYPE_NTAG: u8 = 0x04;
const SUBTYPE_STANDARD: u8 = 0x05;
const SUBTYPE_T: u8 = 0x06;
const SUBTYPE_V: u8 = 0x07;
const MAJOR_NTAG_I2C: u8 = 0x02;
const MINOR_PLUS: u8 = 0x02;
const STORAGE_1K: u8 = 0x13;
const STORAGE_2K: u8 = 0x15;

impl TagProduct {
    /// Product for a storage class and variant.
    pub fn new(capacity: Capacity, variant: Variant) -> Self {
        match (capacity, variant) {
            (Capacity::OneK, Variant::Standard) => Self::Ntag1k,
            (Capacity::OneK, Variant::T) => Self::Ntag1kT,
            (Capacity::OneK, Variant::V) => Self::Ntag1kV,
            (Capacity::OneK, Variant::Plus) => Self::NtagPlus1k,
            (Capacity::TwoK, Variant::Standard) => Self::Ntag2k,
            (Capacity::TwoK, Variant::T) => Self::Ntag2kT,
            (Capacity::TwoK, Variant::V) => Self::Ntag2kV,
            (Capacity::TwoK, Variant::Plus) => Self::NtagPlus2k,
        }
    }

    /// Storage class; `None` for `Unknown`.
    pub fn capacity(self) -> Option<Capacity> {
        match self {
            Self::Ntag1k | Self::Ntag1kT | Self::Ntag1kV | Self::NtagPlus1k => Some(Capacity::OneK),
            Self::Ntag2k | Self::Ntag2kT | Self::Ntag2kV | Self::NtagPlus2k => Some(Capacity::TwoK),
            Self::Unknown => None,
        }
    }

    /// Variant; `None` for `Unknown`.
    pub fn variant(self) -> Option<Variant> {
        match self {
            Self::Ntag1k | Self::Ntag2k => Some(Variant::Standard),
            Self::Ntag1kT | Self::Ntag2kT => Some(Variant::T),
            Self::Ntag1kV | Self::Ntag2kV => Some(Variant::V),
            Self::NtagPlus1k | Self::NtagPlus2k => Some(Variant::Plus),
            Self::Unknown => None,
        }
    }

    /// True for the plus products.
    pub fn is_plus(self) -> bool {
        self.variant() == Some(Variant::Plus)
    }

    /// True for the 2k products.
    pub fn is_two_k(self) -> bool {
        self.capacity() == Some(Capacity::TwoK)
    }

    /// False only for `Unknown`.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// User memory size in bytes.
    pub fn memory_size(self) -> usize {
        match self {
            Self::NtagPlus2k => 1912,
            Self::Ntag2k | Self::Ntag2kT | Self::Ntag2kV => 1904,
            Self::Ntag1k | Self::Ntag1kT | Self::Ntag1kV | Self::NtagPlus1k => 888,
            Self::Unknown => 0,
        }
    }

    /// Last user page of sector 0. Plus tags keep their configuration
    /// registers right after 0xE1.
    pub fn sector0_last_user_page(self) -> u16 {
        if self.is_plus() { 0xE1 } else { 0xFF }
    }

    /// Highest logical page a reader may address. Pages past
    /// `sector0_last_user_page` continue in sector 1.
    pub fn last_logical_page(self) -> u16 {
        let first = MemoryRegister::UserMemoryBegin.page() as usize;
        let pages = self.memory_size().div_ceil(BLOCK_SIZE);
        let sector0_pages = (self.sector0_last_user_page() as usize + 1).saturating_sub(first);
        if pages <= sector0_pages {
            (first + pages).saturating_sub(1) as u16
        } else {
            self.sector0_last_user_page() + (pages - sector0_pages) as u16
        }
    }

    /// Highest logical page a read may reach: the end of sector 1 on 2k
    /// tags, the end of sector 0 otherwise.
    pub fn last_readable_page(self) -> u16 {
        if self.is_two_k() {
            self.sector0_last_user_page() + PAGES_PER_SECTOR
        } else {
            PAGES_PER_SECTOR - 1
        }
    }

    /// Sector holding the SRAM window.
    pub fn sram_sector(self) -> u8 {
        if self == Self::Ntag2k { 1 } else { 0 }
    }

    /// Largest frame the product accepts in one transceive.
    pub fn max_transceive_len(self) -> usize {
        DEFAULT_MAX_TRANSCEIVE_LEN
    }

    /// Decode a GET_VERSION answer. Anything outside the NTAG I2C family
    /// maps to `Unknown`.
    pub fn from_version(info: &VersionInfo) -> Self {
        if info.vendor != NXP_VENDOR_ID
            || info.product_type != PRODUCT_TYPE_NTAG
            || info.major != MAJOR_NTAG_I2C
        {
            return Self::Unknown;
        }
        let capacity = match info.storage_size {
            STORAGE_1K => Capacity::OneK,
            STORAGE_2K => Capacity::TwoK,
            _ => return Self::Unknown,
        };
        let variant = if info.minor == MINOR_PLUS {
            Variant::Plus
        } else {
            match info.subtype {
                SUBTYPE_STANDARD => Variant::Standard,
                SUBTYPE_T => Variant::T,
                SUBTYPE_V => Variant::V,
                _ => return Self::Unknown,
            }
        };
        Self::new(capacity, variant)
    }

    /// GET_VERSION answer a tag of this product returns.
    pub fn version_info(self) -> Option<VersionInfo> {
        let capacity = self.capacity()?;
        let variant = self.variant()?;
        Some(VersionInfo {
            header: 0x00,
            vendor: NXP_VENDOR_ID,
            product_type: PRODUCT_TYPE_NTAG,
            subtype: match variant {
                Variant::T => SUBTYPE_T,
                Variant::V => SUBTYPE_V,
                Variant::Standard | Variant::Plus => SUBTYPE_STANDARD,
            },
            major: MAJOR_NTAG_I2C,
            minor: if variant == Variant::Plus { MINOR_PLUS } else { 0x01 },
            storage_size: match capacity {
                Capacity::OneK => STORAGE_1K,
                Capacity::TwoK => STORAGE_2K,
            },
            protocol_type: 0x03,
        })
    }
}

/// Match the capability container signature in the first 16 bytes of
/// memory (a READ of page 0).
pub fn identify_capability_container(page0: &[u8]) -> Result<Capacity> {
    if byte_at(page0, 0)? != NXP_VENDOR_ID {
        return Err(Error::UnsupportedTag);
    }
    let cc = slice_at(page0, 12, 4)?;
    if cc == CC_SIGNATURE_1K {
        Ok(Capacity::OneK)
    } else if cc == CC_SIGNATURE_2K {
        Ok(Capacity::TwoK)
    } else {
        Err(Error::UnsupportedTag)
    }
}

/// Passive identification. `read_page` performs a READ at a sector-0 page
/// and returns its 16 bytes.
///
/// A failed read while telling Plus from standard silicon is not fatal: the
/// standard variant of the matched storage class is assumed.
pub fn identify_passive<F>(mut read_page: F) -> Result<TagProduct>
where
    F: FnMut(u8) -> Result<Vec<u8>>,
{
    let page0 = read_page(MemoryRegister::Uid.wire_page())?;
    let capacity = identify_capability_container(&page0)?;
    let standard = TagProduct::new(capacity, Variant::Standard);

    // An NTAG216 carries the same 1k signature but has no configuration page.
    if capacity == Capacity::OneK {
        if let Err(e) = read_page(MemoryRegister::Configuration.wire_page()) {
            log::debug!("configuration page unreadable ({}), not an NTAG I2C", e);
            return Err(Error::UnsupportedTag);
        }
    }

    match read_page(MemoryRegister::SessionPlus.wire_page()) {
        Ok(session) => {
            if session.iter().take(BLOCK_SIZE).any(|b| *b != 0) {
                Ok(TagProduct::new(capacity, Variant::Plus))
            } else {
                Ok(standard)
            }
        }
        Err(e) => {
            log::warn!("session register read failed ({}), assuming {}", e, standard);
            Ok(standard)
        }
    }
}

/// Split a logical page into (sector, page-in-sector) for `product`.
///
/// On 2k tags the pages after `sector0_last_user_page` continue at page 0
/// of sector 1. Other products address sector 0 directly.
pub fn physical_page(product: TagProduct, logical: u16) -> (u8, u8) {
    let sector0_last = product.sector0_last_user_page();
    if product.is_two_k() && logical > sector0_last {
        let offset = logical - sector0_last - 1;
        ((1 + offset / PAGES_PER_SECTOR) as u8, (offset % PAGES_PER_SECTOR) as u8)
    } else {
        ((logical / PAGES_PER_SECTOR) as u8, (logical % PAGES_PER_SECTOR) as u8)
    }
}
