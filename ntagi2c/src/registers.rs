// ntagi2c/src/registers.rs
//! Named page addresses in tag memory and the demo-board memory layout.

/// Page addresses of the registers in sector 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryRegister {
    /// UID and lock bytes.
    Uid,
    /// Capability container.
    CapabilityContainer,
    /// First user memory page.
    UserMemoryBegin,
    /// Start of password protection.
    Auth0,
    /// Access configuration.
    Access,
    /// Password.
    Pwd,
    /// Password acknowledge.
    Pack,
    /// I2C protection.
    PtI2c,
    /// Configuration registers.
    Configuration,
    /// Session registers of the plus products.
    SessionPlus,
    /// First SRAM page.
    SramBegin,
    /// Session registers.
    Session,
}

impl MemoryRegister {
    /// Logical page of the register.
    pub const fn page(self) -> u16 {
        match self {
            Self::Uid => 0x00,
            Self::CapabilityContainer => 0x03,
            Self::UserMemoryBegin => 0x04,
            Self::Auth0 => 0xE3,
            Self::Access => 0xE4,
            Self::Pwd => 0xE5,
            Self::Pack => 0xE6,
            Self::PtI2c => 0xE7,
            Self::Configuration => 0xE8,
            Self::SessionPlus => 0xEC,
            Self::SramBegin => 0xF0,
            Self::Session => 0xF8,
        }
    }

    /// Page address as sent on the wire (sector-relative).
    pub const fn wire_page(self) -> u8 {
        self.page() as u8
    }
}

/// Where the NDEF TLV and the handshake rows live in user memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryLayout {
    /// First page of the NDEF TLV.
    pub ndef_begin: u16,
    /// Page of the embedded side's status row; the phone's row follows it.
    pub status_page: u16,
}

impl MemoryLayout {
    /// LPC8N04 demo firmware: status rows at 0x04/0x05, NDEF from 0x06.
    pub const DEMO_BOARD: Self = Self {
        ndef_begin: 0x06,
        status_page: 0x04,
    };

    /// Plain NFC Forum layout with the NDEF TLV at the start of user memory.
    pub const BARE: Self = Self {
        ndef_begin: MemoryRegister::UserMemoryBegin.page(),
        status_page: MemoryRegister::UserMemoryBegin.page(),
    };

    /// Page of the phone's status row.
    pub fn phone_status_page(&self) -> u16 {
        self.status_page + 1
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::DEMO_BOARD
    }
}
