// ntagi2c/src/ndef/message.rs
//! NDEF records and messages, with the record kinds the demo board uses.

use crate::protocol::parser::{byte_at, ensure_len, slice_at};
use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// URI identifier codes 0x01..=0x23 (NFC Forum URI record type definition).
const URI_PREFIXES: [&str; 35] = [
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Type name format of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tnf {
    /// No type or payload.
    Empty,
    /// NFC Forum well-known type.
    WellKnown,
    /// MIME media type.
    Media,
    /// Absolute URI type.
    AbsoluteUri,
    /// NFC Forum external type.
    External,
    /// Unknown type.
    Unknown,
    /// Continuation chunk.
    Unchanged,
    /// Reserved value.
    Reserved,
}

impl Tnf {
    /// Decode the three TNF bits of a record header.
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Media,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    /// The three TNF bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::Media => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }
}

/// A single NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Type name format.
    pub tnf: Tnf,
    /// Record type.
    pub record_type: Vec<u8>,
    /// Record id; empty when absent.
    pub id: Vec<u8>,
    /// Record payload.
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Record without an id.
    pub fn new(tnf: Tnf, record_type: &[u8], payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Attach an id.
    pub fn with_id(mut self, id: &[u8]) -> Self {
        self.id = id.to_vec();
        self
    }

    /// Well-known text record, UTF-8 encoded.
    pub fn text(lang: &str, text: &str) -> Self {
        let lang = lang.as_bytes();
        let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
        payload.push((lang.len() & 0x3F) as u8);
        payload.extend_from_slice(lang);
        payload.extend_from_slice(text.as_bytes());
        Self::new(Tnf::WellKnown, b"T", payload)
    }

    /// Well-known URI record, abbreviated with the longest matching prefix.
    pub fn uri(uri: &str) -> Self {
        let (code, rest) = URI_PREFIXES
            .iter()
            .enumerate()
            .filter(|(_, p)| uri.starts_with(*p))
            .max_by_key(|(_, p)| p.len())
            .map(|(i, p)| (i as u8 + 1, &uri[p.len()..]))
            .unwrap_or((0, uri));
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest.as_bytes());
        Self::new(Tnf::WellKnown, b"U", payload)
    }

    /// Smart poster holding an English title and a URI.
    pub fn smart_poster(title: &str, uri: &str) -> Self {
        // one-byte types and no ids, so the header lengths always fit
        let records = [Self::text("en", title), Self::uri(uri)];
        let mut payload = Vec::new();
        for (i, record) in records.iter().enumerate() {
            record.write_to(&mut payload, i == 0, i == records.len() - 1);
        }
        Self::new(Tnf::WellKnown, b"Sp", payload)
    }

    /// Android application record naming the package to launch.
    pub fn android_application(package: &str) -> Self {
        Self::new(Tnf::External, b"android.com:pkg", package.as_bytes().to_vec())
    }

    fn is_well_known(&self, record_type: &[u8]) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == record_type
    }

    /// Text of a well-known text record.
    pub fn text_content(&self) -> Option<String> {
        if !self.is_well_known(b"T") {
            return None;
        }
        let status = *self.payload.first()?;
        let lang_len = (status & 0x3F) as usize;
        let body = self.payload.get(1 + lang_len..)?;
        if status & 0x80 != 0 {
            let units: Vec<u16> = body
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16(&units).ok()
        } else {
            String::from_utf8(body.to_vec()).ok()
        }
    }

    /// Language code of a well-known text record.
    pub fn text_language(&self) -> Option<String> {
        if !self.is_well_known(b"T") {
            return None;
        }
        let lang_len = (*self.payload.first()? & 0x3F) as usize;
        let lang = self.payload.get(1..1 + lang_len)?;
        String::from_utf8(lang.to_vec()).ok()
    }

    /// Expanded URI of a well-known URI record.
    pub fn as_uri(&self) -> Option<String> {
        if !self.is_well_known(b"U") {
            return None;
        }
        let code = *self.payload.first()? as usize;
        let prefix = match code {
            0 => "",
            n => *URI_PREFIXES.get(n - 1)?,
        };
        let rest = std::str::from_utf8(&self.payload[1..]).ok()?;
        Some(format!("{}{}", prefix, rest))
    }

    /// Nested message of a smart poster record.
    pub fn as_smart_poster(&self) -> Option<NdefMessage> {
        if !self.is_well_known(b"Sp") {
            return None;
        }
        NdefMessage::parse(&self.payload).ok()
    }

    /// Type and id lengths go into one-byte header fields, the payload
    /// length into at most four bytes.
    fn check_lengths(&self) -> Result<()> {
        let max = usize::from(u8::MAX);
        for len in [self.record_type.len(), self.id.len()] {
            if len > max {
                return Err(Error::InvalidLength {
                    expected: max,
                    actual: len,
                });
            }
        }
        if u32::try_from(self.payload.len()).is_err() {
            return Err(Error::InvalidLength {
                expected: u32::MAX as usize,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    /// Serialize with the given MB/ME flags. Lengths must have passed
    /// `check_lengths`.
    fn write_to(&self, out: &mut Vec<u8>, first: bool, last: bool) {
        let short = self.payload.len() < 256;
        let mut flags = self.tnf.bits();
        if first {
            flags |= FLAG_MB;
        }
        if last {
            flags |= FLAG_ME;
        }
        if short {
            flags |= FLAG_SR;
        }
        if !self.id.is_empty() {
            flags |= FLAG_IL;
        }
        out.push(flags);
        out.push(self.record_type.len() as u8);
        if short {
            out.push(self.payload.len() as u8);
        } else {
            out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        }
        if !self.id.is_empty() {
            out.push(self.id.len() as u8);
        }
        out.extend_from_slice(&self.record_type);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
    }

    /// Parse one record at `pos`, returning it with its ME flag and the
    /// position after it.
    fn read_from(data: &[u8], pos: usize) -> Result<(Self, bool, usize)> {
        let flags = byte_at(data, pos)?;
        if flags & FLAG_CF != 0 {
            return Err(Error::NdefFormat("chunked records are not supported".into()));
        }
        let type_len = byte_at(data, pos + 1)? as usize;
        let mut cursor = pos + 2;
        let payload_len = if flags & FLAG_SR != 0 {
            let len = byte_at(data, cursor)? as usize;
            cursor += 1;
            len
        } else {
            let raw = slice_at(data, cursor, 4)?;
            cursor += 4;
            u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
        };
        let id_len = if flags & FLAG_IL != 0 {
            let len = byte_at(data, cursor)? as usize;
            cursor += 1;
            len
        } else {
            0
        };
        let record_type = slice_at(data, cursor, type_len)?.to_vec();
        cursor += type_len;
        let id = slice_at(data, cursor, id_len)?.to_vec();
        cursor += id_len;
        ensure_len(data, cursor.saturating_add(payload_len))?;
        let payload = data[cursor..cursor + payload_len].to_vec();
        cursor += payload_len;
        let record = Self {
            tnf: Tnf::from_bits(flags),
            record_type,
            id,
            payload,
        };
        Ok((record, flags & FLAG_ME != 0, cursor))
    }
}

/// An ordered list of records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    /// Message made of `records`.
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// Message holding one English text record. Empty text yields `None`.
    pub fn text(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self::new(vec![NdefRecord::text("en", text)]))
    }

    /// Records in order.
    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    /// True when the message has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Text of the first text record, if any.
    pub fn first_text(&self) -> Option<String> {
        self.records.iter().find_map(NdefRecord::text_content)
    }

    /// Serialize the records. A type or id longer than 255 bytes is an
    /// `InvalidLength`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        for record in &self.records {
            record.check_lengths()?;
        }
        let mut out = Vec::new();
        let last = self.records.len().saturating_sub(1);
        for (i, record) in self.records.iter().enumerate() {
            record.write_to(&mut out, i == 0, i == last);
        }
        Ok(out)
    }

    /// Parse a serialized message. Empty input is an empty message.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut records = Vec::new();
        let mut pos = 0;
        while pos < data.len() {
            let (record, end, next) = NdefRecord::read_from(data, pos)?;
            records.push(record);
            pos = next;
            if end {
                break;
            }
        }
        Ok(Self { records })
    }
}
