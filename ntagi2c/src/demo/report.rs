// ntagi2c/src/demo/report.rs
//! Results of demo operations and the temperature line the board reports.

use std::fmt;

use crate::demo::stats::CycleStats;
use crate::handshake::Acquire;

/// Bytes of tag content searched for the temperature record.
const TEMPERATURE_WINDOW: usize = 128;
const FIELD_WIDTH: usize = 5;
/// Offsets of the current reading and the five history slots, relative to
/// the `TEMP0` tag.
const FIELD_OFFSETS: [usize; 6] = [5, 15, 25, 35, 45, 55];

/// Temperatures published by the demo firmware as a text record, in
/// tenths of a degree Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureReport {
    /// Current reading in tenths of a degree Celsius.
    pub current: u32,
    /// Slots 01 to 05 of the five-minute history
    pub history: [u32; 5],
}

impl TemperatureReport {
    /// Find the `en` language code and the `TEMP0` tag after it in the
    /// first 128 bytes of `content` and decode the six right-aligned
    /// decimal fields that follow.
    pub fn parse(content: &[u8]) -> Option<Self> {
        let window = &content[..content.len().min(TEMPERATURE_WINDOW)];
        let lang = find(window, b"en")?;
        let tag = lang + find(&window[lang..], b"TEMP0")?;

        let mut values = [0u32; 6];
        for (value, offset) in values.iter_mut().zip(FIELD_OFFSETS) {
            let start = tag + offset;
            let field = window.get(start..start + FIELD_WIDTH)?;
            *value = parse_field(field)?;
        }
        Some(Self {
            current: values[0],
            history: [values[1], values[2], values[3], values[4], values[5]],
        })
    }

    /// Tenths of a degree to degrees Celsius.
    pub fn celsius(deci: u32) -> f64 {
        f64::from(deci) / 10.0
    }

    /// Tenths of a degree Fahrenheit, truncated.
    pub fn deci_fahrenheit(deci: u32) -> u32 {
        (deci * 18 + 3200) / 10
    }

    /// Tenths of a degree Celsius to degrees Fahrenheit.
    pub fn fahrenheit(deci: u32) -> f64 {
        f64::from(Self::deci_fahrenheit(deci)) / 10.0
    }

    /// Current reading in degrees Celsius.
    pub fn current_celsius(&self) -> f64 {
        Self::celsius(self.current)
    }

    /// Current reading in degrees Fahrenheit.
    pub fn current_fahrenheit(&self) -> f64 {
        Self::fahrenheit(self.current)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Blanks are padding; anything else must be a digit.
fn parse_field(field: &[u8]) -> Option<u32> {
    let mut value = 0u32;
    for &b in field {
        match b {
            b' ' => {}
            b'0'..=b'9' => value = value * 10 + u32::from(b - b'0'),
            _ => return None,
        }
    }
    Some(value)
}

fn write_deci(f: &mut fmt::Formatter<'_>, deci: u32) -> fmt::Result {
    let fahrenheit = TemperatureReport::deci_fahrenheit(deci);
    write!(
        f,
        "{}.{} C / {}.{} F",
        deci / 10,
        deci % 10,
        fahrenheit / 10,
        fahrenheit % 10
    )
}

impl fmt::Display for TemperatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_deci(f, self.current)?;
        for (i, deci) in self.history.iter().enumerate() {
            write!(f, "\n{:02}: ", i + 1)?;
            write_deci(f, *deci)?;
        }
        Ok(())
    }
}

/// Outcome of a text write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Bytes moved and time taken.
    pub stats: CycleStats,
    /// How the status-row handshake ended.
    pub handshake: Acquire,
}

/// Outcome of one read cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReport {
    /// Raw bytes read from the tag.
    pub data: Vec<u8>,
    /// Bytes moved and time taken.
    pub stats: CycleStats,
    /// How the status-row handshake ended.
    pub handshake: Acquire,
    /// Temperature line, when the content carried one.
    pub temperature: Option<TemperatureReport>,
}

/// One demo operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoRequest {
    /// Write a text record.
    WriteText(String),
    /// Run one read cycle.
    ReadOnce,
}

/// Result of a `DemoRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoReport {
    /// Answer to `WriteText`.
    Write(WriteReport),
    /// Answer to `ReadOnce`.
    Read(ReadReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature_content() -> Vec<u8> {
        let mut content = vec![0x03, 0x50, 0xD1, 0x01, 0x4C, 0x54, 0x02];
        content.extend_from_slice(b"en");
        content.extend_from_slice(b"TEMP0  235");
        content.extend_from_slice(b"TEMP1  231");
        content.extend_from_slice(b"TEMP2  228");
        content.extend_from_slice(b"TEMP3   -0");
        content.extend_from_slice(b"TEMP4  300");
        content.extend_from_slice(b"TEMP5 1005");
        content
    }

    #[test]
    fn parses_current_and_history() {
        let mut content = temperature_content();
        // the minus sign is not a digit
        let minus = content.iter().position(|b| *b == b'-').unwrap();
        content[minus] = b' ';
        let report = TemperatureReport::parse(&content).unwrap();
        assert_eq!(report.current, 235);
        assert_eq!(report.history, [231, 228, 0, 300, 1005]);
        assert_eq!(report.current_celsius(), 23.5);
    }

    #[test]
    fn garbage_field_is_rejected() {
        assert!(TemperatureReport::parse(&temperature_content()).is_none());
    }

    #[test]
    fn missing_markers() {
        assert!(TemperatureReport::parse(b"TEMP0  235").is_none());
        assert!(TemperatureReport::parse(b"en no temperatures here").is_none());
        assert!(TemperatureReport::parse(&[]).is_none());
    }

    #[test]
    fn truncated_record() {
        let content = temperature_content();
        assert!(TemperatureReport::parse(&content[..40]).is_none());
    }

    #[test]
    fn record_past_window_is_ignored() {
        let mut content = vec![0u8; 120];
        content.extend_from_slice(b"enTEMP0  235");
        assert!(TemperatureReport::parse(&content).is_none());
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(TemperatureReport::deci_fahrenheit(235), 743);
        assert_eq!(TemperatureReport::fahrenheit(0), 32.0);
    }

    #[test]
    fn display_lists_history() {
        let report = TemperatureReport {
            current: 235,
            history: [231, 228, 220, 300, 105],
        };
        let text = report.to_string();
        assert!(text.starts_with("23.5 C / 74.3 F"));
        assert!(text.contains("\n05: 10.5 C / 50.9 F"));
    }
}
