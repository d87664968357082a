use crate::error::TopologyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A route color as it appeared in the topology, with its parsed sRGB channels.
///
/// The original text is kept verbatim because it doubles as the rendered
/// feature's `id` and `stroke`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    hex: String,
    rgb: [u8; 3],
}

impl Color {
    /// Parses `#RRGGBB` or `RRGGBB`.
    ///
    /// # Errors
    /// Returns `TopologyError::InvalidColor` for anything that is not six hex digits.
    pub fn parse(text: &str) -> Result<Self, TopologyError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TopologyError::InvalidColor(text.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| TopologyError::InvalidColor(text.to_string()))
        };
        Ok(Self {
            hex: text.to_string(),
            rgb: [channel(0..2)?, channel(2..4)?, channel(4..6)?],
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        let with_hash = Color::parse("#FF8000").expect("valid color");
        let without_hash = Color::parse("ff8000").expect("valid color");

        assert_eq!(with_hash.rgb(), [255, 128, 0]);
        assert_eq!(without_hash.rgb(), [255, 128, 0]);
        assert_eq!(with_hash.as_str(), "#FF8000");
        assert_eq!(without_hash.as_str(), "ff8000");
    }

    #[test]
    fn test_parse_rejects_bad_colors() {
        assert!(Color::parse("#FFF").is_err());
        assert!(Color::parse("#GG0000").is_err());
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#FF00001").is_err());
    }

    #[test]
    fn test_color_serializes_as_original_text() {
        let color = Color::parse("#00aa00").expect("valid color");
        let json = serde_json::to_string(&color).expect("serialize");
        assert_eq!(json, "\"#00aa00\"");

        let back: Color = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, color);
    }
}
