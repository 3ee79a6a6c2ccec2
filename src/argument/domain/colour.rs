//! RGBA colours parsed from hexadecimal literals.

use serde::{Deserialize, Serialize};

/// A colour with four 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Colour {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Colour {
    /// Unpacks a big-endian `0xRRGGBBAA` value.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each channel is masked to eight bits before the cast"
    )]
    pub const fn from_rgba(value: u32) -> Self {
        Self {
            r: ((value >> 24) & 0xFF) as u8,
            g: ((value >> 16) & 0xFF) as u8,
            b: ((value >> 8) & 0xFF) as u8,
            a: (value & 0xFF) as u8,
        }
    }

    /// Packs the channels back into a `0xRRGGBBAA` value.
    #[must_use]
    pub fn to_rgba(self) -> u32 {
        (u32::from(self.r) << 24)
            | (u32::from(self.g) << 16)
            | (u32::from(self.b) << 8)
            | u32::from(self.a)
    }

    /// Parses a literal with a leading `#`, a leading `0x`, or no prefix.
    ///
    /// Returns `None` when the remaining digits are not a 32-bit hexadecimal
    /// number.
    #[must_use]
    pub fn parse(literal: &str) -> Option<Self> {
        let trimmed = literal.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || digits.starts_with('+') {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_rgba)
    }
}
