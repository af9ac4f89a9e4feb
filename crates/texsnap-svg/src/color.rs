//! RGB color values as produced by HTML color inputs.

use std::fmt;
use std::str::FromStr;

use crate::error::SvgError;

/// 8-bit RGB color.
///
/// Parses `#rrggbb` and `#rgb` (case-insensitive). Displays as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black (`#000000`).
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (`#ffffff`).
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = SvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SvgError::InvalidColor(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 0x11,
                channel(&hex[1..2])? * 0x11,
                channel(&hex[2..3])? * 0x11,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
