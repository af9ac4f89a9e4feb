//! Export options.

use std::fmt;
use std::str::FromStr;

use texsnap_svg::{Background, Rgb};

use crate::error::ExportError;

/// Export scale as an integer percentage between [`Scale::MIN`] and [`Scale::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale(u32);

impl Scale {
    /// Steps offered by the scale selector.
    pub const STEPS: [u32; 9] = [50, 75, 100, 125, 150, 200, 250, 300, 500];

    /// Unscaled (100%).
    pub const DEFAULT: Self = Self(100);

    /// Smallest accepted percentage.
    pub const MIN: u32 = Self::STEPS[0];

    /// Largest accepted percentage.
    pub const MAX: u32 = Self::STEPS[Self::STEPS.len() - 1];

    /// Create a scale from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidScale`] outside `MIN..=MAX`.
    pub fn from_percent(percent: u32) -> Result<Self, ExportError> {
        if !(Self::MIN..=Self::MAX).contains(&percent) {
            return Err(ExportError::InvalidScale(percent.to_string()));
        }
        Ok(Self(percent))
    }

    /// Percentage value.
    #[must_use]
    pub fn percent(self) -> u32 {
        self.0
    }

    /// Multiplier applied to dimensions (`percent / 100`).
    #[must_use]
    pub fn factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Scale {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let percent = s
            .strip_suffix('%')
            .unwrap_or(s)
            .parse()
            .map_err(|_| ExportError::InvalidScale(s.to_owned()))?;
        Self::from_percent(percent)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Options read by every export.
///
/// Always fully populated; [`Default`] gives the initial UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Dimension scale.
    pub scale: Scale,
    /// Color written to every painted group.
    pub text_color: Rgb,
    /// Background color used when not transparent.
    pub background_color: Rgb,
    /// Export without a background.
    pub transparent: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: Scale::DEFAULT,
            text_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
            transparent: true,
        }
    }
}

impl ExportOptions {
    /// Effective background mode.
    #[must_use]
    pub fn background(&self) -> Background {
        if self.transparent {
            Background::Transparent
        } else {
            Background::Solid(self.background_color)
        }
    }
}

/// Downloadable file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Vector markup (`output.svg`).
    Svg,
    /// Compressed raster (`output.png`).
    Png,
}

impl OutputFormat {
    /// Fixed download filename.
    #[must_use]
    pub fn filename(self) -> &'static str {
        match self {
            Self::Svg => "output.svg",
            Self::Png => "output.png",
        }
    }

    /// Media type of the serialized SVG blob for this target.
    ///
    /// The raster decoder requires an explicit charset.
    #[must_use]
    pub fn svg_media_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/svg+xml;charset=utf-8",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(ExportError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Svg => "svg",
            Self::Png => "png",
        })
    }
}
