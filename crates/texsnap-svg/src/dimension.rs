//! Length values with arbitrary unit suffixes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Leading decimal number followed by the unit; the exponent requires digits
/// so that a unit such as `ex` is never read as one.
static DIMENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)(.*?)\s*$")
        .expect("invalid dimension regex")
});

/// A numeric magnitude and its unit suffix, e.g. `9.155ex` or `120px`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    /// Numeric magnitude.
    pub magnitude: f64,
    /// Unit suffix as written (may be empty).
    pub unit: String,
}

impl Dimension {
    /// Parse an attribute value. Returns `None` if it does not start with a number.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = DIMENSION_RE.captures(value)?;
        let magnitude = caps[1].parse().ok()?;
        Some(Self {
            magnitude,
            unit: caps[2].to_owned(),
        })
    }

    /// Multiply the magnitude, keeping this dimension's own unit.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            unit: self.unit.clone(),
        }
    }
}

impl fmt::Display for Dimension {
    /// Shortest round-trip magnitude followed by the unit (`18.31ex`, `2px`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}
