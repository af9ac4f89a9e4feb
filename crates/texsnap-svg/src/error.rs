//! Error types for SVG parsing and rewriting.

use std::str::Utf8Error;

/// Error while reading or rewriting a vector-graphic document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SvgError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error")]
    Utf8(#[from] Utf8Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input contained no root element.
    #[error("document has no root element")]
    EmptyDocument,

    /// Input ended before an element was closed.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// A width/height attribute did not start with a number.
    #[error("invalid {attribute} dimension: {value:?}")]
    InvalidDimension {
        /// Attribute name (`width` or `height`).
        attribute: String,
        /// Raw attribute value.
        value: String,
    },

    /// A color value was not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}
