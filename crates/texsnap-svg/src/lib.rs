//! Vector-graphic document handling for texsnap.
//!
//! This crate owns everything that touches the SVG produced by the typesetting
//! engine:
//! - [`SvgNode`]: an owned element tree with ordered attributes
//! - [`parse`] / [`serialize`]: XML reading via `quick-xml` and deterministic writing
//! - [`Dimension`] and [`Rgb`]: attribute value types used by the export rewrites
//! - [`rewrite`]: namespace declaration, dimension rescale and fill/stroke
//!   recolor on a cloned tree
//! - [`inject_background`]: optional canvas background style rule
//!
//! All rewrites are pure: they take the displayed tree by reference (or by value
//! for the last stage) and return a new tree, leaving the original untouched.
//!
//! # Example
//!
//! ```
//! use texsnap_svg::{Background, Rgb, inject_background, parse, rewrite, serialize};
//!
//! let doc = parse(r#"<svg width="10ex" height="2ex"><g fill="currentColor"/></svg>"#).unwrap();
//! let red: Rgb = "#ff0000".parse().unwrap();
//!
//! let out = rewrite(&doc, 2.0, red).unwrap();
//! let out = inject_background(out, Background::Transparent);
//!
//! assert_eq!(
//!     serialize(&out),
//!     r##"<svg xmlns="http://www.w3.org/2000/svg" width="20ex" height="4ex"><g fill="#ff0000" /></svg>"##
//! );
//! ```

mod background;
mod color;
mod dimension;
mod entities;
mod error;
mod parser;
mod rewrite;
mod serializer;
mod tree;

pub use background::{Background, inject_background};
pub use color::Rgb;
pub use dimension::Dimension;
pub use error::SvgError;
pub use parser::parse;
pub use rewrite::{ensure_namespaces, recolor, rescale, rewrite};
pub use serializer::serialize;
pub use tree::SvgNode;
