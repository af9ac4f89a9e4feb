//! Render pipeline for texsnap.
//!
//! Mathematical typesetting is delegated to an external engine behind the
//! [`Typesetter`] trait. This crate adapts the engine's output into a displayed
//! result:
//! - [`render`]: markup -> engine -> parsed fragment -> notation-error scan
//! - [`CommandTypesetter`]: runs an external converter such as `tex2svg`
//! - `MathJaxTypesetter` (feature `mathjax`): in-process MathJax
//! - [`DisplaySurface`]: the single displayed result plus its on-screen style
//!
//! # Example
//!
//! ```ignore
//! use texsnap_render::{CommandTypesetter, RenderOutcome, RenderRequest, render};
//!
//! let engine = CommandTypesetter::new("tex2svg");
//! let outcome = render(&engine, &RenderRequest::new("x^2+y^2=z^2")).await?;
//! assert!(matches!(outcome, RenderOutcome::Graphic(_)));
//! ```

mod adapter;
mod command;
mod display;
mod error;
#[cfg(feature = "mathjax")]
mod mathjax;
mod typesetter;

pub use adapter::{RenderOutcome, RenderRequest, find_notation_error, render};
pub use command::CommandTypesetter;
pub use display::{DisplayBackground, DisplayContent, DisplayStyle, DisplaySurface, VectorResult};
pub use error::RenderError;
#[cfg(feature = "mathjax")]
pub use mathjax::MathJaxTypesetter;
pub use typesetter::{ConvertOptions, Typesetter};
