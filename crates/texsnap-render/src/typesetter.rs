//! External typesetting engine contract.

use std::future::Future;

use crate::error::RenderError;

/// Options passed to [`Typesetter::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Block display mode (full-size operators) rather than inline.
    pub display: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { display: true }
    }
}

/// Converts a markup string into a vector-graphic fragment.
///
/// The fragment is XML text: a bare `<svg>` or a wrapper element containing
/// one. Notation errors are not failures; the engine marks them inline with a
/// `g` element whose `data-mml-node` is `merror`.
pub trait Typesetter {
    /// Convert `markup` to an SVG fragment.
    fn convert(
        &self,
        markup: &str,
        options: ConvertOptions,
    ) -> impl Future<Output = Result<String, RenderError>>;
}
