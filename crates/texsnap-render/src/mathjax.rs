//! In-process MathJax typesetting via the `mathjax_svg` crate.

use crate::error::RenderError;
use crate::typesetter::{ConvertOptions, Typesetter};

/// Typesetter backed by an embedded MathJax runtime.
///
/// The embedded converter always typesets in display mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathJaxTypesetter;

impl Typesetter for MathJaxTypesetter {
    async fn convert(&self, markup: &str, options: ConvertOptions) -> Result<String, RenderError> {
        if !options.display {
            tracing::debug!("Inline mode requested; embedded MathJax renders display mode");
        }
        mathjax_svg::convert_to_svg(markup).map_err(|e| RenderError::Engine(format!("{e:?}")))
    }
}
