//! Application error types.

use texsnap_export::ExportError;
use texsnap_render::RenderError;

/// Error raised while handling a [`UiEvent`](crate::UiEvent).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Clipboard write failed.
    #[error("Clipboard write failed: {0}")]
    Clipboard(#[source] std::io::Error),

    /// Unknown insertion snippet name.
    #[error("Unknown snippet: {0}")]
    UnknownSnippet(String),
}
