//! Export error types.

use std::path::PathBuf;

use texsnap_svg::SvgError;

/// Error during export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Scale outside the supported percentage range.
    #[error("scale must be a percentage from 50 to 500, got {0:?}")]
    InvalidScale(String),

    /// Unknown output format name.
    #[error("unknown output format {0:?} (expected svg or png)")]
    UnknownFormat(String),

    /// Rewriting the document failed.
    #[error("{0}")]
    Svg(#[from] SvgError),

    /// A temporary reference was used after release.
    #[error("no blob for {0}")]
    MissingBlob(String),

    /// The serialized SVG could not be decoded for rasterization.
    #[error("SVG decode failed: {0}")]
    Decode(#[from] resvg::usvg::Error),

    /// The decoded image has no drawable area.
    #[error("cannot rasterize a {width}x{height} image")]
    EmptyCanvas {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("PNG encode failed: {0}")]
    PngEncode(String),

    /// The rasterization task did not complete.
    #[error("rasterization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Writing a download failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
