//! Export pipeline for texsnap.
//!
//! Turns the displayed [`VectorResult`](texsnap_render::VectorResult) into a
//! downloadable file:
//!
//! ```text
//! clone -> rescale -> recolor -> background -> serialize -> encode -> download
//! ```
//!
//! - [`ExportOptions`]: scale, text color and background read by each export
//! - [`BlobRegistry`]: temporary references to in-memory bytes
//! - [`export`]: the pipeline, SVG passthrough or PNG rasterization
//! - [`DownloadTarget`]: where downloads land ([`DirectoryTarget`], [`MemoryTarget`])

mod blob;
mod download;
mod encoder;
mod error;
mod options;
mod pipeline;

pub use blob::{Blob, BlobRegistry, ObjectUrl};
pub use download::{DirectoryTarget, Download, DownloadTarget, MemoryTarget, SavedDownload, trigger_download};
pub use encoder::rasterize;
pub use error::ExportError;
pub use options::{ExportOptions, OutputFormat, Scale};
pub use pipeline::{ExportReport, export, prepare_document};
