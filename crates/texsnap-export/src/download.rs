//! Download trigger and targets.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::blob::{BlobRegistry, ObjectUrl};
use crate::error::ExportError;

/// A file handed to a [`DownloadTarget`].
#[derive(Debug)]
pub struct Download<'a> {
    /// Fixed filename for the format.
    pub filename: &'a str,
    /// Media type of the contents.
    pub media_type: &'a str,
    /// Contents.
    pub bytes: &'a [u8],
}

/// Destination for triggered downloads.
pub trait DownloadTarget {
    /// Save one download.
    fn save(&self, download: &Download<'_>) -> Result<(), ExportError>;
}

/// Activate a download of the blob behind `url` under `filename`.
///
/// # Errors
///
/// Returns an error if `url` was already revoked or the target fails.
pub fn trigger_download<D: DownloadTarget + ?Sized>(
    registry: &BlobRegistry,
    url: &ObjectUrl,
    filename: &str,
    target: &D,
) -> Result<(), ExportError> {
    let blob = registry
        .get(url)
        .ok_or_else(|| ExportError::MissingBlob(url.to_string()))?;
    target.save(&Download {
        filename,
        media_type: &blob.media_type,
        bytes: &blob.bytes,
    })?;
    tracing::info!(filename, size = blob.bytes.len(), "Download saved");
    Ok(())
}

/// Writes downloads into a directory, creating it if missing.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    /// Target writing into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadTarget for DirectoryTarget {
    fn save(&self, download: &Download<'_>) -> Result<(), ExportError> {
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ExportError::Write { path, source }
        };
        std::fs::create_dir_all(&self.dir).map_err(write_err(&self.dir))?;
        let path = self.dir.join(download.filename);
        std::fs::write(&path, download.bytes).map_err(write_err(&path))?;
        Ok(())
    }
}

/// A download captured by [`MemoryTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDownload {
    /// Filename.
    pub filename: String,
    /// Media type.
    pub media_type: String,
    /// Contents.
    pub bytes: Vec<u8>,
}

/// Collects downloads in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    downloads: RwLock<Vec<SavedDownload>>,
}

impl MemoryTarget {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Downloads saved so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn downloads(&self) -> Vec<SavedDownload> {
        self.downloads.read().unwrap().clone()
    }
}

impl DownloadTarget for MemoryTarget {
    fn save(&self, download: &Download<'_>) -> Result<(), ExportError> {
        self.downloads.write().unwrap().push(SavedDownload {
            filename: download.filename.to_owned(),
            media_type: download.media_type.to_owned(),
            bytes: download.bytes.to_vec(),
        });
        Ok(())
    }
}
