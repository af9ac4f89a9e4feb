//! Clipboard seam.

/// Destination for copied markup.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be written.
    fn write_text(&mut self, text: &str) -> std::io::Result<()>;
}

/// Clipboard keeping the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}
