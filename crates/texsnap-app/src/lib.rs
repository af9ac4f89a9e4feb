//! Application core for texsnap.
//!
//! Holds the explicit application state (markup input, export options and
//! the result area) and applies [`UiEvent`]s to it. External collaborators
//! are injected: a [`Typesetter`](texsnap_render::Typesetter), a
//! [`Clipboard`] and a [`DownloadTarget`](texsnap_export::DownloadTarget).

mod app;
mod clipboard;
mod error;
mod event;
mod input;

pub use app::{App, AppState, Dispatched};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use error::AppError;
pub use event::UiEvent;
pub use input::{InputBuffer, Snippet};
