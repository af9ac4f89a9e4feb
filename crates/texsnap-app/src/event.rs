//! User interface events.

use texsnap_export::{OutputFormat, Scale};
use texsnap_svg::Rgb;

use crate::input::Snippet;

/// An interaction handled by [`App::dispatch`](crate::App::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Replace the markup input.
    SetInput(String),
    /// Select a character range of the input.
    Select(usize, usize),
    /// Insert a snippet at the selection.
    Insert(Snippet),
    /// Render the current input.
    Render,
    /// Clear input and result.
    Reset,
    /// Copy the markup to the clipboard.
    Copy,
    /// Change the export scale.
    SetScale(Scale),
    /// Change the text color.
    SetTextColor(Rgb),
    /// Change the background color.
    SetBackgroundColor(Rgb),
    /// Toggle the transparent background.
    SetTransparent(bool),
    /// Swap text and background colors.
    SwapColors,
    /// Export the displayed result.
    Save(OutputFormat),
}
