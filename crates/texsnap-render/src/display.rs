//! Display surface holding the current result.

use texsnap_svg::{Rgb, SvgNode, serialize};

use crate::adapter::RenderOutcome;

/// The vector-graphic document for the current render.
///
/// Owned by the [`DisplaySurface`]; the export pipeline only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorResult {
    document: SvgNode,
}

impl VectorResult {
    /// Wrap a root `<svg>` element.
    #[must_use]
    pub fn new(document: SvgNode) -> Self {
        Self { document }
    }

    /// Root `<svg>` element.
    #[must_use]
    pub fn document(&self) -> &SvgNode {
        &self.document
    }
}

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayContent {
    /// Nothing rendered.
    #[default]
    Empty,
    /// A successfully rendered graphic.
    Graphic(VectorResult),
    /// A displayed error message.
    Error(String),
}

/// Background of the result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayBackground {
    /// Checkerboard indicating a transparent export background.
    #[default]
    Checkerboard,
    /// Solid color.
    Solid(Rgb),
}

/// On-screen style of the result area.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayStyle {
    /// Font size in rem (`scale / 100`).
    pub font_size_rem: f64,
    /// Text color.
    pub color: Rgb,
    /// Area background.
    pub background: DisplayBackground,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self {
            font_size_rem: 1.0,
            color: Rgb::BLACK,
            background: DisplayBackground::Checkerboard,
        }
    }
}

/// The single result area of the application.
#[derive(Debug, Clone, Default)]
pub struct DisplaySurface {
    content: DisplayContent,
    /// On-screen style, updated directly by option changes.
    pub style: DisplayStyle,
}

impl DisplaySurface {
    /// Create an empty surface with default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    #[must_use]
    pub fn content(&self) -> &DisplayContent {
        &self.content
    }

    /// Remove whatever is displayed.
    pub fn clear(&mut self) {
        self.content = DisplayContent::Empty;
    }

    /// Replace the content with a render outcome.
    ///
    /// Notation errors are shown as `Error: <message>`.
    pub fn show(&mut self, outcome: RenderOutcome) {
        self.content = match outcome {
            RenderOutcome::Empty => DisplayContent::Empty,
            RenderOutcome::Graphic(result) => DisplayContent::Graphic(result),
            RenderOutcome::NotationError(message) => {
                DisplayContent::Error(format!("Error: {message}"))
            }
        };
    }

    /// The displayed graphic, if the last render succeeded.
    #[must_use]
    pub fn graphic(&self) -> Option<&VectorResult> {
        match &self.content {
            DisplayContent::Graphic(result) => Some(result),
            _ => None,
        }
    }

    /// The displayed error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.content {
            DisplayContent::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Render the result area as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        let background = match self.style.background {
            DisplayBackground::Checkerboard => "background: var(--chessboard)".to_owned(),
            DisplayBackground::Solid(color) => format!("background-color: {color}"),
        };
        let style = format!(
            "--result-font-size: {}rem; color: {}; {background};",
            self.style.font_size_rem, self.style.color
        );

        let mut container = SvgNode::new("div")
            .with_attr("id", "latex-result")
            .with_attr("style", style);
        match &self.content {
            DisplayContent::Empty => {}
            DisplayContent::Graphic(result) => container.children.push(result.document().clone()),
            DisplayContent::Error(message) => container.children.push(
                SvgNode::new("p")
                    .with_attr("class", "error-message")
                    .with_attr("style", "background-color: inherit; color: inherit;")
                    .with_text(message.as_str()),
            ),
        }
        serialize(&container)
    }
}
