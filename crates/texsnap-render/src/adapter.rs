//! Render adapter: engine invocation and notation-error scan.

use texsnap_svg::{SvgNode, parse};

use crate::display::VectorResult;
use crate::error::RenderError;
use crate::typesetter::{ConvertOptions, Typesetter};

/// `data-mml-node` value marking a notation error.
const ERROR_MARKER: &str = "merror";

/// Markup captured when a render is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    markup: String,
}

impl RenderRequest {
    /// Capture `markup` for rendering.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// The captured markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// Result of a render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Empty markup: nothing was rendered and the engine was not called.
    Empty,
    /// Engine produced a graphic without notation errors.
    Graphic(VectorResult),
    /// Engine reported a notation error with this message.
    NotationError(String),
}

/// Render `request` with `engine` in display mode.
///
/// The first `g` marked as a notation error short-circuits the pipeline and
/// its message is returned instead of the graphic.
///
/// # Errors
///
/// Returns an error if the engine fails or its output is not an SVG fragment.
pub async fn render<T: Typesetter>(
    engine: &T,
    request: &RenderRequest,
) -> Result<RenderOutcome, RenderError> {
    if request.markup().is_empty() {
        return Ok(RenderOutcome::Empty);
    }

    let fragment = engine
        .convert(request.markup(), ConvertOptions { display: true })
        .await?;
    let tree = parse(&fragment)?;

    if let Some(message) = find_notation_error(&tree) {
        tracing::warn!(message = %message, "Notation error in markup");
        return Ok(RenderOutcome::NotationError(message));
    }

    let svg = tree.find("svg").ok_or(RenderError::InvalidFragment)?;
    tracing::debug!(
        width = svg.attr("width").unwrap_or_default(),
        height = svg.attr("height").unwrap_or_default(),
        "Rendered graphic"
    );
    Ok(RenderOutcome::Graphic(VectorResult::new(svg.clone())))
}

/// Message of the first notation-error group in `tree`, if any.
///
/// The message is the text of the marker's first `text` element, falling back
/// to its `data-mjx-error` and `title` attributes.
#[must_use]
pub fn find_notation_error(tree: &SvgNode) -> Option<String> {
    let marker = tree
        .descendants()
        .find(|node| node.tag == "g" && node.attr("data-mml-node") == Some(ERROR_MARKER))?;

    let message = marker
        .find("text")
        .map(SvgNode::text_content)
        .or_else(|| marker.attr("data-mjx-error").map(str::to_owned))
        .or_else(|| marker.attr("title").map(str::to_owned))
        .unwrap_or_default();
    Some(message)
}
