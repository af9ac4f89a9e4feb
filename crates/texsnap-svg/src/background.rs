//! Canvas background injection.

use crate::color::Rgb;
use crate::tree::SvgNode;

/// Background mode of an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// No background; the exported canvas stays transparent.
    #[default]
    Transparent,
    /// Paint the whole canvas with this color.
    Solid(Rgb),
}

impl Background {
    /// Solid fill color, if any.
    #[must_use]
    pub fn color(self) -> Option<Rgb> {
        match self {
            Self::Transparent => None,
            Self::Solid(color) => Some(color),
        }
    }
}

/// Prepend a `<style>` rule painting the canvas when `background` is solid.
///
/// Transparent backgrounds return the document unchanged.
#[must_use]
pub fn inject_background(mut doc: SvgNode, background: Background) -> SvgNode {
    if let Background::Solid(color) = background {
        let style = SvgNode::new("style").with_text(format!("svg {{ background-color: {color}; }}"));
        doc.prepend_child(style);
        tracing::debug!(color = %color, "Injected background style");
    }
    doc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{parse, serialize};

    #[test]
    fn test_transparent_is_noop() {
        let doc = parse(r#"<svg width="1ex"><g/></svg>"#).unwrap();
        let out = inject_background(doc.clone(), Background::Transparent);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_solid_prepends_style() {
        let doc = parse(r#"<svg width="1ex"><defs/><g/></svg>"#).unwrap();
        let out = inject_background(doc, Background::Solid(Rgb::new(0, 0xff, 0)));
        assert_eq!(
            serialize(&out),
            r#"<svg width="1ex"><style>svg { background-color: #00ff00; }</style><defs /><g /></svg>"#
        );
    }

    #[test]
    fn test_background_color() {
        assert_eq!(Background::Transparent.color(), None);
        assert_eq!(Background::Solid(Rgb::WHITE).color(), Some(Rgb::WHITE));
    }
}
