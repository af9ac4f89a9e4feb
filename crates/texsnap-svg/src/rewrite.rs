//! Export-time rewrites: namespaces, dimension rescale and paint recolor.
//!
//! The displayed document is never modified. [`rewrite`] clones it first and
//! applies every rewrite to the copy.

use crate::color::Rgb;
use crate::dimension::Dimension;
use crate::error::SvgError;
use crate::tree::SvgNode;

/// Graphical group element whose paint attributes are recolored.
const GROUP_TAG: &str = "g";

/// Paint attributes overwritten with the export text color.
const PAINT_ATTRS: [&str; 2] = ["fill", "stroke"];

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Clone `doc`, declare its namespaces, rescale it by `factor` and recolor its groups.
///
/// `factor` is the export scale as a multiplier (`scale / 100`).
///
/// # Errors
///
/// Returns [`SvgError::InvalidDimension`] if `width` or `height` is present
/// but does not start with a number.
pub fn rewrite(doc: &SvgNode, factor: f64, color: Rgb) -> Result<SvgNode, SvgError> {
    let mut out = doc.clone();
    ensure_namespaces(&mut out);
    rescale(&mut out, factor)?;
    recolor(&mut out, color);
    Ok(out)
}

/// Declare the SVG namespace on an `svg` root that lacks one.
///
/// An inline graphic inherits its namespace from the host page; a standalone
/// file must declare it. `xmlns:xlink` is added too when any `xlink:`
/// attribute is in use.
pub fn ensure_namespaces(root: &mut SvgNode) {
    if root.tag != "svg" {
        return;
    }
    if root.attr("xmlns").is_none() {
        root.attrs.insert(0, ("xmlns".to_owned(), SVG_NAMESPACE.to_owned()));
    }
    let uses_xlink = root
        .descendants()
        .any(|node| node.attrs.iter().any(|(key, _)| key.starts_with("xlink:")));
    if uses_xlink && root.attr("xmlns:xlink").is_none() {
        root.attrs.push(("xmlns:xlink".to_owned(), XLINK_NAMESPACE.to_owned()));
    }
}

/// Multiply the root's `width` and `height` magnitudes by `factor`.
///
/// Each attribute keeps its own unit suffix. Missing attributes are left alone.
pub fn rescale(root: &mut SvgNode, factor: f64) -> Result<(), SvgError> {
    for attribute in ["width", "height"] {
        let Some(value) = root.attr(attribute) else {
            continue;
        };
        let dimension = Dimension::parse(value).ok_or_else(|| SvgError::InvalidDimension {
            attribute: attribute.to_owned(),
            value: value.to_owned(),
        })?;
        let scaled = dimension.scaled(factor).to_string();
        tracing::debug!(attribute, from = %value, to = %scaled, "Rescaled dimension");
        root.set_attr(attribute, scaled);
    }
    Ok(())
}

/// Overwrite every non-empty `fill`/`stroke` on `g` elements with `color`.
pub fn recolor(root: &mut SvgNode, color: Rgb) {
    let color = color.to_string();
    let mut rewritten = 0usize;
    root.visit_mut(&mut |node| {
        if node.tag != GROUP_TAG {
            return;
        }
        for (key, value) in &mut node.attrs {
            if PAINT_ATTRS.contains(&key.as_str()) && !value.is_empty() {
                value.clone_from(&color);
                rewritten += 1;
            }
        }
    });
    tracing::debug!(color = %color, rewritten, "Recolored groups");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::parse;

    const FIXTURE: &str = include_str!("../tests/fixtures/pythagoras.svg");

    #[test]
    fn test_rescale_doubles_with_units() {
        let doc = parse(FIXTURE).unwrap();
        let out = rewrite(&doc, 2.0, Rgb::BLACK).unwrap();

        let before = Dimension::parse(doc.attr("width").unwrap()).unwrap();
        let after = Dimension::parse(out.attr("width").unwrap()).unwrap();
        assert_eq!(after.magnitude, before.magnitude * 2.0);
        assert_eq!(after.unit, "ex");
        assert_eq!(out.attr("width"), Some("29.904ex"));
        assert_eq!(out.attr("height"), Some("4.144ex"));
    }

    #[test]
    fn test_rescale_uses_each_dimensions_own_unit() {
        let mut doc = SvgNode::new("svg")
            .with_attr("width", "100px")
            .with_attr("height", "2.5ex");
        rescale(&mut doc, 1.5).unwrap();
        assert_eq!(doc.attr("width"), Some("150px"));
        assert_eq!(doc.attr("height"), Some("3.75ex"));
    }

    #[test]
    fn test_rescale_without_dimensions() {
        let mut doc = SvgNode::new("svg").with_attr("viewBox", "0 0 10 10");
        rescale(&mut doc, 3.0).unwrap();
        assert_eq!(doc.attrs.len(), 1);
    }

    #[test]
    fn test_rescale_rejects_non_numeric() {
        let mut doc = SvgNode::new("svg").with_attr("width", "auto");
        let err = rescale(&mut doc, 2.0).unwrap_err();
        assert!(matches!(err, SvgError::InvalidDimension { .. }));
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_recolor_only_groups_with_paint() {
        let mut doc = parse(
            r#"<svg fill="blue"><g fill="currentColor" stroke="currentColor"><g data-mml-node="mi"><path fill="green"/></g></g><g stroke=""/></svg>"#,
        )
        .unwrap();
        recolor(&mut doc, "#ff0000".parse().unwrap());
        assert_eq!(
            crate::serialize(&doc),
            r##"<svg fill="blue"><g fill="#ff0000" stroke="#ff0000"><g data-mml-node="mi"><path fill="green" /></g></g><g stroke="" /></svg>"##
        );
    }

    #[test]
    fn test_recolor_every_painted_group() {
        let doc = parse(FIXTURE).unwrap();
        let red: Rgb = "#ff0000".parse().unwrap();
        let out = rewrite(&doc, 1.0, red).unwrap();
        for node in out.descendants().filter(|n| n.tag == "g") {
            for attr in PAINT_ATTRS {
                if let Some(value) = node.attr(attr) {
                    assert_eq!(value, "#ff0000");
                }
            }
        }
    }

    #[test]
    fn test_missing_namespaces_are_declared() {
        let doc = parse(r##"<svg width="2ex" height="1ex"><use xlink:href="#a"/></svg>"##).unwrap();
        let out = rewrite(&doc, 1.0, Rgb::BLACK).unwrap();
        assert_eq!(
            crate::serialize(&out),
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="2ex" height="1ex" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a" /></svg>"##
        );
    }

    #[test]
    fn test_existing_namespaces_are_kept() {
        let doc = parse(FIXTURE).unwrap();
        let mut out = doc.clone();
        ensure_namespaces(&mut out);
        assert_eq!(out.attrs, doc.attrs);
    }

    #[test]
    fn test_rewrite_leaves_original_untouched() {
        let doc = parse(FIXTURE).unwrap();
        let snapshot = doc.clone();
        let _ = rewrite(&doc, 5.0, Rgb::WHITE).unwrap();
        assert_eq!(doc, snapshot);
    }
}
