//! Deterministic SVG serializer.

use crate::tree::SvgNode;

/// Serialize a tree to an XML string.
///
/// Attributes are written in stored order and elements without content are
/// self-closed, so the same tree always produces the same bytes. The root's
/// tail is not written.
#[must_use]
pub fn serialize(root: &SvgNode) -> String {
    let mut out = String::with_capacity(4096);
    serialize_node(root, &mut out);
    out
}

fn serialize_node(node: &SvgNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if node.children.is_empty() && node.text.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    out.push_str(&escape_text(&node.text));
    for child in &node.children {
        serialize_node(child, out);
        out.push_str(&escape_text(&child.tail));
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
