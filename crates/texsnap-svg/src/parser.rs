//! SVG parser built on `quick-xml`.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::convert_html_entities;
use crate::error::SvgError;
use crate::tree::SvgNode;

/// Parse an XML fragment into an [`SvgNode`] tree.
///
/// Returns the first root element. Named HTML entities such as `&nbsp;` are
/// accepted alongside the XML ones. Declarations, comments, processing
/// instructions and anything after the root element are ignored. Namespace
/// declarations are kept as ordinary attributes so the document round-trips.
///
/// # Errors
///
/// Returns an error if the input is not well-formed XML or has no root element.
pub fn parse(xml: &str) -> Result<SvgNode, SvgError> {
    let xml = convert_html_entities(xml);
    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut root = start_node(&reader, &e)?;
                parse_children(&mut reader, &mut root)?;
                return Ok(root);
            }
            Event::Empty(e) => return start_node(&reader, &e),
            Event::Eof => return Err(SvgError::EmptyDocument),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_children<R: BufRead>(reader: &mut Reader<R>, node: &mut SvgNode) -> Result<(), SvgError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut child = start_node(reader, &e)?;
                parse_children(reader, &mut child)?;
                node.children.push(child);
            }
            Event::Empty(e) => {
                let child = start_node(reader, &e)?;
                node.children.push(child);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(node, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(node, &text);
            }
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(SvgError::UnexpectedEof(node.tag.clone())),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn start_node<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Result<SvgNode, SvgError> {
    let tag = decode_name(reader, e.name().as_ref());

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.push((key, value));
    }

    Ok(SvgNode {
        tag,
        attrs,
        ..Default::default()
    })
}

fn decode_name<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut SvgNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
