//! Owned element tree for vector-graphic documents.

/// Element in a parsed SVG document.
///
/// Text follows the element/tail model: `text` is the content before the first
/// child, `tail` is the content after this element's closing tag and before the
/// next sibling. Attribute order is preserved so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgNode {
    /// Element tag name, including any namespace prefix.
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Direct text content.
    pub text: String,
    /// Text after element.
    pub tail: String,
    /// Child elements.
    pub children: Vec<SvgNode>,
}

impl SvgNode {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SvgNode>) -> Self {
        self.children = children;
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Insert a child before all existing children.
    ///
    /// The node's leading text moves to the new child's tail so that document
    /// text order is unchanged.
    pub fn prepend_child(&mut self, mut child: SvgNode) {
        child.tail = std::mem::take(&mut self.text);
        self.children.insert(0, child);
    }

    /// Iterate over this node and all descendants in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Visit this node and all descendants mutably in document order.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut SvgNode)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// First node (self included) with the given tag, in document order.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&SvgNode> {
        self.descendants().find(|node| node.tag == tag)
    }

    /// Concatenated text of this node and its descendants, excluding its own tail.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
            out.push_str(&child.tail);
        }
        out
    }
}

/// Pre-order iterator returned by [`SvgNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SvgNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SvgNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SvgNode {
        SvgNode::new("svg").with_children(vec![
            SvgNode::new("g").with_attr("id", "a").with_children(vec![
                SvgNode::new("text").with_text("x"),
            ]),
            SvgNode::new("g").with_attr("id", "b"),
        ])
    }

    #[test]
    fn test_descendants_document_order() {
        let tree = sample();
        let tags: Vec<_> = tree
            .descendants()
            .map(|n| n.attr("id").unwrap_or(&n.tag).to_owned())
            .collect();
        assert_eq!(tags, vec!["svg", "a", "text", "b"]);
    }

    #[test]
    fn test_set_attr_keeps_position() {
        let mut node = SvgNode::new("g")
            .with_attr("fill", "red")
            .with_attr("stroke", "blue");
        node.set_attr("fill", "green");
        assert_eq!(
            node.attrs,
            vec![
                ("fill".to_owned(), "green".to_owned()),
                ("stroke".to_owned(), "blue".to_owned())
            ]
        );
    }

    #[test]
    fn test_prepend_child_moves_leading_text() {
        let mut node = SvgNode::new("svg").with_text("\n  ");
        node.prepend_child(SvgNode::new("style"));
        assert!(node.text.is_empty());
        assert_eq!(node.children[0].tag, "style");
        assert_eq!(node.children[0].tail, "\n  ");
    }

    #[test]
    fn test_find_returns_first_match() {
        let tree = sample();
        let g = tree.find("g").unwrap();
        assert_eq!(g.attr("id"), Some("a"));
        assert!(tree.find("rect").is_none());
    }

    #[test]
    fn test_text_content() {
        let mut tree = sample();
        tree.children[0].children[0].tail = " tail".to_owned();
        assert_eq!(tree.text_content(), "x tail");
    }
}
