//! Markup input buffer and insertion snippets.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// One of the insertion buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Snippet {
    /// `{}^{}`
    Power,
    /// `\frac{}{}`
    Fraction,
    /// `\frac{\partial{}}{\partial{}}`
    PartialDerivative,
    /// `\int `
    Integral,
    /// `\int\limits_{}^{}`
    DefiniteIntegral,
    /// `\sum\limits_{}^{}`
    Sum,
    /// `\prod\limits_{}^{}`
    Product,
    /// `\lim\limits_{}`
    Limit,
}

impl Snippet {
    /// Every snippet, in button order.
    pub const ALL: [Self; 8] = [
        Self::Power,
        Self::Fraction,
        Self::PartialDerivative,
        Self::Integral,
        Self::DefiniteIntegral,
        Self::Sum,
        Self::Product,
        Self::Limit,
    ];

    /// Markup inserted in place of the selection.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Power => "{}^{}",
            Self::Fraction => r"\frac{}{}",
            Self::PartialDerivative => r"\frac{\partial{}}{\partial{}}",
            Self::Integral => r"\int ",
            Self::DefiniteIntegral => r"\int\limits_{}^{}",
            Self::Sum => r"\sum\limits_{}^{}",
            Self::Product => r"\prod\limits_{}^{}",
            Self::Limit => r"\lim\limits_{}",
        }
    }

    /// Cursor offset from the selection start after insertion, in characters.
    #[must_use]
    pub fn cursor_shift(self) -> usize {
        match self {
            Self::Power => 1,
            Self::Integral => 5,
            Self::Fraction => 6,
            Self::DefiniteIntegral | Self::Sum | Self::Limit => 13,
            Self::Product => 14,
            Self::PartialDerivative => 15,
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Fraction => "frac",
            Self::PartialDerivative => "partial",
            Self::Integral => "int",
            Self::DefiniteIntegral => "defint",
            Self::Sum => "sum",
            Self::Product => "prod",
            Self::Limit => "lim",
        }
    }
}

impl FromStr for Snippet {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|snippet| snippet.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::UnknownSnippet(s.to_owned()))
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Markup text with a selection measured in characters.
///
/// `start <= end <= char count` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    start: usize,
    end: usize,
}

impl InputBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selection as `(start, end)` character offsets.
    #[must_use]
    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Replace the markup and place the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let len = self.char_len();
        self.start = len;
        self.end = len;
    }

    /// Clear the markup.
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// Select the characters between `start` and `end`, clamped to the text.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.start = start.min(len);
        self.end = end.min(len);
    }

    /// Replace the selection with `snippet` and move the cursor inside it.
    pub fn insert(&mut self, snippet: Snippet) {
        let from = self.byte_offset(self.start);
        let to = self.byte_offset(self.end);
        self.text.replace_range(from..to, snippet.text());

        let cursor = self.start + snippet.cursor_shift();
        self.start = cursor;
        self.end = cursor;
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cursor_shift_lands_inside_first_group() {
        for snippet in Snippet::ALL {
            let prefix: String = snippet.text().chars().take(snippet.cursor_shift()).collect();
            assert!(
                prefix.ends_with('{') || prefix.ends_with(' '),
                "{snippet}: {prefix}"
            );
        }
    }

    #[test]
    fn test_insert_at_end() {
        let mut input = InputBuffer::new();
        input.set_text("x");
        input.insert(Snippet::Power);
        assert_eq!(input.text(), "x{}^{}");
        assert_eq!(input.selection(), (2, 2));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut input = InputBuffer::new();
        input.set_text("a+b=c");
        input.select(0, 3);
        input.insert(Snippet::Fraction);
        assert_eq!(input.text(), r"\frac{}{}=c");
        assert_eq!(input.selection(), (6, 6));
    }

    #[test]
    fn test_insert_into_empty_buffer() {
        let mut input = InputBuffer::new();
        input.insert(Snippet::PartialDerivative);
        assert_eq!(input.text(), r"\frac{\partial{}}{\partial{}}");
        assert_eq!(input.selection(), (15, 15));
    }

    #[test]
    fn test_select_counts_characters() {
        let mut input = InputBuffer::new();
        input.set_text("αβγ");
        assert_eq!(input.selection(), (3, 3));
        input.select(1, 2);
        input.insert(Snippet::Integral);
        assert_eq!(input.text(), r"α\int γ");
        assert_eq!(input.selection(), (6, 6));
    }

    #[test]
    fn test_select_is_clamped_and_ordered() {
        let mut input = InputBuffer::new();
        input.set_text("abc");
        input.select(10, 1);
        assert_eq!(input.selection(), (1, 3));
    }

    #[test]
    fn test_snippet_from_name() {
        assert_eq!("defint".parse::<Snippet>().unwrap(), Snippet::DefiniteIntegral);
        assert_eq!("LIM".parse::<Snippet>().unwrap(), Snippet::Limit);
        assert!(matches!(
            "sqrt".parse::<Snippet>(),
            Err(AppError::UnknownSnippet(name)) if name == "sqrt"
        ));
    }
}
