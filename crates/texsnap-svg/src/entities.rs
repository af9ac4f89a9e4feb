//! Named HTML entities in engine output.
//!
//! Converters built on HTML tooling may emit entities such as `&nbsp;` that
//! XML does not define. They are replaced with their characters before parsing.
//! The five XML entities are left for the parser.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

/// Replace known named HTML entities in `xml` with their characters.
pub(crate) fn convert_html_entities(xml: &str) -> std::borrow::Cow<'_, str> {
    ENTITY_RE.replace_all(xml, |caps: &regex::Captures| {
        entity_to_char(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
    })
}

fn entity_to_char(name: &str) -> Option<&'static str> {
    Some(match name {
        // Spacing
        "nbsp" => "\u{00a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "ZeroWidthSpace" => "\u{200b}",

        // Punctuation
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",
        "prime" => "\u{2032}",
        "Prime" => "\u{2033}",

        // Operators and relations
        "minus" => "\u{2212}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "sdot" => "\u{22c5}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "asymp" => "\u{2248}",
        "equiv" => "\u{2261}",
        "infin" => "\u{221e}",
        "part" => "\u{2202}",
        "nabla" => "\u{2207}",
        "sum" => "\u{2211}",
        "prod" => "\u{220f}",
        "int" => "\u{222b}",
        "radic" => "\u{221a}",
        "isin" => "\u{2208}",
        "deg" => "\u{00b0}",

        // Arrows
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "harr" => "\u{2194}",
        "rArr" => "\u{21d2}",
        "hArr" => "\u{21d4}",

        // Greek
        "alpha" => "\u{03b1}",
        "beta" => "\u{03b2}",
        "gamma" => "\u{03b3}",
        "delta" => "\u{03b4}",
        "epsilon" => "\u{03b5}",
        "theta" => "\u{03b8}",
        "lambda" => "\u{03bb}",
        "mu" => "\u{03bc}",
        "pi" => "\u{03c0}",
        "sigma" => "\u{03c3}",
        "phi" => "\u{03c6}",
        "omega" => "\u{03c9}",
        "Delta" => "\u{0394}",
        "Sigma" => "\u{03a3}",
        "Omega" => "\u{03a9}",

        _ => return None,
    })
}
