use regex::Regex;
use std::sync::OnceLock;
use tree_sitter::Node;

use crate::error::{Error, Result};

pub fn node_text<'s>(node: &Node, source: &'s str) -> Result<&'s str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in {}: {e}", node.kind())))
}

/// Strips the quotes off a string or raw string literal.
///
/// Escape sequences are kept as written; `#[path]` values rarely contain any.
pub fn unquote_literal(literal: &str) -> Option<String> {
    static LITERAL: OnceLock<Regex> = OnceLock::new();
    let re = LITERAL.get_or_init(|| {
        Regex::new(r#"^(?:r(?P<hashes>#*))?"(?P<body>(?s:.*))"(?:#*)$"#)
            .expect("literal pattern is valid")
    });
    re.captures(literal.trim())
        .and_then(|c| c.name("body"))
        .map(|m| m.as_str().to_string())
}

/// Whether `node` is trivia that may sit between an item and its outer attributes
pub fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}
