//! Inner attribute extraction

use tree_sitter::Node;

use super::utils::{node_text, unquote_literal};
use crate::{error::Result, types::InnerAttr};

/// Collects `#![...]` items that are direct children of `root`
pub fn collect_inner_attributes(root: &Node, source: &str) -> Result<Vec<InnerAttr>> {
    let mut attrs = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() != "inner_attribute_item" {
            continue;
        }
        if let Some(attribute) = find_child_of_kind(&child, "attribute") {
            attrs.push(parse_attribute(&attribute, source)?);
        }
    }
    Ok(attrs)
}

/// Reads the `attribute` node inside `#[..]` or `#![..]`
pub fn parse_attribute(attribute: &Node, source: &str) -> Result<InnerAttr> {
    let path = attribute
        .named_child(0)
        .map(|n| node_text(&n, source))
        .transpose()?
        .unwrap_or_default()
        .to_string();

    let value = match attribute.child_by_field_name("value") {
        Some(value) => unquote_literal(node_text(&value, source)?),
        None => None,
    };

    let mut args = Vec::new();
    if let Some(arguments) = attribute.child_by_field_name("arguments") {
        // Only top-level identifiers: `feature(a, b)` yields `a` and `b`
        let mut cursor = arguments.walk();
        for token in arguments.named_children(&mut cursor) {
            if token.kind() == "identifier" {
                args.push(node_text(&token, source)?.to_string());
            }
        }
    }

    Ok(InnerAttr { path, args, value })
}

pub(crate) fn find_child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RustParser;

    fn inner(source: &str) -> Vec<InnerAttr> {
        RustParser::new().unwrap().inner_attributes(source).unwrap()
    }

    #[test]
    fn test_atoms_and_lists() {
        let attrs = inner("#![no_core]\n#![feature(lang_items, no_core)]\n");
        assert_eq!(
            attrs,
            vec![
                InnerAttr::atom("no_core"),
                InnerAttr::with_args("feature", ["lang_items", "no_core"]),
            ]
        );
    }

    #[test]
    fn test_name_value() {
        let attrs = inner("#![crate_name = \"demo\"]\n");
        assert_eq!(attrs[0].path, "crate_name");
        assert_eq!(attrs[0].value.as_deref(), Some("demo"));
        assert!(!attrs[0].is_atom());
    }

    #[test]
    fn test_cfg_attr_hides_feature() {
        // Nested lists are not flattened, so the feature stays invisible
        let attrs = inner("#![cfg_attr(stage0, feature(use_extern_macros))]\n");
        assert_eq!(attrs[0].path, "cfg_attr");
        assert_eq!(attrs[0].args, vec!["stage0".to_string()]);
    }

    #[test]
    fn test_outer_and_nested_attributes_ignored() {
        let attrs = inner("#[no_std]\nfn f() {}\nmod m {\n    #![no_std]\n}\n");
        assert!(attrs.is_empty());
    }
}
