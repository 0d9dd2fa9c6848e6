//! `mod name;` item extraction

use tree_sitter::Node;

use super::attributes::{find_child_of_kind, parse_attribute};
use super::utils::{is_comment, node_text};
use crate::{
    error::{Error, Result},
    types::ModDeclStub,
};

/// Collects body-less `mod` items, descending into inline modules
pub fn collect_mod_decls(root: &Node, source: &str) -> Result<Vec<ModDeclStub>> {
    let mut decls = Vec::new();
    visit_items(root, source, &mut Vec::new(), &mut decls)?;
    Ok(decls)
}

fn visit_items(
    container: &Node,
    source: &str,
    inline_path: &mut Vec<String>,
    decls: &mut Vec<ModDeclStub>,
) -> Result<()> {
    let mut cursor = container.walk();
    for child in container.named_children(&mut cursor) {
        if child.kind() != "mod_item" {
            continue;
        }

        let name_node = child
            .child_by_field_name("name")
            .ok_or_else(|| Error::ParseError("Module without name".to_string()))?;
        let name = node_text(&name_node, source)?.to_string();

        match child.child_by_field_name("body") {
            Some(body) => {
                inline_path.push(name);
                visit_items(&body, source, inline_path, decls)?;
                inline_path.pop();
            }
            None => decls.push(ModDeclStub {
                name,
                path_attribute: path_attribute(&child, source)?,
                is_public: find_child_of_kind(&child, "visibility_modifier").is_some(),
                inline_path: inline_path.clone(),
            }),
        }
    }
    Ok(())
}

/// Value of a `#[path = "..."]` among the item's outer attributes
fn path_attribute(item: &Node, source: &str) -> Result<Option<String>> {
    let mut sibling = item.prev_sibling();
    while let Some(s) = sibling {
        if s.kind() == "attribute_item" {
            if let Some(attribute) = find_child_of_kind(&s, "attribute") {
                let attr = parse_attribute(&attribute, source)?;
                if attr.path == "path" && attr.value.is_some() {
                    return Ok(attr.value);
                }
            }
        } else if !is_comment(&s) {
            // Stop if we hit something that's not an attribute or comment
            break;
        }
        sibling = s.prev_sibling();
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RustParser;

    fn decls(source: &str) -> Vec<ModDeclStub> {
        RustParser::new().unwrap().mod_declarations(source).unwrap()
    }

    #[test]
    fn test_path_attribute() {
        let found = decls(
            r#"
#[cfg(unix)]
// platform glue
#[path = "alt/foo_impl.rs"]
pub mod foo;
mod bar;
"#,
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "foo");
        assert_eq!(found[0].path_attribute.as_deref(), Some("alt/foo_impl.rs"));
        assert!(found[0].is_public);
        assert_eq!(found[1].name, "bar");
        assert_eq!(found[1].path_attribute, None);
        assert!(!found[1].is_public);
    }

    #[test]
    fn test_attribute_does_not_leak_across_items() {
        let found = decls(
            r#"
#[path = "x.rs"]
mod a;
fn between() {}
mod b;
"#,
        );
        assert_eq!(found[1].name, "b");
        assert_eq!(found[1].path_attribute, None);
    }

    #[test]
    fn test_inline_nesting() {
        let found = decls(
            r#"
mod outer {
    mod inner {
        pub mod leaf;
    }
    mod sibling;
}
mod tests { fn t() {} }
"#,
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "leaf");
        assert_eq!(found[0].inline_path, vec!["outer".to_string(), "inner".to_string()]);
        assert_eq!(found[1].name, "sibling");
        assert_eq!(found[1].inline_path, vec!["outer".to_string()]);
    }
}
