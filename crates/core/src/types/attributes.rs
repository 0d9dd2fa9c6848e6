use serde::Serialize;

use crate::impl_case_insensitive_deserialize;

/// Crate-level attributes that opt out of parts of the standard library.
///
/// The variants are mutually exclusive; `NoCore` wins over `NoStd` because it
/// implies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrateAttributes {
    NoCore,
    NoStd,
    #[default]
    None,
}

impl_case_insensitive_deserialize!(
    CrateAttributes,
    NoCore => "no_core",
    NoStd => "no_std",
    None => "none"
);

impl CrateAttributes {
    /// Classifies a list of inner attributes
    pub fn from_inner_attributes(attrs: &[InnerAttr]) -> Self {
        if has_atom_attribute(attrs, "no_core") {
            CrateAttributes::NoCore
        } else if has_atom_attribute(attrs, "no_std") {
            CrateAttributes::NoStd
        } else {
            CrateAttributes::None
        }
    }
}

/// One `#![...]` attribute as seen at the top of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct InnerAttr {
    /// Attribute path, e.g. `no_std`, `feature`, `rustfmt::skip`
    pub path: String,
    /// Identifiers of a parenthesized argument list, e.g. `feature(a, b)`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Literal value of a `name = "value"` attribute, quotes stripped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl InnerAttr {
    pub fn atom(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            value: None,
        }
    }

    pub fn with_args<I, S>(path: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            args: args.into_iter().map(Into::into).collect(),
            value: None,
        }
    }

    pub fn is_atom(&self) -> bool {
        self.args.is_empty() && self.value.is_none()
    }
}

/// `#![name]` with no arguments or value
pub fn has_atom_attribute(attrs: &[InnerAttr], name: &str) -> bool {
    attrs.iter().any(|a| a.path == name && a.is_atom())
}

/// `#![name(.., arg, ..)]`
pub fn has_attribute_with_arg(attrs: &[InnerAttr], name: &str, arg: &str) -> bool {
    attrs
        .iter()
        .any(|a| a.path == name && a.args.iter().any(|x| x == arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_core_checked_before_no_std() {
        let attrs = vec![InnerAttr::atom("no_std"), InnerAttr::atom("no_core")];
        assert_eq!(
            CrateAttributes::from_inner_attributes(&attrs),
            CrateAttributes::NoCore
        );
    }

    #[test]
    fn test_no_std_and_none() {
        assert_eq!(
            CrateAttributes::from_inner_attributes(&[InnerAttr::atom("no_std")]),
            CrateAttributes::NoStd
        );
        assert_eq!(
            CrateAttributes::from_inner_attributes(&[InnerAttr::with_args("feature", ["no_std"])]),
            CrateAttributes::None
        );
        assert_eq!(CrateAttributes::from_inner_attributes(&[]), CrateAttributes::None);
    }

    #[test]
    fn test_attribute_with_arg() {
        let attrs = vec![InnerAttr::with_args("feature", ["decl_macro", "use_extern_macros"])];
        assert!(has_attribute_with_arg(&attrs, "feature", "use_extern_macros"));
        assert!(!has_attribute_with_arg(&attrs, "feature", "box_syntax"));
        assert!(!has_atom_attribute(&attrs, "feature"));
    }

    #[test]
    fn test_deserialize_any_case() {
        let attrs: CrateAttributes = serde_json::from_str(r#""NO_STD""#).unwrap();
        assert_eq!(attrs, CrateAttributes::NoStd);
        assert_eq!(serde_json::to_string(&CrateAttributes::NoCore).unwrap(), r#""no_core""#);
    }
}
