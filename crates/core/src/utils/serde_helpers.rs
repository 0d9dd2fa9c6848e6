//! Serde utility helpers for case-insensitive deserialization

/// Implements case-insensitive deserialization for unit-only enums.
///
/// Stubs persisted by older versions and hand-written `.modscope.json` files
/// spell origins and attribute sets in whatever case the author liked.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     MyEnum,
///     Variant1 => "variant1",
///     Variant2 => "variant2"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::types::PackageOrigin;

    #[test]
    fn test_case_insensitive_deserialize() {
        let origin: PackageOrigin = serde_json::from_str(r#""stdlib""#).unwrap();
        assert_eq!(origin, PackageOrigin::Stdlib);

        let origin: PackageOrigin = serde_json::from_str(r#""WORKSPACE""#).unwrap();
        assert_eq!(origin, PackageOrigin::Workspace);

        let origin: PackageOrigin = serde_json::from_str(r#""DePendency""#).unwrap();
        assert_eq!(origin, PackageOrigin::Dependency);

        let result: Result<PackageOrigin, _> = serde_json::from_str(r#""registry""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown variant"));
        assert!(err.contains("expected one of: workspace, dependency, stdlib"));
    }
}
