//! Predefined type keywords and their `System` type names.

/// Keyword / framework type pairs, sorted by keyword.
const PREDEFINED_TYPES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("char", "System.Char"),
    ("decimal", "System.Decimal"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("int", "System.Int32"),
    ("long", "System.Int64"),
    ("nint", "System.IntPtr"),
    ("nuint", "System.UIntPtr"),
    ("object", "System.Object"),
    ("sbyte", "System.SByte"),
    ("short", "System.Int16"),
    ("string", "System.String"),
    ("uint", "System.UInt32"),
    ("ulong", "System.UInt64"),
    ("ushort", "System.UInt16"),
    ("void", "System.Void"),
];

/// `System.Int32` or `Int32` to `int`.
///
/// The unqualified form only matches when `System` is imported, which the
/// caller decides.
pub fn keyword_for_system_type(name: &str) -> Option<&'static str> {
    let qualified = name.strip_prefix("global::").unwrap_or(name);
    PREDEFINED_TYPES
        .iter()
        .find(|(_, system)| *system == qualified)
        .map(|(keyword, _)| *keyword)
}

pub fn system_type_for_keyword(keyword: &str) -> Option<&'static str> {
    PREDEFINED_TYPES
        .binary_search_by(|(kw, _)| kw.cmp(&keyword))
        .ok()
        .map(|idx| PREDEFINED_TYPES[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_keyword() {
        assert!(PREDEFINED_TYPES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn maps_both_directions() {
        assert_eq!(keyword_for_system_type("System.Int32"), Some("int"));
        assert_eq!(keyword_for_system_type("global::System.String"), Some("string"));
        assert_eq!(keyword_for_system_type("System.Guid"), None);
        assert_eq!(system_type_for_keyword("bool"), Some("System.Boolean"));
        assert_eq!(system_type_for_keyword("dynamic"), None);
    }
}
