//! Identifier syntax and case conversion.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_CATEGORY_LENGTH: usize = 40;
pub const MAX_NAME_LENGTH: usize = 30;
pub const MAX_EXTRA_KEY_LENGTH: usize = 40;
pub const MAX_PING_NAME_LENGTH: usize = 30;
pub const MAX_LABEL_LENGTH: usize = 71;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid regex"));

static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("invalid regex"));

static PING_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("invalid regex"));

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_-]*(\.[a-z_][a-z0-9_-]*)*$").expect("invalid regex"));

/// Metric names and extra keys
#[must_use]
pub fn is_identifier(value: &str, max_length: usize) -> bool {
    value.len() <= max_length && IDENTIFIER.is_match(value)
}

#[must_use]
pub fn is_category(value: &str) -> bool {
    value.len() <= MAX_CATEGORY_LENGTH && CATEGORY.is_match(value)
}

/// Ping names, which also appear in `send_in_pings`
#[must_use]
pub fn is_ping_name(value: &str) -> bool {
    value.len() <= MAX_PING_NAME_LENGTH && PING_NAME.is_match(value)
}

#[must_use]
pub fn is_label(value: &str) -> bool {
    value.len() <= MAX_LABEL_LENGTH && LABEL.is_match(value)
}

/// `dotted.category` → `dottedCategory`
#[must_use]
pub fn camel(value: &str) -> String {
    value.to_lower_camel_case()
}

/// `dotted.category` → `DottedCategory`
#[must_use]
pub fn pascal(value: &str) -> String {
    value.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("example", MAX_NAME_LENGTH));
        assert!(is_identifier("_private2", MAX_NAME_LENGTH));
        assert!(!is_identifier("2fast", MAX_NAME_LENGTH));
        assert!(!is_identifier("has-dash", MAX_NAME_LENGTH));
        assert!(!is_identifier("", MAX_NAME_LENGTH));
        assert!(!is_identifier(&"a".repeat(31), MAX_NAME_LENGTH));
    }

    #[test]
    fn test_categories() {
        assert!(is_category("core_ping"));
        assert!(is_category("dotted.category"));
        assert!(!is_category("dotted..category"));
        assert!(!is_category(".leading"));
        assert!(!is_category(&"c".repeat(41)));
    }

    #[test]
    fn test_ping_names() {
        assert!(is_ping_name("deletion-request"));
        assert!(is_ping_name("custom"));
        assert!(!is_ping_name("-custom"));
        assert!(!is_ping_name("with.dot"));
    }

    #[test]
    fn test_labels() {
        assert!(is_label("first_label"));
        assert!(is_label("group.label-2"));
        assert!(!is_label("Upper"));
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(camel("dotted.category"), "dottedCategory");
        assert_eq!(camel("core_ping"), "corePing");
        assert_eq!(camel("telemetry"), "telemetry");
        assert_eq!(pascal("core_ping"), "CorePing");
        assert_eq!(pascal("event"), "Event");
    }
}
