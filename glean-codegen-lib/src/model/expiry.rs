use super::node::Node;
use crate::Options;
use chrono::NaiveDate;
use core::fmt;
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid regex"));

/// When a metric stops collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Never,
    Expired,
    Date(NaiveDate),

    /// Expires once the product reaches this major version
    Version(u32),
}

impl Expiry {
    /// Parse an `expires` value
    ///
    /// Only the exact spellings are accepted: `never`, `expired`, a zero-padded
    /// `YYYY-MM-DD` calendar date, or a non-negative integer. Anything else
    /// yields `None`.
    #[must_use]
    pub fn parse(node: &Node) -> Option<Self> {
        match node {
            Node::String(s) => match s.as_str() {
                "never" => Some(Self::Never),
                "expired" => Some(Self::Expired),
                date if DATE_PATTERN.is_match(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok().map(Self::Date),
                _ => None,
            },
            Node::Integer(version) => u32::try_from(*version).ok().map(Self::Version),
            _ => None,
        }
    }

    /// Whether the metric should be generated as disabled under these options
    #[must_use]
    pub fn is_expired(&self, options: &Options) -> bool {
        match self {
            Self::Never => false,
            Self::Expired => true,
            Self::Date(date) => options.expiration_date.is_some_and(|cutoff| *date < cutoff),
            Self::Version(version) => options.expire_by_version.is_some_and(|current| *version <= current),
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::Expired => f.write_str("expired"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Version(version) => write!(f, "{version}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Expiry::parse(&Node::from("never")), Some(Expiry::Never));
        assert_eq!(Expiry::parse(&Node::from("expired")), Some(Expiry::Expired));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(Expiry::parse(&Node::from("2030-01-31")), Some(Expiry::Date(date(2030, 1, 31))));
        assert_eq!(Expiry::parse(&Node::from("2030-1-31")), None);
        assert_eq!(Expiry::parse(&Node::from("2030-02-30")), None);
        assert_eq!(Expiry::parse(&Node::from("2030-01-31T00:00:00")), None);
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(Expiry::parse(&Node::from(42_i64)), Some(Expiry::Version(42)));
        assert_eq!(Expiry::parse(&Node::from(-1_i64)), None);
        assert_eq!(Expiry::parse(&Node::from("42")), None);
    }

    #[test]
    fn test_parse_never_coerces() {
        assert_eq!(Expiry::parse(&Node::from("Never")), None);
        assert_eq!(Expiry::parse(&Node::from(true)), None);
        assert_eq!(Expiry::parse(&Node::Null), None);
    }

    #[test]
    fn test_is_expired() {
        let options = Options {
            expiration_date: Some(date(2025, 6, 1)),
            expire_by_version: Some(10),
            ..Options::default()
        };

        assert!(!Expiry::Never.is_expired(&options));
        assert!(Expiry::Expired.is_expired(&options));
        assert!(Expiry::Date(date(2025, 5, 31)).is_expired(&options));
        assert!(!Expiry::Date(date(2025, 6, 1)).is_expired(&options));
        assert!(Expiry::Version(10).is_expired(&options));
        assert!(!Expiry::Version(11).is_expired(&options));

        let lenient = Options::default();
        assert!(!Expiry::Date(date(2000, 1, 1)).is_expired(&lenient));
        assert!(!Expiry::Version(1).is_expired(&lenient));
    }

    #[test]
    fn test_display() {
        assert_eq!(Expiry::Date(date(2030, 1, 2)).to_string(), "2030-01-02");
        assert_eq!(Expiry::Version(7).to_string(), "7");
    }
}
