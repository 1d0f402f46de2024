use super::variant::{Attribute, VariantTag};
use core::fmt;
use thiserror::Error;

/// A `type` tag that names no registered variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument type '{tag}'")]
pub struct UnknownTypeError {
    pub tag: String,
}

/// A registered variant that a target has no constructor for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instrument type '{tag}' is not supported by the {target} target")]
pub struct UnsupportedVariantForTargetError {
    pub tag: VariantTag,
    pub target: &'static str,
}

/// Where in the document set a problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Document(String),
    Metric { category: String, name: String },
    Ping(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(origin) => write!(f, "{origin}"),
            Self::Metric { category, name } => write!(f, "metric '{category}.{name}'"),
            Self::Ping(name) => write!(f, "ping '{name}'"),
        }
    }
}

/// Schema and policy violations found while building the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{location}: {message}")]
    InvalidDocument { location: Location, message: String },

    #[error("{location}: missing required attribute '{attribute}'")]
    MissingAttribute { location: Location, attribute: Attribute },

    #[error("{location}: attribute '{attribute}' is not allowed for type '{tag}'")]
    UnknownAttribute { location: Location, attribute: String, tag: VariantTag },

    #[error("{location}: {source}")]
    UnknownType { location: Location, source: UnknownTypeError },

    #[error("{location}: '{attribute}' must be {expected}, found {found}")]
    WrongType {
        location: Location,
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{location}: invalid value '{value}' for '{attribute}'")]
    InvalidValue { location: Location, attribute: String, value: String },

    #[error("{location}: invalid expires value '{value}', expected 'never', 'expired', a YYYY-MM-DD date, or a major version number")]
    InvalidExpires { location: Location, value: String },

    #[error("{location}: duplicate extra key '{key}'")]
    DuplicateExtraKey { location: Location, key: String },

    #[error("{location}: duplicate {what} '{key}'")]
    DuplicateEntry { location: Location, what: &'static str, key: String },

    #[error("{location}: '{value}' is not a valid {what}")]
    InvalidIdentifier { location: Location, what: &'static str, value: String },

    #[error("{location}: {what}s '{first}' and '{second}' both render as '{identifier}'")]
    IdentifierCollision {
        location: Location,
        what: &'static str,
        first: String,
        second: String,
        identifier: String,
    },

    #[error("{location}: {what} '{value}' is reserved; set allow_reserved to use it")]
    ReservedIdentifier { location: Location, what: &'static str, value: String },

    #[error("{location}: {source}")]
    UnsupportedVariant { location: Location, source: UnsupportedVariantForTargetError },

    #[error("{location} is defined more than once")]
    DuplicateDefinition { location: Location },
}

impl SchemaError {
    /// Where the problem was found
    #[must_use]
    pub const fn location(&self) -> &Location {
        match self {
            Self::InvalidDocument { location, .. }
            | Self::MissingAttribute { location, .. }
            | Self::UnknownAttribute { location, .. }
            | Self::UnknownType { location, .. }
            | Self::WrongType { location, .. }
            | Self::InvalidValue { location, .. }
            | Self::InvalidExpires { location, .. }
            | Self::DuplicateExtraKey { location, .. }
            | Self::DuplicateEntry { location, .. }
            | Self::InvalidIdentifier { location, .. }
            | Self::IdentifierCollision { location, .. }
            | Self::ReservedIdentifier { location, .. }
            | Self::UnsupportedVariant { location, .. }
            | Self::DuplicateDefinition { location } => location,
        }
    }

    /// Policy errors can be lifted by configuration or a different target; the rest are malformed input.
    #[must_use]
    pub const fn is_policy(&self) -> bool {
        matches!(self, Self::ReservedIdentifier { .. } | Self::UnsupportedVariant { .. })
    }
}
