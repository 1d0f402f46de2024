use crate::model::{SchemaError, UnsupportedVariantForTargetError};
use core::fmt;
use thiserror::Error;

/// Every schema and policy error found while building a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildErrors(Vec<SchemaError>);

impl BuildErrors {
    #[must_use]
    pub const fn new(errors: Vec<SchemaError>) -> Self {
        Self(errors)
    }

    #[must_use]
    pub fn errors(&self) -> &[SchemaError] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BuildErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) found in the definitions", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl core::error::Error for BuildErrors {}

impl IntoIterator for BuildErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Failures of the compile pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Build(#[from] BuildErrors),

    #[error(transparent)]
    UnsupportedVariant(#[from] UnsupportedVariantForTargetError),

    #[error("categories '{first}' and '{second}' both map to the output unit '{unit}'")]
    UnitCollision { unit: String, first: String, second: String },

    #[error("'{first}' and '{second}' both render as '{identifier}' in output unit '{unit}'")]
    IdentifierCollision {
        unit: String,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("unknown target '{name}', expected one of: {known}")]
    UnknownTarget { name: String, known: String },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
