#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for glean-codegen
//!
//! This library turns Glean metric and ping definitions into typed bindings
//! for several target languages. It is a small compiler: definitions are
//! loaded into a generic node tree, validated into a typed model, grouped into
//! output units, and rendered by a target generator.
//!
//! # Module Organization
//!
//! - [`model`]: Node tree, type registry, and the model builder/validator
//! - [`grouping`]: Partitioning of instruments into output units
//! - [`targets`]: Target generator interface and the built-in generators
//! - [`render`]: Assembly of rendered entries into documents
//! - [`commands`]: Command-line interface and orchestration
//!
//! The [`compile`] function is the pure core of the pipeline. [`translate`]
//! wraps it with document loading and output writing.

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
mod error;
pub mod grouping;
pub mod model;
mod options;
pub mod render;
pub mod targets;
mod translate;

pub use crate::commands::{Host, run};
pub use crate::error::{BuildErrors, CompileError};
pub use crate::options::{DEFAULT_CONFIG_TOML, NamespaceConfig, Options};
pub use crate::translate::{compile, load_documents, translate, write_documents};
