//! Command-line interface and orchestration for glean-codegen
//!
//! The `run` function parses command-line arguments with clap and routes them
//! to one of the commands:
//!
//! - **translate**: Load definition files, validate them, and write the generated
//!   code for one target into an output directory
//! - **check**: Validate definition files, optionally against a target's
//!   supported instrument types, without writing anything
//! - **init**: Write a default configuration file
//! - **targets**: List the available targets
//!
//! Validation settings come from an optional TOML configuration file, with
//! individual command-line flags taking precedence. Commands talk to the outside
//! world through a [`Host`] so they can be driven from tests.

mod check;
mod common;
mod host;
mod init;
mod run;
mod targets;
mod translate;

pub use check::{CheckArgs, check_definitions};
pub use common::{LogLevel, NamespaceArgs, OptionsArgs, init_logging};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use targets::list_targets;
pub use translate::{TranslateArgs, translate_files};
