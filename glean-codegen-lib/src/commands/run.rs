//! Command dispatch logic for glean-codegen

use super::common::{LogLevel, init_logging};
use super::{CheckArgs, InitArgs, TranslateArgs, check_definitions, init_config, list_targets, translate_files};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "glean-codegen", version, author, long_about = None)]
#[command(about = "Generate typed telemetry bindings from Glean metric and ping definitions")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Log level for diagnostic output
    #[arg(long, global = true, value_name = "LEVEL", default_value = "none")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate code for a target from definition files
    Translate(Box<TranslateArgs>),
    /// Validate definition files without generating code
    Check(CheckArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// List the available targets
    Targets,
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        Command::Translate(translate_args) => translate_files(host, translate_args),
        Command::Check(check_args) => check_definitions(host, check_args),
        Command::Init(init_args) => init_config(host, init_args),
        Command::Targets => {
            list_targets(host);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use camino::Utf8PathBuf;
    use std::fs;

    #[test]
    fn test_targets_command() {
        let mut host = TestHost::new();
        run(&mut host, ["glean-codegen", "targets"]).unwrap();
        assert_eq!(host.output_str(), "javascript\nkotlin\nswift\n");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_translate_command() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let input = dir.join("pings.yaml");
        fs::write(
            &input,
            r"
$schema: moz://mozilla.org/schemas/glean/pings/1-0-0
custom:
  description: This is a custom ping
  include_client_id: false
  bugs: [1]
  data_reviews: [https://example.com/review]
  notification_emails: [nobody@example.com]
",
        )
        .unwrap();
        let output = dir.join("generated");

        let mut host = TestHost::new();
        run(
            &mut host,
            [
                "glean-codegen",
                "--log-level",
                "warn",
                "translate",
                input.as_str(),
                "--format",
                "swift",
                "--output",
                output.as_str(),
                "--namespace",
                "Foo",
            ],
        )
        .unwrap();

        let contents = fs::read_to_string(output.join("Pings.swift")).unwrap();
        assert!(contents.contains("extension Foo {"));
        assert!(contents.contains("static let custom = Ping<NoReasonCodes>("));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
