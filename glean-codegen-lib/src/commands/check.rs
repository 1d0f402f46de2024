use super::Host;
use super::common::OptionsArgs;
use crate::grouping::group;
use crate::model::build_model;
use crate::targets::TargetRegistry;
use crate::{NamespaceConfig, Result, load_documents};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Metric and ping definition files
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<Utf8PathBuf>,

    /// Also check that every instrument is supported by this target
    #[arg(long, short = 'f', value_name = "TARGET")]
    pub format: Option<String>,

    #[command(flatten)]
    pub options: OptionsArgs,
}

/// Validates the definitions and returns the number of metrics and pings
fn check_inner(args: &CheckArgs) -> Result<(usize, usize)> {
    let options = args.options.resolve()?;
    let documents = load_documents(&args.inputs)?;

    let registry = TargetRegistry::builtin();
    let target = args
        .format
        .as_deref()
        .map(|name| registry.create(name, &NamespaceConfig::default()))
        .transpose()?;

    let model = build_model(&documents, &options, target.as_deref())?;
    let _ = group(&model)?;

    Ok((model.metrics.len(), model.pings.len()))
}

pub fn check_definitions<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    match check_inner(args) {
        Ok((metrics, pings)) => {
            let _ = writeln!(host.output(), "Definitions are valid: {metrics} metric(s), {pings} ping(s)");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
