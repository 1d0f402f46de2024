use super::Host;
use super::common::{NamespaceArgs, OptionsArgs};
use crate::targets::TargetRegistry;
use crate::{Result, translate};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Metric and ping definition files
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<Utf8PathBuf>,

    /// Target language to generate
    #[arg(long, short = 'f', value_name = "TARGET")]
    pub format: String,

    /// Directory receiving the generated files
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Utf8PathBuf,

    #[command(flatten)]
    pub namespace: NamespaceArgs,

    #[command(flatten)]
    pub options: OptionsArgs,
}

fn translate_inner(args: &TranslateArgs, output: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let options = args.options.resolve()?;
    let namespace = args.namespace.to_config();
    translate(&TargetRegistry::builtin(), &args.inputs, &args.format, output, Some(&namespace), &options)
}

pub fn translate_files<H: Host>(host: &mut H, args: &TranslateArgs) -> Result<()> {
    match translate_inner(args, &args.output) {
        Ok(written) => {
            for path in &written {
                let _ = writeln!(host.output(), "{path}");
            }
            let _ = writeln!(host.output(), "Generated {} {} file(s) in {}", written.len(), args.format, args.output);
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Translation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
