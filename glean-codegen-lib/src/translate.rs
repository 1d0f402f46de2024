//! The end-to-end pipeline: load, validate, group, render, write.

use crate::grouping::group;
use crate::model::{Node, SourceDocument, build_model};
use crate::render::Document;
use crate::targets::TargetRegistry;
use crate::{CompileError, NamespaceConfig, Options, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::fs;

const LOG_TARGET: &str = " translate";

/// Compile parsed documents into rendered documents for one target
///
/// Nothing is rendered unless the whole document set validates.
///
/// # Errors
///
/// Returns an error for an unknown target, for schema and policy violations
/// (all of them, collected), and for grouping collisions.
pub fn compile(
    registry: &TargetRegistry,
    documents: &[SourceDocument],
    target: &str,
    namespace: Option<&NamespaceConfig>,
    options: &Options,
) -> Result<Vec<Document>, CompileError> {
    let default_namespace = NamespaceConfig::default();
    let target = registry.create(target, namespace.unwrap_or(&default_namespace))?;

    let model = build_model(documents, options, Some(target.as_ref()))?;
    let units = group(&model)?;

    let mut rendered = Vec::with_capacity(units.len());
    for unit in &units {
        log::debug!(target: LOG_TARGET, "Rendering unit '{}' with {} instrument(s)", unit.id, unit.instruments.len());
        rendered.push(target.render_unit(unit)?);
    }

    Ok(rendered)
}

/// Read and parse definition documents
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not well-formed YAML
pub fn load_documents(paths: &[Utf8PathBuf]) -> Result<Vec<SourceDocument>> {
    paths
        .iter()
        .map(|path| {
            log::debug!(target: LOG_TARGET, "Loading '{path}'");
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading definitions file '{path}'"))?;
            let root = Node::from_yaml_str(&text).into_app_err_with(|| format!("parsing definitions file '{path}'"))?;
            Ok(SourceDocument::new(path.as_str(), root))
        })
        .collect()
}

/// Write rendered documents into a directory, creating it if needed
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be written
pub fn write_documents(output_dir: &Utf8Path, documents: &[Document]) -> Result<Vec<Utf8PathBuf>> {
    fs::create_dir_all(output_dir).into_app_err_with(|| format!("creating output directory '{output_dir}'"))?;

    documents
        .iter()
        .map(|document| {
            let path = output_dir.join(&document.file_name);
            fs::write(&path, &document.contents).into_app_err_with(|| format!("writing '{path}'"))?;
            log::debug!(target: LOG_TARGET, "Wrote '{path}'");
            Ok(path)
        })
        .collect()
}

/// Translate definition files into generated code in `output_dir`
///
/// # Errors
///
/// Returns an error if loading, compiling, or writing fails; no file is written
/// unless compilation succeeded.
pub fn translate(
    registry: &TargetRegistry,
    input_paths: &[Utf8PathBuf],
    target: &str,
    output_dir: &Utf8Path,
    namespace: Option<&NamespaceConfig>,
    options: &Options,
) -> Result<Vec<Utf8PathBuf>> {
    let documents = load_documents(input_paths)?;
    let rendered = compile(registry, &documents, target, namespace, options)?;
    let written = write_documents(output_dir, &rendered)?;

    log::info!(target: LOG_TARGET, "Generated {} {target} file(s) in '{output_dir}'", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> SourceDocument {
        SourceDocument::new("test.yaml", Node::from_yaml_str(text).unwrap())
    }

    const COUNTER: &str = r"
$schema: moz://mozilla.org/schemas/glean/metrics/1-0-0
core:
  clicks:
    type: counter
    description: Counts clicks.
    bugs: [1]
    notification_emails: [nobody@example.com]
    expires: never
";

    #[test]
    fn test_compile_counter_to_javascript() {
        let documents = compile(&TargetRegistry::builtin(), &[document(COUNTER)], "javascript", None, &Options::default()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].file_name, "core.js");
        assert!(documents[0].contents.contains("clicks: new Glean._private.CounterMetricType({"));
        assert!(documents[0].contents.contains("sendInPings: [\"metrics\"],"));
    }

    #[test]
    fn test_compile_unknown_target() {
        let err = compile(&TargetRegistry::builtin(), &[document(COUNTER)], "rust", None, &Options::default()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownTarget { .. }));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let registry = TargetRegistry::builtin();
        let first = compile(&registry, &[document(COUNTER)], "kotlin", None, &Options::default()).unwrap();
        let second = compile(&registry, &[document(COUNTER)], "kotlin", None, &Options::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_nothing_written_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let input = dir.join("bad.yaml");
        fs::write(&input, COUNTER.replace("expires: never", "expires: someday")).unwrap();

        let output = dir.join("out");
        let result = translate(&TargetRegistry::builtin(), &[input], "javascript", &output, None, &Options::default());
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = Utf8PathBuf::try_from(tmp.path().join("missing.yaml")).unwrap();
        assert!(load_documents(&[missing]).is_err());
    }
}
