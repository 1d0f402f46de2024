//! End-to-end tests of the Swift target.

use camino::Utf8PathBuf;
use glean_codegen_lib::render::Document;
use glean_codegen_lib::targets::TargetRegistry;
use glean_codegen_lib::{NamespaceConfig, Options, compile, load_documents};

fn generate(files: &[&str], namespace: Option<&NamespaceConfig>) -> Vec<Document> {
    let paths: Vec<_> = files
        .iter()
        .map(|f| Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(f))
        .collect();
    let documents = load_documents(&paths).unwrap();
    compile(&TargetRegistry::builtin(), &documents, "swift", namespace, &Options::default()).unwrap()
}

fn contents<'a>(documents: &'a [Document], file_name: &str) -> &'a str {
    documents
        .iter()
        .find(|d| d.file_name == file_name)
        .map_or_else(|| panic!("{file_name} was not generated"), |d| d.contents.as_str())
}

#[test]
fn test_event_keys_are_indexed_in_declaration_order() {
    let documents = generate(&["event_key_ordering.yaml"], None);
    let text = contents(&documents, "Event.swift");

    assert!(text.contains("        enum ExampleKeys: Int32, ExtraKeys {\n"));
    assert!(text.contains("            case alice = 0\n            case bob = 1\n            case charlie = 2\n"));
    assert!(text.contains("        static let example = EventMetricType<ExampleKeys>(\n"));
    assert!(text.contains("            allowedExtraKeys: [\"alice\", \"bob\", \"charlie\"]\n"));
}

#[test]
fn test_extension_of_namespace() {
    let namespace = NamespaceConfig {
        namespace: Some("Foo".to_string()),
        glean_namespace: None,
    };
    let documents = generate(&["event_key_ordering.yaml"], Some(&namespace));
    let text = contents(&documents, "Event.swift");

    assert!(text.contains("import Glean\n"));
    assert!(text.contains("extension Foo {\n    enum Event {\n"));
    assert!(text.ends_with("    }\n}\n"));
}

#[test]
fn test_pings_with_reasons() {
    let documents = generate(&["pings.yaml"], None);
    let text = contents(&documents, "Pings.swift");

    assert!(text.contains("        enum CoreReasonCodes: Int, ReasonCodes {\n"));
    assert!(text.contains("            case background = 0\n            case dirtyStartup = 1\n"));
    assert!(text.contains("        static let core = Ping<CoreReasonCodes>(\n"));
    assert!(text.contains("        static let custom = Ping<NoReasonCodes>(\n"));
    assert!(text.contains("            reasonCodes: [\"background\", \"dirty_startup\"]\n"));
}

#[test]
fn test_labeled_metric() {
    let documents = generate(&["duplicate_labeled.yaml"], None);
    let text = contents(&documents, "Category.swift");

    assert!(text.contains("        static let labeledCounter = try! LabeledMetricType<CounterMetricType>(\n"));
    assert!(text.contains("            labels: [\"label_a\", \"label_b\"]\n"));
    assert!(text.contains("        static let counter = CounterMetricType(\n"));
}

#[test]
fn test_comment_delimiters_stay_balanced() {
    let documents = generate(&["comment_delimiters.yaml"], None);
    let text = contents(&documents, "Comments.swift");

    assert_eq!(text.matches("/*").count(), text.matches("*/").count());
    assert!(text.contains("         * Counts /\\* opening a comment\n"));
    assert!(text.contains("        static let closer = CounterMetricType(\n"));
}
