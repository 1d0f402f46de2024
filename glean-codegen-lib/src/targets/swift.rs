use super::{
    Argument, Literal, QualifiedName, Target, argument_lines, common_arguments, extra_key_names, origin_of, ping_arguments,
    variant_arguments,
};
use crate::NamespaceConfig;
use crate::grouping::{Instrument, Unit};
use crate::model::{Metric, MetricType, Ping, UnsupportedVariantForTargetError, VariantTag, identifier};
use crate::render::{Layout, RenderedEntry};

const DEFAULT_NAMESPACE: &str = "GleanMetrics";
const DEFAULT_GLEAN_NAMESPACE: &str = "Glean";
const INDENT: &str = "    ";

const RESERVED_WORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "break", "case", "catch", "class", "continue", "default", "defer", "deinit", "do",
    "else", "enum", "extension", "fallthrough", "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init",
    "inout", "internal", "is", "let", "nil", "open", "operator", "private", "protocol", "public", "repeat", "rethrows",
    "return", "self", "static", "struct", "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias",
    "var", "where", "while",
];

/// Generates one Swift enum per unit, nested in an extension of the namespace.
#[derive(Debug, Clone)]
pub struct Swift {
    namespace: String,
    glean_namespace: String,
}

impl Swift {
    #[must_use]
    pub fn new(config: &NamespaceConfig) -> Self {
        Self {
            namespace: config.namespace_or(DEFAULT_NAMESPACE).to_string(),
            glean_namespace: config.glean_namespace_or(DEFAULT_GLEAN_NAMESPACE).to_string(),
        }
    }

    fn call(&self, constructor: &str, arguments: &[Argument<'_>], extra: &[(String, String)]) -> String {
        let mut rendered: Vec<_> = arguments
            .iter()
            .map(|a| (identifier::camel(a.name), self.literal(&a.value)))
            .collect();
        rendered.extend_from_slice(extra);
        format!("{constructor}(\n{}\n)", argument_lines(&rendered, ": ", INDENT))
    }

    fn metric_call(&self, metric: &Metric) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(metric.variant())?.simple();
        let mut arguments = common_arguments(metric);
        arguments.extend(variant_arguments(metric));

        match &metric.metric_type {
            MetricType::Event { extra_keys } => {
                let keys: Vec<_> = extra_keys.keys().collect();
                let key_type = if keys.is_empty() { "NoExtraKeys".to_string() } else { keys_enum(metric) };
                let extra = [("allowedExtraKeys".to_string(), self.literal(&Literal::StrList(keys)))];
                Ok(self.call(&format!("{class}<{key_type}>"), &arguments, &extra))
            }
            MetricType::Labeled { labels, .. } => {
                let labels = labels
                    .as_ref()
                    .map_or_else(|| "nil".to_string(), |l| self.literal(&Literal::StrSet(l.iter().map(String::as_str).collect())));
                let extra = [("labels".to_string(), labels)];
                Ok(format!("try! {}", self.call(&class, &arguments, &extra)))
            }
            _ => Ok(self.call(&class, &arguments, &[])),
        }
    }

    fn ping_call(&self, ping: &Ping) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(VariantTag::Ping)?.simple();
        let reasons = if ping.reasons.is_empty() { "NoReasonCodes".to_string() } else { reason_codes_enum(ping) };
        Ok(self.call(&format!("{class}<{reasons}>"), &ping_arguments(ping), &[]))
    }
}

impl Target for Swift {
    fn name(&self) -> &'static str {
        "swift"
    }

    fn class_name_for(&self, tag: VariantTag) -> Result<QualifiedName, UnsupportedVariantForTargetError> {
        let name = match tag {
            VariantTag::Boolean => "BooleanMetricType",
            VariantTag::Counter => "CounterMetricType",
            VariantTag::CustomDistribution => "CustomDistributionMetricType",
            VariantTag::Datetime => "DatetimeMetricType",
            VariantTag::Event => "EventMetricType",
            VariantTag::Jwe => "JweMetricType",
            VariantTag::LabeledBoolean | VariantTag::LabeledCounter | VariantTag::LabeledString => {
                let Some(inner) = tag.labeled_inner() else {
                    return Err(UnsupportedVariantForTargetError { tag, target: self.name() });
                };
                let inner = self.class_name_for(inner)?;
                return Ok(QualifiedName::new(self.glean_namespace.clone(), "LabeledMetricType").with_argument(inner));
            }
            VariantTag::MemoryDistribution => "MemoryDistributionMetricType",
            VariantTag::Quantity => "QuantityMetricType",
            VariantTag::String => "StringMetricType",
            VariantTag::StringList => "StringListMetricType",
            VariantTag::Timespan => "TimespanMetricType",
            VariantTag::TimingDistribution => "TimingDistributionMetricType",
            VariantTag::Uuid => "UuidMetricType",
            VariantTag::Ping => "Ping",
        };

        Ok(QualifiedName::new(self.glean_namespace.clone(), name))
    }

    fn literal(&self, literal: &Literal<'_>) -> String {
        match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Str(s) => string(s),
            Literal::Lifetime(lifetime) => format!(".{lifetime}"),
            Literal::TimeUnit(unit) => format!(".{unit}"),
            Literal::MemoryUnit(unit) => format!(".{unit}"),
            Literal::HistogramType(histogram) => format!(".{histogram}"),
            Literal::StrList(items) | Literal::StrSet(items) => {
                format!("[{}]", items.iter().map(|s| string(s)).collect::<Vec<_>>().join(", "))
            }
        }
    }

    fn instrument_call(&self, instrument: &Instrument<'_>) -> Result<String, UnsupportedVariantForTargetError> {
        match instrument {
            Instrument::Metric(metric) => self.metric_call(metric),
            Instrument::Ping(ping) => self.ping_call(ping),
        }
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn file_name(&self, unit: &Unit<'_>) -> String {
        format!("{}.swift", identifier::pascal(&unit.id))
    }

    fn layout(&self, unit: &Unit<'_>) -> Layout {
        let mut header = String::from("// AUTOGENERATED BY glean-codegen. DO NOT EDIT. DO NOT COMMIT.\n\n");
        header.push_str(&format!("import {}\n\n", self.glean_namespace));
        for rule in ["superfluous_disable_command", "nesting", "line_length", "identifier_name", "force_try"] {
            header.push_str(&format!("// swiftlint:disable {rule}\n"));
        }
        header.push_str(&format!(
            "\nextension {} {{\n{INDENT}enum {} {{\n",
            self.namespace,
            identifier::pascal(&unit.id)
        ));

        Layout {
            header,
            footer: format!("{INDENT}}}\n}}\n"),
            indent: INDENT.repeat(2),
            separator: "",
        }
    }

    fn entry(&self, instrument: &Instrument<'_>) -> Result<RenderedEntry, UnsupportedVariantForTargetError> {
        let mut preamble = Vec::new();
        match instrument {
            Instrument::Metric(metric) => {
                if let Some(keys) = extra_key_names(metric).filter(|keys| !keys.is_empty()) {
                    preamble.push(indexed_enum(&keys_enum(metric), "Int32", "ExtraKeys", &keys));
                }
            }
            Instrument::Ping(ping) if !ping.reasons.is_empty() => {
                let codes: Vec<_> = ping.reasons.keys().collect();
                preamble.push(indexed_enum(&reason_codes_enum(ping), "Int", "ReasonCodes", &codes));
            }
            Instrument::Ping(_) => {}
        }

        Ok(RenderedEntry {
            description: instrument.description().to_string(),
            origin: origin_of(instrument),
            preamble,
            declaration: format!("static let {} = {}", instrument.identifier(), self.instrument_call(instrument)?),
        })
    }
}

fn keys_enum(metric: &Metric) -> String {
    format!("{}Keys", identifier::pascal(&metric.name))
}

fn reason_codes_enum(ping: &Ping) -> String {
    format!("{}ReasonCodes", identifier::pascal(&ping.name))
}

/// An enum whose cases carry their declaration index
fn indexed_enum(name: &str, raw_type: &str, protocol: &str, cases: &[&str]) -> String {
    let mut out = format!("enum {name}: {raw_type}, {protocol} {{\n");
    for (index, case) in cases.iter().enumerate() {
        out.push_str(&format!("{INDENT}case {} = {index}\n", identifier::camel(case)));
    }
    out.push_str(&format!(
        "\n{INDENT}public func index() -> {raw_type} {{\n{INDENT}{INDENT}return self.rawValue\n{INDENT}}}\n}}"
    ));
    out
}

fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
