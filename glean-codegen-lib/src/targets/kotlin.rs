use super::{
    Argument, Literal, QualifiedName, Target, argument_lines, common_arguments, extra_key_names, origin_of, ping_arguments,
    variant_arguments,
};
use crate::NamespaceConfig;
use crate::grouping::{Instrument, Unit};
use crate::model::{Metric, MetricType, Ping, UnsupportedVariantForTargetError, VariantTag, identifier};
use crate::render::{Layout, RenderedEntry};
use std::collections::BTreeSet;

const DEFAULT_NAMESPACE: &str = "GleanMetrics";
const DEFAULT_GLEAN_NAMESPACE: &str = "mozilla.components.service.glean";
const INDENT: &str = "    ";

const RESERVED_WORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in", "interface", "is", "null", "object",
    "package", "return", "super", "this", "throw", "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Generates one Kotlin object per unit with lazily constructed instruments.
#[derive(Debug, Clone)]
pub struct Kotlin {
    namespace: String,
    private_namespace: String,
}

impl Kotlin {
    #[must_use]
    pub fn new(config: &NamespaceConfig) -> Self {
        Self {
            namespace: config.namespace_or(DEFAULT_NAMESPACE).to_string(),
            private_namespace: format!("{}.private", config.glean_namespace_or(DEFAULT_GLEAN_NAMESPACE)),
        }
    }

    fn runtime_type(&self, name: &'static str) -> QualifiedName {
        QualifiedName::new(self.private_namespace.clone(), name)
    }

    fn call(&self, constructor: &str, arguments: &[Argument<'_>], extra: &[(String, String)]) -> String {
        let mut rendered: Vec<_> = arguments
            .iter()
            .map(|a| (identifier::camel(a.name), self.literal(&a.value)))
            .collect();
        rendered.extend_from_slice(extra);
        format!("{constructor}(\n{}\n)", argument_lines(&rendered, " = ", INDENT))
    }

    /// The declared type of an instrument's property
    fn property_type(&self, instrument: &Instrument<'_>) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(instrument.variant())?.simple();
        Ok(match instrument {
            Instrument::Metric(metric) => match extra_key_names(metric) {
                Some(keys) if !keys.is_empty() => format!("{class}<{}>", keys_enum(metric)),
                Some(_) => format!("{class}<NoExtraKeys>"),
                None => class,
            },
            Instrument::Ping(ping) if ping.reasons.is_empty() => format!("{class}<NoReasonCodes>"),
            Instrument::Ping(ping) => format!("{class}<{}>", reason_codes_enum(ping)),
        })
    }

    fn metric_call(&self, metric: &Metric) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(metric.variant())?;
        let mut arguments = common_arguments(metric);
        arguments.extend(variant_arguments(metric));

        let mut extra = Vec::new();
        match &metric.metric_type {
            MetricType::Event { .. } => {
                let keys = extra_key_names(metric).unwrap_or_default();
                extra.push(("allowedExtraKeys".to_string(), self.literal(&Literal::StrList(keys))));
            }
            MetricType::Labeled { inner, labels } => {
                if let Some(labels) = labels {
                    let labels = labels.iter().map(String::as_str).collect();
                    extra.push(("labels".to_string(), self.literal(&Literal::StrSet(labels))));
                }

                let sub_name = format!("{}_label", metric.name);
                let mut sub_arguments = common_arguments(metric);
                sub_arguments[1].value = Literal::Str(&sub_name);
                let sub_class = self.class_name_for(inner.variant())?;
                let sub_call = self.call(sub_class.name(), &sub_arguments, &[]);
                extra.push(("subMetric".to_string(), indent_continuation(&sub_call)));
            }
            _ => {}
        }

        Ok(self.call(class.name(), &arguments, &extra))
    }

    fn ping_call(&self, ping: &Ping) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(VariantTag::Ping)?;
        Ok(self.call(class.name(), &ping_arguments(ping), &[]))
    }

    fn imports(&self, unit: &Unit<'_>) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        for instrument in &unit.instruments {
            if let Ok(class) = self.class_name_for(instrument.variant()) {
                imports.extend(class.imports());
            }

            match instrument {
                Instrument::Metric(metric) => {
                    imports.extend(self.runtime_type("Lifetime").imports());
                    let extra = match &metric.metric_type {
                        MetricType::Labeled { inner, .. } => self.class_name_for(inner.variant()).ok(),
                        MetricType::Event { extra_keys } if extra_keys.is_empty() => Some(self.runtime_type("NoExtraKeys")),
                        MetricType::Datetime { .. } | MetricType::Timespan { .. } | MetricType::TimingDistribution { .. } => {
                            Some(self.runtime_type("TimeUnit"))
                        }
                        MetricType::MemoryDistribution { .. } => Some(self.runtime_type("MemoryUnit")),
                        MetricType::CustomDistribution { .. } => Some(self.runtime_type("HistogramType")),
                        _ => None,
                    };
                    imports.extend(extra.iter().flat_map(QualifiedName::imports));
                }
                Instrument::Ping(ping) if ping.reasons.is_empty() => {
                    imports.extend(self.runtime_type("NoReasonCodes").imports());
                }
                Instrument::Ping(_) => {}
            }
        }
        imports
    }
}

impl Target for Kotlin {
    fn name(&self) -> &'static str {
        "kotlin"
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
                return Ok(self.runtime_type("LabeledMetricType").with_argument(self.class_name_for(inner)?));
            }
            VariantTag::MemoryDistribution => "MemoryDistributionMetricType",
            VariantTag::Quantity => "QuantityMetricType",
            VariantTag::String => "StringMetricType",
            VariantTag::StringList => "StringListMetricType",
            VariantTag::Timespan => "TimespanMetricType",
            VariantTag::TimingDistribution => "TimingDistributionMetricType",
            VariantTag::Uuid => "UuidMetricType",
            VariantTag::Ping => "PingType",
        };

        Ok(self.runtime_type(name))
    }

    fn literal(&self, literal: &Literal<'_>) -> String {
        match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => format!("{i}L"),
            Literal::Str(s) => string(s),
            Literal::Lifetime(lifetime) => format!("Lifetime.{}", identifier::pascal(&lifetime.to_string())),
            Literal::TimeUnit(unit) => format!("TimeUnit.{}", identifier::pascal(&unit.to_string())),
            Literal::MemoryUnit(unit) => format!("MemoryUnit.{}", identifier::pascal(&unit.to_string())),
            Literal::HistogramType(histogram) => format!("HistogramType.{}", identifier::pascal(&histogram.to_string())),
            Literal::StrList(items) => format!("listOf({})", strings(items)),
            Literal::StrSet(items) => format!("setOf({})", strings(items)),
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
        format!("{}.kt", identifier::pascal(&unit.id))
    }

    fn layout(&self, unit: &Unit<'_>) -> Layout {
        let mut header = String::from("/*\n * AUTOGENERATED BY glean-codegen. DO NOT EDIT. DO NOT COMMIT.\n */\n\n");
        header.push_str("@file:Suppress(\"PackageNaming\", \"MaxLineLength\")\n");
        header.push_str(&format!("package {}\n\n", self.namespace));
        for import in self.imports(unit) {
            header.push_str(&format!("import {import}\n"));
        }
        header.push_str(&format!("\ninternal object {} {{\n", identifier::pascal(&unit.id)));

        Layout {
            header,
            footer: "}\n".to_string(),
            indent: INDENT.to_string(),
            separator: "",
        }
    }

    fn entry(&self, instrument: &Instrument<'_>) -> Result<RenderedEntry, UnsupportedVariantForTargetError> {
        let mut preamble = Vec::new();
        match instrument {
            Instrument::Metric(metric) => {
                if let Some(keys) = extra_key_names(metric).filter(|keys| !keys.is_empty()) {
                    preamble.push(enum_class(&keys_enum(metric), &keys));
                }
            }
            Instrument::Ping(ping) if !ping.reasons.is_empty() => {
                preamble.push(enum_class(&reason_codes_enum(ping), &ping.reasons.keys().collect::<Vec<_>>()));
            }
            Instrument::Ping(_) => {}
        }

        let property_type = self.property_type(instrument)?;
        let call = self.instrument_call(instrument)?;
        let declaration = match instrument {
            Instrument::Metric(_) => format!(
                "val {}: {property_type} by lazy {{\n{}\n}}",
                instrument.identifier(),
                indent_all(&call)
            ),
            Instrument::Ping(_) => format!("val {}: {property_type} = {call}", instrument.identifier()),
        };

        Ok(RenderedEntry {
            description: instrument.description().to_string(),
            origin: origin_of(instrument),
            preamble,
            declaration,
        })
    }
}

fn keys_enum(metric: &Metric) -> String {
    format!("{}Keys", identifier::camel(&metric.name))
}

fn reason_codes_enum(ping: &Ping) -> String {
    format!("{}ReasonCodes", identifier::camel(&ping.name))
}

fn enum_class(name: &str, constants: &[&str]) -> String {
    let constants: Vec<_> = constants.iter().map(|c| format!("{INDENT}{c}")).collect();
    format!("enum class {name} {{\n{}\n}}", constants.join(",\n"))
}

fn indent_all(text: &str) -> String {
    text.lines().map(|line| format!("{INDENT}{line}")).collect::<Vec<_>>().join("\n")
}

/// Indent every line but the first, for a call nested as an argument value
fn indent_continuation(text: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(index, line)| if index == 0 { line.to_string() } else { format!("{INDENT}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strings(items: &[&str]) -> String {
    items.iter().map(|s| string(s)).collect::<Vec<_>>().join(", ")
}

fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lifetime, TimeUnit};
    use strum::IntoEnumIterator;

    fn kotlin() -> Kotlin {
        Kotlin::new(&NamespaceConfig::default())
    }

    #[test]
    fn test_every_variant_has_a_class() {
        let kotlin = kotlin();
        for tag in VariantTag::iter() {
            assert!(kotlin.class_name_for(tag).is_ok(), "{tag} has no class");
        }
    }

    #[test]
    fn test_class_names() {
        let kotlin = kotlin();
        assert_eq!(
            kotlin.class_name("event").unwrap().to_string(),
            "mozilla.components.service.glean.private.EventMetricType"
        );
        assert_eq!(
            kotlin.class_name("labeled_counter").unwrap().simple(),
            "LabeledMetricType<CounterMetricType>"
        );
        assert_eq!(kotlin.class_name("ping").unwrap().simple(), "PingType");
    }

    #[test]
    fn test_glean_namespace() {
        let kotlin = Kotlin::new(&NamespaceConfig {
            namespace: None,
            glean_namespace: Some("org.example.glean".to_string()),
        });
        assert_eq!(kotlin.class_name("boolean").unwrap().to_string(), "org.example.glean.private.BooleanMetricType");
    }

    #[test]
    fn test_literals() {
        let kotlin = kotlin();
        assert_eq!(kotlin.literal(&Literal::Lifetime(Lifetime::Ping)), "Lifetime.Ping");
        assert_eq!(kotlin.literal(&Literal::TimeUnit(TimeUnit::Millisecond)), "TimeUnit.Millisecond");
        assert_eq!(kotlin.literal(&Literal::Int(5)), "5L");
        assert_eq!(kotlin.literal(&Literal::Str("cost: $5 \"now\"")), "\"cost: \\$5 \\\"now\\\"\"");
        assert_eq!(kotlin.literal(&Literal::StrList(vec!["alice", "bob"])), "listOf(\"alice\", \"bob\")");
        assert_eq!(kotlin.literal(&Literal::StrSet(vec!["a"])), "setOf(\"a\")");
        assert_eq!(kotlin.literal(&Literal::StrList(Vec::new())), "listOf()");
    }

    #[test]
    fn test_enum_class() {
        assert_eq!(
            enum_class("exampleKeys", &["alice", "bob", "charlie"]),
            "enum class exampleKeys {\n    alice,\n    bob,\n    charlie\n}"
        );
    }

    #[test]
    fn test_indent_continuation() {
        assert_eq!(indent_continuation("A(\n    x\n)"), "A(\n        x\n    )");
    }
}
