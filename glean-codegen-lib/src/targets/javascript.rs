use super::{Argument, Literal, QualifiedName, Target, argument_lines, common_arguments, extra_key_names, origin_of, ping_arguments, variant_arguments};
use crate::grouping::{Instrument, Unit};
use crate::model::{Metric, Ping, UnsupportedVariantForTargetError, VariantTag, identifier};
use crate::render::{Layout, RenderedEntry};

const NAMESPACE: &str = "Glean._private";
const INDENT: &str = "  ";

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "function", "if", "implements", "import", "in", "instanceof",
    "interface", "let", "new", "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Generates one ES module per unit exporting an object of instruments.
#[derive(Debug, Clone, Default)]
pub struct JavaScript;

impl JavaScript {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn arguments(&self, arguments: &[Argument<'_>]) -> String {
        let rendered: Vec<_> = arguments
            .iter()
            .map(|a| (identifier::camel(a.name), self.literal(&a.value)))
            .collect();
        argument_lines(&rendered, ": ", INDENT)
    }

    fn metric_call(&self, metric: &Metric) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(metric.variant())?;
        let mut arguments = common_arguments(metric);
        arguments.extend(variant_arguments(metric));

        let mut call = format!("new {class}({{\n{},\n}}", self.arguments(&arguments));
        if let Some(keys) = extra_key_names(metric) {
            call.push_str(", ");
            call.push_str(&self.literal(&Literal::StrList(keys)));
        }
        call.push(')');
        Ok(call)
    }

    fn ping_call(&self, ping: &Ping) -> Result<String, UnsupportedVariantForTargetError> {
        let class = self.class_name_for(VariantTag::Ping)?;
        Ok(format!("new {class}({{\n{},\n}})", self.arguments(&ping_arguments(ping))))
    }
}

impl Target for JavaScript {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn class_name_for(&self, tag: VariantTag) -> Result<QualifiedName, UnsupportedVariantForTargetError> {
        let name = match tag {
            VariantTag::Boolean => "BooleanMetricType",
            VariantTag::Counter => "CounterMetricType",
            VariantTag::Datetime => "DatetimeMetricType",
            VariantTag::Event => "EventMetricType",
            VariantTag::Quantity => "QuantityMetricType",
            VariantTag::String => "StringMetricType",
            VariantTag::StringList => "StringListMetricType",
            VariantTag::Timespan => "TimespanMetricType",
            VariantTag::Uuid => "UUIDMetricType",
            VariantTag::Ping => "PingType",
            VariantTag::CustomDistribution
            | VariantTag::Jwe
            | VariantTag::LabeledBoolean
            | VariantTag::LabeledCounter
            | VariantTag::LabeledString
            | VariantTag::MemoryDistribution
            | VariantTag::TimingDistribution => {
                return Err(UnsupportedVariantForTargetError { tag, target: self.name() });
            }
        };

        Ok(QualifiedName::new(NAMESPACE, name))
    }

    fn literal(&self, literal: &Literal<'_>) -> String {
        match literal {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Str(s) => string(s),
            Literal::Lifetime(lifetime) => string(&lifetime.to_string()),
            Literal::TimeUnit(unit) => string(&unit.to_string()),
            Literal::MemoryUnit(unit) => string(&unit.to_string()),
            Literal::HistogramType(histogram) => string(&histogram.to_string()),
            Literal::StrList(items) | Literal::StrSet(items) => {
                let items: Vec<_> = items.iter().map(|s| string(s)).collect();
                format!("[{}]", items.join(", "))
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
        format!("{}.js", unit.id)
    }

    fn layout(&self, unit: &Unit<'_>) -> Layout {
        Layout {
            header: format!("// AUTOGENERATED BY glean-codegen. DO NOT EDIT. DO NOT COMMIT.\n\nconst {} = {{\n", unit.id),
            footer: format!("}};\n\nexport default {};\n", unit.id),
            indent: INDENT.to_string(),
            separator: ",",
        }
    }

    fn entry(&self, instrument: &Instrument<'_>) -> Result<RenderedEntry, UnsupportedVariantForTargetError> {
        Ok(RenderedEntry {
            description: instrument.description().to_string(),
            origin: origin_of(instrument),
            preamble: Vec::new(),
            declaration: format!("{}: {}", instrument.identifier(), self.instrument_call(instrument)?),
        })
    }
}

/// A JSON string literal, which is also a valid JavaScript one
fn string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lifetime, TimeUnit};

    #[test]
    fn test_class_names() {
        let js = JavaScript::new();
        assert_eq!(js.class_name("event").unwrap().to_string(), "Glean._private.EventMetricType");
        assert_eq!(js.class_name("boolean").unwrap().to_string(), "Glean._private.BooleanMetricType");
        assert_eq!(js.class_name("ping").unwrap().to_string(), "Glean._private.PingType");
    }

    #[test]
    fn test_unknown_and_unsupported_tags() {
        let js = JavaScript::new();
        insta::assert_snapshot!(js.class_name("histogram").unwrap_err().to_string(), @"unknown instrument type 'histogram'");
        insta::assert_snapshot!(
            js.class_name("labeled_counter").unwrap_err().to_string(),
            @"instrument type 'labeled_counter' is not supported by the javascript target"
        );
    }

    #[test]
    fn test_literals() {
        let js = JavaScript::new();
        assert_eq!(js.literal(&Literal::Lifetime(Lifetime::Ping)), "\"ping\"");
        assert_eq!(js.literal(&Literal::Bool(false)), "false");
        assert_eq!(js.literal(&Literal::Str("")), "\"\"");
        assert_eq!(js.literal(&Literal::Str("say \"hi\"\n")), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(js.literal(&Literal::Str("جمع 搜集")), "\"جمع 搜集\"");
        assert_eq!(js.literal(&Literal::TimeUnit(TimeUnit::Millisecond)), "\"millisecond\"");
        assert_eq!(js.literal(&Literal::StrList(vec!["a", "b"])), "[\"a\", \"b\"]");
        assert_eq!(js.literal(&Literal::StrList(Vec::new())), "[]");
    }

    #[test]
    fn test_reserved_words() {
        assert!(JavaScript::new().reserved_words().contains(&"default"));
    }
}
