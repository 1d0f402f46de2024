//! Turns parsed definition documents into a validated [`Model`].
//!
//! Every problem found in a document set is recorded; the build only succeeds
//! when none were found, so a single run reports all of them at once.

use super::error::{Location, SchemaError};
use super::expiry::Expiry;
use super::identifier::{self, MAX_EXTRA_KEY_LENGTH, MAX_NAME_LENGTH};
use super::metric::{ExtraKey, LabeledKind, Metric, MetricType};
use super::node::Node;
use super::ordered::OrderedMap;
use super::ping::Ping;
use super::registry::{self, VariantDescriptor};
use super::units::{HistogramType, Lifetime, MemoryUnit, TimeUnit};
use super::variant::{Attribute, VariantTag};
use crate::targets::Target;
use crate::{BuildErrors, Options};
use core::fmt;
use core::str::FromStr;
use std::collections::{BTreeMap, HashSet};

const LOG_TARGET: &str = "     model";

pub const METRICS_SCHEMA: &str = "moz://mozilla.org/schemas/glean/metrics/1-0-0";
pub const PINGS_SCHEMA: &str = "moz://mozilla.org/schemas/glean/pings/1-0-0";

/// How the internal category is spelled in documents.
pub const INTERNAL_CATEGORY_SOURCE: &str = "glean.internal.metrics";

const SCHEMA_KEY: &str = "$schema";
const NO_LINT_KEY: &str = "no_lint";
const DEFAULT_PING: &str = "default";

/// A parsed definition document and where it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub origin: String,
    pub root: Node,
}

impl SourceDocument {
    #[must_use]
    pub fn new(origin: impl Into<String>, root: Node) -> Self {
        Self {
            origin: origin.into(),
            root,
        }
    }
}

/// The validated instruments of a document set, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub metrics: Vec<Metric>,
    pub pings: Vec<Ping>,
}

/// Accumulates documents and validates them into a [`Model`].
pub struct ModelBuilder<'a> {
    options: &'a Options,
    target: Option<&'a dyn Target>,
    model: Model,
    errors: Vec<SchemaError>,
    seen_metrics: HashSet<(String, String)>,
    seen_pings: HashSet<String>,
    saw_ping_document: bool,
}

impl fmt::Debug for ModelBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("options", self.options)
            .field("target", &self.target.map(|t| t.name()))
            .field("metrics", &self.model.metrics.len())
            .field("pings", &self.model.pings.len())
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ModelBuilder<'a> {
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            target: None,
            model: Model::default(),
            errors: Vec::new(),
            seen_metrics: HashSet::new(),
            seen_pings: HashSet::new(),
            saw_ping_document: false,
        }
    }

    /// Also enforce the reserved words and supported variants of a target
    #[must_use]
    pub fn with_target(mut self, target: &'a dyn Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn add_document(&mut self, document: &SourceDocument) {
        let location = Location::Document(document.origin.clone());
        let Some(entries) = document.root.as_object() else {
            self.errors.push(SchemaError::InvalidDocument {
                location,
                message: format!("the document root must be a mapping, found {}", document.root.kind()),
            });
            return;
        };

        match document.root.get(SCHEMA_KEY).map(|node| node.as_str()) {
            Some(Some(METRICS_SCHEMA)) => {
                log::debug!(target: LOG_TARGET, "Reading metrics from '{}'", document.origin);
                self.add_metrics_document(&document.origin, entries);
            }
            Some(Some(PINGS_SCHEMA)) => {
                log::debug!(target: LOG_TARGET, "Reading pings from '{}'", document.origin);
                self.saw_ping_document = true;
                self.add_pings_document(&document.origin, entries);
            }
            Some(Some(other)) => self.errors.push(SchemaError::InvalidDocument {
                location,
                message: format!("unknown $schema '{other}'"),
            }),
            Some(None) => self.errors.push(SchemaError::WrongType {
                location,
                attribute: SCHEMA_KEY.to_string(),
                expected: "a string",
                found: document.root.get(SCHEMA_KEY).map_or("null", Node::kind),
            }),
            None => self.errors.push(SchemaError::InvalidDocument {
                location,
                message: "missing $schema".to_string(),
            }),
        }
    }

    /// Finish the build
    ///
    /// # Errors
    ///
    /// Returns every schema and policy error found across all added documents
    pub fn build(self) -> Result<Model, BuildErrors> {
        if !self.errors.is_empty() {
            return Err(BuildErrors::new(self.errors));
        }

        if self.saw_ping_document {
            self.warn_on_undeclared_pings();
        }

        log::info!(
            target: LOG_TARGET,
            "Validated {} metric(s) and {} ping(s)",
            self.model.metrics.len(),
            self.model.pings.len()
        );
        Ok(self.model)
    }

    fn add_metrics_document(&mut self, origin: &str, entries: &[(String, Node)]) {
        for (key, value) in entries {
            if key == SCHEMA_KEY || key == NO_LINT_KEY {
                continue;
            }

            let category = if key == INTERNAL_CATEGORY_SOURCE { "" } else { key.as_str() };
            let location = Location::Document(origin.to_string());

            let category_ok = self.check_category(key, &location);
            let Some(metrics) = value.as_object() else {
                self.errors.push(SchemaError::WrongType {
                    location,
                    attribute: key.clone(),
                    expected: "a mapping",
                    found: value.kind(),
                });
                continue;
            };

            for (name, definition) in metrics {
                let location = Location::Metric {
                    category: key.clone(),
                    name: name.clone(),
                };

                if let Some(metric) = self.read_metric(origin, category, name, definition, location.clone())
                    && category_ok
                {
                    if self.seen_metrics.insert((metric.category.clone(), metric.name.clone())) {
                        self.model.metrics.push(metric);
                    } else {
                        self.errors.push(SchemaError::DuplicateDefinition { location });
                    }
                }
            }
        }
    }

    fn add_pings_document(&mut self, origin: &str, entries: &[(String, Node)]) {
        for (name, definition) in entries {
            if name == SCHEMA_KEY || name == NO_LINT_KEY {
                continue;
            }

            let location = Location::Ping(name.clone());
            if let Some(ping) = self.read_ping(origin, name, definition, location.clone()) {
                if self.seen_pings.insert(ping.name.clone()) {
                    self.model.pings.push(ping);
                } else {
                    self.errors.push(SchemaError::DuplicateDefinition { location });
                }
            }
        }
    }

    fn check_category(&mut self, category: &str, location: &Location) -> bool {
        let before = self.errors.len();

        if !identifier::is_category(category) {
            self.errors.push(SchemaError::InvalidIdentifier {
                location: location.clone(),
                what: "category",
                value: category.to_string(),
            });
        } else if !self.options.allow_reserved
            && (category.starts_with("glean") || self.is_target_reserved(category))
        {
            self.errors.push(SchemaError::ReservedIdentifier {
                location: location.clone(),
                what: "category",
                value: category.to_string(),
            });
        }

        self.errors.len() == before
    }

    fn read_metric(
        &mut self,
        origin: &str,
        category: &str,
        name: &str,
        node: &Node,
        location: Location,
    ) -> Option<Metric> {
        let Some(entries) = node.as_object() else {
            self.errors.push(SchemaError::WrongType {
                location,
                attribute: name.to_string(),
                expected: "a mapping",
                found: node.kind(),
            });
            return None;
        };

        let mut def = Definition::new(location, entries);
        let Some(descriptor) = def.metric_descriptor() else {
            self.errors.extend(def.finish());
            return None;
        };
        let tag = descriptor.tag;
        def.check_schema(descriptor);

        if !identifier::is_identifier(name, MAX_NAME_LENGTH) {
            def.fail(SchemaError::InvalidIdentifier {
                location: def.location.clone(),
                what: "metric name",
                value: name.to_string(),
            });
        } else if !self.options.allow_reserved && self.is_target_reserved(name) {
            def.fail(SchemaError::ReservedIdentifier {
                location: def.location.clone(),
                what: "metric name",
                value: name.to_string(),
            });
        }

        if let Some(target) = self.target
            && let Err(source) = target.class_name_for(tag)
        {
            def.fail(SchemaError::UnsupportedVariant {
                location: def.location.clone(),
                source,
            });
        }

        let description = def.string(Attribute::Description);
        let bugs = def.bugs();
        let data_reviews = def.string_list(Attribute::DataReviews);
        let notification_emails = def.non_empty_string_list(Attribute::NotificationEmails);
        let expires = def.expires();
        let lifetime = def.parse_or(Attribute::Lifetime, Lifetime::default());
        let declared_disabled = def.bool_or(Attribute::Disabled, false);
        let version = def.version();
        let metric_type = self.read_metric_type(&mut def, tag);
        let send_in_pings = metric_type.as_ref().map(|t| def.send_in_pings(t.default_store()));

        let errors = def.finish();
        if !errors.is_empty() {
            self.errors.extend(errors);
            return None;
        }

        let expires = expires?;
        Some(Metric {
            category: category.to_string(),
            name: name.to_string(),
            metric_type: metric_type?,
            description: description?,
            bugs,
            data_reviews,
            notification_emails,
            disabled: declared_disabled || expires.is_expired(self.options),
            expires,
            lifetime,
            send_in_pings: send_in_pings?,
            version,
            origin: origin.to_string(),
        })
    }

    fn read_metric_type(&self, def: &mut Definition<'_>, tag: VariantTag) -> Option<MetricType> {
        let metric_type = match tag {
            VariantTag::Boolean => MetricType::Boolean,
            VariantTag::Counter => MetricType::Counter,
            VariantTag::CustomDistribution => MetricType::CustomDistribution {
                range_min: def.integer(Attribute::RangeMin).unwrap_or(1),
                range_max: def.integer(Attribute::RangeMax)?,
                bucket_count: def.integer(Attribute::BucketCount)?,
                histogram_type: def.parse::<HistogramType>(Attribute::HistogramType)?,
                unit: def.string(Attribute::Unit),
            },
            VariantTag::Datetime => MetricType::Datetime {
                time_unit: def.parse_or(Attribute::TimeUnit, TimeUnit::Millisecond),
            },
            VariantTag::Event => MetricType::Event {
                extra_keys: def.extra_keys(|key| !self.options.allow_reserved && self.is_target_reserved(key)),
            },
            VariantTag::Jwe => MetricType::Jwe,
            VariantTag::LabeledBoolean => labeled(def, LabeledKind::Boolean),
            VariantTag::LabeledCounter => labeled(def, LabeledKind::Counter),
            VariantTag::LabeledString => labeled(def, LabeledKind::String),
            VariantTag::MemoryDistribution => MetricType::MemoryDistribution {
                memory_unit: def.parse_or(Attribute::MemoryUnit, MemoryUnit::Byte),
            },
            VariantTag::Quantity => MetricType::Quantity {
                unit: def.string(Attribute::Unit)?,
            },
            VariantTag::String => MetricType::String,
            VariantTag::StringList => MetricType::StringList,
            VariantTag::Timespan => MetricType::Timespan {
                time_unit: def.parse_or(Attribute::TimeUnit, TimeUnit::Millisecond),
            },
            VariantTag::TimingDistribution => MetricType::TimingDistribution {
                time_unit: def.parse_or(Attribute::TimeUnit, TimeUnit::Nanosecond),
            },
            VariantTag::Uuid => MetricType::Uuid,
            VariantTag::Ping => return None,
        };

        Some(metric_type)
    }

    fn read_ping(&mut self, origin: &str, name: &str, node: &Node, location: Location) -> Option<Ping> {
        let Some(entries) = node.as_object() else {
            self.errors.push(SchemaError::WrongType {
                location,
                attribute: name.to_string(),
                expected: "a mapping",
                found: node.kind(),
            });
            return None;
        };

        let mut def = Definition::new(location, entries);
        def.check_schema(registry::descriptor(VariantTag::Ping));

        if !identifier::is_ping_name(name) {
            def.fail(SchemaError::InvalidIdentifier {
                location: def.location.clone(),
                what: "ping name",
                value: name.to_string(),
            });
        } else if !self.options.allow_reserved && (Ping::is_reserved_name(name) || self.is_target_reserved(name)) {
            def.fail(SchemaError::ReservedIdentifier {
                location: def.location.clone(),
                what: "ping name",
                value: name.to_string(),
            });
        }

        if let Some(target) = self.target
            && let Err(source) = target.class_name_for(VariantTag::Ping)
        {
            def.fail(SchemaError::UnsupportedVariant {
                location: def.location.clone(),
                source,
            });
        }

        let description = def.string(Attribute::Description);
        let include_client_id = def.bool(Attribute::IncludeClientId);
        let send_if_empty = def.bool_or(Attribute::SendIfEmpty, false);
        let bugs = def.bugs();
        let data_reviews = def.string_list(Attribute::DataReviews);
        let notification_emails = def.non_empty_string_list(Attribute::NotificationEmails);
        let reasons = def.reasons(|code| !self.options.allow_reserved && self.is_target_reserved(code));

        let errors = def.finish();
        if !errors.is_empty() {
            self.errors.extend(errors);
            return None;
        }

        Some(Ping {
            name: name.to_string(),
            description: description?,
            include_client_id: include_client_id?,
            send_if_empty,
            bugs,
            data_reviews,
            notification_emails,
            reasons,
            origin: origin.to_string(),
        })
    }

    /// Whether an identifier, in any of the forms a target may render it, is a target keyword
    fn is_target_reserved(&self, value: &str) -> bool {
        self.target.is_some_and(|target| {
            let words = target.reserved_words();
            [value.to_string(), identifier::camel(value), identifier::pascal(value)]
                .iter()
                .any(|form| words.contains(&form.as_str()))
        })
    }

    fn warn_on_undeclared_pings(&self) {
        let declared: HashSet<&str> = self.model.pings.iter().map(|p| p.name.as_str()).collect();
        for metric in &self.model.metrics {
            for ping in &metric.send_in_pings {
                if !declared.contains(ping.as_str()) && !Ping::is_reserved_name(ping) {
                    log::warn!(
                        target: LOG_TARGET,
                        "Metric '{}' is sent in ping '{ping}', which is not declared in any pings document",
                        metric.identifier()
                    );
                }
            }
        }
    }
}

/// Build a model from a complete document set
///
/// # Errors
///
/// Returns every schema and policy error found
pub fn build_model(
    documents: &[SourceDocument],
    options: &Options,
    target: Option<&dyn Target>,
) -> Result<Model, BuildErrors> {
    let mut builder = ModelBuilder::new(options);
    if let Some(target) = target {
        builder = builder.with_target(target);
    }

    for document in documents {
        builder.add_document(document);
    }

    builder.build()
}

fn labeled(def: &mut Definition<'_>, inner: LabeledKind) -> MetricType {
    MetricType::Labeled {
        inner,
        labels: def.labels(),
    }
}

/// Typed access to the attributes of one definition, recording every problem found.
struct Definition<'a> {
    location: Location,
    entries: &'a [(String, Node)],
    errors: Vec<SchemaError>,
}

impl<'a> Definition<'a> {
    const fn new(location: Location, entries: &'a [(String, Node)]) -> Self {
        Self {
            location,
            entries,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    fn finish(self) -> Vec<SchemaError> {
        self.errors
    }

    fn get(&self, attribute: Attribute) -> Option<&'a Node> {
        let key = attribute.as_str();
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn wrong_type(&mut self, attribute: Attribute, expected: &'static str, found: &Node) {
        self.fail(SchemaError::WrongType {
            location: self.location.clone(),
            attribute: attribute.as_str().to_string(),
            expected,
            found: found.kind(),
        });
    }

    /// Resolve the `type` attribute of a metric definition
    fn metric_descriptor(&mut self) -> Option<&'static VariantDescriptor> {
        let Some(node) = self.get(Attribute::Type) else {
            self.fail(SchemaError::MissingAttribute {
                location: self.location.clone(),
                attribute: Attribute::Type,
            });
            return None;
        };

        let Some(tag) = node.as_str() else {
            self.wrong_type(Attribute::Type, "a string", node);
            return None;
        };

        match registry::resolve(tag) {
            Ok(descriptor) if descriptor.tag.is_metric() => Some(descriptor),
            Ok(_) => {
                self.fail(SchemaError::InvalidValue {
                    location: self.location.clone(),
                    attribute: Attribute::Type.as_str().to_string(),
                    value: tag.to_string(),
                });
                None
            }
            Err(source) => {
                self.fail(SchemaError::UnknownType {
                    location: self.location.clone(),
                    source,
                });
                None
            }
        }
    }

    /// Unknown, duplicated and missing attributes
    fn check_schema(&mut self, descriptor: &VariantDescriptor) {
        let mut seen = HashSet::new();
        for (key, _) in self.entries {
            if !seen.insert(key.as_str()) {
                self.fail(SchemaError::DuplicateEntry {
                    location: self.location.clone(),
                    what: "attribute",
                    key: key.clone(),
                });
                continue;
            }

            let permitted = Attribute::from_str(key).is_ok_and(|attribute| descriptor.permits(attribute));
            if !permitted {
                self.fail(SchemaError::UnknownAttribute {
                    location: self.location.clone(),
                    attribute: key.clone(),
                    tag: descriptor.tag,
                });
            }
        }

        for attribute in descriptor.required() {
            if self.get(attribute).is_none() {
                self.fail(SchemaError::MissingAttribute {
                    location: self.location.clone(),
                    attribute,
                });
            }
        }
    }

    /// A required string; absence was already reported by the schema check
    fn string(&mut self, attribute: Attribute) -> Option<String> {
        let node = self.get(attribute)?;
        match node.as_str() {
            Some(value) => Some(value.to_string()),
            None => {
                self.wrong_type(attribute, "a string", node);
                None
            }
        }
    }

    fn bool(&mut self, attribute: Attribute) -> Option<bool> {
        let node = self.get(attribute)?;
        let value = node.as_bool();
        if value.is_none() {
            self.wrong_type(attribute, "a boolean", node);
        }
        value
    }

    fn bool_or(&mut self, attribute: Attribute, default: bool) -> bool {
        self.bool(attribute).unwrap_or(default)
    }

    fn integer(&mut self, attribute: Attribute) -> Option<i64> {
        let node = self.get(attribute)?;
        let value = node.as_i64();
        if value.is_none() {
            self.wrong_type(attribute, "an integer", node);
        }
        value
    }

    fn version(&mut self) -> u32 {
        let Some(value) = self.integer(Attribute::Version) else {
            return 0;
        };

        u32::try_from(value).unwrap_or_else(|_| {
            self.invalid_value(Attribute::Version, value.to_string());
            0
        })
    }

    fn invalid_value(&mut self, attribute: Attribute, value: String) {
        self.fail(SchemaError::InvalidValue {
            location: self.location.clone(),
            attribute: attribute.as_str().to_string(),
            value,
        });
    }

    /// A string naming one member of an enumeration
    fn parse<T: FromStr>(&mut self, attribute: Attribute) -> Option<T> {
        let value = self.string(attribute)?;
        let parsed = T::from_str(&value).ok();
        if parsed.is_none() {
            self.invalid_value(attribute, value);
        }
        parsed
    }

    fn parse_or<T: FromStr>(&mut self, attribute: Attribute, default: T) -> T {
        if self.get(attribute).is_none() {
            return default;
        }
        self.parse(attribute).unwrap_or(default)
    }

    fn strings(&mut self, attribute: Attribute, node: &Node, allow_integers: bool) -> Vec<String> {
        let Some(items) = node.as_array() else {
            self.wrong_type(attribute, "a list", node);
            return Vec::new();
        };

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Node::String(s) => values.push(s.clone()),
                Node::Integer(i) if allow_integers => values.push(i.to_string()),
                other => self.wrong_type(attribute, "a list of strings", other),
            }
        }
        values
    }

    fn string_list(&mut self, attribute: Attribute) -> Vec<String> {
        self.get(attribute)
            .map(|node| self.strings(attribute, node, false))
            .unwrap_or_default()
    }

    fn non_empty_string_list(&mut self, attribute: Attribute) -> Vec<String> {
        let Some(node) = self.get(attribute) else {
            return Vec::new();
        };

        let values = self.strings(attribute, node, false);
        if node.as_array().is_some_and(<[Node]>::is_empty) {
            self.wrong_type(attribute, "a non-empty list", node);
        }
        values
    }

    /// Bug references may be URLs or bare bug numbers
    fn bugs(&mut self) -> Vec<String> {
        let Some(node) = self.get(Attribute::Bugs) else {
            return Vec::new();
        };

        let values = self.strings(Attribute::Bugs, node, true);
        if node.as_array().is_some_and(<[Node]>::is_empty) {
            self.wrong_type(Attribute::Bugs, "a non-empty list", node);
        }
        values
    }

    fn expires(&mut self) -> Option<Expiry> {
        let node = self.get(Attribute::Expires)?;
        let expiry = Expiry::parse(node);
        if expiry.is_none() {
            let value = match node {
                Node::String(s) => s.clone(),
                Node::Integer(i) => i.to_string(),
                other => other.kind().to_string(),
            };
            self.fail(SchemaError::InvalidExpires {
                location: self.location.clone(),
                value,
            });
        }
        expiry
    }

    fn send_in_pings(&mut self, default_store: &str) -> Vec<String> {
        let Some(node) = self.get(Attribute::SendInPings) else {
            return vec![default_store.to_string()];
        };

        let mut pings: Vec<String> = Vec::new();
        for ping in self.strings(Attribute::SendInPings, node, false) {
            let ping = if ping == DEFAULT_PING {
                default_store.to_string()
            } else if identifier::is_ping_name(&ping) {
                ping
            } else {
                self.fail(SchemaError::InvalidIdentifier {
                    location: self.location.clone(),
                    what: "ping name",
                    value: ping,
                });
                continue;
            };

            if pings.contains(&ping) {
                self.fail(SchemaError::DuplicateEntry {
                    location: self.location.clone(),
                    what: "send_in_pings entry",
                    key: ping,
                });
            } else {
                pings.push(ping);
            }
        }
        pings
    }

    fn extra_keys(&mut self, is_reserved: impl Fn(&str) -> bool) -> OrderedMap<ExtraKey> {
        let mut extra_keys = OrderedMap::new();
        let Some(node) = self.get(Attribute::ExtraKeys) else {
            return extra_keys;
        };

        let Some(entries) = node.as_object() else {
            self.wrong_type(Attribute::ExtraKeys, "a mapping", node);
            return extra_keys;
        };

        for (key, definition) in entries {
            if !identifier::is_identifier(key, MAX_EXTRA_KEY_LENGTH) {
                self.fail(SchemaError::InvalidIdentifier {
                    location: self.location.clone(),
                    what: "extra key",
                    value: key.clone(),
                });
                continue;
            }

            if is_reserved(key) {
                self.fail(SchemaError::ReservedIdentifier {
                    location: self.location.clone(),
                    what: "extra key",
                    value: key.clone(),
                });
            }

            let Some(description) = self.extra_key_description(key, definition) else {
                continue;
            };

            if let Err(key) = extra_keys.try_insert(key.clone(), ExtraKey { description }) {
                self.fail(SchemaError::DuplicateExtraKey {
                    location: self.location.clone(),
                    key,
                });
            }
        }

        self.check_collisions("extra key", extra_keys.keys());
        extra_keys
    }

    fn extra_key_description(&mut self, key: &str, definition: &Node) -> Option<String> {
        let Some(entries) = definition.as_object() else {
            self.fail(SchemaError::WrongType {
                location: self.location.clone(),
                attribute: format!("extra_keys.{key}"),
                expected: "a mapping",
                found: definition.kind(),
            });
            return None;
        };

        let mut description = None;
        for (attribute, value) in entries {
            match (attribute.as_str(), value) {
                ("description", Node::String(s)) => description = Some(s.clone()),
                ("description", other) => self.fail(SchemaError::WrongType {
                    location: self.location.clone(),
                    attribute: format!("extra_keys.{key}.description"),
                    expected: "a string",
                    found: other.kind(),
                }),
                (other, _) => self.fail(SchemaError::InvalidDocument {
                    location: self.location.clone(),
                    message: format!("extra key '{key}' has unknown attribute '{other}'"),
                }),
            }
        }

        if description.is_none() && entries.iter().all(|(attribute, _)| attribute != "description") {
            self.fail(SchemaError::InvalidDocument {
                location: self.location.clone(),
                message: format!("extra key '{key}' is missing a description"),
            });
        }

        description
    }

    fn labels(&mut self) -> Option<Vec<String>> {
        let node = self.get(Attribute::Labels)?;
        let mut labels: Vec<String> = Vec::new();
        for label in self.strings(Attribute::Labels, node, false) {
            if !identifier::is_label(&label) {
                self.fail(SchemaError::InvalidIdentifier {
                    location: self.location.clone(),
                    what: "label",
                    value: label,
                });
            } else if labels.contains(&label) {
                self.fail(SchemaError::DuplicateEntry {
                    location: self.location.clone(),
                    what: "label",
                    key: label,
                });
            } else {
                labels.push(label);
            }
        }
        Some(labels)
    }

    fn reasons(&mut self, is_reserved: impl Fn(&str) -> bool) -> OrderedMap<String> {
        let mut reasons = OrderedMap::new();
        let Some(node) = self.get(Attribute::Reasons) else {
            return reasons;
        };

        let Some(entries) = node.as_object() else {
            self.wrong_type(Attribute::Reasons, "a mapping", node);
            return reasons;
        };

        for (code, description) in entries {
            if !identifier::is_identifier(code, MAX_NAME_LENGTH) {
                self.fail(SchemaError::InvalidIdentifier {
                    location: self.location.clone(),
                    what: "reason code",
                    value: code.clone(),
                });
                continue;
            }

            if is_reserved(code) {
                self.fail(SchemaError::ReservedIdentifier {
                    location: self.location.clone(),
                    what: "reason code",
                    value: code.clone(),
                });
            }

            let Some(description) = description.as_str() else {
                self.fail(SchemaError::WrongType {
                    location: self.location.clone(),
                    attribute: format!("reasons.{code}"),
                    expected: "a string",
                    found: description.kind(),
                });
                continue;
            };

            if let Err(key) = reasons.try_insert(code.clone(), description.to_string()) {
                self.fail(SchemaError::DuplicateEntry {
                    location: self.location.clone(),
                    what: "reason",
                    key,
                });
            }
        }

        self.check_collisions("reason code", reasons.keys());
        reasons
    }

    /// Distinct keys must stay distinct once camel-cased for generated code
    fn check_collisions<'k>(&mut self, what: &'static str, keys: impl Iterator<Item = &'k str>) {
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for key in keys {
            let identifier = identifier::camel(key);
            if let Some(first) = seen.insert(identifier.clone(), key) {
                self.fail(SchemaError::IdentifierCollision {
                    location: self.location.clone(),
                    what,
                    first: first.to_string(),
                    second: key.to_string(),
                    identifier,
                });
            }
        }
    }
}
