use super::expiry::Expiry;
use super::ordered::OrderedMap;
use super::units::{HistogramType, Lifetime, MemoryUnit, TimeUnit};
use super::variant::VariantTag;

/// A validated metric definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    /// Grouping key; empty for the internal category
    pub category: String,
    pub name: String,
    pub metric_type: MetricType,
    pub description: String,
    pub bugs: Vec<String>,
    pub data_reviews: Vec<String>,
    pub notification_emails: Vec<String>,
    pub expires: Expiry,
    pub lifetime: Lifetime,

    /// Pings this metric is stored in, in declaration order, with `default` expanded
    pub send_in_pings: Vec<String>,
    pub disabled: bool,
    pub version: u32,

    /// Name of the document the metric was read from
    pub origin: String,
}

impl Metric {
    /// The dotted `category.name` form, or just the name for internal metrics
    #[must_use]
    pub fn identifier(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.category, self.name)
        }
    }

    #[must_use]
    pub const fn variant(&self) -> VariantTag {
        self.metric_type.variant()
    }
}

/// One entry of an event's `extra_keys` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraKey {
    pub description: String,
}

/// Type-specific payload of a metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Boolean,
    Counter,
    CustomDistribution {
        range_min: i64,
        range_max: i64,
        bucket_count: i64,
        histogram_type: HistogramType,
        unit: Option<String>,
    },
    Datetime {
        time_unit: TimeUnit,
    },
    Event {
        extra_keys: OrderedMap<ExtraKey>,
    },
    Jwe,
    Labeled {
        inner: LabeledKind,

        /// Static labels in declaration order; `None` means labels are dynamic
        labels: Option<Vec<String>>,
    },
    MemoryDistribution {
        memory_unit: MemoryUnit,
    },
    Quantity {
        unit: String,
    },
    String,
    StringList,
    Timespan {
        time_unit: TimeUnit,
    },
    TimingDistribution {
        time_unit: TimeUnit,
    },
    Uuid,
}

/// The metric wrapped by a labeled metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabeledKind {
    Boolean,
    Counter,
    String,
}

impl LabeledKind {
    #[must_use]
    pub const fn variant(self) -> VariantTag {
        match self {
            Self::Boolean => VariantTag::Boolean,
            Self::Counter => VariantTag::Counter,
            Self::String => VariantTag::String,
        }
    }
}

impl MetricType {
    #[must_use]
    pub const fn variant(&self) -> VariantTag {
        match self {
            Self::Boolean => VariantTag::Boolean,
            Self::Counter => VariantTag::Counter,
            Self::CustomDistribution { .. } => VariantTag::CustomDistribution,
            Self::Datetime { .. } => VariantTag::Datetime,
            Self::Event { .. } => VariantTag::Event,
            Self::Jwe => VariantTag::Jwe,
            Self::Labeled { inner, .. } => match inner {
                LabeledKind::Boolean => VariantTag::LabeledBoolean,
                LabeledKind::Counter => VariantTag::LabeledCounter,
                LabeledKind::String => VariantTag::LabeledString,
            },
            Self::MemoryDistribution { .. } => VariantTag::MemoryDistribution,
            Self::Quantity { .. } => VariantTag::Quantity,
            Self::String => VariantTag::String,
            Self::StringList => VariantTag::StringList,
            Self::Timespan { .. } => VariantTag::Timespan,
            Self::TimingDistribution { .. } => VariantTag::TimingDistribution,
            Self::Uuid => VariantTag::Uuid,
        }
    }

    /// The ping a metric of this type is stored in when `send_in_pings` is absent or `default`
    #[must_use]
    pub const fn default_store(&self) -> &'static str {
        match self {
            Self::Event { .. } => "events",
            _ => "metrics",
        }
    }
}
