//! Attribute schema for each instrument type.

use super::error::UnknownTypeError;
use super::variant::{Attribute, VariantTag};
use core::str::FromStr;

/// Attributes every metric must declare.
const COMMON_REQUIRED: &[Attribute] = &[
    Attribute::Type,
    Attribute::Description,
    Attribute::Bugs,
    Attribute::NotificationEmails,
    Attribute::Expires,
];

/// Attributes every metric may declare.
const COMMON_OPTIONAL: &[Attribute] = &[
    Attribute::Lifetime,
    Attribute::SendInPings,
    Attribute::Disabled,
    Attribute::DataReviews,
    Attribute::Version,
];

#[derive(Debug)]
pub struct VariantDescriptor {
    pub tag: VariantTag,
    required: &'static [Attribute],
    optional: &'static [Attribute],
}

macro_rules! variant {
    ($tag:ident, required: [$($req:ident),*], optional: [$($opt:ident),*]) => {
        VariantDescriptor {
            tag: VariantTag::$tag,
            required: &[$(Attribute::$req),*],
            optional: &[$(Attribute::$opt),*],
        }
    };
}

static BOOLEAN: VariantDescriptor = variant!(Boolean, required: [], optional: []);
static COUNTER: VariantDescriptor = variant!(Counter, required: [], optional: []);
static CUSTOM_DISTRIBUTION: VariantDescriptor = variant!(
    CustomDistribution,
    required: [RangeMax, BucketCount, HistogramType],
    optional: [RangeMin, Unit]
);
static DATETIME: VariantDescriptor = variant!(Datetime, required: [], optional: [TimeUnit]);
static EVENT: VariantDescriptor = variant!(Event, required: [], optional: [ExtraKeys]);
static JWE: VariantDescriptor = variant!(Jwe, required: [], optional: []);
static LABELED_BOOLEAN: VariantDescriptor = variant!(LabeledBoolean, required: [], optional: [Labels]);
static LABELED_COUNTER: VariantDescriptor = variant!(LabeledCounter, required: [], optional: [Labels]);
static LABELED_STRING: VariantDescriptor = variant!(LabeledString, required: [], optional: [Labels]);
static MEMORY_DISTRIBUTION: VariantDescriptor = variant!(MemoryDistribution, required: [], optional: [MemoryUnit]);
static QUANTITY: VariantDescriptor = variant!(Quantity, required: [Unit], optional: []);
static STRING: VariantDescriptor = variant!(String, required: [], optional: []);
static STRING_LIST: VariantDescriptor = variant!(StringList, required: [], optional: []);
static TIMESPAN: VariantDescriptor = variant!(Timespan, required: [], optional: [TimeUnit]);
static TIMING_DISTRIBUTION: VariantDescriptor = variant!(TimingDistribution, required: [], optional: [TimeUnit]);
static UUID: VariantDescriptor = variant!(Uuid, required: [], optional: []);
static PING: VariantDescriptor = variant!(
    Ping,
    required: [Description, IncludeClientId, Bugs, NotificationEmails],
    optional: [SendIfEmpty, Reasons, DataReviews]
);

impl VariantDescriptor {
    /// Attributes that must be present, including the ones shared by all metrics
    pub fn required(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.common(COMMON_REQUIRED).chain(self.required.iter().copied())
    }

    /// Attributes that may be present, including the ones shared by all metrics
    pub fn optional(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.common(COMMON_OPTIONAL).chain(self.optional.iter().copied())
    }

    #[must_use]
    pub fn permits(&self, attribute: Attribute) -> bool {
        self.required().chain(self.optional()).any(|a| a == attribute)
    }

    fn common(&self, attributes: &'static [Attribute]) -> impl Iterator<Item = Attribute> + use<> {
        let attributes: &'static [Attribute] = if self.tag.is_metric() { attributes } else { &[] };
        attributes.iter().copied()
    }
}

/// The descriptor of a known variant
#[must_use]
pub const fn descriptor(tag: VariantTag) -> &'static VariantDescriptor {
    match tag {
        VariantTag::Boolean => &BOOLEAN,
        VariantTag::Counter => &COUNTER,
        VariantTag::CustomDistribution => &CUSTOM_DISTRIBUTION,
        VariantTag::Datetime => &DATETIME,
        VariantTag::Event => &EVENT,
        VariantTag::Jwe => &JWE,
        VariantTag::LabeledBoolean => &LABELED_BOOLEAN,
        VariantTag::LabeledCounter => &LABELED_COUNTER,
        VariantTag::LabeledString => &LABELED_STRING,
        VariantTag::MemoryDistribution => &MEMORY_DISTRIBUTION,
        VariantTag::Quantity => &QUANTITY,
        VariantTag::String => &STRING,
        VariantTag::StringList => &STRING_LIST,
        VariantTag::Timespan => &TIMESPAN,
        VariantTag::TimingDistribution => &TIMING_DISTRIBUTION,
        VariantTag::Uuid => &UUID,
        VariantTag::Ping => &PING,
    }
}

/// Resolve a `type` tag to its descriptor
///
/// # Errors
///
/// Returns [`UnknownTypeError`] if the tag does not name a registered variant
pub fn resolve(tag: &str) -> Result<&'static VariantDescriptor, UnknownTypeError> {
    VariantTag::from_str(tag).map(descriptor).map_err(|_| UnknownTypeError { tag: tag.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_tag_resolves_to_itself() {
        for tag in VariantTag::iter() {
            assert_eq!(resolve(tag.as_str()).unwrap().tag, tag);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = resolve("histogram").unwrap_err();
        assert_eq!(err.tag, "histogram");
        insta::assert_snapshot!(err.to_string(), @"unknown instrument type 'histogram'");
    }

    #[test]
    fn test_metric_variants_share_common_attributes() {
        let boolean = resolve("boolean").unwrap();
        assert!(boolean.required().any(|a| a == Attribute::Expires));
        assert!(boolean.permits(Attribute::SendInPings));
        assert!(!boolean.permits(Attribute::ExtraKeys));
    }

    #[test]
    fn test_variant_specific_attributes() {
        assert!(resolve("event").unwrap().permits(Attribute::ExtraKeys));
        assert!(resolve("quantity").unwrap().required().any(|a| a == Attribute::Unit));
        assert!(resolve("labeled_counter").unwrap().permits(Attribute::Labels));
        let custom = resolve("custom_distribution").unwrap();
        assert!(custom.required().any(|a| a == Attribute::BucketCount));
        assert!(custom.permits(Attribute::RangeMin));
    }

    #[test]
    fn test_ping_has_its_own_schema() {
        let ping = resolve("ping").unwrap();
        assert!(ping.required().any(|a| a == Attribute::IncludeClientId));
        assert!(!ping.permits(Attribute::Expires));
        assert!(!ping.permits(Attribute::Type));
        assert!(ping.permits(Attribute::Reasons));
    }
}
