use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The closed set of instrument types.
///
/// The string form (`boolean`, `labeled_counter`, ...) is the `type` tag used in
/// definition documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum VariantTag {
    Boolean,
    Counter,
    CustomDistribution,
    Datetime,
    Event,
    Jwe,
    LabeledBoolean,
    LabeledCounter,
    LabeledString,
    MemoryDistribution,
    Quantity,
    String,
    StringList,
    Timespan,
    TimingDistribution,
    Uuid,

    /// Ping definitions; never valid as a metric type.
    Ping,
}

impl VariantTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn is_metric(self) -> bool {
        !matches!(self, Self::Ping)
    }

    /// The type wrapped by a labeled variant
    #[must_use]
    pub const fn labeled_inner(self) -> Option<Self> {
        match self {
            Self::LabeledBoolean => Some(Self::Boolean),
            Self::LabeledCounter => Some(Self::Counter),
            Self::LabeledString => Some(Self::String),
            _ => None,
        }
    }
}

/// Attribute keys accepted in definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    Type,
    Description,
    Bugs,
    DataReviews,
    NotificationEmails,
    Expires,
    Lifetime,
    SendInPings,
    Disabled,
    Version,
    ExtraKeys,
    Labels,
    TimeUnit,
    MemoryUnit,
    RangeMin,
    RangeMax,
    BucketCount,
    HistogramType,
    Unit,
    IncludeClientId,
    SendIfEmpty,
    Reasons,
}

impl Attribute {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tags_round_trip_through_strings() {
        for tag in VariantTag::iter() {
            assert_eq!(VariantTag::from_str(tag.as_str()).unwrap(), tag);
        }
    }

    #[test]
    fn test_tag_spelling() {
        assert_eq!(VariantTag::LabeledCounter.as_str(), "labeled_counter");
        assert_eq!(VariantTag::Datetime.as_str(), "datetime");
        assert_eq!(VariantTag::StringList.to_string(), "string_list");
        assert_eq!(VariantTag::Uuid.as_str(), "uuid");
    }

    #[test]
    fn test_unknown_tag() {
        assert!(VariantTag::from_str("histogram").is_err());
        assert!(VariantTag::from_str("Boolean").is_err());
    }

    #[test]
    fn test_labeled_inner() {
        assert_eq!(VariantTag::LabeledString.labeled_inner(), Some(VariantTag::String));
        assert_eq!(VariantTag::Counter.labeled_inner(), None);
    }

    #[test]
    fn test_attribute_spelling() {
        assert_eq!(Attribute::SendInPings.as_str(), "send_in_pings");
        assert_eq!(Attribute::from_str("include_client_id").unwrap(), Attribute::IncludeClientId);
    }
}
