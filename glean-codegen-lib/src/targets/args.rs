//! Constructor arguments in target-neutral form.
//!
//! Targets spell the argument names in their own case convention and the values
//! through [`Target::literal`](super::Target::literal); order is fixed here.

use super::Literal;
use crate::model::{Metric, MetricType, Ping};

/// One named constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument<'a> {
    /// Name in `snake_case`
    pub name: &'static str,
    pub value: Literal<'a>,
}

const fn arg<'a>(name: &'static str, value: Literal<'a>) -> Argument<'a> {
    Argument { name, value }
}

/// Arguments shared by every metric, in order
#[must_use]
pub fn common_arguments(metric: &Metric) -> Vec<Argument<'_>> {
    vec![
        arg("category", Literal::Str(&metric.category)),
        arg("name", Literal::Str(&metric.name)),
        arg(
            "send_in_pings",
            Literal::StrList(metric.send_in_pings.iter().map(String::as_str).collect()),
        ),
        arg("lifetime", Literal::Lifetime(metric.lifetime)),
        arg("disabled", Literal::Bool(metric.disabled)),
    ]
}

/// Arguments specific to the metric's type, in order
///
/// Extra keys and labels are left to the targets, since each places them differently.
#[must_use]
pub fn variant_arguments(metric: &Metric) -> Vec<Argument<'_>> {
    match &metric.metric_type {
        MetricType::CustomDistribution {
            range_min,
            range_max,
            bucket_count,
            histogram_type,
            unit: _,
        } => vec![
            arg("range_min", Literal::Int(*range_min)),
            arg("range_max", Literal::Int(*range_max)),
            arg("bucket_count", Literal::Int(*bucket_count)),
            arg("histogram_type", Literal::HistogramType(*histogram_type)),
        ],
        MetricType::Datetime { time_unit } | MetricType::Timespan { time_unit } | MetricType::TimingDistribution { time_unit } => {
            vec![arg("time_unit", Literal::TimeUnit(*time_unit))]
        }
        MetricType::MemoryDistribution { memory_unit } => vec![arg("memory_unit", Literal::MemoryUnit(*memory_unit))],
        MetricType::Boolean
        | MetricType::Counter
        | MetricType::Event { .. }
        | MetricType::Jwe
        | MetricType::Labeled { .. }
        | MetricType::Quantity { .. }
        | MetricType::String
        | MetricType::StringList
        | MetricType::Uuid => Vec::new(),
    }
}

/// Declared extra keys of an event, in declaration order
#[must_use]
pub fn extra_key_names(metric: &Metric) -> Option<Vec<&str>> {
    match &metric.metric_type {
        MetricType::Event { extra_keys } => Some(extra_keys.keys().collect()),
        _ => None,
    }
}

/// Arguments of a ping, in order
#[must_use]
pub fn ping_arguments(ping: &Ping) -> Vec<Argument<'_>> {
    vec![
        arg("name", Literal::Str(&ping.name)),
        arg("include_client_id", Literal::Bool(ping.include_client_id)),
        arg("send_if_empty", Literal::Bool(ping.send_if_empty)),
        arg("reason_codes", Literal::StrList(ping.reasons.keys().collect())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, ExtraKey, Lifetime, OrderedMap, TimeUnit};

    fn event() -> Metric {
        let mut extra_keys = OrderedMap::new();
        for key in ["alice", "bob", "charlie"] {
            extra_keys
                .try_insert(
                    key.to_string(),
                    ExtraKey {
                        description: format!("{key} key"),
                    },
                )
                .unwrap();
        }

        Metric {
            category: "event".to_string(),
            name: "example".to_string(),
            metric_type: MetricType::Event { extra_keys },
            description: "An event".to_string(),
            bugs: vec!["1".to_string()],
            data_reviews: Vec::new(),
            notification_emails: vec!["nobody@example.com".to_string()],
            expires: Expiry::Never,
            lifetime: Lifetime::Ping,
            send_in_pings: vec!["events".to_string()],
            disabled: false,
            version: 0,
            origin: "events.yaml".to_string(),
        }
    }

    #[test]
    fn test_common_argument_order() {
        let metric = event();
        let names: Vec<_> = common_arguments(&metric).iter().map(|a| a.name).collect();
        assert_eq!(names, ["category", "name", "send_in_pings", "lifetime", "disabled"]);
    }

    #[test]
    fn test_common_argument_values() {
        let metric = event();
        let arguments = common_arguments(&metric);
        assert_eq!(arguments[0].value, Literal::Str("event"));
        assert_eq!(arguments[2].value, Literal::StrList(vec!["events"]));
        assert_eq!(arguments[3].value, Literal::Lifetime(Lifetime::Ping));
        assert_eq!(arguments[4].value, Literal::Bool(false));
    }

    #[test]
    fn test_extra_keys_in_declaration_order() {
        let metric = event();
        assert_eq!(extra_key_names(&metric).unwrap(), ["alice", "bob", "charlie"]);
        assert!(variant_arguments(&metric).is_empty());
    }

    #[test]
    fn test_time_unit_argument() {
        let mut metric = event();
        metric.metric_type = MetricType::Timespan {
            time_unit: TimeUnit::Second,
        };
        assert_eq!(variant_arguments(&metric), [arg("time_unit", Literal::TimeUnit(TimeUnit::Second))]);
        assert!(extra_key_names(&metric).is_none());
    }
}
