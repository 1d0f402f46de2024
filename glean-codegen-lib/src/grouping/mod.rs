//! Partitioning of a validated model into output units.
//!
//! Each category becomes one unit, the internal category becomes the
//! [`INTERNAL_UNIT`], and all pings share the [`PINGS_UNIT`]. Units are returned
//! ordered by identifier; instruments inside a unit keep declaration order.

use crate::CompileError;
use crate::model::{Metric, Model, Ping, VariantTag, identifier};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

const LOG_TARGET: &str = "  grouping";

/// Identifier of the unit holding metrics of the internal category.
pub const INTERNAL_UNIT: &str = "gleanInternalMetrics";

/// Identifier of the unit holding every ping.
pub const PINGS_UNIT: &str = "pings";

/// What a unit was formed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKind {
    Category(String),
    Internal,
    Pings,
}

impl UnitKind {
    /// How the unit's source is named in diagnostics
    fn source_name(&self) -> &str {
        match self {
            Self::Category(category) => category,
            Self::Internal => "",
            Self::Pings => "(pings)",
        }
    }
}

/// A metric or ping, borrowed from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument<'a> {
    Metric(&'a Metric),
    Ping(&'a Ping),
}

impl Instrument<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Metric(metric) => &metric.name,
            Self::Ping(ping) => &ping.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Metric(metric) => &metric.description,
            Self::Ping(ping) => &ping.description,
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::Metric(metric) => &metric.origin,
            Self::Ping(ping) => &ping.origin,
        }
    }

    #[must_use]
    pub const fn variant(&self) -> VariantTag {
        match self {
            Self::Metric(metric) => metric.variant(),
            Self::Ping(_) => VariantTag::Ping,
        }
    }

    /// The name as it appears in generated code
    #[must_use]
    pub fn identifier(&self) -> String {
        identifier::camel(self.name())
    }
}

/// One output grouping, rendered into exactly one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit<'a> {
    pub id: String,
    pub kind: UnitKind,
    pub instruments: Vec<Instrument<'a>>,
}

/// The unit identifier of a category
#[must_use]
pub fn unit_id(category: &str) -> String {
    if category.is_empty() {
        INTERNAL_UNIT.to_string()
    } else {
        identifier::camel(category)
    }
}

/// Partition a model into units
///
/// # Errors
///
/// Returns [`CompileError::UnitCollision`] when two categories, or a category and a
/// reserved unit, map to the same identifier, and [`CompileError::IdentifierCollision`]
/// when two instruments of a unit render under the same name.
pub fn group(model: &Model) -> Result<Vec<Unit<'_>>, CompileError> {
    let mut units: BTreeMap<String, Unit<'_>> = BTreeMap::new();

    for metric in &model.metrics {
        let kind = if metric.category.is_empty() {
            UnitKind::Internal
        } else {
            UnitKind::Category(metric.category.clone())
        };

        unit_for(&mut units, unit_id(&metric.category), kind)?
            .instruments
            .push(Instrument::Metric(metric));
    }

    if !model.pings.is_empty() {
        let unit = unit_for(&mut units, PINGS_UNIT.to_string(), UnitKind::Pings)?;
        unit.instruments.extend(model.pings.iter().map(Instrument::Ping));
    }

    for unit in units.values() {
        check_identifiers(unit)?;
    }

    log::debug!(target: LOG_TARGET, "Formed {} unit(s)", units.len());
    Ok(units.into_values().collect())
}

fn unit_for<'u, 'a>(
    units: &'u mut BTreeMap<String, Unit<'a>>,
    id: String,
    kind: UnitKind,
) -> Result<&'u mut Unit<'a>, CompileError> {
    match units.entry(id) {
        Entry::Occupied(entry) => {
            let unit = entry.into_mut();
            if unit.kind != kind {
                return Err(CompileError::UnitCollision {
                    unit: unit.id.clone(),
                    first: unit.kind.source_name().to_string(),
                    second: kind.source_name().to_string(),
                });
            }
            Ok(unit)
        }
        Entry::Vacant(entry) => {
            let id = entry.key().clone();
            Ok(entry.insert(Unit {
                id,
                kind,
                instruments: Vec::new(),
            }))
        }
    }
}

fn check_identifiers(unit: &Unit<'_>) -> Result<(), CompileError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for instrument in &unit.instruments {
        let identifier = instrument.identifier();
        if let Some(first) = seen.insert(identifier.clone(), instrument.name()) {
            return Err(CompileError::IdentifierCollision {
                unit: unit.id.clone(),
                identifier,
                first: first.to_string(),
                second: instrument.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expiry, Lifetime, MetricType, OrderedMap};

    fn metric(category: &str, name: &str) -> Metric {
        Metric {
            category: category.to_string(),
            name: name.to_string(),
            metric_type: MetricType::Counter,
            description: format!("{name} counter"),
            bugs: vec!["1".to_string()],
            data_reviews: Vec::new(),
            notification_emails: vec!["nobody@example.com".to_string()],
            expires: Expiry::Never,
            lifetime: Lifetime::Ping,
            send_in_pings: vec!["metrics".to_string()],
            disabled: false,
            version: 0,
            origin: "metrics.yaml".to_string(),
        }
    }

    fn ping(name: &str) -> Ping {
        Ping {
            name: name.to_string(),
            description: "A ping".to_string(),
            include_client_id: false,
            send_if_empty: false,
            bugs: Vec::new(),
            data_reviews: Vec::new(),
            notification_emails: Vec::new(),
            reasons: OrderedMap::new(),
            origin: "pings.yaml".to_string(),
        }
    }

    fn ids(units: &[Unit<'_>]) -> Vec<String> {
        units.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn test_three_distinct_units() {
        let model = Model {
            metrics: vec![metric("telemetry", "a"), metric("", "b"), metric("a.b", "c")],
            pings: Vec::new(),
        };

        let units = group(&model).unwrap();
        assert_eq!(ids(&units), ["aB", "gleanInternalMetrics", "telemetry"]);
        assert!(units.iter().all(|u| u.instruments.len() == 1));
        assert_eq!(units[1].kind, UnitKind::Internal);
    }

    #[test]
    fn test_unit_order_ignores_declaration_order() {
        let forward = Model {
            metrics: vec![metric("telemetry", "a"), metric("", "b"), metric("a.b", "c")],
            pings: Vec::new(),
        };
        let backward = Model {
            metrics: vec![metric("a.b", "c"), metric("", "b"), metric("telemetry", "a")],
            pings: Vec::new(),
        };

        assert_eq!(ids(&group(&forward).unwrap()), ids(&group(&backward).unwrap()));
    }

    #[test]
    fn test_instruments_keep_declaration_order() {
        let model = Model {
            metrics: vec![metric("core", "zeta"), metric("other", "x"), metric("core", "alpha")],
            pings: Vec::new(),
        };

        let units = group(&model).unwrap();
        let core: Vec<_> = units[0].instruments.iter().map(Instrument::name).collect();
        assert_eq!(core, ["zeta", "alpha"]);
    }

    #[test]
    fn test_pings_form_one_unit() {
        let model = Model {
            metrics: vec![metric("core", "a")],
            pings: vec![ping("custom"), ping("second")],
        };

        let units = group(&model).unwrap();
        assert_eq!(ids(&units), ["core", "pings"]);
        assert_eq!(units[1].kind, UnitKind::Pings);
        assert_eq!(units[1].instruments.len(), 2);
    }

    #[test]
    fn test_no_pings_no_unit() {
        let model = Model {
            metrics: vec![metric("core", "a")],
            pings: Vec::new(),
        };
        assert_eq!(ids(&group(&model).unwrap()), ["core"]);
    }

    #[test]
    fn test_category_collision() {
        let model = Model {
            metrics: vec![metric("foo.bar", "a"), metric("foo_bar", "b")],
            pings: Vec::new(),
        };

        let err = group(&model).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnitCollision {
                unit: "fooBar".to_string(),
                first: "foo.bar".to_string(),
                second: "foo_bar".to_string(),
            }
        );
    }

    #[test]
    fn test_collision_with_reserved_units() {
        let internal = Model {
            metrics: vec![metric("", "a"), metric("glean.internal_metrics", "b")],
            pings: Vec::new(),
        };
        assert!(matches!(group(&internal), Err(CompileError::UnitCollision { .. })));

        let pings = Model {
            metrics: vec![metric("pings", "a")],
            pings: vec![ping("custom")],
        };
        assert!(matches!(group(&pings), Err(CompileError::UnitCollision { .. })));
    }

    #[test]
    fn test_identifier_collision_within_unit() {
        let model = Model {
            metrics: vec![metric("core", "foo_bar"), metric("core", "fooBar")],
            pings: Vec::new(),
        };

        assert!(matches!(group(&model), Err(CompileError::IdentifierCollision { .. })));
    }
}
