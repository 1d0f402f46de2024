//! The validated instrument model and the rules that produce it.

mod builder;
mod error;
mod expiry;
pub mod identifier;
mod metric;
mod node;
mod ordered;
mod ping;
pub mod registry;
mod units;
mod variant;

pub use builder::{
    INTERNAL_CATEGORY_SOURCE, METRICS_SCHEMA, Model, ModelBuilder, PINGS_SCHEMA, SourceDocument, build_model,
};
pub use error::{Location, SchemaError, UnknownTypeError, UnsupportedVariantForTargetError};
pub use expiry::Expiry;
pub use metric::{ExtraKey, LabeledKind, Metric, MetricType};
pub use node::Node;
pub use ordered::OrderedMap;
pub use ping::{Ping, RESERVED_PING_NAMES};
pub use registry::{VariantDescriptor, resolve};
pub use units::{HistogramType, Lifetime, MemoryUnit, TimeUnit};
pub use variant::{Attribute, VariantTag};
