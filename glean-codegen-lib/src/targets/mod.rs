//! Target generators.
//!
//! A [`Target`] maps variants to qualified class names, abstract values to
//! literal syntax, and instruments to constructor calls. The shared
//! [`Target::render_unit`] turns a whole unit into a [`Document`].

mod args;
mod javascript;
mod kotlin;
mod registry;
mod swift;

pub use args::{Argument, common_arguments, extra_key_names, ping_arguments, variant_arguments};
pub use javascript::JavaScript;
pub use kotlin::Kotlin;
pub use registry::{TargetFactory, TargetRegistry};
pub use swift::Swift;

use crate::grouping::{Instrument, Unit};
use crate::model::{
    HistogramType, Lifetime, MemoryUnit, TimeUnit, UnknownTypeError, UnsupportedVariantForTargetError, VariantTag, resolve,
};
use crate::render::{self, Document, Layout, RenderedEntry};
use core::fmt;
use thiserror::Error;

/// A possibly generic type name together with the namespace it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace: String,
    name: &'static str,
    argument: Option<Box<Self>>,
}

impl QualifiedName {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: &'static str) -> Self {
        Self {
            namespace: namespace.into(),
            name,
            argument: None,
        }
    }

    /// Apply a single type argument, as in `LabeledMetricType<CounterMetricType>`
    #[must_use]
    pub fn with_argument(mut self, argument: Self) -> Self {
        self.argument = Some(Box::new(argument));
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name without namespaces, for code that imports it
    #[must_use]
    pub fn simple(&self) -> String {
        match &self.argument {
            Some(argument) => format!("{}<{}>", self.name, argument.simple()),
            None => self.name.to_string(),
        }
    }

    /// Fully qualified paths of every type mentioned, outermost first
    #[must_use]
    pub fn imports(&self) -> Vec<String> {
        let mut imports = vec![qualify(&self.namespace, self.name)];
        if let Some(argument) = &self.argument {
            imports.extend(argument.imports());
        }
        imports
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&qualify(&self.namespace, self.name))?;
        if let Some(argument) = &self.argument {
            write!(f, "<{argument}>")?;
        }
        Ok(())
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// An abstract value to be written in a target's literal syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal<'a> {
    Bool(bool),
    Int(i64),
    Str(&'a str),
    Lifetime(Lifetime),
    TimeUnit(TimeUnit),
    MemoryUnit(MemoryUnit),
    HistogramType(HistogramType),

    /// Ordered list of strings
    StrList(Vec<&'a str>),

    /// Strings with set semantics, still rendered in the given order
    StrSet(Vec<&'a str>),
}

/// Why a `type` tag has no class name in a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassNameError {
    #[error(transparent)]
    Unknown(#[from] UnknownTypeError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedVariantForTargetError),
}

/// A code generator for one target language.
pub trait Target: Send + Sync {
    /// Identifier used to select the target
    fn name(&self) -> &'static str;

    /// Class name of a variant
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedVariantForTargetError`] if the target cannot express the variant
    fn class_name_for(&self, tag: VariantTag) -> Result<QualifiedName, UnsupportedVariantForTargetError>;

    /// Class name of a `type` tag
    ///
    /// # Errors
    ///
    /// Fails for tags that are not registered and for variants the target cannot express
    fn class_name(&self, tag: &str) -> Result<QualifiedName, ClassNameError> {
        let descriptor = resolve(tag)?;
        Ok(self.class_name_for(descriptor.tag)?)
    }

    fn literal(&self, literal: &Literal<'_>) -> String;

    /// Constructor call with its ordered arguments
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedVariantForTargetError`] if the target cannot express the instrument's variant
    fn instrument_call(&self, instrument: &Instrument<'_>) -> Result<String, UnsupportedVariantForTargetError>;

    /// Words that generated identifiers must not collide with
    fn reserved_words(&self) -> &'static [&'static str];

    fn file_name(&self, unit: &Unit<'_>) -> String;

    /// Surroundings of the entries of a unit's document
    fn layout(&self, unit: &Unit<'_>) -> Layout;

    /// The declaration of one instrument inside its unit
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedVariantForTargetError`] if the target cannot express the instrument's variant
    fn entry(&self, instrument: &Instrument<'_>) -> Result<RenderedEntry, UnsupportedVariantForTargetError>;

    /// Render a whole unit
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedVariantForTargetError`] if any instrument cannot be expressed
    fn render_unit(&self, unit: &Unit<'_>) -> Result<Document, UnsupportedVariantForTargetError> {
        let entries = unit
            .instruments
            .iter()
            .map(|instrument| self.entry(instrument))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            file_name: self.file_name(unit),
            contents: render::render(&self.layout(unit), &entries),
        })
    }
}

/// `name = value` pairs joined for a call, one per line
fn argument_lines(arguments: &[(String, String)], assign: &str, indent: &str) -> String {
    arguments
        .iter()
        .map(|(name, value)| format!("{indent}{name}{assign}{value}"))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// The `Generated from` reference of an instrument
fn origin_of(instrument: &Instrument<'_>) -> String {
    match instrument {
        Instrument::Metric(metric) => metric.identifier(),
        Instrument::Ping(ping) => ping.name.clone(),
    }
}
