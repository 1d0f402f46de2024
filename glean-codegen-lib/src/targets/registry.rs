use super::{JavaScript, Kotlin, Swift, Target};
use crate::{CompileError, NamespaceConfig};

/// Builds a target for a namespace configuration.
pub type TargetFactory = fn(&NamespaceConfig) -> Box<dyn Target>;

/// The targets available to a translation, by name.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    factories: Vec<(&'static str, TargetFactory)>,
}

impl TargetRegistry {
    /// A registry with no targets
    #[must_use]
    pub const fn empty() -> Self {
        Self { factories: Vec::new() }
    }

    /// A registry holding the `javascript`, `kotlin` and `swift` targets
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("javascript", |_| Box::new(JavaScript::new()));
        registry.register("kotlin", |config| Box::new(Kotlin::new(config)));
        registry.register("swift", |config| Box::new(Swift::new(config)));
        registry
    }

    /// Add a target, replacing any existing target of the same name
    pub fn register(&mut self, name: &'static str, factory: TargetFactory) {
        if let Some(entry) = self.factories.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = factory;
        } else {
            self.factories.push((name, factory));
        }
    }

    /// Registered target names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate a target by name
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownTarget`] if no target of that name is registered
    pub fn create(&self, name: &str, config: &NamespaceConfig) -> Result<Box<dyn Target>, CompileError> {
        self.factories
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factory)| factory(config))
            .ok_or_else(|| CompileError::UnknownTarget {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_targets() {
        let registry = TargetRegistry::builtin();
        assert_eq!(registry.names(), ["javascript", "kotlin", "swift"]);

        for name in registry.names() {
            let target = registry.create(name, &NamespaceConfig::default()).unwrap();
            assert_eq!(target.name(), name);
        }
    }

    #[test]
    fn test_unknown_target() {
        let Err(err) = TargetRegistry::builtin().create("cobol", &NamespaceConfig::default()) else {
            panic!("expected an error");
        };
        insta::assert_snapshot!(err.to_string(), @"unknown target 'cobol', expected one of: javascript, kotlin, swift");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = TargetRegistry::empty();
        registry.register("kotlin", |_| Box::new(JavaScript::new()));
        registry.register("kotlin", |config| Box::new(Kotlin::new(config)));
        assert_eq!(registry.names(), ["kotlin"]);
        assert_eq!(registry.create("kotlin", &NamespaceConfig::default()).unwrap().name(), "kotlin");
    }
}
