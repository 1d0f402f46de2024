use crate::{CompileError, Result};
use camino::Utf8Path;
use chrono::NaiveDate;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Settings that change how definitions are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Accept reserved categories, ping names and target keywords
    #[serde(default)]
    pub allow_reserved: bool,

    /// Treat version expiries at or below this major version as expired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_by_version: Option<u32>,

    /// Treat date expiries before this day as expired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

impl Options {
    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidOptions`] for malformed TOML, unknown keys, or values of the wrong type
    pub fn from_toml_str(text: &str) -> Result<Self, CompileError> {
        toml::from_str(text).map_err(|e| CompileError::InvalidOptions(e.to_string()))
    }

    /// Load options from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold valid options
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
        let options = Self::from_toml_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        Ok(options)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }
}

/// Where generated code lives and where the runtime library is imported from.
///
/// Targets that have no notion of namespaces ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Package or namespace of the generated code
    #[serde(default)]
    pub namespace: Option<String>,

    /// Namespace of the runtime library
    #[serde(default)]
    pub glean_namespace: Option<String>,
}

impl NamespaceConfig {
    #[must_use]
    pub fn namespace_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(default)
    }

    #[must_use]
    pub fn glean_namespace_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.glean_namespace.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let options = Options::from_toml_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_all_keys() {
        let options = Options::from_toml_str("allow_reserved = true\nexpire_by_version = 12\nexpiration_date = \"2030-01-01\"\n").unwrap();
        assert!(options.allow_reserved);
        assert_eq!(options.expire_by_version, Some(12));
        assert_eq!(options.expiration_date, NaiveDate::from_ymd_opt(2030, 1, 1));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Options::from_toml_str("allow_reservd = true").unwrap_err();
        assert!(matches!(err, CompileError::InvalidOptions(_)));
        assert!(err.to_string().contains("allow_reservd"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(Options::from_toml_str("allow_reserved = \"yes\"").is_err());
        assert!(Options::from_toml_str("expire_by_version = -3").is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("glean-codegen.toml")).unwrap();
        Options::save_default(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), Options::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing.toml")).unwrap();
        assert!(Options::load(&path).is_err());
    }

    #[test]
    fn test_namespace_defaults() {
        let config = NamespaceConfig::default();
        assert_eq!(config.namespace_or("GleanMetrics"), "GleanMetrics");

        let config = NamespaceConfig {
            namespace: Some("Foo".to_string()),
            glean_namespace: None,
        };
        assert_eq!(config.namespace_or("GleanMetrics"), "Foo");
        assert_eq!(config.glean_namespace_or("Glean"), "Glean");
    }
}
