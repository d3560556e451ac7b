//! Configuration lookup
//!
//! Builders and the registry read flat dotted keys through
//! [`ConfigurationService`]. [`PropertiesConfiguration`] is the bundled
//! implementation. It is loaded through the `config` crate from a TOML
//! document, then overridden from `IDMQ_`-prefixed environment variables;
//! nested tables are read back as dotted keys. Keys are case-insensitive so
//! that environment variable names can address camel-cased filter properties.

use std::collections::BTreeMap;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Map, ValueKind};

use crate::errors::{FilterError, Result};

/// Environment variable prefix; `__` separates key segments
pub const ENV_PREFIX: &str = "IDMQ";

/// Read-only key/value configuration
pub trait ConfigurationService: Send + Sync {
    /// Value for `key`; blank values read as absent
    fn get_value(&self, key: &str) -> Option<String>;

    fn get_value_or(&self, key: &str, default: &str) -> String {
        self.get_value(key).unwrap_or_else(|| default.to_string())
    }

    /// Read a boolean setting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the value is neither `true` nor `false`.
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(FilterError::InvalidConfiguration {
                    key: key.to_string(),
                    reason: format!("expected a boolean, found '{}'", value),
                }),
            },
        }
    }
}

/// Ordered in-memory key → value configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesConfiguration {
    values: BTreeMap<String, String>,
}

impl PropertiesConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values.insert(normalize(key.as_ref()), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the document is not valid TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut properties = Self::new();
        properties.merge(
            Config::builder().add_source(File::from_str(source, FileFormat::Toml)),
            "<document>",
        )?;
        Ok(properties)
    }

    /// Load an optional TOML file, then overlay `IDMQ_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut properties = Self::new();
        if let Some(path) = path {
            let file = File::from(path).format(FileFormat::Toml);
            properties.merge(
                Config::builder().add_source(file),
                &path.display().to_string(),
            )?;
        }
        // own layer so a variable replaces a file key differing only in case
        properties.merge(Config::builder().add_source(env), "<environment>")?;
        Ok(properties)
    }

    fn merge(&mut self, builder: ConfigBuilder<DefaultState>, origin: &str) -> Result<()> {
        let loaded = builder
            .build()
            .and_then(|c| c.try_deserialize::<Map<String, config::Value>>())
            .map_err(|e| FilterError::InvalidConfiguration {
                key: origin.to_string(),
                reason: e.to_string(),
            })?;
        for (key, value) in loaded {
            self.insert_value(key, value);
        }
        Ok(())
    }

    /// Record `value` under `key`, descending into tables as dotted keys
    fn insert_value(&mut self, key: String, value: config::Value) {
        match value.kind {
            ValueKind::Table(table) => {
                for (nested, value) in table {
                    self.insert_value(format!("{}.{}", key, nested), value);
                }
            }
            ValueKind::Array(items) => {
                let rendered: Vec<String> = items
                    .into_iter()
                    .filter_map(|v| v.into_string().ok())
                    .collect();
                self.set(key, rendered.join(","));
            }
            ValueKind::Nil => {}
            _ => {
                if let Ok(text) = value.into_string() {
                    self.set(key, text);
                }
            }
        }
    }
}

impl ConfigurationService for PropertiesConfiguration {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values
            .get(&normalize(key))
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// `IDMQ_A__B_C=v` sets `a.b_c = v`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
