//! Runtime component registry
//!
//! Every builder instance, addressable by its implementation name. Installed
//! exactly once; read-only afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::builder::FilterBuilder;
use crate::errors::{FilterError, Result};

#[derive(Default)]
pub struct ComponentRegistry {
    builders: OnceLock<Vec<Arc<dyn FilterBuilder>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the full builder set, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateImplementation` if two builders share a name and
    /// `InvalidConfiguration` if the registry is already installed.
    pub fn install(&self, builders: Vec<Arc<dyn FilterBuilder>>) -> Result<()> {
        let mut seen = HashSet::new();
        for builder in &builders {
            if !seen.insert(builder.implementation().to_string()) {
                return Err(FilterError::DuplicateImplementation {
                    implementation: builder.implementation().to_string(),
                });
            }
        }
        self.builders
            .set(builders)
            .map_err(|_| FilterError::InvalidConfiguration {
                key: "components".to_string(),
                reason: "component registry is already installed".to_string(),
            })
    }

    pub fn is_installed(&self) -> bool {
        self.builders.get().is_some()
    }

    /// Builder registered under `implementation`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RegistryNotInstalled` before installation.
    pub fn get(&self, implementation: &str) -> Result<Option<Arc<dyn FilterBuilder>>> {
        Ok(self
            .all()?
            .iter()
            .find(|b| b.implementation() == implementation)
            .cloned())
    }

    /// All builders in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryNotInstalled` before installation.
    pub fn all(&self) -> Result<&[Arc<dyn FilterBuilder>]> {
        self.builders
            .get()
            .map(Vec::as_slice)
            .ok_or(FilterError::RegistryNotInstalled)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .builders
            .get()
            .map(|b| b.iter().map(|b| b.implementation()).collect())
            .unwrap_or_default();
        f.debug_struct("ComponentRegistry")
            .field("builders", &names)
            .finish()
    }
}
