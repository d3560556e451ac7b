//! Deferred references between builders
//!
//! A builder that delegates to another one holds a [`LazyBuilder`] instead of
//! the dependency itself: both are created in the same registration pass, so
//! the dependency is looked up by name on first use and cached afterwards.
//! The reference is weak, so it never keeps the component registry alive.

use std::sync::{Arc, OnceLock, Weak};

use super::{FilterBuilder, FilterKey};
use crate::errors::{FilterError, Result};
use crate::registry::ComponentRegistry;

pub struct LazyBuilder {
    components: Weak<ComponentRegistry>,
    key: FilterKey,
    implementation: &'static str,
    resolved: OnceLock<Arc<dyn FilterBuilder>>,
}

impl LazyBuilder {
    /// Reference `implementation`, which must serve `key`
    pub fn new(
        components: &Arc<ComponentRegistry>,
        key: FilterKey,
        implementation: &'static str,
    ) -> Self {
        Self {
            components: Arc::downgrade(components),
            key,
            implementation,
            resolved: OnceLock::new(),
        }
    }

    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    /// Resolve the dependency.
    ///
    /// # Errors
    ///
    /// Returns `RegistryNotInstalled` before installation (or after the
    /// registry was dropped), `ImplementationNotFound` for an unknown name and
    /// `ImplementationKeyMismatch` if the named builder serves another key.
    pub fn get(&self) -> Result<Arc<dyn FilterBuilder>> {
        if let Some(builder) = self.resolved.get() {
            return Ok(builder.clone());
        }
        let components = self
            .components
            .upgrade()
            .ok_or(FilterError::RegistryNotInstalled)?;
        let builder = components
            .get(self.implementation)?
            .ok_or_else(|| FilterError::ImplementationNotFound {
                property: self.key.property().to_string(),
                implementation: self.implementation.to_string(),
                config_key: self.key.override_key(),
            })?;
        if builder.key() != &self.key {
            return Err(FilterError::ImplementationKeyMismatch {
                implementation: self.implementation.to_string(),
                expected: self.key.to_string(),
                actual: builder.key().to_string(),
                config_key: self.key.override_key(),
            });
        }
        Ok(self.resolved.get_or_init(|| builder).clone())
    }
}
