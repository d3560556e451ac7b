//! Filter registry
//!
//! Indexes every installed builder by [`FilterKey`] and resolves exactly one
//! effective builder per key:
//!
//! 1. no builder for the key: the criterion is skipped
//! 2. the lowest `order` is the default; ties go to the first registered
//! 3. the default's override key (`<namespace>.impl`) may name another
//!    installed builder serving the same key
//!
//! The registry is assembled once and read-only afterwards; share it as
//! `Arc<FilterRegistry>`.

pub mod catalog;
pub mod component;

pub use catalog::default_builders;
pub use component::ComponentRegistry;

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::builder::{EntitySource, FilterBuilder, FilterKey};
use crate::config::ConfigurationService;
use crate::errors::{FilterError, Result};
use crate::filter::DataFilter;
use crate::model::EntityType;
use crate::query::{Predicate, QueryScope};
use crate::{log_op_end, log_op_error, log_op_start};

/// Diagnostic view of one registered builder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderDescriptor {
    pub key: FilterKey,
    pub implementation: String,
    pub order: i32,
    /// Selected for its key under the current configuration
    pub effective: bool,
    pub configuration_properties: Vec<String>,
}

pub struct FilterRegistry {
    components: Arc<ComponentRegistry>,
    builders: BTreeMap<FilterKey, Vec<Arc<dyn FilterBuilder>>>,
    config: Arc<dyn ConfigurationService>,
}

impl FilterRegistry {
    /// Index an installed component registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryNotInstalled` if `components` is not installed.
    pub fn new(
        components: Arc<ComponentRegistry>,
        config: Arc<dyn ConfigurationService>,
    ) -> Result<Self> {
        let mut builders: BTreeMap<FilterKey, Vec<Arc<dyn FilterBuilder>>> = BTreeMap::new();
        for builder in components.all()? {
            builders
                .entry(builder.key().clone())
                .or_default()
                .push(builder.clone());
        }
        // stable: equal orders keep registration order
        for candidates in builders.values_mut() {
            candidates.sort_by_key(|b| b.order());
        }
        tracing::debug!(
            builder_count = components.all()?.len(),
            key_count = builders.len(),
            "filter registry assembled"
        );
        Ok(Self {
            components,
            builders,
            config,
        })
    }

    /// Registry over the bundled builder catalog.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateImplementation` if the catalog is inconsistent.
    pub fn with_default_builders(config: Arc<dyn ConfigurationService>) -> Result<Self> {
        let components = Arc::new(ComponentRegistry::new());
        components.install(default_builders(&components, &config))?;
        Self::new(components, config)
    }

    pub fn components(&self) -> &Arc<ComponentRegistry> {
        &self.components
    }

    pub fn config(&self) -> &Arc<dyn ConfigurationService> {
        &self.config
    }

    /// Keys with at least one builder
    pub fn keys(&self) -> impl Iterator<Item = &FilterKey> {
        self.builders.keys()
    }

    /// Effective builder for a key, `None` when nothing is registered.
    ///
    /// # Errors
    ///
    /// Returns `ImplementationNotFound` or `ImplementationKeyMismatch` when the
    /// override key names an unusable implementation.
    pub fn builder(
        &self,
        entity_type: EntityType,
        property: &str,
    ) -> Result<Option<Arc<dyn FilterBuilder>>> {
        self.resolve(&FilterKey::new(entity_type, property))
    }

    fn resolve(&self, key: &FilterKey) -> Result<Option<Arc<dyn FilterBuilder>>> {
        let Some(default) = self.builders.get(key).and_then(|c| c.first()) else {
            return Ok(None);
        };
        let config_key = key.override_key();
        let requested = match self.config.get_value(&config_key) {
            Some(name) => name.trim().to_string(),
            None => return Ok(Some(default.clone())),
        };
        if requested == default.implementation() {
            return Ok(Some(default.clone()));
        }

        let alternate = self
            .components
            .get(&requested)?
            .ok_or_else(|| FilterError::ImplementationNotFound {
                property: key.property().to_string(),
                implementation: requested.clone(),
                config_key: config_key.clone(),
            })?;
        if alternate.key() != key {
            return Err(FilterError::ImplementationKeyMismatch {
                implementation: requested,
                expected: key.to_string(),
                actual: alternate.key().to_string(),
                config_key,
            });
        }
        tracing::info!(
            entity_type = %key.entity_type(),
            property = key.property(),
            implementation = alternate.implementation(),
            config_key = %config_key,
            "filter implementation overridden by configuration"
        );
        Ok(Some(alternate))
    }

    /// One predicate per filter property that has a builder and a constraint
    ///
    /// The predicates are not combined; callers AND them into their query
    /// (or combine them otherwise).
    ///
    /// # Errors
    ///
    /// Returns `EntityTypeMismatch` if the filter targets another entity type,
    /// configuration errors from builder resolution, and any builder error.
    pub fn to_predicates(
        &self,
        scope: &mut QueryScope,
        filter: Option<&DataFilter>,
    ) -> Result<Vec<Predicate>> {
        let Some(filter) = filter else {
            return Ok(Vec::new());
        };
        log_op_start!(
            "to_predicates",
            entity_type = %scope.entity_type(),
            property_count = filter.len()
        );
        let start = std::time::Instant::now();

        let predicates = self.to_predicates_impl(scope, filter).map_err(|e| {
            log_op_error!(
                "to_predicates",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "to_predicates",
            duration_ms = start.elapsed().as_millis() as u64,
            predicate_count = predicates.len()
        );
        Ok(predicates)
    }

    fn to_predicates_impl(
        &self,
        scope: &mut QueryScope,
        filter: &DataFilter,
    ) -> Result<Vec<Predicate>> {
        if filter.entity_type() != scope.entity_type() {
            return Err(FilterError::EntityTypeMismatch {
                filter: filter.entity_type().to_string(),
                scope: scope.entity_type().to_string(),
            });
        }
        let mut predicates = Vec::new();
        for property in filter.keys() {
            let Some(builder) = self.builder(scope.entity_type(), property)? else {
                tracing::debug!(property, "no filter builder registered, skipped");
                continue;
            };
            tracing::debug!(
                property,
                implementation = builder.implementation(),
                "filter builder resolved"
            );
            if let Some(predicate) = builder.predicate(scope, filter)? {
                predicates.push(predicate);
            }
        }
        Ok(predicates)
    }

    /// Resolve ids directly for a filter holding a single property
    ///
    /// An empty filter, or a property nobody serves, selects every row.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for filters with several properties or
    /// builders that need a composed query, and lookup errors from `source`.
    pub fn find(&self, filter: &DataFilter, source: &dyn EntitySource) -> Result<Vec<Uuid>> {
        log_op_start!(
            "find",
            entity_type = %filter.entity_type(),
            property_count = filter.len()
        );
        let start = std::time::Instant::now();

        let ids = self.find_impl(filter, source).map_err(|e| {
            log_op_error!(
                "find",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!("find", duration_ms = start.elapsed().as_millis() as u64);
        Ok(ids)
    }

    fn find_impl(&self, filter: &DataFilter, source: &dyn EntitySource) -> Result<Vec<Uuid>> {
        let properties: Vec<&str> = filter.keys().collect();
        match properties.as_slice() {
            [] => source.all(filter.entity_type()),
            [property] => match self.builder(filter.entity_type(), property)? {
                Some(builder) => builder.find(filter, source),
                None => source.all(filter.entity_type()),
            },
            _ => Err(FilterError::UnsupportedOperation {
                implementation: "direct-lookup".to_string(),
                property: properties.join(","),
            }),
        }
    }

    /// Every registered builder, grouped by key, candidates in resolution order.
    ///
    /// # Errors
    ///
    /// Returns the resolution error of the first key with a broken override.
    pub fn registered_builders(&self) -> Result<Vec<BuilderDescriptor>> {
        let mut descriptors = Vec::new();
        for (key, candidates) in &self.builders {
            let effective = self.resolve(key)?;
            for builder in candidates {
                descriptors.push(BuilderDescriptor {
                    key: key.clone(),
                    implementation: builder.implementation().to_string(),
                    order: builder.order(),
                    effective: effective
                        .as_ref()
                        .is_some_and(|e| e.implementation() == builder.implementation()),
                    configuration_properties: builder
                        .configuration_properties()
                        .iter()
                        .map(|p| p.to_string())
                        .collect(),
                });
            }
        }
        Ok(descriptors)
    }
}
