// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-category catalog of component types.
//!
//! The `Registry` maps a component's module-derived name to its
//! [`ComponentType`]. Registration happens from module registration hooks run
//! by a [`Discovery`](crate::Discovery) implementation; a later registration
//! under the same name replaces the earlier one.

use std::collections::BTreeMap;
use std::sync::Arc;

use lumen_core::{ExtraPolicy, LumenError};
use lumen_schema::Schema;
use tracing::debug;

use crate::component::ComponentType;

/// Name-to-type catalog for one category (e.g. all effects).
pub struct Registry<C: ?Sized + 'static> {
    category: String,
    entries: BTreeMap<String, Arc<ComponentType<C>>>,
}

impl<C: ?Sized + 'static> Registry<C> {
    /// Create an empty registry for `category`.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Register a type under its module-derived name.
    ///
    /// Returns the type previously registered under that name, if any.
    pub fn register(&mut self, ty: Arc<ComponentType<C>>) -> Option<Arc<ComponentType<C>>> {
        let name = ty.name().to_string();
        let previous = self.entries.insert(name.clone(), ty);
        if previous.is_some() {
            debug!(category = %self.category, name = %name, "replaced registered component type");
        } else {
            debug!(category = %self.category, name = %name, "registered component type");
        }
        previous
    }

    /// Remove the entry registered under `ty`'s name.
    ///
    /// Used for abstract bases that should not be creatable by name.
    pub fn exclude(&mut self, ty: &ComponentType<C>) -> Result<Arc<ComponentType<C>>, LumenError> {
        self.exclude_name(ty.name())
    }

    pub fn exclude_name(&mut self, name: &str) -> Result<Arc<ComponentType<C>>, LumenError> {
        let removed = self
            .entries
            .remove(name)
            .ok_or_else(|| LumenError::ComponentNotFound {
                category: self.category.clone(),
                name: name.to_string(),
            })?;
        debug!(category = %self.category, name = %name, "excluded component type");
        Ok(removed)
    }

    /// Every registered type, keyed by name.
    pub fn all(&self) -> &BTreeMap<String, Arc<ComponentType<C>>> {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ComponentType<C>>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Composed validator for the type registered under `name`.
    pub fn schema(&self, name: &str, extended: bool, extra: ExtraPolicy) -> Result<Schema, LumenError> {
        let ty = self.get(name).ok_or_else(|| LumenError::ComponentNotFound {
            category: self.category.clone(),
            name: name.to_string(),
        })?;
        Ok(ty.composed_schema(extended, extra))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: ?Sized + 'static> std::fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("category", &self.category)
            .field("names", &self.names())
            .finish()
    }
}
