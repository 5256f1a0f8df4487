// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module discovery for a category.
//!
//! A [`Discovery`] enumerates the implementation modules under a category path
//! and loads them. Loading a module runs its registration hook, which is how
//! component types end up in the [`Registry`].

use std::collections::{BTreeMap, BTreeSet};

use lumen_core::LumenError;

use crate::registry::Registry;

/// A module's registration hook: registers (and possibly excludes) the
/// component types the module defines.
pub type RegisterFn<C> = fn(&mut Registry<C>);

/// Locates and loads implementation modules.
pub trait Discovery<C: ?Sized + 'static>: Send + Sync {
    /// Every direct sub-module of `category_path`, in a stable order.
    fn discover(&self, category_path: &str) -> Result<Vec<String>, LumenError>;

    /// Load one module, registering the types it defines into `registry`.
    fn load(&self, module: &str, registry: &mut Registry<C>) -> Result<(), LumenError>;
}

/// Discovery over a table of modules compiled into the binary.
///
/// Module paths use `::` separators. A path is discoverable as a category
/// root when at least one module lives beneath it.
pub struct StaticDiscovery<C: ?Sized + 'static> {
    modules: BTreeMap<String, RegisterFn<C>>,
    packages: BTreeSet<String>,
}

impl<C: ?Sized + 'static> StaticDiscovery<C> {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
            packages: BTreeSet::new(),
        }
    }

    /// Add a module and its registration hook.
    pub fn module(mut self, path: &str, hook: RegisterFn<C>) -> Self {
        self.add(path, hook);
        self
    }

    pub fn add(&mut self, path: &str, hook: RegisterFn<C>) {
        let mut prefix = path;
        while let Some((parent, _)) = prefix.rsplit_once("::") {
            self.packages.insert(parent.to_string());
            prefix = parent;
        }
        self.modules.insert(path.to_string(), hook);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<C: ?Sized + 'static> Default for StaticDiscovery<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> Discovery<C> for StaticDiscovery<C> {
    fn discover(&self, category_path: &str) -> Result<Vec<String>, LumenError> {
        if !self.packages.contains(category_path) {
            return Err(LumenError::Discovery {
                category: category_path.to_string(),
                message: "no modules found under this path".to_string(),
            });
        }

        let prefix = format!("{category_path}::");
        let found = self
            .modules
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix).map(|rest| (path, rest)))
            .filter(|(_, rest)| !rest.contains("::"))
            .map(|(path, _)| path.clone())
            .collect();
        Ok(found)
    }

    fn load(&self, module: &str, registry: &mut Registry<C>) -> Result<(), LumenError> {
        let hook = self.modules.get(module).ok_or_else(|| LumenError::Discovery {
            category: registry.category().to_string(),
            message: format!("no module named `{module}`"),
        })?;
        hook(registry);
        Ok(())
    }
}
