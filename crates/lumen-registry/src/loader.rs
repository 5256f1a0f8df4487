// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instance loader for one category.
//!
//! The `Loader` hydrates its [`Registry`] by loading every module under the
//! category path, then creates validated instances by name and tracks them by
//! [`InstanceId`] until they are destroyed.

use std::collections::BTreeMap;
use std::sync::Arc;

use lumen_core::{ExtraPolicy, InstanceId, LumenError};
use serde_json::Value;
use tracing::{info, warn};

use crate::component::ComponentType;
use crate::discovery::Discovery;
use crate::registry::Registry;

/// Creates and tracks component instances for one category.
///
/// `X` is the owning application context, handed back through
/// [`Loader::context`].
pub struct Loader<C: ?Sized + 'static, X = ()> {
    category_path: String,
    context: X,
    registry: Registry<C>,
    discovery: Box<dyn Discovery<C>>,
    objects: BTreeMap<InstanceId, Arc<C>>,
    next_id: InstanceId,
    extra: ExtraPolicy,
}

impl<C: ?Sized + 'static, X> Loader<C, X> {
    /// Create a loader without loading any modules yet.
    pub fn new(
        registry: Registry<C>,
        discovery: impl Discovery<C> + 'static,
        category_path: impl Into<String>,
        context: X,
    ) -> Self {
        Self {
            category_path: category_path.into(),
            context,
            registry,
            discovery: Box::new(discovery),
            objects: BTreeMap::new(),
            next_id: InstanceId::FIRST,
            extra: ExtraPolicy::default(),
        }
    }

    /// Create a loader and load every module under `category_path`.
    pub fn open(
        registry: Registry<C>,
        discovery: impl Discovery<C> + 'static,
        category_path: impl Into<String>,
        context: X,
    ) -> Result<Self, LumenError> {
        let mut loader = Self::new(registry, discovery, category_path, context);
        loader.reload()?;
        Ok(loader)
    }

    /// Default extra-key policy used when a type declares none.
    pub fn with_extra_policy(mut self, extra: ExtraPolicy) -> Self {
        self.extra = extra;
        self
    }

    pub fn extra_policy(&self) -> ExtraPolicy {
        self.extra
    }

    pub fn category(&self) -> &str {
        self.registry.category()
    }

    pub fn category_path(&self) -> &str {
        &self.category_path
    }

    pub fn context(&self) -> &X {
        &self.context
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<C> {
        &mut self.registry
    }

    /// Load every module under `category_path`, registering their types.
    ///
    /// The first module that fails aborts the call. Modules loaded earlier
    /// stay registered, and loading a module twice runs its hook twice.
    pub fn load_all(&mut self, category_path: &str) -> Result<Vec<String>, LumenError> {
        let found = self.discovery.discover(category_path)?;
        self.category_path = category_path.to_string();
        info!(
            category = %self.registry.category(),
            path = %category_path,
            modules = ?found,
            "importing modules"
        );
        for module in &found {
            self.discovery.load(module, &mut self.registry)?;
        }
        Ok(found)
    }

    /// Re-run discovery for the current category path.
    ///
    /// Existing registrations are overwritten as modules load again; types
    /// that disappeared stay registered and live instances are untouched.
    pub fn reload(&mut self) -> Result<Vec<String>, LumenError> {
        let path = self.category_path.clone();
        self.load_all(&path)
    }

    pub fn registered_types(&self) -> &BTreeMap<String, Arc<ComponentType<C>>> {
        self.registry.all()
    }

    /// Live instances in ascending id order.
    pub fn instances(&self) -> impl Iterator<Item = &Arc<C>> + '_ {
        self.objects.values()
    }

    /// Ids of live instances, ascending.
    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.objects.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &Arc<C>)> + '_ {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn get(&self, id: InstanceId) -> Option<&Arc<C>> {
        self.objects.get(&id)
    }

    /// Lower bound for the next auto-assigned id. Auto ids never go below
    /// it; ids held by explicitly created instances are skipped.
    pub fn next_id(&self) -> InstanceId {
        self.next_id
    }

    fn free_auto_id(&self) -> InstanceId {
        let mut candidate = self.next_id;
        while self.objects.contains_key(&candidate) {
            candidate = candidate.next();
        }
        candidate
    }

    /// Create an instance of the type registered as `name`.
    ///
    /// `config: None` skips validation and constructs without configuration;
    /// `Some` is validated against the type's composed schema first. Without
    /// an explicit `id` the lowest unused id at or above [`Loader::next_id`] is
    /// used. Nothing changes on failure: no instance is stored and no auto id
    /// is consumed.
    pub fn create(
        &mut self,
        name: &str,
        config: Option<&Value>,
        id: Option<InstanceId>,
        args: &[Value],
    ) -> Result<Arc<C>, LumenError> {
        self.create_entry(name, config, id, args).map(|(_, object)| object)
    }

    /// Like [`Loader::create`], also returning the id the instance was
    /// stored under.
    pub fn create_entry(
        &mut self,
        name: &str,
        config: Option<&Value>,
        id: Option<InstanceId>,
        args: &[Value],
    ) -> Result<(InstanceId, Arc<C>), LumenError> {
        let ty = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| LumenError::ComponentNotFound {
                category: self.registry.category().to_string(),
                name: name.to_string(),
            })?;

        let resolved = id.unwrap_or_else(|| self.free_auto_id());
        if self.objects.contains_key(&resolved) {
            return Err(LumenError::InstanceConflict {
                category: self.registry.category().to_string(),
                id: resolved,
            });
        }

        let construct = ty.constructor_fn().ok_or_else(|| LumenError::NotConstructible {
            category: self.registry.category().to_string(),
            name: name.to_string(),
        })?;

        let validated = match config {
            Some(raw) => Some(ty.composed_schema(true, self.extra).validate(raw)?),
            None => None,
        };

        let object = construct(validated, args)?;

        match id {
            None => self.next_id = resolved.next(),
            Some(explicit) if explicit >= self.next_id => {
                warn!(
                    category = %self.registry.category(),
                    id = %explicit,
                    next_id = %self.next_id,
                    "explicit id is ahead of the auto id counter"
                );
            }
            Some(_) => {}
        }

        self.objects.insert(resolved, Arc::clone(&object));
        info!(category = %self.registry.category(), name = %name, id = %resolved, "created object");
        Ok((resolved, object))
    }

    /// Remove the instance stored under `id` and hand it back.
    ///
    /// No teardown is performed; the caller owns any cleanup.
    pub fn destroy(&mut self, id: InstanceId) -> Result<Arc<C>, LumenError> {
        let object = self
            .objects
            .remove(&id)
            .ok_or_else(|| LumenError::InstanceNotFound {
                category: self.registry.category().to_string(),
                id,
            })?;
        info!(category = %self.registry.category(), id = %id, "destroyed object");
        Ok(object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<C: ?Sized + 'static, X> std::fmt::Debug for Loader<C, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("category_path", &self.category_path)
            .field("registry", &self.registry)
            .field("ids", &self.objects.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .field("extra", &self.extra)
            .finish()
    }
}
