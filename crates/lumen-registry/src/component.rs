// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component type descriptors.
//!
//! A [`ComponentType`] stands in for an implementation class: it carries the
//! name derived from its defining module, the schema fragment it declares for
//! itself, an optional parent type, and a constructor. Types without a
//! constructor are abstract bases that exist only to contribute schema
//! fragments to their descendants.

use std::sync::Arc;

use lumen_core::{ExtraPolicy, LumenError};
use lumen_schema::{compose, ComponentConfig, DeclaresSchema, Lineage, Schema, SchemaFragment};
use serde_json::Value;

/// Builds an instance from (optionally validated) configuration and extra
/// positional arguments.
pub type Constructor<C> =
    Arc<dyn Fn(Option<ComponentConfig>, &[Value]) -> Result<Arc<C>, LumenError> + Send + Sync>;

/// Descriptor of one component implementation within a category.
pub struct ComponentType<C: ?Sized + 'static> {
    name: String,
    module_path: String,
    description: Option<String>,
    parent: Option<Arc<ComponentType<C>>>,
    schema: Option<SchemaFragment>,
    extra: Option<ExtraPolicy>,
    constructor: Option<Constructor<C>>,
}

impl<C: ?Sized + 'static> ComponentType<C> {
    /// Declares a type defined in `module_path` (usually `module_path!()`).
    ///
    /// The registration name is the last segment of the path, so
    /// `app::effects::rainbow` registers as `rainbow`.
    pub fn new(module_path: &str) -> Self {
        Self {
            name: module_name(module_path).to_string(),
            module_path: module_path.to_string(),
            description: None,
            parent: None,
            schema: None,
            extra: None,
            constructor: None,
        }
    }

    /// Sets the parent type whose schema this type extends.
    pub fn extends(mut self, parent: Arc<ComponentType<C>>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The fields this type declares for itself.
    pub fn schema(mut self, fragment: SchemaFragment) -> Self {
        self.schema = Some(fragment);
        self
    }

    /// Overrides the extra-key policy for this type and its descendants.
    pub fn extra_policy(mut self, policy: ExtraPolicy) -> Self {
        self.extra = Some(policy);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ComponentConfig>, &[Value]) -> Result<Arc<C>, LumenError>
            + Send
            + Sync
            + 'static,
    {
        self.constructor = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent_type(&self) -> Option<&Arc<ComponentType<C>>> {
        self.parent.as_ref()
    }

    /// True when the type has no constructor.
    pub fn is_abstract(&self) -> bool {
        self.constructor.is_none()
    }

    pub(crate) fn constructor_fn(&self) -> Option<&Constructor<C>> {
        self.constructor.as_ref()
    }

    /// Composed validator for this type (see [`lumen_schema::compose`]).
    pub fn composed_schema(&self, extended: bool, extra: ExtraPolicy) -> Schema {
        compose(self, extended, extra)
    }
}

impl<C: ?Sized + 'static> Lineage for ComponentType<C> {
    fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }
}

impl<C: ?Sized + 'static> DeclaresSchema for ComponentType<C> {
    fn own_schema(&self) -> Option<&SchemaFragment> {
        self.schema.as_ref()
    }

    fn own_extra_policy(&self) -> Option<&ExtraPolicy> {
        self.extra.as_ref()
    }
}

impl<C: ?Sized + 'static> std::fmt::Debug for ComponentType<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.name)
            .field("module_path", &self.module_path)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("schema", &self.schema)
            .field("extra", &self.extra)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

/// Terminal segment of a module path, accepting `::` or `.` separators.
pub fn module_name(path: &str) -> &str {
    let tail = path.rsplit("::").next().unwrap_or(path);
    tail.rsplit('.').next().unwrap_or(tail)
}
