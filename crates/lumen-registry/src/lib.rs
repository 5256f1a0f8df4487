// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry, discovery, and instance loader.
//!
//! Each category (effects, devices, ...) gets its own [`Registry`] mapping a
//! module-derived name to a [`ComponentType`], and a [`Loader`] that fills the
//! registry through a [`Discovery`] implementation and then creates validated
//! instances by name, tracking them by [`InstanceId`](lumen_core::InstanceId).
//!
//! Types register themselves from a per-module hook:
//!
//! ```
//! use std::sync::Arc;
//! use lumen_registry::{ComponentType, Loader, Registry, StaticDiscovery};
//! use lumen_schema::{Field, FieldType, SchemaFragment};
//!
//! trait Effect: Send + Sync {}
//! struct Rainbow;
//! impl Effect for Rainbow {}
//!
//! fn register(registry: &mut Registry<dyn Effect>) {
//!     registry.register(
//!         ComponentType::<dyn Effect>::new("app::effects::rainbow")
//!             .schema(SchemaFragment::new().field(Field::optional("speed", FieldType::Float).default(1.0)))
//!             .constructor(|_config, _args| Ok(Arc::new(Rainbow)))
//!             .build(),
//!     );
//! }
//!
//! let discovery = StaticDiscovery::new().module("app::effects::rainbow", register);
//! let mut effects: Loader<dyn Effect> =
//!     Loader::open(Registry::new("effects"), discovery, "app::effects", ()).unwrap();
//! effects.create("rainbow", Some(&serde_json::json!({})), None, &[]).unwrap();
//! assert_eq!(effects.len(), 1);
//! ```

pub mod component;
pub mod discovery;
pub mod loader;
pub mod registry;

pub use component::{module_name, ComponentType, Constructor};
pub use discovery::{Discovery, RegisterFn, StaticDiscovery};
pub use loader::Loader;
pub use registry::Registry;
