// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration schemas for Lumen components.
//!
//! Each component type declares a [`SchemaFragment`] for the fields it adds.
//! [`compose`] walks the type's lineage from root to leaf, merging fragments
//! so that derived declarations override base ones, and returns a [`Schema`]
//! that validates and normalizes configuration mappings.

pub mod compose;
pub mod config;
pub mod field;
pub mod lineage;
pub mod schema;

pub use compose::{compose, DeclaresSchema};
pub use config::ComponentConfig;
pub use field::{Field, FieldType, Range, SchemaFragment};
pub use lineage::Lineage;
pub use schema::Schema;
