// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abstract base for effects driven by a color gradient.

use std::sync::{Arc, LazyLock};

use lumen_registry::{ComponentType, Registry};
use lumen_schema::{Field, FieldType, SchemaFragment};

use super::{Effect, BASE};

pub const MODULE: &str = module_path!();

pub const GRADIENTS: &[&str] = &["Spectral", "Rainbow", "Dancefloor", "Ocean", "Sunset"];

pub static GRADIENT: LazyLock<Arc<ComponentType<dyn Effect>>> = LazyLock::new(|| {
    ComponentType::new(MODULE)
        .extends(Arc::clone(&BASE))
        .description("Base for gradient effects")
        .schema(
            SchemaFragment::new()
                .field(
                    Field::optional("gradient_name", FieldType::String)
                        .default("Spectral")
                        .one_of(GRADIENTS.iter().copied()),
                )
                .field(
                    Field::optional("gradient_roll", FieldType::Int)
                        .default(0)
                        .range(0.0, 10.0)
                        .description("Amount to shift the gradient"),
                ),
        )
        .build()
});

/// Registers and then excludes the base, so it is never creatable by name.
pub fn register(registry: &mut Registry<dyn Effect>) {
    registry.register(Arc::clone(&GRADIENT));
    if let Err(err) = registry.exclude(&GRADIENT) {
        tracing::warn!(error = %err, "gradient base was not registered");
    }
}
