// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in effects.
//!
//! Every effect extends [`BASE`], which declares the fields shared by all
//! effects. `gradient` is an abstract intermediate base and is excluded from
//! the registry when its module loads.

use std::sync::{Arc, LazyLock};

use lumen_registry::{ComponentType, StaticDiscovery};
use lumen_schema::{Field, FieldType, SchemaFragment};

pub mod gradient;
pub mod rainbow;
pub mod singlecolor;
pub mod wavelength;

/// Discovery root for effect modules.
pub const PATH: &str = module_path!();

/// A running effect instance.
pub trait Effect: Send + Sync + std::fmt::Debug {
    /// Registered type name.
    fn kind(&self) -> &'static str;

    /// One-line description of the effective settings.
    fn summary(&self) -> String;
}

/// Settings every effect understands.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommonSettings {
    pub blur: f64,
    pub flip: bool,
    pub mirror: bool,
    pub brightness: f64,
}

impl CommonSettings {
    pub fn summary(&self) -> String {
        format!(
            "blur={} flip={} mirror={} brightness={}",
            self.blur, self.flip, self.mirror, self.brightness
        )
    }
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            blur: 0.0,
            flip: false,
            mirror: false,
            brightness: 1.0,
        }
    }
}

pub static BASE: LazyLock<Arc<ComponentType<dyn Effect>>> = LazyLock::new(|| {
    ComponentType::new(concat!(module_path!(), "::effect"))
        .description("Base effect")
        .schema(
            SchemaFragment::new()
                .field(
                    Field::optional("blur", FieldType::Float)
                        .default(0.0)
                        .range(0.0, 10.0)
                        .description("Amount to blur the effect"),
                )
                .field(
                    Field::optional("flip", FieldType::Bool)
                        .default(false)
                        .description("Flip the effect"),
                )
                .field(
                    Field::optional("mirror", FieldType::Bool)
                        .default(false)
                        .description("Mirror the effect"),
                )
                .field(
                    Field::optional("brightness", FieldType::Float)
                        .default(1.0)
                        .range(0.0, 1.0)
                        .coerce(),
                ),
        )
        .build()
});

/// Every built-in effect module and its registration hook.
pub fn discovery() -> StaticDiscovery<dyn Effect> {
    StaticDiscovery::new()
        .module(gradient::MODULE, gradient::register)
        .module(rainbow::MODULE, rainbow::register)
        .module(singlecolor::MODULE, singlecolor::register)
        .module(wavelength::MODULE, wavelength::register)
}
