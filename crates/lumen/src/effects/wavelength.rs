// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use lumen_core::LumenError;
use lumen_registry::{ComponentType, Registry};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde_json::Value;

use super::gradient::GRADIENT;
use super::Effect;

pub const MODULE: &str = module_path!();

#[derive(Debug)]
pub struct Wavelength {
    gradient: String,
    roll: i64,
    bands: i64,
}

impl Effect for Wavelength {
    fn kind(&self) -> &'static str {
        "wavelength"
    }

    fn summary(&self) -> String {
        format!(
            "gradient={} roll={} bands={}",
            self.gradient, self.roll, self.bands
        )
    }
}

fn build(config: Option<ComponentConfig>, _args: &[Value]) -> Result<Arc<dyn Effect>, LumenError> {
    let config = config.unwrap_or_default();
    Ok(Arc::new(Wavelength {
        gradient: config.get_str("gradient_name").unwrap_or("Spectral").to_string(),
        roll: config.get_i64("gradient_roll").unwrap_or(0),
        bands: config.get_i64("bands").unwrap_or(8),
    }))
}

pub fn register(registry: &mut Registry<dyn Effect>) {
    registry.register(
        ComponentType::new(MODULE)
            .extends(Arc::clone(&GRADIENT))
            .description("Map frequency bands onto a gradient")
            .schema(
                SchemaFragment::new().field(
                    Field::optional("bands", FieldType::Int)
                        .default(8)
                        .range(1.0, 64.0),
                ),
            )
            .constructor(build)
            .build(),
    );
}
