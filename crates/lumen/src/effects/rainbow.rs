// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use lumen_core::LumenError;
use lumen_registry::{ComponentType, Registry};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde_json::Value;

use super::{CommonSettings, Effect, BASE};

pub const MODULE: &str = module_path!();

#[derive(Debug)]
pub struct Rainbow {
    common: CommonSettings,
    speed: f64,
    frequency: f64,
}

impl Effect for Rainbow {
    fn kind(&self) -> &'static str {
        "rainbow"
    }

    fn summary(&self) -> String {
        format!(
            "speed={} frequency={} {}",
            self.speed,
            self.frequency,
            self.common.summary()
        )
    }
}

fn build(config: Option<ComponentConfig>, _args: &[Value]) -> Result<Arc<dyn Effect>, LumenError> {
    let Some(config) = config else {
        return Ok(Arc::new(Rainbow {
            common: CommonSettings::default(),
            speed: 1.0,
            frequency: 1.0,
        }));
    };

    let common: CommonSettings = config.deserialize().map_err(|e| LumenError::Construct {
        name: "rainbow".to_string(),
        message: e.to_string(),
    })?;
    Ok(Arc::new(Rainbow {
        common,
        speed: config.get_f64("speed").unwrap_or(1.0),
        frequency: config.get_f64("frequency").unwrap_or(1.0),
    }))
}

pub fn register(registry: &mut Registry<dyn Effect>) {
    registry.register(
        ComponentType::new(MODULE)
            .extends(Arc::clone(&BASE))
            .description("Cycle through the color wheel")
            .schema(
                SchemaFragment::new()
                    .field(
                        Field::optional("speed", FieldType::Float)
                            .default(1.0)
                            .range(0.1, 10.0)
                            .description("Effect speed modifier"),
                    )
                    .field(
                        Field::optional("frequency", FieldType::Float)
                            .default(1.0)
                            .range(0.1, 10.0)
                            .description("Frequency of the effect curve"),
                    ),
            )
            .constructor(build)
            .build(),
    );
}
