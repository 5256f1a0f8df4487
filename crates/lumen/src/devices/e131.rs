// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sACN (E1.31) output.

use std::sync::Arc;

use lumen_core::LumenError;
use lumen_registry::{ComponentType, Registry};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde_json::Value;

use super::{Device, DeviceSettings, BASE};

pub const MODULE: &str = module_path!();

/// DMX channels per universe, three per pixel.
const CHANNELS_PER_UNIVERSE: u64 = 510;

#[derive(Debug)]
pub struct E131 {
    settings: DeviceSettings,
    host: String,
    universe: u64,
    universe_size: u64,
}

impl E131 {
    /// Universes needed to address every pixel.
    pub fn universe_span(&self) -> u64 {
        let channels = (self.settings.pixel_count as u64).saturating_mul(3);
        channels.div_ceil(self.universe_size.max(1))
    }
}

impl Device for E131 {
    fn kind(&self) -> &'static str {
        "e131"
    }

    fn name(&self) -> &str {
        &self.settings.name
    }

    fn pixel_count(&self) -> usize {
        self.settings.pixel_count
    }

    fn max_brightness(&self) -> f64 {
        self.settings.max_brightness
    }

    fn summary(&self) -> String {
        format!(
            "{} -> {} universes {}..{}",
            self.settings.name,
            self.host,
            self.universe,
            self.universe
                .saturating_add(self.universe_span())
                .saturating_sub(1)
        )
    }
}

fn build(config: Option<ComponentConfig>, _args: &[Value]) -> Result<Arc<dyn Device>, LumenError> {
    let settings = DeviceSettings::from_config("e131", config.as_ref())?;
    let config = config.unwrap_or_default();
    Ok(Arc::new(E131 {
        settings,
        host: config.get_str("host").unwrap_or_default().to_string(),
        universe: config
            .get_i64("universe")
            .and_then(|u| u64::try_from(u).ok())
            .unwrap_or(1),
        universe_size: config
            .get_i64("universe_size")
            .and_then(|u| u64::try_from(u).ok())
            .unwrap_or(CHANNELS_PER_UNIVERSE),
    }))
}

pub fn register(registry: &mut Registry<dyn Device>) {
    registry.register(
        ComponentType::new(MODULE)
            .extends(Arc::clone(&BASE))
            .description("Streaming ACN (E1.31) controller")
            .schema(
                SchemaFragment::new()
                    .field(Field::required("host", FieldType::String))
                    .field(
                        Field::optional("universe", FieldType::Int)
                            .default(1)
                            .range(1.0, 63999.0),
                    )
                    .field(
                        Field::optional("universe_size", FieldType::Int)
                            .default(CHANNELS_PER_UNIVERSE)
                            .range(1.0, 512.0),
                    ),
            )
            .constructor(build)
            .build(),
    );
}
