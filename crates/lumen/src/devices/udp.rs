// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw UDP pixel stream.

use std::sync::Arc;

use lumen_core::LumenError;
use lumen_registry::{ComponentType, Registry};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde_json::Value;

use super::{tags, Device, DeviceSettings, BASE};

pub const MODULE: &str = module_path!();

pub const DEFAULT_PORT: i64 = 21324;

#[derive(Debug)]
pub struct Udp {
    settings: DeviceSettings,
    ip_address: String,
    port: i64,
    tags: Vec<String>,
}

impl Device for Udp {
    fn kind(&self) -> &'static str {
        "udp"
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
        let mut line = format!(
            "{} -> {}:{} ({} px @ {} fps)",
            self.settings.name,
            self.ip_address,
            self.port,
            self.settings.pixel_count,
            self.settings.refresh_rate
        );
        if !self.tags.is_empty() {
            line.push_str(&format!(" [{}]", self.tags.join(", ")));
        }
        line
    }
}

fn build(config: Option<ComponentConfig>, args: &[Value]) -> Result<Arc<dyn Device>, LumenError> {
    let settings = DeviceSettings::from_config("udp", config.as_ref())?;
    let config = config.unwrap_or_default();
    Ok(Arc::new(Udp {
        settings,
        ip_address: config.get_str("ip_address").unwrap_or_default().to_string(),
        port: config.get_i64("port").unwrap_or(DEFAULT_PORT),
        tags: tags(args),
    }))
}

pub fn register(registry: &mut Registry<dyn Device>) {
    registry.register(
        ComponentType::new(MODULE)
            .extends(Arc::clone(&BASE))
            .description("Generic UDP pixel stream")
            .schema(
                SchemaFragment::new()
                    .field(Field::required("ip_address", FieldType::String))
                    .field(
                        Field::optional("port", FieldType::Int)
                            .default(DEFAULT_PORT)
                            .range(1.0, 65535.0),
                    ),
            )
            .constructor(build)
            .build(),
    );
}
