// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use lumen_core::LumenError;
use lumen_registry::{ComponentType, Registry};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde::Deserialize;
use serde_json::Value;

use super::{CommonSettings, Effect, BASE};

pub const MODULE: &str = module_path!();

pub const COLORS: &[&str] = &["red", "orange", "yellow", "green", "blue", "purple", "white"];

#[derive(Debug, Deserialize)]
struct Settings {
    color: String,
    #[serde(flatten)]
    common: CommonSettings,
}

#[derive(Debug)]
pub struct SingleColor {
    settings: Settings,
}

impl Effect for SingleColor {
    fn kind(&self) -> &'static str {
        "singlecolor"
    }

    fn summary(&self) -> String {
        format!("color={} {}", self.settings.color, self.settings.common.summary())
    }
}

fn build(config: Option<ComponentConfig>, _args: &[Value]) -> Result<Arc<dyn Effect>, LumenError> {
    let config = config.ok_or_else(|| LumenError::Construct {
        name: "singlecolor".to_string(),
        message: "a color configuration is required".to_string(),
    })?;
    let settings = config.deserialize().map_err(|e| LumenError::Construct {
        name: "singlecolor".to_string(),
        message: e.to_string(),
    })?;
    Ok(Arc::new(SingleColor { settings }))
}

pub fn register(registry: &mut Registry<dyn Effect>) {
    registry.register(
        ComponentType::new(MODULE)
            .extends(Arc::clone(&BASE))
            .description("Fill every pixel with one color")
            .schema(
                SchemaFragment::new()
                    .field(
                        Field::optional("color", FieldType::String)
                            .default("red")
                            .one_of(COLORS.iter().copied()),
                    )
                    // No blur for a solid fill.
                    .field(Field::optional("blur", FieldType::Float).default(0.0).range(0.0, 0.0)),
            )
            .constructor(build)
            .build(),
    );
}
