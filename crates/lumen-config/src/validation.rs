// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks that serde attributes cannot express.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{InstanceConfig, LumenConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration, collecting every problem.
pub fn validate_config(config: &LumenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    validate_instances("effects", &config.effects, &mut errors);
    validate_instances("devices", &config.devices, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_instances(section: &str, instances: &[InstanceConfig], errors: &mut Vec<ConfigError>) {
    let mut seen_ids = HashSet::new();

    for (i, instance) in instances.iter().enumerate() {
        if instance.type_name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{section}[{i}].type must not be empty"),
            });
        }

        if let Some(id) = instance.id
            && !seen_ids.insert(id)
        {
            errors.push(ConfigError::Validation {
                message: format!("duplicate id {id} in [[{section}]]"),
            });
        }

        if let Some(config) = &instance.config
            && !config.is_object()
        {
            errors.push(ConfigError::Validation {
                message: format!("{section}[{i}].config must be a table"),
            });
        }
    }
}
