// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lumen host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key fails at
//! startup instead of being ignored.

use lumen_core::{ExtraPolicy, InstanceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level Lumen configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LumenConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Defaults applied while validating component configuration.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Effect instances created at startup.
    #[serde(default)]
    pub effects: Vec<InstanceConfig>,

    /// Device instances created at startup.
    #[serde(default)]
    pub devices: Vec<InstanceConfig>,
}

impl LumenConfig {
    /// Instance declarations for a category, by category name.
    pub fn instances(&self, category: &str) -> &[InstanceConfig] {
        match category {
            "effects" => &self.effects,
            "devices" => &self.devices,
            _ => &[],
        }
    }
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "lumen".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Schema validation defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Policy for undeclared keys when a component type declares none.
    #[serde(default)]
    pub extra: ExtraPolicy,
}

/// One instance to create at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceConfig {
    /// Registered component name (e.g. `rainbow`).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Explicit instance id; auto-assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<InstanceId>,

    /// Component configuration, validated against the composed schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,

    /// Extra positional arguments handed to the constructor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}
