// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in output devices.
//!
//! The device base denies undeclared keys, so a typo in a device section is
//! rejected even when the host allows extra keys elsewhere.

use std::sync::{Arc, LazyLock};

use lumen_core::{ExtraPolicy, LumenError};
use lumen_registry::{ComponentType, StaticDiscovery};
use lumen_schema::{ComponentConfig, Field, FieldType, SchemaFragment};
use serde::Deserialize;
use serde_json::Value;

pub mod e131;
pub mod udp;

/// Discovery root for device modules.
pub const PATH: &str = module_path!();

/// Upper bound on `pixel_count` for any device.
pub const MAX_PIXELS: usize = 1_000_000;

/// A configured output device.
pub trait Device: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> &'static str;

    /// User-facing device name.
    fn name(&self) -> &str;

    fn pixel_count(&self) -> usize;

    /// Output brightness cap in `0.0..=1.0`.
    fn max_brightness(&self) -> f64;

    fn summary(&self) -> String;
}

/// Settings shared by every device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
    pub name: String,
    pub pixel_count: usize,
    pub max_brightness: f64,
    pub refresh_rate: u32,
}

impl DeviceSettings {
    /// Reads the shared settings out of a validated configuration.
    ///
    /// Devices cannot be created without configuration because `name` and
    /// `pixel_count` have no defaults.
    pub fn from_config(kind: &str, config: Option<&ComponentConfig>) -> Result<Self, LumenError> {
        let config = config.ok_or_else(|| LumenError::Construct {
            name: kind.to_string(),
            message: "device configuration is required".to_string(),
        })?;
        config.deserialize().map_err(|e| LumenError::Construct {
            name: kind.to_string(),
            message: e.to_string(),
        })
    }
}

/// Extra constructor arguments are free-form tags.
pub fn tags(args: &[Value]) -> Vec<String> {
    args.iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

pub static BASE: LazyLock<Arc<ComponentType<dyn Device>>> = LazyLock::new(|| {
    ComponentType::new(concat!(module_path!(), "::device"))
        .description("Base device")
        .extra_policy(ExtraPolicy::Deny)
        .schema(
            SchemaFragment::new()
                .field(Field::required("name", FieldType::String).description("Friendly name"))
                .field(
                    Field::required("pixel_count", FieldType::Int)
                        .range(1.0, MAX_PIXELS as f64)
                        .description("Number of individual pixels"),
                )
                .field(
                    Field::optional("max_brightness", FieldType::Float)
                        .default(1.0)
                        .range(0.0, 1.0),
                )
                .field(
                    Field::optional("refresh_rate", FieldType::Int)
                        .default(60)
                        .range(1.0, 240.0)
                        .description("Frames per second sent to the device"),
                ),
        )
        .build()
});

/// Every built-in device module and its registration hook.
pub fn discovery() -> StaticDiscovery<dyn Device> {
    StaticDiscovery::new()
        .module(e131::MODULE, e131::register)
        .module(udp::MODULE, udp::register)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::FieldErrorKind;
    use lumen_registry::{Loader, Registry};
    use serde_json::json;

    fn loader() -> Loader<dyn Device> {
        Loader::open(Registry::new("devices"), discovery(), PATH, ())
            .unwrap()
            .with_extra_policy(ExtraPolicy::Allow)
    }

    #[test]
    fn unknown_keys_are_rejected_with_suggestion() {
        let mut loader = loader();
        let err = loader
            .create(
                "udp",
                Some(&json!({"name": "desk", "pixel_count": 10, "ip_adress": "10.0.0.2"})),
                None,
                &[],
            )
            .unwrap_err();
        let LumenError::Validation(err) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert_eq!(err.paths(), vec!["ip_address", "ip_adress"]);
        match &err.get("ip_adress").unwrap().kind {
            FieldErrorKind::Unknown { suggestion } => {
                assert_eq!(suggestion.as_deref(), Some("ip_address"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(loader.is_empty());
    }

    #[test]
    fn pixel_count_must_be_positive() {
        let mut loader = loader();
        let err = loader
            .create(
                "e131",
                Some(&json!({"name": "tree", "pixel_count": 0, "host": "h"})),
                None,
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, LumenError::Validation(_)));
    }

    #[test]
    fn pixel_count_has_an_upper_bound() {
        let mut loader = loader();
        let err = loader
            .create(
                "e131",
                Some(&json!({"name": "x", "pixel_count": 4_000_000_000_000_000_000u64, "host": "h"})),
                None,
                &[],
            )
            .unwrap_err();
        let LumenError::Validation(err) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(matches!(
            err.get("pixel_count").unwrap().kind,
            FieldErrorKind::OutOfRange { .. }
        ));
    }

    #[test]
    fn largest_device_summarizes() {
        let mut loader = loader();
        let device = loader
            .create(
                "e131",
                Some(&json!({
                    "name": "wall",
                    "pixel_count": MAX_PIXELS,
                    "host": "h",
                    "universe": 63999,
                    "universe_size": 1,
                    "max_brightness": 0.25,
                })),
                None,
                &[],
            )
            .unwrap();
        assert_eq!(device.summary(), "wall -> h universes 63999..3063998");
        assert_eq!(device.max_brightness(), 0.25);
    }

    #[test]
    fn udp_keeps_extra_args_as_tags() {
        let mut loader = loader();
        let device = loader
            .create(
                "udp",
                Some(&json!({"name": "desk", "pixel_count": 10, "ip_address": "10.0.0.2"})),
                None,
                &[json!("office"), json!(3)],
            )
            .unwrap();
        assert_eq!(device.kind(), "udp");
        assert_eq!(
            device.summary(),
            "desk -> 10.0.0.2:21324 (10 px @ 60 fps) [office, 3]"
        );
    }

    #[test]
    fn devices_require_configuration() {
        let mut loader = loader();
        let err = loader.create("udp", None, None, &[]).unwrap_err();
        assert!(matches!(err, LumenError::Construct { .. }));
        assert_eq!(loader.next_id(), lumen_core::InstanceId(1));
    }
}
