// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the built-in categories to their loaders and applies the instance
//! declarations from configuration.

use std::sync::Arc;

use lumen_config::{InstanceConfig, LumenConfig};
use lumen_core::{ExtraPolicy, InstanceId, LumenError};
use lumen_registry::{Loader, Registry};
use lumen_schema::Schema;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::devices::{self, Device};
use crate::effects::{self, Effect};

/// Context shared with every loader.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub app_name: String,
}

/// Outcome of creating one declared instance.
#[derive(Debug)]
pub struct Created {
    pub category: &'static str,
    pub kind: &'static str,
    pub id: InstanceId,
    pub summary: String,
}

/// A declaration that could not be turned into an instance.
#[derive(Debug)]
pub struct Failed {
    pub category: &'static str,
    pub index: usize,
    pub type_name: String,
    pub error: LumenError,
}

/// The effect and device loaders of one running application.
pub struct Host {
    pub effects: Loader<dyn Effect, Arc<HostContext>>,
    pub devices: Loader<dyn Device, Arc<HostContext>>,
}

impl Host {
    /// Load every built-in module for both categories.
    pub fn open(app_name: &str, extra: ExtraPolicy) -> Result<Self, LumenError> {
        let context = Arc::new(HostContext {
            app_name: app_name.to_string(),
        });
        let effects = Loader::open(
            Registry::new("effects"),
            effects::discovery(),
            effects::PATH,
            Arc::clone(&context),
        )?
        .with_extra_policy(extra);
        let devices = Loader::open(
            Registry::new("devices"),
            devices::discovery(),
            devices::PATH,
            context,
        )?
        .with_extra_policy(extra);

        Ok(Self { effects, devices })
    }

    /// Registered names per category, sorted.
    pub fn catalog(&self) -> Vec<(&'static str, Vec<(&str, Option<&str>)>)> {
        let effects = self
            .effects
            .registered_types()
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.get_description()))
            .collect();
        let devices = self
            .devices
            .registered_types()
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.get_description()))
            .collect();
        vec![("effects", effects), ("devices", devices)]
    }

    /// Composed schema of a registered type.
    pub fn schema(&self, category: &str, name: &str, extended: bool) -> Result<Schema, LumenError> {
        match category {
            "effects" => self
                .effects
                .registry()
                .schema(name, extended, self.effects.extra_policy()),
            "devices" => self
                .devices
                .registry()
                .schema(name, extended, self.devices.extra_policy()),
            other => Err(LumenError::Config(format!(
                "unknown category `{other}` (expected effects or devices)"
            ))),
        }
    }

    /// Create every declared instance. Devices come first so effects can
    /// later be attached to them.
    ///
    /// A failing declaration does not stop the others; failures are returned
    /// alongside the instances that were created.
    pub fn apply(&mut self, config: &LumenConfig) -> (Vec<Created>, Vec<Failed>) {
        let mut created = Vec::new();
        let mut failed = Vec::new();

        for (index, decl) in config.devices.iter().enumerate() {
            match create(&mut self.devices, decl) {
                Ok((id, device)) => {
                    debug!(
                        id = %id,
                        name = %device.name(),
                        pixels = device.pixel_count(),
                        max_brightness = device.max_brightness(),
                        "device ready"
                    );
                    created.push(Created {
                        category: "devices",
                        kind: device.kind(),
                        id,
                        summary: device.summary(),
                    });
                }
                Err(error) => failed.push(Failed {
                    category: "devices",
                    index,
                    type_name: decl.type_name.clone(),
                    error,
                }),
            }
        }

        for (index, decl) in config.effects.iter().enumerate() {
            match create(&mut self.effects, decl) {
                Ok((id, effect)) => created.push(Created {
                    category: "effects",
                    kind: effect.kind(),
                    id,
                    summary: effect.summary(),
                }),
                Err(error) => failed.push(Failed {
                    category: "effects",
                    index,
                    type_name: decl.type_name.clone(),
                    error,
                }),
            }
        }

        info!(
            app = %self.effects.context().app_name,
            created = created.len(),
            failed = failed.len(),
            "applied instance declarations"
        );
        for failure in &failed {
            warn!(
                category = failure.category,
                index = failure.index,
                type_name = %failure.type_name,
                error = %failure.error,
                "instance declaration rejected"
            );
        }
        (created, failed)
    }
}

/// Declared instances are always validated; a missing `config` table means
/// "all defaults".
fn create<C: ?Sized + 'static, X>(
    loader: &mut Loader<C, X>,
    decl: &InstanceConfig,
) -> Result<(InstanceId, Arc<C>), LumenError> {
    let config = decl
        .config
        .clone()
        .unwrap_or_else(|| Value::Object(Default::default()));
    loader.create_entry(&decl.type_name, Some(&config), decl.id, &decl.args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host() -> Host {
        Host::open("test", ExtraPolicy::Allow).expect("built-in modules should load")
    }

    #[test]
    fn catalog_excludes_abstract_bases() {
        let host = host();
        let catalog = host.catalog();
        let effects: Vec<&str> = catalog[0].1.iter().map(|(n, _)| *n).collect();
        let devices: Vec<&str> = catalog[1].1.iter().map(|(n, _)| *n).collect();
        assert_eq!(effects, vec!["rainbow", "singlecolor", "wavelength"]);
        assert_eq!(devices, vec!["e131", "udp"]);
    }

    #[test]
    fn wavelength_schema_spans_three_levels() {
        let schema = host().schema("effects", "wavelength", true).unwrap();
        assert_eq!(
            schema.fields().names(),
            vec![
                "blur",
                "flip",
                "mirror",
                "brightness",
                "gradient_name",
                "gradient_roll",
                "bands"
            ]
        );

        let own = host().schema("effects", "wavelength", false).unwrap();
        assert_eq!(own.fields().names(), vec!["bands"]);
    }

    #[test]
    fn device_base_policy_overrides_host_policy() {
        let schema = host().schema("devices", "udp", true).unwrap();
        assert_eq!(schema.extra(), ExtraPolicy::Deny);
        let effect = host().schema("effects", "rainbow", true).unwrap();
        assert_eq!(effect.extra(), ExtraPolicy::Allow);
    }

    #[test]
    fn unknown_category_is_a_config_error() {
        let err = host().schema("lights", "x", true).unwrap_err();
        assert!(matches!(err, LumenError::Config(_)));
    }

    #[test]
    fn apply_creates_devices_then_effects() {
        let config = lumen_config::load_config_from_str(
            r#"
[[effects]]
type = "rainbow"
config = { speed = 2.0 }

[[effects]]
type = "singlecolor"
id = 7
config = { color = "blue" }

[[devices]]
type = "udp"
config = { name = "desk", pixel_count = 30, ip_address = "10.0.0.5" }
args = ["office"]
"#,
        )
        .unwrap();

        let mut host = host();
        let (created, failed) = host.apply(&config);
        assert!(failed.is_empty(), "{failed:?}");

        let ids: Vec<_> = created.iter().map(|c| (c.category, c.id)).collect();
        assert_eq!(
            ids,
            vec![
                ("devices", InstanceId(1)),
                ("effects", InstanceId(1)),
                ("effects", InstanceId(7))
            ]
        );
        assert_eq!(created[0].kind, "udp");
        assert!(created[0].summary.contains("10.0.0.5:21324"));
        assert!(created[0].summary.contains("[office]"));
        assert!(created[1].summary.starts_with("speed=2"));
        assert!(created[2].summary.starts_with("color=blue"));
    }

    #[test]
    fn apply_mixes_explicit_and_auto_ids() {
        let config = lumen_config::load_config_from_str(
            r#"
[[effects]]
type = "rainbow"
id = 1

[[effects]]
type = "rainbow"

[[effects]]
type = "wavelength"
"#,
        )
        .unwrap();

        let mut host = host();
        let (created, failed) = host.apply(&config);
        assert!(failed.is_empty(), "{failed:?}");
        let ids: Vec<_> = created.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![InstanceId(1), InstanceId(2), InstanceId(3)]);
        assert_eq!(host.effects.next_id(), InstanceId(4));
    }

    #[test]
    fn apply_reports_every_rejected_declaration() {
        let config = lumen_config::load_config_from_str(
            r#"
[[effects]]
type = "strobe"

[[effects]]
type = "singlecolor"
config = { color = "pink" }

[[devices]]
type = "e131"
config = { name = "porch", pixel_count = 200, hots = "10.0.0.9" }
"#,
        )
        .unwrap();

        let mut host = host();
        let (created, failed) = host.apply(&config);
        assert!(created.is_empty());
        assert_eq!(failed.len(), 3);

        assert!(matches!(failed[0].error, LumenError::Validation(_)));
        let LumenError::Validation(err) = &failed[0].error else {
            unreachable!()
        };
        assert_eq!(err.paths(), vec!["host", "hots"]);

        assert!(matches!(failed[1].error, LumenError::ComponentNotFound { .. }));
        assert!(matches!(failed[2].error, LumenError::Validation(_)));
        assert!(host.effects.is_empty());
        assert_eq!(host.effects.next_id(), InstanceId(1));
    }

    #[test]
    #[tracing_test::traced_test]
    fn rejected_declarations_are_logged() {
        let config = lumen_config::load_config_from_str(
            r#"
[[effects]]
type = "strobe"
"#,
        )
        .unwrap();
        let (_, failed) = host().apply(&config);
        assert_eq!(failed.len(), 1);
        assert!(logs_contain("instance declaration rejected"));
        assert!(logs_contain("applied instance declarations"));
    }

    #[test]
    fn e131_spans_universes() {
        let mut host = host();
        let device = host
            .devices
            .create(
                "e131",
                Some(&json!({"name": "tree", "pixel_count": 400, "host": "sacn.local"})),
                None,
                &[],
            )
            .unwrap();
        assert_eq!(device.summary(), "tree -> sacn.local universes 1..3");
        assert_eq!(device.pixel_count(), 400);
        assert_eq!(device.name(), "tree");
    }

    #[test]
    fn context_is_shared() {
        let host = host();
        assert!(Arc::ptr_eq(host.effects.context(), host.devices.context()));
        assert_eq!(host.devices.context().app_name, "test");
    }
}
