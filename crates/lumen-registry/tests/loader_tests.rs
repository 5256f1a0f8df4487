// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for registration, schema composition, and the instance
//! lifecycle.

use std::sync::Arc;

use lumen_core::{ExtraPolicy, FieldErrorKind, InstanceId, LumenError};
use lumen_registry::{ComponentType, Loader, Registry, StaticDiscovery};
use proptest::prelude::*;
use serde_json::{json, Value};

pub trait Effect: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> &'static str;
    fn config(&self) -> Option<&Value>;
}

#[derive(Debug)]
struct Generic {
    kind: &'static str,
    config: Option<Value>,
}

impl Effect for Generic {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }
}

mod effects {
    use super::*;
    use lumen_schema::{Field, FieldType, SchemaFragment};

    pub mod base {
        use super::*;

        pub fn ty() -> Arc<ComponentType<dyn Effect>> {
            ComponentType::new(module_path!())
                .schema(SchemaFragment::new().field(Field::optional("a", FieldType::Int).default(1)))
                .build()
        }

        pub fn register(registry: &mut Registry<dyn Effect>) {
            let ty = ty();
            registry.register(ty.clone());
            registry.exclude(&ty).unwrap();
        }
    }

    pub mod x {
        use super::*;

        pub fn register(registry: &mut Registry<dyn Effect>) {
            registry.register(
                ComponentType::new(module_path!())
                    .extends(base::ty())
                    .schema(SchemaFragment::new().field(Field::required("b", FieldType::String)))
                    .constructor(|config, _| {
                        Ok(Arc::new(Generic {
                            kind: "x",
                            config: config.map(Value::from),
                        }))
                    })
                    .build(),
            );
        }
    }

    pub mod y {
        use super::*;

        pub fn register(registry: &mut Registry<dyn Effect>) {
            registry.register(
                ComponentType::new(module_path!())
                    .extends(base::ty())
                    .schema(SchemaFragment::new().field(Field::optional("a", FieldType::Int).default(2)))
                    .constructor(|config, _| {
                        Ok(Arc::new(Generic {
                            kind: "y",
                            config: config.map(Value::from),
                        }))
                    })
                    .build(),
            );
        }
    }
}

const ROOT: &str = "loader_tests::effects";

fn discovery() -> StaticDiscovery<dyn Effect> {
    StaticDiscovery::new()
        .module("loader_tests::effects::base", effects::base::register)
        .module("loader_tests::effects::x", effects::x::register)
        .module("loader_tests::effects::y", effects::y::register)
}

fn loader() -> Loader<dyn Effect> {
    Loader::open(Registry::new("effects"), discovery(), ROOT, ()).expect("effects should load")
}

#[test]
fn registration_uses_module_names_and_skips_excluded_bases() {
    let loader = loader();
    let names: Vec<&str> = loader.registered_types().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(
        loader.registered_types()["x"].module_path(),
        "loader_tests::effects::x"
    );
}

#[test]
fn last_registration_under_a_name_wins() {
    let mut loader = loader();
    let replacement = ComponentType::<dyn Effect>::new("plugins::effects::x")
        .constructor(|_, _| {
            Ok(Arc::new(Generic {
                kind: "replacement",
                config: None,
            }))
        })
        .build();

    loader.registry_mut().register(replacement.clone());

    assert!(Arc::ptr_eq(&loader.registered_types()["x"], &replacement));
    let obj = loader.create("x", None, None, &[]).unwrap();
    assert_eq!(obj.kind(), "replacement");
}

#[test]
fn exclusion_requires_prior_presence() {
    let mut loader = loader();
    let never: Arc<ComponentType<dyn Effect>> = ComponentType::new("loader_tests::effects::never").build();
    let err = loader.registry_mut().exclude(&never).unwrap_err();
    assert!(matches!(err, LumenError::ComponentNotFound { .. }));

    loader.registry_mut().register(never.clone());
    loader.registry_mut().exclude(&never).unwrap();
    assert!(!loader.registered_types().contains_key("never"));
}

#[test]
fn composed_schema_adds_derived_fields() {
    let mut loader = loader();

    let obj = loader.create("x", Some(&json!({"b": "hi"})), None, &[]).unwrap();
    assert_eq!(obj.config(), Some(&json!({"a": 1, "b": "hi"})));

    let err = loader.create("x", Some(&json!({})), None, &[]).unwrap_err();
    let LumenError::Validation(err) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(err.paths(), vec!["b"]);
    assert_eq!(err.errors()[0].kind, FieldErrorKind::Missing);
}

#[test]
fn composed_schema_redeclaration_overrides_base_default() {
    let mut loader = loader();
    let obj = loader.create("y", Some(&json!({})), None, &[]).unwrap();
    assert_eq!(obj.config(), Some(&json!({"a": 2})));
}

#[test]
fn create_destroy_round_trip() {
    let mut loader = loader();
    let first = loader.create("y", Some(&json!({})), None, &[]).unwrap();
    let second = loader.create("y", Some(&json!({})), None, &[]).unwrap();

    assert!(Arc::ptr_eq(loader.get(InstanceId(1)).unwrap(), &first));
    assert!(Arc::ptr_eq(loader.get(InstanceId(2)).unwrap(), &second));

    let destroyed = loader.destroy(InstanceId(1)).unwrap();
    assert!(Arc::ptr_eq(&destroyed, &first));

    let remaining: Vec<_> = loader.instances().collect();
    assert_eq!(remaining.len(), 1);
    assert!(Arc::ptr_eq(remaining[0], &second));
    assert_eq!(loader.ids().collect::<Vec<_>>(), vec![InstanceId(2)]);
}

#[test]
fn auto_ids_are_not_reused_after_destroy() {
    let mut loader = loader();
    loader.create("y", None, None, &[]).unwrap();
    loader.destroy(InstanceId(1)).unwrap();
    loader.create("y", None, None, &[]).unwrap();
    assert_eq!(loader.ids().collect::<Vec<_>>(), vec![InstanceId(2)]);

    // A destroyed id is only reused when supplied explicitly.
    loader.create("y", None, Some(InstanceId(1)), &[]).unwrap();
    assert_eq!(
        loader.ids().collect::<Vec<_>>(),
        vec![InstanceId(1), InstanceId(2)]
    );
}

#[test]
fn auto_ids_skip_explicitly_taken_ids() {
    let mut loader = loader();
    loader.create("y", None, Some(InstanceId(1)), &[]).unwrap();
    loader.create("y", None, Some(InstanceId(3)), &[]).unwrap();

    loader.create("y", None, None, &[]).unwrap();
    assert_eq!(loader.next_id(), InstanceId(3));
    loader.create("y", None, None, &[]).unwrap();
    assert_eq!(
        loader.ids().collect::<Vec<_>>(),
        vec![InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4)]
    );
    assert_eq!(loader.next_id(), InstanceId(5));
}

#[test]
fn failed_auto_create_after_explicit_id_consumes_nothing() {
    let mut loader = loader();
    loader.create("x", Some(&json!({"b": "a"})), Some(InstanceId(1)), &[]).unwrap();

    loader.create("x", Some(&json!({})), None, &[]).unwrap_err();
    assert_eq!(loader.next_id(), InstanceId(1));
    assert_eq!(loader.len(), 1);

    loader.create("x", Some(&json!({"b": "c"})), None, &[]).unwrap();
    assert_eq!(
        loader.ids().collect::<Vec<_>>(),
        vec![InstanceId(1), InstanceId(2)]
    );
}

#[test]
fn validation_failure_consumes_no_id() {
    let mut loader = loader();
    let err = loader
        .create("x", Some(&json!({"a": "wrong_type", "b": 3})), None, &[])
        .unwrap_err();
    let LumenError::Validation(err) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(err.paths(), vec!["a", "b"]);
    assert!(loader.is_empty());

    loader.create("x", Some(&json!({"b": "ok"})), None, &[]).unwrap();
    assert_eq!(loader.ids().collect::<Vec<_>>(), vec![InstanceId(1)]);
}

#[test]
fn duplicate_id_conflicts() {
    let mut loader = loader();
    let first = loader.create("y", Some(&json!({})), Some(InstanceId(5)), &[]).unwrap();

    let err = loader
        .create("y", Some(&json!({})), Some(InstanceId(5)), &[])
        .unwrap_err();
    assert!(matches!(
        err,
        LumenError::InstanceConflict { id: InstanceId(5), .. }
    ));
    assert!(Arc::ptr_eq(loader.get(InstanceId(5)).unwrap(), &first));
    assert_eq!(loader.len(), 1);
}

#[test]
fn unknown_name_does_not_mutate_state() {
    let mut loader = loader();
    let err = loader
        .create("does_not_exist", Some(&json!({})), None, &[])
        .unwrap_err();
    assert!(matches!(err, LumenError::ComponentNotFound { .. }));
    assert!(loader.is_empty());
    assert_eq!(loader.next_id(), InstanceId(1));
}

#[test]
fn destroy_unknown_id_fails() {
    let mut loader = loader();
    let err = loader.destroy(InstanceId(9)).unwrap_err();
    assert!(matches!(err, LumenError::InstanceNotFound { .. }));
}

#[test]
fn extra_keys_follow_loader_policy() {
    let mut allow = loader();
    let obj = allow
        .create("y", Some(&json!({"brightness": 0.5})), None, &[])
        .unwrap();
    assert_eq!(obj.config(), Some(&json!({"a": 2, "brightness": 0.5})));

    let mut remove = loader().with_extra_policy(ExtraPolicy::Remove);
    let obj = remove
        .create("y", Some(&json!({"brightness": 0.5})), None, &[])
        .unwrap();
    assert_eq!(obj.config(), Some(&json!({"a": 2})));
}

proptest! {
    #[test]
    fn auto_ids_strictly_increase(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
        let mut loader = loader();
        let mut last = 0u64;
        for create in ops {
            if create {
                loader.create("y", None, None, &[]).unwrap();
                let newest = loader.ids().max().unwrap();
                prop_assert!(newest.0 > last);
                last = newest.0;
            } else {
                let oldest = loader.ids().next();
                if let Some(id) = oldest {
                    loader.destroy(id).unwrap();
                }
            }
        }
        prop_assert_eq!(loader.next_id(), InstanceId(last + 1));
    }
}
