// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composed schemas and configuration validation.
//!
//! [`Schema::validate`] normalizes a configuration mapping: defaults are
//! filled in for absent keys, declared types are checked (and coerced when the
//! field allows it), and unknown keys are handled per [`ExtraPolicy`]. Every
//! offending field is collected before the call fails.

use lumen_core::{ExtraPolicy, FieldError, FieldErrorKind, ValidationError};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::config::ComponentConfig;
use crate::field::{Field, FieldType, SchemaFragment};

/// Minimum Jaro-Winkler similarity for a "did you mean" hint on unknown keys.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A validator over one effective field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    extra: ExtraPolicy,
    fields: SchemaFragment,
}

impl Schema {
    pub fn new(fields: SchemaFragment, extra: ExtraPolicy) -> Self {
        Self { extra, fields }
    }

    /// An empty schema that keeps every key.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &SchemaFragment {
        &self.fields
    }

    pub fn extra(&self) -> ExtraPolicy {
        self.extra
    }

    pub fn with_extra(mut self, extra: ExtraPolicy) -> Self {
        self.extra = extra;
        self
    }

    /// Validates `config` and returns the normalized mapping.
    pub fn validate(&self, config: &Value) -> Result<ComponentConfig, ValidationError> {
        let mut errors = Vec::new();
        let normalized = match config {
            Value::Object(map) => validate_mapping(&self.fields, self.extra, map, "", &mut errors),
            other => {
                errors.push(FieldError::new(
                    "",
                    FieldErrorKind::WrongType {
                        expected: "mapping".to_string(),
                        found: type_name(other).to_string(),
                    },
                ));
                Map::new()
            }
        };

        if errors.is_empty() {
            Ok(ComponentConfig::from(normalized))
        } else {
            tracing::debug!(errors = errors.len(), "configuration rejected by schema");
            Err(ValidationError::new(errors))
        }
    }

    /// Validates a mapping that is already split out of a larger document.
    pub fn validate_map(&self, config: &Map<String, Value>) -> Result<ComponentConfig, ValidationError> {
        let mut errors = Vec::new();
        let normalized = validate_mapping(&self.fields, self.extra, config, "", &mut errors);
        if errors.is_empty() {
            Ok(ComponentConfig::from(normalized))
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// JSON description of the schema, for display.
    pub fn describe(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn validate_mapping(
    fields: &SchemaFragment,
    extra: ExtraPolicy,
    input: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<FieldError>,
) -> Map<String, Value> {
    let mut out = Map::new();

    for field in fields.iter() {
        let path = join_path(prefix, &field.name);
        match input.get(&field.name) {
            Some(value) => {
                if let Some(normalized) = check_field(field, value, extra, &path, errors) {
                    out.insert(field.name.clone(), normalized);
                }
            }
            None => {
                if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                } else if field.required {
                    errors.push(FieldError::new(path, FieldErrorKind::Missing));
                }
            }
        }
    }

    for (key, value) in input {
        if fields.contains(key) {
            continue;
        }
        match extra {
            ExtraPolicy::Allow => {
                out.insert(key.clone(), value.clone());
            }
            ExtraPolicy::Remove => {}
            ExtraPolicy::Deny => errors.push(FieldError::new(
                join_path(prefix, key),
                FieldErrorKind::Unknown {
                    suggestion: suggest_field(key, &fields.names()),
                },
            )),
        }
    }

    out
}

fn check_field(
    field: &Field,
    value: &Value,
    extra: ExtraPolicy,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    let normalized = check_type(&field.ty, field.coerce, value, extra, path, errors)?;

    if let Some(range) = &field.range
        && let Some(n) = normalized.as_f64()
        && !range.contains(n)
    {
        errors.push(FieldError::new(
            path,
            FieldErrorKind::OutOfRange {
                value: normalized.to_string(),
                range: range.to_string(),
            },
        ));
        return None;
    }

    if !field.choices.is_empty() && !field.choices.contains(&normalized) {
        let choices = field
            .choices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        errors.push(FieldError::new(
            path,
            FieldErrorKind::NotOneOf {
                value: normalized.to_string(),
                choices,
            },
        ));
        return None;
    }

    Some(normalized)
}

fn check_type(
    ty: &FieldType,
    coerce: bool,
    value: &Value,
    extra: ExtraPolicy,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    let converted = match ty {
        FieldType::Any => Some(value.clone()),
        FieldType::Bool => as_bool(value, coerce).map(Value::Bool),
        FieldType::Int => as_int(value, coerce).map(Value::from),
        FieldType::Float => as_float(value, coerce)
            .and_then(Number::from_f64)
            .map(Value::Number),
        FieldType::String => as_string(value, coerce).map(Value::String),
        FieldType::List(item) => match value {
            Value::Array(items) => {
                let before = errors.len();
                let checked: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| {
                        check_type(item, coerce, v, extra, &format!("{path}[{i}]"), errors)
                    })
                    .collect();
                // Item errors are already recorded; report nothing further.
                if errors.len() > before {
                    return None;
                }
                Some(Value::Array(checked))
            }
            _ => None,
        },
        FieldType::Object(fragment) => match value {
            Value::Object(map) => {
                let before = errors.len();
                let nested = validate_mapping(fragment, extra, map, path, errors);
                if errors.len() > before {
                    return None;
                }
                Some(Value::Object(nested))
            }
            _ => None,
        },
    };

    if converted.is_none() {
        errors.push(FieldError::new(
            path,
            FieldErrorKind::WrongType {
                expected: ty.to_string(),
                found: type_name(value).to_string(),
            },
        ));
    }
    converted
}

fn as_bool(value: &Value, coerce: bool) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if coerce => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) if coerce => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

fn as_int(value: &Value, coerce: bool) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (coerce && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
                .then_some(f as i64)
        }),
        Value::String(s) if coerce => s.trim().parse().ok(),
        Value::Bool(b) if coerce => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_float(value: &Value, coerce: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if coerce => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(value: &Value, coerce: bool) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if coerce => Some(n.to_string()),
        Value::Bool(b) if coerce => Some(b.to_string()),
        _ => None,
    }
}

/// Short type name of a JSON value, as reported in field errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Suggest a declared field name close to an unknown key.
pub fn suggest_field(unknown: &str, declared: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &name in declared {
        let score = strsim::jaro_winkler(unknown, name);
        if score > best_score {
            best_score = score;
            best_match = Some(name.to_string());
        }
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn effect_schema(extra: ExtraPolicy) -> Schema {
        Schema::new(
            SchemaFragment::new()
                .field(
                    Field::optional("speed", FieldType::Float)
                        .default(1.0)
                        .range(0.1, 10.0),
                )
                .field(Field::required("color", FieldType::String))
                .field(
                    Field::optional("mode", FieldType::String)
                        .default("mirror")
                        .one_of(["mirror", "repeat"]),
                ),
            extra,
        )
    }

    #[test]
    fn applies_defaults_for_absent_optional_fields() {
        let config = effect_schema(ExtraPolicy::Allow)
            .validate(&json!({"color": "red"}))
            .unwrap();
        assert_eq!(config.get("speed"), Some(&json!(1.0)));
        assert_eq!(config.get("mode"), Some(&json!("mirror")));
        assert_eq!(config.get("color"), Some(&json!("red")));
    }

    #[test]
    fn reports_every_offending_field() {
        let err = effect_schema(ExtraPolicy::Allow)
            .validate(&json!({"speed": "fast", "mode": "bounce"}))
            .unwrap_err();

        assert_eq!(err.paths(), vec!["speed", "color", "mode"]);
        assert!(matches!(
            err.get("speed").unwrap().kind,
            FieldErrorKind::WrongType { .. }
        ));
        assert_eq!(err.get("color").unwrap().kind, FieldErrorKind::Missing);
        assert!(matches!(
            err.get("mode").unwrap().kind,
            FieldErrorKind::NotOneOf { .. }
        ));
    }

    #[test]
    fn range_is_enforced() {
        let err = effect_schema(ExtraPolicy::Allow)
            .validate(&json!({"color": "red", "speed": 50}))
            .unwrap_err();
        assert!(matches!(
            err.get("speed").unwrap().kind,
            FieldErrorKind::OutOfRange { .. }
        ));
    }

    #[test]
    fn extra_policies() {
        let input = json!({"color": "red", "colr": "blue"});

        let allowed = effect_schema(ExtraPolicy::Allow).validate(&input).unwrap();
        assert_eq!(allowed.get("colr"), Some(&json!("blue")));

        let removed = effect_schema(ExtraPolicy::Remove).validate(&input).unwrap();
        assert!(removed.get("colr").is_none());

        let err = effect_schema(ExtraPolicy::Deny).validate(&input).unwrap_err();
        assert_eq!(
            err.get("colr").unwrap().kind,
            FieldErrorKind::Unknown {
                suggestion: Some("color".into())
            }
        );
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = Schema::empty().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.paths(), vec![""]);
    }

    #[test]
    fn int_does_not_accept_float_without_coercion() {
        let schema = Schema::new(
            SchemaFragment::new().field(Field::optional("n", FieldType::Int)),
            ExtraPolicy::Allow,
        );
        assert!(schema.validate(&json!({"n": 1.5})).is_err());
        assert!(schema.validate(&json!({"n": 2.0})).is_err());
        assert_eq!(
            schema.validate(&json!({"n": 2})).unwrap().get("n"),
            Some(&json!(2))
        );
    }

    #[test]
    fn coercion_converts_scalars() {
        let schema = Schema::new(
            SchemaFragment::new()
                .field(Field::optional("n", FieldType::Int).coerce())
                .field(Field::optional("f", FieldType::Float).coerce())
                .field(Field::optional("b", FieldType::Bool).coerce())
                .field(Field::optional("s", FieldType::String).coerce()),
            ExtraPolicy::Allow,
        );
        let config = schema
            .validate(&json!({"n": "42", "f": "0.5", "b": "on", "s": 7}))
            .unwrap();
        assert_eq!(config.get("n"), Some(&json!(42)));
        assert_eq!(config.get("f"), Some(&json!(0.5)));
        assert_eq!(config.get("b"), Some(&json!(true)));
        assert_eq!(config.get("s"), Some(&json!("7")));
    }

    #[test]
    fn nested_objects_and_lists_report_full_paths() {
        let schema = Schema::new(
            SchemaFragment::new()
                .field(Field::optional("gradient", FieldType::list(FieldType::String)))
                .field(Field::required(
                    "network",
                    FieldType::Object(
                        SchemaFragment::new()
                            .field(Field::required("port", FieldType::Int))
                            .field(Field::optional("host", FieldType::String).default("0.0.0.0")),
                    ),
                )),
            ExtraPolicy::Deny,
        );

        let err = schema
            .validate(&json!({"gradient": ["red", 3], "network": {"prot": 1}}))
            .unwrap_err();
        assert_eq!(
            err.paths(),
            vec!["gradient[1]", "network.port", "network.prot"]
        );

        let ok = schema
            .validate(&json!({"network": {"port": 5568}}))
            .unwrap();
        assert_eq!(ok.get("network"), Some(&json!({"port": 5568, "host": "0.0.0.0"})));
    }

    #[test]
    fn describe_lists_fields() {
        let desc = effect_schema(ExtraPolicy::Deny).describe();
        assert_eq!(desc["extra"], json!("deny"));
        assert_eq!(desc["fields"][0]["name"], json!("speed"));
        assert_eq!(desc["fields"][0]["type"]["kind"], json!("float"));
        assert_eq!(desc["fields"][1]["required"], json!(true));
    }
}
