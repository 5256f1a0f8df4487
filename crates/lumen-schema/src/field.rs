// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field declarations and the fragments that group them.
//!
//! A [`SchemaFragment`] is the set of fields one component type declares for
//! itself. Fragments are merged along a type's lineage by
//! [`compose`](crate::compose::compose) into a full [`Schema`](crate::Schema).

use serde::Serialize;
use serde_json::Value;

/// The value type a field accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum FieldType {
    /// Any JSON value, including null.
    Any,
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// Any number, normalized to a float.
    Float,
    String,
    /// Homogeneous list of the inner type.
    List(Box<FieldType>),
    /// Nested mapping validated against its own fragment.
    Object(SchemaFragment),
}

impl FieldType {
    pub fn list(item: FieldType) -> Self {
        FieldType::List(Box::new(item))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Any => write!(f, "any"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Int => write!(f, "int"),
            FieldType::Float => write!(f, "float"),
            FieldType::String => write!(f, "string"),
            FieldType::List(item) => write!(f, "list<{item}>"),
            FieldType::Object(_) => write!(f, "mapping"),
        }
    }
}

/// Inclusive numeric bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "[{min}, {max}]"),
            (Some(min), None) => write!(f, "[{min}, ..)"),
            (None, Some(max)) => write!(f, "(.., {max}]"),
            (None, None) => write!(f, "(.., ..)"),
        }
    }
}

/// One named configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Value>,
    /// Convert compatible scalar representations (e.g. `"3"` to `3`).
    pub coerce: bool,
}

impl Field {
    /// An optional field with no default.
    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            default: None,
            description: None,
            range: None,
            choices: Vec::new(),
            coerce: false,
        }
    }

    /// A field that must be present unless a default is attached.
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            required: true,
            ..Self::optional(name, ty)
        }
    }

    /// Value inserted when the key is absent.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(Range {
            min: Some(min),
            max: Some(max),
        });
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        let max = self.range.and_then(|r| r.max);
        self.range = Some(Range {
            min: Some(min),
            max,
        });
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        let min = self.range.and_then(|r| r.min);
        self.range = Some(Range {
            min,
            max: Some(max),
        });
        self
    }

    pub fn one_of<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

/// The fields one type declares for itself, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaFragment {
    fields: Vec<Field>,
}

impl SchemaFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any earlier field with the same name.
    pub fn field(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Overlays `other` onto this fragment.
    ///
    /// Same-named fields take `other`'s declaration but keep their original
    /// position; new fields are appended.
    pub fn merge(&mut self, other: &SchemaFragment) {
        for field in &other.fields {
            self.insert(field.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for SchemaFragment {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut fragment = SchemaFragment::new();
        for field in iter {
            fragment.insert(field);
        }
        fragment
    }
}
