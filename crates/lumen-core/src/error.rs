// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lumen component registry.

use thiserror::Error;

use crate::types::InstanceId;

/// The primary error type returned by registries, loaders, and discovery.
#[derive(Debug, Error)]
pub enum LumenError {
    /// No component type is registered under the requested name.
    #[error("couldn't find `{name}` in the {category} registry")]
    ComponentNotFound { category: String, name: String },

    /// The component type has no constructor (an abstract base).
    #[error("{category} component `{name}` is abstract and cannot be created")]
    NotConstructible { category: String, name: String },

    /// A live instance already occupies the requested id.
    #[error("{category} object with id {id} already created")]
    InstanceConflict { category: String, id: InstanceId },

    /// No live instance exists under the requested id.
    #[error("{category} object with id {id} does not exist")]
    InstanceNotFound { category: String, id: InstanceId },

    /// Configuration rejected by the composed schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Enumerating or loading implementation modules failed.
    #[error("discovery failed for `{category}`: {message}")]
    Discovery { category: String, message: String },

    /// The component constructor returned an error.
    #[error("failed to construct `{name}`: {message}")]
    Construct { name: String, message: String },

    /// Application configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LumenError {
    /// Returns true for the lookup failures (unknown name or id).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LumenError::ComponentNotFound { .. } | LumenError::InstanceNotFound { .. }
        )
    }
}

/// Every field-level problem found while validating one configuration mapping.
///
/// Validation never fails fast: the error carries one [`FieldError`] per
/// offending field, in the order the schema declares them, followed by
/// unknown keys.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid configuration: {}", render_field_errors(&self.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Individual field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Paths of every offending field.
    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.path.as_str()).collect()
    }

    /// Returns the error reported for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A single offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path of the field (`""` for the mapping itself).
    pub path: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.kind)
        } else {
            write!(f, "`{}`: {}", self.path, self.kind)
        }
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldErrorKind {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, got {found}")]
    WrongType { expected: String, found: String },

    #[error("value {value} is outside {range}")]
    OutOfRange { value: String, range: String },

    #[error("value {value} is not one of: {choices}")]
    NotOneOf { value: String, choices: String },

    #[error("{}", format_unknown(suggestion.as_deref()))]
    Unknown { suggestion: Option<String> },
}

fn format_unknown(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("extra keys not allowed (did you mean `{s}`?)"),
        None => "extra keys not allowed".to_string(),
    }
}

fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
