// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lumen component registry.
//!
//! This crate provides the error taxonomy and the small value types shared by
//! the schema composer, the registry and loader, and the configuration system.

pub mod error;
pub mod types;

pub use error::{FieldError, FieldErrorKind, LumenError, ValidationError};
pub use types::{ExtraPolicy, InstanceId};
