// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, schema, and configuration crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a live component instance within one loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// First id handed out by a fresh loader.
    pub const FIRST: InstanceId = InstanceId(1);

    pub fn next(self) -> InstanceId {
        InstanceId(self.0 + 1)
    }
}

impl From<u64> for InstanceId {
    fn from(id: u64) -> Self {
        InstanceId(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a schema treats keys it does not declare.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExtraPolicy {
    /// Keep unknown keys in the normalized mapping.
    #[default]
    Allow,
    /// Reject unknown keys with a field error.
    Deny,
    /// Silently drop unknown keys.
    Remove,
}
