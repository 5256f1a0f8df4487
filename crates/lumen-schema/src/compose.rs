// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema composition along a type lineage.

use lumen_core::ExtraPolicy;

use crate::field::SchemaFragment;
use crate::lineage::{self, Lineage};
use crate::schema::Schema;

/// A type that may declare its own schema fragment and extra-key policy.
pub trait DeclaresSchema: Lineage {
    fn own_schema(&self) -> Option<&SchemaFragment>;

    fn own_extra_policy(&self) -> Option<&ExtraPolicy> {
        None
    }
}

/// Builds the validator for `ty`.
///
/// With `extended`, fragments explicitly declared along the lineage are merged
/// root to leaf, so a derived declaration replaces a same-named base field.
/// Without it, only the fragment `ty` declares itself is used. The most
/// specific declared extra-key policy wins over `extra`.
pub fn compose<T: DeclaresSchema>(ty: &T, extended: bool, extra: ExtraPolicy) -> Schema {
    let policy = lineage::inherited(ty, |t| t.own_extra_policy())
        .copied()
        .unwrap_or(extra);

    if !extended {
        let own = lineage::explicit(ty, |t| t.own_schema())
            .cloned()
            .unwrap_or_default();
        return Schema::new(own, policy);
    }

    let mut fields = SchemaFragment::new();
    for ancestor in lineage::ancestry(ty) {
        if let Some(fragment) = lineage::explicit(ancestor, |t| t.own_schema()) {
            fields.merge(fragment);
        }
    }
    Schema::new(fields, policy)
}
