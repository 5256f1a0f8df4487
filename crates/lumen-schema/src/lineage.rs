// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookups over a single-parent type lineage.
//!
//! A type "declares" an attribute explicitly when the value it carries differs
//! from the value visible on its parent. Re-stating an inherited value is
//! treated as not declared, so composition never applies the same fragment
//! twice.

/// A node in a single-rooted hierarchy.
pub trait Lineage {
    fn parent(&self) -> Option<&Self>;
}

/// The chain from the root ancestor down to `node`, inclusive.
pub fn ancestry<T: Lineage>(node: &T) -> Vec<&T> {
    let mut chain = vec![node];
    let mut current = node;
    while let Some(parent) = current.parent() {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// The value visible on `node`: its own declaration or the nearest ancestor's.
pub fn inherited<'a, T, V, F>(node: &'a T, own: F) -> Option<&'a V>
where
    T: Lineage,
    V: 'a,
    F: Fn(&'a T) -> Option<&'a V>,
{
    let mut current = Some(node);
    while let Some(n) = current {
        if let Some(value) = own(n) {
            return Some(value);
        }
        current = n.parent();
    }
    None
}

/// The value `node` declares itself, if it differs from what its parent exposes.
pub fn explicit<'a, T, V, F>(node: &'a T, own: F) -> Option<&'a V>
where
    T: Lineage,
    V: PartialEq + 'a,
    F: Fn(&'a T) -> Option<&'a V>,
{
    let value = own(node)?;
    match node.parent().and_then(|parent| inherited(parent, &own)) {
        Some(parent_value) if parent_value == value => None,
        _ => Some(value),
    }
}

pub fn has_explicit<'a, T, V, F>(node: &'a T, own: F) -> bool
where
    T: Lineage,
    V: PartialEq + 'a,
    F: Fn(&'a T) -> Option<&'a V>,
{
    explicit(node, own).is_some()
}
