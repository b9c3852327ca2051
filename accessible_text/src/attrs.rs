// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text attribute projection.
//!
//! Attributes (spelling markers, font metrics, style classification) are
//! stored by the tree as per-leaf spans plus container defaults. This module
//! computes the effective set at a point and the run boundaries that feed
//! [`BoundaryKind::AttributeRunStart`].
//!
//! [`BoundaryKind::AttributeRunStart`]: crate::BoundaryKind::AttributeRunStart

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::point::TextPoint;
use crate::tree::{Direction, NodeId, TextTree};

/// The value of a single text attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A boolean marker, such as a spelling-error flag.
    Bool(bool),
    /// An integral value, such as a font weight.
    Integer(i64),
    /// A fractional value, such as a font size in points.
    Number(f64),
    /// A textual value, such as a font family name.
    Text(Cow<'static, str>),
}

/// An ordered name-to-value attribute mapping.
///
/// Produced fresh by every query; the engine never caches one. Entries are
/// kept sorted by name, so two sets with equal contents compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    entries: Vec<(Cow<'static, str>, AttrValue)>,
}

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `name`.
    pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: AttrValue) {
        let name = name.into();
        match self.entries.binary_search_by(|(n, _)| n.cmp(&name)) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: AttrValue) -> Self {
        self.set(name, value);
        self
    }

    /// The value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .binary_search_by(|(n, _)| n.as_ref().cmp(name))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fills in every entry of `defaults` whose name is absent here. Local
    /// values win.
    pub fn merge_defaults(&mut self, defaults: &Self) {
        for (name, value) in &defaults.entries {
            if self.get(name).is_none() {
                self.set(name.clone(), value.clone());
            }
        }
    }
}

/// The effective attributes at `point`.
///
/// Looks up the attribute span containing the point's offset and, when
/// `include_defaults` is set, fills in container-level defaults that the
/// leaf does not override.
pub fn attributes_at<T: TextTree>(
    tree: &T,
    point: TextPoint,
    include_defaults: bool,
) -> AttributeSet {
    let mut set = span_at(tree, point.leaf, point.offset);
    if include_defaults {
        set.merge_defaults(&tree.default_attributes(point.leaf));
    }
    set
}

/// Attribute-run start offsets within `leaf`, ascending.
///
/// In-leaf span edges are unconditional run starts. Offset 0 is a run start
/// when the transition from the previous leaf breaks the run: a container
/// change always breaks, even when the attribute values happen to match,
/// because consumers must not merge runs across structurally distinct
/// containers; within one container a transition breaks only when the
/// effective sets differ.
pub(crate) fn run_start_candidates<T: TextTree>(tree: &T, leaf: NodeId) -> Vec<usize> {
    let len = tree.text_len(leaf);
    let mut starts: Vec<usize> = tree
        .attribute_spans(leaf)
        .iter()
        .map(|(offset, _)| *offset)
        .filter(|&offset| offset > 0 && offset < len)
        .collect();
    if run_break_before(tree, leaf) {
        starts.insert(0, 0);
    }
    starts
}

fn run_break_before<T: TextTree>(tree: &T, leaf: NodeId) -> bool {
    if !tree.is_text_leaf(leaf) {
        // An embedded object never merges into a neighboring text run.
        return true;
    }
    let mut prev = tree.sibling_leaf(leaf, Direction::Backward);
    while let Some(p) = prev {
        if tree.is_empty_leaf(p) {
            prev = tree.sibling_leaf(p, Direction::Backward);
            continue;
        }
        if !tree.is_text_leaf(p) {
            return true;
        }
        if tree.parent(p) != tree.parent(leaf) {
            return true;
        }
        let prev_end = span_at(tree, p, tree.text_len(p).saturating_sub(1));
        return prev_end != span_at(tree, leaf, 0);
    }
    true
}

/// The explicit attribute span containing `offset` within `leaf`.
fn span_at<T: TextTree>(tree: &T, leaf: NodeId, offset: usize) -> AttributeSet {
    tree.attribute_spans(leaf)
        .iter()
        .rev()
        .find(|(start, _)| *start <= offset)
        .map(|(_, set)| set.clone())
        .unwrap_or_default()
}
