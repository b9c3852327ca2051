// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between this crate's points and ranges and AccessKit text
//! positions and selections.
//!
//! AccessKit addresses a position as a node id plus a character index, where
//! "character" means grapheme cluster. [`TreeAccessibility`] maintains the
//! two-way mapping between tree leaves and the AccessKit node ids a consumer
//! allocated for them; the conversions translate offsets through the
//! cluster table of the leaf's text.

use hashbrown::HashMap;

use crate::analysis;
use crate::point::TextPoint;
use crate::range::TextRange;
use crate::tree::{NodeId, TextTree};

/// A two-way mapping between tree leaves and AccessKit node ids.
///
/// The caller owns id allocation; this type only remembers the pairing so
/// positions can be translated in both directions. Re-registering a leaf
/// replaces its previous pairing.
#[derive(Clone, Default, Debug)]
pub struct TreeAccessibility {
    access_ids_by_leaf: HashMap<NodeId, accesskit::NodeId>,
    leaves_by_access_id: HashMap<accesskit::NodeId, NodeId>,
}

impl TreeAccessibility {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `leaf` with `id`.
    pub fn register(&mut self, leaf: NodeId, id: accesskit::NodeId) {
        if let Some(old) = self.access_ids_by_leaf.insert(leaf, id) {
            self.leaves_by_access_id.remove(&old);
        }
        self.leaves_by_access_id.insert(id, leaf);
    }

    /// Removes `leaf`'s pairing, if any.
    pub fn unregister(&mut self, leaf: NodeId) {
        if let Some(id) = self.access_ids_by_leaf.remove(&leaf) {
            self.leaves_by_access_id.remove(&id);
        }
    }

    /// The AccessKit id paired with `leaf`.
    pub fn access_id(&self, leaf: NodeId) -> Option<accesskit::NodeId> {
        self.access_ids_by_leaf.get(&leaf).copied()
    }

    /// The leaf paired with `id`.
    pub fn leaf(&self, id: accesskit::NodeId) -> Option<NodeId> {
        self.leaves_by_access_id.get(&id).copied()
    }
}

impl TextPoint {
    /// Converts this point to an AccessKit text position.
    ///
    /// Returns `None` when the leaf has no registered AccessKit id.
    pub fn to_access_position<T: TextTree>(
        &self,
        tree: &T,
        access: &TreeAccessibility,
    ) -> Option<accesskit::TextPosition> {
        let node = access.access_id(self.leaf)?;
        let character_index = analysis::cluster_starts(tree.leaf_text(self.leaf))
            .iter()
            .filter(|&&start| start < self.offset)
            .count();
        Some(accesskit::TextPosition {
            node,
            character_index,
        })
    }

    /// Converts an AccessKit text position to a point.
    ///
    /// A character index past the last cluster maps to the leaf's end of
    /// text. Returns `None` when the position's node is not registered.
    pub fn from_access_position<T: TextTree>(
        position: &accesskit::TextPosition,
        tree: &T,
        access: &TreeAccessibility,
    ) -> Option<Self> {
        let leaf = access.leaf(position.node)?;
        let starts = analysis::cluster_starts(tree.leaf_text(leaf));
        let offset = starts
            .get(position.character_index)
            .copied()
            .unwrap_or_else(|| tree.text_len(leaf));
        Some(Self::new(leaf, offset))
    }
}

impl TextRange {
    /// Converts this range to an AccessKit selection, start as anchor and
    /// end as focus.
    pub fn to_access_selection<T: TextTree>(
        &self,
        tree: &T,
        access: &TreeAccessibility,
    ) -> Option<accesskit::TextSelection> {
        let anchor = self.start.to_access_position(tree, access)?;
        let focus = self.end.to_access_position(tree, access)?;
        Some(accesskit::TextSelection { anchor, focus })
    }

    /// Converts an AccessKit selection to a range.
    ///
    /// The result may be inverted when the selection's focus precedes its
    /// anchor; see [`TextRange::normalized`].
    pub fn from_access_selection<T: TextTree>(
        selection: &accesskit::TextSelection,
        tree: &T,
        access: &TreeAccessibility,
    ) -> Option<Self> {
        let start = TextPoint::from_access_position(&selection.anchor, tree, access)?;
        let end = TextPoint::from_access_position(&selection.focus, tree, access)?;
        Some(Self::new(start, end))
    }
}
