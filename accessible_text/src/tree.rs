// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface the navigation engine consumes.
//!
//! The engine never stores text itself. All content lives in an externally
//! managed tree of text-bearing nodes, and every algorithm in this crate is
//! written against [`TextTree`], so a process-local tree and a cache backed
//! by an out-of-process peer expose identical behavior.

use alloc::vec::Vec;
use core::cmp::Ordering;

use peniko::kurbo::Rect;

use crate::attrs::AttributeSet;
use crate::point::TextPoint;
use crate::range::TextRange;

/// Identifies one node in an accessible tree.
///
/// A `NodeId` is a non-owning reference: it stays meaningful only while the
/// tree entry it names exists. Equality is identity, not document order; use
/// [`TextTree::compare_leaves`] to order two leaves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub u64);

/// Document-order direction of a search or walk.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Toward the end of the document.
    Forward,
    /// Toward the start of the document.
    Backward,
}

impl Direction {
    /// Whether this is [`Direction::Forward`].
    #[inline]
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Read access to one tree of text-bearing nodes.
///
/// A *leaf* either holds text directly or stands for a single opaque embedded
/// object (an image, a widget) that occupies exactly one cluster position.
/// Interior nodes only appear through [`parent`](Self::parent) and the
/// attribute defaults they contribute.
///
/// Implementations own thread affinity and any cross-process marshalling.
/// Every method is a point-in-time snapshot read; calling any of them with a
/// `NodeId` whose tree entry has been removed is a contract violation the
/// engine does not defend against.
pub trait TextTree {
    /// The text content of `leaf`. Empty for opaque embedded leaves.
    ///
    /// Offsets throughout this crate are byte offsets into this string
    /// ("content" offsets, as opposed to rendered offsets).
    fn leaf_text(&self, leaf: NodeId) -> &str;

    /// Whether `leaf` holds text, as opposed to an opaque embedded object.
    fn is_text_leaf(&self, leaf: NodeId) -> bool;

    /// The parent node, or `None` for the tree root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The next or previous leaf in pre-order document order, descending into
    /// and climbing out of subtrees as needed.
    ///
    /// This is the tree-walk primitive all cross-leaf boundary search is
    /// built on.
    fn sibling_leaf(&self, leaf: NodeId, direction: Direction) -> Option<NodeId>;

    /// Orders `a` and `b` by document position.
    fn compare_leaves(&self, a: NodeId, b: NodeId) -> Ordering;

    /// Whether a block-level boundary lies immediately before `leaf`.
    ///
    /// This covers both "the leaf opens a block" and "the previous leaf
    /// closed one"; paragraph search treats either as a paragraph break.
    fn is_block_start(&self, leaf: NodeId) -> bool;

    /// The length of `leaf`'s text in bytes.
    fn text_len(&self, leaf: NodeId) -> usize {
        self.leaf_text(leaf).len()
    }

    /// The character at a content offset, or `None` at or past end of text.
    fn char_at(&self, leaf: NodeId, offset: usize) -> Option<char> {
        self.leaf_text(leaf).get(offset..)?.chars().next()
    }

    /// Whether `leaf` is a logically empty text leaf.
    ///
    /// Empty leaves occupy no positions; boundary search skips them so it
    /// never produces a degenerate segment. Opaque leaves are not empty even
    /// though their text is.
    fn is_empty_leaf(&self, leaf: NodeId) -> bool {
        self.is_text_leaf(leaf) && self.leaf_text(leaf).is_empty()
    }

    /// Whether no further leaf exists in `direction` at the document level.
    fn is_document_edge(&self, leaf: NodeId, direction: Direction) -> bool {
        self.sibling_leaf(leaf, direction).is_none()
    }

    /// Maps a rendered offset (post whitespace collapse and generated
    /// content) to a content offset. The identity mapping by default.
    fn rendered_to_content(&self, leaf: NodeId, rendered: usize) -> usize {
        let _ = leaf;
        rendered
    }

    /// Maps a content offset to a rendered offset. The identity mapping by
    /// default.
    fn content_to_rendered(&self, leaf: NodeId, content: usize) -> usize {
        let _ = leaf;
        content
    }

    /// The nearest editable ancestor of `leaf`, if any.
    fn editable_root(&self, leaf: NodeId) -> Option<NodeId> {
        let _ = leaf;
        None
    }

    /// Whether `leaf` renders a list item marker (a bullet or number).
    fn is_list_item_marker(&self, leaf: NodeId) -> bool {
        let _ = leaf;
        false
    }

    /// Content offsets where a rendered line begins inside `leaf`, ascending.
    ///
    /// Contains 0 iff the leaf begins a line; a leaf continuing the previous
    /// leaf's line reports starts only where it wraps. Implementations
    /// without layout access may report no starts.
    fn line_starts(&self, leaf: NodeId) -> &[usize] {
        let _ = leaf;
        &[]
    }

    /// Ascending offsets where the effective text attributes change, paired
    /// with the attributes effective from that offset. The first entry, when
    /// any, is at offset 0.
    fn attribute_spans(&self, leaf: NodeId) -> &[(usize, AttributeSet)] {
        let _ = leaf;
        &[]
    }

    /// Attributes contributed by `leaf`'s containers (for example a default
    /// font), already merged nearest-ancestor-first.
    fn default_attributes(&self, leaf: NodeId) -> AttributeSet {
        let _ = leaf;
        AttributeSet::new()
    }

    /// Screen-relative bounds of the character at `offset`, when geometry is
    /// cached for this leaf.
    fn char_bounds(&self, leaf: NodeId, offset: usize) -> Option<Rect> {
        let _ = (leaf, offset);
        None
    }

    /// Screen-relative bounds of the whole leaf, when available.
    fn leaf_bounds(&self, leaf: NodeId) -> Option<Rect> {
        let _ = leaf;
        None
    }
}

/// How [`SelectionHost::scroll_into_view`] should place the range.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScrollAlignment {
    /// Scroll the range to the top of the viewport.
    Top,
    /// Center the range in the viewport.
    Center,
    /// Scroll the range to the bottom of the viewport.
    Bottom,
}

/// Selection and scrolling operations a host tree exposes to the range layer.
///
/// Unlike [`TextTree`], these may mutate host state and may re-enter the
/// host (for example by running script). Callers must treat them as the last
/// operation in a call chain and must not hold any derived [`TextPoint`] or
/// [`TextRange`] across the call without revalidating.
pub trait SelectionHost: TextTree {
    /// Adopts `range` as host selection number `index`, creating a new
    /// selection when `index` is out of bounds or negative. Returns whether
    /// the host accepted the range.
    fn set_selection(&mut self, range: &TextRange, index: isize) -> bool;

    /// Scrolls the host so `range` is visible.
    fn scroll_into_view(&mut self, range: &TextRange, alignment: ScrollAlignment);

    /// The current selection ranges scoped under `root`, excluding a
    /// collapsed caret.
    fn selection_ranges(&self, root: NodeId) -> Vec<TextRange>;

    /// The current caret position under `root`, if one exists.
    fn caret(&self, root: NodeId) -> Option<TextPoint>;
}
