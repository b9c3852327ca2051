// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positions within the text of a tree.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::attrs::{self, AttributeSet};
use crate::boundary::{self, BoundaryFlags, BoundaryKind};
use crate::error::Error;
use crate::tree::{Direction, NodeId, TextTree};

/// A position in the text of a tree: a leaf plus a content offset into it.
///
/// `TextPoint` is a plain value. It holds no reference to the tree it was
/// derived from, so every operation takes the tree as an argument, and a
/// point goes stale if the tree mutates underneath it; callers revalidate
/// after any mutation.
///
/// The offset is a byte offset into [`TextTree::leaf_text`] and is always 0
/// for opaque embedded leaves. A point at `text_len` is only meaningful as
/// the document end or as the exclusive end of a [`TextRange`]; everywhere
/// else the position "after leaf L" is written as offset 0 of the next leaf.
///
/// [`TextRange`]: crate::TextRange
#[derive(Copy, Clone, Debug)]
pub struct TextPoint {
    /// The leaf this point addresses.
    pub leaf: NodeId,
    /// Content byte offset within the leaf's text.
    pub offset: usize,
    /// Marks a caret that belongs to the end of the previous wrapped line
    /// even though its raw offset sits on the next line's first character.
    ///
    /// Line wrap makes those two positions share an offset; this flag
    /// records which one was meant. It does not participate in equality or
    /// ordering. See [`TextPoint::adjust_for_end_of_line_insertion`].
    pub is_end_of_line_insertion_point: bool,
}

impl PartialEq for TextPoint {
    fn eq(&self, other: &Self) -> bool {
        self.leaf == other.leaf && self.offset == other.offset
    }
}

impl Eq for TextPoint {}

impl Hash for TextPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.leaf.hash(state);
        self.offset.hash(state);
    }
}

impl TextPoint {
    /// Creates a point at `offset` within `leaf`.
    ///
    /// The caller is responsible for `offset` being in bounds and on a
    /// character boundary; use [`TextPoint::validated`] when that is not
    /// already established.
    pub fn new(leaf: NodeId, offset: usize) -> Self {
        Self {
            leaf,
            offset,
            is_end_of_line_insertion_point: false,
        }
    }

    /// Creates a point after checking `offset` against the tree.
    ///
    /// Fails when `offset` exceeds the leaf's text length (any nonzero
    /// offset, for an opaque leaf) or does not lie on a UTF-8 character
    /// boundary.
    pub fn validated<T: TextTree>(tree: &T, leaf: NodeId, offset: usize) -> Result<Self, Error> {
        let text = tree.leaf_text(leaf);
        if offset > text.len() {
            return Err(Error::out_of_bounds(offset, text.len()));
        }
        if !text.is_char_boundary(offset) {
            return Err(Error::not_on_char_boundary(offset, text.len()));
        }
        Ok(Self::new(leaf, offset))
    }

    /// Creates a point from a rendered offset, mapping it into content space
    /// via [`TextTree::rendered_to_content`].
    pub fn from_rendered<T: TextTree>(tree: &T, leaf: NodeId, rendered: usize) -> Self {
        Self::new(leaf, tree.rendered_to_content(leaf, rendered))
    }

    /// Returns this point with the end-of-line-insertion flag set.
    #[must_use]
    pub fn with_end_of_line_insertion(mut self) -> Self {
        self.is_end_of_line_insertion_point = true;
        self
    }

    /// Orders two points by document position: leaf order first, offset
    /// within the same leaf second.
    pub fn compare<T: TextTree>(&self, other: &Self, tree: &T) -> Ordering {
        if self.leaf == other.leaf {
            self.offset.cmp(&other.offset)
        } else {
            tree.compare_leaves(self.leaf, other.leaf)
        }
    }

    /// The character at this point, or `None` at end of text.
    pub fn char_at<T: TextTree>(&self, tree: &T) -> Option<char> {
        tree.char_at(self.leaf, self.offset)
    }

    /// Whether the character at this point is a line feed.
    pub fn is_line_feed<T: TextTree>(&self, tree: &T) -> bool {
        self.char_at(tree) == Some('\n')
    }

    /// Whether the character at this point is Unicode whitespace.
    ///
    /// A point at end of text is not itself whitespace.
    pub fn is_space<T: TextTree>(&self, tree: &T) -> bool {
        self.char_at(tree).is_some_and(char::is_whitespace)
    }

    /// Whether this is the first position of the document.
    pub fn is_document_start<T: TextTree>(&self, tree: &T) -> bool {
        self.offset == 0 && tree.is_document_edge(self.leaf, Direction::Backward)
    }

    /// Whether this is the position past the last character of the document.
    pub fn is_document_end<T: TextTree>(&self, tree: &T) -> bool {
        self.offset == tree.text_len(self.leaf)
            && tree.is_document_edge(self.leaf, Direction::Forward)
    }

    /// Whether this point begins a paragraph.
    ///
    /// Only offset 0 of a leaf can begin a paragraph; it does when a block
    /// boundary, an explicit line break, or the document edge precedes the
    /// leaf. With `ignore_list_marker`, marker leaves are invisible: a point
    /// inside one never starts a paragraph, and markers are skipped when
    /// looking at what precedes the leaf.
    pub fn is_paragraph_start<T: TextTree>(&self, tree: &T, ignore_list_marker: bool) -> bool {
        if ignore_list_marker && tree.is_list_item_marker(self.leaf) {
            return false;
        }
        self.offset == 0 && boundary::paragraph_boundary_before(tree, self.leaf, ignore_list_marker)
    }

    /// Resolves an end-of-line insertion point to the position word and line
    /// search should treat as the origin.
    ///
    /// When the flag is set, the raw offset sits on the first character
    /// after a line wrap; the equivalent end-of-previous-line position is
    /// the start of the preceding cluster. Without the flag this is the
    /// identity (modulo clearing the flag).
    #[must_use]
    pub fn adjust_for_end_of_line_insertion<T: TextTree>(&self, tree: &T) -> Self {
        let raw = Self::new(self.leaf, self.offset);
        if !self.is_end_of_line_insertion_point || raw.is_document_start(tree) {
            return raw;
        }
        raw.find_boundary(
            tree,
            BoundaryKind::Cluster,
            Direction::Backward,
            BoundaryFlags::empty(),
        )
    }

    /// The point immediately before or after this point's leaf.
    ///
    /// Forward yields offset 0 of the next leaf; backward yields the end of
    /// the previous leaf's text. List item markers are skipped when
    /// `ignore_list_marker` is set. Returns `None` at the document edge, or
    /// when `require_editable` is set and the neighbor lies under a
    /// different editable root than this point.
    pub fn neighbor_leaf<T: TextTree>(
        &self,
        tree: &T,
        direction: Direction,
        require_editable: bool,
        ignore_list_marker: bool,
    ) -> Option<Self> {
        let mut leaf = tree.sibling_leaf(self.leaf, direction)?;
        while ignore_list_marker && tree.is_list_item_marker(leaf) {
            leaf = tree.sibling_leaf(leaf, direction)?;
        }
        if require_editable && tree.editable_root(leaf) != tree.editable_root(self.leaf) {
            return None;
        }
        Some(match direction {
            Direction::Forward => Self::new(leaf, 0),
            Direction::Backward => Self::new(leaf, tree.text_len(leaf)),
        })
    }

    /// Finds the nearest boundary of `kind` from this point in `direction`.
    ///
    /// Never fails for an in-range origin: when no boundary remains before
    /// the document edge, the edge point itself is returned, and searching
    /// again from the edge returns the edge — a fixed point callers can
    /// detect. See [`BoundaryFlags`] for origin-inclusion, editable
    /// clamping, and marker handling.
    #[must_use]
    pub fn find_boundary<T: TextTree>(
        &self,
        tree: &T,
        kind: BoundaryKind,
        direction: Direction,
        flags: BoundaryFlags,
    ) -> Self {
        boundary::find_boundary(tree, *self, kind, direction, flags)
    }

    /// Applies [`find_boundary`](Self::find_boundary) up to `count` times,
    /// stopping early at the document edge.
    ///
    /// Returns the final point and the number of boundaries actually
    /// crossed, which is less than `count` when the edge cut the walk short.
    pub fn move_by<T: TextTree>(
        &self,
        tree: &T,
        kind: BoundaryKind,
        count: usize,
        direction: Direction,
        flags: BoundaryFlags,
    ) -> (Self, usize) {
        let flags = flags - BoundaryFlags::INCLUDE_ORIGIN;
        let mut point = *self;
        let mut moved = 0;
        while moved < count {
            let next = point.find_boundary(tree, kind, direction, flags);
            if next == point {
                break;
            }
            point = next;
            moved += 1;
        }
        (point, moved)
    }

    /// The effective attributes at this point.
    ///
    /// See [`attributes_at`](crate::attributes_at).
    pub fn attributes<T: TextTree>(&self, tree: &T, include_defaults: bool) -> AttributeSet {
        attrs::attributes_at(tree, *self, include_defaults)
    }

    /// Finds the nearest attribute-run start from this point.
    ///
    /// Shorthand for [`find_boundary`](Self::find_boundary) with
    /// [`BoundaryKind::AttributeRunStart`].
    #[must_use]
    pub fn find_attribute_run_start<T: TextTree>(
        &self,
        tree: &T,
        direction: Direction,
        include_origin: bool,
    ) -> Self {
        let flags = if include_origin {
            BoundaryFlags::INCLUDE_ORIGIN
        } else {
            BoundaryFlags::empty()
        };
        self.find_boundary(tree, BoundaryKind::AttributeRunStart, direction, flags)
    }

}
