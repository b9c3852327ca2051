// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spans of text across a tree.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use peniko::kurbo::{Point, Rect};

use crate::analysis;
use crate::error::Error;
use crate::point::TextPoint;
use crate::tree::{Direction, NodeId, ScrollAlignment, SelectionHost, TextTree};

/// A span of text between two points, end exclusive.
///
/// A range whose endpoints are equal is *collapsed* and represents a caret.
/// Most operations assume `start <= end` in document order; construction
/// paths that can transiently invert a range (endpoint-by-endpoint updates
/// in protocol adapters) are expected to call [`normalized`] before using
/// it.
///
/// [`normalized`]: TextRange::normalized
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TextRange {
    /// The first position of the span.
    pub start: TextPoint,
    /// The position after the last character of the span.
    pub end: TextPoint,
}

impl TextRange {
    /// Creates a range between two points.
    pub fn new(start: TextPoint, end: TextPoint) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed range at `point`.
    pub fn collapsed(point: TextPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// The range covering the entirety of one leaf.
    ///
    /// Collapsed for empty and opaque leaves, which hold no text of their
    /// own.
    pub fn from_leaf<T: TextTree>(tree: &T, leaf: NodeId) -> Self {
        Self {
            start: TextPoint::new(leaf, 0),
            end: TextPoint::new(leaf, tree.text_len(leaf)),
        }
    }

    /// Creates a range after checking both endpoints against the tree and
    /// their mutual order.
    pub fn validated<T: TextTree>(
        tree: &T,
        start: TextPoint,
        end: TextPoint,
    ) -> Result<Self, Error> {
        let start = TextPoint::validated(tree, start.leaf, start.offset)?;
        let end = TextPoint::validated(tree, end.leaf, end.offset)?;
        if start.compare(&end, tree) == Ordering::Greater {
            return Err(Error::inverted_range(start.offset, end.offset));
        }
        Ok(Self { start, end })
    }

    /// Whether this range is a caret position.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns this range with its endpoints in document order.
    #[must_use]
    pub fn normalized<T: TextTree>(&self, tree: &T) -> Self {
        if self.start.compare(&self.end, tree) == Ordering::Greater {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            *self
        }
    }

    /// Whether `point` lies within `[start, end)`.
    pub fn contains_point<T: TextTree>(&self, tree: &T, point: &TextPoint) -> bool {
        self.start.compare(point, tree) != Ordering::Greater
            && point.compare(&self.end, tree) == Ordering::Less
    }

    /// Clamps both endpoints into `container`'s subtree.
    ///
    /// Returns `false` and leaves the range unmodified when the range does
    /// not intersect the container at all. A start outside the container is
    /// clamped to offset 0 of the container's first leaf within the range;
    /// an end outside is clamped to the end of its last leaf.
    pub fn crop<T: TextTree>(&mut self, tree: &T, container: NodeId) -> bool {
        let mut start = self.start;
        let mut end = self.end;
        if !is_in_subtree(tree, start.leaf, container) {
            let mut leaf = start.leaf;
            loop {
                let Some(next) = tree.sibling_leaf(leaf, Direction::Forward) else {
                    return false;
                };
                leaf = next;
                if is_in_subtree(tree, leaf, container) {
                    start = TextPoint::new(leaf, 0);
                    break;
                }
            }
        }
        if !is_in_subtree(tree, end.leaf, container) {
            let mut leaf = end.leaf;
            loop {
                let Some(prev) = tree.sibling_leaf(leaf, Direction::Backward) else {
                    return false;
                };
                leaf = prev;
                if is_in_subtree(tree, leaf, container) {
                    end = TextPoint::new(leaf, tree.text_len(leaf));
                    break;
                }
            }
        }
        if start.compare(&end, tree) == Ordering::Greater {
            return false;
        }
        self.start = start;
        self.end = end;
        true
    }

    /// The union of the bounds of every character position the range covers.
    ///
    /// Geometry is best effort: a leaf or character without cached bounds
    /// contributes nothing, so the result can be a partial union rather
    /// than an "unavailable" signal. An empty or fully unlocated range
    /// yields [`Rect::ZERO`].
    pub fn bounds<T: TextTree>(&self, tree: &T) -> Rect {
        let mut acc: Option<Rect> = None;
        let mut union = |rect: Rect| {
            acc = Some(acc.map_or(rect, |a| a.union(rect)));
        };
        for segment in self.segments(tree) {
            let leaf = segment.start.leaf;
            if !tree.is_text_leaf(leaf) {
                if let Some(rect) = tree.leaf_bounds(leaf) {
                    union(rect);
                }
                continue;
            }
            for offset in analysis::cluster_starts(tree.leaf_text(leaf)) {
                if offset < segment.start.offset || offset >= segment.end.offset {
                    continue;
                }
                if let Some(rect) = tree.char_bounds(leaf, offset) {
                    union(rect);
                }
            }
        }
        acc.unwrap_or(Rect::ZERO)
    }

    /// The point within this range under the screen coordinate `(x, y)`.
    ///
    /// Hit-tests leaf bounds first, then the characters of the hit leaf.
    /// Falls back to [`start`](Self::start) when no character bound contains
    /// the coordinate; that fallback is the documented behavior, not a
    /// failure.
    pub fn point_at<T: TextTree>(&self, tree: &T, x: f64, y: f64) -> TextPoint {
        let target = Point::new(x, y);
        for segment in self.segments(tree) {
            let leaf = segment.start.leaf;
            let Some(leaf_rect) = tree.leaf_bounds(leaf) else {
                continue;
            };
            if !leaf_rect.contains(target) {
                continue;
            }
            if !tree.is_text_leaf(leaf) {
                return TextPoint::new(leaf, 0);
            }
            for offset in analysis::cluster_starts(tree.leaf_text(leaf)) {
                if offset < segment.start.offset || offset >= segment.end.offset {
                    continue;
                }
                if let Some(rect) = tree.char_bounds(leaf, offset) {
                    if rect.contains(target) {
                        return TextPoint::new(leaf, offset);
                    }
                }
            }
        }
        self.start
    }

    /// Lazily decomposes the range into consecutive single-leaf sub-ranges.
    ///
    /// Driven purely by the range value and a cursor, so calling this again
    /// restarts the iteration without side effects. Empty leaves inside the
    /// range yield zero-length segments.
    pub fn segments<'a, T: TextTree>(&self, tree: &'a T) -> Segments<'a, T> {
        let done = self.start.compare(&self.end, tree) == Ordering::Greater;
        Segments {
            tree,
            cursor: self.start,
            end: self.end,
            done,
        }
    }

    /// The text the range covers, concatenated across leaves.
    ///
    /// Opaque embedded leaves contribute no text.
    pub fn text<T: TextTree>(&self, tree: &T) -> String {
        let mut out = String::new();
        for segment in self.segments(tree) {
            let text = tree.leaf_text(segment.start.leaf);
            out.push_str(&text[segment.start.offset..segment.end.offset]);
        }
        out
    }

    /// Moves an end that falls exactly on a leaf's first offset back to the
    /// end of the previous leaf, so the range does not appear to include a
    /// leaf it covers no content of.
    ///
    /// The symmetric adjustment at [`start`](Self::start) is intentionally
    /// not performed; only the end endpoint is ever retracted.
    pub fn retract_end_from_leaf_start<T: TextTree>(&mut self, tree: &T) {
        if self.end.offset != 0 || self.end.leaf == self.start.leaf {
            return;
        }
        if let Some(prev) = self
            .end
            .neighbor_leaf(tree, Direction::Backward, false, false)
        {
            if self.start.compare(&prev, tree) != Ordering::Greater {
                self.end = prev;
            }
        }
    }

    /// Asks the host to adopt this range as selection number `index`.
    ///
    /// May re-enter the host; make this the last operation in a call chain
    /// and revalidate any held points afterwards.
    pub fn select<H: SelectionHost>(&self, host: &mut H, index: isize) -> bool {
        host.set_selection(self, index)
    }

    /// Asks the host to scroll this range into view.
    ///
    /// May re-enter the host; make this the last operation in a call chain
    /// and revalidate any held points afterwards.
    pub fn scroll_into_view<H: SelectionHost>(&self, host: &mut H, alignment: ScrollAlignment) {
        host.scroll_into_view(self, alignment);
    }
}

/// The current selection ranges scoped under `root`, excluding a collapsed
/// caret.
pub fn selection_ranges<H: SelectionHost>(host: &H, root: NodeId) -> Vec<TextRange> {
    host.selection_ranges(root)
}

/// The current caret position under `root`, if one exists.
pub fn caret<H: SelectionHost>(host: &H, root: NodeId) -> Option<TextPoint> {
    host.caret(root)
}

/// Iterator over the single-leaf sub-ranges of a [`TextRange`].
///
/// See [`TextRange::segments`].
pub struct Segments<'a, T: TextTree> {
    tree: &'a T,
    cursor: TextPoint,
    end: TextPoint,
    done: bool,
}

impl<T: TextTree> core::fmt::Debug for Segments<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Segments")
            .field("cursor", &self.cursor)
            .field("end", &self.end)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<T: TextTree> Iterator for Segments<'_, T> {
    type Item = TextRange;

    fn next(&mut self) -> Option<TextRange> {
        if self.done {
            return None;
        }
        let last = self.cursor.leaf == self.end.leaf;
        let leaf_end = if last {
            self.end
        } else {
            TextPoint::new(self.cursor.leaf, self.tree.text_len(self.cursor.leaf))
        };
        let segment = TextRange::new(self.cursor, leaf_end);
        if last {
            self.done = true;
        } else {
            // Advancing by leaf, not by offset, is what makes empty leaves
            // safe to traverse.
            match self.tree.sibling_leaf(self.cursor.leaf, Direction::Forward) {
                Some(next) => self.cursor = TextPoint::new(next, 0),
                None => self.done = true,
            }
        }
        Some(segment)
    }
}

fn is_in_subtree<T: TextTree>(tree: &T, leaf: NodeId, container: NodeId) -> bool {
    let mut node = Some(leaf);
    while let Some(n) = node {
        if n == container {
            return true;
        }
        node = tree.parent(n);
    }
    false
}
