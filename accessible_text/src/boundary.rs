// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary search across the leaves of a tree.
//!
//! Every kind of boundary is found the same way: a same-leaf scan over the
//! candidate offsets inside the origin's leaf, then a leaf-by-leaf walk via
//! [`TextTree::sibling_leaf`] that resumes the scan in each new leaf. The
//! kinds differ only in how a leaf's candidate offsets are computed.

use alloc::vec;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::point::TextPoint;
use crate::tree::{Direction, NodeId, TextTree};
use crate::{analysis, attrs};

/// A kind of text boundary to search for.
///
/// Cluster boundaries are the finest grain; the others are computed from
/// segmentation data, layout line tables, block structure, and attribute
/// spans respectively.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoundaryKind {
    /// A grapheme cluster start. An opaque embedded leaf is one cluster.
    Cluster,
    /// The first character of a word.
    WordStart,
    /// The first character of a rendered line.
    LineStart,
    /// The first character of a paragraph.
    ParagraphStart,
    /// The first character of a maximal run of identical text attributes.
    AttributeRunStart,
}

bitflags! {
    /// Configuration for [`TextPoint::find_boundary`].
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct BoundaryFlags: u8 {
        /// Return the origin unchanged when it already sits on the requested
        /// boundary; otherwise the search always moves strictly past it.
        const INCLUDE_ORIGIN = 1 << 0;
        /// When the origin lies inside an editable root, never return a
        /// point outside that root; the walk treats the editable boundary as
        /// the document edge.
        const STOP_IN_EDITABLE = 1 << 1;
        /// Make list item marker leaves invisible to line and paragraph
        /// search.
        const IGNORE_LIST_ITEM_MARKER = 1 << 2;
    }
}

pub(crate) fn find_boundary<T: TextTree>(
    tree: &T,
    origin: TextPoint,
    kind: BoundaryKind,
    direction: Direction,
    flags: BoundaryFlags,
) -> TextPoint {
    let origin = match kind {
        BoundaryKind::WordStart | BoundaryKind::LineStart => {
            origin.adjust_for_end_of_line_insertion(tree)
        }
        _ => TextPoint::new(origin.leaf, origin.offset),
    };
    if flags.contains(BoundaryFlags::INCLUDE_ORIGIN) && is_boundary(tree, &origin, kind, flags) {
        return origin;
    }
    let clamp = if flags.contains(BoundaryFlags::STOP_IN_EDITABLE) {
        tree.editable_root(origin.leaf)
    } else {
        None
    };
    let ignore_marker = flags.contains(BoundaryFlags::IGNORE_LIST_ITEM_MARKER);
    // Markers are only invisible to line and paragraph search.
    let skip_markers =
        ignore_marker && matches!(kind, BoundaryKind::LineStart | BoundaryKind::ParagraphStart);
    match kind {
        BoundaryKind::Cluster => {
            walk(tree, origin, direction, clamp, false, cluster_candidates)
        }
        BoundaryKind::WordStart => walk(tree, origin, direction, clamp, false, word_candidates),
        BoundaryKind::LineStart => {
            walk(tree, origin, direction, clamp, skip_markers, line_candidates)
        }
        BoundaryKind::ParagraphStart => {
            walk(tree, origin, direction, clamp, skip_markers, |tree, leaf| {
                paragraph_candidates(tree, leaf, ignore_marker)
            })
        }
        BoundaryKind::AttributeRunStart => walk(
            tree,
            origin,
            direction,
            clamp,
            false,
            attrs::run_start_candidates,
        ),
    }
}

/// Whether `point` already sits on a boundary of `kind`.
pub(crate) fn is_boundary<T: TextTree>(
    tree: &T,
    point: &TextPoint,
    kind: BoundaryKind,
    flags: BoundaryFlags,
) -> bool {
    match kind {
        BoundaryKind::Cluster => {
            // The document end is a valid cluster position even though no
            // cluster starts there.
            point.is_document_end(tree)
                || cluster_candidates(tree, point.leaf).contains(&point.offset)
        }
        BoundaryKind::WordStart => word_candidates(tree, point.leaf).contains(&point.offset),
        BoundaryKind::LineStart => line_candidates(tree, point.leaf).contains(&point.offset),
        BoundaryKind::ParagraphStart => {
            let ignore_marker = flags.contains(BoundaryFlags::IGNORE_LIST_ITEM_MARKER);
            paragraph_candidates(tree, point.leaf, ignore_marker).contains(&point.offset)
        }
        BoundaryKind::AttributeRunStart => {
            attrs::run_start_candidates(tree, point.leaf).contains(&point.offset)
        }
    }
}

/// Whether a paragraph break lies immediately before `leaf`: a block-level
/// boundary, a preceding explicit line break, or the document edge.
pub(crate) fn paragraph_boundary_before<T: TextTree>(
    tree: &T,
    leaf: NodeId,
    ignore_list_marker: bool,
) -> bool {
    if tree.is_block_start(leaf) {
        return true;
    }
    let mut prev = tree.sibling_leaf(leaf, Direction::Backward);
    while let Some(p) = prev {
        if (ignore_list_marker && tree.is_list_item_marker(p)) || tree.is_empty_leaf(p) {
            // A skipped leaf still carries the block boundary that preceded
            // it.
            if tree.is_block_start(p) {
                return true;
            }
            prev = tree.sibling_leaf(p, Direction::Backward);
            continue;
        }
        return tree.leaf_text(p).ends_with('\n');
    }
    true
}

/// The shared search skeleton: scan the origin leaf past the origin offset,
/// then step leaf-by-leaf and take the first candidate of each new leaf.
fn walk<T, F>(
    tree: &T,
    origin: TextPoint,
    direction: Direction,
    clamp: Option<NodeId>,
    skip_markers: bool,
    candidates: F,
) -> TextPoint
where
    T: TextTree,
    F: Fn(&T, NodeId) -> Vec<usize>,
{
    if !tree.is_empty_leaf(origin.leaf) {
        let cands = candidates(tree, origin.leaf);
        let found = match direction {
            Direction::Forward => cands.iter().copied().find(|&c| c > origin.offset),
            Direction::Backward => cands.iter().rev().copied().find(|&c| c < origin.offset),
        };
        if let Some(offset) = found {
            return TextPoint::new(origin.leaf, offset);
        }
    }
    let mut leaf = origin.leaf;
    loop {
        let Some(next) = step(tree, leaf, direction, clamp, skip_markers) else {
            return edge_point(tree, leaf, direction);
        };
        leaf = next;
        if tree.is_empty_leaf(leaf) {
            continue;
        }
        let cands = candidates(tree, leaf);
        let found = match direction {
            Direction::Forward => cands.first().copied(),
            Direction::Backward => cands.last().copied(),
        };
        if let Some(offset) = found {
            return TextPoint::new(leaf, offset);
        }
    }
}

fn step<T: TextTree>(
    tree: &T,
    leaf: NodeId,
    direction: Direction,
    clamp: Option<NodeId>,
    skip_markers: bool,
) -> Option<NodeId> {
    let mut next = tree.sibling_leaf(leaf, direction)?;
    while skip_markers && tree.is_list_item_marker(next) {
        next = tree.sibling_leaf(next, direction)?;
    }
    if let Some(root) = clamp {
        if tree.editable_root(next) != Some(root) {
            return None;
        }
    }
    Some(next)
}

fn edge_point<T: TextTree>(tree: &T, leaf: NodeId, direction: Direction) -> TextPoint {
    match direction {
        Direction::Forward => TextPoint::new(leaf, tree.text_len(leaf)),
        Direction::Backward => TextPoint::new(leaf, 0),
    }
}

fn cluster_candidates<T: TextTree>(tree: &T, leaf: NodeId) -> Vec<usize> {
    if !tree.is_text_leaf(leaf) {
        return vec![0];
    }
    analysis::cluster_starts(tree.leaf_text(leaf))
}

fn word_candidates<T: TextTree>(tree: &T, leaf: NodeId) -> Vec<usize> {
    if !tree.is_text_leaf(leaf) {
        // An embedded object is a word of its own.
        return vec![0];
    }
    analysis::word_starts(tree, leaf)
}

fn line_candidates<T: TextTree>(tree: &T, leaf: NodeId) -> Vec<usize> {
    let mut starts: Vec<usize> = tree.line_starts(leaf).to_vec();
    if tree.is_text_leaf(leaf) {
        let text = tree.leaf_text(leaf);
        for (i, ch) in text.char_indices() {
            // A hard break ending the leaf puts the line start on the next
            // leaf instead.
            if ch == '\n' && i + 1 < text.len() {
                starts.push(i + 1);
            }
        }
        starts.sort_unstable();
        starts.dedup();
    }
    starts
}

fn paragraph_candidates<T: TextTree>(
    tree: &T,
    leaf: NodeId,
    ignore_list_marker: bool,
) -> Vec<usize> {
    if ignore_list_marker && tree.is_list_item_marker(leaf) {
        return Vec::new();
    }
    let mut starts = Vec::new();
    if paragraph_boundary_before(tree, leaf, ignore_list_marker) {
        starts.push(0);
    }
    if tree.is_text_leaf(leaf) {
        let text = tree.leaf_text(leaf);
        for (i, ch) in text.char_indices() {
            if ch == '\n' && i + 1 < text.len() {
                starts.push(i + 1);
            }
        }
    }
    starts
}
