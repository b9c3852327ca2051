// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode segmentation helpers.
//!
//! Everything here wraps the ICU4X segmenters behind plain offset vectors so
//! the rest of the crate never handles segmenter types directly. Word starts
//! are computed over a splice of the adjacent text leaves: a word that
//! crosses a leaf edge must not be treated as two words just because the
//! storage splits it.

use alloc::string::String;
use alloc::vec::Vec;

use icu_segmenter::options::WordBreakInvariantOptions;
use icu_segmenter::{GraphemeClusterSegmenter, WordSegmenter};

use crate::tree::{Direction, NodeId, TextTree};

/// Byte offsets of every grapheme cluster start in `text`, ascending,
/// beginning with 0. The trailing end-of-text break is dropped.
pub(crate) fn cluster_starts(text: &str) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut starts: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
    // ICU4X reports both edges; the end-of-text break is not a cluster start.
    starts.pop();
    starts
}

/// Word start offsets within `leaf`'s text, ascending.
///
/// A word start is a word-segmentation break followed by a non-whitespace
/// character, so trailing spaces attach to the word before them. The
/// segmentation runs over previous text + leaf text + next text whenever the
/// neighbors are text leaves, then keeps only the breaks that fall inside
/// this leaf; offset 0 is therefore a word start only when the text really
/// begins a word in context.
pub(crate) fn word_starts<T: TextTree + ?Sized>(tree: &T, leaf: NodeId) -> Vec<usize> {
    if !tree.is_text_leaf(leaf) {
        return Vec::new();
    }
    let text = tree.leaf_text(leaf);
    if text.is_empty() {
        return Vec::new();
    }

    let mut spliced = String::new();
    let mut prefix = 0;
    if let Some(prev) = neighbor_text_leaf(tree, leaf, Direction::Backward) {
        spliced.push_str(tree.leaf_text(prev));
        prefix = spliced.len();
    }
    spliced.push_str(text);
    if let Some(next) = neighbor_text_leaf(tree, leaf, Direction::Forward) {
        spliced.push_str(tree.leaf_text(next));
    }

    let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
    let mut starts = Vec::new();
    for brk in segmenter.segment_str(&spliced) {
        if brk < prefix || brk >= prefix + text.len() {
            continue;
        }
        let Some(ch) = spliced[brk..].chars().next() else {
            continue;
        };
        if ch.is_whitespace() {
            continue;
        }
        starts.push(brk - prefix);
    }
    starts
}

/// The nearest non-empty text leaf adjacent to `leaf`, if the content is
/// textually contiguous in that direction.
///
/// Empty leaves are transparent; a block boundary or an opaque leaf ends
/// contiguity, so a word never continues across a paragraph or an embedded
/// object.
fn neighbor_text_leaf<T: TextTree + ?Sized>(
    tree: &T,
    leaf: NodeId,
    direction: Direction,
) -> Option<NodeId> {
    let mut current = leaf;
    loop {
        let next = tree.sibling_leaf(current, direction)?;
        let crosses_block = match direction {
            Direction::Forward => tree.is_block_start(next),
            Direction::Backward => tree.is_block_start(current),
        };
        if crosses_block {
            return None;
        }
        if tree.is_empty_leaf(next) {
            current = next;
            continue;
        }
        return tree.is_text_leaf(next).then_some(next);
    }
}
