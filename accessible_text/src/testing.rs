// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory arena tree used by the test suites.
//!
//! `TestTree` plays the role of the externally managed accessible tree:
//! containers (block or inline, optionally editable), text leaves, list item
//! markers, and opaque object leaves, with per-leaf line-start tables,
//! attribute spans, and an optional fixed-cell character grid for geometry
//! tests.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use peniko::kurbo::Rect;

use crate::attrs::AttributeSet;
use crate::point::TextPoint;
use crate::range::TextRange;
use crate::tree::{Direction, NodeId, ScrollAlignment, SelectionHost, TextTree};

/// Character cell size of the fixture's geometry grid.
pub(crate) const CELL: f64 = 10.0;

pub(crate) struct TestTree {
    nodes: Vec<TestNode>,
    selections: Vec<TextRange>,
    caret: Option<TextPoint>,
    pub(crate) scrolled: Vec<(TextRange, ScrollAlignment)>,
}

struct TestNode {
    parent: Option<usize>,
    children: Vec<usize>,
    data: NodeData,
}

enum NodeData {
    Container {
        block: bool,
        editable: bool,
        defaults: AttributeSet,
    },
    Text {
        text: String,
        marker: bool,
        line_starts: Vec<usize>,
        spans: Vec<(usize, AttributeSet)>,
        grid_origin: Option<(f64, f64)>,
    },
    Object {
        line_starts: Vec<usize>,
        bounds: Option<Rect>,
    },
}

impl TestTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![TestNode {
                parent: None,
                children: Vec::new(),
                data: NodeData::Container {
                    block: true,
                    editable: false,
                    defaults: AttributeSet::new(),
                },
            }],
            selections: Vec::new(),
            caret: None,
            scrolled: Vec::new(),
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn block(&mut self, parent: NodeId) -> NodeId {
        self.push(
            parent,
            NodeData::Container {
                block: true,
                editable: false,
                defaults: AttributeSet::new(),
            },
        )
    }

    pub(crate) fn inline(&mut self, parent: NodeId) -> NodeId {
        self.push(
            parent,
            NodeData::Container {
                block: false,
                editable: false,
                defaults: AttributeSet::new(),
            },
        )
    }

    pub(crate) fn editable(&mut self, parent: NodeId) -> NodeId {
        self.push(
            parent,
            NodeData::Container {
                block: true,
                editable: true,
                defaults: AttributeSet::new(),
            },
        )
    }

    pub(crate) fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(
            parent,
            NodeData::Text {
                text: text.into(),
                marker: false,
                line_starts: vec![0],
                spans: vec![(0, AttributeSet::new())],
                grid_origin: None,
            },
        )
    }

    pub(crate) fn marker(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.text(parent, text);
        if let NodeData::Text { marker, .. } = &mut self.nodes[idx(id)].data {
            *marker = true;
        }
        id
    }

    pub(crate) fn object(&mut self, parent: NodeId) -> NodeId {
        self.push(
            parent,
            NodeData::Object {
                line_starts: Vec::new(),
                bounds: None,
            },
        )
    }

    pub(crate) fn set_line_starts(&mut self, leaf: NodeId, starts: &[usize]) {
        match &mut self.nodes[idx(leaf)].data {
            NodeData::Text { line_starts, .. } | NodeData::Object { line_starts, .. } => {
                *line_starts = starts.to_vec();
            }
            NodeData::Container { .. } => panic!("not a leaf"),
        }
    }

    pub(crate) fn set_attribute_spans(&mut self, leaf: NodeId, new: Vec<(usize, AttributeSet)>) {
        match &mut self.nodes[idx(leaf)].data {
            NodeData::Text { spans, .. } => *spans = new,
            _ => panic!("not a text leaf"),
        }
    }

    pub(crate) fn set_defaults(&mut self, container: NodeId, new: AttributeSet) {
        match &mut self.nodes[idx(container)].data {
            NodeData::Container { defaults, .. } => *defaults = new,
            _ => panic!("not a container"),
        }
    }

    /// Places `leaf` on the geometry grid: each character occupies a
    /// `CELL`-sized cell starting at `(x, y)`.
    pub(crate) fn set_char_grid(&mut self, leaf: NodeId, x: f64, y: f64) {
        match &mut self.nodes[idx(leaf)].data {
            NodeData::Text { grid_origin, .. } => *grid_origin = Some((x, y)),
            _ => panic!("not a text leaf"),
        }
    }

    pub(crate) fn set_object_bounds(&mut self, leaf: NodeId, rect: Rect) {
        match &mut self.nodes[idx(leaf)].data {
            NodeData::Object { bounds, .. } => *bounds = Some(rect),
            _ => panic!("not an object leaf"),
        }
    }

    pub(crate) fn set_caret(&mut self, point: TextPoint) {
        self.caret = Some(point);
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TestNode {
            parent: Some(idx(parent)),
            children: Vec::new(),
            data,
        });
        self.nodes[idx(parent)].children.push(id);
        NodeId(id as u64)
    }

    fn leaves(&self) -> Vec<usize> {
        fn visit(nodes: &[TestNode], index: usize, out: &mut Vec<usize>) {
            match &nodes[index].data {
                NodeData::Container { .. } => {
                    for &child in &nodes[index].children {
                        visit(nodes, child, out);
                    }
                }
                _ => out.push(index),
            }
        }
        let mut out = Vec::new();
        visit(&self.nodes, 0, &mut out);
        out
    }

    fn leaf_pos(&self, leaf: usize) -> Option<usize> {
        self.leaves().iter().position(|&l| l == leaf)
    }

    fn nearest_block(&self, leaf: usize) -> usize {
        let mut node = self.nodes[leaf].parent;
        while let Some(n) = node {
            if let NodeData::Container { block: true, .. } = self.nodes[n].data {
                return n;
            }
            node = self.nodes[n].parent;
        }
        0
    }

    fn in_subtree(&self, leaf: usize, container: usize) -> bool {
        let mut node = Some(leaf);
        while let Some(n) = node {
            if n == container {
                return true;
            }
            node = self.nodes[n].parent;
        }
        false
    }
}

fn idx(id: NodeId) -> usize {
    id.0 as usize
}

fn char_count_before(text: &str, offset: usize) -> usize {
    text[..offset].chars().count()
}

impl TextTree for TestTree {
    fn leaf_text(&self, leaf: NodeId) -> &str {
        match &self.nodes[idx(leaf)].data {
            NodeData::Text { text, .. } => text,
            _ => "",
        }
    }

    fn is_text_leaf(&self, leaf: NodeId) -> bool {
        matches!(self.nodes[idx(leaf)].data, NodeData::Text { .. })
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[idx(node)].parent.map(|p| NodeId(p as u64))
    }

    fn sibling_leaf(&self, leaf: NodeId, direction: Direction) -> Option<NodeId> {
        let leaves = self.leaves();
        let pos = leaves.iter().position(|&l| l == idx(leaf))?;
        let next = match direction {
            Direction::Forward => pos.checked_add(1)?,
            Direction::Backward => pos.checked_sub(1)?,
        };
        leaves.get(next).map(|&l| NodeId(l as u64))
    }

    fn compare_leaves(&self, a: NodeId, b: NodeId) -> Ordering {
        self.leaf_pos(idx(a)).cmp(&self.leaf_pos(idx(b)))
    }

    fn is_block_start(&self, leaf: NodeId) -> bool {
        match self.sibling_leaf(leaf, Direction::Backward) {
            None => true,
            Some(prev) => self.nearest_block(idx(prev)) != self.nearest_block(idx(leaf)),
        }
    }

    fn editable_root(&self, leaf: NodeId) -> Option<NodeId> {
        let mut node = self.nodes[idx(leaf)].parent;
        while let Some(n) = node {
            if let NodeData::Container { editable: true, .. } = self.nodes[n].data {
                return Some(NodeId(n as u64));
            }
            node = self.nodes[n].parent;
        }
        None
    }

    fn is_list_item_marker(&self, leaf: NodeId) -> bool {
        matches!(self.nodes[idx(leaf)].data, NodeData::Text { marker: true, .. })
    }

    fn line_starts(&self, leaf: NodeId) -> &[usize] {
        match &self.nodes[idx(leaf)].data {
            NodeData::Text { line_starts, .. } | NodeData::Object { line_starts, .. } => {
                line_starts
            }
            NodeData::Container { .. } => &[],
        }
    }

    fn attribute_spans(&self, leaf: NodeId) -> &[(usize, AttributeSet)] {
        match &self.nodes[idx(leaf)].data {
            NodeData::Text { spans, .. } => spans,
            _ => &[],
        }
    }

    fn default_attributes(&self, leaf: NodeId) -> AttributeSet {
        let mut merged = AttributeSet::new();
        let mut node = self.nodes[idx(leaf)].parent;
        while let Some(n) = node {
            if let NodeData::Container { defaults, .. } = &self.nodes[n].data {
                merged.merge_defaults(defaults);
            }
            node = self.nodes[n].parent;
        }
        merged
    }

    fn char_bounds(&self, leaf: NodeId, offset: usize) -> Option<Rect> {
        match &self.nodes[idx(leaf)].data {
            NodeData::Text {
                text,
                grid_origin: Some((x, y)),
                ..
            } => {
                if offset >= text.len() {
                    return None;
                }
                let cell_x = x + CELL * char_count_before(text, offset) as f64;
                Some(Rect::new(cell_x, *y, cell_x + CELL, y + CELL))
            }
            _ => None,
        }
    }

    fn leaf_bounds(&self, leaf: NodeId) -> Option<Rect> {
        match &self.nodes[idx(leaf)].data {
            NodeData::Text {
                text,
                grid_origin: Some((x, y)),
                ..
            } => Some(Rect::new(
                *x,
                *y,
                x + CELL * text.chars().count() as f64,
                y + CELL,
            )),
            NodeData::Object { bounds, .. } => *bounds,
            _ => None,
        }
    }
}

impl SelectionHost for TestTree {
    fn set_selection(&mut self, range: &TextRange, index: isize) -> bool {
        match usize::try_from(index) {
            Ok(i) if i < self.selections.len() => self.selections[i] = *range,
            _ => self.selections.push(*range),
        }
        true
    }

    fn scroll_into_view(&mut self, range: &TextRange, alignment: ScrollAlignment) {
        self.scrolled.push((*range, alignment));
    }

    fn selection_ranges(&self, root: NodeId) -> Vec<TextRange> {
        self.selections
            .iter()
            .filter(|r| !r.is_collapsed())
            .filter(|r| self.in_subtree(idx(r.start.leaf), idx(root)))
            .copied()
            .collect()
    }

    fn caret(&self, root: NodeId) -> Option<TextPoint> {
        self.caret
            .filter(|c| self.in_subtree(idx(c.leaf), idx(root)))
    }
}
