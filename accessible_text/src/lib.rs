// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text boundary navigation over accessible trees.
//!
//! Assistive technology does not see text as one flat buffer. It sees a tree
//! of text-bearing nodes — some local to the process, some proxied from
//! another one — where each leaf holds a fragment of text or stands for a
//! single embedded object. This crate locates semantic boundaries
//! (grapheme cluster, word, line, paragraph, attribute run) within such a
//! tree and represents spans over it, so a screen-reader bridge can answer
//! "read the next word" or "select this paragraph" without caring how the
//! text is stored.
//!
//! The tree itself stays external: every algorithm is written against the
//! [`TextTree`] capability trait, and [`TextPoint`] / [`TextRange`] are
//! plain values derived from it on demand.
//!
//! - [`TextPoint::find_boundary`] and [`TextPoint::move_by`] walk
//!   boundaries of a [`BoundaryKind`] in either [`Direction`], crossing
//!   leaf edges seamlessly.
//! - [`TextRange`] crops to containers, computes union bounds, hit-tests
//!   screen points, and decomposes into single-leaf [`Segments`].
//! - [`attributes_at`] projects the effective text attributes at a point
//!   from per-leaf spans and container defaults.
//!
//! ## Features
//!
//! - `std` (enabled by default): Required unless `libm` is enabled.
//! - `libm`: Allows building without the Rust standard library.
//! - `accesskit`: Conversions to and from AccessKit text positions and
//!   selections.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("accessible_text requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

#[cfg(feature = "accesskit")]
mod access;
mod analysis;
mod attrs;
mod boundary;
mod error;
mod point;
mod range;
mod tree;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

#[cfg(feature = "accesskit")]
pub use crate::access::TreeAccessibility;
pub use crate::attrs::{attributes_at, AttrValue, AttributeSet};
pub use crate::boundary::{BoundaryFlags, BoundaryKind};
pub use crate::error::{Error, ErrorKind};
pub use crate::point::TextPoint;
pub use crate::range::{caret, selection_ranges, Segments, TextRange};
pub use crate::tree::{Direction, NodeId, ScrollAlignment, SelectionHost, TextTree};
