// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_layout --heading-base-level=0

//! Understory Tree Layout: the layout contract used by Understory node-link trees.
//!
//! A node-link tree places every visible node on two axes:
//!
//! - The **depth axis**, which is simply `depth * link_length`. The link length is either fixed by
//!   the host or derived from the viewport by [`LinkLength::Responsive`].
//! - The **breadth axis**, which is delegated to a [`Layout`] implementation. Layouts see a flat
//!   slice of [`LayoutNode`]s (root first, parents before children, siblings in order) and return
//!   one breadth coordinate per node inside `[0, extent]`.
//!
//! Spacing between neighbours on the breadth axis is controlled by a [`Separation`]. The default
//! [`RadiusSeparation`] gives siblings room in proportion to their radii and keeps a fixed gap
//! between cousins.
//!
//! [`ClusterLayout`] is a small reference layout, not a tidy tree. It packs leaves one after the
//! other, so a leaf that follows a subtree sits one cousin gap after that subtree's last leaf. A
//! tidy tree (Reingold-Tilford, as in `d3.tree`) instead spaces the roots of neighbouring subtrees
//! a sibling gap apart, which gives different breadth coordinates for unbalanced trees. Hosts that
//! need tidy-tree placement plug their own implementation in through [`Layout`].
//!
//! ```rust
//! use understory_tree_layout::{ClusterLayout, Layout, LayoutNode, responsive_link_length};
//!
//! let nodes = [
//!     LayoutNode { parent: None, depth: 0, radius: 5.0 },
//!     LayoutNode { parent: Some(0), depth: 1, radius: 5.0 },
//!     LayoutNode { parent: Some(0), depth: 1, radius: 5.0 },
//! ];
//! let breadth = ClusterLayout::new().breadth(&nodes, 100.0);
//! // The parent sits between its two children.
//! assert!(breadth[1] < breadth[0] && breadth[0] < breadth[2]);
//!
//! // Narrow viewports are floored so levels never pile onto each other.
//! assert_eq!(responsive_link_length(300.0, 4), 175.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cluster;
mod sizing;
mod types;

pub use cluster::ClusterLayout;
pub use sizing::{LinkLength, MIN_LINK_LENGTH, inner_size, responsive_link_length};
pub use types::{Layout, LayoutNode, RadiusSeparation, Separation};
