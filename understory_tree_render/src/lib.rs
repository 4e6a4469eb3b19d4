// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_render --heading-base-level=0

//! Understory Tree Render: incremental, animated rendering of a collapsible node-link tree.
//!
//! Every time the user expands or collapses a node, the visible part of an
//! [`understory_hierarchy::Hierarchy`] changes. [`RenderDriver::render`] compares it with what the
//! previous pass left on screen and describes the difference as a [`RenderPass`]:
//!
//! - **Enter**: nodes and links that were not shown before. They start at the triggering node's
//!   previous position, so new children grow out of the node that was clicked.
//! - **Update**: nodes and links shown by both passes. They move from where they were to where the
//!   layout now puts them.
//! - **Exit**: nodes and links no longer shown. They move toward the triggering node's new position
//!   while their circle and label fade out; the scene removes them afterwards.
//!
//! Elements are matched by the stable identity the hierarchy assigns to each node (links by their
//! child's identity), never by position in a list.
//!
//! ## Not a drawing library
//!
//! This crate does not draw or animate anything itself. A [`Scene`] receives each pass as a set of
//! start state, end state, and duration descriptors and runs the transitions. Passes carry a
//! generation number; a scene that gets a newer pass while older transitions are still running
//! supersedes them.
//!
//! Positions live in canvas space: `x` grows with depth (`depth * link_length`), `y` is the
//! breadth coordinate computed by an [`understory_tree_layout::Layout`]. Links are [`diagonal`]
//! cubic curves from child to parent.
//!
//! ```rust
//! use kurbo::Point;
//! use understory_hierarchy::{Hierarchy, HostNode};
//! use understory_tree_layout::ClusterLayout;
//! use understory_tree_render::{Frame, Phase, RenderDriver, RenderStyle};
//!
//! let mut tree = Hierarchy::from_data(
//!     HostNode::new("root").with_children([HostNode::new("A"), HostNode::new("B")]),
//! )
//! .unwrap();
//! let root = tree.root();
//! tree.set_previous_position(root, Point::new(0.0, 150.0)).unwrap();
//!
//! let mut driver = RenderDriver::new();
//! let frame = Frame { extent: 300.0, link_length: 180.0 };
//! let layout = ClusterLayout::new();
//! let style = RenderStyle::default();
//!
//! let first = driver.render(&mut tree, &layout, frame, &style, root).unwrap();
//! assert_eq!(first.nodes_in(Phase::Enter).count(), 3);
//!
//! // Collapsing the root sends both children back into it.
//! tree.toggle_expanded(root).unwrap();
//! let second = driver.render(&mut tree, &layout, frame, &style, root).unwrap();
//! assert_eq!(second.nodes_in(Phase::Exit).count(), 2);
//! assert!(second.generation > first.generation);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and the other Understory crates.
//! - `libm`: `no_std` floating-point math through `libm`.
//! - `tracing`: emits a `debug` event with enter/update/exit counts for every pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diagonal;
mod driver;
mod scene;
mod types;

pub use diagonal::diagonal;
pub use driver::{DEFAULT_DURATION, Frame, RenderDriver};
pub use scene::Scene;
pub use types::{
    FontWeight, LinkTransition, NodeStyle, NodeTransition, Phase, RenderPass, RenderStyle,
    TextAnchor, VANISHED,
};
