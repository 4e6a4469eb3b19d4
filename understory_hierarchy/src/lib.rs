// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hierarchy --heading-base-level=0

//! Understory Hierarchy: persistent state for a collapsible node-link tree.
//!
//! A collapsible tree view re-renders the same hierarchy many times while the user expands and
//! collapses subtrees. This crate owns the state that must survive those re-renders:
//!
//! - A stable **identity** per node, handed out by a counter owned by the [`Hierarchy`] the first
//!   time a node takes part in a render pass, and never reassigned or reused afterwards.
//! - Per-node [`NodeState`] flags: whether the node's children are expanded, and whether the node
//!   is selected. The two are independent; interaction code decides whether to toggle them together.
//! - The **previous position** of every rendered node, used by a render driver as the start point
//!   of enter animations and the baseline of the next pass.
//!
//! The structure itself is built once from host data ([`HostNode`]) and never changes afterwards:
//! nodes are neither created nor destroyed, only their flags and positions mutate.
//!
//! ## Visibility
//!
//! Each node keeps a single ordered child list plus an expanded flag. A node's *visible* children
//! are its children when it is expanded and nothing otherwise; its *hidden* children are the
//! reverse. [`Hierarchy::visible_nodes`] walks the visible part breadth-first starting at the root.
//!
//! ```rust
//! use understory_hierarchy::{CollapsePolicy, Hierarchy, HostNode};
//!
//! let data = HostNode::new("root").with_children([
//!     HostNode::new("A").with_children([HostNode::new("A1"), HostNode::new("A2")]),
//!     HostNode::new("B"),
//! ]);
//! let mut tree = Hierarchy::from_data(data).unwrap();
//! assert_eq!(tree.visible_nodes().len(), 5);
//!
//! // Collapse everything below the first level.
//! tree.apply_collapse(&CollapsePolicy::All);
//! let names: Vec<_> = tree
//!     .visible_nodes()
//!     .into_iter()
//!     .map(|id| tree.name(id).unwrap())
//!     .collect();
//! assert_eq!(names, ["root", "A", "B"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod hierarchy;
mod types;

pub use error::HierarchyError;
pub use hierarchy::Hierarchy;
pub use types::{CollapsePolicy, DEFAULT_NODE_SIZE, HostNode, NodeId, NodeState};
