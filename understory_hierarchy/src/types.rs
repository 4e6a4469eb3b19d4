// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy: node handles, state flags, host input, collapse policy.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Size used for nodes whose host data carries no size (a radius of 5).
pub const DEFAULT_NODE_SIZE: f64 = 25.0;

/// Handle of a node inside a [`crate::Hierarchy`].
///
/// Handles are arena indices tagged with the hierarchy that issued them. They stay valid for the
/// lifetime of that hierarchy, since nodes are never removed; any other hierarchy rejects them.
/// This is distinct from a node's *identity*, which is assigned lazily by
/// [`crate::Hierarchy::assign_identity`] and is what render passes are keyed by.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) tree: u32,
}

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.idx as usize
    }
}

bitflags::bitflags! {
    /// Mutable per-node state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeState: u8 {
        /// Children are shown. Meaningless for leaves.
        const EXPANDED = 0b0000_0001;
        /// Node is part of the user's selection.
        const SELECTED = 0b0000_0010;
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::EXPANDED
    }
}

/// One entry of the host-supplied nested data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostNode {
    /// Display label. Must not be empty.
    pub name: String,
    /// Weight controlling the rendered radius (`sqrt(size)`); [`DEFAULT_NODE_SIZE`] when absent.
    pub size: Option<f64>,
    /// Metric shown in tooltips.
    pub weight: Option<f64>,
    /// Tooltip text overriding the composed default.
    pub tooltip: Option<String>,
    /// Named boolean fields, consulted by [`CollapsePolicy::Field`].
    pub flags: BTreeMap<String, bool>,
    /// Ordered children.
    pub children: Vec<HostNode>,
}

impl HostNode {
    /// Create a leaf with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set a named boolean field.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

/// Which nodes start collapsed when a hierarchy is first shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CollapsePolicy {
    /// Everything starts expanded.
    #[default]
    Never,
    /// Every node below depth 1 starts hidden.
    All,
    /// Like [`CollapsePolicy::All`], except that nodes whose named field is present and `false`
    /// stay expanded.
    Field(String),
}
