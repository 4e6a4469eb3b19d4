// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::types::NodeId;

/// Errors reported while building or mutating a [`crate::Hierarchy`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HierarchyError {
    /// Host data does not describe a valid hierarchy; no tree is built.
    #[error("malformed hierarchy: {reason}")]
    MalformedHierarchy {
        /// What was wrong with the input.
        reason: String,
    },
    /// A [`NodeId`] does not belong to this hierarchy.
    #[error("stale node handle {0:?}")]
    StaleNode(NodeId),
}
