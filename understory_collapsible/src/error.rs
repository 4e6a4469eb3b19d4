// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_hierarchy::{HierarchyError, NodeId};

/// Errors surfaced to the host by [`crate::Widget`].
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// The host data is not a valid hierarchy. Nothing was rendered.
    #[error("malformed hierarchy: {reason}")]
    MalformedHierarchy {
        /// What was wrong with the data.
        reason: String,
    },
    /// The options cannot drive a render of this data.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which option was rejected and why.
        reason: String,
    },
    /// A node handle or identity that no longer matches the widget's state.
    #[error("stale state reference {0:?}")]
    StaleStateReference(NodeId),
    /// The selection record could not be encoded.
    #[error("failed to encode selection record")]
    Serialization(#[from] serde_json::Error),
}

impl From<HierarchyError> for WidgetError {
    fn from(err: HierarchyError) -> Self {
        match err {
            HierarchyError::MalformedHierarchy { reason } => Self::MalformedHierarchy { reason },
            HierarchyError::StaleNode(id) => Self::StaleStateReference(id),
        }
    }
}
