// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference breadth layout: leaves in order, parents centered over their children.

use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{Layout, LayoutNode, RadiusSeparation, Separation};

/// A cluster layout.
///
/// Leaves are placed left to right in sibling order, each one [`Separation`] after the previous
/// leaf, and every internal node sits at the mean of its children. The result is normalized so the
/// outermost leaves keep half a separation of padding from `0` and `extent`; a lone root is
/// centered.
#[derive(Clone, Copy, Debug)]
pub struct ClusterLayout<S = RadiusSeparation> {
    separation: S,
}

impl ClusterLayout {
    /// Create a layout using [`RadiusSeparation::default`].
    pub fn new() -> Self {
        Self {
            separation: RadiusSeparation::default(),
        }
    }
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Separation> ClusterLayout<S> {
    /// Create a layout with a custom separation policy.
    pub fn with_separation(separation: S) -> Self {
        Self { separation }
    }

    /// The separation policy.
    pub fn separation(&self) -> &S {
        &self.separation
    }
}

impl<S: Separation> Layout for ClusterLayout<S> {
    fn breadth(&self, nodes: &[LayoutNode], extent: f64) -> Vec<f64> {
        let n = nodes.len();
        if n == 0 {
            return Vec::new();
        }

        let mut children: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); n];
        for (i, node) in nodes.iter().enumerate().skip(1) {
            if let Some(parent) = node.parent {
                children[parent].push(i);
            }
        }

        let mut x = vec![0.0; n];
        let mut first_leaf = None;
        let mut prev_leaf: Option<usize> = None;
        // Post-order walk; the flag marks nodes whose children are already placed.
        let mut stack = vec![(0_usize, false)];
        while let Some((i, children_done)) = stack.pop() {
            let kids = &children[i];
            if kids.is_empty() {
                x[i] = match prev_leaf {
                    Some(p) => x[p] + self.separation.separation(&nodes[p], &nodes[i]),
                    None => 0.0,
                };
                first_leaf.get_or_insert(i);
                prev_leaf = Some(i);
            } else if children_done {
                let sum: f64 = kids.iter().map(|&c| x[c]).sum();
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Child counts are far below f64 precision."
                )]
                let mean = sum / kids.len() as f64;
                x[i] = mean;
            } else {
                stack.push((i, true));
                stack.extend(kids.iter().rev().map(|&c| (c, false)));
            }
        }

        let (Some(left), Some(right)) = (first_leaf, prev_leaf) else {
            return vec![extent / 2.0; n];
        };
        let x0 = x[left] - self.separation.separation(&nodes[left], &nodes[right]) / 2.0;
        let x1 = x[right] + self.separation.separation(&nodes[right], &nodes[left]) / 2.0;
        let span = x1 - x0;
        if !(span.is_finite() && span > 0.0) {
            return vec![extent / 2.0; n];
        }
        x.iter().map(|&v| (v - x0) / span * extent).collect()
    }
}
