// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout inputs and the traits implemented by layouts and separation policies.

use alloc::vec::Vec;

/// A visible node as seen by a [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutNode {
    /// Index of the parent in the same slice, `None` for the root.
    pub parent: Option<usize>,
    /// Distance from the root.
    pub depth: usize,
    /// Rendered radius.
    pub radius: f64,
}

/// Spacing between two neighbouring nodes on the breadth axis, in abstract units.
pub trait Separation {
    /// Separation between `a` and `b`, which are adjacent at the same depth.
    fn separation(&self, a: &LayoutNode, b: &LayoutNode) -> f64;
}

impl<F> Separation for F
where
    F: Fn(&LayoutNode, &LayoutNode) -> f64,
{
    fn separation(&self, a: &LayoutNode, b: &LayoutNode) -> f64 {
        self(a, b)
    }
}

/// Size-aware separation: siblings get `(radius_a + radius_b) / sibling_divisor`, nodes with
/// different parents get `cousin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusSeparation {
    /// Divisor applied to the summed radii of siblings.
    pub sibling_divisor: f64,
    /// Fixed separation between nodes with different parents.
    pub cousin: f64,
}

impl Default for RadiusSeparation {
    fn default() -> Self {
        Self {
            sibling_divisor: 25.0,
            cousin: 1.0,
        }
    }
}

impl Separation for RadiusSeparation {
    fn separation(&self, a: &LayoutNode, b: &LayoutNode) -> f64 {
        if a.parent == b.parent {
            (a.radius + b.radius) / self.sibling_divisor
        } else {
            self.cousin
        }
    }
}

/// Breadth-axis layout of a visible tree.
///
/// `nodes` starts with the root, lists every parent before its children, and lists siblings in
/// display order. Implementations return exactly one coordinate per node, within `[0, extent]`.
pub trait Layout {
    /// Compute breadth coordinates.
    fn breadth(&self, nodes: &[LayoutNode], extent: f64) -> Vec<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(parent: Option<usize>, radius: f64) -> LayoutNode {
        LayoutNode {
            parent,
            depth: 1,
            radius,
        }
    }

    #[test]
    fn siblings_scale_with_radius() {
        let sep = RadiusSeparation::default();
        // Sizes 16 and 9.
        let s = sep.separation(&node(Some(0), 4.0), &node(Some(0), 3.0));
        assert!((s - 0.28).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn cousins_get_fixed_gap() {
        let sep = RadiusSeparation::default();
        assert_eq!(sep.separation(&node(Some(1), 4.0), &node(Some(2), 3.0)), 1.0);
        assert_eq!(
            sep.separation(&node(Some(1), 40.0), &node(Some(2), 30.0)),
            1.0
        );
    }

    #[test]
    fn closures_are_separations() {
        let constant = |_: &LayoutNode, _: &LayoutNode| 2.0;
        assert_eq!(
            constant.separation(&node(None, 1.0), &node(None, 1.0)),
            2.0
        );
    }
}
