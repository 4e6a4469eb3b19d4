// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render driver: reconciles consecutive passes by node identity.

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::Point;
use understory_hierarchy::{Hierarchy, HierarchyError, NodeId};
use understory_tree_layout::{Layout, LayoutNode};

use crate::diagonal::diagonal;
use crate::types::{
    FontWeight, LinkTransition, NodeStyle, NodeTransition, Phase, RenderPass, RenderStyle,
    TextAnchor, VANISHED,
};

/// Transition duration used unless configured otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(750);

/// Gap between a node's circle and its label.
const LABEL_PADDING: f64 = 3.0;

/// Geometry of the drawing area for one pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Breadth-axis extent handed to the layout (the inner canvas height).
    pub extent: f64,
    /// Distance between consecutive depths.
    pub link_length: f64,
}

/// What the previous pass left on screen for one identity.
#[derive(Clone, Debug)]
struct Shown {
    node: NodeId,
    label: alloc::string::String,
    at: Point,
    style: NodeStyle,
    /// Parent position, for the link keyed by this identity.
    parent_at: Option<Point>,
}

/// Computes enter/update/exit transitions between consecutive passes.
///
/// The driver remembers what its previous pass left on screen, keyed by node identity, so it can
/// describe exits even after the hierarchy that produced them was replaced.
#[derive(Clone, Debug)]
pub struct RenderDriver {
    duration: Duration,
    generation: u64,
    shown: HashMap<u32, Shown>,
    highest_identity: u32,
}

impl Default for RenderDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDriver {
    /// Create a driver using [`DEFAULT_DURATION`].
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }

    /// Create a driver with a custom transition duration.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            shown: HashMap::new(),
            highest_identity: 0,
        }
    }

    /// Transition duration of every pass.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Generation of the last pass, 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Highest identity any pass has shown.
    pub fn highest_identity(&self) -> u32 {
        self.highest_identity
    }

    /// Returns true if the last pass left `identity` on screen.
    pub fn is_shown(&self, identity: u32) -> bool {
        self.shown.contains_key(&identity)
    }

    /// Render the visible part of `tree`, triggered by an interaction with `source`.
    ///
    /// - Visible nodes are laid out with `layout`; each sits at `depth * link_length` on the depth
    ///   axis and at its layout coordinate on the breadth axis.
    /// - Nodes without identity get one; they enter from `source`'s previous position.
    /// - Nodes shown before move from their previous position to their new one.
    /// - Nodes no longer visible exit toward `source`'s new position and vanish.
    /// - Links follow the same rules, keyed by their child's identity.
    ///
    /// Afterwards every visible node's previous position is its new position.
    pub fn render<L: Layout + ?Sized>(
        &mut self,
        tree: &mut Hierarchy,
        layout: &L,
        frame: Frame,
        style: &RenderStyle,
        source: NodeId,
    ) -> Result<RenderPass, HierarchyError> {
        if !tree.contains(source) {
            return Err(HierarchyError::StaleNode(source));
        }

        let visible = tree.visible_nodes();
        let index_of: HashMap<NodeId, usize> =
            visible.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let layout_nodes: Vec<LayoutNode> = visible
            .iter()
            .map(|&id| LayoutNode {
                parent: tree.parent(id).and_then(|p| index_of.get(&p).copied()),
                depth: tree.depth(id).unwrap_or(0),
                radius: tree.radius(id).unwrap_or(0.0),
            })
            .collect();
        let breadth = layout.breadth(&layout_nodes, frame.extent);
        let targets: Vec<Point> = layout_nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Tree depths are far below f64 precision."
                )]
                let depth = node.depth as f64;
                let y = breadth.get(i).copied().unwrap_or(frame.extent / 2.0);
                Point::new(depth * frame.link_length, y)
            })
            .collect();

        let source_to = match index_of.get(&source) {
            Some(&i) => targets[i],
            None => tree
                .previous_position(source)
                .unwrap_or_else(|| targets[0]),
        };
        let source_from = tree.previous_position(source).unwrap_or(source_to);

        let mut nodes = Vec::with_capacity(visible.len());
        let mut links = Vec::with_capacity(visible.len());
        let mut next_shown = HashMap::with_capacity(visible.len());
        for (i, &id) in visible.iter().enumerate() {
            let identity = tree.assign_identity(id)?;
            let to = targets[i];
            let parent_to = layout_nodes[i].parent.map(|p| targets[p]);
            let previous = self.shown.get(&identity);
            let (phase, from, parent_from) = match previous {
                Some(shown) => (
                    Phase::Update,
                    tree.previous_position(id).unwrap_or(shown.at),
                    shown.parent_at,
                ),
                None => (Phase::Enter, source_from, None),
            };

            let label = alloc::string::String::from(tree.name(id).unwrap_or_default());
            let node_style = node_style(tree, id, style);
            nodes.push(NodeTransition {
                node: id,
                identity,
                label: label.clone(),
                phase,
                from,
                to,
                style: node_style.clone(),
            });

            if let Some(parent_to) = parent_to {
                let from = match (phase, parent_from) {
                    (Phase::Update, Some(parent_from)) => diagonal(from, parent_from),
                    _ => diagonal(source_from, source_from),
                };
                links.push(LinkTransition {
                    child: id,
                    identity,
                    phase: if phase == Phase::Update && parent_from.is_some() {
                        Phase::Update
                    } else {
                        Phase::Enter
                    },
                    from,
                    to: diagonal(to, parent_to),
                });
            }

            self.highest_identity = self.highest_identity.max(identity);
            next_shown.insert(
                identity,
                Shown {
                    node: id,
                    label,
                    at: to,
                    style: node_style,
                    parent_at: parent_to,
                },
            );
        }

        let mut exiting: Vec<(u32, Shown)> = self
            .shown
            .drain()
            .filter(|(identity, _)| !next_shown.contains_key(identity))
            .collect();
        exiting.sort_unstable_by_key(|(identity, _)| *identity);
        for (identity, shown) in exiting {
            if let Some(parent_at) = shown.parent_at {
                links.push(LinkTransition {
                    child: shown.node,
                    identity,
                    phase: Phase::Exit,
                    from: diagonal(shown.at, parent_at),
                    to: diagonal(source_to, source_to),
                });
            }
            nodes.push(NodeTransition {
                node: shown.node,
                identity,
                label: shown.label,
                phase: Phase::Exit,
                from: shown.at,
                to: source_to,
                style: NodeStyle {
                    radius: VANISHED,
                    label_opacity: VANISHED,
                    ..shown.style
                },
            });
        }

        for (&id, &at) in visible.iter().zip(&targets) {
            tree.set_previous_position(id, at)?;
        }
        self.shown = next_shown;
        self.generation += 1;

        let pass = RenderPass {
            generation: self.generation,
            source,
            duration: self.duration,
            nodes,
            links,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            generation = pass.generation,
            entering = pass.nodes_in(Phase::Enter).count(),
            updating = pass.nodes_in(Phase::Update).count(),
            exiting = pass.nodes_in(Phase::Exit).count(),
            "render pass"
        );
        Ok(pass)
    }
}

fn node_style(tree: &Hierarchy, id: NodeId, style: &RenderStyle) -> NodeStyle {
    let radius = tree.radius(id).unwrap_or(0.0);
    let selected = tree.is_selected(id);
    let (anchor, label_offset) = if tree.has_visible_children(id) {
        (TextAnchor::End, -(radius + LABEL_PADDING))
    } else {
        (TextAnchor::Start, radius + LABEL_PADDING)
    };
    NodeStyle {
        radius,
        fill: if selected {
            style.selected_fill.clone()
        } else {
            style.fill.clone()
        },
        font_size: if selected {
            style.font_size + 1.0
        } else {
            style.font_size
        },
        font_weight: if selected {
            FontWeight::Bolder
        } else {
            FontWeight::Lighter
        },
        anchor,
        label_offset,
        label_opacity: 1.0,
    }
}
