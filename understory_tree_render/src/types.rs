// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition descriptors produced by the render driver.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{CubicBez, Point};
use understory_hierarchy::NodeId;

/// Radius and opacity used as the "vanished" end state; zero itself upsets some renderers.
pub const VANISHED: f64 = 1e-6;

/// Where an element stands relative to the previous pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not shown by the previous pass; create it at `from`.
    Enter,
    /// Shown by both passes.
    Update,
    /// Shown by the previous pass only; remove it once it reaches `to`.
    Exit,
}

/// Side of the circle the label is drawn on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Label ends at the offset, left of the circle.
    End,
    /// Label starts at the offset, right of the circle.
    Start,
}

/// Label weight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontWeight {
    /// Selected nodes.
    Bolder,
    /// Everything else.
    Lighter,
}

/// Rendering parameters shared by every node of a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Circle fill of selected nodes.
    pub selected_fill: String,
    /// Circle fill of unselected nodes.
    pub fill: String,
    /// Label size in pixels; selected nodes use one pixel more.
    pub font_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            selected_fill: String::from("lightsteelblue"),
            fill: String::from("#FFF"),
            font_size: 10.0,
        }
    }
}

/// End-state style of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    /// Circle radius.
    pub radius: f64,
    /// Circle fill.
    pub fill: String,
    /// Label size in pixels.
    pub font_size: f64,
    /// Label weight.
    pub font_weight: FontWeight,
    /// Label anchor.
    pub anchor: TextAnchor,
    /// Horizontal label offset from the node center.
    pub label_offset: f64,
    /// Label opacity.
    pub label_opacity: f64,
}

/// Animation of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTransition {
    /// Node handle, for routing clicks back.
    pub node: NodeId,
    /// Stable identity the element is keyed by.
    pub identity: u32,
    /// Label text.
    pub label: String,
    /// Enter, update, or exit.
    pub phase: Phase,
    /// Start position.
    pub from: Point,
    /// End position.
    pub to: Point,
    /// End style.
    pub style: NodeStyle,
}

/// Animation of one edge, keyed by its child's identity.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkTransition {
    /// Child endpoint.
    pub child: NodeId,
    /// Identity of the child endpoint.
    pub identity: u32,
    /// Enter, update, or exit.
    pub phase: Phase,
    /// Start curve.
    pub from: CubicBez,
    /// End curve.
    pub to: CubicBez,
}

/// Everything a scene needs to move from the previous pass to this one.
///
/// Passes are fire-and-forget: the driver never waits for a scene to finish animating. A scene
/// that receives a pass with a higher [`RenderPass::generation`] replaces any transition still
/// running for the same identity.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPass {
    /// Increases by one per pass.
    pub generation: u64,
    /// The node whose interaction triggered the pass.
    pub source: NodeId,
    /// Duration of every transition in the pass.
    pub duration: Duration,
    /// Node transitions: visible nodes breadth-first, then exits by identity.
    pub nodes: Vec<NodeTransition>,
    /// Link transitions, in the same order as their child nodes.
    pub links: Vec<LinkTransition>,
}

impl RenderPass {
    /// Node transitions in `phase`.
    pub fn nodes_in(&self, phase: Phase) -> impl Iterator<Item = &NodeTransition> + '_ {
        self.nodes.iter().filter(move |n| n.phase == phase)
    }

    /// Link transitions in `phase`.
    pub fn links_in(&self, phase: Phase) -> impl Iterator<Item = &LinkTransition> + '_ {
        self.links.iter().filter(move |l| l.phase == phase)
    }

    /// Transition of the node with `identity`.
    pub fn node(&self, identity: u32) -> Option<&NodeTransition> {
        self.nodes.iter().find(|n| n.identity == identity)
    }

    /// Identities that remain on screen after the pass.
    pub fn visible_identities(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.phase != Phase::Exit)
            .map(|n| n.identity)
    }

    /// Returns true if nothing enters, exits, or moves.
    pub fn is_noop(&self) -> bool {
        self.nodes
            .iter()
            .all(|n| n.phase == Phase::Update && n.from == n.to)
            && self
                .links
                .iter()
                .all(|l| l.phase == Phase::Update && l.from == l.to)
    }
}
