// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy arena: construction, identity assignment, visibility, and state mutation.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use smallvec::SmallVec;

use crate::error::HierarchyError;
use crate::types::{CollapsePolicy, DEFAULT_NODE_SIZE, HostNode, NodeId, NodeState};

#[derive(Clone, Debug)]
struct Node {
    name: String,
    size: f64,
    weight: Option<f64>,
    tooltip: Option<String>,
    flags: BTreeMap<String, bool>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    depth: usize,
    state: NodeState,
    identity: Option<u32>,
    previous_position: Option<Point>,
}

/// Source of per-hierarchy handle tags.
static NEXT_TREE: AtomicU32 = AtomicU32::new(1);

/// A hierarchy built once from host data, plus the state that persists across render passes.
///
/// Nodes are stored breadth-first in an arena, so the root is always the first node and
/// [`NodeId`]s compare in breadth-first order.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    /// Tag carried by every [`NodeId`] this hierarchy issues.
    tree: u32,
    /// Last identity handed out; identities start at 1.
    last_identity: u32,
}

impl Hierarchy {
    /// Build the hierarchy from nested host data.
    ///
    /// Every node starts expanded and unselected, without identity or previous position.
    /// Fails without building anything when a name is empty or a size is negative or not finite.
    pub fn from_data(data: HostNode) -> Result<Self, HierarchyError> {
        validate(&data)?;

        let tree = NEXT_TREE.fetch_add(1, Ordering::Relaxed);
        let mut nodes = Vec::new();
        let mut queue = VecDeque::from([(data, None::<NodeId>, 0_usize)]);
        while let Some((host, parent, depth)) = queue.pop_front() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId {
                idx: nodes.len() as u32,
                tree,
            };
            if let Some(p) = parent {
                let parent_node: &mut Node = &mut nodes[p.idx()];
                parent_node.children.push(id);
            }
            let HostNode {
                name,
                size,
                weight,
                tooltip,
                flags,
                children,
            } = host;
            nodes.push(Node {
                name,
                size: size.unwrap_or(DEFAULT_NODE_SIZE),
                weight,
                tooltip,
                flags,
                parent,
                children: SmallVec::new(),
                depth,
                state: NodeState::default(),
                identity: None,
                previous_position: None,
            });
            queue.extend(children.into_iter().map(|c| (c, Some(id), depth + 1)));
        }

        Ok(Self {
            nodes,
            tree,
            last_identity: 0,
        })
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        NodeId {
            idx: 0,
            tree: self.tree,
        }
    }

    /// Number of nodes, visible or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a hierarchy has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` was issued by this hierarchy.
    pub fn contains(&self, id: NodeId) -> bool {
        id.tree == self.tree && id.idx() < self.nodes.len()
    }

    /// Depth of the deepest node (0 for a lone root).
    pub fn max_depth(&self) -> usize {
        // Breadth-first storage puts the deepest node last.
        self.nodes.last().map_or(0, |n| n.depth)
    }

    /// Label of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Size of a node.
    pub fn size(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.size)
    }

    /// Rendered radius of a node, `sqrt(size)`.
    pub fn radius(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.size.sqrt())
    }

    /// Weight of a node, if the host supplied one.
    pub fn weight(&self, id: NodeId) -> Option<f64> {
        self.get(id).and_then(|n| n.weight)
    }

    /// Host tooltip text of a node, if any.
    pub fn tooltip(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.tooltip.as_deref())
    }

    /// Named boolean field of a node.
    pub fn flag(&self, id: NodeId, name: &str) -> Option<bool> {
        self.get(id).and_then(|n| n.flags.get(name).copied())
    }

    /// Distance from the root.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.get(id).map(|n| n.depth)
    }

    /// Parent of a node, `None` for the root or stale handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// All children in order, expanded or not. Empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(n) => n.children.as_slice(),
            None => &[],
        }
    }

    /// Children taking part in layout and rendering.
    pub fn visible_children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(n) if n.state.contains(NodeState::EXPANDED) => n.children.as_slice(),
            _ => &[],
        }
    }

    /// Children kept out of layout and rendering because the node is collapsed.
    pub fn hidden_children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(n) if !n.state.contains(NodeState::EXPANDED) => n.children.as_slice(),
            _ => &[],
        }
    }

    /// Returns true if the node currently shows at least one child.
    pub fn has_visible_children(&self, id: NodeId) -> bool {
        !self.visible_children(id).is_empty()
    }

    /// Current state flags.
    pub fn state(&self, id: NodeId) -> Option<NodeState> {
        self.get(id).map(|n| n.state)
    }

    /// Returns true if the node's children are expanded.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.state.contains(NodeState::EXPANDED))
    }

    /// Returns true if the node is selected.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.state.contains(NodeState::SELECTED))
    }

    /// Identity of a node, if it has taken part in a render pass.
    pub fn identity(&self, id: NodeId) -> Option<u32> {
        self.get(id).and_then(|n| n.identity)
    }

    /// Return the node's identity, assigning the next one if it has none yet.
    pub fn assign_identity(&mut self, id: NodeId) -> Result<u32, HierarchyError> {
        let next = self.last_identity + 1;
        let node = self.get_mut(id)?;
        if let Some(identity) = node.identity {
            return Ok(identity);
        }
        node.identity = Some(next);
        self.last_identity = next;
        Ok(next)
    }

    /// Make every identity assigned from now on greater than `last`.
    ///
    /// Used when a new hierarchy replaces one whose identities are still known to a renderer, so
    /// that identities are never reused within a session.
    pub fn seed_identities(&mut self, last: u32) {
        self.last_identity = self.last_identity.max(last);
    }

    /// Find the node carrying `identity`.
    pub fn find_by_identity(&self, identity: u32) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.identity == Some(identity))
            .map(|idx| self.node_id(idx))
    }

    /// Identity of the depth-1 ancestor, or of the node itself at depth 0 or 1.
    ///
    /// All descendants of one depth-1 node share this value; selection records use it to group
    /// paths. Returns `None` until the relevant node has an identity.
    pub fn root_ancestor_identity(&self, id: NodeId) -> Option<u32> {
        let mut current = id;
        loop {
            let node = self.get(current)?;
            match node.parent {
                Some(parent) if node.depth > 1 => current = parent,
                _ => return node.identity,
            }
        }
    }

    /// Last rendered position of a node.
    pub fn previous_position(&self, id: NodeId) -> Option<Point> {
        self.get(id).and_then(|n| n.previous_position)
    }

    /// Record the position a node was last rendered at.
    pub fn set_previous_position(&mut self, id: NodeId, at: Point) -> Result<(), HierarchyError> {
        self.get_mut(id)?.previous_position = Some(at);
        Ok(())
    }

    /// Expand or collapse a node's children.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> Result<(), HierarchyError> {
        self.get_mut(id)?.state.set(NodeState::EXPANDED, expanded);
        Ok(())
    }

    /// Flip between expanded and collapsed; returns the new expanded state.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, HierarchyError> {
        let node = self.get_mut(id)?;
        node.state.toggle(NodeState::EXPANDED);
        Ok(node.state.contains(NodeState::EXPANDED))
    }

    /// Select or deselect a node.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<(), HierarchyError> {
        self.get_mut(id)?.state.set(NodeState::SELECTED, selected);
        Ok(())
    }

    /// Flip the selection; returns the new selected state.
    pub fn toggle_selected(&mut self, id: NodeId) -> Result<bool, HierarchyError> {
        let node = self.get_mut(id)?;
        node.state.toggle(NodeState::SELECTED);
        Ok(node.state.contains(NodeState::SELECTED))
    }

    /// Nodes whose ancestors are all expanded, breadth-first from the root.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            out.push(id);
            queue.extend(self.visible_children(id).iter().copied());
        }
        out
    }

    /// `(parent, child)` pairs for every visible non-root node, in [`Self::visible_nodes`] order.
    pub fn visible_links(&self) -> Vec<(NodeId, NodeId)> {
        self.visible_nodes()
            .into_iter()
            .filter_map(|child| self.parent(child).map(|parent| (parent, child)))
            .collect()
    }

    /// Apply the initial collapse policy below the root's children.
    ///
    /// Meant to run once, right after construction; later calls collapse whatever the policy
    /// selects again.
    pub fn apply_collapse(&mut self, policy: &CollapsePolicy) {
        let field = match policy {
            CollapsePolicy::Never => return,
            CollapsePolicy::All => None,
            CollapsePolicy::Field(name) => Some(name.as_str()),
        };
        let mut stack: Vec<NodeId> = self.nodes[0].children.iter().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.idx()];
            if node.children.is_empty() {
                continue;
            }
            let keep_open = field.is_some_and(|f| node.flags.get(f) == Some(&false));
            if !keep_open {
                node.state.remove(NodeState::EXPANDED);
            }
            stack.extend(node.children.iter().copied());
        }
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        if id.tree != self.tree {
            return None;
        }
        self.nodes.get(id.idx())
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, HierarchyError> {
        if id.tree != self.tree {
            return Err(HierarchyError::StaleNode(id));
        }
        self.nodes
            .get_mut(id.idx())
            .ok_or(HierarchyError::StaleNode(id))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    fn node_id(&self, idx: usize) -> NodeId {
        NodeId {
            idx: idx as u32,
            tree: self.tree,
        }
    }
}

fn validate(data: &HostNode) -> Result<(), HierarchyError> {
    let mut stack = alloc::vec![data];
    while let Some(node) = stack.pop() {
        if node.name.is_empty() {
            return Err(HierarchyError::MalformedHierarchy {
                reason: String::from("node without a name"),
            });
        }
        if let Some(size) = node.size
            && !(size.is_finite() && size >= 0.0)
        {
            return Err(HierarchyError::MalformedHierarchy {
                reason: format!("node `{}` has invalid size {size}", node.name),
            });
        }
        stack.extend(node.children.iter());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // root -> [A -> [A1, A2], B]
    fn sample() -> Hierarchy {
        Hierarchy::from_data(HostNode::new("root").with_children([
            HostNode::new("A").with_children([
                HostNode::new("A1").with_size(16.0),
                HostNode::new("A2").with_size(9.0),
            ]),
            HostNode::new("B"),
        ]))
        .unwrap()
    }

    fn by_name(tree: &Hierarchy, name: &str) -> NodeId {
        (0..tree.len())
            .map(|i| tree.node_id(i))
            .find(|&id| tree.name(id) == Some(name))
            .unwrap()
    }

    fn names(tree: &Hierarchy, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| String::from(tree.name(id).unwrap()))
            .collect()
    }

    #[test]
    fn builds_breadth_first_with_depths() {
        let tree = sample();
        assert_eq!(tree.len(), 5);
        assert_eq!(
            names(&tree, &tree.visible_nodes()),
            ["root", "A", "B", "A1", "A2"]
        );
        let a1 = by_name(&tree, "A1");
        assert_eq!(tree.depth(tree.root()), Some(0));
        assert_eq!(tree.depth(a1), Some(2));
        assert_eq!(tree.parent(a1), Some(by_name(&tree, "A")));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(tree.radius(a1), Some(4.0));
        assert_eq!(tree.size(by_name(&tree, "B")), Some(DEFAULT_NODE_SIZE));
    }

    #[test]
    fn depth_is_parent_depth_plus_one() {
        let tree = sample();
        for id in tree.visible_nodes() {
            if let Some(parent) = tree.parent(id) {
                assert_eq!(tree.depth(id), tree.depth(parent).map(|d| d + 1));
            }
        }
    }

    #[test]
    fn rejects_malformed_data() {
        let unnamed = HostNode::new("root").with_children([HostNode::new("")]);
        assert!(matches!(
            Hierarchy::from_data(unnamed),
            Err(HierarchyError::MalformedHierarchy { .. })
        ));

        let negative = HostNode::new("root").with_children([HostNode::new("x").with_size(-1.0)]);
        assert!(matches!(
            Hierarchy::from_data(negative),
            Err(HierarchyError::MalformedHierarchy { .. })
        ));

        let nan = HostNode::new("root").with_size(f64::NAN);
        assert!(Hierarchy::from_data(nan).is_err());
    }

    #[test]
    fn toggle_moves_children_between_visible_and_hidden() {
        let mut tree = sample();
        let a = by_name(&tree, "A");
        assert_eq!(tree.visible_children(a).len(), 2);
        assert!(tree.hidden_children(a).is_empty());

        assert!(!tree.toggle_expanded(a).unwrap());
        assert!(tree.visible_children(a).is_empty());
        assert_eq!(tree.hidden_children(a).len(), 2);
        assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "A", "B"]);

        assert!(tree.toggle_expanded(a).unwrap());
        assert_eq!(tree.visible_nodes().len(), 5);
    }

    #[test]
    fn children_and_hidden_children_are_exclusive() {
        let mut tree = sample();
        let a = by_name(&tree, "A");
        for _ in 0..4 {
            tree.toggle_expanded(a).unwrap();
            for i in 0..tree.len() {
                let id = tree.node_id(i);
                assert!(
                    tree.visible_children(id).is_empty() || tree.hidden_children(id).is_empty(),
                    "both child sets populated for {id:?}"
                );
            }
        }
        // Leaves have neither.
        let b = by_name(&tree, "B");
        tree.toggle_expanded(b).unwrap();
        assert!(tree.visible_children(b).is_empty());
        assert!(tree.hidden_children(b).is_empty());
    }

    #[test]
    fn selection_is_independent_of_expansion() {
        let mut tree = sample();
        let a = by_name(&tree, "A");
        assert!(!tree.is_selected(a));
        assert!(tree.toggle_selected(a).unwrap());
        assert!(tree.is_expanded(a));
        assert!(!tree.toggle_selected(a).unwrap());
        tree.set_selected(a, true).unwrap();
        assert_eq!(tree.state(a), Some(NodeState::EXPANDED | NodeState::SELECTED));
    }

    #[test]
    fn identities_are_assigned_once_and_never_reused() {
        let mut tree = sample();
        let root = tree.root();
        let b = by_name(&tree, "B");
        assert_eq!(tree.identity(root), None);
        assert_eq!(tree.assign_identity(root).unwrap(), 1);
        assert_eq!(tree.assign_identity(b).unwrap(), 2);
        assert_eq!(tree.assign_identity(root).unwrap(), 1);
        assert_eq!(tree.assign_identity(b).unwrap(), 2);
        let a = by_name(&tree, "A");
        assert_eq!(tree.assign_identity(a).unwrap(), 3);
        assert_eq!(tree.find_by_identity(3), Some(a));
        assert_eq!(tree.find_by_identity(42), None);
    }

    #[test]
    fn seeded_identities_continue_after_seed() {
        let mut tree = sample();
        tree.seed_identities(7);
        assert_eq!(tree.assign_identity(tree.root()).unwrap(), 8);
        // Seeding never moves the counter backwards.
        tree.seed_identities(2);
        assert_eq!(tree.assign_identity(by_name(&tree, "A")).unwrap(), 9);
    }

    #[test]
    fn root_ancestor_identity_follows_depth_one_ancestor() {
        let mut tree = sample();
        for id in tree.visible_nodes() {
            tree.assign_identity(id).unwrap();
        }
        let a = by_name(&tree, "A");
        let a_identity = tree.identity(a);
        assert_eq!(tree.root_ancestor_identity(a), a_identity);
        assert_eq!(tree.root_ancestor_identity(by_name(&tree, "A1")), a_identity);
        assert_eq!(tree.root_ancestor_identity(by_name(&tree, "A2")), a_identity);
        assert_eq!(
            tree.root_ancestor_identity(tree.root()),
            tree.identity(tree.root())
        );
    }

    #[test]
    fn collapse_all_hides_below_first_level() {
        let mut tree = Hierarchy::from_data(HostNode::new("root").with_children([
            HostNode::new("A").with_children([
                HostNode::new("A1").with_children([HostNode::new("A1a")]),
            ]),
            HostNode::new("B"),
        ]))
        .unwrap();
        tree.apply_collapse(&CollapsePolicy::All);
        assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "A", "B"]);
        // Nested nodes are collapsed too, so expanding A shows only A1.
        tree.toggle_expanded(by_name(&tree, "A")).unwrap();
        assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "A", "B", "A1"]);
    }

    #[test]
    fn collapse_field_keeps_nodes_marked_false_open() {
        let mut tree = Hierarchy::from_data(HostNode::new("root").with_children([
            HostNode::new("A")
                .with_flag("collapsed", false)
                .with_children([HostNode::new("A1").with_children([HostNode::new("A1a")])]),
            HostNode::new("B")
                .with_flag("collapsed", true)
                .with_children([HostNode::new("B1")]),
        ]))
        .unwrap();
        tree.apply_collapse(&CollapsePolicy::Field(String::from("collapsed")));
        assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "A", "B", "A1"]);
    }

    #[test]
    fn collapse_never_is_a_no_op() {
        let mut tree = sample();
        tree.apply_collapse(&CollapsePolicy::Never);
        assert_eq!(tree.visible_nodes().len(), 5);
    }

    #[test]
    fn visible_links_pair_children_with_parents() {
        let mut tree = sample();
        let a = by_name(&tree, "A");
        let links = tree.visible_links();
        assert_eq!(links.len(), 4);
        assert!(links.contains(&(a, by_name(&tree, "A1"))));
        tree.set_expanded(a, false).unwrap();
        assert_eq!(
            tree.visible_links(),
            vec![(tree.root(), a), (tree.root(), by_name(&tree, "B"))]
        );
    }

    #[test]
    fn stale_handles_are_reported() {
        let mut tree = sample();
        let stale = NodeId {
            idx: 99,
            tree: tree.tree,
        };
        assert!(!tree.contains(stale));
        assert_eq!(
            tree.toggle_expanded(stale),
            Err(HierarchyError::StaleNode(stale))
        );
        assert_eq!(
            tree.set_previous_position(stale, Point::ZERO),
            Err(HierarchyError::StaleNode(stale))
        );
        assert!(tree.children(stale).is_empty());
        assert_eq!(tree.name(stale), None);
    }

    #[test]
    fn handles_from_another_hierarchy_are_stale() {
        let old = sample();
        let mut tree = sample();
        let foreign = by_name(&old, "A1");
        assert_eq!(foreign.idx(), by_name(&tree, "A1").idx());
        assert!(!tree.contains(foreign));
        assert_eq!(tree.name(foreign), None);
        assert!(!tree.is_selected(foreign));
        assert_eq!(
            tree.toggle_selected(foreign),
            Err(HierarchyError::StaleNode(foreign))
        );
        assert!(tree.contains(by_name(&tree, "A1")));
    }

    #[test]
    fn previous_position_round_trips() {
        let mut tree = sample();
        let root = tree.root();
        assert_eq!(tree.previous_position(root), None);
        tree.set_previous_position(root, Point::new(0.0, 150.0)).unwrap();
        assert_eq!(tree.previous_position(root), Some(Point::new(0.0, 150.0)));
    }
}
