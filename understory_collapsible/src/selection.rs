// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection record reported to the host.

use serde::{Deserialize, Serialize};
use understory_hierarchy::Hierarchy;

use crate::error::WidgetError;

/// One selected node, described by its path context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Identity of the node's depth-1 ancestor; groups records of one branch.
    pub identity: u32,
    /// Name of the parent node.
    pub parent: String,
    /// Level label, `hierarchy[depth - 1]`.
    pub level: String,
    /// Name of the node.
    pub value: String,
}

/// Collect a record for every visible selected node below the root, breadth-first.
///
/// Only nodes that took part in a render carry an identity; a visible selected node without one
/// is reported as [`WidgetError::StaleStateReference`].
pub fn aggregate(tree: &Hierarchy, levels: &[String]) -> Result<Vec<SelectionRecord>, WidgetError> {
    let mut records = Vec::new();
    for id in tree.visible_nodes() {
        let depth = tree.depth(id).unwrap_or(0);
        if depth == 0 || !tree.is_selected(id) {
            continue;
        }
        let identity = tree
            .root_ancestor_identity(id)
            .ok_or(WidgetError::StaleStateReference(id))?;
        let level = levels
            .get(depth - 1)
            .ok_or_else(|| WidgetError::InvalidConfiguration {
                reason: format!("no hierarchy label for depth {depth}"),
            })?;
        let parent = tree
            .parent(id)
            .and_then(|p| tree.name(p))
            .unwrap_or_default();
        records.push(SelectionRecord {
            identity,
            parent: parent.to_owned(),
            level: level.clone(),
            value: tree.name(id).unwrap_or_default().to_owned(),
        });
    }
    Ok(records)
}

/// Encode records as the JSON array the host channel receives.
pub fn to_json(records: &[SelectionRecord]) -> Result<String, WidgetError> {
    Ok(serde_json::to_string(records)?)
}

#[cfg(test)]
mod tests {
    use understory_hierarchy::HostNode;

    use super::*;

    fn labels() -> Vec<String> {
        vec!["L1".into(), "L2".into()]
    }

    fn tree() -> Hierarchy {
        let mut tree = Hierarchy::from_data(HostNode::new("root").with_children([
            HostNode::new("A").with_children([HostNode::new("A1"), HostNode::new("A2")]),
            HostNode::new("B"),
        ]))
        .unwrap();
        for id in tree.visible_nodes() {
            tree.assign_identity(id).unwrap();
        }
        tree
    }

    #[test]
    fn nothing_selected_is_empty() {
        let tree = tree();
        assert!(aggregate(&tree, &labels()).unwrap().is_empty());
    }

    #[test]
    fn root_never_appears() {
        let mut tree = tree();
        let root = tree.root();
        tree.set_selected(root, true).unwrap();
        assert!(aggregate(&tree, &labels()).unwrap().is_empty());
    }

    #[test]
    fn records_follow_breadth_first_order_and_share_branch_identity() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.children(root)[0];
        let b = tree.children(root)[1];
        let a2 = tree.children(a)[1];
        tree.set_selected(a2, true).unwrap();
        tree.set_selected(b, true).unwrap();
        tree.set_selected(a, true).unwrap();

        let records = aggregate(&tree, &labels()).unwrap();
        let values: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["A", "B", "A2"]);

        let a_identity = tree.identity(a).unwrap();
        assert_eq!(records[0].identity, a_identity);
        assert_eq!(records[2].identity, a_identity);
        assert_eq!(records[2].parent, "A");
        assert_eq!(records[2].level, "L2");
        assert_eq!(records[1].identity, tree.identity(b).unwrap());
        assert_eq!(records[1].level, "L1");
    }

    #[test]
    fn hidden_selected_nodes_are_skipped() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.children(root)[0];
        let a1 = tree.children(a)[0];
        tree.set_selected(a1, true).unwrap();
        tree.set_expanded(a, false).unwrap();
        assert!(aggregate(&tree, &labels()).unwrap().is_empty());
    }

    #[test]
    fn missing_level_label_is_a_configuration_error() {
        let mut tree = tree();
        let a = tree.children(tree.root())[0];
        let a1 = tree.children(a)[0];
        tree.set_selected(a1, true).unwrap();
        let err = aggregate(&tree, &["L1".to_owned()]).unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfiguration { .. }));
    }

    #[test]
    fn unrendered_selected_node_is_stale() {
        let mut tree = Hierarchy::from_data(
            HostNode::new("root").with_children([HostNode::new("A")]),
        )
        .unwrap();
        let a = tree.children(tree.root())[0];
        tree.set_selected(a, true).unwrap();
        let err = aggregate(&tree, &labels()).unwrap_err();
        assert!(matches!(err, WidgetError::StaleStateReference(id) if id == a));
    }

    #[test]
    fn json_uses_record_field_names() {
        let json = to_json(&[SelectionRecord {
            identity: 2,
            parent: "root".into(),
            level: "L1".into(),
            value: "A".into(),
        }])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"identity":2,"parent":"root","level":"L1","value":"A"}]"#
        );
    }
}
