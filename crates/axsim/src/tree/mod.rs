/*!
The accessibility tree - perceived semantics of one document snapshot.

A tree is immutable once built. Rebuilds construct a whole new tree off to
the side and the session swaps it in atomically, so readers never observe a
half-built tree. The flattened sequence (pre-order, visible nodes only) is
computed at build time and swapped together with the node storage.
*/

mod build;
mod name;
mod node;

pub use node::AccessibilityNode;

pub(crate) use build::build_tree;

use crate::types::NodeId;
use std::collections::HashMap;

/// An immutable accessibility tree plus its flattened navigation sequence.
#[derive(Debug, Clone)]
pub struct AccessibilityTree {
  nodes: HashMap<NodeId, AccessibilityNode>,
  root: NodeId,
  sequence: Vec<NodeId>,
  order: HashMap<NodeId, usize>,
}

impl AccessibilityTree {
  /// An empty document: just the synthetic root.
  pub(crate) fn empty() -> Self {
    let root = AccessibilityNode::new(NodeId::ROOT, crate::a11y::Role::Document);
    let mut nodes = HashMap::new();
    nodes.insert(NodeId::ROOT, root);
    Self {
      nodes,
      root: NodeId::ROOT,
      sequence: Vec::new(),
      order: HashMap::new(),
    }
  }

  /// Assemble a tree from finished nodes. Flattens immediately.
  pub(crate) fn from_nodes(nodes: HashMap<NodeId, AccessibilityNode>, root: NodeId) -> Self {
    let mut tree = Self {
      nodes,
      root,
      sequence: Vec::new(),
      order: HashMap::new(),
    };
    tree.sequence = tree.flatten();
    tree.order = tree
      .sequence
      .iter()
      .enumerate()
      .map(|(index, &id)| (id, index))
      .collect();
    tree
  }

  /// The synthetic root container.
  pub const fn root_id(&self) -> NodeId {
    self.root
  }

  /// Look up a node. Hidden nodes resolve too.
  pub fn get(&self, id: NodeId) -> Option<&AccessibilityNode> {
    self.nodes.get(&id)
  }

  /// Whether the id resolves in this snapshot.
  pub fn contains(&self, id: NodeId) -> bool {
    self.nodes.contains_key(&id)
  }

  /// Total node count, hidden and root included.
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// The flattened sequence: visible nodes in pre-order, root excluded.
  pub fn sequence(&self) -> &[NodeId] {
    &self.sequence
  }

  /// Position of a node in the flattened sequence. `None` for hidden nodes.
  pub fn order_of(&self, id: NodeId) -> Option<usize> {
    self.order.get(&id).copied()
  }

  /// Visible children of a node, in document order.
  pub fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
    let Some(node) = self.nodes.get(&id) else {
      return Vec::new();
    };
    node
      .children
      .iter()
      .copied()
      .filter(|child| self.nodes.get(child).is_some_and(|n| !n.hidden))
      .collect()
  }

  /// Walk strict ancestors from the node's parent up to (and including) the
  /// synthetic root.
  pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
    Ancestors {
      tree: self,
      next: self.nodes.get(&id).and_then(|node| node.parent),
    }
  }

  /// Resolved visible text of a node's subtree: its own text runs plus those
  /// of every visible descendant, in document order, space-joined.
  pub fn subtree_text(&self, id: NodeId) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
      let Some(node) = self.nodes.get(&current) else {
        continue;
      };
      // A hidden subtree root still reads as empty, matching perception.
      if node.hidden && current != id {
        continue;
      }
      if node.hidden && current == id {
        return String::new();
      }
      if !node.text.is_empty() {
        parts.push(&node.text);
      }
      for &child in node.children.iter().rev() {
        if self.nodes.get(&child).is_some_and(|n| !n.hidden) {
          stack.push(child);
        }
      }
    }
    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
  }

  /// Pre-order traversal of visible nodes, excluding the root container.
  /// Iterative to avoid stack overflow on deep trees.
  fn flatten(&self) -> Vec<NodeId> {
    let mut sequence = Vec::new();
    let mut stack: Vec<NodeId> = self
      .visible_children(self.root)
      .into_iter()
      .rev()
      .collect();
    while let Some(id) = stack.pop() {
      sequence.push(id);
      for child in self.visible_children(id).into_iter().rev() {
        stack.push(child);
      }
    }
    sequence
  }
}

/// Iterator over strict ancestors, parent first.
#[derive(Debug)]
pub struct Ancestors<'a> {
  tree: &'a AccessibilityTree,
  next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    let current = self.next?;
    self.next = self.tree.get(current).and_then(|node| node.parent);
    Some(current)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::a11y::Role;

  fn leaf(id: u32, role: Role, parent: NodeId, text: &str) -> AccessibilityNode {
    let mut node = AccessibilityNode::new(NodeId(id), role);
    node.parent = Some(parent);
    node.text = text.to_string();
    node
  }

  fn sample_tree() -> AccessibilityTree {
    // root -> nav(1) -> [link(2), link(3, hidden) -> text(4)]
    let mut root = AccessibilityNode::new(NodeId::ROOT, Role::Document);
    root.children = vec![NodeId(1)];

    let mut nav = leaf(1, Role::Navigation, NodeId::ROOT, "");
    nav.children = vec![NodeId(2), NodeId(3)];

    let link_a = leaf(2, Role::Link, NodeId(1), "Home");

    let mut link_b = leaf(3, Role::Link, NodeId(1), "Secret");
    link_b.hidden = true;
    link_b.children = vec![NodeId(4)];

    let mut inner = leaf(4, Role::Generic, NodeId(3), "inner");
    inner.hidden = true;

    let mut nodes = HashMap::new();
    nodes.insert(NodeId::ROOT, root);
    nodes.insert(NodeId(1), nav);
    nodes.insert(NodeId(2), link_a);
    nodes.insert(NodeId(3), link_b);
    nodes.insert(NodeId(4), inner);
    AccessibilityTree::from_nodes(nodes, NodeId::ROOT)
  }

  #[test]
  fn sequence_skips_hidden_subtrees() {
    let tree = sample_tree();
    assert_eq!(tree.sequence(), &[NodeId(1), NodeId(2)]);
    assert_eq!(tree.order_of(NodeId(2)), Some(1));
    assert_eq!(tree.order_of(NodeId(3)), None);
  }

  #[test]
  fn hidden_nodes_still_resolve() {
    let tree = sample_tree();
    assert!(tree.contains(NodeId(3)));
    assert!(tree.get(NodeId(3)).is_some_and(|node| node.hidden));
  }

  #[test]
  fn subtree_text_skips_hidden() {
    let tree = sample_tree();
    assert_eq!(tree.subtree_text(NodeId(1)), "Home");
    assert_eq!(tree.subtree_text(NodeId(3)), "");
  }

  #[test]
  fn ancestors_walk_to_root() {
    let tree = sample_tree();
    let chain: Vec<NodeId> = tree.ancestors(NodeId(2)).collect();
    assert_eq!(chain, vec![NodeId(1), NodeId::ROOT]);
  }

  #[test]
  fn empty_tree_has_no_sequence() {
    let tree = AccessibilityTree::empty();
    assert!(tree.sequence().is_empty());
    assert_eq!(tree.node_count(), 1);
  }
}
