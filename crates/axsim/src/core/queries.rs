/*!
Read-only session accessors: current node, cursor, sequence, mode.
*/

use super::Axsim;
use crate::nav::Mode;
use crate::tree::{AccessibilityNode, AccessibilityTree};
use crate::types::{AxsimError, AxsimResult, NodeId};
use std::sync::Arc;

impl Axsim {
  /// Look up a node in the current snapshot. Hidden nodes resolve too,
  /// matching relationship semantics.
  pub fn node(&self, id: NodeId) -> AxsimResult<AccessibilityNode> {
    self.read(|doc| {
      doc
        .tree
        .get(id)
        .cloned()
        .ok_or(AxsimError::NodeNotFound(id))
    })
  }

  /// Node id under the cursor, if any.
  pub fn cursor(&self) -> Option<NodeId> {
    self.with_nav(|state| {
      let index = state.cursor?;
      self.read(|doc| doc.tree.sequence().get(index).copied())
    })
  }

  /// Cursor position within the flattened sequence.
  pub fn cursor_index(&self) -> Option<usize> {
    self.with_nav(|state| state.cursor)
  }

  /// Current navigation mode.
  pub fn mode(&self) -> Mode {
    self.with_nav(|state| state.mode)
  }

  /// The current flattened sequence of visible node ids.
  pub fn sequence(&self) -> Vec<NodeId> {
    self.read(|doc| doc.tree.sequence().to_vec())
  }

  /// A handle to the current tree snapshot. The snapshot is immutable;
  /// rebuilds swap in a new one without disturbing existing handles.
  pub fn tree(&self) -> Arc<AccessibilityTree> {
    self.read(|doc| Arc::clone(&doc.tree))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawElement;

  #[test]
  fn node_lookup_and_missing_id() {
    let axsim = Axsim::new();
    axsim.load(&RawElement::new(1, "button").text("Go"));

    let node = axsim.node(NodeId(1)).unwrap();
    assert_eq!(node.name, "Go");
    assert!(matches!(
      axsim.node(NodeId(9)),
      Err(AxsimError::NodeNotFound(NodeId(9)))
    ));
  }

  #[test]
  fn tree_handle_survives_rebuild() {
    let axsim = Axsim::new();
    axsim.load(&RawElement::new(1, "p").text("one"));
    let old = axsim.tree();
    axsim.load(&RawElement::new(2, "p").text("two"));
    // The old handle still reads the old snapshot.
    assert!(old.contains(NodeId(1)));
    assert!(!axsim.tree().contains(NodeId(1)));
  }

  #[test]
  fn sequence_matches_visible_preorder() {
    let axsim = Axsim::new();
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "p").text("a"))
      .child(RawElement::new(3, "p").unrendered().text("b"));
    axsim.load(&raw);
    assert_eq!(axsim.sequence(), vec![NodeId(1), NodeId(2)]);
  }
}
