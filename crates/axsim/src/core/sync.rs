/*!
Tree rebuild and atomic swap.

The new tree, flattened sequence, and live-region watches are constructed
fully off to the side, then the active document state is replaced in one
write. Commands racing the swap see either the old snapshot or the new one,
never a half-built tree. Afterwards the cursor is reconciled: same node id
when it survived, else the nearest surviving node in prior order.
*/

use super::{Axsim, DocumentState};
use crate::live;
use crate::raw::RawElement;
use crate::tree::{build_tree, AccessibilityTree};
use crate::types::{Event, NodeId};
use std::sync::Arc;

impl Axsim {
  /// Build a tree from a document snapshot and swap it in.
  ///
  /// Safe to call repeatedly; every host snapshot goes through here. The
  /// navigation mode is untouched, the cursor is re-pointed or clamped, and
  /// a [`Event::TreeRebuilt`] notice is broadcast.
  pub fn load(&self, raw: &RawElement) {
    let tree = Arc::new(build_tree(raw));
    let watches = live::compute_watches(&tree);
    log::debug!(
      "built tree: {} nodes, {} visible, {} live regions",
      tree.node_count(),
      tree.sequence().len(),
      watches.len()
    );

    // Hold the navigation lock across the swap so no command interleaves
    // between swap and cursor reconciliation.
    let cursor_retained = self.with_nav(|nav| {
      let old_sequence: Vec<NodeId> =
        self.read(|doc| doc.tree.sequence().to_vec());
      let (cursor, retained) = reconcile_cursor(nav.cursor, &old_sequence, &tree);
      nav.cursor = cursor;

      self.write(|doc| {
        *doc = DocumentState {
          tree: Arc::clone(&tree),
          watches,
        };
      });
      retained
    });

    self.emit(Event::TreeRebuilt {
      nodes: tree.sequence().len(),
      cursor_retained,
    });
  }
}

/// New cursor position after a rebuild, and whether it still points at the
/// same node id.
fn reconcile_cursor(
  cursor: Option<usize>,
  old_sequence: &[NodeId],
  tree: &AccessibilityTree,
) -> (Option<usize>, bool) {
  let Some(index) = cursor else {
    return (None, false);
  };
  let new_len = tree.sequence().len();
  if new_len == 0 {
    return (None, false);
  }

  if let Some(position) = old_sequence
    .get(index)
    .and_then(|&id| tree.order_of(id))
  {
    return (Some(position), true);
  }

  // Prefer the next remaining node in prior order, then the previous ones.
  let forward = old_sequence
    .get(index + 1..)
    .into_iter()
    .flatten()
    .find_map(|&id| tree.order_of(id));
  if let Some(position) = forward {
    return (Some(position), false);
  }
  let backward = old_sequence
    .get(..index)
    .into_iter()
    .flatten()
    .rev()
    .find_map(|&id| tree.order_of(id));
  if let Some(position) = backward {
    return (Some(position), false);
  }

  (Some(index.min(new_len - 1)), false)
}
