/*!
Live-region simulation.

Watches are recomputed from the tree on every rebuild: one per visible node
whose explicit `aria-live`-family attributes or implicit role make it a live
region. Host-delivered change notifications resolve against the nearest
watched ancestor, pass its relevance filter, and become announcements with
its politeness. Processing never touches the navigation cursor.

The host owns mutation observation entirely; this module is the reactive
sink for whatever batching or diffing the host performs.
*/

use crate::a11y::{LiveRegionWatch, Politeness};
use crate::core::Axsim;
use crate::tree::AccessibilityTree;
use crate::types::{Announcement, AnnouncementSource, ChangeNotification, NodeId};
use std::collections::HashMap;

/// Recompute the watch set for a fresh tree snapshot.
pub(crate) fn compute_watches(tree: &AccessibilityTree) -> HashMap<NodeId, LiveRegionWatch> {
  let mut watches = HashMap::new();
  for &id in tree.sequence() {
    let Some(node) = tree.get(id) else {
      continue;
    };
    if let Some(watch) = LiveRegionWatch::resolve(node.role, &node.live) {
      watches.insert(id, watch);
    }
  }
  if !watches.is_empty() {
    log::debug!("tracking {} live regions", watches.len());
  }
  watches
}

/// A change notification resolved into announcement text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LiveOutcome {
  pub(crate) text: String,
  pub(crate) politeness: Politeness,
}

/// Process one host notification against the current snapshot.
///
/// Returns `None` when the notification is dropped: no watched ancestor,
/// politeness off, filtered-out change kind, or nothing left to read. Stale
/// ids degrade to silence, never errors.
pub(crate) fn process_change(
  tree: &AccessibilityTree,
  watches: &HashMap<NodeId, LiveRegionWatch>,
  note: &ChangeNotification,
) -> Option<LiveOutcome> {
  if !tree.contains(note.subtree_root) {
    log::debug!("change notification for stale node {}; dropped", note.subtree_root);
    return None;
  }

  let (region, watch) = nearest_watched(tree, watches, note.subtree_root)?;
  if watch.politeness == Politeness::Off {
    return None;
  }
  if !watch.relevant.includes(note.kind) {
    log::debug!(
      "change kind {:?} not relevant for region {region}; dropped",
      note.kind
    );
    return None;
  }

  let text = if watch.atomic {
    // Atomic regions re-read their whole current content.
    tree.subtree_text(region)
  } else {
    changed_portion(tree, &note.affected)
  };
  if text.is_empty() {
    return None;
  }

  Some(LiveOutcome {
    text,
    politeness: watch.politeness,
  })
}

/// Nearest watched ancestor-or-self.
fn nearest_watched<'w>(
  tree: &AccessibilityTree,
  watches: &'w HashMap<NodeId, LiveRegionWatch>,
  id: NodeId,
) -> Option<(NodeId, &'w LiveRegionWatch)> {
  if let Some(watch) = watches.get(&id) {
    return Some((id, watch));
  }
  tree
    .ancestors(id)
    .find_map(|ancestor| watches.get(&ancestor).map(|watch| (ancestor, watch)))
}

/// Resolved text of the affected nodes, document order. Ids that no longer
/// resolve (or are hidden) contribute nothing.
fn changed_portion(tree: &AccessibilityTree, affected: &[NodeId]) -> String {
  let mut ordered: Vec<(usize, NodeId)> = affected
    .iter()
    .filter_map(|&id| tree.order_of(id).map(|order| (order, id)))
    .collect();
  ordered.sort_unstable();
  ordered.dedup();

  let parts: Vec<String> = ordered
    .into_iter()
    .map(|(_, id)| tree.subtree_text(id))
    .filter(|text| !text.is_empty())
    .collect();
  parts.join(" ")
}

impl Axsim {
  /// Feed one host change notification into the simulation.
  ///
  /// Only enqueues; the navigation cursor is untouched and delivery happens
  /// through [`Axsim::deliver_next`]. Returns the enqueued announcement, or
  /// `None` when the notification was dropped.
  pub fn notify_change(&self, note: &ChangeNotification) -> Option<Announcement> {
    let outcome = self.read(|doc| process_change(&doc.tree, &doc.watches, note))?;
    Some(self.enqueue(outcome.text, AnnouncementSource::LiveRegion, outcome.politeness))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawElement;
  use crate::tree::build_tree;
  use crate::types::ChangeKind;

  fn note(root: u32, kind: ChangeKind, affected: &[u32]) -> ChangeNotification {
    ChangeNotification {
      subtree_root: NodeId(root),
      kind,
      affected: affected.iter().map(|&id| NodeId(id)).collect(),
    }
  }

  fn status_fixture() -> AccessibilityTree {
    // div(1) -> [output(2) -> span(3), p(4)]
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "output").child(RawElement::new(3, "span").text("Saved")))
      .child(RawElement::new(4, "p").text("plain"));
    build_tree(&raw)
  }

  #[test]
  fn watches_cover_implicit_and_explicit_regions() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "output"))
      .child(RawElement::new(3, "div").attr("aria-live", "polite"))
      .child(RawElement::new(4, "p"));
    let tree = build_tree(&raw);
    let watches = compute_watches(&tree);
    assert!(watches.contains_key(&NodeId(2)));
    assert!(watches.contains_key(&NodeId(3)));
    assert!(!watches.contains_key(&NodeId(4)));
  }

  #[test]
  fn hidden_live_region_is_not_watched() {
    let raw =
      RawElement::new(1, "div").child(RawElement::new(2, "output").unrendered());
    let tree = build_tree(&raw);
    assert!(compute_watches(&tree).is_empty());
  }

  #[test]
  fn change_inside_status_region_announces_atomically() {
    let tree = status_fixture();
    let watches = compute_watches(&tree);
    // Status regions are atomic: the whole region is re-read.
    let outcome =
      process_change(&tree, &watches, &note(3, ChangeKind::Text, &[3])).unwrap();
    assert_eq!(outcome.text, "Saved");
    assert_eq!(outcome.politeness, Politeness::Polite);
  }

  #[test]
  fn change_outside_any_region_is_dropped() {
    let tree = status_fixture();
    let watches = compute_watches(&tree);
    assert_eq!(process_change(&tree, &watches, &note(4, ChangeKind::Text, &[4])), None);
  }

  #[test]
  fn irrelevant_change_kind_is_dropped() {
    let tree = status_fixture();
    let watches = compute_watches(&tree);
    // Default relevant set is additions+text; removals are filtered.
    assert_eq!(
      process_change(&tree, &watches, &note(2, ChangeKind::Removal, &[3])),
      None
    );
  }

  #[test]
  fn off_region_is_dropped() {
    let raw = RawElement::new(1, "div")
      .attr("aria-live", "off")
      .child(RawElement::new(2, "span").text("quiet"));
    let tree = build_tree(&raw);
    let watches = compute_watches(&tree);
    assert_eq!(process_change(&tree, &watches, &note(2, ChangeKind::Text, &[2])), None);
  }

  #[test]
  fn non_atomic_region_announces_only_changed_portion() {
    let raw = RawElement::new(1, "div")
      .attr("aria-live", "polite")
      .child(RawElement::new(2, "p").text("old entry"))
      .child(RawElement::new(3, "p").text("new entry"));
    let tree = build_tree(&raw);
    let watches = compute_watches(&tree);
    let outcome =
      process_change(&tree, &watches, &note(1, ChangeKind::Addition, &[3])).unwrap();
    assert_eq!(outcome.text, "new entry");
  }

  #[test]
  fn changed_portions_concatenate_in_document_order() {
    let raw = RawElement::new(1, "div")
      .attr("aria-live", "polite")
      .child(RawElement::new(2, "p").text("first"))
      .child(RawElement::new(3, "p").text("second"));
    let tree = build_tree(&raw);
    let watches = compute_watches(&tree);
    // Affected delivered out of order; announcement still reads in document
    // order.
    let outcome = process_change(
      &tree,
      &watches,
      &note(1, ChangeKind::Addition, &[3, 2]),
    )
    .unwrap();
    assert_eq!(outcome.text, "first second");
  }

  #[test]
  fn stale_affected_ids_degrade_to_silence() {
    let tree = status_fixture();
    let watches = compute_watches(&tree);
    let raw_note = ChangeNotification {
      subtree_root: NodeId(2),
      kind: ChangeKind::Text,
      affected: vec![NodeId(99)],
    };
    // Atomic status still re-reads; a log-style region would go silent.
    let outcome = process_change(&tree, &watches, &raw_note).unwrap();
    assert_eq!(outcome.text, "Saved");

    let stale_root = ChangeNotification {
      subtree_root: NodeId(99),
      kind: ChangeKind::Text,
      affected: vec![NodeId(99)],
    };
    assert_eq!(process_change(&tree, &watches, &stale_root), None);
  }

  #[test]
  fn alert_region_is_assertive() {
    let raw = RawElement::new(1, "div")
      .attr("role", "alert")
      .child(RawElement::new(2, "span").text("Session expired"));
    let tree = build_tree(&raw);
    let watches = compute_watches(&tree);
    let outcome =
      process_change(&tree, &watches, &note(2, ChangeKind::Text, &[2])).unwrap();
    assert_eq!(outcome.politeness, Politeness::Assertive);
    assert_eq!(outcome.text, "Session expired");
  }
}
