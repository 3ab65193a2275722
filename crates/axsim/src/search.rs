/*!
Read-only search over the current tree snapshot.

Queries never mutate cursor or tree state and run against whatever snapshot
is current when they start. Text search fans out across nodes on rayon and
re-sorts into document order, so complete runs are deterministic; a
cooperative cancellation token is checked per node and turns the result into
a partial one, never an error.
*/

use crate::a11y::Role;
use crate::core::Axsim;
use crate::tree::AccessibilityNode;
use crate::types::{NodeId, TextRange};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use ts_rs::TS;

/// Cooperative cancellation flag for long-running searches.
///
/// Clone is cheap; cancel from any thread. A cancelled search returns the
/// matches it found so far.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
  flag: Arc<AtomicBool>,
}

impl CancellationToken {
  /// Create a token in the not-cancelled state.
  pub fn new() -> Self {
    Self::default()
  }

  /// Request cancellation. Checked between nodes.
  pub fn cancel(&self) {
    self.flag.store(true, Ordering::Relaxed);
  }

  /// Whether cancellation was requested.
  pub fn is_cancelled(&self) -> bool {
    self.flag.load(Ordering::Relaxed)
  }
}

/// One text-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TextMatch {
  /// The matched node.
  pub node_id: NodeId,
  /// The searchable text the spans index into: name, description, and
  /// content text, space-joined.
  pub text: String,
  /// Byte spans of each match within `text`.
  pub spans: Vec<TextRange>,
}

/// Outline flavors for document summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum OutlineKind {
  Headings,
  Landmarks,
  FormControls,
}

/// One outline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[allow(missing_docs)]
pub struct OutlineEntry {
  pub node_id: NodeId,
  pub role: Role,
  /// Heading level, when the entry has one.
  pub level: Option<u32>,
  pub name: String,
}

impl Axsim {
  /// Case-insensitive substring search over every visible node's name,
  /// description, and content text, in document order.
  pub fn text_search(&self, query: &str, cancel: &CancellationToken) -> Vec<TextMatch> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
      return Vec::new();
    }
    let tree = self.read(|doc| Arc::clone(&doc.tree));

    let mut matches: Vec<(usize, TextMatch)> = tree
      .sequence()
      .par_iter()
      .enumerate()
      .filter_map(|(index, &id)| {
        if cancel.is_cancelled() {
          return None;
        }
        let node = tree.get(id)?;
        let haystack = searchable_text(&tree, node);
        let spans = find_spans(&haystack, &needle);
        if spans.is_empty() {
          return None;
        }
        Some((
          index,
          TextMatch {
            node_id: id,
            text: haystack,
            spans,
          },
        ))
      })
      .collect();

    matches.sort_unstable_by_key(|(index, _)| *index);
    matches.into_iter().map(|(_, found)| found).collect()
  }

  /// All visible nodes whose role is in the set, document order.
  pub fn role_filter(&self, roles: &[Role]) -> Vec<NodeId> {
    let tree = self.read(|doc| Arc::clone(&doc.tree));
    tree
      .sequence()
      .iter()
      .copied()
      .filter(|&id| {
        tree
          .get(id)
          .is_some_and(|node| roles.contains(&node.role))
      })
      .collect()
  }

  /// All visible nodes satisfying a caller predicate over states and
  /// properties, document order.
  pub fn attribute_query<F>(&self, predicate: F) -> Vec<NodeId>
  where
    F: Fn(&AccessibilityNode) -> bool,
  {
    let tree = self.read(|doc| Arc::clone(&doc.tree));
    tree
      .sequence()
      .iter()
      .copied()
      .filter(|&id| tree.get(id).is_some_and(&predicate))
      .collect()
  }

  /// Ordered document outline of one kind.
  pub fn outline(&self, kind: OutlineKind) -> Vec<OutlineEntry> {
    let tree = self.read(|doc| Arc::clone(&doc.tree));
    tree
      .sequence()
      .iter()
      .filter_map(|&id| {
        let node = tree.get(id)?;
        let include = match kind {
          OutlineKind::Headings => node.role == Role::Heading,
          OutlineKind::Landmarks => node.role.is_landmark(),
          OutlineKind::FormControls => node.role.is_form_control(),
        };
        if !include {
          return None;
        }
        Some(OutlineEntry {
          node_id: id,
          role: node.role,
          level: (node.role == Role::Heading).then(|| node.heading_level()),
          name: node.name.clone(),
        })
      })
      .collect()
  }
}

/// Name + description + content text, space-joined, skipping empty parts.
fn searchable_text(tree: &crate::tree::AccessibilityTree, node: &AccessibilityNode) -> String {
  let content = tree.subtree_text(node.id);
  let mut parts: Vec<&str> = Vec::new();
  for part in [node.name.as_str(), node.description.as_str(), content.as_str()] {
    if !part.is_empty() && !parts.contains(&part) {
      parts.push(part);
    }
  }
  parts.join(" ")
}

/// Non-overlapping case-insensitive match spans, as byte ranges into the
/// original text.
fn find_spans(haystack: &str, needle_lower: &str) -> Vec<TextRange> {
  let (lowered, map) = lower_with_map(haystack);
  let mut spans = Vec::new();
  let mut from = 0;
  while let Some(found) = lowered.get(from..).and_then(|rest| rest.find(needle_lower)) {
    let start = from + found;
    let end = start + needle_lower.len();
    let orig_start = map.get(start).copied().unwrap_or(0);
    let orig_end = map.get(end).copied().unwrap_or(haystack.len());
    spans.push(TextRange::new(
      u32::try_from(orig_start).unwrap_or(u32::MAX),
      u32::try_from(orig_end).unwrap_or(u32::MAX),
    ));
    from = end;
  }
  spans
}

/// Lowercase a string, tracking each lowered byte's originating byte offset.
/// Case folding can change byte lengths (e.g. dotted capitals), so spans are
/// mapped back through this table.
fn lower_with_map(s: &str) -> (String, Vec<usize>) {
  let mut lowered = String::with_capacity(s.len());
  let mut map = Vec::with_capacity(s.len() + 1);
  for (offset, ch) in s.char_indices() {
    for lower in ch.to_lowercase() {
      for _ in 0..lower.len_utf8() {
        map.push(offset);
      }
      lowered.push(lower);
    }
  }
  map.push(s.len());
  (lowered, map)
}
