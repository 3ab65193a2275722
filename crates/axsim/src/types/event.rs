/*! Event types for the unified announcement stream and the host change feed. */

use super::NodeId;
use crate::a11y::Politeness;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Byte range within text. End is exclusive, matching Rust's `Range` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextRange {
  /// Start position (inclusive).
  pub start: u32,
  /// End position (exclusive).
  pub end: u32,
}

impl TextRange {
  /// Create a new text range.
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// Length of the range in bytes.
  pub const fn len(&self) -> u32 {
    self.end - self.start
  }

  /// Check if the range is empty.
  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl From<(u32, u32)> for TextRange {
  fn from((start, end): (u32, u32)) -> Self {
    Self { start, end }
  }
}

/// Which side of the simulation produced an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum AnnouncementSource {
  /// A navigation command moved or queried the cursor.
  Navigation,
  /// A watched live region reacted to a change notification.
  LiveRegion,
}

/// A single resolved utterance.
///
/// Immutable once emitted. `sequence` is assigned when the announcement is
/// enqueued and is monotonic per session, so tests can assert total order
/// even when assertive events are delivered ahead of earlier polite ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Announcement {
  pub text: String,
  pub source: AnnouncementSource,
  pub politeness: Politeness,
  pub sequence: u64,
}

/// Kind of change described by a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ChangeKind {
  /// Nodes were inserted under the subtree root.
  Addition,
  /// Nodes were removed from under the subtree root.
  Removal,
  /// Text content changed within the subtree.
  Text,
  /// An attribute changed on a node within the subtree.
  Attribute,
}

/// A host-delivered mutation notification.
///
/// The host observes the real document however it likes (mutation observers,
/// diffing, batching) and reports changes in this shape. Ids that no longer
/// resolve against the current tree are skipped, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeNotification {
  /// Root of the affected subtree.
  pub subtree_root: NodeId,
  /// What changed.
  pub kind: ChangeKind,
  /// The specific nodes affected, in document order if the host knows it.
  pub affected: Vec<NodeId>,
}

/// Events emitted on the unified stream.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Event {
  /// An announcement was delivered to the single-consumer channel.
  #[serde(rename = "announcement")]
  Announcement(Announcement),

  /// `activate` was issued on a node; the host performs the actual action.
  #[serde(rename = "activation:requested")]
  ActivationRequested { node_id: NodeId },

  /// A new tree snapshot was swapped in.
  #[serde(rename = "tree:rebuilt")]
  TreeRebuilt {
    /// Number of nodes in the new flattened sequence.
    nodes: usize,
    /// Whether the cursor still points at the same node id as before.
    cursor_retained: bool,
  },
}
