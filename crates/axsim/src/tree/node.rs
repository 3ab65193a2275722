/*! The accessible node type - what a screen reader perceives of one element. */

use crate::a11y::{LiveSettings, Properties, Relationships, Role, States};
use crate::types::NodeId;
use serde::Serialize;
use ts_rs::TS;

/// One node of the accessibility tree.
///
/// Nodes are flat: children are ids, not nested values. `parent` exists for
/// ancestry lookups (landmark and table context) only; ownership is always
/// downward through `children`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[allow(missing_docs)]
pub struct AccessibilityNode {
  pub id: NodeId,
  pub role: Role,
  /// Resolved accessible name. Empty when the node is announced unnamed.
  pub name: String,
  /// Resolved accessible description. Empty when absent.
  pub description: String,
  pub states: States,
  pub properties: Properties,
  pub relationships: Relationships,
  /// All children in document order, hidden ones included. Visible-only
  /// iteration goes through [`crate::tree::AccessibilityTree::visible_children`].
  pub children: Vec<NodeId>,
  pub parent: Option<NodeId>,
  /// Excluded from perception: own `aria-hidden="true"`, not rendered, or a
  /// hidden ancestor. Hidden nodes stay reachable through relationships.
  pub hidden: bool,
  /// The node's own visible text runs, whitespace-collapsed.
  pub text: String,
  /// Current value of a value-bearing widget (text box content, etc).
  pub value: Option<String>,
  /// Explicit live-region attributes; merged with role defaults per rebuild.
  pub live: LiveSettings,
}

impl AccessibilityNode {
  /// Create a bare node with the given id and role.
  pub fn new(id: NodeId, role: Role) -> Self {
    Self {
      id,
      role,
      name: String::new(),
      description: String::new(),
      states: States::default(),
      properties: Properties::default(),
      relationships: Relationships::default(),
      children: Vec::new(),
      parent: None,
      hidden: false,
      text: String::new(),
      value: None,
      live: LiveSettings::default(),
    }
  }

  /// Heading level, defaulting to 2 when a heading carries none.
  pub fn heading_level(&self) -> u32 {
    self.properties.level.unwrap_or(2)
  }
}
