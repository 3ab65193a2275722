/*!
Navigation state machine and cursor movement over the flattened sequence.

The cursor is an index into the sequence, or none before the first move and
for empty documents. Movement never wraps. Typed navigation scans outward
from the cursor for the next node matching a filter.
*/

mod announce;
mod context;

pub(crate) use announce::{move_announcements, where_am_i_announcements};

use crate::a11y::Role;
use crate::tree::AccessibilityTree;
use crate::types::{AxsimError, AxsimResult, NodeId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Navigation posture: how input is interpreted by the host.
///
/// Browse mode reads the document one unit at a time; focus mode passes
/// input through to the focused widget. Switching is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Mode {
  /// Document reading: input drives the virtual cursor.
  #[default]
  Browse,
  /// Widget interaction: input passes through to the focused widget.
  Focus,
}

impl Mode {
  /// The other mode.
  pub const fn toggled(self) -> Self {
    match self {
      Self::Browse => Self::Focus,
      Self::Focus => Self::Browse,
    }
  }

  /// Spoken label for a mode switch.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Browse => "browse mode",
      Self::Focus => "focus mode",
    }
  }
}

/// Named node filter for typed navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
#[allow(missing_docs)]
pub enum TypeFilter {
  Heading,
  Link,
  Button,
  Landmark,
  FormControl,
  Table,
  List,
  Graphic,
  Region,
}

impl TypeFilter {
  /// Parse a filter name as hosts pass it. Unknown names are a caller
  /// contract violation and surface as an error.
  pub fn parse(s: &str) -> AxsimResult<Self> {
    match s.trim().to_lowercase().as_str() {
      "heading" => Ok(Self::Heading),
      "link" => Ok(Self::Link),
      "button" => Ok(Self::Button),
      "landmark" => Ok(Self::Landmark),
      "form-control" | "formcontrol" => Ok(Self::FormControl),
      "table" => Ok(Self::Table),
      "list" => Ok(Self::List),
      "graphic" => Ok(Self::Graphic),
      "region" => Ok(Self::Region),
      _ => Err(AxsimError::UnknownFilter(s.to_string())),
    }
  }

  /// Whether a node role matches this filter.
  pub const fn matches(self, role: Role) -> bool {
    match self {
      Self::Heading => matches!(role, Role::Heading),
      Self::Link => matches!(role, Role::Link),
      Self::Button => matches!(role, Role::Button),
      Self::Landmark => role.is_landmark(),
      Self::FormControl => role.is_form_control(),
      Self::Table => role.is_table_container(),
      Self::List => matches!(role, Role::List),
      Self::Graphic => matches!(role, Role::Image | Role::Figure),
      Self::Region => matches!(role, Role::Region),
    }
  }
}

/// Direction of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
  Forward,
  Backward,
}

/// Cursor and mode for one session. Replaced index-wise on every rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NavigationState {
  pub(crate) cursor: Option<usize>,
  pub(crate) mode: Mode,
}

impl NavigationState {
  pub(crate) const fn new(mode: Mode) -> Self {
    Self { cursor: None, mode }
  }
}

/// One step in a direction. Returns the new index, or `None` when the move
/// is a no-op (at either end, or an empty sequence).
pub(crate) fn step(len: usize, cursor: Option<usize>, direction: Direction) -> Option<usize> {
  if len == 0 {
    return None;
  }
  match direction {
    Direction::Forward => match cursor {
      None => Some(0),
      Some(index) if index + 1 < len => Some(index + 1),
      Some(_) => None,
    },
    Direction::Backward => match cursor {
      // Before the first move there is nothing behind the cursor.
      None => None,
      Some(index) if index > 0 => Some(index - 1),
      Some(_) => None,
    },
  }
}

/// Scan outward from the cursor for the next node matching a filter.
/// Returns the matching index, or `None` when nothing matches.
pub(crate) fn scan(
  tree: &AccessibilityTree,
  cursor: Option<usize>,
  direction: Direction,
  filter: TypeFilter,
) -> Option<usize> {
  let sequence = tree.sequence();
  let matches = |&(_, &id): &(usize, &NodeId)| {
    tree.get(id).is_some_and(|node| filter.matches(node.role))
  };
  match direction {
    Direction::Forward => {
      let start = cursor.map_or(0, |index| index + 1);
      sequence
        .iter()
        .enumerate()
        .skip(start)
        .find(matches)
        .map(|(index, _)| index)
    }
    Direction::Backward => {
      let end = cursor.unwrap_or(0);
      sequence
        .iter()
        .enumerate()
        .take(end)
        .rev()
        .find(matches)
        .map(|(index, _)| index)
    }
  }
}
