/*!
States, properties, and relationships of accessible nodes.

States are transient announced flags (checked, disabled, expanded...).
Properties are stable descriptive values (level, value bounds, popup kind).
Relationships are resolved node-id references, never flattened text.
*/

#![allow(missing_docs)]

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tri-state value for checked/pressed (true, false, or mixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TriState {
  True,
  False,
  Mixed,
}

impl TriState {
  /// Parse a `true`/`false`/`mixed` attribute value.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "true" => Some(Self::True),
      "false" => Some(Self::False),
      "mixed" => Some(Self::Mixed),
      _ => None,
    }
  }
}

/// Invalid-entry subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum InvalidKind {
  True,
  Grammar,
  Spelling,
}

impl InvalidKind {
  /// Parse an `aria-invalid` value. `"false"` and junk both mean not invalid.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "true" => Some(Self::True),
      "grammar" => Some(Self::Grammar),
      "spelling" => Some(Self::Spelling),
      _ => None,
    }
  }
}

/// Current-item subtype (`aria-current`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CurrentKind {
  True,
  Page,
  Step,
  Location,
  Date,
  Time,
}

impl CurrentKind {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "true" => Some(Self::True),
      "page" => Some(Self::Page),
      "step" => Some(Self::Step),
      "location" => Some(Self::Location),
      "date" => Some(Self::Date),
      "time" => Some(Self::Time),
      _ => None,
    }
  }

  /// The spoken phrase for this subtype.
  pub const fn phrase(&self) -> &'static str {
    match self {
      Self::True => "current item",
      Self::Page => "current page",
      Self::Step => "current step",
      Self::Location => "current location",
      Self::Date => "current date",
      Self::Time => "current time",
    }
  }
}

/// Kind of popup a widget opens (`aria-haspopup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum HasPopup {
  True,
  Menu,
  ListBox,
  Tree,
  Grid,
  Dialog,
}

impl HasPopup {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "true" => Some(Self::True),
      "menu" => Some(Self::Menu),
      "listbox" => Some(Self::ListBox),
      "tree" => Some(Self::Tree),
      "grid" => Some(Self::Grid),
      "dialog" => Some(Self::Dialog),
      _ => None,
    }
  }

  pub const fn phrase(&self) -> &'static str {
    match self {
      Self::True | Self::Menu => "has popup menu",
      Self::ListBox => "has popup list",
      Self::Tree => "has popup tree",
      Self::Grid => "has popup grid",
      Self::Dialog => "has popup dialog",
    }
  }
}

/// Widget orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Orientation {
  Horizontal,
  Vertical,
}

impl Orientation {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "horizontal" => Some(Self::Horizontal),
      "vertical" => Some(Self::Vertical),
      _ => None,
    }
  }
}

/// Autocomplete behavior of a text input (`aria-autocomplete`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Autocomplete {
  Inline,
  List,
  Both,
}

impl Autocomplete {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "inline" => Some(Self::Inline),
      "list" => Some(Self::List),
      "both" => Some(Self::Both),
      _ => None,
    }
  }
}

/// Announced state flags of a node.
///
/// `None` means the state does not apply to the node at all, which is
/// different from an explicit false (a checkbox without `checked` is still
/// announced "not checked"; a link has no checked state to announce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[allow(clippy::struct_excessive_bools)] // Mirrors the attribute surface
pub struct States {
  pub checked: Option<TriState>,
  pub pressed: Option<TriState>,
  pub selected: Option<bool>,
  pub expanded: Option<bool>,
  pub disabled: bool,
  pub required: bool,
  pub readonly: bool,
  pub busy: bool,
  pub grabbed: Option<bool>,
  pub invalid: Option<InvalidKind>,
  pub current: Option<CurrentKind>,
  /// Host-computed visited state for links.
  pub visited: bool,
}

/// Descriptive properties of a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Properties {
  pub level: Option<u32>,
  pub pos_in_set: Option<u32>,
  pub set_size: Option<u32>,
  pub value_min: Option<f64>,
  pub value_max: Option<f64>,
  pub value_now: Option<f64>,
  pub value_text: Option<String>,
  pub orientation: Option<Orientation>,
  pub multiselectable: bool,
  pub multiline: bool,
  pub autocomplete: Option<Autocomplete>,
  pub has_popup: Option<HasPopup>,
  pub modal: bool,
}

/// Resolved relationship references.
///
/// Lists hold node ids in attribute order; unresolvable ids were dropped at
/// build time. References may point at hidden nodes, which stay reachable
/// here even though they are absent from the flattened sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Relationships {
  pub labelled_by: Vec<NodeId>,
  pub described_by: Vec<NodeId>,
  pub controls: Vec<NodeId>,
  pub owns: Vec<NodeId>,
  pub error_message: Vec<NodeId>,
  /// Explicit table header references (`headers` attribute).
  pub headers: Vec<NodeId>,
  pub active_descendant: Option<NodeId>,
}

impl Relationships {
  /// Whether no relationship is set at all.
  pub fn is_empty(&self) -> bool {
    self.labelled_by.is_empty()
      && self.described_by.is_empty()
      && self.controls.is_empty()
      && self.owns.is_empty()
      && self.error_message.is_empty()
      && self.headers.is_empty()
      && self.active_descendant.is_none()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tri_state_parses_mixed() {
    assert_eq!(TriState::parse("mixed"), Some(TriState::Mixed));
    assert_eq!(TriState::parse("TRUE"), None);
  }

  #[test]
  fn invalid_false_is_absent() {
    assert_eq!(InvalidKind::parse("false"), None);
    assert_eq!(InvalidKind::parse("grammar"), Some(InvalidKind::Grammar));
  }

  #[test]
  fn current_phrases() {
    assert_eq!(CurrentKind::Page.phrase(), "current page");
    assert_eq!(CurrentKind::True.phrase(), "current item");
  }

  #[test]
  fn empty_relationships() {
    assert!(Relationships::default().is_empty());
    let rels = Relationships {
      labelled_by: vec![NodeId(3)],
      ..Relationships::default()
    };
    assert!(!rels.is_empty());
  }
}
