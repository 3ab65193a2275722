/*!
Announcement composition: per-role templates plus positional context.

Template shape is fixed: role label, name, state phrases in per-role order,
position info, relationship info. Identical trees and cursors always compose
identical text, which is what makes replay deterministic.
*/

use super::context::{self, table_position, LandmarkTransition, SetPosition};
use crate::a11y::{Role, TriState};
use crate::tree::{AccessibilityNode, AccessibilityTree};
use crate::types::NodeId;

/// Announcements for one cursor move: landmark boundary first, node second.
pub(crate) fn move_announcements(
  tree: &AccessibilityTree,
  prev: Option<NodeId>,
  next: NodeId,
) -> Vec<String> {
  let mut texts = Vec::new();
  let LandmarkTransition { entering, exiting } = context::landmark_transition(tree, prev, next);
  if let Some(landmark) = exiting {
    if let Some(node) = tree.get(landmark) {
      texts.push(format!("exiting {} landmark", node.role.label()));
    }
  }
  if let Some(landmark) = entering {
    if let Some(node) = tree.get(landmark) {
      if node.name.is_empty() {
        texts.push(format!("entering {} landmark", node.role.label()));
      } else {
        texts.push(format!("entering {} landmark, {}", node.role.label(), node.name));
      }
    }
  }
  texts.push(describe(tree, next));
  texts
}

/// Announcements for a "where am I" query: landmark context always included,
/// then the full node description. The cursor does not move.
pub(crate) fn where_am_i_announcements(tree: &AccessibilityTree, id: NodeId) -> Vec<String> {
  let mut texts = Vec::new();
  if let Some(landmark) = context::nearest_landmark(tree, id) {
    if let Some(node) = tree.get(landmark) {
      if node.name.is_empty() {
        texts.push(format!("in {} landmark", node.role.label()));
      } else {
        texts.push(format!("in {} landmark, {}", node.role.label(), node.name));
      }
    }
  }
  texts.push(describe(tree, id));
  texts
}

/// Compose the full announcement for one node.
pub(crate) fn describe(tree: &AccessibilityTree, id: NodeId) -> String {
  let Some(node) = tree.get(id) else {
    return "blank".to_string();
  };

  let mut parts = template_parts(tree, node);

  if let Some(position) = table_position(tree, id) {
    parts.push(format!("row {} of {}", position.row, position.row_count));
    if let (Some(column), Some(count)) = (position.column, position.column_count) {
      parts.push(format!("column {column} of {count}"));
    }
    if let Some(header) = position.header {
      parts.push(header);
    }
  }

  if let Some(SetPosition { index, size }) = context::set_position(tree, id) {
    if node.role == Role::Tab {
      parts.push(format!("tab {index} of {size}"));
    } else {
      parts.push(format!("item {index} of {size}"));
    }
  }

  if !node.description.is_empty() {
    parts.push(node.description.clone());
  }
  if node.states.invalid.is_some() {
    for &message in &node.relationships.error_message {
      let text = tree.subtree_text(message);
      if !text.is_empty() {
        parts.push(text);
      }
    }
  }

  let parts: Vec<String> = parts.into_iter().filter(|part| !part.is_empty()).collect();
  if parts.is_empty() {
    return "blank".to_string();
  }
  parts.join(", ")
}

/// Role label, name, and state phrases in the fixed per-role order.
#[allow(clippy::too_many_lines)] // One arm per role, enumerated in full
fn template_parts(tree: &AccessibilityTree, node: &AccessibilityNode) -> Vec<String> {
  let role = node.role;
  let label = role.label().to_string();
  let name = node.name.clone();
  let states = &node.states;
  let mut parts: Vec<String> = Vec::new();

  match role {
    // Landmarks: role, name.
    Role::Banner
    | Role::Complementary
    | Role::ContentInfo
    | Role::Form
    | Role::Main
    | Role::Navigation
    | Role::Region
    | Role::Search => {
      parts.push(format!("{label} landmark"));
      parts.push(name);
    }

    Role::Button => {
      parts.push(label);
      parts.push(name);
      if let Some(pressed) = states.pressed {
        parts.push(tri_phrase(pressed, "pressed", "not pressed").to_string());
      }
      if let Some(popup) = node.properties.has_popup {
        parts.push(popup.phrase().to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::Link => {
      parts.push(label);
      parts.push(name);
      if let Some(current) = states.current {
        parts.push(current.phrase().to_string());
      }
      if states.visited {
        parts.push("visited".to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::Heading => {
      parts.push(format!("heading level {}", node.heading_level()));
      parts.push(name);
    }

    Role::Checkbox | Role::Radio | Role::Switch => {
      parts.push(label);
      parts.push(name);
      if let Some(checked) = states.checked {
        parts.push(checked_phrase(role, checked).to_string());
      }
      push_disabled(&mut parts, states.disabled);
      push_required(&mut parts, states.required);
      push_invalid(&mut parts, node);
    }

    Role::MenuItemCheckbox | Role::MenuItemRadio => {
      parts.push(label);
      parts.push(name);
      if let Some(checked) = states.checked {
        parts.push(checked_phrase(role, checked).to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::TextBox | Role::SearchBox => {
      parts.push(label);
      parts.push(name);
      if let Some(value) = &node.value {
        parts.push(value.clone());
      }
      push_required(&mut parts, states.required);
      push_invalid(&mut parts, node);
      if states.readonly {
        parts.push("read only".to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::ComboBox | Role::ListBox => {
      parts.push(label);
      parts.push(name);
      if let Some(value) = &node.value {
        parts.push(value.clone());
      }
      if let Some(expanded) = states.expanded {
        parts.push(expanded_phrase(expanded).to_string());
      }
      push_required(&mut parts, states.required);
      push_disabled(&mut parts, states.disabled);
    }

    Role::Option => {
      parts.push(label);
      parts.push(name);
      if let Some(selected) = states.selected {
        parts.push(selected_phrase(selected).to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::Slider | Role::SpinButton | Role::ProgressBar => {
      parts.push(label);
      parts.push(name);
      if let Some(value) = widget_value(node) {
        parts.push(value);
      }
      push_required(&mut parts, states.required);
      push_invalid(&mut parts, node);
      push_disabled(&mut parts, states.disabled);
    }

    Role::Tab => {
      parts.push(label);
      parts.push(name);
      if let Some(selected) = states.selected {
        parts.push(selected_phrase(selected).to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::MenuItem => {
      parts.push(label);
      parts.push(name);
      if let Some(popup) = node.properties.has_popup {
        parts.push(popup.phrase().to_string());
      }
      push_disabled(&mut parts, states.disabled);
    }

    Role::TreeItem => {
      parts.push(label);
      parts.push(name);
      if let Some(expanded) = states.expanded {
        parts.push(expanded_phrase(expanded).to_string());
      }
      if let Some(level) = node.properties.level {
        parts.push(format!("level {level}"));
      }
      if let Some(selected) = states.selected {
        parts.push(selected_phrase(selected).to_string());
      }
    }

    Role::List => {
      parts.push(label);
      parts.push(name);
      let items = tree
        .visible_children(node.id)
        .into_iter()
        .filter(|&child| tree.get(child).is_some_and(|n| n.role == Role::ListItem))
        .count();
      parts.push(format!("with {items} items"));
    }

    Role::Table | Role::Grid => {
      parts.push(label);
      parts.push(name);
      let (rows, columns) = context::table_dimensions(tree, node.id);
      parts.push(format!("with {rows} rows and {columns} columns"));
    }

    Role::Row | Role::Separator => {
      parts.push(label);
    }

    // Cells carry no role label; content plus table position speak.
    Role::Cell | Role::GridCell => {
      parts.push(name);
    }

    Role::Dialog | Role::AlertDialog => {
      parts.push(label);
      parts.push(name);
      if node.properties.modal {
        parts.push("modal".to_string());
      }
    }

    Role::ListItem
    | Role::ColumnHeader
    | Role::RowHeader
    | Role::Menu
    | Role::MenuBar
    | Role::TabList
    | Role::TabPanel
    | Role::Tree
    | Role::Toolbar
    | Role::Image
    | Role::Figure
    | Role::Group
    | Role::Note
    | Role::Article
    | Role::Document => {
      parts.push(label);
      parts.push(name);
    }

    // Live regions read their role and current content.
    Role::Alert | Role::Status | Role::Log | Role::Marquee | Role::Timer => {
      parts.push(label);
      if name.is_empty() {
        parts.push(tree.subtree_text(node.id));
      } else {
        parts.push(name);
      }
    }

    // Plain containers and text: announce content, nothing else.
    Role::Paragraph | Role::RowGroup | Role::Generic => {
      if name.is_empty() {
        parts.push(node.text.clone());
      } else {
        parts.push(name);
      }
    }
  }

  if states.busy {
    parts.push("busy".to_string());
  }

  parts
}

const fn tri_phrase(value: TriState, yes: &'static str, no: &'static str) -> &'static str {
  match value {
    TriState::True => yes,
    TriState::False => no,
    TriState::Mixed => "mixed",
  }
}

const fn checked_phrase(role: Role, value: TriState) -> &'static str {
  if matches!(role, Role::Switch) {
    tri_phrase(value, "on", "off")
  } else {
    tri_phrase(value, "checked", "not checked")
  }
}

const fn selected_phrase(selected: bool) -> &'static str {
  if selected {
    "selected"
  } else {
    "not selected"
  }
}

const fn expanded_phrase(expanded: bool) -> &'static str {
  if expanded {
    "expanded"
  } else {
    "collapsed"
  }
}

fn push_disabled(parts: &mut Vec<String>, disabled: bool) {
  if disabled {
    parts.push("unavailable".to_string());
  }
}

fn push_required(parts: &mut Vec<String>, required: bool) {
  if required {
    parts.push("required".to_string());
  }
}

fn push_invalid(parts: &mut Vec<String>, node: &AccessibilityNode) {
  if node.states.invalid.is_some() {
    parts.push("invalid entry".to_string());
  }
}

/// Display value for a value-bearing widget: valuetext, then valuenow, then
/// the raw value string.
fn widget_value(node: &AccessibilityNode) -> Option<String> {
  if let Some(text) = &node.properties.value_text {
    return Some(text.clone());
  }
  if let Some(now) = node.properties.value_now {
    return Some(format_number(now));
  }
  node.value.clone()
}

/// Format a numeric value without a trailing fraction when whole.
#[allow(clippy::cast_possible_truncation)] // Intentional: formatting display value
fn format_number(n: f64) -> String {
  if n.fract() == 0.0 {
    format!("{}", n as i64)
  } else {
    n.to_string()
  }
}
