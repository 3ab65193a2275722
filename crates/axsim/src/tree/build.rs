/*!
Tree construction: raw elements in, accessible nodes out.

Build is two-phase. Phase one walks the raw tree and produces nodes with
resolved roles, visibility, states, properties, and relationship references.
Phase two computes accessible names and descriptions, which need the full
node map for cross-references. The finished tree is immutable.
*/

use super::name::{self, NameCtx, NameSources};
use super::node::AccessibilityNode;
use super::AccessibilityTree;
use crate::a11y::{
  Autocomplete, CurrentKind, HasPopup, InvalidKind, LiveSettings, Orientation, Politeness,
  RelevantChanges, Role, TriState,
};
use crate::raw::RawElement;
use crate::types::NodeId;
use std::collections::{HashMap, HashSet};

/// Build an accessibility tree from a raw element tree.
///
/// A synthetic root container is always present, even for single-element
/// input, so traversal never handles a parentless real node specially.
pub(crate) fn build_tree(raw: &RawElement) -> AccessibilityTree {
  let mut builder = Builder::default();

  let mut root = AccessibilityNode::new(NodeId::ROOT, Role::Document);
  let mut ancestor_tags: Vec<String> = Vec::new();
  if let Some(root_child) = builder.construct(raw, NodeId::ROOT, false, &mut ancestor_tags) {
    root.children.push(root_child);
  }
  builder.nodes.insert(NodeId::ROOT, root);

  builder.link_labels();
  builder.resolve_relationships();
  builder.compute_names();

  AccessibilityTree::from_nodes(builder.nodes, NodeId::ROOT)
}

#[derive(Default)]
struct Builder<'a> {
  /// Raw element lookup for phases after construction.
  raw: HashMap<NodeId, &'a RawElement>,
  /// Document `id` attribute -> node. First declaration wins.
  doc_ids: HashMap<String, NodeId>,
  /// All constructed element ids in document order, hidden included.
  doc_order: Vec<NodeId>,
  nodes: HashMap<NodeId, AccessibilityNode>,
  sources: HashMap<NodeId, NameSources>,
  /// Naming target -> label elements, document order.
  labels: HashMap<NodeId, Vec<NodeId>>,
}

impl<'a> Builder<'a> {
  /// Phase one: construct a node and its subtree, indexing raw elements and
  /// document ids on the way. Returns `None` for elements that must be
  /// skipped entirely (reserved or duplicate ids).
  fn construct(
    &mut self,
    raw: &'a RawElement,
    parent: NodeId,
    parent_hidden: bool,
    ancestor_tags: &mut Vec<String>,
  ) -> Option<NodeId> {
    if raw.id.is_root() {
      log::warn!("element uses reserved id 0; skipping its subtree");
      return None;
    }
    if self.raw.contains_key(&raw.id) {
      log::warn!("duplicate node id {}; skipping later occurrence", raw.id);
      return None;
    }
    self.raw.insert(raw.id, raw);
    if let Some(doc_id) = raw.attribute("id") {
      self.doc_ids.entry(doc_id.to_string()).or_insert(raw.id);
    }

    let hidden =
      parent_hidden || raw.attribute("aria-hidden") == Some("true") || !raw.rendered;
    let role = resolve_role(raw, ancestor_tags);

    let mut node = AccessibilityNode::new(raw.id, role);
    node.parent = Some(parent);
    node.hidden = hidden;
    node.text = raw.own_text();
    node.states = parse_states(raw, role);
    node.properties = parse_properties(raw);
    node.value = parse_value(raw, role);
    node.live = parse_live(raw);

    self.sources.insert(
      raw.id,
      NameSources {
        tag: raw.tag.clone(),
        aria_label: raw.attribute("aria-label").map(ToString::to_string),
        aria_description: raw.attribute("aria-description").map(ToString::to_string),
        title: raw.attribute("title").map(ToString::to_string),
        alt: raw.attribute("alt").map(ToString::to_string),
      },
    );
    self.doc_order.push(raw.id);

    ancestor_tags.push(raw.tag.clone());
    for child in raw.child_elements() {
      if let Some(child_id) = self.construct(child, raw.id, hidden, ancestor_tags) {
        node.children.push(child_id);
      }
    }
    ancestor_tags.pop();

    self.nodes.insert(raw.id, node);
    Some(raw.id)
  }

  /// Phase two: associate label elements with the controls they name, via
  /// `for` linkage or wrapping.
  fn link_labels(&mut self) {
    for &id in &self.doc_order {
      let Some(raw) = self.raw.get(&id) else {
        continue;
      };
      if raw.tag != "label" {
        continue;
      }
      let target = match raw.attribute("for") {
        Some(doc_id) => self.doc_ids.get(doc_id).copied(),
        None => first_form_control(&self.nodes, id),
      };
      let Some(target) = target else {
        log::debug!("label {id} names nothing; skipped");
        continue;
      };
      if target != id {
        self.labels.entry(target).or_default().push(id);
      }
    }
  }

  /// Phase three: resolve relationship attributes to node-id lists.
  /// Unresolvable tokens are dropped silently (recoverable per design).
  fn resolve_relationships(&mut self) {
    for &id in &self.doc_order {
      let Some(raw) = self.raw.get(&id).copied() else {
        continue;
      };
      let labelled_by = self.resolve_tokens(raw.attribute("aria-labelledby"));
      let described_by = self.resolve_tokens(raw.attribute("aria-describedby"));
      let controls = self.resolve_tokens(raw.attribute("aria-controls"));
      let owns = self.resolve_tokens(raw.attribute("aria-owns"));
      let error_message = self.resolve_tokens(raw.attribute("aria-errormessage"));
      let headers = self.resolve_tokens(raw.attribute("headers"));
      let active_descendant = raw
        .attribute("aria-activedescendant")
        .and_then(|token| self.doc_ids.get(token.trim()).copied());

      if let Some(node) = self.nodes.get_mut(&id) {
        node.relationships.labelled_by = labelled_by;
        node.relationships.described_by = described_by;
        node.relationships.controls = controls;
        node.relationships.owns = owns;
        node.relationships.error_message = error_message;
        node.relationships.headers = headers;
        node.relationships.active_descendant = active_descendant;
      }
    }
  }

  fn resolve_tokens(&self, value: Option<&str>) -> Vec<NodeId> {
    let Some(value) = value else {
      return Vec::new();
    };
    value
      .split_whitespace()
      .filter_map(|token| {
        let resolved = self.doc_ids.get(token).copied();
        if resolved.is_none() {
          log::debug!("unresolved reference {token:?}; dropped");
        }
        resolved
      })
      .collect()
  }

  /// Phase four: names and descriptions, document order.
  fn compute_names(&mut self) {
    let ctx = NameCtx {
      nodes: &self.nodes,
      sources: &self.sources,
      labels: &self.labels,
    };
    let mut computed: Vec<(NodeId, String, String)> = Vec::with_capacity(self.doc_order.len());
    for &id in &self.doc_order {
      let mut visited = HashSet::new();
      let named = name::compute_name(&ctx, id, &mut visited, false);
      let description = name::compute_description(&ctx, id, named.from_title);
      computed.push((id, named.name, description));
    }
    for (id, node_name, description) in computed {
      if let Some(node) = self.nodes.get_mut(&id) {
        node.name = node_name;
        node.description = description;
      }
    }
  }
}

/// First form control in a label's subtree, document order (wrapping label).
fn first_form_control(
  nodes: &HashMap<NodeId, AccessibilityNode>,
  label: NodeId,
) -> Option<NodeId> {
  let start = nodes.get(&label)?;
  let mut stack: Vec<NodeId> = start.children.iter().rev().copied().collect();
  while let Some(id) = stack.pop() {
    let Some(node) = nodes.get(&id) else {
      continue;
    };
    if node.role.is_form_control() {
      return Some(id);
    }
    for &child in node.children.iter().rev() {
      stack.push(child);
    }
  }
  None
}

/// Resolve a node's role: a valid explicit role attribute wins, anything
/// else falls back to the implicit role for the tag. An unparseable explicit
/// role is recoverable, never an error.
fn resolve_role(raw: &RawElement, ancestor_tags: &[String]) -> Role {
  if let Some(explicit) = raw.attribute("role") {
    if let Some(role) = Role::parse(explicit) {
      return role;
    }
    log::debug!(
      "invalid explicit role {explicit:?} on {}; using implicit role",
      raw.id
    );
  }
  implicit_role(raw, ancestor_tags)
}

/// Whether an ancestor is sectioning content, which demotes header/footer
/// from banner/contentinfo to plain containers.
fn in_sectioning_content(ancestor_tags: &[String]) -> bool {
  ancestor_tags
    .iter()
    .any(|tag| matches!(tag.as_str(), "article" | "aside" | "nav" | "section"))
}

/// Whether naming attributes make a region/form name resolvable. Checked on
/// attributes because roles resolve before the naming pass runs.
fn has_naming_attribute(raw: &RawElement) -> bool {
  let non_empty = |name: &str| {
    raw
      .attribute(name)
      .is_some_and(|value| !value.trim().is_empty())
  };
  non_empty("aria-label") || non_empty("aria-labelledby") || non_empty("title")
}

fn implicit_role(raw: &RawElement, ancestor_tags: &[String]) -> Role {
  match raw.tag.as_str() {
    "header" => {
      if in_sectioning_content(ancestor_tags) {
        Role::Generic
      } else {
        Role::Banner
      }
    }
    "footer" => {
      if in_sectioning_content(ancestor_tags) {
        Role::Generic
      } else {
        Role::ContentInfo
      }
    }
    "nav" => Role::Navigation,
    "main" => Role::Main,
    "aside" => Role::Complementary,
    "search" => Role::Search,
    "section" => {
      if has_naming_attribute(raw) {
        Role::Region
      } else {
        Role::Generic
      }
    }
    "form" => {
      if has_naming_attribute(raw) {
        Role::Form
      } else {
        Role::Generic
      }
    }
    "a" => {
      if raw.attribute("href").is_some() {
        Role::Link
      } else {
        Role::Generic
      }
    }
    "button" | "summary" => Role::Button,
    "input" => input_role(raw),
    "select" => {
      let multiple = raw.attribute("multiple").is_some();
      let sized = raw
        .attribute("size")
        .and_then(|size| size.parse::<u32>().ok())
        .is_some_and(|size| size > 1);
      if multiple || sized {
        Role::ListBox
      } else {
        Role::ComboBox
      }
    }
    "textarea" => Role::TextBox,
    "option" => Role::Option,
    "optgroup" | "fieldset" | "details" => Role::Group,
    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Role::Heading,
    "ul" | "ol" | "menu" | "dl" => Role::List,
    "li" => Role::ListItem,
    "table" => Role::Table,
    "thead" | "tbody" | "tfoot" => Role::RowGroup,
    "tr" => Role::Row,
    "td" => Role::Cell,
    "th" => {
      if raw.attribute("scope") == Some("row") {
        Role::RowHeader
      } else {
        Role::ColumnHeader
      }
    }
    "img" => Role::Image,
    "figure" => Role::Figure,
    "article" => Role::Article,
    "p" => Role::Paragraph,
    "hr" => Role::Separator,
    "dialog" => Role::Dialog,
    "output" => Role::Status,
    "progress" | "meter" => Role::ProgressBar,
    _ => Role::Generic,
  }
}

fn input_role(raw: &RawElement) -> Role {
  match raw.attribute("type").unwrap_or("text") {
    "checkbox" => Role::Checkbox,
    "radio" => Role::Radio,
    "range" => Role::Slider,
    "number" => Role::SpinButton,
    "search" => Role::SearchBox,
    "button" | "submit" | "reset" | "image" => Role::Button,
    "hidden" => Role::Generic,
    _ => Role::TextBox,
  }
}

fn parse_states(raw: &RawElement, role: Role) -> crate::a11y::States {
  let flag = |name: &str| raw.attribute(name) == Some("true");
  let bool_attr =
    |name: &str| raw.attribute(name).and_then(|value| value.parse::<bool>().ok());

  let mut checked = raw.attribute("aria-checked").and_then(TriState::parse);
  if checked.is_none() && role.is_checkable() {
    // Native checked attribute, else checkables announce "not checked".
    checked = Some(if raw.attribute("checked").is_some() {
      TriState::True
    } else {
      TriState::False
    });
  }

  let mut selected =
    bool_attr("aria-selected").or_else(|| raw.attribute("selected").map(|_| true));
  if selected.is_none() && matches!(role, Role::Tab | Role::Option) {
    selected = Some(false);
  }

  let expanded = bool_attr("aria-expanded")
    .or_else(|| (raw.tag == "details").then(|| raw.attribute("open").is_some()));

  crate::a11y::States {
    checked,
    pressed: raw.attribute("aria-pressed").and_then(TriState::parse),
    selected,
    expanded,
    disabled: flag("aria-disabled") || raw.attribute("disabled").is_some(),
    required: flag("aria-required") || raw.attribute("required").is_some(),
    readonly: flag("aria-readonly") || raw.attribute("readonly").is_some(),
    busy: flag("aria-busy"),
    grabbed: bool_attr("aria-grabbed"),
    invalid: raw.attribute("aria-invalid").and_then(InvalidKind::parse),
    current: raw.attribute("aria-current").and_then(CurrentKind::parse),
    // Visited is style state, not markup; the front-end resolves it.
    visited: flag("visited"),
  }
}

fn parse_properties(raw: &RawElement) -> crate::a11y::Properties {
  crate::a11y::Properties {
    level: parse_u32(raw, "aria-level").or_else(|| heading_tag_level(&raw.tag)),
    pos_in_set: parse_u32(raw, "aria-posinset"),
    set_size: parse_u32(raw, "aria-setsize"),
    value_min: parse_f64(raw, "aria-valuemin").or_else(|| native_f64(raw, "min")),
    value_max: parse_f64(raw, "aria-valuemax").or_else(|| native_f64(raw, "max")),
    value_now: parse_f64(raw, "aria-valuenow").or_else(|| match raw.tag.as_str() {
      "progress" | "meter" => native_f64(raw, "value"),
      _ => None,
    }),
    value_text: raw.attribute("aria-valuetext").map(ToString::to_string),
    orientation: raw.attribute("aria-orientation").and_then(Orientation::parse),
    multiselectable: raw.attribute("aria-multiselectable") == Some("true")
      || (raw.tag == "select" && raw.attribute("multiple").is_some()),
    multiline: raw.attribute("aria-multiline") == Some("true") || raw.tag == "textarea",
    autocomplete: raw
      .attribute("aria-autocomplete")
      .and_then(Autocomplete::parse),
    has_popup: raw.attribute("aria-haspopup").and_then(HasPopup::parse),
    modal: raw.attribute("aria-modal") == Some("true"),
  }
}

fn parse_value(raw: &RawElement, role: Role) -> Option<String> {
  match raw.tag.as_str() {
    "input" if !role.is_checkable() && role != Role::Button => {
      raw.attribute("value").map(ToString::to_string)
    }
    "textarea" => {
      let text = raw.own_text();
      (!text.is_empty()).then_some(text)
    }
    _ => raw
      .attribute("aria-valuetext")
      .map(ToString::to_string),
  }
}

fn parse_live(raw: &RawElement) -> LiveSettings {
  LiveSettings {
    politeness: raw.attribute("aria-live").and_then(Politeness::parse),
    atomic: raw
      .attribute("aria-atomic")
      .and_then(|value| value.parse::<bool>().ok()),
    relevant: raw.attribute("aria-relevant").map(RelevantChanges::parse),
  }
}

fn heading_tag_level(tag: &str) -> Option<u32> {
  match tag {
    "h1" => Some(1),
    "h2" => Some(2),
    "h3" => Some(3),
    "h4" => Some(4),
    "h5" => Some(5),
    "h6" => Some(6),
    _ => None,
  }
}

/// Malformed numeric values are recoverable: logged and ignored.
fn parse_u32(raw: &RawElement, name: &str) -> Option<u32> {
  let value = raw.attribute(name)?;
  match value.trim().parse::<u32>() {
    Ok(parsed) if parsed > 0 => Some(parsed),
    Ok(_) | Err(_) => {
      log::debug!("malformed {name}={value:?} on {}; ignored", raw.id);
      None
    }
  }
}

fn parse_f64(raw: &RawElement, name: &str) -> Option<f64> {
  let value = raw.attribute(name)?;
  match value.trim().parse::<f64>() {
    Ok(parsed) => Some(parsed),
    Err(_) => {
      log::debug!("malformed {name}={value:?} on {}; ignored", raw.id);
      None
    }
  }
}

fn native_f64(raw: &RawElement, name: &str) -> Option<f64> {
  raw
    .attribute(name)
    .and_then(|value| value.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawElement;

  fn build(raw: RawElement) -> AccessibilityTree {
    build_tree(&raw)
  }

  #[test]
  fn synthetic_root_wraps_single_element() {
    let tree = build(RawElement::new(1, "button").text("Go"));
    assert_eq!(tree.root_id(), NodeId::ROOT);
    assert_eq!(tree.visible_children(NodeId::ROOT), vec![NodeId(1)]);
    assert_eq!(tree.sequence(), &[NodeId(1)]);
  }

  #[test]
  fn aria_hidden_hides_whole_subtree() {
    let raw = RawElement::new(1, "div")
      .child(
        RawElement::new(2, "div")
          .attr("aria-hidden", "true")
          .child(RawElement::new(3, "button").text("Ghost")),
      )
      .child(RawElement::new(4, "button").text("Real"));
    let tree = build(raw);
    assert_eq!(tree.sequence(), &[NodeId(1), NodeId(4)]);
    assert!(tree.get(NodeId(3)).is_some_and(|node| node.hidden));
  }

  #[test]
  fn unrendered_element_is_hidden() {
    let raw = RawElement::new(1, "div").child(RawElement::new(2, "p").unrendered().text("x"));
    let tree = build(raw);
    assert_eq!(tree.sequence(), &[NodeId(1)]);
  }

  #[test]
  fn explicit_role_wins_when_valid() {
    let tree = build(RawElement::new(1, "div").attr("role", "button").text("Go"));
    assert_eq!(tree.get(NodeId(1)).map(|n| n.role), Some(Role::Button));
  }

  #[test]
  fn invalid_explicit_role_falls_back_to_implicit() {
    let tree = build(RawElement::new(1, "nav").attr("role", "spaceship"));
    assert_eq!(tree.get(NodeId(1)).map(|n| n.role), Some(Role::Navigation));
  }

  #[test]
  fn header_inside_section_loses_banner() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "header"))
      .child(
        RawElement::new(3, "section")
          .attr("aria-label", "Intro")
          .child(RawElement::new(4, "header")),
      );
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(2)).map(|n| n.role), Some(Role::Banner));
    assert_eq!(tree.get(NodeId(4)).map(|n| n.role), Some(Role::Generic));
    assert_eq!(tree.get(NodeId(3)).map(|n| n.role), Some(Role::Region));
  }

  #[test]
  fn section_without_name_is_generic() {
    let tree = build(RawElement::new(1, "section"));
    assert_eq!(tree.get(NodeId(1)).map(|n| n.role), Some(Role::Generic));
  }

  #[test]
  fn labelledby_beats_direct_label() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "span").attr("id", "a").text("Billing"))
      .child(RawElement::new(3, "span").attr("id", "b").text("Address"))
      .child(
        RawElement::new(4, "input")
          .attr("aria-labelledby", "a b")
          .attr("aria-label", "ignored"),
      );
    let tree = build(raw);
    assert_eq!(
      tree.get(NodeId(4)).map(|n| n.name.as_str()),
      Some("Billing Address")
    );
  }

  #[test]
  fn labelledby_cycle_resolves_empty() {
    let raw = RawElement::new(1, "div")
      .child(
        RawElement::new(2, "div")
          .attr("id", "a")
          .attr("aria-labelledby", "b"),
      )
      .child(
        RawElement::new(3, "div")
          .attr("id", "b")
          .attr("aria-labelledby", "a"),
      );
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(2)).map(|n| n.name.as_str()), Some(""));
    assert_eq!(tree.get(NodeId(3)).map(|n| n.name.as_str()), Some(""));
  }

  #[test]
  fn unresolved_labelledby_ids_are_skipped() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "span").attr("id", "real").text("Real"))
      .child(
        RawElement::new(3, "input").attr("aria-labelledby", "ghost real phantom"),
      );
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(3)).map(|n| n.name.as_str()), Some("Real"));
  }

  #[test]
  fn label_for_names_control() {
    let raw = RawElement::new(1, "form")
      .attr("aria-label", "Signup")
      .child(RawElement::new(2, "label").attr("for", "email").text("Email address"))
      .child(RawElement::new(3, "input").attr("id", "email"));
    let tree = build(raw);
    assert_eq!(
      tree.get(NodeId(3)).map(|n| n.name.as_str()),
      Some("Email address")
    );
  }

  #[test]
  fn wrapping_label_names_control() {
    let raw = RawElement::new(1, "label")
      .text("Subscribe")
      .child(RawElement::new(2, "input").attr("type", "checkbox"));
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(2)).map(|n| n.name.as_str()), Some("Subscribe"));
    assert_eq!(tree.get(NodeId(2)).map(|n| n.role), Some(Role::Checkbox));
  }

  #[test]
  fn button_names_from_visible_content_only() {
    let raw = RawElement::new(1, "button")
      .text("Save")
      .child(RawElement::new(2, "span").attr("aria-hidden", "true").text("(hidden)"));
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(1)).map(|n| n.name.as_str()), Some("Save"));
  }

  #[test]
  fn image_names_from_alt() {
    let tree = build(RawElement::new(1, "img").attr("alt", "A red fox"));
    assert_eq!(tree.get(NodeId(1)).map(|n| n.name.as_str()), Some("A red fox"));
    assert_eq!(tree.get(NodeId(1)).map(|n| n.role), Some(Role::Image));
  }

  #[test]
  fn table_names_from_caption() {
    let raw = RawElement::new(1, "table")
      .child(RawElement::new(2, "caption").text("Quarterly results"))
      .child(RawElement::new(3, "tr").child(RawElement::new(4, "td").text("x")));
    let tree = build(raw);
    assert_eq!(
      tree.get(NodeId(1)).map(|n| n.name.as_str()),
      Some("Quarterly results")
    );
  }

  #[test]
  fn title_is_last_resort_name_and_not_reused_as_description() {
    let tree = build(RawElement::new(1, "input").attr("title", "Fallback"));
    let node = tree.get(NodeId(1)).cloned().unwrap();
    assert_eq!(node.name, "Fallback");
    assert_eq!(node.description, "");
  }

  #[test]
  fn describedby_fills_description() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "p").attr("id", "hint").text("Must be unique"))
      .child(
        RawElement::new(3, "input")
          .attr("aria-label", "Username")
          .attr("aria-describedby", "hint"),
      );
    let tree = build(raw);
    let node = tree.get(NodeId(3)).cloned().unwrap();
    assert_eq!(node.name, "Username");
    assert_eq!(node.description, "Must be unique");
  }

  #[test]
  fn heading_levels_from_tag_and_attribute() {
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "h3").text("Section"))
      .child(
        RawElement::new(3, "div")
          .attr("role", "heading")
          .attr("aria-level", "4")
          .text("Deep"),
      );
    let tree = build(raw);
    assert_eq!(tree.get(NodeId(2)).and_then(|n| n.properties.level), Some(3));
    assert_eq!(tree.get(NodeId(3)).and_then(|n| n.properties.level), Some(4));
  }

  #[test]
  fn malformed_level_is_ignored() {
    let tree = build(
      RawElement::new(1, "div")
        .attr("role", "heading")
        .attr("aria-level", "banana"),
    );
    assert_eq!(tree.get(NodeId(1)).and_then(|n| n.properties.level), None);
  }

  #[test]
  fn native_input_states() {
    let raw = RawElement::new(1, "form")
      .attr("aria-label", "f")
      .child(
        RawElement::new(2, "input")
          .attr("type", "checkbox")
          .attr("checked", "")
          .attr("required", ""),
      )
      .child(RawElement::new(3, "input").attr("type", "checkbox"));
    let tree = build(raw);
    let checked = tree.get(NodeId(2)).cloned().unwrap();
    assert_eq!(checked.states.checked, Some(TriState::True));
    assert!(checked.states.required);
    let unchecked = tree.get(NodeId(3)).cloned().unwrap();
    assert_eq!(unchecked.states.checked, Some(TriState::False));
  }

  #[test]
  fn textbox_value_from_attribute() {
    let tree = build(RawElement::new(1, "input").attr("value", "hello"));
    assert_eq!(
      tree.get(NodeId(1)).and_then(|n| n.value.as_deref()),
      Some("hello")
    );
  }

  #[test]
  fn live_attributes_are_captured() {
    let raw = RawElement::new(1, "div")
      .attr("aria-live", "assertive")
      .attr("aria-atomic", "true")
      .attr("aria-relevant", "additions removals");
    let tree = build(raw);
    let live = tree.get(NodeId(1)).map(|n| n.live).unwrap();
    assert_eq!(live.politeness, Some(Politeness::Assertive));
    assert_eq!(live.atomic, Some(true));
    assert!(live.relevant.is_some_and(|relevant| relevant.removals));
  }

  #[test]
  fn hidden_node_can_still_label() {
    let raw = RawElement::new(1, "div")
      .child(
        RawElement::new(2, "span")
          .attr("id", "src")
          .attr("aria-hidden", "true")
          .text("From hidden"),
      )
      .child(RawElement::new(3, "input").attr("aria-labelledby", "src"));
    let tree = build(raw);
    // The reference resolves, but the hidden target contributes no content,
    // so labelling falls back to its aria-label/none.
    assert_eq!(
      tree.get(NodeId(3)).map(|n| n.relationships.labelled_by.clone()),
      Some(vec![NodeId(2)])
    );
  }
}
