/*!
Raw element tree - the input contract with the markup/style front-end.

The front-end parses markup, resolves styles, and hands over a tree of
elements with resolved attributes and a per-element rendered flag. This crate
never parses markup itself; the fluent builder here is how hosts (and tests)
assemble input trees.
*/

use crate::types::NodeId;
use std::collections::HashMap;

/// One child slot of a raw element: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
  /// A nested element.
  Element(RawElement),
  /// A text run. Whitespace is collapsed during tree construction.
  Text(String),
}

/// A raw markup element as delivered by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
  /// Host-assigned id, stable across snapshots. Must not be 0 (reserved for
  /// the synthetic root).
  pub id: NodeId,
  /// Lowercase tag name, the native-semantic hint ("nav", "button", "div").
  pub tag: String,
  /// Full attribute map, including `aria-*` and the document `id` attribute.
  pub attributes: HashMap<String, String>,
  /// Ordered children.
  pub children: Vec<RawNode>,
  /// Host-resolved rendered flag (display/visibility resolution).
  pub rendered: bool,
}

impl RawElement {
  /// Create a rendered element with no attributes or children.
  pub fn new(id: u32, tag: &str) -> Self {
    Self {
      id: NodeId(id),
      tag: tag.to_lowercase(),
      attributes: HashMap::new(),
      children: Vec::new(),
      rendered: true,
    }
  }

  /// Set an attribute.
  #[must_use]
  pub fn attr(mut self, name: &str, value: &str) -> Self {
    self.attributes.insert(name.to_string(), value.to_string());
    self
  }

  /// Append a child element.
  #[must_use]
  pub fn child(mut self, element: RawElement) -> Self {
    self.children.push(RawNode::Element(element));
    self
  }

  /// Append a text run.
  #[must_use]
  pub fn text(mut self, text: &str) -> Self {
    self.children.push(RawNode::Text(text.to_string()));
    self
  }

  /// Mark the element as not rendered (display:none / visibility:hidden).
  #[must_use]
  pub fn unrendered(mut self) -> Self {
    self.rendered = false;
    self
  }

  /// Look up an attribute value.
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).map(String::as_str)
  }

  /// Iterate child elements, skipping text runs.
  pub fn child_elements(&self) -> impl Iterator<Item = &RawElement> {
    self.children.iter().filter_map(|child| match child {
      RawNode::Element(element) => Some(element),
      RawNode::Text(_) => None,
    })
  }

  /// Concatenated direct text runs, whitespace-collapsed.
  pub fn own_text(&self) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for child in &self.children {
      if let RawNode::Text(text) = child {
        parts.push(text);
      }
    }
    let joined = parts.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_assembles_tree() {
    let tree = RawElement::new(1, "NAV")
      .attr("aria-label", "Main")
      .child(RawElement::new(2, "a").attr("href", "/").text("Home"))
      .text("tail");

    assert_eq!(tree.tag, "nav");
    assert_eq!(tree.attribute("aria-label"), Some("Main"));
    assert_eq!(tree.child_elements().count(), 1);
    assert_eq!(tree.own_text(), "tail");
  }

  #[test]
  fn own_text_collapses_whitespace() {
    let el = RawElement::new(1, "p").text("  hello \n ").text("world  ");
    assert_eq!(el.own_text(), "hello world");
  }

  #[test]
  fn unrendered_clears_flag() {
    assert!(!RawElement::new(1, "div").unrendered().rendered);
  }
}
