/*!
Live-region semantics: politeness, relevance filters, and watches.

A watch exists for every node that is a live region, either through explicit
`aria-live`-family attributes or through an implicit live-region role.
Watches are recomputed from the tree on every rebuild.
*/

#![allow(missing_docs)]

use super::Role;
use crate::types::ChangeKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Whether a live-region announcement interrupts or queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Politeness {
  /// Changes are not announced.
  #[default]
  Off,
  /// Queued behind pending announcements.
  Polite,
  /// Spliced ahead of all pending polite announcements.
  Assertive,
}

impl Politeness {
  /// Parse an `aria-live` attribute value.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "off" => Some(Self::Off),
      "polite" => Some(Self::Polite),
      "assertive" => Some(Self::Assertive),
      _ => None,
    }
  }
}

/// Which change kinds a live region announces (`aria-relevant`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[allow(clippy::struct_excessive_bools)] // One flag per attribute token
pub struct RelevantChanges {
  pub additions: bool,
  pub removals: bool,
  pub text: bool,
  pub attributes: bool,
}

impl Default for RelevantChanges {
  /// The attribute default is `additions text`.
  fn default() -> Self {
    Self {
      additions: true,
      removals: false,
      text: true,
      attributes: false,
    }
  }
}

impl RelevantChanges {
  /// Parse an `aria-relevant` token list. Unknown tokens are ignored; an
  /// all-unknown value falls back to the default.
  pub fn parse(s: &str) -> Self {
    let mut relevant = Self {
      additions: false,
      removals: false,
      text: false,
      attributes: false,
    };
    let mut any = false;
    for token in s.split_whitespace() {
      any = true;
      match token {
        "additions" => relevant.additions = true,
        "removals" => relevant.removals = true,
        "text" => relevant.text = true,
        "attributes" => relevant.attributes = true,
        "all" => {
          relevant.additions = true;
          relevant.removals = true;
          relevant.text = true;
          relevant.attributes = true;
        }
        _ => {}
      }
    }
    if !any || relevant == (Self { additions: false, removals: false, text: false, attributes: false }) {
      return Self::default();
    }
    relevant
  }

  /// Whether a change of the given kind passes this filter.
  pub const fn includes(&self, kind: ChangeKind) -> bool {
    match kind {
      ChangeKind::Addition => self.additions,
      ChangeKind::Removal => self.removals,
      ChangeKind::Text => self.text,
      ChangeKind::Attribute => self.attributes,
    }
  }
}

/// Explicit live-region attributes found on a node, before role defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiveSettings {
  pub politeness: Option<Politeness>,
  pub atomic: Option<bool>,
  pub relevant: Option<RelevantChanges>,
}

impl LiveSettings {
  /// Whether any explicit live attribute is present.
  pub const fn is_explicit(&self) -> bool {
    self.politeness.is_some() || self.atomic.is_some() || self.relevant.is_some()
  }
}

/// Resolved watch for one live region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiveRegionWatch {
  pub politeness: Politeness,
  pub atomic: bool,
  pub relevant: RelevantChanges,
}

impl LiveRegionWatch {
  /// Implicit watch defaults for a live-region role, if any.
  pub fn for_role(role: Role) -> Option<Self> {
    let (politeness, atomic) = match role {
      Role::Alert => (Politeness::Assertive, true),
      Role::Status => (Politeness::Polite, true),
      Role::Log => (Politeness::Polite, false),
      Role::Timer | Role::Marquee => (Politeness::Off, false),
      Role::Banner
      | Role::Complementary
      | Role::ContentInfo
      | Role::Form
      | Role::Main
      | Role::Navigation
      | Role::Region
      | Role::Search
      | Role::Button
      | Role::Checkbox
      | Role::Radio
      | Role::Switch
      | Role::Link
      | Role::TextBox
      | Role::SearchBox
      | Role::ComboBox
      | Role::ListBox
      | Role::Option
      | Role::Slider
      | Role::SpinButton
      | Role::ProgressBar
      | Role::Tab
      | Role::TabList
      | Role::TabPanel
      | Role::Menu
      | Role::MenuBar
      | Role::MenuItem
      | Role::MenuItemCheckbox
      | Role::MenuItemRadio
      | Role::Tree
      | Role::TreeItem
      | Role::Grid
      | Role::GridCell
      | Role::Dialog
      | Role::AlertDialog
      | Role::Document
      | Role::Article
      | Role::Heading
      | Role::Paragraph
      | Role::List
      | Role::ListItem
      | Role::Table
      | Role::Row
      | Role::RowGroup
      | Role::Cell
      | Role::ColumnHeader
      | Role::RowHeader
      | Role::Image
      | Role::Figure
      | Role::Group
      | Role::Separator
      | Role::Toolbar
      | Role::Note
      | Role::Generic => return None,
    };
    Some(Self {
      politeness,
      atomic,
      relevant: RelevantChanges::default(),
    })
  }

  /// Resolve a watch from explicit settings layered over role defaults.
  ///
  /// Returns `None` when the node is not a live region at all. An explicit
  /// `aria-live="off"` still produces a watch (with politeness Off), which
  /// suppresses announcements from enclosing regions the same way.
  pub fn resolve(role: Role, settings: &LiveSettings) -> Option<Self> {
    let implicit = Self::for_role(role);
    if !settings.is_explicit() {
      return implicit;
    }
    let base = implicit.unwrap_or(Self {
      politeness: Politeness::Polite,
      atomic: false,
      relevant: RelevantChanges::default(),
    });
    Some(Self {
      politeness: settings.politeness.unwrap_or(base.politeness),
      atomic: settings.atomic.unwrap_or(base.atomic),
      relevant: settings.relevant.unwrap_or(base.relevant),
    })
  }
}
