/*!
Semantic roles for accessible nodes.

Roles describe what a node *is* to assistive technology. The taxonomy is
closed: explicit role attributes that do not parse to one of these fall back
to the implicit role for the element's tag (see `tree::build`).
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Semantic role of an accessible node.
///
/// Covers landmark roles, widget roles, document-structure roles, and
/// live-region roles. `Generic` is the neutral container role for elements
/// with no semantics of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
  // === Landmarks ===
  Banner,
  Complementary,
  ContentInfo,
  Form,
  Main,
  Navigation,
  Region,
  Search,

  // === Widgets ===
  Button,
  Checkbox,
  Radio,
  Switch,
  Link,
  TextBox,
  SearchBox,
  ComboBox,
  ListBox,
  Option,
  Slider,
  SpinButton,
  ProgressBar,
  Tab,
  TabList,
  TabPanel,
  Menu,
  MenuBar,
  MenuItem,
  MenuItemCheckbox,
  MenuItemRadio,
  Tree,
  TreeItem,
  Grid,
  GridCell,
  Dialog,
  AlertDialog,

  // === Document structure ===
  Document,
  Article,
  Heading,
  Paragraph,
  List,
  ListItem,
  Table,
  Row,
  RowGroup,
  Cell,
  ColumnHeader,
  RowHeader,
  Image,
  Figure,
  Group,
  Separator,
  Toolbar,
  Note,
  #[default]
  Generic,

  // === Live regions ===
  Alert,
  Status,
  Log,
  Marquee,
  Timer,
}

impl Role {
  /// Parse an explicit role attribute value. Returns `None` for anything
  /// outside the taxonomy; callers fall back to the implicit role.
  pub fn parse(s: &str) -> Option<Self> {
    Some(match s.trim().to_lowercase().as_str() {
      "banner" => Self::Banner,
      "complementary" => Self::Complementary,
      "contentinfo" => Self::ContentInfo,
      "form" => Self::Form,
      "main" => Self::Main,
      "navigation" => Self::Navigation,
      "region" => Self::Region,
      "search" => Self::Search,
      "button" => Self::Button,
      "checkbox" => Self::Checkbox,
      "radio" => Self::Radio,
      "switch" => Self::Switch,
      "link" => Self::Link,
      "textbox" => Self::TextBox,
      "searchbox" => Self::SearchBox,
      "combobox" => Self::ComboBox,
      "listbox" => Self::ListBox,
      "option" => Self::Option,
      "slider" => Self::Slider,
      "spinbutton" => Self::SpinButton,
      "progressbar" => Self::ProgressBar,
      "tab" => Self::Tab,
      "tablist" => Self::TabList,
      "tabpanel" => Self::TabPanel,
      "menu" => Self::Menu,
      "menubar" => Self::MenuBar,
      "menuitem" => Self::MenuItem,
      "menuitemcheckbox" => Self::MenuItemCheckbox,
      "menuitemradio" => Self::MenuItemRadio,
      "tree" => Self::Tree,
      "treeitem" => Self::TreeItem,
      "grid" => Self::Grid,
      "gridcell" => Self::GridCell,
      "dialog" => Self::Dialog,
      "alertdialog" => Self::AlertDialog,
      "document" => Self::Document,
      "article" => Self::Article,
      "heading" => Self::Heading,
      "paragraph" => Self::Paragraph,
      "list" => Self::List,
      "listitem" => Self::ListItem,
      "table" => Self::Table,
      "row" => Self::Row,
      "rowgroup" => Self::RowGroup,
      "cell" => Self::Cell,
      "columnheader" => Self::ColumnHeader,
      "rowheader" => Self::RowHeader,
      "img" | "image" => Self::Image,
      "figure" => Self::Figure,
      "group" => Self::Group,
      "separator" => Self::Separator,
      "toolbar" => Self::Toolbar,
      "note" => Self::Note,
      "generic" | "none" | "presentation" => Self::Generic,
      "alert" => Self::Alert,
      "status" => Self::Status,
      "log" => Self::Log,
      "marquee" => Self::Marquee,
      "timer" => Self::Timer,
      _ => return None,
    })
  }

  /// The spoken label for this role, as a screen reader announces it.
  ///
  /// Empty labels mean the role is announced through its content alone
  /// (cells, paragraphs, plain containers).
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Banner => "banner",
      Self::Complementary => "complementary",
      Self::ContentInfo => "content information",
      Self::Form => "form",
      Self::Main => "main",
      Self::Navigation => "navigation",
      Self::Region => "region",
      Self::Search => "search",
      Self::Button => "button",
      Self::Checkbox => "checkbox",
      Self::Radio => "radio button",
      Self::Switch => "switch",
      Self::Link => "link",
      Self::TextBox => "text box",
      Self::SearchBox => "search box",
      Self::ComboBox => "combo box",
      Self::ListBox => "list box",
      Self::Option => "option",
      Self::Slider => "slider",
      Self::SpinButton => "spin button",
      Self::ProgressBar => "progress bar",
      Self::Tab => "tab",
      Self::TabList => "tab list",
      Self::TabPanel => "tab panel",
      Self::Menu => "menu",
      Self::MenuBar => "menu bar",
      Self::MenuItem => "menu item",
      Self::MenuItemCheckbox => "menu item checkbox",
      Self::MenuItemRadio => "menu item radio",
      Self::Tree => "tree",
      Self::TreeItem => "tree item",
      Self::Grid => "grid",
      Self::GridCell => "grid cell",
      Self::Dialog => "dialog",
      Self::AlertDialog => "alert dialog",
      Self::Document => "document",
      Self::Article => "article",
      Self::Heading => "heading",
      Self::List => "list",
      Self::ListItem => "list item",
      Self::Table => "table",
      Self::Row => "row",
      Self::ColumnHeader => "column header",
      Self::RowHeader => "row header",
      Self::Image => "image",
      Self::Figure => "figure",
      Self::Group => "group",
      Self::Separator => "separator",
      Self::Toolbar => "toolbar",
      Self::Note => "note",
      // Announced through content alone.
      Self::Paragraph | Self::RowGroup | Self::Cell | Self::Generic => "",
      Self::Alert => "alert",
      Self::Status => "status",
      Self::Log => "log",
      Self::Marquee => "marquee",
      Self::Timer => "timer",
    }
  }

  /// Is this a navigable landmark region?
  pub const fn is_landmark(&self) -> bool {
    matches!(
      self,
      Self::Banner
        | Self::Complementary
        | Self::ContentInfo
        | Self::Form
        | Self::Main
        | Self::Navigation
        | Self::Region
        | Self::Search
    )
  }

  /// Is this an interactive widget role?
  pub const fn is_widget(&self) -> bool {
    matches!(
      self,
      Self::Button
        | Self::Checkbox
        | Self::Radio
        | Self::Switch
        | Self::Link
        | Self::TextBox
        | Self::SearchBox
        | Self::ComboBox
        | Self::ListBox
        | Self::Option
        | Self::Slider
        | Self::SpinButton
        | Self::Tab
        | Self::MenuItem
        | Self::MenuItemCheckbox
        | Self::MenuItemRadio
        | Self::TreeItem
        | Self::GridCell
    )
  }

  /// Form-control roles reachable through typed navigation.
  pub const fn is_form_control(&self) -> bool {
    matches!(
      self,
      Self::Button
        | Self::Checkbox
        | Self::Radio
        | Self::Switch
        | Self::TextBox
        | Self::SearchBox
        | Self::ComboBox
        | Self::ListBox
        | Self::Slider
        | Self::SpinButton
    )
  }

  /// Roles whose implicit live-region semantics create a watch.
  pub const fn is_live_region(&self) -> bool {
    matches!(
      self,
      Self::Alert | Self::Status | Self::Log | Self::Marquee | Self::Timer
    )
  }

  /// Container roles that establish table position context.
  pub const fn is_table_container(&self) -> bool {
    matches!(self, Self::Table | Self::Grid)
  }

  /// Cell roles positioned within a row.
  pub const fn is_cell(&self) -> bool {
    matches!(
      self,
      Self::Cell | Self::GridCell | Self::ColumnHeader | Self::RowHeader
    )
  }

  /// Roles whose accessible name derives from their visible content text
  /// when no explicit label is present.
  pub const fn names_from_content(&self) -> bool {
    matches!(
      self,
      Self::Button
        | Self::Link
        | Self::Heading
        | Self::ListItem
        | Self::MenuItem
        | Self::MenuItemCheckbox
        | Self::MenuItemRadio
        | Self::Tab
        | Self::Option
        | Self::TreeItem
        | Self::Cell
        | Self::GridCell
        | Self::ColumnHeader
        | Self::RowHeader
        | Self::Checkbox
        | Self::Radio
        | Self::Switch
    )
  }

  /// Roles announced with a checked/unchecked state phrase.
  pub const fn is_checkable(&self) -> bool {
    matches!(
      self,
      Self::Checkbox | Self::Radio | Self::Switch | Self::MenuItemCheckbox | Self::MenuItemRadio
    )
  }

  /// Roles positioned as "item N of M" within their container.
  pub const fn is_set_item(&self) -> bool {
    matches!(
      self,
      Self::ListItem
        | Self::Option
        | Self::Tab
        | Self::MenuItem
        | Self::MenuItemCheckbox
        | Self::MenuItemRadio
        | Self::TreeItem
        | Self::Radio
    )
  }
}
