/*!
Positional context for announcements: landmark ancestry, table coordinates,
and position-in-set. All lookups are pure reads against one tree snapshot.
*/

use crate::a11y::Role;
use crate::tree::AccessibilityTree;
use crate::types::NodeId;

/// Nearest landmark strict ancestor. The node itself and the synthetic root
/// never count: a landmark node sits at its boundary, not inside itself.
pub(crate) fn nearest_landmark(tree: &AccessibilityTree, id: NodeId) -> Option<NodeId> {
  tree.ancestors(id).find(|&ancestor| {
    !ancestor.is_root() && tree.get(ancestor).is_some_and(|node| node.role.is_landmark())
  })
}

/// Landmark boundary crossed by a cursor move, if any.
///
/// Entering is reported when the new position's nearest landmark ancestor
/// differs from the previous one and is non-null; exiting when the new
/// position has none and the previous did. Moves between nodes sharing the
/// same nearest landmark report nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LandmarkTransition {
  pub(crate) entering: Option<NodeId>,
  pub(crate) exiting: Option<NodeId>,
}

pub(crate) fn landmark_transition(
  tree: &AccessibilityTree,
  prev: Option<NodeId>,
  next: NodeId,
) -> LandmarkTransition {
  let prev_landmark = prev.and_then(|id| nearest_landmark(tree, id));
  let next_landmark = nearest_landmark(tree, next);
  if prev_landmark == next_landmark {
    return LandmarkTransition::default();
  }
  match next_landmark {
    Some(landmark) => LandmarkTransition {
      entering: Some(landmark),
      exiting: None,
    },
    None => LandmarkTransition {
      entering: None,
      exiting: prev_landmark,
    },
  }
}

/// Table coordinates of a node inside a table/grid ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TablePosition {
  pub(crate) row: usize,
  pub(crate) row_count: usize,
  pub(crate) column: Option<usize>,
  pub(crate) column_count: Option<usize>,
  pub(crate) header: Option<String>,
}

/// Compute table position for a node strictly inside a table or grid.
pub(crate) fn table_position(tree: &AccessibilityTree, id: NodeId) -> Option<TablePosition> {
  let table = tree.ancestors(id).find(|&ancestor| {
    tree
      .get(ancestor)
      .is_some_and(|node| node.role.is_table_container())
  })?;

  let rows = collect_rows(tree, table);
  let row = row_of(tree, id)?;
  let row_index = rows.iter().position(|&candidate| candidate == row)?;

  let cell = cell_of(tree, id, table);
  let (column_index, column_count, header) = match cell {
    Some(cell) => {
      let cells = row_cells(tree, row);
      let column = cells.iter().position(|&candidate| candidate == cell)?;
      let count = rows
        .iter()
        .map(|&r| row_cells(tree, r).len())
        .max()
        .unwrap_or(cells.len());
      let header = header_text(tree, cell, &rows, column);
      (Some(column + 1), Some(count), header)
    }
    None => (None, None, None),
  };

  Some(TablePosition {
    row: row_index + 1,
    row_count: rows.len(),
    column: column_index,
    column_count,
    header,
  })
}

/// Row and column counts of a table/grid node.
pub(crate) fn table_dimensions(tree: &AccessibilityTree, table: NodeId) -> (usize, usize) {
  let rows = collect_rows(tree, table);
  let columns = rows
    .iter()
    .map(|&row| row_cells(tree, row).len())
    .max()
    .unwrap_or(0);
  (rows.len(), columns)
}

/// Rows of a table in document order, not descending into nested tables.
fn collect_rows(tree: &AccessibilityTree, table: NodeId) -> Vec<NodeId> {
  let mut rows = Vec::new();
  let mut stack: Vec<NodeId> = tree.visible_children(table).into_iter().rev().collect();
  while let Some(id) = stack.pop() {
    let Some(node) = tree.get(id) else {
      continue;
    };
    if node.role.is_table_container() {
      continue;
    }
    if node.role == Role::Row {
      rows.push(id);
      continue;
    }
    for child in tree.visible_children(id).into_iter().rev() {
      stack.push(child);
    }
  }
  rows
}

/// The row containing a node (ancestor-or-self).
fn row_of(tree: &AccessibilityTree, id: NodeId) -> Option<NodeId> {
  if tree.get(id).is_some_and(|node| node.role == Role::Row) {
    return Some(id);
  }
  tree
    .ancestors(id)
    .find(|&ancestor| tree.get(ancestor).is_some_and(|node| node.role == Role::Row))
}

/// The cell containing a node (ancestor-or-self), stopping at the table.
fn cell_of(tree: &AccessibilityTree, id: NodeId, table: NodeId) -> Option<NodeId> {
  if tree.get(id).is_some_and(|node| node.role.is_cell()) {
    return Some(id);
  }
  for ancestor in tree.ancestors(id) {
    if ancestor == table {
      return None;
    }
    if tree.get(ancestor).is_some_and(|node| node.role.is_cell()) {
      return Some(ancestor);
    }
  }
  None
}

/// Visible cells of a row, in order.
fn row_cells(tree: &AccessibilityTree, row: NodeId) -> Vec<NodeId> {
  tree
    .visible_children(row)
    .into_iter()
    .filter(|&child| tree.get(child).is_some_and(|node| node.role.is_cell()))
    .collect()
}

/// Header text for a cell: explicit `headers` references win over implicit
/// same-column column-header, then same-row row-header lookup.
fn header_text(
  tree: &AccessibilityTree,
  cell: NodeId,
  rows: &[NodeId],
  column: usize,
) -> Option<String> {
  let explicit = tree
    .get(cell)
    .map(|node| {
      node
        .relationships
        .headers
        .iter()
        .filter_map(|&header| tree.get(header))
        .map(|header| header.name.clone())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    })
    .filter(|text| !text.is_empty());
  if explicit.is_some() {
    return explicit;
  }

  // Implicit: a column header at the same column index in any row.
  for &row in rows {
    if let Some(&candidate) = row_cells(tree, row).get(column) {
      if let Some(node) = tree.get(candidate) {
        if node.role == Role::ColumnHeader && candidate != cell && !node.name.is_empty() {
          return Some(node.name.clone());
        }
      }
    }
  }

  // Implicit: a row header within the cell's own row.
  let own_row = row_of(tree, cell)?;
  row_cells(tree, own_row)
    .into_iter()
    .filter(|&candidate| candidate != cell)
    .filter_map(|candidate| tree.get(candidate))
    .find(|node| node.role == Role::RowHeader && !node.name.is_empty())
    .map(|node| node.name.clone())
}

/// Position within a set of same-role siblings ("item N of M").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SetPosition {
  pub(crate) index: u32,
  pub(crate) size: u32,
}

/// Explicit posinset/setsize win; otherwise position among visible siblings
/// of the same role under the same parent.
pub(crate) fn set_position(tree: &AccessibilityTree, id: NodeId) -> Option<SetPosition> {
  let node = tree.get(id)?;
  if !node.role.is_set_item() {
    return None;
  }

  let explicit_index = node.properties.pos_in_set;
  let explicit_size = node.properties.set_size;
  if let (Some(index), Some(size)) = (explicit_index, explicit_size) {
    return Some(SetPosition { index, size });
  }

  let parent = node.parent?;
  let siblings: Vec<NodeId> = tree
    .visible_children(parent)
    .into_iter()
    .filter(|&sibling| {
      tree
        .get(sibling)
        .is_some_and(|candidate| candidate.role == node.role)
    })
    .collect();
  let computed_index = siblings
    .iter()
    .position(|&sibling| sibling == id)
    .map(|index| u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1))?;
  let computed_size = u32::try_from(siblings.len()).unwrap_or(u32::MAX);

  Some(SetPosition {
    index: explicit_index.unwrap_or(computed_index),
    size: explicit_size.unwrap_or(computed_size),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawElement;
  use crate::tree::build_tree;

  fn nav_fixture() -> AccessibilityTree {
    // div(1) -> [nav(2, "Main") -> [a(3), a(4)], p(5)]
    let raw = RawElement::new(1, "div")
      .child(
        RawElement::new(2, "nav")
          .attr("aria-label", "Main")
          .child(RawElement::new(3, "a").attr("href", "/").text("Home"))
          .child(RawElement::new(4, "a").attr("href", "/about").text("About")),
      )
      .child(RawElement::new(5, "p").text("Outside"));
    build_tree(&raw)
  }

  #[test]
  fn nearest_landmark_walks_up_strict() {
    let tree = nav_fixture();
    assert_eq!(nearest_landmark(&tree, NodeId(3)), Some(NodeId(2)));
    // The landmark node itself is at the boundary, not inside.
    assert_eq!(nearest_landmark(&tree, NodeId(2)), None);
    assert_eq!(nearest_landmark(&tree, NodeId(5)), None);
  }

  #[test]
  fn transition_reports_entering_once() {
    let tree = nav_fixture();
    // From outside into a link inside the nav.
    let into = landmark_transition(&tree, Some(NodeId(5)), NodeId(3));
    assert_eq!(into.entering, Some(NodeId(2)));
    assert_eq!(into.exiting, None);
    // Moving between two links in the same landmark: nothing.
    let within = landmark_transition(&tree, Some(NodeId(3)), NodeId(4));
    assert_eq!(within, LandmarkTransition::default());
  }

  #[test]
  fn transition_reports_exiting_to_plain_content() {
    let tree = nav_fixture();
    let out = landmark_transition(&tree, Some(NodeId(4)), NodeId(5));
    assert_eq!(out.exiting, Some(NodeId(2)));
    assert_eq!(out.entering, None);
  }

  #[test]
  fn landing_on_landmark_itself_is_not_entering() {
    let tree = nav_fixture();
    let onto = landmark_transition(&tree, Some(NodeId(1)), NodeId(2));
    assert_eq!(onto, LandmarkTransition::default());
  }

  fn table_fixture() -> AccessibilityTree {
    // 3x3 with a header row A/B/C.
    let raw = RawElement::new(1, "table")
      .child(
        RawElement::new(2, "tr")
          .child(RawElement::new(3, "th").text("A"))
          .child(RawElement::new(4, "th").text("B"))
          .child(RawElement::new(5, "th").text("C")),
      )
      .child(
        RawElement::new(6, "tr")
          .child(RawElement::new(7, "td").text("a1"))
          .child(RawElement::new(8, "td").text("b1"))
          .child(RawElement::new(9, "td").text("c1")),
      )
      .child(
        RawElement::new(10, "tr")
          .child(RawElement::new(11, "td").text("a2"))
          .child(RawElement::new(12, "td").text("b2"))
          .child(RawElement::new(13, "td").text("c2")),
      );
    build_tree(&raw)
  }

  #[test]
  fn cell_position_with_column_header() {
    let tree = table_fixture();
    // Row 2 of 3, column 2 of 3 is cell id 8 ("b1").
    let position = table_position(&tree, NodeId(8)).unwrap();
    assert_eq!(position.row, 2);
    assert_eq!(position.row_count, 3);
    assert_eq!(position.column, Some(2));
    assert_eq!(position.column_count, Some(3));
    assert_eq!(position.header.as_deref(), Some("B"));
  }

  #[test]
  fn row_has_position_without_column() {
    let tree = table_fixture();
    let position = table_position(&tree, NodeId(6)).unwrap();
    assert_eq!(position.row, 2);
    assert_eq!(position.column, None);
  }

  #[test]
  fn explicit_headers_win() {
    let raw = RawElement::new(1, "table")
      .child(
        RawElement::new(2, "tr")
          .child(RawElement::new(3, "th").text("Implicit")),
      )
      .child(
        RawElement::new(4, "tr").child(
          RawElement::new(5, "td")
            .attr("headers", "special")
            .text("x"),
        ),
      )
      .child(
        RawElement::new(6, "tr")
          .child(RawElement::new(7, "th").attr("id", "special").text("Explicit")),
      );
    let tree = build_tree(&raw);
    let position = table_position(&tree, NodeId(5)).unwrap();
    assert_eq!(position.header.as_deref(), Some("Explicit"));
  }

  #[test]
  fn nodes_outside_tables_have_no_position() {
    let tree = nav_fixture();
    assert_eq!(table_position(&tree, NodeId(3)), None);
  }

  #[test]
  fn set_position_among_visible_siblings() {
    let raw = RawElement::new(1, "ul")
      .child(RawElement::new(2, "li").text("one"))
      .child(RawElement::new(3, "li").unrendered().text("ghost"))
      .child(RawElement::new(4, "li").text("two"));
    let tree = build_tree(&raw);
    let position = set_position(&tree, NodeId(4)).unwrap();
    assert_eq!(position.index, 2);
    assert_eq!(position.size, 2);
  }

  #[test]
  fn explicit_set_properties_win() {
    let raw = RawElement::new(1, "ul").child(
      RawElement::new(2, "li")
        .attr("aria-posinset", "5")
        .attr("aria-setsize", "20")
        .text("five"),
    );
    let tree = build_tree(&raw);
    let position = set_position(&tree, NodeId(2)).unwrap();
    assert_eq!(position.index, 5);
    assert_eq!(position.size, 20);
  }
}
