/*!
Navigation command API.

Commands are synchronous, serialize on the navigation lock, and run to
completion. Each returns the announcements it produced; the same events are
enqueued for single-consumer delivery, so command output and the subscribed
stream always agree. Navigation speech is assertive: user-initiated movement
preempts pending polite live-region chatter.
*/

use super::Axsim;
use crate::a11y::Politeness;
use crate::nav::{self, Direction, TypeFilter};
use crate::types::{Announcement, AnnouncementSource, Event, NodeId};
use std::sync::Arc;

impl Axsim {
  /// Move to the next node in the flattened sequence. No-op at the end.
  pub fn next(&self) -> Vec<Announcement> {
    self.move_cursor(Direction::Forward)
  }

  /// Move to the previous node. No-op at the start.
  pub fn previous(&self) -> Vec<Announcement> {
    self.move_cursor(Direction::Backward)
  }

  /// Scan forward for the next node matching a filter. No-op if none.
  pub fn next_of_type(&self, filter: TypeFilter) -> Vec<Announcement> {
    self.move_typed(Direction::Forward, filter)
  }

  /// Scan backward for the previous node matching a filter. No-op if none.
  pub fn previous_of_type(&self, filter: TypeFilter) -> Vec<Announcement> {
    self.move_typed(Direction::Backward, filter)
  }

  /// Signal that the current node should be invoked.
  ///
  /// The simulation never mutates application state; the host receives an
  /// [`Event::ActivationRequested`] and performs the real action, then
  /// delivers fresh snapshots/notifications as usual. Returns the node to
  /// invoke, or `None` when there is no cursor or the node is unavailable.
  pub fn activate(&self) -> Option<NodeId> {
    self.with_nav(|state| {
      let tree = self.read(|doc| Arc::clone(&doc.tree));
      let id = state
        .cursor
        .and_then(|index| tree.sequence().get(index).copied())?;
      let node = tree.get(id)?;
      if node.states.disabled {
        log::debug!("activate on unavailable node {id}; ignored");
        return None;
      }
      self.emit(Event::ActivationRequested { node_id: id });
      Some(id)
    })
  }

  /// Flip between Browse and Focus mode, announcing the new mode.
  pub fn toggle_mode(&self) -> Vec<Announcement> {
    self.with_nav(|state| {
      state.mode = state.mode.toggled();
      let text = state.mode.label().to_string();
      vec![self.enqueue(text, AnnouncementSource::Navigation, Politeness::Assertive)]
    })
  }

  /// Re-announce the current node with full context (landmark ancestry,
  /// table and set position) without moving the cursor.
  pub fn where_am_i(&self) -> Vec<Announcement> {
    self.with_nav(|state| {
      let tree = self.read(|doc| Arc::clone(&doc.tree));
      let Some(id) = state
        .cursor
        .and_then(|index| tree.sequence().get(index).copied())
      else {
        return Vec::new();
      };
      let texts = nav::where_am_i_announcements(&tree, id);
      self.enqueue_navigation(texts)
    })
  }

  fn move_cursor(&self, direction: Direction) -> Vec<Announcement> {
    self.with_nav(|state| {
      let tree = self.read(|doc| Arc::clone(&doc.tree));
      let Some(target) = nav::step(tree.sequence().len(), state.cursor, direction) else {
        return Vec::new();
      };
      let prev = state
        .cursor
        .and_then(|index| tree.sequence().get(index).copied());
      let Some(&next) = tree.sequence().get(target) else {
        return Vec::new();
      };
      state.cursor = Some(target);
      let texts = nav::move_announcements(&tree, prev, next);
      self.enqueue_navigation(texts)
    })
  }

  fn move_typed(&self, direction: Direction, filter: TypeFilter) -> Vec<Announcement> {
    self.with_nav(|state| {
      let tree = self.read(|doc| Arc::clone(&doc.tree));
      let Some(target) = nav::scan(&tree, state.cursor, direction, filter) else {
        return Vec::new();
      };
      let prev = state
        .cursor
        .and_then(|index| tree.sequence().get(index).copied());
      let Some(&next) = tree.sequence().get(target) else {
        return Vec::new();
      };
      state.cursor = Some(target);
      let texts = nav::move_announcements(&tree, prev, next);
      self.enqueue_navigation(texts)
    })
  }

  fn enqueue_navigation(&self, texts: Vec<String>) -> Vec<Announcement> {
    texts
      .into_iter()
      .map(|text| self.enqueue(text, AnnouncementSource::Navigation, Politeness::Assertive))
      .collect()
  }
}
