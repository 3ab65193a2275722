/*!
Core Axsim session - owns the active tree, navigation state, announcement
queue, and event broadcasting.

# Module Structure

- `mod.rs` - Axsim struct, construction, events, delivery
- `sync.rs` - tree rebuild, atomic swap, cursor reconciliation
- `commands.rs` - navigation command API
- `queries.rs` - node/cursor/sequence accessors

# Example

```
use axsim::{Axsim, RawElement};

let axsim = Axsim::new();
axsim.load(
  &RawElement::new(1, "nav")
    .attr("aria-label", "Main")
    .child(RawElement::new(2, "a").attr("href", "/").text("Home")),
);

let announcements = axsim.next();
assert!(!announcements.is_empty());
```
*/

mod commands;
mod queries;
mod sync;

use crate::a11y::{LiveRegionWatch, Politeness};
use crate::nav::{Mode, NavigationState};
use crate::queue::AnnouncementQueue;
use crate::tree::AccessibilityTree;
use crate::types::{Announcement, AnnouncementSource, Event, NodeId};
use async_broadcast::{InactiveReceiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// The active document snapshot: tree plus derived live-region watches.
/// Swapped whole on every rebuild.
pub(crate) struct DocumentState {
  pub(crate) tree: Arc<AccessibilityTree>,
  pub(crate) watches: HashMap<NodeId, LiveRegionWatch>,
}

/// One simulated screen-reader session.
///
/// Sessions are explicit values, never globals: independent sessions (for
/// example concurrent test runs) coexist freely. Clone is cheap (Arc bumps)
/// and shares the same session state across threads.
pub struct Axsim {
  state: Arc<RwLock<DocumentState>>,
  nav: Arc<Mutex<NavigationState>>,
  queue: Arc<Mutex<AnnouncementQueue>>,
  events_tx: Sender<Event>,
  events_keepalive: InactiveReceiver<Event>,
}

impl Clone for Axsim {
  fn clone(&self) -> Self {
    Self {
      state: Arc::clone(&self.state),
      nav: Arc::clone(&self.nav),
      queue: Arc::clone(&self.queue),
      events_tx: self.events_tx.clone(),
      events_keepalive: self.events_keepalive.clone(),
    }
  }
}

impl std::fmt::Debug for Axsim {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Axsim").finish_non_exhaustive()
  }
}

impl Default for Axsim {
  fn default() -> Self {
    Self::new()
  }
}

/// Builder for configuring an Axsim session.
///
/// # Example
///
/// ```
/// use axsim::{Axsim, Mode};
///
/// let axsim = Axsim::builder()
///     .initial_mode(Mode::Focus)
///     .event_capacity(256)
///     .build();
/// assert_eq!(axsim.mode(), Mode::Focus);
/// ```
#[derive(Debug, Clone, Copy)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct AxsimBuilder {
  event_capacity: usize,
  initial_mode: Mode,
}

impl Default for AxsimBuilder {
  fn default() -> Self {
    Self {
      event_capacity: EVENT_CHANNEL_CAPACITY,
      initial_mode: Mode::Browse,
    }
  }
}

impl AxsimBuilder {
  /// Capacity of the broadcast event channel. Oldest events are dropped on
  /// overflow. Default: 1024.
  pub const fn event_capacity(mut self, capacity: usize) -> Self {
    self.event_capacity = capacity;
    self
  }

  /// Navigation mode the session starts in. Default: Browse.
  pub const fn initial_mode(mut self, mode: Mode) -> Self {
    self.initial_mode = mode;
    self
  }

  /// Build the session with the configured options.
  pub fn build(self) -> Axsim {
    let (mut tx, rx) = async_broadcast::broadcast(self.event_capacity.max(1));
    tx.set_overflow(true); // Drop oldest events when full

    Axsim {
      state: Arc::new(RwLock::new(DocumentState {
        tree: Arc::new(AccessibilityTree::empty()),
        watches: HashMap::new(),
      })),
      nav: Arc::new(Mutex::new(NavigationState::new(self.initial_mode))),
      queue: Arc::new(Mutex::new(AnnouncementQueue::new())),
      events_tx: tx,
      events_keepalive: rx.deactivate(),
    }
  }
}

impl Axsim {
  /// Create a session with default options and an empty document.
  pub fn new() -> Self {
    Self::builder().build()
  }

  /// Create a builder for configuring a new session.
  pub fn builder() -> AxsimBuilder {
    AxsimBuilder::default()
  }

  /// Subscribe to the unified event stream: delivered announcements,
  /// activation requests, and rebuild notices.
  pub fn subscribe(&self) -> async_broadcast::Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  /// Deliver the next pending announcement to the single-consumer channel.
  ///
  /// Exactly one announcement leaves the queue per call, in queue order,
  /// and is broadcast to subscribers. Returns `None` when nothing is
  /// pending.
  pub fn deliver_next(&self) -> Option<Announcement> {
    let delivered = self.queue.lock().deliver_next()?;
    self.emit(Event::Announcement(delivered.clone()));
    Some(delivered)
  }

  /// Deliver every pending announcement, in order.
  pub fn drain(&self) -> Vec<Announcement> {
    let mut delivered = Vec::new();
    while let Some(announcement) = self.deliver_next() {
      delivered.push(announcement);
    }
    delivered
  }

  /// Number of announcements waiting for delivery.
  pub fn pending_announcements(&self) -> usize {
    self.queue.lock().pending_len()
  }

  /// Emit an event on the broadcast channel.
  pub(crate) fn emit(&self, event: Event) {
    if let Err(e) = self.events_tx.try_broadcast(event) {
      if e.is_full() {
        log::error!(
          "Event channel overflow - events are being dropped. \
           Consider a larger event_capacity or faster consumption."
        );
      }
    }
  }

  /// Read the document snapshot. Keep closures short; no locks inside.
  #[inline]
  pub(crate) fn read<R>(&self, f: impl FnOnce(&DocumentState) -> R) -> R {
    f(&self.state.read())
  }

  /// Replace the document snapshot. Used by rebuild only.
  #[inline]
  pub(crate) fn write<R>(&self, f: impl FnOnce(&mut DocumentState) -> R) -> R {
    f(&mut self.state.write())
  }

  /// Run a closure with the navigation state locked. Commands serialize
  /// here: one at a time, run to completion.
  #[inline]
  pub(crate) fn with_nav<R>(&self, f: impl FnOnce(&mut NavigationState) -> R) -> R {
    f(&mut self.nav.lock())
  }

  /// Enqueue one announcement for delivery.
  pub(crate) fn enqueue(
    &self,
    text: String,
    source: AnnouncementSource,
    politeness: Politeness,
  ) -> Announcement {
    self.queue.lock().enqueue(text, source, politeness)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawElement;
  use crate::types::{ChangeKind, ChangeNotification};

  fn page() -> RawElement {
    RawElement::new(1, "div")
      .child(RawElement::new(2, "h1").text("Title"))
      .child(
        RawElement::new(3, "nav")
          .attr("aria-label", "Main")
          .child(RawElement::new(4, "a").attr("href", "/").text("Home"))
          .child(RawElement::new(5, "a").attr("href", "/about").text("About")),
      )
      .child(RawElement::new(6, "p").text("Body text"))
      .child(RawElement::new(7, "output").child(RawElement::new(8, "span").text("Ready")))
  }

  #[test]
  fn replaying_commands_yields_identical_announcements() {
    let run = || {
      let axsim = Axsim::new();
      axsim.load(&page());
      let mut texts: Vec<String> = Vec::new();
      for _ in 0..6 {
        texts.extend(axsim.next().into_iter().map(|a| a.text));
      }
      texts.extend(axsim.previous().into_iter().map(|a| a.text));
      texts.extend(
        axsim
          .next_of_type(crate::nav::TypeFilter::Link)
          .into_iter()
          .map(|a| a.text),
      );
      texts
    };
    assert_eq!(run(), run());
  }

  #[test]
  fn delivery_broadcasts_to_subscribers() {
    let axsim = Axsim::new();
    axsim.load(&page());
    let mut events = axsim.subscribe();

    let returned = axsim.next();
    let delivered = axsim.drain();
    assert_eq!(returned, delivered);

    for announcement in &delivered {
      match events.try_recv() {
        Ok(Event::Announcement(broadcast)) => assert_eq!(&broadcast, announcement),
        other => panic!("expected announcement event, got {other:?}"),
      }
    }
  }

  #[test]
  fn live_and_navigation_share_one_ordered_stream() {
    let axsim = Axsim::new();
    axsim.load(&page());

    // A polite live announcement queues; a navigation command is assertive
    // and is delivered first.
    axsim.notify_change(&ChangeNotification {
      subtree_root: NodeId(8),
      kind: ChangeKind::Text,
      affected: vec![NodeId(8)],
    });
    axsim.next();

    let delivered = axsim.drain();
    assert_eq!(delivered.len(), 2);
    assert_eq!(
      delivered.first().map(|a| a.source),
      Some(AnnouncementSource::Navigation)
    );
    assert_eq!(delivered.get(1).map(|a| a.text.as_str()), Some("Ready"));
  }

  #[test]
  fn empty_session_has_nothing_to_do() {
    let axsim = Axsim::new();
    assert!(axsim.next().is_empty());
    assert!(axsim.deliver_next().is_none());
    assert_eq!(axsim.cursor(), None);
  }
}

#[cfg(test)]
mod proptests {
  use super::*;
  use crate::nav::TypeFilter;
  use crate::raw::RawElement;
  use proptest::prelude::*;

  #[derive(Debug, Clone, Copy)]
  enum Command {
    Next,
    Previous,
    NextHeading,
    PreviousLink,
    ToggleMode,
    WhereAmI,
  }

  fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
      Just(Command::Next),
      Just(Command::Previous),
      Just(Command::NextHeading),
      Just(Command::PreviousLink),
      Just(Command::ToggleMode),
      Just(Command::WhereAmI),
    ]
  }

  fn run(commands: &[Command]) -> Vec<String> {
    let axsim = Axsim::new();
    let raw = RawElement::new(1, "div")
      .child(RawElement::new(2, "h1").text("One"))
      .child(
        RawElement::new(3, "nav")
          .attr("aria-label", "Menu")
          .child(RawElement::new(4, "a").attr("href", "/a").text("A")),
      )
      .child(RawElement::new(5, "h2").text("Two"))
      .child(RawElement::new(6, "p").text("tail"));
    axsim.load(&raw);

    let mut texts = Vec::new();
    for command in commands {
      let announcements = match command {
        Command::Next => axsim.next(),
        Command::Previous => axsim.previous(),
        Command::NextHeading => axsim.next_of_type(TypeFilter::Heading),
        Command::PreviousLink => axsim.previous_of_type(TypeFilter::Link),
        Command::ToggleMode => axsim.toggle_mode(),
        Command::WhereAmI => axsim.where_am_i(),
      };
      texts.extend(announcements.into_iter().map(|a| a.text));
    }
    texts
  }

  proptest! {
    /// Identical command sequences on identical trees produce identical
    /// announcement text in identical order.
    #[test]
    fn replay_is_deterministic(commands in proptest::collection::vec(arb_command(), 0..24)) {
      prop_assert_eq!(run(&commands), run(&commands));
    }
  }
}
