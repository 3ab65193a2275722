/*!
The announcement queue - a single ordered channel of pending utterances.

Both announcement sources feed this queue: navigation commands and live
region changes. An assertive announcement is spliced ahead of every pending
non-assertive one (FIFO among assertive), emulating speech interruption.
Delivery is single-consumer and strictly one at a time; once delivered, an
announcement is never reordered or withdrawn.
*/

use crate::a11y::Politeness;
use crate::types::{Announcement, AnnouncementSource};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub(crate) struct AnnouncementQueue {
  pending: VecDeque<Announcement>,
  next_sequence: u64,
}

impl AnnouncementQueue {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Enqueue an announcement, assigning its sequence number. Returns the
  /// finished event so callers can hand it back synchronously as well.
  pub(crate) fn enqueue(
    &mut self,
    text: String,
    source: AnnouncementSource,
    politeness: Politeness,
  ) -> Announcement {
    let announcement = Announcement {
      text,
      source,
      politeness,
      sequence: self.next_sequence,
    };
    self.next_sequence += 1;

    match politeness {
      Politeness::Assertive => {
        // Ahead of all pending non-assertive events, behind earlier
        // assertive ones.
        let position = self
          .pending
          .iter()
          .position(|pending| pending.politeness != Politeness::Assertive)
          .unwrap_or(self.pending.len());
        self.pending.insert(position, announcement.clone());
      }
      Politeness::Polite | Politeness::Off => {
        self.pending.push_back(announcement.clone());
      }
    }
    announcement
  }

  /// Pop the next announcement in delivery order.
  pub(crate) fn deliver_next(&mut self) -> Option<Announcement> {
    self.pending.pop_front()
  }

  /// Number of not-yet-delivered announcements.
  pub(crate) fn pending_len(&self) -> usize {
    self.pending.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn polite(queue: &mut AnnouncementQueue, text: &str) -> Announcement {
    queue.enqueue(
      text.to_string(),
      AnnouncementSource::LiveRegion,
      Politeness::Polite,
    )
  }

  fn assertive(queue: &mut AnnouncementQueue, text: &str) -> Announcement {
    queue.enqueue(
      text.to_string(),
      AnnouncementSource::LiveRegion,
      Politeness::Assertive,
    )
  }

  #[test]
  fn assertive_jumps_pending_polite_events() {
    let mut queue = AnnouncementQueue::new();
    polite(&mut queue, "Saved");
    polite(&mut queue, "Synced");
    assertive(&mut queue, "Error");

    let delivered: Vec<String> = std::iter::from_fn(|| queue.deliver_next())
      .map(|a| a.text)
      .collect();
    assert_eq!(delivered, vec!["Error", "Saved", "Synced"]);
  }

  #[test]
  fn delivered_events_are_never_reordered() {
    let mut queue = AnnouncementQueue::new();
    polite(&mut queue, "Saved");
    let first = queue.deliver_next().map(|a| a.text);
    assert_eq!(first.as_deref(), Some("Saved"));

    // An assertive arrival after delivery only affects what is still pending.
    polite(&mut queue, "Synced");
    assertive(&mut queue, "Error");
    assert_eq!(queue.deliver_next().map(|a| a.text).as_deref(), Some("Error"));
    assert_eq!(queue.deliver_next().map(|a| a.text).as_deref(), Some("Synced"));
  }

  #[test]
  fn assertive_events_stay_fifo_among_themselves() {
    let mut queue = AnnouncementQueue::new();
    polite(&mut queue, "quiet");
    assertive(&mut queue, "first");
    assertive(&mut queue, "second");

    let delivered: Vec<String> = std::iter::from_fn(|| queue.deliver_next())
      .map(|a| a.text)
      .collect();
    assert_eq!(delivered, vec!["first", "second", "quiet"]);
  }

  #[test]
  fn sequence_numbers_are_monotonic_by_enqueue_order() {
    let mut queue = AnnouncementQueue::new();
    let a = polite(&mut queue, "a");
    let b = assertive(&mut queue, "b");
    let c = polite(&mut queue, "c");
    assert!(a.sequence < b.sequence);
    assert!(b.sequence < c.sequence);
    // Delivery order differs from sequence order for the spliced event.
    assert_eq!(queue.deliver_next().map(|x| x.sequence), Some(b.sequence));
  }

  #[test]
  fn empty_queue_delivers_nothing() {
    let mut queue = AnnouncementQueue::new();
    assert!(queue.deliver_next().is_none());
    assert_eq!(queue.pending_len(), 0);
  }
}
