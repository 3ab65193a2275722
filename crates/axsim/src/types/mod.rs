/*! Core types for axsim. */

#![allow(missing_docs)]

mod error;
mod event;
mod ids;

pub use error::{AxsimError, AxsimResult};
pub use event::{
  Announcement, AnnouncementSource, ChangeKind, ChangeNotification, Event, TextRange,
};
pub use ids::NodeId;
