/*! Branded ID types for type-safe node references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Node identifier, assigned by the host front-end.
///
/// Ids are stable across tree rebuilds: the same markup element keeps the
/// same id in every snapshot the host delivers. Host ids start at 1; id 0 is
/// reserved for the synthetic root container (see [`NodeId::ROOT`]).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Display,
  From, Into,
)]
#[ts(export)]
pub struct NodeId(pub u32);

impl NodeId {
  /// The synthetic root container present in every built tree.
  pub const ROOT: Self = Self(0);

  /// Whether this id is the synthetic root.
  pub const fn is_root(self) -> bool {
    self.0 == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn root_is_zero() {
    assert!(NodeId::ROOT.is_root());
    assert!(!NodeId(1).is_root());
  }

  #[test]
  fn displays_as_plain_number() {
    assert_eq!(NodeId(42).to_string(), "42");
  }
}
