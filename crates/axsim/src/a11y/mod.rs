/*!
Accessibility semantics: roles, states, properties, and live-region model.
*/

mod live;
mod role;
mod state;

pub use live::{LiveRegionWatch, LiveSettings, Politeness, RelevantChanges};
pub use role::Role;
pub use state::{
  Autocomplete, CurrentKind, HasPopup, InvalidKind, Orientation, Properties, Relationships,
  States, TriState,
};
