/*!
Axsim - Screen-Reader Perception Simulator

Rebuilds the tree assistive technology perceives from a host-supplied raw
element tree, and replays screen-reader behavior over it deterministically:
cursor navigation with landmark and table semantics, live-region
announcements with politeness ordering, and read-only search.

```
use axsim::{Axsim, CancellationToken, RawElement, TypeFilter};

let axsim = Axsim::new();

// The markup/style front-end delivers resolved element trees.
axsim.load(
  &RawElement::new(1, "div")
    .child(RawElement::new(2, "h1").text("Inbox"))
    .child(
      RawElement::new(3, "nav")
        .attr("aria-label", "Folders")
        .child(RawElement::new(4, "a").attr("href", "/sent").text("Sent")),
    ),
);

// Navigate one perceived unit at a time.
let announcements = axsim.next_of_type(TypeFilter::Heading);
assert_eq!(announcements[0].text, "heading level 1, Inbox");

// Search never touches the cursor.
let hits = axsim.text_search("sent", &CancellationToken::new());
assert!(!hits.is_empty());
```

Announcements flow through one ordered queue (assertive ahead of pending
polite) and are delivered one at a time via [`Axsim::deliver_next`];
`subscribe()` fans delivered events out to the host.
*/

mod core;
mod live;
mod nav;
mod queue;
mod raw;
mod search;
mod tree;

pub mod a11y;

mod types;
pub use types::*;

pub use crate::core::{Axsim, AxsimBuilder};
pub use crate::nav::{Mode, TypeFilter};
pub use crate::raw::{RawElement, RawNode};
pub use crate::search::{CancellationToken, OutlineEntry, OutlineKind, TextMatch};
pub use crate::tree::{AccessibilityNode, AccessibilityTree, Ancestors};
