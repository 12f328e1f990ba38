//! A headless virtualization engine for long ordered sequences with sticky group headers.
//!
//! Given a viewport size, a scroll offset, and an ordered sequence of [`Entry`] values, the
//! engine answers which entries should be rendered and where:
//!
//! - When every entry fits in the viewport, leftover space is distributed across the
//!   "elastic" entries (by weight, or by their `min..max` range) so the result exactly fills
//!   the viewport.
//! - Otherwise a window of entries intersecting the viewport (plus overscan) is selected via
//!   binary search over a prefix-sum offset index.
//! - Entries carrying a `level` are sticky group headers. Headers whose own row scrolled above
//!   the window are synthesized back into the result, and every header gets clamp bounds and a
//!   stacking offset so the presentation layer can pin it.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size along the scroll axis
//! - scroll offset
//! - the entry sequence (rebuild the [`Virtualizer`] only when it changes)
//!
//! ```
//! use sticky_virtualizer::{Entry, VirtualizeOptions, Virtualizer};
//!
//! let entries: Vec<Entry> = (0..1_000u64)
//!     .map(|id| {
//!         let e = Entry::fixed(id, 20);
//!         if id % 50 == 0 { e.with_level(1) } else { e }
//!     })
//!     .collect();
//! let v = Virtualizer::new(entries).unwrap();
//!
//! let items = v
//!     .virtualize(&VirtualizeOptions::new(200).with_scroll_offset(1_030).with_overscan(0))
//!     .unwrap();
//! // The window starts at entry 51; its group header (id 50) is pulled in ahead of it.
//! assert_eq!(items[0].id, 50);
//! assert!(items[0].sticky.is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod distribute;
mod error;
mod key;
mod offset_index;
mod options;
mod sticky_tree;
mod types;
mod virtualizer;
mod window;


pub use error::VirtualizerError;
pub use key::EntryId;
pub use offset_index::OffsetIndex;
pub use options::VirtualizeOptions;
pub use sticky_tree::{NodeId, StickyNode, StickyTree};
pub use types::{Entry, EntryKey, Mode, StickyPlacement, VirtualItem, VirtualRange};
pub use virtualizer::{Virtualizer, virtualize};
