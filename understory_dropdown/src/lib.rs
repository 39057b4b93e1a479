// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dropdown: headless state for a searchable, virtualized select.
//!
//! This crate owns everything about a single-select dropdown except pixels:
//! the item list, the typed query, filtering, the committed value and its
//! label, the keyboard cursor, and the open/closed menu. A windowed renderer
//! owned by the host mounts only a slice of the candidates; the core maps
//! global indices into that slice and toggles visual flags on the mounted
//! elements.
//!
//! The core concepts are:
//!
//! - [`Item`]: one selectable candidate, with an optional label and a
//!   disabled marker.
//! - [`filter_indices`]: case-insensitive substring filtering that yields a
//!   [`FilteredSequence`], viewed through [`FilteredItems`].
//! - [`SelectionTracker`] and [`HighlightTracker`]: the committed selection
//!   and the keyboard cursor, each with the mounted element showing it.
//! - [`ViewportWindow`] and [`DropdownHost`]: the mounted range and the host
//!   capabilities the core calls into.
//! - [`Rule`] and [`run_cycle`]: an ordered dependency table over [`Fields`]
//!   that recomputes derived state in one pass.
//! - [`Dropdown`]: the controller tying it together, plus navigation through
//!   [`Key`] handling and [`MenuState`].
//!
//! Hosts drive the dropdown by calling setters, then [`Dropdown::update`] to
//! run one recompute cycle. The cycle reports whether a render is warranted.
//! Notifications ([`DropdownEvent`]) are queued and drained by the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_dropdown::{
//!     Dropdown, DropdownConfig, DropdownEvent, DropdownHost, ElementFlag, Item, Key, ScrollAlign,
//! };
//!
//! // Every row is mounted; handles are global indices.
//! struct AllRows {
//!     len: usize,
//!     highlighted: Option<usize>,
//! }
//!
//! impl DropdownHost for AllRows {
//!     type Element = usize;
//!
//!     fn element_at(&self, local_offset: usize) -> Option<usize> {
//!         (local_offset < self.len).then_some(local_offset)
//!     }
//!
//!     fn scroll_to_index(&mut self, _index: usize, _align: ScrollAlign) {}
//!
//!     fn set_flag(&mut self, element: usize, flag: ElementFlag, on: bool) {
//!         if flag == ElementFlag::Highlight {
//!             self.highlighted = on.then_some(element);
//!         }
//!     }
//! }
//!
//! let items = vec![
//!     Item::new("a").with_label("Apple"),
//!     Item::new("b").with_label("Banana"),
//!     Item::new("c").with_label("Cherry"),
//! ];
//! let config = DropdownConfig {
//!     filtering: true,
//!     ..DropdownConfig::default()
//! };
//! let mut dropdown = Dropdown::with_config(items, config);
//! dropdown.attach_host(AllRows { len: 3, highlighted: None });
//! dropdown.report_range(0, 2);
//! dropdown.show();
//! dropdown.update();
//!
//! dropdown.handle_key(Key::ArrowDown);
//! dropdown.update();
//! assert_eq!(dropdown.highlight_index(), 1);
//! assert_eq!(dropdown.host().and_then(|host| host.highlighted), Some(1));
//!
//! dropdown.handle_key(Key::Enter);
//! dropdown.update();
//! assert_eq!(dropdown.value(), "b");
//! assert_eq!(dropdown.displayed_text(), "Banana");
//! assert!(!dropdown.is_open());
//! assert!(dropdown
//!     .drain_events()
//!     .any(|event| event == DropdownEvent::Change("b".into())));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clamp;
mod config;
mod dropdown;
mod error;
mod event;
mod field;
mod filter;
mod highlight;
mod item;
mod nav;
mod recompute;
mod selection;
mod viewport;

pub use clamp::{clamp, clamp_index};
pub use config::DropdownConfig;
pub use dropdown::{Dropdown, RenderItemFn, SelectGuard};
pub use error::CommitError;
pub use event::{DropdownEvent, SelectDecision};
pub use field::Fields;
pub use filter::{FilteredItems, FilteredSequence, filter_indices, filter_items, normalize};
pub use highlight::{HighlightTracker, next_index, prev_index};
pub use item::{Item, RenderedItem};
pub use nav::{Key, KeyListener, KeyOutcome, MenuState};
pub use recompute::{Rule, run_cycle, should_render};
pub use selection::{SelectionTracker, matched_label, resolve_selected_index};
pub use viewport::{DropdownHost, ElementFlag, ScrollAlign, ViewportWindow, resolve_element};
