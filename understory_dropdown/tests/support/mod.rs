// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording windowed host shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use understory_dropdown::{Dropdown, DropdownHost, ElementFlag, Item, ScrollAlign};

/// Everything the core asked the host to do.
#[derive(Debug, Default)]
pub(crate) struct HostLog {
    pub(crate) flags: Vec<(usize, ElementFlag, bool)>,
    pub(crate) scrolls: Vec<(usize, ScrollAlign)>,
    pub(crate) listening: bool,
    pub(crate) focused: bool,
}

impl HostLog {
    /// Elements currently carrying `flag`, replayed from the flag log.
    pub(crate) fn flagged(&self, flag: ElementFlag) -> BTreeSet<usize> {
        let mut on = BTreeSet::new();
        for &(element, f, set) in &self.flags {
            if f != flag {
                continue;
            }
            if set {
                on.insert(element);
            } else {
                on.remove(&element);
            }
        }
        on
    }
}

/// Log handle kept by a test after the host moves into the dropdown.
pub(crate) type SharedLog = Rc<RefCell<HostLog>>;

/// Mounts `count` rows starting at global index `first`.
///
/// Element handles are global indices, so a flag on element `i` means the
/// row for candidate `i`.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    first: usize,
    count: usize,
    pub(crate) log: SharedLog,
}

impl RecordingHost {
    pub(crate) fn new() -> (Self, SharedLog) {
        let host = Self::default();
        let log = Rc::clone(&host.log);
        (host, log)
    }

    pub(crate) fn mount(&mut self, first: usize, count: usize) {
        self.first = first;
        self.count = count;
    }
}

impl DropdownHost for RecordingHost {
    type Element = usize;

    fn element_at(&self, local_offset: usize) -> Option<usize> {
        (local_offset < self.count).then_some(self.first + local_offset)
    }

    fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) {
        self.log.borrow_mut().scrolls.push((index, align));
    }

    fn set_flag(&mut self, element: usize, flag: ElementFlag, on: bool) {
        self.log.borrow_mut().flags.push((element, flag, on));
    }

    fn focus_input(&mut self) {
        self.log.borrow_mut().focused = true;
    }

    fn blur_input(&mut self) {
        self.log.borrow_mut().focused = false;
    }

    fn set_key_listener(&mut self, attached: bool) {
        self.log.borrow_mut().listening = attached;
    }
}

/// Mounts `first..=last` on the host and reports the same window.
pub(crate) fn mount_window(dropdown: &mut Dropdown<RecordingHost>, first: usize, last: usize) {
    if let Some(host) = dropdown.host_mut() {
        host.mount(first, last - first + 1);
    }
    dropdown.report_range(first as i64, last as i64);
}

/// Reports that the renderer has nothing mounted.
pub(crate) fn unmount(dropdown: &mut Dropdown<RecordingHost>) {
    if let Some(host) = dropdown.host_mut() {
        host.mount(0, 0);
    }
    dropdown.report_range(-1, -1);
}

pub(crate) fn fruit() -> Vec<Item> {
    vec![
        Item::new("apple").with_label("Apple"),
        Item::new("banana").with_label("Banana"),
        Item::new("cherry").with_label("Cherry"),
    ]
}

/// `n` items labelled `Item 0` through `Item n-1`.
pub(crate) fn numbered(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(format!("v{i}")).with_label(format!("Item {i}")))
        .collect()
}
