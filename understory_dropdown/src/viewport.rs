// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport mapping between global candidate indices and mounted elements.
//!
//! A windowed renderer mounts only the candidates in `[first, last]`. The
//! element for global index `i` sits at local offset `i - first`. Indices
//! outside the window are perfectly valid; they simply have no element right
//! now.

use core::fmt::Debug;

/// Contiguous inclusive range of candidate indices mounted by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewportWindow {
    /// First mounted global index.
    pub first: usize,
    /// Last mounted global index (inclusive).
    pub last: usize,
}

impl ViewportWindow {
    /// Creates a window covering `first..=last`.
    ///
    /// Returns `None` when `last` comes before `first`.
    #[must_use]
    pub const fn new(first: usize, last: usize) -> Option<Self> {
        if last < first {
            None
        } else {
            Some(Self { first, last })
        }
    }

    /// Converts a renderer report that uses `-1` for "nothing mounted".
    ///
    /// Any negative `first`, or a `last` before `first`, means no window.
    #[must_use]
    pub fn from_raw(first: i64, last: i64) -> Option<Self> {
        let first = usize::try_from(first).ok()?;
        let last = usize::try_from(last).ok()?;
        Self::new(first, last)
    }

    /// Returns `true` if `index` is mounted.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    /// Local offset of `index` within the mounted elements, if mounted.
    #[must_use]
    pub const fn local_offset(&self, index: usize) -> Option<usize> {
        if self.contains(index) {
            Some(index - self.first)
        } else {
            None
        }
    }

    /// Number of mounted indices; `0` for fields set out of order.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            self.last - self.first + 1
        }
    }

    /// Returns `true` if the window mounts no index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Alignment hint when asking the renderer to scroll an index into view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAlign {
    /// Align the start of the item with the start of the viewport.
    Start,
    /// Center the item within the viewport.
    Center,
    /// Align the end of the item with the end of the viewport.
    End,
    /// Move just enough to make the item fully visible.
    #[default]
    Nearest,
}

/// Boolean visual flags the core toggles on mounted elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementFlag {
    /// The element shows the committed selection.
    Selected,
    /// The element sits under the keyboard cursor.
    Highlight,
}

/// The host capabilities the dropdown core needs.
///
/// `Element` is a small, copyable handle to one mounted row. The core only
/// reads mounted elements and toggles [`ElementFlag`]s on them; it never
/// creates or destroys them.
pub trait DropdownHost {
    /// Handle to a mounted row element.
    type Element: Copy + Eq + Debug;

    /// Returns the element mounted at `local_offset` within the current window.
    fn element_at(&self, local_offset: usize) -> Option<Self::Element>;

    /// Best-effort request to bring global `index` into view.
    fn scroll_to_index(&mut self, index: usize, align: ScrollAlign);

    /// Sets or clears `flag` on `element`.
    fn set_flag(&mut self, element: Self::Element, flag: ElementFlag, on: bool);

    /// Moves keyboard focus to the text field.
    fn focus_input(&mut self) {}

    /// Removes keyboard focus from the control.
    fn blur_input(&mut self) {}

    /// Attaches or detaches the menu's keyboard listener.
    fn set_key_listener(&mut self, attached: bool) {
        let _ = attached;
    }
}

/// Resolves the mounted element for a global candidate index.
///
/// Returns `None` when nothing is mounted, when no host is available, when
/// `global_index` falls outside the window, or when the host has no element at
/// the computed offset.
pub fn resolve_element<H: DropdownHost>(
    global_index: usize,
    viewport: Option<ViewportWindow>,
    host: Option<&H>,
) -> Option<H::Element> {
    let offset = viewport?.local_offset(global_index)?;
    host?.element_at(offset)
}

/// Moves `flag` from `from` to `to`, clearing before setting.
pub(crate) fn move_flag<H: DropdownHost>(
    host: &mut H,
    flag: ElementFlag,
    from: Option<H::Element>,
    to: Option<H::Element>,
) {
    if let Some(previous) = from {
        host.set_flag(previous, flag, false);
    }
    if let Some(next) = to {
        host.set_flag(next, flag, true);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{DropdownHost, ElementFlag, ScrollAlign, ViewportWindow, move_flag, resolve_element};

    /// Mounts `count` elements whose handles are their local offsets.
    struct Rows {
        count: usize,
        ops: Vec<(usize, ElementFlag, bool)>,
    }

    impl DropdownHost for Rows {
        type Element = usize;

        fn element_at(&self, local_offset: usize) -> Option<usize> {
            (local_offset < self.count).then_some(local_offset)
        }

        fn scroll_to_index(&mut self, _index: usize, _align: ScrollAlign) {}

        fn set_flag(&mut self, element: usize, flag: ElementFlag, on: bool) {
            self.ops.push((element, flag, on));
        }
    }

    #[test]
    fn raw_reports_use_negative_sentinel() {
        assert_eq!(ViewportWindow::from_raw(-1, -1), None);
        assert_eq!(ViewportWindow::from_raw(3, 1), None);
        assert_eq!(ViewportWindow::from_raw(2, 5), ViewportWindow::new(2, 5));
        assert_eq!(ViewportWindow::new(2, 5).map(|w| w.len()), Some(4));
    }

    #[test]
    fn out_of_order_bounds_are_empty() {
        assert_eq!(ViewportWindow::new(3, 1), None);
        let window = ViewportWindow { first: 3, last: 1 };
        assert_eq!(window.len(), 0);
        assert!(window.is_empty());
        assert!(!window.contains(2));
        assert_eq!(window.local_offset(3), None);
    }

    #[test]
    fn resolves_local_offset_inside_window() {
        let rows = Rows {
            count: 4,
            ops: Vec::new(),
        };
        let window = ViewportWindow::new(10, 13);
        assert_eq!(resolve_element(10, window, Some(&rows)), Some(0));
        assert_eq!(resolve_element(13, window, Some(&rows)), Some(3));
    }

    #[test]
    fn outside_window_or_unmounted_is_none() {
        let rows = Rows {
            count: 4,
            ops: Vec::new(),
        };
        let window = ViewportWindow::new(10, 13);
        assert_eq!(resolve_element(9, window, Some(&rows)), None);
        assert_eq!(resolve_element(14, window, Some(&rows)), None);
        assert_eq!(resolve_element(0, None, Some(&rows)), None);
        assert_eq!(resolve_element(10, window, None::<&Rows>), None);

        // Window claims more rows than the host actually mounted.
        let short = Rows {
            count: 2,
            ops: Vec::new(),
        };
        assert_eq!(resolve_element(12, window, Some(&short)), None);
    }

    #[test]
    fn flag_moves_clear_before_set() {
        let mut rows = Rows {
            count: 4,
            ops: Vec::new(),
        };
        move_flag(&mut rows, ElementFlag::Highlight, Some(1), Some(2));
        move_flag(&mut rows, ElementFlag::Highlight, Some(2), None);
        assert_eq!(
            rows.ops,
            [
                (1, ElementFlag::Highlight, false),
                (2, ElementFlag::Highlight, true),
                (2, ElementFlag::Highlight, false),
            ]
        );
    }
}
