// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight tracking: the keyboard cursor over the filtered sequence.
//!
//! The cursor is independent of the selection. It is always clamped into
//! `[0, len - 1]`, and sits at `0` (with no valid target) when the sequence is
//! empty. Navigation does not skip disabled candidates.

use crate::clamp_index;

/// Index after `current`, wrapping from the last candidate to the first.
#[must_use]
pub const fn next_index(current: usize, len: usize) -> usize {
    let max = len.saturating_sub(1);
    if current >= max { 0 } else { current + 1 }
}

/// Index before `current`, wrapping from the first candidate to the last.
#[must_use]
pub const fn prev_index(current: usize, len: usize) -> usize {
    let max = len.saturating_sub(1);
    if current == 0 {
        max
    } else {
        clamp_index(current - 1, len)
    }
}

/// Keyboard cursor plus the mounted element showing it.
///
/// The element is stored with the position it was resolved for. Between
/// cycles the cursor may run ahead of the flag; commits follow the flag.
#[derive(Clone, Debug)]
pub struct HighlightTracker<E> {
    index: usize,
    element: Option<(usize, E)>,
}

impl<E> Default for HighlightTracker<E> {
    fn default() -> Self {
        Self {
            index: 0,
            element: None,
        }
    }
}

impl<E: Copy + Eq> HighlightTracker<E> {
    /// Creates a tracker at index `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Mounted element currently carrying the highlight flag.
    #[must_use]
    pub fn element(&self) -> Option<E> {
        self.element.map(|(_, element)| element)
    }

    /// Filtered position of the element carrying the highlight flag.
    #[must_use]
    pub fn element_index(&self) -> Option<usize> {
        self.element.map(|(index, _)| index)
    }

    /// Moves the cursor to `index`, clamped to a sequence of `len` candidates.
    ///
    /// Returns the clamped index and whether the cursor moved.
    pub fn set(&mut self, index: usize, len: usize) -> (usize, bool) {
        let clamped = clamp_index(index, len);
        let moved = clamped != self.index;
        self.index = clamped;
        (clamped, moved)
    }

    /// Pulls the cursor back into bounds. Returns `true` if it moved.
    pub fn clamp_to(&mut self, len: usize) -> bool {
        let index = self.index;
        self.set(index, len).1
    }

    /// Records the element resolved for the current cursor position.
    ///
    /// Returns the `(previous, next)` pair when the element changed.
    pub fn update_element(&mut self, element: Option<E>) -> Option<(Option<E>, Option<E>)> {
        let previous = self.element();
        self.element = element.map(|element| (self.index, element));
        (previous != element).then_some((previous, element))
    }

    /// Forgets the element without touching any flags.
    pub(crate) fn forget_element(&mut self) -> Option<E> {
        self.element.take().map(|(_, element)| element)
    }
}
