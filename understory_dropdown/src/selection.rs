// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection tracking: value, matched label, filtered position and element.

use alloc::string::String;

use crate::{CommitError, FilteredItems, Item, SelectDecision};

/// Position of the first candidate whose value equals `value`.
///
/// Linear scan; with duplicate values the first match wins.
#[must_use]
pub fn resolve_selected_index(filtered: FilteredItems<'_>, value: &str) -> Option<usize> {
    filtered.iter().position(|item| item.value == value)
}

/// Label of the first item in the full list whose value equals `value`.
#[must_use]
pub fn matched_label<'a>(items: &'a [Item], value: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| item.value == value)
        .map(Item::label)
}

/// Tracks the committed selection and everything derived from it.
///
/// `E` is the host's element handle type.
#[derive(Clone, Debug)]
pub struct SelectionTracker<E> {
    value: String,
    label: String,
    index: Option<usize>,
    element: Option<E>,
}

impl<E> Default for SelectionTracker<E> {
    fn default() -> Self {
        Self {
            value: String::new(),
            label: String::new(),
            index: None,
            element: None,
        }
    }
}

impl<E: Copy + Eq> SelectionTracker<E> {
    /// Creates a tracker with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected value, `""` meaning no selection.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Label last resolved for the selected value.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position of the selected value in the filtered sequence, if present.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Mounted element currently carrying the selected flag.
    #[must_use]
    pub const fn element(&self) -> Option<E> {
        self.element
    }

    /// Replaces the value, coercing `None` to `""`.
    ///
    /// Returns `false` and changes nothing if the value is unchanged.
    pub fn set_value(&mut self, value: Option<&str>) -> bool {
        let value = value.unwrap_or("");
        if self.value == value {
            return false;
        }
        self.value.clear();
        self.value.push_str(value);
        true
    }

    /// Re-resolves the label against the full item list.
    ///
    /// An empty value clears the label. Otherwise a missing match, or a match
    /// with an empty label, keeps the previous label so the display does not
    /// flash empty while the item list is being replaced. Returns `true` if
    /// the label changed.
    pub fn update_label(&mut self, items: &[Item]) -> bool {
        let next = if self.value.is_empty() {
            ""
        } else {
            match matched_label(items, &self.value) {
                Some(label) if !label.is_empty() => label,
                _ => return false,
            }
        };
        if self.label == next {
            return false;
        }
        self.label.clear();
        self.label.push_str(next);
        true
    }

    /// Re-resolves the filtered position. Returns `true` if it changed.
    pub fn update_index(&mut self, filtered: FilteredItems<'_>) -> bool {
        let index = resolve_selected_index(filtered, &self.value);
        let changed = index != self.index;
        self.index = index;
        changed
    }

    /// Records the element now showing the selection.
    ///
    /// Returns the `(previous, next)` pair when the element changed so the
    /// caller can move the visual flag.
    pub fn update_element(&mut self, element: Option<E>) -> Option<(Option<E>, Option<E>)> {
        if element == self.element {
            return None;
        }
        let previous = core::mem::replace(&mut self.element, element);
        Some((previous, element))
    }

    /// Forgets the element without touching any flags.
    pub(crate) fn forget_element(&mut self) -> Option<E> {
        self.element.take()
    }

    /// Commits `item` as the new selection.
    ///
    /// `guard` sees the candidate first and may cancel, in which case nothing
    /// changes. This performs no disabled check. Returns whether the value
    /// actually changed.
    pub fn commit(
        &mut self,
        item: &Item,
        guard: impl FnOnce(&Item) -> SelectDecision,
    ) -> Result<bool, CommitError> {
        if guard(item) == SelectDecision::Cancel {
            return Err(CommitError::Vetoed {
                value: item.value.clone(),
            });
        }
        Ok(self.set_value(Some(&item.value)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{SelectionTracker, matched_label, resolve_selected_index};
    use crate::{CommitError, FilteredSequence, Item, SelectDecision, filter_indices};

    fn items() -> Vec<Item> {
        vec![
            Item::new("a").with_label("Apple"),
            Item::new("b").with_label("Banana"),
            Item::new("b").with_label("Blueberry"),
            Item::new("x"),
        ]
    }

    #[test]
    fn first_match_wins_for_duplicates() {
        let items = items();
        let seq = FilteredSequence::passthrough(items.len());
        assert_eq!(resolve_selected_index(seq.view(&items), "b"), Some(1));
        assert_eq!(matched_label(&items, "b"), Some("Banana"));
        assert_eq!(resolve_selected_index(seq.view(&items), "zzz"), None);
    }

    #[test]
    fn index_is_relative_to_the_filtered_sequence() {
        let items = items();
        let seq = filter_indices(&items, Some("blue"), true);
        // Only the duplicate survives, so it wins this time.
        assert_eq!(resolve_selected_index(seq.view(&items), "b"), Some(0));
        assert_eq!(resolve_selected_index(seq.view(&items), "a"), None);
    }

    #[test]
    fn none_coerces_to_empty_and_redundant_sets_are_ignored() {
        let mut sel = SelectionTracker::<u32>::new();
        assert!(!sel.set_value(None));
        assert!(sel.set_value(Some("a")));
        assert!(!sel.set_value(Some("a")));
        assert!(sel.set_value(None));
        assert_eq!(sel.value(), "");
    }

    #[test]
    fn label_is_kept_while_no_match_exists() {
        let items = items();
        let mut sel = SelectionTracker::<u32>::new();
        sel.set_value(Some("a"));
        assert!(sel.update_label(&items));
        assert_eq!(sel.label(), "Apple");

        // The new list no longer holds "a"; keep showing the old label.
        assert!(!sel.update_label(&[Item::new("q").with_label("Quince")]));
        assert_eq!(sel.label(), "Apple");

        // A matching item without a label also keeps the old label.
        sel.set_value(Some("x"));
        assert!(!sel.update_label(&items));
        assert_eq!(sel.label(), "Apple");

        sel.set_value(None);
        assert!(sel.update_label(&items));
        assert_eq!(sel.label(), "");
    }

    #[test]
    fn element_updates_report_swaps() {
        let mut sel = SelectionTracker::<u32>::new();
        assert_eq!(sel.update_element(None), None);
        assert_eq!(sel.update_element(Some(4)), Some((None, Some(4))));
        assert_eq!(sel.update_element(Some(4)), None);
        assert_eq!(sel.update_element(Some(5)), Some((Some(4), Some(5))));
    }

    #[test]
    fn vetoed_commit_changes_nothing() {
        let mut sel = SelectionTracker::<u32>::new();
        sel.set_value(Some("a"));
        let banana = Item::new("b").with_label("Banana");
        let result = sel.commit(&banana, |_| SelectDecision::Cancel);
        assert_eq!(
            result,
            Err(CommitError::Vetoed {
                value: "b".into()
            })
        );
        assert_eq!(sel.value(), "a");

        assert_eq!(sel.commit(&banana, |_| SelectDecision::Proceed), Ok(true));
        assert_eq!(sel.value(), "b");
        // Re-committing the current value succeeds without a change.
        assert_eq!(sel.commit(&banana, |_| SelectDecision::Proceed), Ok(false));
    }
}
