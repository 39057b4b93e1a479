// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter engine: derives the candidate sequence from items and a query.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Item;

/// Ordered subsequence of an item list, stored as indices into that list.
///
/// A pass-through sequence covers the whole list in its original order and
/// shares the list's identity; a filtered sequence is a fresh result every
/// time it is computed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilteredSequence {
    indices: Vec<usize>,
    passthrough: bool,
}

impl FilteredSequence {
    /// Creates the identity sequence over a list of `len` items.
    #[must_use]
    pub fn passthrough(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
            passthrough: true,
        }
    }

    /// Number of candidates in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no candidate survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if this sequence is the unfiltered item list.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Indices into the source item list, in sequence order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Source index of the candidate at `position`.
    #[must_use]
    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Whether replacing `previous` with `self` changes the sequence identity.
    ///
    /// Two pass-through sequences over an unchanged list are the same sequence;
    /// anything involving a filtered result is a new one.
    #[must_use]
    pub fn replaces(&self, previous: &Self, items_changed: bool) -> bool {
        items_changed || !self.passthrough || !previous.passthrough
    }

    /// Binds this sequence to its source list for item access.
    #[must_use]
    pub fn view<'a>(&'a self, items: &'a [Item]) -> FilteredItems<'a> {
        FilteredItems {
            items,
            sequence: self,
        }
    }
}

/// Borrowed view of a [`FilteredSequence`] over its source list.
#[derive(Clone, Copy, Debug)]
pub struct FilteredItems<'a> {
    items: &'a [Item],
    sequence: &'a FilteredSequence,
}

impl<'a> FilteredItems<'a> {
    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Candidate at `position` within the filtered sequence.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&'a Item> {
        let items = self.items;
        self.sequence
            .source_index(position)
            .and_then(|index| items.get(index))
    }

    /// Iterates candidates in sequence order.
    pub fn iter(self) -> impl Iterator<Item = &'a Item> {
        let items = self.items;
        self.sequence
            .indices
            .iter()
            .filter_map(move |&index| items.get(index))
    }

    /// The underlying sequence.
    #[must_use]
    pub fn sequence(&self) -> &'a FilteredSequence {
        self.sequence
    }
}

/// Trims and lowercases `text` for matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Filters `items` by a case-insensitive substring match of `query` against
/// each item's label.
///
/// With `enabled == false`, or a query that is missing or blank after
/// trimming, the result is the pass-through sequence. Relative order is kept
/// and there is no result limit.
#[must_use]
pub fn filter_indices(items: &[Item], query: Option<&str>, enabled: bool) -> FilteredSequence {
    let needle = query.map(normalize).unwrap_or_default();
    if !enabled || needle.is_empty() {
        return FilteredSequence::passthrough(items.len());
    }
    let indices = items
        .iter()
        .enumerate()
        .filter(|(_, item)| normalize(item.label()).contains(needle.as_str()))
        .map(|(index, _)| index)
        .collect();
    FilteredSequence {
        indices,
        passthrough: false,
    }
}

/// Like [`filter_indices`], resolved to item references.
#[must_use]
pub fn filter_items<'a>(items: &'a [Item], query: Option<&str>, enabled: bool) -> Vec<&'a Item> {
    filter_indices(items, query, enabled)
        .indices
        .into_iter()
        .filter_map(|index| items.get(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FilteredSequence, filter_indices, filter_items};
    use crate::Item;

    fn fruit() -> Vec<Item> {
        vec![
            Item::new("a").with_label("Apple"),
            Item::new("b").with_label("Banana"),
            Item::new("c").with_label("  Cherry "),
            Item::new("d"),
        ]
    }

    fn values<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|item| item.value.as_str()).collect()
    }

    #[test]
    fn blank_query_or_disabled_filtering_passes_through() {
        let items = fruit();
        for query in [None, Some(""), Some("   ")] {
            let seq = filter_indices(&items, query, true);
            assert!(seq.is_passthrough());
            assert_eq!(seq.indices(), &[0, 1, 2, 3]);
        }
        let seq = filter_indices(&items, Some("zzz"), false);
        assert!(seq.is_passthrough());
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn match_is_case_insensitive_and_trimmed() {
        let items = fruit();
        assert_eq!(values(&filter_items(&items, Some("  AN "), true)), ["b"]);
        assert_eq!(values(&filter_items(&items, Some("cherry"), true)), ["c"]);
        assert_eq!(values(&filter_items(&items, Some("p"), true)), ["a"]);
    }

    #[test]
    fn missing_label_never_matches_a_non_blank_query() {
        let items = fruit();
        let seq = filter_indices(&items, Some("d"), true);
        assert!(!seq.is_passthrough());
        assert!(seq.is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let items = vec![
            Item::new("1").with_label("tan"),
            Item::new("2").with_label("plain"),
            Item::new("3").with_label("Andes"),
        ];
        let seq = filter_indices(&items, Some("an"), true);
        assert_eq!(seq.indices(), &[0, 2]);
        let view = seq.view(&items);
        assert_eq!(view.get(1).map(|item| item.value.as_str()), Some("3"));
        assert!(view.get(2).is_none());
    }

    #[test]
    fn identity_changes_follow_filtered_results() {
        let old = FilteredSequence::passthrough(3);
        let same = FilteredSequence::passthrough(3);
        assert!(!same.replaces(&old, false));
        assert!(same.replaces(&old, true));

        let items = fruit();
        let filtered = filter_indices(&items, Some("a"), true);
        // A fresh filtered result is a new sequence even with equal contents.
        assert!(filtered.replaces(&filtered.clone(), false));
        assert!(same.replaces(&filtered, false));
    }
}
