// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown candidates and their default row description.

use alloc::string::String;

/// One candidate entry of a dropdown.
///
/// `value` is the identity key used for selection. Uniqueness is assumed but
/// not enforced: with duplicate values every lookup resolves to the first
/// matching item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Item {
    /// Identity key of this candidate.
    pub value: String,
    /// Display text. A missing label behaves like an empty one.
    pub label: Option<String>,
    /// Whether this candidate may be committed.
    pub disabled: bool,
}

impl Item {
    /// Creates an enabled item with the given value and no label.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            disabled: false,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the disabled marker.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns the label, or `""` when there is none.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// Host-facing description of one rendered menu row.
///
/// This is what the default row renderer produces; custom renderers installed
/// with [`Dropdown::set_render_item`](crate::Dropdown::set_render_item) may
/// rewrite any part of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedItem {
    /// Value the row commits when activated.
    pub value: String,
    /// Text shown in the row.
    pub text: String,
    /// Whether the row carries the disabled marker.
    pub disabled: bool,
}

impl RenderedItem {
    /// Default row: the item's value, its label as text, and its disabled marker.
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            value: item.value.clone(),
            text: String::from(item.label()),
            disabled: item.disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, RenderedItem};

    #[test]
    fn missing_label_reads_as_empty() {
        let item = Item::new("a");
        assert_eq!(item.label(), "");
        assert_eq!(item.with_label("Apple").label(), "Apple");
    }

    #[test]
    fn default_row_mirrors_item() {
        let item = Item::new("b").with_label("Banana").with_disabled(true);
        let row = RenderedItem::from_item(&item);
        assert_eq!(row.value, "b");
        assert_eq!(row.text, "Banana");
        assert!(row.disabled);
    }
}
