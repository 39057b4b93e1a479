// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Names of the tracked fields, used as dirty sets by the recompute cycle.

use bitflags::bitflags;

bitflags! {
    /// A set of tracked dropdown fields.
    ///
    /// Setters insert the fields they touch; the recompute cycle tests
    /// membership only and never looks at previous values.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Fields: u32 {
        /// The full item list.
        const ITEMS = 1 << 0;
        /// The free-text query typed by the user.
        const QUERY = 1 << 1;
        /// The filtering toggle.
        const FILTERING = 1 << 2;
        /// The externally held selected value.
        const VALUE = 1 << 3;
        /// Label matching the selected value.
        const VALUE_LABEL = 1 << 4;
        /// Text shown in the input control.
        const DISPLAYED_TEXT = 1 << 5;
        /// The filtered candidate sequence.
        const FILTERED = 1 << 6;
        /// Position of the selected value in the filtered sequence.
        const SELECTED_INDEX = 1 << 7;
        /// Mounted element carrying the selected flag.
        const SELECTED_ELEMENT = 1 << 8;
        /// The renderer's mounted window.
        const VIEWPORT = 1 << 9;
        /// The keyboard cursor position.
        const HIGHLIGHT_INDEX = 1 << 10;
        /// Mounted element carrying the highlight flag.
        const HIGHLIGHT_ELEMENT = 1 << 11;
        /// Whether the menu is expanded.
        const OPEN = 1 << 12;
        /// Whether the whole control is disabled.
        const DISABLED = 1 << 13;
        /// The stay-open-on-select option.
        const STAY_OPEN = 1 << 14;
        /// The row renderer.
        const RENDER_ITEM = 1 << 15;
    }
}

impl Fields {
    /// Fields that only matter through their derived effects.
    ///
    /// A change confined to these fields does not request a host render.
    pub const PRESENTATION_ONLY: Self = Self::ITEMS
        .union(Self::VALUE)
        .union(Self::FILTERING)
        .union(Self::QUERY)
        .union(Self::VALUE_LABEL)
        .union(Self::VIEWPORT)
        .union(Self::HIGHLIGHT_INDEX)
        .union(Self::HIGHLIGHT_ELEMENT)
        .union(Self::SELECTED_INDEX)
        .union(Self::SELECTED_ELEMENT);

    /// Raw inputs, all of which are dirty in the mount cycle.
    pub const INPUTS: Self = Self::ITEMS
        .union(Self::QUERY)
        .union(Self::FILTERING)
        .union(Self::VALUE)
        .union(Self::VIEWPORT)
        .union(Self::OPEN)
        .union(Self::DISABLED)
        .union(Self::STAY_OPEN)
        .union(Self::RENDER_ITEM);
}
