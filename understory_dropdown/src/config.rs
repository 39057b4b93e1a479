// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time options.

/// Options for a [`Dropdown`](crate::Dropdown).
///
/// Every field can also be changed later through the matching setter on the
/// dropdown, which marks the field dirty for the next recompute cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DropdownConfig {
    /// Filter candidates by the typed query.
    ///
    /// When `false`, typing only changes the displayed text.
    pub filtering: bool,
    /// Keep the menu open after a successful commit.
    pub stay_open_on_select: bool,
    /// Disable the whole control; forces the menu closed.
    pub disabled: bool,
}
