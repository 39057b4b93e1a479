// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted by the dropdown core.

use alloc::string::String;

/// A fire-and-forget notification for the caller.
///
/// Queued by the core and drained with
/// [`Dropdown::drain_events`](crate::Dropdown::drain_events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropdownEvent {
    /// The selected value changed; carries the new value.
    ValueChanged(String),
    /// The user edited the query; carries the query text, `""` once cleared.
    UserInput(String),
    /// A commit changed the selected value; carries the new value.
    Change(String),
    /// The menu opened.
    Opened,
    /// The menu closed.
    Closed,
}

/// Answer of a select guard to a pending commit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectDecision {
    /// Let the commit go ahead.
    #[default]
    Proceed,
    /// Veto the commit; no state changes.
    Cancel,
}
