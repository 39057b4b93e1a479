// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit failures.

use alloc::string::String;

/// Reasons a commit did not change the selection.
///
/// None of these leave the dropdown in a different state than before the
/// attempt; in particular the menu stays open.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// No mounted element carries the highlight flag.
    #[error("no mounted element carries the highlight")]
    NothingHighlighted,
    /// The requested position is outside the filtered sequence.
    #[error("position {index} is outside the {len} filtered candidates")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the filtered sequence.
        len: usize,
    },
    /// The candidate carries the disabled marker.
    #[error("item `{value}` is disabled")]
    Disabled {
        /// Value of the refused item.
        value: String,
    },
    /// The select guard cancelled the commit.
    #[error("selecting `{value}` was cancelled")]
    Vetoed {
        /// Value of the vetoed item.
        value: String,
    },
}
