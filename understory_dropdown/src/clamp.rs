// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range clamping helpers.

/// Clamps `value` into `[min, max]`.
///
/// A missing bound is treated as unbounded on that side. The upper bound is
/// checked first: a value above `max` yields `max`, otherwise a value below
/// `min` yields `min`.
pub fn clamp<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> T {
    if let Some(max) = max
        && value > max
    {
        return max;
    }
    if let Some(min) = min
        && value < min
    {
        return min;
    }
    value
}

/// Clamps an index into `[0, len - 1]`.
///
/// An empty range yields `0`, which callers must treat as "no valid target".
#[must_use]
pub const fn clamp_index(index: usize, len: usize) -> usize {
    let max = len.saturating_sub(1);
    if index > max { max } else { index }
}
