// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency-table recompute cycle.
//!
//! A cycle walks an ordered list of [`Rule`]s against a mutable dirty set.
//! A rule fires when its trigger set intersects the dirty set; a firing rule
//! may insert its own outputs, which makes later rules in the same pass see
//! them. Rules run in topological order, so one pass is enough.
//!
//! ```rust
//! use understory_dropdown::{Fields, Rule, run_cycle};
//!
//! #[derive(Default)]
//! struct Counter {
//!     raw: u32,
//!     doubled: u32,
//! }
//!
//! fn double(state: &mut Counter, dirty: &mut Fields) {
//!     state.doubled = state.raw * 2;
//!     dirty.insert(Fields::FILTERED);
//! }
//!
//! let rules = [Rule::new("double", Fields::ITEMS, double)];
//! let mut state = Counter { raw: 21, ..Counter::default() };
//! let mut dirty = Fields::ITEMS;
//! assert_eq!(run_cycle(&rules, &mut state, &mut dirty), 1);
//! assert_eq!(state.doubled, 42);
//! assert!(dirty.contains(Fields::FILTERED));
//! ```

use core::fmt;

use crate::Fields;

/// One derived-field rule: recompute when any trigger is dirty.
pub struct Rule<S> {
    /// Name used in traces.
    pub name: &'static str,
    /// Fields whose change makes this rule fire.
    pub triggers: Fields,
    /// Recompute step; inserts changed outputs into the dirty set.
    pub compute: fn(&mut S, &mut Fields),
}

impl<S> Rule<S> {
    /// Creates a rule.
    pub const fn new(
        name: &'static str,
        triggers: Fields,
        compute: fn(&mut S, &mut Fields),
    ) -> Self {
        Self {
            name,
            triggers,
            compute,
        }
    }

    /// Returns `true` if this rule fires for `dirty`.
    #[must_use]
    pub fn fires_for(&self, dirty: Fields) -> bool {
        self.triggers.intersects(dirty)
    }
}

impl<S> Clone for Rule<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Rule<S> {}

impl<S> fmt::Debug for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

/// Runs one cycle of `rules` over `state`.
///
/// On return `dirty` holds the starting fields plus every output the rules
/// marked. Returns how many rules fired.
pub fn run_cycle<S>(rules: &[Rule<S>], state: &mut S, dirty: &mut Fields) -> usize {
    let mut fired = 0;
    for rule in rules {
        if rule.fires_for(*dirty) {
            (rule.compute)(state, dirty);
            fired += 1;
            tracing::trace!(
                target: "understory_dropdown::recompute",
                rule = rule.name,
                dirty = ?*dirty,
                "rule fired"
            );
        }
    }
    fired
}

/// Whether a cycle that ended with `dirty` warrants a host render.
///
/// An empty set is an explicit forced pass and always renders; otherwise any
/// field outside [`Fields::PRESENTATION_ONLY`] does.
#[must_use]
pub fn should_render(dirty: Fields) -> bool {
    dirty.is_empty() || !dirty.difference(Fields::PRESENTATION_ONLY).is_empty()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Rule, run_cycle, should_render};
    use crate::Fields;

    #[derive(Default)]
    struct Log {
        ran: Vec<&'static str>,
    }

    fn first(state: &mut Log, dirty: &mut Fields) {
        state.ran.push("first");
        dirty.insert(Fields::FILTERED);
    }

    fn second(state: &mut Log, _: &mut Fields) {
        state.ran.push("second");
    }

    fn early(state: &mut Log, _: &mut Fields) {
        state.ran.push("early");
    }

    #[test]
    fn outputs_cascade_forward_only() {
        // `early` listens to FILTERED but runs before `first` marks it.
        let rules = [
            Rule::new("early", Fields::FILTERED, early),
            Rule::new("first", Fields::ITEMS, first),
            Rule::new("second", Fields::FILTERED, second),
        ];
        let mut log = Log::default();
        let mut dirty = Fields::ITEMS;
        assert_eq!(run_cycle(&rules, &mut log, &mut dirty), 2);
        assert_eq!(log.ran, ["first", "second"]);
        assert_eq!(dirty, Fields::ITEMS | Fields::FILTERED);
    }

    #[test]
    fn clean_cycle_fires_nothing() {
        let rules = [Rule::new("first", Fields::ITEMS, first)];
        let mut log = Log::default();
        let mut dirty = Fields::empty();
        assert_eq!(run_cycle(&rules, &mut log, &mut dirty), 0);
        assert!(log.ran.is_empty());
    }

    #[test]
    fn render_decision() {
        assert!(should_render(Fields::empty()));
        assert!(!should_render(Fields::ITEMS | Fields::VIEWPORT));
        assert!(should_render(Fields::ITEMS | Fields::FILTERED));
        assert!(should_render(Fields::OPEN));
    }
}
