// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown controller: inputs, the recompute table, and navigation.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::highlight::{next_index, prev_index};
use crate::nav::{Key, KeyListener, KeyOutcome, MenuState};
use crate::recompute::{Rule, run_cycle, should_render};
use crate::viewport::{move_flag, resolve_element};
use crate::{
    CommitError, DropdownConfig, DropdownEvent, DropdownHost, ElementFlag, Fields,
    FilteredItems, FilteredSequence, HighlightTracker, Item, RenderedItem, ScrollAlign,
    SelectDecision, SelectionTracker, ViewportWindow, filter_indices,
};

/// Custom row renderer: `(item, position, filtered) -> row`.
pub type RenderItemFn = Box<dyn Fn(&Item, usize, FilteredItems<'_>) -> RenderedItem>;

/// Cancelable select hook consulted before every commit.
pub type SelectGuard = Box<dyn FnMut(&Item) -> SelectDecision>;

/// Headless state for a searchable, virtualized, single-select dropdown.
///
/// Setters record which fields changed; [`Dropdown::update`] then runs one
/// recompute cycle over the dependency table and reports whether the host
/// should render. Notifications are queued and read with
/// [`Dropdown::drain_events`].
///
/// The dropdown owns an optional host `H` that provides mounted elements,
/// scrolling and focus; without a host, every element lookup resolves to
/// nothing and all other state is still maintained.
pub struct Dropdown<H: DropdownHost> {
    items: Vec<Item>,
    /// List the filtered sequence still indexes into after a replacement.
    retired_items: Option<Vec<Item>>,
    query: Option<String>,
    config: DropdownConfig,
    filtered: FilteredSequence,
    selection: SelectionTracker<H::Element>,
    displayed_text: String,
    highlight: HighlightTracker<H::Element>,
    viewport: Option<ViewportWindow>,
    menu: MenuState,
    center_pending: bool,
    render_item: Option<RenderItemFn>,
    select_guard: Option<SelectGuard>,
    host: Option<H>,
    dirty: Fields,
    mounted: bool,
    events: SmallVec<[DropdownEvent; 4]>,
}

impl<H: DropdownHost> Dropdown<H> {
    /// Creates a dropdown over `items` with the default configuration.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self::with_config(items, DropdownConfig::default())
    }

    /// Creates a dropdown over `items` with `config`.
    ///
    /// The mount cycle runs immediately, so derived state is consistent on
    /// return. It emits no notifications: the initial value is not reported
    /// as [`DropdownEvent::ValueChanged`], only later changes are.
    #[must_use]
    pub fn with_config(items: Vec<Item>, config: DropdownConfig) -> Self {
        let mut dropdown = Self {
            items,
            retired_items: None,
            query: None,
            config,
            filtered: FilteredSequence::default(),
            selection: SelectionTracker::new(),
            displayed_text: String::new(),
            highlight: HighlightTracker::new(),
            viewport: None,
            menu: MenuState::Closed,
            center_pending: false,
            render_item: None,
            select_guard: None,
            host: None,
            dirty: Fields::INPUTS,
            mounted: false,
            events: SmallVec::new(),
        };
        dropdown.update();
        dropdown
    }

    // Recompute cycle.

    fn rules() -> [Rule<Self>; 10] {
        [
            Rule::new("value-changed", Fields::VALUE, Self::notify_value_changed),
            Rule::new("user-input", Fields::QUERY, Self::notify_user_input),
            Rule::new(
                "filter",
                Fields::ITEMS | Fields::QUERY | Fields::FILTERING,
                Self::recompute_filtered,
            ),
            Rule::new(
                "value-label",
                Fields::VALUE | Fields::ITEMS,
                Self::recompute_value_label,
            ),
            Rule::new(
                "displayed-text",
                Fields::QUERY | Fields::VALUE_LABEL,
                Self::recompute_displayed_text,
            ),
            Rule::new(
                "selected-index",
                Fields::VALUE | Fields::FILTERED,
                Self::recompute_selected_index,
            ),
            Rule::new(
                "selected-element",
                Fields::SELECTED_INDEX | Fields::VIEWPORT,
                Self::sync_selected_element,
            ),
            Rule::new("highlight-reset", Fields::FILTERED, Self::reset_highlight),
            Rule::new(
                "highlight-clamp",
                Fields::HIGHLIGHT_INDEX | Fields::FILTERED,
                Self::clamp_highlight,
            ),
            Rule::new(
                "highlight-element",
                Fields::HIGHLIGHT_INDEX | Fields::VIEWPORT | Fields::FILTERED,
                Self::sync_highlight_element,
            ),
        ]
    }

    fn notify_value_changed(&mut self, _dirty: &mut Fields) {
        if self.mounted {
            let value = String::from(self.selection.value());
            self.events.push(DropdownEvent::ValueChanged(value));
        }
    }

    fn notify_user_input(&mut self, _dirty: &mut Fields) {
        // The mount cycle sees the initial unset query; that is not input.
        if self.mounted {
            let text = self.query.clone().unwrap_or_default();
            self.events.push(DropdownEvent::UserInput(text));
        }
    }

    fn recompute_filtered(&mut self, dirty: &mut Fields) {
        let next = filter_indices(&self.items, self.query.as_deref(), self.config.filtering);
        if next.replaces(&self.filtered, dirty.contains(Fields::ITEMS)) {
            dirty.insert(Fields::FILTERED);
        }
        self.filtered = next;
        self.retired_items = None;
    }

    fn recompute_value_label(&mut self, dirty: &mut Fields) {
        if self.selection.update_label(&self.items) {
            dirty.insert(Fields::VALUE_LABEL);
        }
    }

    fn recompute_displayed_text(&mut self, dirty: &mut Fields) {
        let next = self.query.as_deref().unwrap_or(self.selection.label());
        if self.displayed_text != next {
            self.displayed_text.clear();
            self.displayed_text.push_str(next);
            dirty.insert(Fields::DISPLAYED_TEXT);
        }
    }

    fn recompute_selected_index(&mut self, dirty: &mut Fields) {
        if self.selection.update_index(self.filtered.view(&self.items)) {
            dirty.insert(Fields::SELECTED_INDEX);
        }
    }

    fn sync_selected_element(&mut self, dirty: &mut Fields) {
        let resolved = self
            .selection
            .index()
            .and_then(|index| resolve_element(index, self.viewport, self.host.as_ref()));
        if let Some((from, to)) = self.selection.update_element(resolved) {
            if let Some(host) = self.host.as_mut() {
                move_flag(host, ElementFlag::Selected, from, to);
            }
            dirty.insert(Fields::SELECTED_ELEMENT);
        }
    }

    fn reset_highlight(&mut self, dirty: &mut Fields) {
        if self.apply_highlight(0, ScrollAlign::Start) {
            dirty.insert(Fields::HIGHLIGHT_INDEX);
        }
    }

    fn clamp_highlight(&mut self, dirty: &mut Fields) {
        if self.highlight.clamp_to(self.filtered.len()) {
            dirty.insert(Fields::HIGHLIGHT_INDEX);
        }
    }

    fn sync_highlight_element(&mut self, dirty: &mut Fields) {
        let resolved = if self.filtered.is_empty() {
            None
        } else {
            resolve_element(self.highlight.index(), self.viewport, self.host.as_ref())
        };
        if let Some((from, to)) = self.highlight.update_element(resolved) {
            if let Some(host) = self.host.as_mut() {
                move_flag(host, ElementFlag::Highlight, from, to);
            }
            dirty.insert(Fields::HIGHLIGHT_ELEMENT);
        }
    }

    /// Clamps and stores the cursor, then asks the host to scroll to it.
    ///
    /// Returns `true` if the cursor moved.
    fn apply_highlight(&mut self, index: usize, align: ScrollAlign) -> bool {
        let len = self.filtered.len();
        let (clamped, moved) = self.highlight.set(index, len);
        if len > 0
            && let Some(host) = self.host.as_mut()
        {
            host.scroll_to_index(clamped, align);
        }
        moved
    }

    /// Returns `true` if changes are waiting for [`Dropdown::update`].
    #[must_use]
    pub fn needs_update(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Runs one recompute cycle over everything that changed since the last one.
    ///
    /// Returns whether the host should render. A cycle with nothing pending is
    /// a forced pass and always asks for a render.
    pub fn update(&mut self) -> bool {
        let mut dirty = core::mem::take(&mut self.dirty);
        let fired = run_cycle(&Self::rules(), self, &mut dirty);
        self.mounted = true;
        let render = should_render(dirty);
        tracing::trace!(
            target: "understory_dropdown::recompute",
            ?dirty,
            fired,
            render,
            "recompute cycle"
        );
        render
    }

    /// Runs deferred work scheduled by earlier transitions.
    ///
    /// Opening the menu schedules centering the highlight on the selected
    /// candidate; hosts call this once the renderer had a chance to report its
    /// window. Returns `true` if anything ran.
    pub fn tick(&mut self) -> bool {
        if !core::mem::take(&mut self.center_pending) || !self.menu.is_open() {
            return false;
        }
        let target = self.selection.index().unwrap_or(0);
        if self.apply_highlight(target, ScrollAlign::Center) {
            self.dirty.insert(Fields::HIGHLIGHT_INDEX);
        }
        true
    }

    /// Drains queued notifications in emission order.
    pub fn drain_events(&mut self) -> impl Iterator<Item = DropdownEvent> + '_ {
        self.events.drain(..)
    }

    // Caller properties.

    /// Replaces the full item list.
    ///
    /// Until the next cycle, the filtered candidates and commits keep
    /// addressing the list that was last rendered.
    pub fn set_items(&mut self, items: Vec<Item>) {
        let previous = core::mem::replace(&mut self.items, items);
        if self.retired_items.is_none() {
            self.retired_items = Some(previous);
        }
        self.dirty.insert(Fields::ITEMS);
    }

    /// The list the filtered sequence was computed from.
    fn rendered_list(&self) -> &[Item] {
        self.retired_items.as_deref().unwrap_or(&self.items)
    }

    /// Sets the selected value; `None` means `""` (no selection).
    ///
    /// Setting the current value again is a no-op and emits nothing.
    pub fn set_value(&mut self, value: Option<&str>) {
        if self.selection.set_value(value) {
            self.dirty.insert(Fields::VALUE);
        }
    }

    /// Enables or disables filtering by the typed query.
    pub fn set_filtering(&mut self, enabled: bool) {
        if self.config.filtering != enabled {
            self.config.filtering = enabled;
            self.dirty.insert(Fields::FILTERING);
        }
    }

    /// Keeps the menu open after successful commits.
    pub fn set_stay_open_on_select(&mut self, stay_open: bool) {
        if self.config.stay_open_on_select != stay_open {
            self.config.stay_open_on_select = stay_open;
            self.dirty.insert(Fields::STAY_OPEN);
        }
    }

    /// Disables the control. Disabling closes the menu and blocks opening.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.config.disabled != disabled {
            self.config.disabled = disabled;
            self.dirty.insert(Fields::DISABLED);
        }
        if disabled {
            self.hide();
        }
    }

    /// Opens or closes the menu.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Installs a custom row renderer.
    pub fn set_render_item(
        &mut self,
        render: impl Fn(&Item, usize, FilteredItems<'_>) -> RenderedItem + 'static,
    ) {
        self.render_item = Some(Box::new(render));
        self.dirty.insert(Fields::RENDER_ITEM);
    }

    /// Restores the default row renderer.
    pub fn clear_render_item(&mut self) {
        if self.render_item.take().is_some() {
            self.dirty.insert(Fields::RENDER_ITEM);
        }
    }

    /// Installs the select guard consulted before every commit.
    pub fn set_select_guard(&mut self, guard: impl FnMut(&Item) -> SelectDecision + 'static) {
        self.select_guard = Some(Box::new(guard));
    }

    /// Removes the select guard; commits then always proceed.
    pub fn clear_select_guard(&mut self) {
        self.select_guard = None;
    }

    /// Records text typed into the input.
    pub fn input_text(&mut self, text: &str) {
        if self.query.as_deref() != Some(text) {
            self.query = Some(String::from(text));
            self.dirty.insert(Fields::QUERY);
        }
    }

    /// Takes a range report from the renderer, using `-1` for "nothing mounted".
    pub fn report_range(&mut self, first: i64, last: i64) {
        self.set_viewport(ViewportWindow::from_raw(first, last));
    }

    /// Sets the mounted window.
    ///
    /// Every report counts as a change: the renderer may have remounted rows
    /// even when the bounds are the same.
    pub fn set_viewport(&mut self, viewport: Option<ViewportWindow>) {
        self.viewport = viewport;
        self.dirty.insert(Fields::VIEWPORT);
    }

    /// Attaches a host, returning the previous one with its flags cleared.
    pub fn attach_host(&mut self, mut host: H) -> Option<H> {
        let previous = self.detach_host();
        if self.menu.is_open() {
            host.set_key_listener(true);
        }
        self.host = Some(host);
        self.dirty.insert(Fields::VIEWPORT);
        previous
    }

    /// Detaches the host after clearing every flag the core set on it.
    pub fn detach_host(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        move_flag(
            &mut host,
            ElementFlag::Selected,
            self.selection.forget_element(),
            None,
        );
        move_flag(
            &mut host,
            ElementFlag::Highlight,
            self.highlight.forget_element(),
            None,
        );
        if self.menu.is_open() {
            host.set_key_listener(false);
        }
        self.dirty
            .insert(Fields::VIEWPORT | Fields::SELECTED_ELEMENT | Fields::HIGHLIGHT_ELEMENT);
        Some(host)
    }

    /// The attached host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable access to the attached host, if any.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    // Navigation.

    /// Opens the menu and focuses the input.
    ///
    /// Refused while disabled. Attaches the keyboard listener and schedules a
    /// centering pass on the selected candidate for the next [`Dropdown::tick`].
    pub fn show(&mut self) {
        if self.config.disabled {
            tracing::debug!(target: "understory_dropdown::nav", "refusing to open a disabled dropdown");
            return;
        }
        if let Some(host) = self.host.as_mut() {
            host.focus_input();
        }
        if self.menu.is_open() {
            return;
        }
        self.menu = MenuState::Open(KeyListener::attach());
        if let Some(host) = self.host.as_mut() {
            host.set_key_listener(true);
        }
        self.center_pending = true;
        self.dirty.insert(Fields::OPEN);
        self.events.push(DropdownEvent::Opened);
        tracing::debug!(target: "understory_dropdown::nav", "menu opened");
    }

    /// Closes the menu: blurs the input, clears the query, detaches the
    /// keyboard listener.
    pub fn hide(&mut self) {
        let Some(listener) = self.menu.close() else {
            return;
        };
        if let Some(host) = self.host.as_mut() {
            host.blur_input();
        }
        self.clear_query();
        self.release_key_listener(listener);
        self.center_pending = false;
        self.dirty.insert(Fields::OPEN);
        self.events.push(DropdownEvent::Closed);
        tracing::debug!(target: "understory_dropdown::nav", "menu closed");
    }

    /// Consumes the listener token taken out of [`MenuState::Open`].
    fn release_key_listener(&mut self, _listener: KeyListener) {
        if let Some(host) = self.host.as_mut() {
            host.set_key_listener(false);
        }
    }

    /// Clears the query and the selected value.
    pub fn clear(&mut self) {
        self.clear_query();
        if self.selection.set_value(None) {
            self.dirty.insert(Fields::VALUE);
            self.events.push(DropdownEvent::Change(String::new()));
        }
    }

    fn clear_query(&mut self) {
        if self.query.take().is_some() {
            self.dirty.insert(Fields::QUERY);
        }
    }

    /// Handles a key while the menu is open.
    ///
    /// Keys arriving while the menu is closed find no listener and are
    /// ignored.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if !self.menu.is_open() {
            return KeyOutcome::Ignored;
        }
        let len = self.filtered.len();
        match key {
            Key::ArrowDown => {
                self.move_highlight(next_index(self.highlight.index(), len));
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.move_highlight(prev_index(self.highlight.index(), len));
                KeyOutcome::Handled
            }
            Key::Enter => {
                if let Err(error) = self.commit_highlighted() {
                    tracing::debug!(target: "understory_dropdown::nav", %error, "enter did not commit");
                }
                KeyOutcome::Handled
            }
            Key::Space => KeyOutcome::Handled,
            Key::Other => KeyOutcome::Ignored,
        }
    }

    fn move_highlight(&mut self, index: usize) {
        if self.apply_highlight(index, ScrollAlign::Nearest) {
            self.dirty.insert(Fields::HIGHLIGHT_INDEX);
        }
    }

    /// Commits the candidate whose element carries the highlight flag.
    ///
    /// This is the position the flag was last resolved for, which trails the
    /// cursor until the next [`Dropdown::update`].
    pub fn commit_highlighted(&mut self) -> Result<(), CommitError> {
        let position = self
            .highlight
            .element_index()
            .ok_or(CommitError::NothingHighlighted)?;
        self.commit_at(position)
    }

    /// Commits the candidate at `position`, as a pointer activation does.
    pub fn activate(&mut self, position: usize) -> Result<(), CommitError> {
        self.commit_at(position)
    }

    fn commit_at(&mut self, position: usize) -> Result<(), CommitError> {
        let item = self
            .filtered_items()
            .get(position)
            .cloned()
            .ok_or(CommitError::OutOfRange {
                index: position,
                len: self.filtered.len(),
            })?;
        // The row's disabled marker comes from the renderer.
        if self.rendered_item(position).is_some_and(|row| row.disabled) {
            tracing::debug!(
                target: "understory_dropdown::nav",
                value = %item.value,
                "refusing to commit a disabled item"
            );
            return Err(CommitError::Disabled { value: item.value });
        }

        let guard = &mut self.select_guard;
        let changed = self
            .selection
            .commit(&item, |candidate| {
                guard
                    .as_mut()
                    .map_or(SelectDecision::Proceed, |select| select(candidate))
            })
            .inspect_err(|error| {
                tracing::debug!(target: "understory_dropdown::nav", %error, "commit vetoed");
            })?;

        if changed {
            self.dirty.insert(Fields::VALUE);
            self.events.push(DropdownEvent::Change(item.value.clone()));
        }
        self.clear_query();
        tracing::debug!(
            target: "understory_dropdown::nav",
            value = %item.value,
            changed,
            "committed"
        );
        if !self.config.stay_open_on_select {
            self.hide();
        }
        Ok(())
    }

    // Derived state.

    /// The full item list.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The typed query, `None` when the user has not typed in this interaction.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The selected value, `""` meaning no selection.
    #[must_use]
    pub fn value(&self) -> &str {
        self.selection.value()
    }

    /// Label resolved for the selected value.
    #[must_use]
    pub fn value_label(&self) -> &str {
        self.selection.label()
    }

    /// Text shown in the input control.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        &self.displayed_text
    }

    /// The filtered candidates.
    #[must_use]
    pub fn filtered_items(&self) -> FilteredItems<'_> {
        self.filtered.view(self.rendered_list())
    }

    /// Returns `true` when no candidate survived filtering.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Position of the selected value in the filtered sequence.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Element carrying the selected flag.
    #[must_use]
    pub fn selected_element(&self) -> Option<H::Element> {
        self.selection.element()
    }

    /// The keyboard cursor.
    #[must_use]
    pub fn highlight_index(&self) -> usize {
        self.highlight.index()
    }

    /// Element carrying the highlight flag.
    #[must_use]
    pub fn highlighted_element(&self) -> Option<H::Element> {
        self.highlight.element()
    }

    /// The renderer's last reported window.
    #[must_use]
    pub fn viewport(&self) -> Option<ViewportWindow> {
        self.viewport
    }

    /// Returns `true` if the menu is expanded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    /// The navigation state.
    #[must_use]
    pub fn menu_state(&self) -> &MenuState {
        &self.menu
    }

    /// Returns `true` if the control is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    /// Row description for the candidate at `position`.
    #[must_use]
    pub fn rendered_item(&self, position: usize) -> Option<RenderedItem> {
        let view = self.filtered_items();
        let item = view.get(position)?;
        Some(match &self.render_item {
            Some(render) => render(item, position, view),
            None => RenderedItem::from_item(item),
        })
    }
}

impl<H: DropdownHost> Drop for Dropdown<H> {
    fn drop(&mut self) {
        if let Some(listener) = self.menu.close() {
            self.release_key_listener(listener);
        }
    }
}

impl<H: DropdownHost> fmt::Debug for Dropdown<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("items", &self.items.len())
            .field("query", &self.query)
            .field("config", &self.config)
            .field("filtered", &self.filtered.len())
            .field("selection", &self.selection)
            .field("displayed_text", &self.displayed_text)
            .field("highlight", &self.highlight)
            .field("viewport", &self.viewport)
            .field("menu", &self.menu)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
