// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Searchable dropdown over a simulated fixed-height windowed renderer.
//!
//! This example shows how a host wires `understory_dropdown` to a renderer
//! that mounts only the rows inside its viewport:
//! - the renderer reports its mounted range after every scroll or re-render,
//! - the dropdown maps global indices into that range and flags rows,
//! - the host loops `update` until no new range report is pending.
//!
//! Run:
//! - `cargo run -p understory_demos --example searchable_dropdown`
//! - `RUST_LOG=understory_dropdown=trace cargo run -p understory_demos --example searchable_dropdown`

use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;
use understory_dropdown::{
    Dropdown, DropdownConfig, DropdownHost, ElementFlag, Item, Key, ScrollAlign,
};

const ROW_HEIGHT: f32 = 20.0;
const VIEWPORT: f32 = 100.0;

/// Per-row visual state the renderer would paint.
#[derive(Clone, Copy, Debug, Default)]
struct RowFlags {
    selected: bool,
    highlight: bool,
}

/// A fixed-height list that mounts only the rows intersecting its viewport.
///
/// Element handles are the global row index of the mounted row.
#[derive(Debug, Default)]
struct WindowedRows {
    len: usize,
    scroll_offset: f32,
    flags: BTreeMap<usize, RowFlags>,
    pending_report: Option<(i64, i64)>,
    focused: bool,
}

impl WindowedRows {
    /// Mounted `[first, last]`, or `None` when there is nothing to show.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Offsets are clamped to a non-negative range well below usize::MAX."
    )]
    fn window(&self) -> Option<(usize, usize)> {
        if self.len == 0 {
            return None;
        }
        let first = (self.scroll_offset / ROW_HEIGHT).floor() as usize;
        let end = ((self.scroll_offset + VIEWPORT) / ROW_HEIGHT).ceil() as usize;
        let last = end.min(self.len).saturating_sub(1);
        Some((first.min(last), last))
    }

    fn max_offset(&self) -> f32 {
        (self.len as f32 * ROW_HEIGHT - VIEWPORT).max(0.0)
    }

    /// Re-renders for `len` rows and queues a range report.
    fn rerender(&mut self, len: usize) {
        self.len = len;
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
        self.queue_report();
    }

    fn queue_report(&mut self) {
        let window = self.window();
        self.flags
            .retain(|&row, _| window.is_some_and(|(first, last)| (first..=last).contains(&row)));
        self.pending_report = Some(match window {
            Some((first, last)) => (first as i64, last as i64),
            None => (-1, -1),
        });
    }

    fn take_report(&mut self) -> Option<(i64, i64)> {
        self.pending_report.take()
    }
}

impl DropdownHost for WindowedRows {
    type Element = usize;

    fn element_at(&self, local_offset: usize) -> Option<usize> {
        let (first, last) = self.window()?;
        let row = first + local_offset;
        (row <= last).then_some(row)
    }

    fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) {
        if self.len == 0 {
            return;
        }
        let item_start = index.min(self.len - 1) as f32 * ROW_HEIGHT;
        let item_end = item_start + ROW_HEIGHT;
        let offset = match align {
            ScrollAlign::Start => item_start,
            ScrollAlign::End => item_end - VIEWPORT,
            ScrollAlign::Center => (item_start + item_end) / 2.0 - VIEWPORT / 2.0,
            ScrollAlign::Nearest => {
                let current = self.scroll_offset;
                if item_start >= current && item_end <= current + VIEWPORT {
                    current
                } else if item_start < current {
                    item_start
                } else {
                    item_end - VIEWPORT
                }
            }
        };
        let offset = offset.clamp(0.0, self.max_offset());
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.queue_report();
        }
    }

    fn set_flag(&mut self, element: usize, flag: ElementFlag, on: bool) {
        let row = self.flags.entry(element).or_default();
        match flag {
            ElementFlag::Selected => row.selected = on,
            ElementFlag::Highlight => row.highlight = on,
        }
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn blur_input(&mut self) {
        self.focused = false;
    }
}

/// Runs cycles until the renderer stops reporting new ranges.
fn pump(dropdown: &mut Dropdown<WindowedRows>) {
    loop {
        let render = dropdown.update();
        let len = dropdown.filtered_items().len();
        let Some(rows) = dropdown.host_mut() else {
            return;
        };
        if render || rows.len != len {
            rows.rerender(len);
        }
        match rows.take_report() {
            Some((first, last)) => dropdown.report_range(first, last),
            None => break,
        }
    }
    if dropdown.tick() {
        pump(dropdown);
    }
}

fn print_frame(dropdown: &mut Dropdown<WindowedRows>, caption: &str) {
    println!("-- {caption}");
    let focused = dropdown.host().is_some_and(|rows| rows.focused);
    println!(
        "   [{}{}]{}",
        dropdown.displayed_text(),
        if focused { "|" } else { "" },
        if dropdown.is_open() { " v" } else { "" }
    );
    for event in dropdown.drain_events() {
        println!("   event: {event:?}");
    }
    if !dropdown.is_open() {
        return;
    }
    if dropdown.is_empty_result() {
        println!("   (no matches)");
        return;
    }
    let Some(rows) = dropdown.host() else {
        return;
    };
    let Some((first, last)) = rows.window() else {
        return;
    };
    for position in first..=last {
        let Some(row) = dropdown.rendered_item(position) else {
            continue;
        };
        let flags = rows.flags.get(&position).copied().unwrap_or_default();
        println!(
            "   {}{} {}{}",
            if flags.highlight { '>' } else { ' ' },
            if flags.selected { '*' } else { ' ' },
            row.text,
            if row.disabled { " (disabled)" } else { "" }
        );
    }
}

fn countries() -> Vec<Item> {
    [
        ("at", "Austria"),
        ("be", "Belgium"),
        ("ca", "Canada"),
        ("dk", "Denmark"),
        ("ee", "Estonia"),
        ("fi", "Finland"),
        ("fr", "France"),
        ("de", "Germany"),
        ("gr", "Greece"),
        ("is", "Iceland"),
        ("ie", "Ireland"),
        ("it", "Italy"),
        ("nl", "Netherlands"),
        ("no", "Norway"),
        ("pt", "Portugal"),
        ("es", "Spain"),
    ]
    .into_iter()
    .map(|(value, label)| Item::new(value).with_label(label).with_disabled(value == "is"))
    .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("understory_dropdown=debug")),
        )
        .init();

    let config = DropdownConfig {
        filtering: true,
        ..DropdownConfig::default()
    };
    let mut dropdown = Dropdown::with_config(countries(), config);
    dropdown.attach_host(WindowedRows::default());
    dropdown.set_value(Some("it"));
    pump(&mut dropdown);
    print_frame(&mut dropdown, "initial");

    // Opening centers the selection once the renderer has a window.
    dropdown.show();
    pump(&mut dropdown);
    print_frame(&mut dropdown, "open");

    for _ in 0..3 {
        dropdown.handle_key(Key::ArrowDown);
    }
    pump(&mut dropdown);
    print_frame(&mut dropdown, "arrow down x3");

    dropdown.input_text("land");
    pump(&mut dropdown);
    print_frame(&mut dropdown, "typed `land`");

    // The first match is Finland; Iceland is disabled and refuses commits.
    dropdown.handle_key(Key::ArrowDown);
    pump(&mut dropdown);
    if let Err(error) = dropdown.commit_highlighted() {
        println!("   commit refused: {error}");
    }
    dropdown.handle_key(Key::ArrowUp);
    pump(&mut dropdown);
    dropdown.handle_key(Key::Enter);
    pump(&mut dropdown);
    print_frame(&mut dropdown, "committed");
    println!("-- final value `{}`", dropdown.value());
}
