// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted walkthrough of a tooltip and a date picker.
//!
//! The host below stands in for a UI runtime: it keeps a virtual clock, a
//! queue of one-shot timers and the focused node, and logs every event the
//! engine emits.
//!
//! Run:
//! - `cargo run -p perch_demos --example panel_walkthrough`
//! - `RUST_LOG=perch_panel=debug cargo run -p perch_demos --example panel_walkthrough`

use chrono::NaiveDate;
use kurbo::{Point, Rect, Size};
use perch_calendar::{DatePicker, Meridiem, TimeValue};
use perch_panel::widgets::date_picker::DatePickerPanel;
use perch_panel::widgets::tooltip;
use perch_panel::{
    FocusEntry, FocusHost, Host, Key, Modifiers, PanelController, PanelEvent, TimerToken,
    TriggerMode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Node ids on the scripted page.
const BUTTON: u32 = 1;
const CALENDAR: u32 = 10;
const TIME_INPUT: u32 = 11;

struct Page {
    name: &'static str,
    now: u64,
    focused: Option<u32>,
    timers: Vec<(u64, TimerToken)>,
    anchor: Rect,
    panel: Size,
    targets: Vec<FocusEntry<u32>>,
}

impl Page {
    fn new(name: &'static str, anchor: Rect, panel: Size) -> Self {
        Self {
            name,
            now: 0,
            focused: Some(BUTTON),
            timers: Vec::new(),
            anchor,
            panel,
            targets: Vec::new(),
        }
    }

    /// Advances the clock and returns timers that came due, oldest first.
    fn advance(&mut self, ms: u64) -> Vec<TimerToken> {
        self.now += ms;
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(at, _)| *at <= now);
        self.timers = pending;
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl FocusHost<u32> for Page {
    fn focused(&self) -> Option<u32> {
        self.focused
    }

    fn focus(&mut self, node: u32) -> bool {
        info!(page = self.name, node, "focus");
        self.focused = Some(node);
        true
    }

    fn can_focus(&self, _: u32) -> bool {
        true
    }
}

impl Host<u32> for Page {
    fn anchor_rect(&self) -> Rect {
        self.anchor
    }

    fn panel_size(&self) -> Size {
        self.panel
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn now_ms(&self) -> u64 {
        self.now
    }

    fn panel_targets(&self) -> Vec<FocusEntry<u32>> {
        self.targets.clone()
    }

    fn schedule_timer(&mut self, token: TimerToken, delay_ms: u64) {
        info!(page = self.name, ?token, delay_ms, "schedule timer");
        self.timers.push((self.now + delay_ms, token));
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        info!(page = self.name, ?token, "cancel timer");
        self.timers.retain(|(_, t)| *t != token);
    }

    fn attach_listeners(&mut self) {
        info!(page = self.name, "attach global listeners");
    }

    fn detach_listeners(&mut self) {
        info!(page = self.name, "detach global listeners");
    }

    fn emit(&mut self, event: PanelEvent) {
        info!(page = self.name, ?event, "event");
    }
}

fn tooltip_walkthrough() {
    let page = Page::new(
        "tooltip",
        Rect::new(360.0, 20.0, 440.0, 44.0),
        Size::new(160.0, 40.0),
    );
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, true));

    info!("hover the anchor and wait out the show delay");
    tip.pointer_enter_anchor();
    for token in tip.host_mut().advance(tooltip::SHOW_DELAY_MS) {
        tip.on_timer(token);
    }
    info!(state = ?tip.state(), placement = ?tip.placement(), "tooltip shown");

    info!("cross the gap into the interactive tooltip");
    tip.pointer_leave_anchor();
    tip.pointer_enter_panel();
    for token in tip.host_mut().advance(100) {
        tip.on_timer(token);
    }
    info!(state = ?tip.state(), "still open while hovered");

    tip.pointer_leave_panel();
    for token in tip.host_mut().advance(100) {
        tip.on_timer(token);
    }
    info!(state = ?tip.state(), "hidden after the grace period");
}

fn date_picker_walkthrough() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
    let mut page = Page::new(
        "date picker",
        Rect::new(40.0, 520.0, 240.0, 550.0),
        Size::new(280.0, 290.0),
    );
    page.targets = vec![
        FocusEntry::new(CALENDAR, Rect::new(40.0, 222.0, 320.0, 462.0)),
        FocusEntry::new(TIME_INPUT, Rect::new(40.0, 472.0, 160.0, 502.0)),
    ];
    let picker = DatePicker::new(today).with_time_selection(true);
    let mut panel = DatePickerPanel::new(page, picker, today);

    panel.on_activate();
    info!(
        placement = ?panel.controller().placement(),
        active = ?panel.controller().navigator().active(),
        "opened above the anchor near the bottom edge"
    );

    info!("move a week down and pick the day");
    panel.on_key(Key::ArrowDown, Modifiers::empty());
    panel.on_key(Key::Enter, Modifiers::empty());

    let time = TimeValue::new(2, 30).expect("valid time");
    panel.set_time(time);
    panel.set_meridiem(Meridiem::Pm);
    info!(value = %panel.picker().display_value(), "picked");

    info!("swipe left to page to the next month");
    panel.touch_start(None, Point::new(200.0, 100.0));
    panel.host_mut().advance(120);
    panel.touch_end(None, Point::new(80.0, 104.0));
    info!(view = %panel.picker().view().label(), "paged");

    panel.on_key(Key::Escape, Modifiers::empty());
    info!(
        state = ?panel.controller().state(),
        focused = ?panel.controller().host().focused,
        "closed and focus restored"
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tooltip_walkthrough();
    date_picker_walkthrough();
}
