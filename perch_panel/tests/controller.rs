// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of panel controllers against a scripted host.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use kurbo::{Point, Rect, Size};
use perch_calendar::{DatePicker, TimeValue};
use perch_panel::widgets::date_picker::DatePickerPanel;
use perch_panel::widgets::{dropdown, tooltip};
use perch_panel::{
    CloseReason, FocusEntry, FocusHost, Gesture, Host, Key, KeyResponse, Modifiers,
    PanelConfig, PanelController, PanelEvent, PanelState, Side, SwipeDirection, TimerToken,
    TriggerConfig, TriggerMode,
};

/// Everything the host saw, shared so it survives the controller.
#[derive(Debug, Default)]
struct Log {
    events: Vec<PanelEvent>,
    timers: Vec<(TimerToken, u64)>,
    canceled: Vec<TimerToken>,
    listening: bool,
    focused: Option<u32>,
    now: u64,
}

#[derive(Clone)]
struct Page {
    log: Rc<RefCell<Log>>,
    anchor: Rect,
    panel: Size,
    viewport: Rect,
    targets: Vec<FocusEntry<u32>>,
    compact: bool,
    reduced_motion: bool,
    initial: Option<u32>,
}

impl Page {
    fn new() -> Self {
        Self {
            log: Rc::default(),
            anchor: Rect::from_origin_size((10.0, 10.0), (100.0, 30.0)),
            panel: Size::new(200.0, 120.0),
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
            targets: vec![
                FocusEntry::new(10, Rect::new(10.0, 50.0, 210.0, 70.0)),
                FocusEntry::new(11, Rect::new(10.0, 70.0, 210.0, 90.0)),
                FocusEntry::new(12, Rect::new(10.0, 90.0, 210.0, 110.0)),
            ],
            compact: false,
            reduced_motion: false,
            initial: None,
        }
    }

    fn focused_on(self, node: u32) -> Self {
        self.log.borrow_mut().focused = Some(node);
        self
    }
}

impl FocusHost<u32> for Page {
    fn focused(&self) -> Option<u32> {
        self.log.borrow().focused
    }

    fn focus(&mut self, node: u32) -> bool {
        self.log.borrow_mut().focused = Some(node);
        true
    }

    fn can_focus(&self, _node: u32) -> bool {
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
        self.viewport
    }

    fn now_ms(&self) -> u64 {
        self.log.borrow().now
    }

    fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_compact(&self) -> bool {
        self.compact
    }

    fn panel_targets(&self) -> Vec<FocusEntry<u32>> {
        self.targets.clone()
    }

    fn initial_focus(&self) -> Option<u32> {
        self.initial
    }

    fn schedule_timer(&mut self, token: TimerToken, delay_ms: u64) {
        self.log.borrow_mut().timers.push((token, delay_ms));
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        self.log.borrow_mut().canceled.push(token);
    }

    fn attach_listeners(&mut self) {
        self.log.borrow_mut().listening = true;
    }

    fn detach_listeners(&mut self) {
        self.log.borrow_mut().listening = false;
    }

    fn emit(&mut self, event: PanelEvent) {
        self.log.borrow_mut().events.push(event);
    }
}

fn opened_count(log: &Rc<RefCell<Log>>) -> usize {
    log.borrow()
        .events
        .iter()
        .filter(|e| matches!(e, PanelEvent::Opened { .. }))
        .count()
}

fn closed(log: &Rc<RefCell<Log>>) -> Vec<CloseReason> {
    log.borrow()
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::Closed(reason) => Some(*reason),
            _ => None,
        })
        .collect()
}

fn last_timer(log: &Rc<RefCell<Log>>) -> TimerToken {
    log.borrow().timers.last().expect("a timer was scheduled").0
}

#[test]
fn duplicate_open_requests_open_once() {
    let page = Page::new();
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));

    menu.on_activate();
    menu.request_open(perch_panel::Trigger::Programmatic);
    menu.request_open(perch_panel::Trigger::Activation);
    assert_eq!(opened_count(&log), 1);
    assert!(menu.is_open());
}

#[test]
fn escape_returns_focus_to_the_opener() {
    let page = Page::new().focused_on(1);
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));

    menu.on_activate();
    assert_eq!(log.borrow().focused, Some(10), "first item auto-focused");
    assert!(log.borrow().listening);

    assert_eq!(
        menu.on_key(Key::Escape, Modifiers::empty()),
        KeyResponse::Handled
    );
    assert_eq!(menu.state(), PanelState::Closed);
    assert_eq!(log.borrow().focused, Some(1));
    assert!(!log.borrow().listening);
    assert_eq!(closed(&log), [CloseReason::Escape]);
}

#[test]
fn outside_click_leaves_focus_alone() {
    let page = Page::new().focused_on(1);
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));

    menu.on_activate();
    log.borrow_mut().focused = Some(99);
    menu.on_outside_interaction();
    assert_eq!(log.borrow().focused, Some(99));
    assert_eq!(closed(&log), [CloseReason::OutsideInteraction]);
    assert_eq!(menu.focus_snapshot(), None);
}

#[test]
fn placement_flips_below_a_top_anchor() {
    let page = Page::new();
    let log = page.log.clone();
    let config = dropdown::config(Default::default()).with_side(Side::Top);
    let mut menu = PanelController::new(page, config);

    menu.on_activate();
    let placement = menu.placement().expect("placed on open");
    assert_eq!(placement.side, Side::Bottom);
    assert!(placement.fits);
    assert!(log.borrow().events.contains(&PanelEvent::Placed(placement)));
}

#[test]
fn tab_cycles_inside_the_panel() {
    let page = Page::new().focused_on(1);
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.on_activate();

    let shift = Modifiers::SHIFT;
    menu.on_key(Key::Tab, Modifiers::empty());
    menu.on_key(Key::Tab, Modifiers::empty());
    assert_eq!(log.borrow().focused, Some(12));
    menu.on_key(Key::Tab, Modifiers::empty());
    assert_eq!(log.borrow().focused, Some(10), "wraps to the first target");
    menu.on_key(Key::Tab, shift);
    assert_eq!(log.borrow().focused, Some(12), "wraps back to the last target");
}

#[test]
fn tab_without_targets_is_not_handled() {
    let mut page = Page::new();
    page.targets.clear();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.on_activate();
    assert_eq!(
        menu.on_key(Key::Tab, Modifiers::empty()),
        KeyResponse::Ignored
    );
}

#[test]
fn arrows_rove_and_enter_selects() {
    let page = Page::new();
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.set_item_count(3);
    menu.on_activate();

    menu.on_key(Key::ArrowDown, Modifiers::empty());
    menu.on_key(Key::ArrowDown, Modifiers::empty());
    assert!(log.borrow().events.contains(&PanelEvent::Highlighted(1)));

    assert_eq!(
        menu.on_key(Key::Enter, Modifiers::empty()),
        KeyResponse::Activated(1)
    );
    assert!(log.borrow().events.contains(&PanelEvent::Activated(1)));
    assert_eq!(closed(&log), [CloseReason::Selection]);
}

#[test]
fn keys_are_ignored_while_closed() {
    let page = Page::new();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.set_item_count(3);
    assert_eq!(
        menu.on_key(Key::ArrowDown, Modifiers::empty()),
        KeyResponse::Ignored
    );
    assert_eq!(
        menu.on_key(Key::Escape, Modifiers::empty()),
        KeyResponse::Ignored
    );
}

#[test]
fn swipe_up_closes_dropdown_only_on_compact_screens() {
    for compact in [false, true] {
        let mut page = Page::new();
        page.compact = compact;
        let log = page.log.clone();
        let mut menu = PanelController::new(page, dropdown::config(Default::default()));
        menu.on_activate();

        assert!(menu.touch_start(None, Point::new(100.0, 200.0)));
        log.borrow_mut().now = 150;
        let gesture = menu.touch_end(None, Point::new(100.0, 100.0));
        assert!(matches!(
            gesture,
            Some(Gesture::Swipe {
                direction: SwipeDirection::Up,
                ..
            })
        ));
        assert_eq!(menu.is_open(), !compact);
    }
}

#[test]
fn tooltip_waits_for_show_delay() {
    let page = Page::new();
    let log = page.log.clone();
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, false));

    tip.pointer_enter_anchor();
    assert_eq!(tip.state(), PanelState::Opening);
    let (token, delay) = log.borrow().timers[0];
    assert_eq!(delay, tooltip::SHOW_DELAY_MS);

    tip.on_timer(token);
    assert!(tip.is_open());
    assert_eq!(opened_count(&log), 1);

    // A late duplicate of the same timer is stale.
    tip.on_timer(token);
    assert_eq!(opened_count(&log), 1);

    tip.pointer_leave_anchor();
    assert_eq!(closed(&log), [CloseReason::PointerLeave]);
}

#[test]
fn tooltip_left_early_never_announces() {
    let page = Page::new();
    let log = page.log.clone();
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, false));

    tip.pointer_enter_anchor();
    let token = last_timer(&log);
    tip.pointer_leave_anchor();
    assert_eq!(log.borrow().canceled, [token]);
    tip.on_timer(token);
    assert!(log.borrow().events.is_empty());
    assert!(!log.borrow().listening);
}

#[test]
fn tooltip_stays_vertical_on_compact_screens() {
    // A tall tooltip beside a mid-height anchor: neither above nor below has
    // room, but the right side does.
    let tall = |compact| {
        let mut page = Page::new();
        page.anchor = Rect::from_origin_size((10.0, 285.0), (100.0, 30.0));
        page.panel = Size::new(200.0, 300.0);
        page.compact = compact;
        let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, false));
        tip.request_open(perch_panel::Trigger::Programmatic);
        tip.placement().map(|p| (p.side, p.fits))
    };
    assert_eq!(tall(false), Some((Side::Right, true)));
    assert_eq!(tall(true), Some((Side::Top, false)));
}

#[test]
fn disabling_an_open_panel_closes_it() {
    let page = Page::new();
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.on_activate();
    menu.set_disabled(true);
    assert_eq!(closed(&log), [CloseReason::Disabled]);
    menu.on_activate();
    assert!(!menu.is_open());
}

#[test]
fn dropping_releases_timers_and_listeners_quietly() {
    let page = Page::new();
    let log = page.log.clone();
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, false));
    tip.pointer_enter_anchor();
    let token = last_timer(&log);
    assert!(log.borrow().listening);

    drop(tip);
    assert_eq!(log.borrow().canceled, [token]);
    assert!(!log.borrow().listening);
    assert!(log.borrow().events.is_empty());
}

#[test]
fn reduced_motion_opens_without_animation() {
    for reduced in [false, true] {
        let mut page = Page::new();
        page.reduced_motion = reduced;
        let log = page.log.clone();
        let mut menu = PanelController::new(page, dropdown::config(Default::default()));
        menu.on_activate();
        assert!(
            log.borrow()
                .events
                .contains(&PanelEvent::Opened { animate: !reduced }),
            "animate follows the motion preference"
        );
    }
}

#[test]
fn initial_focus_overrides_the_first_target() {
    let mut page = Page::new().focused_on(1);
    page.initial = Some(12);
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.on_activate();
    assert_eq!(log.borrow().focused, Some(12));
}

#[test]
fn content_changes_refresh_trap_and_roving_index() {
    let page = Page::new();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.set_item_count(3);
    menu.on_activate();
    for _ in 0..3 {
        menu.on_key(Key::ArrowDown, Modifiers::empty());
    }
    assert_eq!(menu.navigator().active(), Some(2));

    menu.host_mut().targets.truncate(2);
    menu.content_changed(2);
    assert_eq!(menu.navigator().active(), Some(1), "index clamped to the new length");
    let trap = menu.trap().expect("trap installed while open");
    assert_eq!(trap.targets(), [10, 11]);
    assert!(!trap.contains(12), "removed target left the cycle");
}

#[test]
fn reposition_follows_the_anchor() {
    let page = Page::new();
    let log = page.log.clone();
    let mut menu = PanelController::new(page, dropdown::config(Default::default()));
    menu.on_activate();
    assert_eq!(menu.placement().map(|p| p.side), Some(Side::Bottom));

    // Scrolled so the anchor sits at the bottom edge.
    menu.host_mut().anchor = Rect::from_origin_size((10.0, 560.0), (100.0, 30.0));
    let placement = menu.reposition().expect("open panels are placed");
    assert_eq!(placement.side, Side::Top);
    assert_eq!(menu.placement(), Some(placement));
    let placed = log
        .borrow()
        .events
        .iter()
        .filter(|e| matches!(e, PanelEvent::Placed(_)))
        .count();
    assert_eq!(placed, 2);
    assert_eq!(
        log.borrow().events.last(),
        Some(&PanelEvent::Placed(placement))
    );
}

#[test]
fn outside_interaction_aborts_a_pending_hover_open() {
    let page = Page::new().focused_on(1);
    let log = page.log.clone();
    let trigger = TriggerConfig::hover(300, 0).with_close_on_outside_interaction(true);
    let mut tip = PanelController::new(page, PanelConfig::default().with_trigger(trigger));

    tip.pointer_enter_anchor();
    assert_eq!(tip.state(), PanelState::Opening);
    let token = last_timer(&log);

    tip.on_outside_interaction();
    assert_eq!(tip.state(), PanelState::Closed);
    assert_eq!(log.borrow().canceled, [token]);
    assert!(!log.borrow().listening);
    assert!(log.borrow().events.is_empty(), "nothing was announced");
    assert_eq!(tip.focus_snapshot(), None);
}

#[test]
fn focus_mode_follows_the_anchor() {
    let page = Page::new().focused_on(1);
    let log = page.log.clone();
    let config = PanelConfig::default().with_trigger(TriggerConfig::focus());
    let mut panel = PanelController::new(page, config);

    panel.on_activate();
    assert!(!panel.is_open(), "activation does not toggle focus panels");

    panel.focus_in();
    assert!(panel.is_open());
    assert_eq!(log.borrow().focused, Some(10));

    panel.focus_out(true);
    assert!(panel.is_open(), "focus moved into the panel");

    panel.focus_out(false);
    assert_eq!(closed(&log), [CloseReason::FocusOut]);
    assert_eq!(log.borrow().focused, Some(10), "focus stays where the user put it");
}

#[test]
fn compact_tooltips_toggle_on_tap() {
    let mut page = Page::new();
    page.compact = true;
    let log = page.log.clone();
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Hover, false));

    tip.pointer_enter_anchor();
    assert_eq!(tip.state(), PanelState::Closed, "no hover on compact screens");
    assert!(log.borrow().timers.is_empty());

    tip.on_activate();
    assert!(tip.is_open());
    tip.on_activate();
    assert_eq!(closed(&log), [CloseReason::Explicit]);

    // Back on a wide screen, hover drives the same tooltip again.
    tip.host_mut().compact = false;
    tip.on_activate();
    assert_eq!(tip.state(), PanelState::Closed);
    tip.pointer_enter_anchor();
    assert_eq!(tip.state(), PanelState::Opening);
}

#[test]
fn click_tooltips_close_on_outside_interaction() {
    let page = Page::new();
    let log = page.log.clone();
    let mut tip = PanelController::new(page, tooltip::config(TriggerMode::Explicit, false));
    tip.pointer_enter_anchor();
    assert_eq!(tip.state(), PanelState::Closed);
    tip.on_activate();
    assert!(tip.is_open());
    tip.on_outside_interaction();
    assert_eq!(closed(&log), [CloseReason::OutsideInteraction]);
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn changes(log: &Rc<RefCell<Log>>) -> Vec<chrono::NaiveDateTime> {
    log.borrow()
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::Change(value) => Some(*value),
            _ => None,
        })
        .collect()
}

#[test]
fn date_picker_merges_time_into_change() {
    let page = Page::new();
    let log = page.log.clone();
    let today = d(2025, 3, 1);
    let picker = DatePicker::new(today).with_time_selection(true);
    let mut panel = DatePickerPanel::new(page, picker, today);

    panel.on_activate();
    assert!(panel.select(d(2025, 3, 10)));
    // Time selection keeps the panel open.
    assert!(panel.controller().is_open());
    panel.set_time(TimeValue::new(14, 30).unwrap());

    assert_eq!(
        changes(&log).last().copied(),
        Some(d(2025, 3, 10).and_hms_opt(14, 30, 0).unwrap())
    );
}

#[test]
fn date_picker_enter_selects_active_cell_and_closes() {
    let page = Page::new();
    let log = page.log.clone();
    let today = d(2025, 3, 10);
    let mut panel = DatePickerPanel::new(page, DatePicker::new(today), today);

    panel.on_activate();
    let grid = panel.grid();
    assert_eq!(
        panel.controller().navigator().active(),
        grid.position(today),
        "starts on today"
    );

    // Down a week, right a day.
    panel.on_key(Key::ArrowDown, Modifiers::empty());
    panel.on_key(Key::ArrowRight, Modifiers::empty());
    let response = panel.on_key(Key::Enter, Modifiers::empty());
    assert!(matches!(response, KeyResponse::Activated(_)));

    assert_eq!(panel.picker().selected(), Some(d(2025, 3, 18)));
    assert_eq!(
        changes(&log),
        [d(2025, 3, 18).and_hms_opt(0, 0, 0).unwrap()]
    );
    assert_eq!(closed(&log), [CloseReason::Selection]);
}

#[test]
fn date_picker_swipes_page_months_and_close() {
    let page = Page::new();
    let log = page.log.clone();
    let today = d(2025, 3, 10);
    let mut panel = DatePickerPanel::new(page, DatePicker::new(today), today);
    panel.on_activate();

    let swipe = |panel: &mut DatePickerPanel<u32, Page>, from: (f64, f64), to: (f64, f64)| {
        panel.touch_start(None, Point::new(from.0, from.1));
        log.borrow_mut().now += 100;
        panel.touch_end(None, Point::new(to.0, to.1))
    };

    swipe(&mut panel, (200.0, 100.0), (100.0, 100.0));
    assert_eq!(panel.picker().view().month(), 4);
    swipe(&mut panel, (100.0, 100.0), (200.0, 100.0));
    swipe(&mut panel, (100.0, 100.0), (200.0, 100.0));
    assert_eq!(panel.picker().view().month(), 2);

    swipe(&mut panel, (100.0, 200.0), (100.0, 100.0));
    assert!(!panel.controller().is_open());
    assert_eq!(closed(&log), [CloseReason::Swipe]);
}

#[test]
fn date_picker_refuses_out_of_range_days() {
    let page = Page::new();
    let log = page.log.clone();
    let today = d(2025, 3, 10);
    let constraint = perch_calendar::DateConstraint::new()
        .with_min(d(2025, 3, 5))
        .with_max(d(2025, 3, 20));
    let picker = DatePicker::new(today).with_constraint(constraint);
    let mut panel = DatePickerPanel::new(page, picker, today);
    panel.on_activate();

    assert!(!panel.select(d(2025, 3, 21)));
    assert!(!panel.select(d(2025, 3, 1)));
    assert_eq!(panel.picker().selected(), None);
    assert!(changes(&log).is_empty());
    assert!(panel.controller().is_open());
}

#[test]
fn date_picker_can_stay_open_after_selection() {
    let page = Page::new();
    let log = page.log.clone();
    let today = d(2025, 3, 10);
    let mut panel =
        DatePickerPanel::new(page, DatePicker::new(today), today).with_close_on_select(false);

    panel.on_activate();
    assert_eq!(panel.host().focused(), Some(10));
    assert!(panel.select(d(2025, 3, 12)));
    assert!(panel.controller().is_open());
    assert!(panel.host_mut().focus(11));
    assert_eq!(log.borrow().focused, Some(11));
    assert_eq!(
        changes(&log),
        [d(2025, 3, 12).and_hms_opt(0, 0, 0).unwrap()]
    );
}
