// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date picker panels.
//!
//! [`DatePickerPanel`] pairs a [`PanelController`] with a
//! [`DatePicker`] model. The panel shows the six-week grid for the viewed
//! month; arrow keys rove over its 42 cells, Enter or Space selects the active
//! cell, horizontal swipes page months and an upward swipe closes the panel.
//! Every change of the picked instant is emitted as [`PanelEvent::Change`].
//!
//! With the time sub-selector off, picking a day closes the panel. With it on,
//! the panel stays open so the time can be adjusted after the day.

use core::fmt;

use chrono::NaiveDate;
use kurbo::Point;
use perch_calendar::{DatePicker, GRID_CELLS, Grid, Meridiem, TimeValue, WEEK_LEN};
use perch_gesture::{Gesture, PointerId, SwipeDirection};
use perch_placement::Side;
use perch_roving::{Key, Modifiers, Orientation};

use crate::{Host, KeyResponse, PanelConfig, PanelController, PanelEvent, TriggerConfig};

/// The date picker preset.
///
/// Picking a day closes the panel only when `close_on_select` is set and the
/// time sub-selector is off.
#[must_use]
pub fn config(show_time: bool, close_on_select: bool) -> PanelConfig {
    PanelConfig::default()
        .with_trigger(TriggerConfig::explicit().with_close_on_select(close_on_select && !show_time))
        .with_side(Side::Bottom)
        .with_swipe_close(SwipeDirection::Up, false)
        .with_orientation(Orientation::Grid { columns: WEEK_LEN })
        .with_looping(false)
        .with_select_on_activate(false)
}

/// A date picker panel driven against a host.
pub struct DatePickerPanel<K: Copy + Eq, H: Host<K>> {
    controller: PanelController<K, H>,
    picker: DatePicker,
    today: NaiveDate,
}

impl<K: Copy + Eq + fmt::Debug, H: Host<K>> fmt::Debug for DatePickerPanel<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerPanel")
            .field("controller", &self.controller)
            .field("picker", &self.picker)
            .field("today", &self.today)
            .finish()
    }
}

impl<K: Copy + Eq, H: Host<K>> DatePickerPanel<K, H> {
    /// Wraps `picker` in a closed panel. `today` marks the current day.
    pub fn new(host: H, picker: DatePicker, today: NaiveDate) -> Self {
        let mut controller = PanelController::new(host, config(picker.shows_time(), true));
        controller.set_item_count(GRID_CELLS);
        Self {
            controller,
            picker,
            today,
        }
    }

    /// Returns this panel with closing on selection on or off.
    ///
    /// Has no effect while the time sub-selector is shown.
    #[must_use]
    pub fn with_close_on_select(mut self, close: bool) -> Self {
        let trigger = self
            .controller
            .config()
            .trigger
            .with_close_on_select(close && !self.picker.shows_time());
        self.controller.set_trigger(trigger);
        self
    }

    /// The underlying controller.
    pub fn controller(&self) -> &PanelController<K, H> {
        &self.controller
    }

    /// Mutable access to the underlying controller.
    pub fn controller_mut(&mut self) -> &mut PanelController<K, H> {
        &mut self.controller
    }

    /// The host.
    pub fn host(&self) -> &H {
        self.controller.host()
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }

    /// The date model.
    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    /// The current day.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Updates the current day, for example after midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// The grid for the viewed month.
    pub fn grid(&self) -> Grid {
        self.picker.grid(self.today)
    }

    /// The trigger was activated: toggles the panel.
    ///
    /// On open the active cell starts at the selected day, else today, else
    /// the 1st of the viewed month, counting only days of the viewed month.
    pub fn on_activate(&mut self) {
        self.controller.on_activate();
        if self.controller.is_open() && self.controller.navigator().active().is_none() {
            self.sync_active();
        }
    }

    /// Routes a key press. Activating a cell selects its day.
    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) -> KeyResponse {
        let response = self.controller.on_key(key, modifiers);
        if let KeyResponse::Activated(index) = response {
            self.select_cell(index);
        }
        response
    }

    /// Selects the day in grid cell `index`. Returns whether it was accepted.
    pub fn select_cell(&mut self, index: usize) -> bool {
        match self.grid().get(index) {
            Some(cell) => self.select(cell.date),
            None => false,
        }
    }

    /// Selects `date`. Returns whether it was accepted.
    ///
    /// The view does not follow a selection in a neighboring month's padding.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        let Some(value) = self.picker.select(date) else {
            return false;
        };
        self.controller.host_mut().emit(PanelEvent::Change(value));
        self.controller.item_selected();
        true
    }

    /// Selects today and moves the view to it.
    pub fn select_today(&mut self) -> bool {
        let Some(value) = self.picker.select_today(self.today) else {
            return false;
        };
        self.controller.host_mut().emit(PanelEvent::Change(value));
        self.controller.item_selected();
        true
    }

    /// Sets the time of day, re-emitting the merged value if a day is picked.
    pub fn set_time(&mut self, time: TimeValue) {
        if let Some(value) = self.picker.set_time(time) {
            self.controller.host_mut().emit(PanelEvent::Change(value));
        }
    }

    /// Flips the time to AM or PM, re-emitting the merged value if a day is picked.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        if let Some(value) = self.picker.set_meridiem(meridiem) {
            self.controller.host_mut().emit(PanelEvent::Change(value));
        }
    }

    /// Drops the selection.
    pub fn clear(&mut self) {
        self.picker.clear();
    }

    /// Pages the view by `delta` months.
    pub fn shift_month(&mut self, delta: i32) -> bool {
        let moved = self.picker.shift_month(delta);
        if moved && self.controller.is_open() {
            self.sync_active();
        }
        moved
    }

    /// Pages the view by `delta` years.
    pub fn shift_year(&mut self, delta: i32) -> bool {
        let moved = self.picker.shift_year(delta);
        if moved && self.controller.is_open() {
            self.sync_active();
        }
        moved
    }

    /// Records a touch-start over the panel.
    pub fn touch_start(&mut self, pointer: Option<PointerId>, position: Point) -> bool {
        self.controller.touch_start(pointer, position)
    }

    /// Records a touch-move. Returns whether the host should suppress scrolling.
    pub fn touch_move(&mut self, pointer: Option<PointerId>, position: Point) -> bool {
        self.controller.touch_move(pointer, position)
    }

    /// Records a touch-end. Horizontal swipes page months.
    pub fn touch_end(&mut self, pointer: Option<PointerId>, position: Point) -> Option<Gesture> {
        let gesture = self.controller.touch_end(pointer, position)?;
        if let Gesture::Swipe { direction, .. } = gesture {
            match direction {
                SwipeDirection::Left => {
                    self.shift_month(1);
                }
                SwipeDirection::Right => {
                    self.shift_month(-1);
                }
                SwipeDirection::Up | SwipeDirection::Down => {}
            }
        }
        Some(gesture)
    }

    fn sync_active(&mut self) {
        let grid = self.grid();
        let in_view = |i: &usize| grid.cells()[*i].in_current_month;
        let index = grid
            .selected_position()
            .filter(in_view)
            .or_else(|| grid.position(self.today).filter(in_view))
            .or_else(|| grid.position(self.picker.view().first_day()));
        if let Some(index) = index {
            self.controller.navigator_mut().set_active(index);
        }
    }
}
