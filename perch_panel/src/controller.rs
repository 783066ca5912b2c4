// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The panel controller: one machine, one focus manager, one navigator and
//! one touch tracker wired to a host.

use core::fmt;

use kurbo::Point;
use perch_focus::{FocusManager, FocusSpace, FocusTrap, Navigation};
use perch_gesture::{Gesture, GestureConfig, PointerId, SwipeDirection, TouchTracker};
use perch_placement::{Placement, ResolveOptions, Side, resolve};
use perch_roving::{Key, Modifiers, Navigator, Orientation, Outcome};

use crate::{
    CloseReason, Effect, Effects, Host, PanelEvent, PanelMachine, PanelState, TimerToken,
    Trigger, TriggerConfig, TriggerMode,
};

/// Everything a [`PanelController`] needs to know about one panel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// Open/close behavior.
    pub trigger: TriggerConfig,
    /// Preferred side of the anchor.
    pub side: Side,
    /// Resolver tunables.
    pub placement: ResolveOptions,
    /// On compact screens, only flip between the preferred and opposite side.
    pub vertical_only_when_compact: bool,
    /// A swipe in this direction closes the panel.
    pub close_on_swipe: Option<SwipeDirection>,
    /// Only honor [`close_on_swipe`](Self::close_on_swipe) on compact screens.
    pub swipe_close_compact_only: bool,
    /// Gesture thresholds.
    pub gestures: GestureConfig,
    /// Arrow keys honored by the roving navigator.
    pub orientation: Orientation,
    /// Whether the roving index wraps around.
    pub looping: bool,
    /// Treat keyboard activation of an item as a selection (which may close
    /// the panel).
    pub select_on_activate: bool,
    /// On compact screens, activation toggles the panel whatever the trigger
    /// mode, since there is no hover there.
    pub activate_when_compact: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::default(),
            side: Side::Bottom,
            placement: ResolveOptions::default(),
            vertical_only_when_compact: false,
            close_on_swipe: None,
            swipe_close_compact_only: false,
            gestures: GestureConfig::default(),
            orientation: Orientation::Vertical,
            looping: true,
            select_on_activate: true,
            activate_when_compact: false,
        }
    }
}

impl PanelConfig {
    /// Returns this config with different trigger behavior.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = trigger;
        self
    }

    /// Returns this config with a different preferred side.
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Returns this config with different resolver tunables.
    #[must_use]
    pub fn with_placement(mut self, placement: ResolveOptions) -> Self {
        self.placement = placement;
        self
    }

    /// Returns this config restricted to vertical flips on compact screens.
    #[must_use]
    pub fn with_vertical_only_when_compact(mut self, vertical_only: bool) -> Self {
        self.vertical_only_when_compact = vertical_only;
        self
    }

    /// Returns this config closing on a swipe toward `direction`.
    #[must_use]
    pub fn with_swipe_close(mut self, direction: SwipeDirection, compact_only: bool) -> Self {
        self.close_on_swipe = Some(direction);
        self.swipe_close_compact_only = compact_only;
        self
    }

    /// Returns this config with different gesture thresholds.
    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    /// Returns this config with a different navigator orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns this config with looping on or off.
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Returns this config with activation-as-selection on or off.
    #[must_use]
    pub fn with_select_on_activate(mut self, select: bool) -> Self {
        self.select_on_activate = select;
        self
    }

    /// Returns this config with tap-to-toggle on compact screens on or off.
    #[must_use]
    pub fn with_activate_when_compact(mut self, activate: bool) -> Self {
        self.activate_when_compact = activate;
        self
    }
}

/// What [`PanelController::on_key`] did with a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not handled; let it propagate.
    Ignored,
    /// Consumed; suppress the default action.
    Handled,
    /// Consumed as an activation of the item at this index.
    Activated(usize),
}

impl KeyResponse {
    /// Whether the host should suppress the key's default action.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Drives one floating panel against a [`Host`].
///
/// Inputs from the host (pointer, focus, keys, touches, timers) go in through
/// the methods below; the controller runs them through the state machine and
/// applies the resulting effects: it schedules timers, attaches global
/// listeners, resolves placement when the panel opens, traps Tab focus and
/// auto-focuses the panel while open, restores focus on close, and reports
/// everything through [`Host::emit`].
///
/// Dropping the controller cancels its pending timer and detaches listeners
/// without emitting anything.
pub struct PanelController<K: Copy + Eq, H: Host<K>> {
    host: H,
    config: PanelConfig,
    machine: PanelMachine,
    focus: FocusManager<K>,
    trap: Option<FocusTrap<K>>,
    navigator: Navigator,
    touch: TouchTracker,
    placement: Option<Placement>,
}

impl<K: Copy + Eq + fmt::Debug, H: Host<K>> fmt::Debug for PanelController<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelController")
            .field("config", &self.config)
            .field("machine", &self.machine)
            .field("focus", &self.focus)
            .field("trap", &self.trap)
            .field("navigator", &self.navigator)
            .field("touch", &self.touch)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, H: Host<K>> PanelController<K, H> {
    /// Creates a closed controller.
    pub fn new(host: H, config: PanelConfig) -> Self {
        Self {
            host,
            config,
            machine: PanelMachine::new(config.trigger),
            focus: FocusManager::new(),
            trap: None,
            navigator: Navigator::new(0)
                .with_looping(config.looping)
                .with_orientation(config.orientation),
            touch: TouchTracker::new(config.gestures),
            placement: None,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Replaces the open/close behavior. Takes effect for the next input.
    pub fn set_trigger(&mut self, trigger: TriggerConfig) {
        self.config.trigger = trigger;
        self.machine.set_config(trigger);
    }

    /// The current state.
    pub fn state(&self) -> PanelState {
        self.machine.state()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.state() == PanelState::Open
    }

    /// The state machine.
    pub fn machine(&self) -> &PanelMachine {
        &self.machine
    }

    /// The placement computed when the panel opened or was last repositioned.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The roving navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Mutable access to the roving navigator.
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// The installed focus trap, while open.
    pub fn trap(&self) -> Option<&FocusTrap<K>> {
        self.trap.as_ref()
    }

    /// The node focus will return to on close.
    pub fn focus_snapshot(&self) -> Option<K> {
        self.focus.snapshot()
    }

    /// Sets the number of items the navigator roves over.
    pub fn set_item_count(&mut self, len: usize) {
        self.navigator.set_len(len);
    }

    /// Asks for the panel to open.
    pub fn request_open(&mut self, trigger: Trigger) {
        let fx = self.machine.request_open(trigger);
        self.apply(fx);
    }

    /// Asks for the panel to close.
    pub fn request_close(&mut self, reason: CloseReason) {
        let fx = self.machine.request_close(reason);
        self.apply(fx);
    }

    /// The anchor was activated.
    pub fn on_activate(&mut self) {
        self.sync_trigger();
        let fx = self.machine.on_activate();
        self.apply(fx);
    }

    /// The pointer entered the anchor.
    pub fn pointer_enter_anchor(&mut self) {
        self.sync_trigger();
        let fx = self.machine.pointer_enter_anchor();
        self.apply(fx);
    }

    /// The pointer left the anchor.
    pub fn pointer_leave_anchor(&mut self) {
        let fx = self.machine.pointer_leave_anchor();
        self.apply(fx);
    }

    /// The pointer entered the panel.
    pub fn pointer_enter_panel(&mut self) {
        let fx = self.machine.pointer_enter_panel();
        self.apply(fx);
    }

    /// The pointer left the panel.
    pub fn pointer_leave_panel(&mut self) {
        let fx = self.machine.pointer_leave_panel();
        self.apply(fx);
    }

    /// Focus entered the anchor.
    pub fn focus_in(&mut self) {
        self.sync_trigger();
        let fx = self.machine.focus_in();
        self.apply(fx);
    }

    /// Focus left the anchor.
    pub fn focus_out(&mut self, into_panel: bool) {
        let fx = self.machine.focus_out(into_panel);
        self.apply(fx);
    }

    /// A global listener saw a pointer-down or touch-start outside the anchor
    /// and panel.
    pub fn on_outside_interaction(&mut self) {
        let fx = self.machine.on_outside_interaction();
        self.apply(fx);
    }

    /// A timer scheduled through [`Host::schedule_timer`] fired.
    pub fn on_timer(&mut self, token: TimerToken) {
        let fx = self.machine.on_timer(token);
        self.apply(fx);
    }

    /// An item inside the panel was selected by the host.
    pub fn item_selected(&mut self) {
        let fx = self.machine.item_selected();
        self.apply(fx);
    }

    /// Disables or enables the panel.
    pub fn set_disabled(&mut self, disabled: bool) {
        let fx = self.machine.set_disabled(disabled);
        self.apply(fx);
    }

    /// Re-resolves placement against the host's current geometry.
    ///
    /// Call on viewport resize, scroll, or when the panel content changes
    /// size. Returns `None` while closed.
    pub fn reposition(&mut self) -> Option<Placement> {
        if !self.state().is_active() {
            return None;
        }
        let mut options = self.config.placement;
        if self.config.vertical_only_when_compact && self.host.is_compact() {
            options.allow_perpendicular = false;
        }
        let placement = resolve(
            self.host.anchor_rect(),
            self.host.panel_size(),
            self.config.side,
            self.host.viewport(),
            options,
        );
        self.placement = Some(placement);
        self.host.emit(PanelEvent::Placed(placement));
        Some(placement)
    }

    /// Resyncs with the panel content after it changed.
    ///
    /// Rebuilds the focus trap from [`Host::panel_targets`] and re-clamps the
    /// roving index to `item_count` items.
    pub fn content_changed(&mut self, item_count: usize) {
        self.navigator.set_len(item_count);
        if let Some(trap) = self.trap.as_mut() {
            let targets = self.host.panel_targets();
            trap.refresh(&FocusSpace { nodes: &targets });
        }
    }

    /// Routes a key press.
    ///
    /// Escape goes to the state machine, Tab and Shift+Tab to the focus trap,
    /// and everything else to the roving navigator while the panel is open.
    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) -> KeyResponse {
        if !self.state().is_active() {
            return KeyResponse::Ignored;
        }
        match key {
            Key::Escape => {
                let fx = self.machine.on_escape();
                if fx.is_empty() {
                    return KeyResponse::Ignored;
                }
                self.apply(fx);
                KeyResponse::Handled
            }
            Key::Tab => {
                let direction = if modifiers.contains(Modifiers::SHIFT) {
                    Navigation::Prev
                } else {
                    Navigation::Next
                };
                self.cycle_focus(direction)
            }
            _ if self.is_open() => self.rove(key),
            _ => KeyResponse::Ignored,
        }
    }

    /// Records a touch-start over the panel. Returns whether it is tracked.
    pub fn touch_start(&mut self, pointer: Option<PointerId>, position: Point) -> bool {
        if !self.is_open() {
            return false;
        }
        let now = self.host.now_ms();
        self.touch.on_start(pointer, position, now)
    }

    /// Records a touch-move. Returns whether the host should suppress scrolling.
    pub fn touch_move(&mut self, pointer: Option<PointerId>, position: Point) -> bool {
        self.touch.on_move(pointer, position)
    }

    /// Records a touch-end, emitting and returning the recognized gesture.
    ///
    /// A swipe matching [`PanelConfig::close_on_swipe`] closes the panel.
    pub fn touch_end(&mut self, pointer: Option<PointerId>, position: Point) -> Option<Gesture> {
        let now = self.host.now_ms();
        let gesture = self.touch.on_end(pointer, position, now)?;
        self.host.emit(PanelEvent::Gesture(gesture));
        if let Gesture::Swipe { direction, .. } = gesture
            && self.config.close_on_swipe == Some(direction)
            && (!self.config.swipe_close_compact_only || self.host.is_compact())
        {
            self.request_close(CloseReason::Swipe);
        }
        Some(gesture)
    }

    /// Drops the tracked touch without classifying it.
    pub fn touch_cancel(&mut self, pointer: Option<PointerId>) {
        self.touch.cancel(pointer);
    }

    /// Picks the trigger for the next open cycle. A shown panel keeps the mode
    /// it opened with.
    fn sync_trigger(&mut self) {
        if self.state().is_active() {
            return;
        }
        let mut trigger = self.config.trigger;
        if self.config.activate_when_compact && self.host.is_compact() {
            trigger.mode = TriggerMode::Explicit;
            trigger.close_on_outside_interaction = true;
        }
        if *self.machine.config() != trigger {
            self.machine.set_config(trigger);
        }
    }

    fn cycle_focus(&mut self, direction: Navigation) -> KeyResponse {
        let Some(trap) = self.trap.as_ref().filter(|t| !t.is_inert()) else {
            return KeyResponse::Ignored;
        };
        if let Some(next) = trap.next(self.host.focused(), direction) {
            self.host.focus(next);
        }
        KeyResponse::Handled
    }

    fn rove(&mut self, key: Key) -> KeyResponse {
        match self.navigator.handle_key(key) {
            Outcome::Moved { to, .. } => {
                self.host.emit(PanelEvent::Highlighted(to));
                KeyResponse::Handled
            }
            Outcome::Unchanged => KeyResponse::Handled,
            Outcome::Activate(index) => {
                self.host.emit(PanelEvent::Activated(index));
                if self.config.select_on_activate {
                    self.item_selected();
                }
                KeyResponse::Activated(index)
            }
            Outcome::Ignored => KeyResponse::Ignored,
        }
    }

    fn apply(&mut self, fx: Effects) {
        for effect in fx {
            match effect {
                Effect::ScheduleTimer { token, delay_ms } => {
                    self.host.schedule_timer(token, delay_ms);
                }
                Effect::CancelTimer(token) => self.host.cancel_timer(token),
                Effect::AttachListeners => self.host.attach_listeners(),
                Effect::DetachListeners => self.host.detach_listeners(),
                Effect::CaptureFocus => self.focus.capture(&self.host),
                Effect::ReleaseFocus => {
                    self.trap = None;
                    self.focus.release();
                }
                Effect::Opened => self.opened(),
                Effect::Closed {
                    reason,
                    restore_focus,
                } => self.closed(reason, restore_focus),
            }
        }
    }

    fn opened(&mut self) {
        self.reposition();
        self.navigator.reset();

        let targets = self.host.panel_targets();
        let space = FocusSpace { nodes: &targets };
        let initial = self.host.initial_focus();
        self.trap = Some(self.focus.trap(&space));
        self.focus.auto_focus_first(&space, initial, &mut self.host);

        let animate = !self.host.reduced_motion();
        self.host.emit(PanelEvent::Opened { animate });
    }

    fn closed(&mut self, reason: CloseReason, restore_focus: bool) {
        if let Some(trap) = self.trap.take() {
            trap.release();
        }
        self.navigator.reset();
        self.touch.reset();
        self.placement = None;
        if restore_focus {
            self.focus.restore(&mut self.host);
        } else {
            self.focus.release();
        }
        self.host.emit(PanelEvent::Closed(reason));
    }
}

impl<K: Copy + Eq, H: Host<K>> Drop for PanelController<K, H> {
    fn drop(&mut self) {
        for effect in self.machine.teardown() {
            match effect {
                Effect::CancelTimer(token) => self.host.cancel_timer(token),
                Effect::DetachListeners => self.host.detach_listeners(),
                _ => {}
            }
        }
        self.trap = None;
        self.focus.release();
    }
}
