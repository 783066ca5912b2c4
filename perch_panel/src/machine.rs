// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The open/close interaction state machine.
//!
//! [`PanelMachine`] is pure: it owns no host, reads no clock and starts no
//! timers. Every input returns a short list of [`Effect`]s describing what the
//! caller must do (schedule or cancel a timer, attach global listeners,
//! capture or restore focus, announce the transition). The
//! [`PanelController`](crate::PanelController) applies them to a
//! [`Host`](crate::Host); tests can inspect them directly.
//!
//! ## States
//!
//! ```text
//!            request_open               show timer
//!   Closed ──────────────► Opening ─────────────────► Open
//!     ▲                      │                         │
//!     │      request_close   │                         │ request_close
//!     ├──────────────────────┘                         ▼
//!     │            hide timer / immediate           Closing
//!     └──────────────────────────────────────────────┘ │
//!                                                      │ request_open
//!                                           Open ◄─────┘
//! ```
//!
//! Only hover-driven transitions are delayed. Explicit, focus, Escape and
//! outside-interaction transitions happen synchronously.
//!
//! ## Timers
//!
//! At most one timer is pending at a time. Scheduling cancels the previous
//! one first. Each [`TimerToken`] records the state it expects to leave; a
//! token that no longer matches the pending timer or the current state is
//! stale and ignored.

use smallvec::SmallVec;

/// Extra hide delay for interactive hover panels, so the pointer can travel
/// from the anchor into the panel.
pub const INTERACTIVE_GRACE_MS: u64 = 50;

/// Where a panel is in its open/close cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    /// Not shown.
    #[default]
    Closed,
    /// An open request was accepted; waiting for the show delay.
    Opening,
    /// Shown.
    Open,
    /// A hover close is waiting for the hide delay.
    Closing,
}

impl PanelState {
    /// Whether the panel is shown or about to be.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// What opens a panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerMode {
    /// Pointer hover over the anchor, with show and hide delays.
    Hover,
    /// Activation (click, tap, Enter) of the anchor toggles the panel.
    #[default]
    Explicit,
    /// Focus entering the anchor opens; focus leaving closes.
    Focus,
}

/// Open/close behavior of one panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerConfig {
    /// What opens the panel.
    pub mode: TriggerMode,
    /// Hover time before a hover panel opens.
    pub show_delay_ms: u64,
    /// Time after the pointer leaves before a hover panel closes.
    pub hide_delay_ms: u64,
    /// Close when the user interacts outside the anchor and panel.
    pub close_on_outside_interaction: bool,
    /// Close on Escape.
    pub close_on_escape: bool,
    /// Keep a hover panel open while the pointer is over the panel itself.
    pub interactive: bool,
    /// Close once an item inside the panel has been selected.
    pub close_on_select: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::explicit()
    }
}

impl TriggerConfig {
    /// Click-to-toggle, closed by Escape, outside interaction or selection.
    #[must_use]
    pub const fn explicit() -> Self {
        Self {
            mode: TriggerMode::Explicit,
            show_delay_ms: 0,
            hide_delay_ms: 0,
            close_on_outside_interaction: true,
            close_on_escape: true,
            interactive: false,
            close_on_select: true,
        }
    }

    /// Hover-driven with the given delays.
    #[must_use]
    pub const fn hover(show_delay_ms: u64, hide_delay_ms: u64) -> Self {
        Self {
            mode: TriggerMode::Hover,
            show_delay_ms,
            hide_delay_ms,
            close_on_outside_interaction: false,
            close_on_escape: true,
            interactive: false,
            close_on_select: false,
        }
    }

    /// Follows focus of the anchor.
    #[must_use]
    pub const fn focus() -> Self {
        Self {
            mode: TriggerMode::Focus,
            show_delay_ms: 0,
            hide_delay_ms: 0,
            close_on_outside_interaction: false,
            close_on_escape: true,
            interactive: false,
            close_on_select: false,
        }
    }

    /// Sets the show and hide delays.
    #[must_use]
    pub const fn with_delays(mut self, show_delay_ms: u64, hide_delay_ms: u64) -> Self {
        self.show_delay_ms = show_delay_ms;
        self.hide_delay_ms = hide_delay_ms;
        self
    }

    /// Sets whether outside interaction closes the panel.
    #[must_use]
    pub const fn with_close_on_outside_interaction(mut self, close: bool) -> Self {
        self.close_on_outside_interaction = close;
        self
    }

    /// Sets whether Escape closes the panel.
    #[must_use]
    pub const fn with_close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Sets whether a hover panel stays open while the panel is hovered.
    #[must_use]
    pub const fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets whether a selection inside the panel closes it.
    #[must_use]
    pub const fn with_close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = close;
        self
    }
}

/// The input behind an open request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The pointer entered the anchor (or an interactive panel).
    Hover,
    /// The anchor was activated.
    Activation,
    /// Focus entered the anchor.
    Focus,
    /// The host asked directly.
    Programmatic,
}

/// Why a panel closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Escape was pressed.
    Escape,
    /// The user pressed or touched outside the anchor and panel.
    OutsideInteraction,
    /// The pointer left a hover panel.
    PointerLeave,
    /// Focus left a focus-triggered panel.
    FocusOut,
    /// The anchor was activated again, or the host asked.
    Explicit,
    /// An item inside the panel was selected.
    Selection,
    /// The panel was swiped away.
    Swipe,
    /// The panel was disabled while shown.
    Disabled,
}

impl CloseReason {
    /// Whether focus goes back to where it was before the panel opened.
    ///
    /// Closes caused by the user moving elsewhere leave focus where they put it.
    #[must_use]
    pub const fn restores_focus(self) -> bool {
        matches!(
            self,
            Self::Escape | Self::Explicit | Self::Selection | Self::Swipe
        )
    }

    /// Whether the close honors the hide delay.
    const fn is_delayed(self) -> bool {
        matches!(self, Self::PointerLeave)
    }
}

/// Which delay a timer measures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// `Opening` to `Open`.
    Show,
    /// `Closing` to `Closed`.
    Hide,
}

/// Identifies one scheduled timer.
///
/// Hosts hand the token back to [`PanelMachine::on_timer`] when the delay
/// elapses. Tokens are unique per machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    id: u64,
    kind: TimerKind,
    from: PanelState,
}

impl TimerToken {
    /// Which delay this timer measures.
    #[must_use]
    pub const fn kind(self) -> TimerKind {
        self.kind
    }

    /// The state the machine must still be in for this timer to fire.
    #[must_use]
    pub const fn expects(self) -> PanelState {
        self.from
    }
}

/// A side effect requested by the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Call back with `token` after `delay_ms`.
    ScheduleTimer {
        /// Token to hand back.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u64,
    },
    /// Drop a previously scheduled timer.
    CancelTimer(TimerToken),
    /// Start listening for outside interaction and Escape.
    AttachListeners,
    /// Stop listening for outside interaction and Escape.
    DetachListeners,
    /// Snapshot the currently focused node for later restoration.
    CaptureFocus,
    /// Drop the focus snapshot without moving focus.
    ReleaseFocus,
    /// The panel is now open.
    Opened,
    /// The panel is now closed.
    Closed {
        /// Why.
        reason: CloseReason,
        /// Whether to return focus to the snapshot.
        restore_focus: bool,
    },
}

/// Effects produced by one input.
pub type Effects = SmallVec<[Effect; 4]>;

/// The pure open/close state machine for one panel.
#[derive(Clone, Debug)]
pub struct PanelMachine {
    config: TriggerConfig,
    state: PanelState,
    disabled: bool,
    pending: Option<TimerToken>,
    next_timer: u64,
    listening: bool,
    over_anchor: bool,
    over_panel: bool,
}

impl Default for PanelMachine {
    fn default() -> Self {
        Self::new(TriggerConfig::default())
    }
}

impl PanelMachine {
    /// Creates a closed machine.
    #[must_use]
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            state: PanelState::Closed,
            disabled: false,
            pending: None,
            next_timer: 0,
            listening: false,
            over_anchor: false,
            over_panel: false,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// The trigger configuration.
    #[must_use]
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Replaces the trigger configuration. Takes effect for the next input.
    pub fn set_config(&mut self, config: TriggerConfig) {
        self.config = config;
    }

    /// Whether open requests are refused.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The timer the machine is waiting on, if any.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Whether global listeners are attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Disables or enables the panel. Disabling a shown panel closes it.
    pub fn set_disabled(&mut self, disabled: bool) -> Effects {
        self.disabled = disabled;
        if disabled && self.state.is_active() {
            self.close_now(CloseReason::Disabled)
        } else {
            Effects::new()
        }
    }

    /// Asks for the panel to open.
    ///
    /// Hover requests honor the show delay. Requests while `Open` are absorbed,
    /// and a request while `Closing` cancels the hide timer.
    pub fn request_open(&mut self, trigger: Trigger) -> Effects {
        let mut fx = Effects::new();
        if self.disabled {
            #[cfg(feature = "tracing")]
            tracing::debug!(?trigger, "open refused: panel disabled");
            return fx;
        }
        let delayed = trigger == Trigger::Hover && self.config.show_delay_ms > 0;
        match self.state {
            PanelState::Closed => {
                fx.push(Effect::CaptureFocus);
                fx.push(Effect::AttachListeners);
                self.listening = true;
                if delayed {
                    self.transition(PanelState::Opening);
                    self.schedule(&mut fx, TimerKind::Show, self.config.show_delay_ms);
                } else {
                    self.transition(PanelState::Open);
                    fx.push(Effect::Opened);
                }
            }
            PanelState::Opening if !delayed => {
                self.cancel(&mut fx);
                self.transition(PanelState::Open);
                fx.push(Effect::Opened);
            }
            PanelState::Closing => {
                self.cancel(&mut fx);
                self.transition(PanelState::Open);
            }
            PanelState::Opening | PanelState::Open => {}
        }
        fx
    }

    /// Asks for the panel to close.
    ///
    /// [`CloseReason::PointerLeave`] honors the hide delay; every other reason
    /// closes immediately. Closing while `Opening` aborts the open without
    /// announcing either transition.
    pub fn request_close(&mut self, reason: CloseReason) -> Effects {
        match self.state {
            PanelState::Closed => Effects::new(),
            PanelState::Opening => self.abort_open(),
            PanelState::Open => {
                let delay = self.hide_delay();
                if reason.is_delayed() && delay > 0 {
                    let mut fx = Effects::new();
                    self.transition(PanelState::Closing);
                    self.schedule(&mut fx, TimerKind::Hide, delay);
                    fx
                } else {
                    self.close_now(reason)
                }
            }
            PanelState::Closing if !reason.is_delayed() => self.close_now(reason),
            PanelState::Closing => Effects::new(),
        }
    }

    /// Escape was pressed. Closes immediately when `close_on_escape` is set.
    pub fn on_escape(&mut self) -> Effects {
        if !self.config.close_on_escape {
            return Effects::new();
        }
        self.request_close(CloseReason::Escape)
    }

    /// The user interacted outside the anchor and panel.
    pub fn on_outside_interaction(&mut self) -> Effects {
        let eligible = matches!(self.state, PanelState::Open | PanelState::Opening);
        if !self.config.close_on_outside_interaction || !eligible {
            return Effects::new();
        }
        self.request_close(CloseReason::OutsideInteraction)
    }

    /// An item inside the panel was selected.
    pub fn item_selected(&mut self) -> Effects {
        if !self.config.close_on_select {
            return Effects::new();
        }
        self.request_close(CloseReason::Selection)
    }

    /// The anchor was activated. Toggles explicit panels; ignored otherwise.
    pub fn on_activate(&mut self) -> Effects {
        if self.config.mode != TriggerMode::Explicit {
            return Effects::new();
        }
        match self.state {
            PanelState::Closed | PanelState::Closing => self.request_open(Trigger::Activation),
            PanelState::Opening | PanelState::Open => self.request_close(CloseReason::Explicit),
        }
    }

    /// The pointer entered the anchor.
    pub fn pointer_enter_anchor(&mut self) -> Effects {
        self.over_anchor = true;
        if self.config.mode != TriggerMode::Hover {
            return Effects::new();
        }
        self.request_open(Trigger::Hover)
    }

    /// The pointer left the anchor.
    pub fn pointer_leave_anchor(&mut self) -> Effects {
        self.over_anchor = false;
        self.hover_exit()
    }

    /// The pointer entered the panel.
    pub fn pointer_enter_panel(&mut self) -> Effects {
        self.over_panel = true;
        if self.config.mode == TriggerMode::Hover
            && self.config.interactive
            && self.state == PanelState::Closing
        {
            return self.request_open(Trigger::Hover);
        }
        Effects::new()
    }

    /// The pointer left the panel.
    pub fn pointer_leave_panel(&mut self) -> Effects {
        self.over_panel = false;
        if !self.config.interactive {
            return Effects::new();
        }
        self.hover_exit()
    }

    /// Focus entered the anchor.
    pub fn focus_in(&mut self) -> Effects {
        if self.config.mode != TriggerMode::Focus {
            return Effects::new();
        }
        self.request_open(Trigger::Focus)
    }

    /// Focus left the anchor. `into_panel` is true when it moved into the panel.
    pub fn focus_out(&mut self, into_panel: bool) -> Effects {
        if self.config.mode != TriggerMode::Focus || into_panel {
            return Effects::new();
        }
        self.request_close(CloseReason::FocusOut)
    }

    /// A scheduled timer fired.
    pub fn on_timer(&mut self, token: TimerToken) -> Effects {
        if self.pending != Some(token) || token.from != self.state {
            #[cfg(feature = "tracing")]
            tracing::trace!(?token, state = ?self.state, "ignoring stale timer");
            return Effects::new();
        }
        self.pending = None;
        match token.kind {
            TimerKind::Show => {
                self.transition(PanelState::Open);
                let mut fx = Effects::new();
                fx.push(Effect::Opened);
                fx
            }
            TimerKind::Hide => self.close_now(CloseReason::PointerLeave),
        }
    }

    /// Cancels the pending timer and detaches listeners without announcing
    /// anything. Used when the panel is torn down.
    pub fn teardown(&mut self) -> Effects {
        let mut fx = Effects::new();
        self.cancel(&mut fx);
        self.detach(&mut fx);
        if self.state.is_active() {
            fx.push(Effect::ReleaseFocus);
        }
        self.state = PanelState::Closed;
        self.over_anchor = false;
        self.over_panel = false;
        fx
    }

    fn hover_exit(&mut self) -> Effects {
        let held = self.over_anchor || (self.config.interactive && self.over_panel);
        if self.config.mode != TriggerMode::Hover || held {
            return Effects::new();
        }
        self.request_close(CloseReason::PointerLeave)
    }

    fn hide_delay(&self) -> u64 {
        if self.config.interactive {
            self.config.hide_delay_ms.max(INTERACTIVE_GRACE_MS)
        } else {
            self.config.hide_delay_ms
        }
    }

    fn abort_open(&mut self) -> Effects {
        let mut fx = Effects::new();
        self.cancel(&mut fx);
        self.detach(&mut fx);
        fx.push(Effect::ReleaseFocus);
        self.transition(PanelState::Closed);
        fx
    }

    fn close_now(&mut self, reason: CloseReason) -> Effects {
        if self.state == PanelState::Opening {
            return self.abort_open();
        }
        let mut fx = Effects::new();
        self.cancel(&mut fx);
        self.detach(&mut fx);
        self.transition(PanelState::Closed);
        fx.push(Effect::Closed {
            reason,
            restore_focus: reason.restores_focus(),
        });
        fx
    }

    fn schedule(&mut self, fx: &mut Effects, kind: TimerKind, delay_ms: u64) {
        self.cancel(fx);
        self.next_timer += 1;
        let token = TimerToken {
            id: self.next_timer,
            kind,
            from: self.state,
        };
        self.pending = Some(token);
        fx.push(Effect::ScheduleTimer { token, delay_ms });
    }

    fn cancel(&mut self, fx: &mut Effects) {
        if let Some(token) = self.pending.take() {
            fx.push(Effect::CancelTimer(token));
        }
    }

    fn detach(&mut self, fx: &mut Effects) {
        if core::mem::take(&mut self.listening) {
            fx.push(Effect::DetachListeners);
        }
    }

    fn transition(&mut self, to: PanelState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = ?self.state, ?to, "panel state");
        self.state = to;
    }
}
