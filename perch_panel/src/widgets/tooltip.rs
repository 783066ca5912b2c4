// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltips.

use perch_placement::{Align, ResolveOptions, Side};

use crate::{PanelConfig, TriggerConfig, TriggerMode};

/// Hover time before a tooltip appears.
pub const SHOW_DELAY_MS: u64 = 300;

/// Time after the pointer leaves before a tooltip disappears.
pub const HIDE_DELAY_MS: u64 = 0;

/// Clearance between the anchor and the tooltip.
pub const OFFSET: f64 = 8.0;

/// The tooltip preset.
///
/// Shown above the anchor and centered on it; on compact screens it only
/// flips between above and below, and a tap on the anchor toggles it whatever
/// `trigger` says.
///
/// - [`TriggerMode::Hover`] waits [`SHOW_DELAY_MS`] before showing. An
///   `interactive` tooltip stays open while the pointer is over it.
/// - [`TriggerMode::Explicit`] toggles on click and closes on outside
///   interaction.
/// - [`TriggerMode::Focus`] follows focus of the anchor.
#[must_use]
pub fn config(trigger: TriggerMode, interactive: bool) -> PanelConfig {
    let trigger = match trigger {
        TriggerMode::Hover => {
            TriggerConfig::hover(SHOW_DELAY_MS, HIDE_DELAY_MS).with_interactive(interactive)
        }
        TriggerMode::Explicit => TriggerConfig::explicit().with_close_on_select(false),
        TriggerMode::Focus => TriggerConfig::focus(),
    };
    PanelConfig::default()
        .with_trigger(trigger)
        .with_side(Side::Top)
        .with_placement(
            ResolveOptions::default()
                .with_gap(OFFSET)
                .with_align(Align::Center),
        )
        .with_vertical_only_when_compact(true)
        .with_activate_when_compact(true)
        .with_select_on_activate(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_modes_map_to_presets() {
        let hover = config(TriggerMode::Hover, true).trigger;
        assert_eq!(hover.mode, TriggerMode::Hover);
        assert_eq!(hover.show_delay_ms, SHOW_DELAY_MS);
        assert!(hover.interactive, "hover tooltips honor `interactive`");

        let click = config(TriggerMode::Explicit, false).trigger;
        assert_eq!(click.mode, TriggerMode::Explicit);
        assert!(click.close_on_outside_interaction, "click tooltips close outside");
        assert!(!click.close_on_select, "tooltips have nothing to select");

        assert_eq!(config(TriggerMode::Focus, false).trigger.mode, TriggerMode::Focus);
        assert!(config(TriggerMode::Focus, false).activate_when_compact, "taps toggle");
    }
}
