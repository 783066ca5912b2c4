// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport resolver.

use kurbo::{Rect, Size};

use crate::{Align, Side};

/// Default clearance between the anchor and the panel, in logical pixels.
const DEFAULT_GAP: f64 = 8.0;

/// Tunables for [`resolve`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveOptions {
    /// Clearance between the anchor edge and the panel.
    pub gap: f64,
    /// Cross-axis alignment of the panel against the anchor.
    pub align: Align,
    /// Whether the two perpendicular sides take part in the fallback chain.
    ///
    /// Compact layouts typically disable this so a panel only ever flips
    /// between above and below its anchor.
    pub allow_perpendicular: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            align: Align::Start,
            allow_perpendicular: true,
        }
    }
}

impl ResolveOptions {
    /// Returns these options with a different gap. Negative gaps are clamped to zero.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Returns these options with a different alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Returns these options with perpendicular fallback enabled or disabled.
    #[must_use]
    pub fn with_perpendicular(mut self, allow: bool) -> Self {
        self.allow_perpendicular = allow;
        self
    }
}

/// Result of [`resolve`].
///
/// `side` is always a member of the fallback chain that was evaluated. When no
/// candidate fit, it is the preferred side and `fits` is `false`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// The side the panel attaches to.
    pub side: Side,
    /// Distance between the anchor edge and the panel along the side normal.
    pub offset_primary: f64,
    /// Displacement of the panel's leading edge from the anchor's leading
    /// edge along the cross axis.
    pub offset_cross: f64,
    /// Whether the panel box is fully contained in the viewport.
    pub fits: bool,
}

impl Placement {
    /// Reconstructs the panel box for this placement.
    ///
    /// `anchor` and `size` should be the same values that were passed to
    /// [`resolve`].
    #[must_use]
    pub fn panel_rect(&self, anchor: Rect, size: Size) -> Rect {
        let anchor = anchor.abs();
        let size = clamp_size(size);
        let (x, y) = match self.side {
            Side::Top => (
                anchor.x0 + self.offset_cross,
                anchor.y0 - self.offset_primary - size.height,
            ),
            Side::Bottom => (anchor.x0 + self.offset_cross, anchor.y1 + self.offset_primary),
            Side::Left => (
                anchor.x0 - self.offset_primary - size.width,
                anchor.y0 + self.offset_cross,
            ),
            Side::Right => (anchor.x1 + self.offset_primary, anchor.y0 + self.offset_cross),
        };
        Rect::from_origin_size((x, y), size)
    }
}

/// Computes the box a panel of `size` would occupy on `side` of `anchor`.
#[must_use]
pub fn candidate_rect(anchor: Rect, size: Size, side: Side, options: &ResolveOptions) -> Rect {
    placement_for(anchor.abs(), clamp_size(size), side, options).panel_rect(anchor, size)
}

/// Picks the side of `anchor` on which a panel of `panel` size fits inside `viewport`.
///
/// Sides are tried in the order `[preferred, opposite, perpendicular...]`
/// (perpendicular sides only when [`ResolveOptions::allow_perpendicular`] is
/// set). The first side whose panel box lies fully inside the viewport wins.
/// When none fits, the preferred side is returned with `fits == false`.
///
/// Degenerate input (zero-sized anchor or panel, negative sizes, a panel larger
/// than the viewport) never panics.
#[must_use]
pub fn resolve(
    anchor: Rect,
    panel: Size,
    preferred: Side,
    viewport: Rect,
    options: ResolveOptions,
) -> Placement {
    let anchor = anchor.abs();
    let viewport = viewport.abs();
    let size = clamp_size(panel);
    let chain = preferred.fallback_chain();
    let candidates = if options.allow_perpendicular {
        &chain[..]
    } else {
        &chain[..2]
    };

    for &side in candidates {
        let placement = placement_for(anchor, size, side, &options);
        if contains(viewport, placement.panel_rect(anchor, size)) {
            return Placement {
                fits: true,
                ..placement
            };
        }
    }

    placement_for(anchor, size, preferred, &options)
}

fn placement_for(anchor: Rect, size: Size, side: Side, options: &ResolveOptions) -> Placement {
    let offset_cross = if side.is_vertical() {
        options.align.offset(anchor.width(), size.width)
    } else {
        options.align.offset(anchor.height(), size.height)
    };
    Placement {
        side,
        offset_primary: options.gap.max(0.0),
        offset_cross,
        fits: false,
    }
}

fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

fn contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
