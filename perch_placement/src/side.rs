// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor sides and cross-axis alignment.

/// Edge of the anchor a panel attaches to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// The side across the anchor from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The two sides perpendicular to this one, in `[Top, Bottom]` or
    /// `[Left, Right]` order.
    #[must_use]
    pub const fn perpendicular(self) -> [Self; 2] {
        if self.is_vertical() {
            [Self::Left, Self::Right]
        } else {
            [Self::Top, Self::Bottom]
        }
    }

    /// Whether the panel stacks above or below the anchor.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The order in which sides are tried when this side is preferred.
    #[must_use]
    pub const fn fallback_chain(self) -> [Self; 4] {
        let [a, b] = self.perpendicular();
        [self, self.opposite(), a, b]
    }
}

/// Position of the panel along the anchor's cross axis.
///
/// For [`Side::Top`] and [`Side::Bottom`] the cross axis is horizontal: `Start`
/// lines up left edges, `End` lines up right edges. For [`Side::Left`] and
/// [`Side::Right`] it is vertical.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Leading edges coincide.
    #[default]
    Start,
    /// Panel is centered on the anchor.
    Center,
    /// Trailing edges coincide.
    End,
}

impl Align {
    /// Offset of a panel of `extent` from the anchor's leading edge, given the
    /// anchor's own extent on the same axis.
    #[must_use]
    pub fn offset(self, anchor_extent: f64, extent: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (anchor_extent - extent) * 0.5,
            Self::End => anchor_extent - extent,
        }
    }
}
