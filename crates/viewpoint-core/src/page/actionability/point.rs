//! Supporting types for clickable-point and scroll-based actionability helpers.

use crate::page::locator::BoundingBox;

/// The point a click should land on, together with the element's rect.
#[derive(Debug, Clone, Copy)]
pub struct ClickablePoint {
    /// Viewport x coordinate to dispatch the click at.
    pub x: f64,
    /// Viewport y coordinate to dispatch the click at.
    pub y: f64,
    /// The element's bounding box the point was derived from.
    pub rect: BoundingBox,
}

/// Axis to scroll along in [`super::scroll_until_visible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
}

impl ScrollDirection {
    pub(super) fn delta(self, amount: f64) -> (f64, f64) {
        match self {
            ScrollDirection::Vertical => (0.0, amount),
            ScrollDirection::Horizontal => (amount, 0.0),
        }
    }
}

/// Options for [`super::scroll_until_visible`].
#[derive(Debug, Clone, Copy)]
pub struct ScrollUntilVisibleOptions {
    /// Maximum number of scroll attempts before giving up.
    pub max_scrolls: u32,
    /// Pixels to scroll per attempt.
    pub scroll_amount: f64,
    /// Axis to scroll along.
    pub direction: ScrollDirection,
}

impl Default for ScrollUntilVisibleOptions {
    fn default() -> Self {
        Self {
            max_scrolls: 10,
            scroll_amount: 400.0,
            direction: ScrollDirection::Vertical,
        }
    }
}
