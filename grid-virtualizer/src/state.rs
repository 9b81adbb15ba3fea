use core::cmp::Ordering;

use crate::{Axis, ScrollDirection, ScrollPositionChangeReason};

/// Scroll position plus the bookkeeping derived from how it got there.
///
/// Transitions are pure: each returns the next state, or `None` when the input would not change
/// anything, so a host holding one `ScrollState` per grid can skip re-rendering on `None`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_left: u64,
    pub scroll_top: u64,
    pub direction_horizontal: ScrollDirection,
    pub direction_vertical: ScrollDirection,
    pub is_scrolling: bool,
    pub change_reason: Option<ScrollPositionChangeReason>,
}

/// Largest offsets the state may hold on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollBounds {
    pub max_left: u64,
    pub max_top: u64,
}

impl ScrollBounds {
    /// Bounds for content of `total` size inside a container of `container` size.
    ///
    /// `scrollbar_size` extends the range so content under a scrollbar can still be reached.
    pub fn for_content(
        total_width: u64,
        total_height: u64,
        container_width: u32,
        container_height: u32,
        scrollbar_size: u32,
    ) -> Self {
        let sb = scrollbar_size as u64;
        Self {
            max_left: total_width
                .saturating_add(sb)
                .saturating_sub(container_width as u64),
            max_top: total_height
                .saturating_add(sb)
                .saturating_sub(container_height as u64),
        }
    }
}

impl ScrollState {
    /// Applies offsets reported by the host's scroll container.
    ///
    /// Offsets are clamped to `bounds` before comparison. Direction only changes on an axis
    /// whose offset changed. The state becomes `is_scrolling`.
    pub fn observe(self, left: u64, top: u64, bounds: ScrollBounds) -> Option<Self> {
        let left = left.min(bounds.max_left);
        let top = top.min(bounds.max_top);
        if left == self.scroll_left && top == self.scroll_top {
            return None;
        }
        Some(Self {
            scroll_left: left,
            scroll_top: top,
            direction_horizontal: direction_between(
                self.scroll_left,
                left,
                self.direction_horizontal,
            ),
            direction_vertical: direction_between(self.scroll_top, top, self.direction_vertical),
            is_scrolling: true,
            change_reason: Some(ScrollPositionChangeReason::Observed),
        })
    }

    /// Applies a programmatic scroll request. `None` leaves that axis alone.
    ///
    /// Does not touch `is_scrolling`.
    pub fn request(
        self,
        left: Option<u64>,
        top: Option<u64>,
        bounds: ScrollBounds,
    ) -> Option<Self> {
        let left = left.map_or(self.scroll_left, |l| l.min(bounds.max_left));
        let top = top.map_or(self.scroll_top, |t| t.min(bounds.max_top));
        if left == self.scroll_left && top == self.scroll_top {
            return None;
        }
        Some(Self {
            scroll_left: left,
            scroll_top: top,
            direction_horizontal: direction_between(
                self.scroll_left,
                left,
                self.direction_horizontal,
            ),
            direction_vertical: direction_between(self.scroll_top, top, self.direction_vertical),
            change_reason: Some(ScrollPositionChangeReason::Requested),
            ..self
        })
    }

    /// Ends a scroll burst.
    pub fn settle(self) -> Option<Self> {
        if !self.is_scrolling {
            return None;
        }
        Some(Self {
            is_scrolling: false,
            ..self
        })
    }

    pub fn direction(&self, axis: Axis) -> ScrollDirection {
        match axis {
            Axis::Horizontal => self.direction_horizontal,
            Axis::Vertical => self.direction_vertical,
        }
    }
}

fn direction_between(prev: u64, next: u64, current: ScrollDirection) -> ScrollDirection {
    match next.cmp(&prev) {
        Ordering::Greater => ScrollDirection::Forward,
        Ordering::Less => ScrollDirection::Backward,
        Ordering::Equal => current,
    }
}
