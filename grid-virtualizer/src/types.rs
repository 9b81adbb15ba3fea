use core::ops::RangeInclusive;

/// Alignment policy used when bringing a cell into view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll the least amount possible to make the cell fully visible.
    #[default]
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

/// One dimension of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Columns (scrolls with `scroll_left`).
    Horizontal,
    /// Rows (scrolls with `scroll_top`).
    Vertical,
}

/// Why the held scroll position last changed.
///
/// Hosts only need to write the position back to their scroll container for `Requested`
/// changes; `Observed` changes came from that container in the first place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPositionChangeReason {
    Observed,
    Requested,
}

/// Offset and size of a single cell along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeAndPosition {
    pub offset: u64,
    pub size: u32,
}

impl SizeAndPosition {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// A contiguous, non-empty range of cell indexes along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    pub start: usize,
    pub stop: usize, // inclusive
}

impl CellRange {
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "CellRange: start > stop ({start} > {stop})");
        Self { start, stop }
    }

    pub fn len(&self) -> usize {
        self.stop - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.stop
    }

    /// Returns `true` when `other` lies entirely inside `self`.
    pub fn covers(&self, other: &CellRange) -> bool {
        self.start <= other.start && self.stop >= other.stop
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.start..=self.stop
    }
}

/// Composite cache key for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    pub row: usize,
    pub column: usize,
}

impl CellKey {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Absolute layout of a cell inside the scrollable content.
///
/// `left`/`top` include any offset adjustment in effect when the style was computed, so they
/// may be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStyle {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

/// A scroll position in scroll coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub scroll_left: u64,
    pub scroll_top: u64,
}

/// Total content size, used by hosts to size their scrollbars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width: u64,
    pub height: u64,
}

/// The index window produced by one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedSection {
    pub column_overscan: CellRange,
    pub column_visible: CellRange,
    pub row_overscan: CellRange,
    pub row_visible: CellRange,
    pub horizontal_offset_adjustment: i64,
    pub vertical_offset_adjustment: i64,
}

impl RenderedSection {
    pub fn contains(&self, key: CellKey) -> bool {
        self.row_overscan.contains(key.row) && self.column_overscan.contains(key.column)
    }

    pub fn is_visible(&self, key: CellKey) -> bool {
        self.row_visible.contains(key.row) && self.column_visible.contains(key.column)
    }
}

/// Emitted when a scrollbar appears or disappears on either axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollbarPresenceChange {
    pub horizontal: bool,
    pub vertical: bool,
    pub size: u32,
}
