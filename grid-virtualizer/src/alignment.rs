use crate::{Align, ScrollState, SizeAndPositionManager};

/// A scroll-to-cell request. `None` leaves that axis alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToCell {
    pub row: Option<usize>,
    pub column: Option<usize>,
}

impl ScrollToCell {
    pub fn new(row: Option<usize>, column: Option<usize>) -> Self {
        Self { row, column }
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_none() && self.column.is_none()
    }
}

/// Offsets that bring a requested cell into view.
///
/// An axis is `Some` only when its offset differs from the current one, so an all-`None`
/// result means the request is a no-op and nothing needs to re-render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignedOffsets {
    pub scroll_left: Option<u64>,
    pub scroll_top: Option<u64>,
}

impl AlignedOffsets {
    pub fn is_noop(&self) -> bool {
        self.scroll_left.is_none() && self.scroll_top.is_none()
    }
}

/// Applies an alignment policy to both axes of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollAlignmentSolver {
    pub align: Align,
    /// Thickness of the host's scrollbars. When content overflows one axis, its scrollbar eats
    /// into the container of the other axis.
    pub scrollbar_size: u32,
}

impl ScrollAlignmentSolver {
    pub fn new(align: Align, scrollbar_size: u32) -> Self {
        Self {
            align,
            scrollbar_size,
        }
    }

    /// Computes the offsets needed to show `target` in a `width` x `height` container.
    ///
    /// Targets past the end of an axis are clamped to its last cell. Returns a no-op when the
    /// container has zero area.
    pub fn solve(
        &self,
        state: &ScrollState,
        target: ScrollToCell,
        rows: &mut SizeAndPositionManager,
        columns: &mut SizeAndPositionManager,
        width: u32,
        height: u32,
    ) -> AlignedOffsets {
        if width == 0 || height == 0 {
            return AlignedOffsets::default();
        }

        let scroll_left = target.column.and_then(|column| {
            if columns.cell_count() == 0 {
                return None;
            }
            let scrollbar = if rows.total_size() > height as u64 {
                self.scrollbar_size
            } else {
                0
            };
            let next = columns.updated_offset_for_index(
                self.align,
                width.saturating_sub(scrollbar),
                state.scroll_left,
                column,
            );
            (next != state.scroll_left).then_some(next)
        });

        let scroll_top = target.row.and_then(|row| {
            if rows.cell_count() == 0 {
                return None;
            }
            let scrollbar = if columns.total_size() > width as u64 {
                self.scrollbar_size
            } else {
                0
            };
            let next = rows.updated_offset_for_index(
                self.align,
                height.saturating_sub(scrollbar),
                state.scroll_top,
                row,
            );
            (next != state.scroll_top).then_some(next)
        });

        gtrace!(
            row = ?target.row,
            column = ?target.column,
            scroll_left = ?scroll_left,
            scroll_top = ?scroll_top,
            "ScrollAlignmentSolver::solve"
        );
        AlignedOffsets {
            scroll_left,
            scroll_top,
        }
    }
}
