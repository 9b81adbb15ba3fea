use alloc::vec::Vec;

use crate::{Align, CellRange, CellSize, GridError, SizeAndPosition};

/// Maps cell indexes to cumulative pixel offsets along one axis.
///
/// `Fixed` axes are answered arithmetically. `Computed` axes are measured lazily: the manager
/// keeps an exact prefix of `SizeAndPosition`s (cells `0..=last_measured_index`) and only ever
/// extends it forward, so the cost of calling the size getter is paid once per cell until
/// [`Self::reset_cell`] invalidates part of the prefix. Cells past the prefix are extrapolated
/// with the estimated cell size.
///
/// All scroll offsets taken and returned by this type are in scroll coordinates. They equal
/// content coordinates unless a `max_scroll_size` is configured and the content exceeds it, in
/// which case offsets are scaled proportionally (see [`Self::offset_adjustment`]). Cell
/// positions returned by [`Self::size_and_position_of_cell`] are always content coordinates.
#[derive(Clone, Debug)]
pub struct SizeAndPositionManager {
    cell_count: usize,
    cell_size: CellSize,
    estimated_cell_size: u32,
    max_scroll_size: Option<u64>,
    measured: Vec<SizeAndPosition>,
}

impl SizeAndPositionManager {
    pub fn new(cell_count: usize, cell_size: CellSize, estimated_cell_size: u32) -> Self {
        Self {
            cell_count,
            cell_size,
            estimated_cell_size,
            max_scroll_size: None,
            measured: Vec::new(),
        }
    }

    pub fn with_max_scroll_size(mut self, max_scroll_size: Option<u64>) -> Self {
        self.max_scroll_size = max_scroll_size;
        self
    }

    /// Re-initializes the axis and drops every cached measurement.
    pub fn configure(&mut self, cell_count: usize, cell_size: CellSize, estimated_cell_size: u32) {
        gdebug!(
            cell_count,
            estimated_cell_size,
            dropped = self.measured.len(),
            "SizeAndPositionManager::configure"
        );
        self.cell_count = cell_count;
        self.cell_size = cell_size;
        self.estimated_cell_size = estimated_cell_size;
        self.measured.clear();
    }

    /// Changes the cell count, keeping measurements for cells that still exist.
    pub fn set_cell_count(&mut self, cell_count: usize) {
        self.cell_count = cell_count;
        self.measured.truncate(cell_count);
    }

    pub fn set_max_scroll_size(&mut self, max_scroll_size: Option<u64>) {
        self.max_scroll_size = max_scroll_size;
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn cell_size(&self) -> &CellSize {
        &self.cell_size
    }

    pub fn estimated_cell_size(&self) -> u32 {
        self.cell_size.estimate(self.estimated_cell_size)
    }

    pub fn max_scroll_size(&self) -> Option<u64> {
        self.max_scroll_size
    }

    /// Highest index whose offset is known exactly, if any.
    pub fn last_measured_index(&self) -> Option<usize> {
        match self.cell_size {
            CellSize::Fixed(_) => self.cell_count.checked_sub(1),
            CellSize::Computed(_) => self.measured.len().checked_sub(1),
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.last_measured_index().is_some_and(|last| index <= last)
    }

    /// Returns the exact offset and size of a cell, measuring up to it if needed.
    pub fn size_and_position_of_cell(
        &mut self,
        index: usize,
    ) -> Result<SizeAndPosition, GridError> {
        if index >= self.cell_count {
            return Err(GridError::IndexOutOfRange {
                index,
                count: self.cell_count,
            });
        }
        Ok(self.cell(index))
    }

    /// Offset of any index without measuring anything.
    ///
    /// Exact inside the measured prefix, extrapolated with the estimated size beyond it. The
    /// index may exceed the cell count.
    pub fn estimated_offset(&self, index: usize) -> u64 {
        if let Some(size) = self.cell_size.fixed_size() {
            return index as u64 * size as u64;
        }
        if let Some(cell) = self.measured.get(index) {
            return cell.offset;
        }
        let unmeasured = (index - self.measured.len()) as u64;
        self.measured_end()
            .saturating_add(unmeasured.saturating_mul(self.estimated_cell_size() as u64))
    }

    /// Real content size: measured cells plus an estimate for the rest.
    pub fn content_size(&self) -> u64 {
        self.estimated_offset(self.cell_count)
    }

    /// Scrollable size, capped at `max_scroll_size` when one is set.
    pub fn total_size(&self) -> u64 {
        let content = self.content_size();
        match self.max_scroll_size {
            Some(max) => content.min(max),
            None => content,
        }
    }

    /// Whether scroll offsets are being scaled because the content exceeds `max_scroll_size`.
    pub fn offsets_adjusted(&self) -> bool {
        self.total_size() != self.content_size()
    }

    /// Returns the cells intersecting `[offset, offset + container_size]`.
    ///
    /// The trailing edge is inclusive: a cell starting exactly at `offset + container_size` is
    /// part of the range. When the window runs past the end of the content (the content shrank
    /// after the offset was taken), the range is that of the last full window; the matching
    /// shift is reported by [`Self::offset_adjustment`]. Returns `None` for an empty axis, an
    /// axis of total size 0, or a zero container.
    pub fn visible_cell_range(&mut self, container_size: u32, offset: u64) -> Option<CellRange> {
        if self.cell_count == 0 || container_size == 0 || self.total_size() == 0 {
            return None;
        }

        let container = container_size as u64;
        let offset = self.safe_offset_to_offset(container_size, offset);
        let last = self.cell_count - 1;
        let mut start = self.find_nearest_cell(offset);
        let stop = self.find_stop(start, offset.saturating_add(container));

        if stop == last {
            // Everything up to the last cell is measured, so the content size is exact.
            let window_start = offset.min(self.content_size().saturating_sub(container));
            if window_start < offset {
                start = self.find_nearest_cell(window_start);
            }
        }
        gtrace!(offset, container_size, start, stop, "visible_cell_range");
        Some(CellRange::new(start, stop))
    }

    // Index of the cell containing `max_offset` (inclusive), searching forward from `start`.
    fn find_stop(&mut self, start: usize, max_offset: u64) -> usize {
        let last = self.cell_count - 1;
        if let Some(size) = self.cell_size.fixed_size() {
            let stop = (max_offset / size as u64).min(last as u64) as usize;
            return stop.max(start);
        }

        let mut end = self.cell(start).end();
        let mut stop = start;
        while end <= max_offset && stop < last {
            stop += 1;
            end = end.saturating_add(self.cell(stop).size as u64);
        }
        stop
    }

    /// Shift to apply to content positions so rendered cells line up with the scrollbar.
    ///
    /// Non-zero in two situations:
    /// - the content is larger than `max_scroll_size`, so scroll offsets are scaled and cell
    ///   positions must be mapped into the scaled space;
    /// - the window runs past the end of the content (the content shrank after measuring),
    ///   in which case the last full window reported by [`Self::visible_cell_range`] is
    ///   shifted down to the held offset instead of leaving a gap.
    pub fn offset_adjustment(&self, container_size: u32, offset: u64) -> i64 {
        let content = self.content_size();
        let safe_total = self.total_size();
        let container = container_size as u64;

        let mut adjustment = 0i64;
        if content != safe_total && safe_total > container {
            let numerator = offset as i128 * (safe_total as i128 - content as i128);
            adjustment = div_round(numerator, (safe_total - container) as i128) as i64;
        }

        let real_offset = self.safe_offset_to_offset(container_size, offset);
        let overflow = real_offset
            .saturating_add(container)
            .saturating_sub(content.max(container));
        adjustment.saturating_add(overflow as i64)
    }

    /// Computes the scroll offset that brings `target_index` into view under `align`.
    ///
    /// The target is clamped to the last cell. The result is clamped to
    /// `[0, total_size - container_size]`. Returns 0 for an empty axis or a zero container.
    pub fn updated_offset_for_index(
        &mut self,
        align: Align,
        container_size: u32,
        current_offset: u64,
        target_index: usize,
    ) -> u64 {
        if container_size == 0 || self.cell_count == 0 {
            return 0;
        }

        let target = target_index.min(self.cell_count - 1);
        let current = self.safe_offset_to_offset(container_size, current_offset) as i64;
        let datum = self.cell(target);

        let container = container_size as i64;
        let cell_start = datum.offset as i64;
        let cell_size = datum.size as i64;
        let start_aligned = cell_start;
        let end_aligned = cell_start + cell_size - container;

        let ideal = match align {
            Align::Start => start_aligned,
            Align::End => end_aligned,
            Align::Center => cell_start + cell_size / 2 - container / 2,
            Align::Auto => {
                if cell_start >= current && cell_start + cell_size <= current + container {
                    current
                } else if (start_aligned - current).abs() <= (end_aligned - current).abs() {
                    start_aligned
                } else {
                    end_aligned
                }
            }
        };

        let content = self.content_size() as i64;
        let real = ideal.min(content - container).max(0) as u64;
        self.offset_to_safe_offset(container_size, real)
    }

    /// Invalidates the measurement of `index` and every cell after it.
    pub fn reset_cell(&mut self, index: usize) {
        if self.measured.len() > index {
            gdebug!(
                index,
                dropped = self.measured.len() - index,
                "SizeAndPositionManager::reset_cell"
            );
            self.measured.truncate(index);
        }
    }

    fn measured_end(&self) -> u64 {
        self.measured.last().map_or(0, SizeAndPosition::end)
    }

    // Callers guarantee `index < cell_count`.
    pub(crate) fn cell(&mut self, index: usize) -> SizeAndPosition {
        if let Some(size) = self.cell_size.fixed_size() {
            return SizeAndPosition {
                offset: index as u64 * size as u64,
                size,
            };
        }
        self.measure_through(index);
        self.measured[index]
    }

    fn measure_through(&mut self, index: usize) {
        let CellSize::Computed(getter) = &self.cell_size else {
            return;
        };
        let first = self.measured.len();
        if index < first {
            return;
        }

        let mut offset = self.measured_end();
        self.measured.reserve(index + 1 - first);
        for i in first..=index {
            let size = getter(i);
            self.measured.push(SizeAndPosition { offset, size });
            offset = offset.saturating_add(size as u64);
        }
        gtrace!(from = first, to = index, "measure_through");
    }

    // Index of the cell containing `offset` (content coordinates), clamped to the last cell.
    // Requires `cell_count > 0`.
    fn find_nearest_cell(&mut self, offset: u64) -> usize {
        let last = self.cell_count - 1;

        if let Some(size) = self.cell_size.fixed_size() {
            if size == 0 {
                return 0;
            }
            return (offset / size as u64).min(last as u64) as usize;
        }

        let covered = self.measured.last().is_some_and(|c| c.offset >= offset);
        if !covered {
            // Exponential search forward from the last measured cell.
            let mut index = self.measured.len().saturating_sub(1);
            let mut interval = 1usize;
            loop {
                let candidate = index.min(last);
                self.measure_through(candidate);
                if candidate == last || self.measured[candidate].offset >= offset {
                    break;
                }
                index = index.saturating_add(interval);
                interval = interval.saturating_mul(2);
            }
        }

        let consumed = self.measured.partition_point(|c| c.offset <= offset);
        consumed.saturating_sub(1).min(last)
    }

    fn safe_offset_to_offset(&self, container_size: u32, offset: u64) -> u64 {
        let content = self.content_size();
        let safe_total = self.total_size();
        if content == safe_total {
            return offset;
        }
        let container = container_size as u64;
        if safe_total <= container {
            return 0;
        }
        div_round_u(
            offset as u128 * content.saturating_sub(container) as u128,
            (safe_total - container) as u128,
        ) as u64
    }

    fn offset_to_safe_offset(&self, container_size: u32, offset: u64) -> u64 {
        let content = self.content_size();
        let safe_total = self.total_size();
        if content == safe_total {
            return offset;
        }
        let container = container_size as u64;
        if content <= container {
            return 0;
        }
        div_round_u(
            offset as u128 * safe_total.saturating_sub(container) as u128,
            (content - container) as u128,
        ) as u64
    }
}

// Round half up, matching the rounding used for scroll positions by browsers.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    (numerator * 2 + denominator).div_euclid(denominator * 2)
}

fn div_round_u(numerator: u128, denominator: u128) -> u128 {
    (numerator * 2 + denominator) / (denominator * 2)
}
