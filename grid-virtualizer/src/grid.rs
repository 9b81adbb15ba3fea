use crate::alignment::{ScrollAlignmentSolver, ScrollToCell};
use crate::overscan::{OverscanParams, overscan_with};
use crate::{
    Axis, CellKey, CellRange, CellSize, CellStyle, GridError, GridOptions, GridSize, RenderCache,
    RenderedSection, ScrollBounds, ScrollDirection, ScrollPosition, ScrollPositionChangeReason,
    ScrollState, ScrollStateMachine, ScrollTransition, ScrollbarPresenceChange, SizeAndPosition,
    SizeAndPositionManager,
};

/// What the host's cell renderer receives for each cell of a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRenderParams {
    pub row: usize,
    pub column: usize,
    pub style: CellStyle,
    pub is_scrolling: bool,
    /// `false` for overscanned cells outside the viewport.
    pub is_visible: bool,
}

impl CellRenderParams {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row, self.column)
    }
}

/// A headless windowing engine for a two-dimensional grid.
///
/// `Grid` owns one [`SizeAndPositionManager`] per axis, the scroll state machine and the
/// render cache. It holds no UI objects: the host feeds it container sizes, scroll events and
/// clock ticks, and asks it which cells to render.
///
/// A typical frame:
/// 1. forward scroll events with [`Grid::handle_scroll_event`];
/// 2. call [`Grid::tick`] with the current time;
/// 3. render through [`Grid::for_each_cell`] (or read [`Grid::render_section`]);
/// 4. write [`Grid::requested_scroll_position`] back to the scroll container, if any.
///
/// `C` is the type produced by the host's cell renderer and cached between frames.
#[derive(Clone, Debug)]
pub struct Grid<C = ()> {
    options: GridOptions,
    rows: SizeAndPositionManager,
    columns: SizeAndPositionManager,
    machine: ScrollStateMachine,
    cache: RenderCache<C>,

    section: Option<RenderedSection>,

    recompute_scroll_left: bool,
    recompute_scroll_top: bool,
    deferred_invalidate: Option<CellKey>,

    horizontal_scrollbar_size: u32,
    vertical_scrollbar_size: u32,
    scrollbar_presence_changed: bool,
}

impl<C> Grid<C> {
    pub fn new(options: GridOptions) -> Self {
        gdebug!(
            row_count = options.row_count,
            column_count = options.column_count,
            width = options.width,
            height = options.height,
            "Grid::new"
        );
        let rows = SizeAndPositionManager::new(
            options.row_count,
            options.row_height.clone(),
            options.estimated_row_size,
        )
        .with_max_scroll_size(options.max_scroll_size);
        let columns = SizeAndPositionManager::new(
            options.column_count,
            options.column_width.clone(),
            options.estimated_column_size,
        )
        .with_max_scroll_size(options.max_scroll_size);

        let mut grid = Self {
            machine: ScrollStateMachine::new(options.scrolling_reset_time_interval_ms),
            rows,
            columns,
            options,
            cache: RenderCache::new(),
            section: None,
            recompute_scroll_left: false,
            recompute_scroll_top: false,
            deferred_invalidate: None,
            horizontal_scrollbar_size: 0,
            vertical_scrollbar_size: 0,
            scrollbar_presence_changed: false,
        };
        grid.apply_scroll_to(Axis::Horizontal);
        grid.apply_scroll_to(Axis::Vertical);
        grid
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the options, rebuilding only what changed.
    ///
    /// - An axis whose size getter or estimate changed is re-measured from scratch and the
    ///   style cache is dropped.
    /// - An axis whose only change is its cell count keeps the measurements of surviving cells.
    /// - The held scroll position is clamped into the new bounds.
    /// - `scroll_to_row` / `scroll_to_column` are re-applied when the target, the alignment,
    ///   the container, or the axis changed.
    pub fn set_options(&mut self, options: GridOptions) {
        let prev = core::mem::replace(&mut self.options, options);
        gtrace!(
            row_count = self.options.row_count,
            column_count = self.options.column_count,
            width = self.options.width,
            height = self.options.height,
            "Grid::set_options"
        );

        let rows_resized = reconfigure_axis(
            &mut self.rows,
            self.options.row_count,
            &self.options.row_height,
            self.options.estimated_row_size,
            (prev.row_count, &prev.row_height, prev.estimated_row_size),
        );
        let columns_resized = reconfigure_axis(
            &mut self.columns,
            self.options.column_count,
            &self.options.column_width,
            self.options.estimated_column_size,
            (prev.column_count, &prev.column_width, prev.estimated_column_size),
        );
        if rows_resized || columns_resized {
            self.cache.clear_styles();
        }

        if prev.max_scroll_size != self.options.max_scroll_size {
            self.rows.set_max_scroll_size(self.options.max_scroll_size);
            self.columns.set_max_scroll_size(self.options.max_scroll_size);
        }
        if prev.scrolling_reset_time_interval_ms != self.options.scrolling_reset_time_interval_ms {
            self.machine
                .set_reset_delay_ms(self.options.scrolling_reset_time_interval_ms);
        }

        self.clamp_scroll_position();

        let grew_from_zero = (prev.width == 0 || prev.height == 0)
            && self.options.width > 0
            && self.options.height > 0;
        if self.scroll_to_changed(Axis::Horizontal, &prev, grew_from_zero) {
            self.apply_scroll_to(Axis::Horizontal);
        }
        if self.scroll_to_changed(Axis::Vertical, &prev, grew_from_zero) {
            self.apply_scroll_to(Axis::Vertical);
        }

        // An external scroll tracker just declared the burst over.
        if prev.is_scrolling == Some(true) && self.options.is_scrolling == Some(false) {
            self.prune_cache();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut GridOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Resizes the container.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if self.options.width == width && self.options.height == height {
            return;
        }
        self.update_options(|o| {
            o.width = width;
            o.height = height;
        });
    }

    pub fn width(&self) -> u32 {
        self.options.width
    }

    pub fn height(&self) -> u32 {
        self.options.height
    }

    pub fn row_count(&self) -> usize {
        self.rows.cell_count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.cell_count()
    }

    pub fn rows(&self) -> &SizeAndPositionManager {
        &self.rows
    }

    pub fn columns(&self) -> &SizeAndPositionManager {
        &self.columns
    }

    pub fn cache(&self) -> &RenderCache<C> {
        &self.cache
    }

    pub fn state(&self) -> ScrollState {
        self.machine.state()
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        let state = self.machine.state();
        ScrollPosition {
            scroll_left: state.scroll_left,
            scroll_top: state.scroll_top,
        }
    }

    pub fn scroll_direction(&self, axis: Axis) -> ScrollDirection {
        self.machine.state().direction(axis)
    }

    /// Whether a scroll burst is in progress. The `is_scrolling` option overrides this.
    pub fn is_scrolling(&self) -> bool {
        self.options
            .is_scrolling
            .unwrap_or_else(|| self.machine.is_scrolling())
    }

    pub fn is_disposed(&self) -> bool {
        self.machine.is_disposed()
    }

    /// Scrollable size per axis, for sizing the host's scrollbars.
    pub fn total_size(&self) -> GridSize {
        GridSize {
            width: self.columns.total_size(),
            height: self.rows.total_size(),
        }
    }

    pub fn row_size_and_position(&mut self, row: usize) -> Result<SizeAndPosition, GridError> {
        self.rows.size_and_position_of_cell(row)
    }

    pub fn column_size_and_position(
        &mut self,
        column: usize,
    ) -> Result<SizeAndPosition, GridError> {
        self.columns.size_and_position_of_cell(column)
    }

    /// The largest offsets the held scroll position may take.
    pub fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds::for_content(
            self.columns.total_size(),
            self.rows.total_size(),
            self.options.width,
            self.options.height,
            self.options.scrollbar_size,
        )
    }

    /// Handles a scroll position observed on the host's scroll container.
    ///
    /// Negative and non-finite offsets are ignored.
    pub fn handle_scroll_event(
        &mut self,
        scroll_left: f64,
        scroll_top: f64,
        now_ms: u64,
    ) -> Option<ScrollTransition> {
        let bounds = self.scroll_bounds();
        self.machine.observe(scroll_left, scroll_top, bounds, now_ms)
    }

    /// Scrolls to explicit offsets. `None` leaves that axis alone.
    ///
    /// Returns `true` if the position changed; the host should then write
    /// [`Self::requested_scroll_position`] back to its scroll container.
    pub fn scroll_to_position(
        &mut self,
        scroll_left: Option<u64>,
        scroll_top: Option<u64>,
    ) -> bool {
        let bounds = self.scroll_bounds();
        self.machine.request(scroll_left, scroll_top, bounds)
    }

    /// Scrolls the given row and/or column into view using `scroll_to_alignment`.
    ///
    /// Returns `true` if the position changed. A request that is already satisfied, or one made
    /// while the container has zero area, changes nothing.
    pub fn scroll_to_cell(&mut self, row: Option<usize>, column: Option<usize>) -> bool {
        let solver = ScrollAlignmentSolver::new(
            self.options.scroll_to_alignment,
            self.options.scrollbar_size,
        );
        let offsets = solver.solve(
            &self.machine.state(),
            ScrollToCell::new(row, column),
            &mut self.rows,
            &mut self.columns,
            self.options.width,
            self.options.height,
        );
        if offsets.is_noop() {
            return false;
        }
        let bounds = self.scroll_bounds();
        self.machine
            .request(offsets.scroll_left, offsets.scroll_top, bounds)
    }

    /// Advances the quiet-period timer.
    ///
    /// When a scroll burst settles, the render cache is pruned to the last rendered section.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        let transition = self.machine.tick(now_ms)?;
        if transition == ScrollTransition::Settled {
            self.prune_cache();
        }
        Some(transition)
    }

    /// Returns the scroll position the host should apply to its scroll container, if the last
    /// change was programmatic.
    pub fn requested_scroll_position(&self) -> Option<ScrollPosition> {
        match self.machine.state().change_reason {
            Some(ScrollPositionChangeReason::Requested) => Some(self.scroll_position()),
            _ => None,
        }
    }

    /// The section computed by the last render pass.
    pub fn rendered_section(&self) -> Option<RenderedSection> {
        self.section
    }

    /// Computes the visible and overscanned ranges for the current scroll position.
    ///
    /// Returns `None` (and renders nothing) when the container has zero area or either axis is
    /// empty. Pending size invalidations and scroll-to re-applications are processed first.
    pub fn render_section(&mut self) -> Option<RenderedSection> {
        self.handle_invalidated_grid_size();
        self.apply_pending_scroll_to();
        self.update_scrollbar_presence();

        self.section = self.compute_section();
        // Measuring may have shrunk the content below the held offset.
        if self.clamp_scroll_position() {
            self.update_scrollbar_presence();
            self.section = self.compute_section();
        }
        gtrace!(
            rows = ?self.section.map(|s| s.row_overscan),
            columns = ?self.section.map(|s| s.column_overscan),
            "Grid::render_section"
        );
        self.section
    }

    /// Renders the current section cell by cell.
    ///
    /// `render` is the host's cell renderer; it is only invoked for cells in the overscanned
    /// section, and may be skipped when cached content can be reused. `emit` receives every
    /// cell of the section in row-major order, cached or not.
    ///
    /// Caching rules:
    /// - styles are reused only while idle and while no offset is scaled or adjusted;
    /// - content is reused while scrolling (or always with `is_scrolling_opt_out`), but only
    ///   when no offset adjustment is in effect.
    pub fn for_each_cell(
        &mut self,
        mut render: impl FnMut(&CellRenderParams) -> C,
        mut emit: impl FnMut(&CellRenderParams, &C),
    ) -> Option<RenderedSection> {
        let section = self.render_section()?;

        let is_scrolling = self.is_scrolling();
        let offsets_adjusted = self.rows.offsets_adjusted() || self.columns.offsets_adjusted();
        let unadjusted =
            section.horizontal_offset_adjustment == 0 && section.vertical_offset_adjustment == 0;
        let can_cache_style = !is_scrolling && !offsets_adjusted && unadjusted;
        let can_cache_cell = (self.options.is_scrolling_opt_out || is_scrolling) && unadjusted;

        for row in section.row_overscan.iter() {
            let row_datum = self.rows.cell(row);
            for column in section.column_overscan.iter() {
                let key = CellKey::new(row, column);
                let style = match self.cache.style(key) {
                    Some(style) if can_cache_style => style,
                    _ => {
                        let column_datum = self.columns.cell(column);
                        let style = CellStyle {
                            left: (column_datum.offset as i64)
                                .saturating_add(section.horizontal_offset_adjustment),
                            top: (row_datum.offset as i64)
                                .saturating_add(section.vertical_offset_adjustment),
                            width: column_datum.size,
                            height: row_datum.size,
                        };
                        // Adjusted styles would go stale once the adjustment changes.
                        if unadjusted {
                            self.cache.insert_style(key, style);
                        }
                        style
                    }
                };

                let params = CellRenderParams {
                    row,
                    column,
                    style,
                    is_scrolling,
                    is_visible: section.is_visible(key),
                };
                if can_cache_cell {
                    let cell = self.cache.cell_or_insert_with(key, || render(&params));
                    emit(&params, cell);
                } else {
                    let cell = render(&params);
                    emit(&params, &cell);
                }
            }
        }
        Some(section)
    }

    /// Invalidates measured sizes from `row` / `column` onward and drops both caches.
    ///
    /// If the invalidated index lies before the `scroll_to_*` target (relative to the current
    /// scroll direction), the scroll-to offset is recomputed on the next render pass.
    pub fn recompute_grid_size(&mut self, row: usize, column: usize) {
        gdebug!(row, column, "Grid::recompute_grid_size");
        self.columns.reset_cell(column);
        self.rows.reset_cell(row);

        let state = self.machine.state();
        self.recompute_scroll_left = self.options.scroll_to_column.is_some_and(|target| {
            match state.direction_horizontal {
                ScrollDirection::Forward => column <= target,
                ScrollDirection::Backward => column >= target,
            }
        });
        self.recompute_scroll_top =
            self.options
                .scroll_to_row
                .is_some_and(|target| match state.direction_vertical {
                    ScrollDirection::Forward => row <= target,
                    ScrollDirection::Backward => row >= target,
                });

        self.cache.clear();
    }

    /// Deferred form of [`Self::recompute_grid_size`], applied at the start of the next render
    /// pass. Repeated calls before then keep the smallest indices.
    pub fn invalidate_cell_size_after_render(&mut self, row: usize, column: usize) {
        self.deferred_invalidate = Some(match self.deferred_invalidate {
            Some(pending) => CellKey::new(pending.row.min(row), pending.column.min(column)),
            None => CellKey::new(row, column),
        });
    }

    /// Returns the scrollbar presence if it flipped since the last report.
    pub fn take_scrollbar_presence_change(&mut self) -> Option<ScrollbarPresenceChange> {
        if !core::mem::take(&mut self.scrollbar_presence_changed) {
            return None;
        }
        Some(ScrollbarPresenceChange {
            horizontal: self.horizontal_scrollbar_size > 0,
            vertical: self.vertical_scrollbar_size > 0,
            size: self.options.scrollbar_size,
        })
    }

    /// Tears the grid down: cancels the pending quiet-period timer and drops the caches.
    ///
    /// Later scroll events and ticks are ignored.
    pub fn dispose(&mut self) {
        gdebug!("Grid::dispose");
        self.machine.dispose();
        self.cache.clear();
        self.section = None;
    }

    fn compute_section(&mut self) -> Option<RenderedSection> {
        let width = self.options.width;
        let height = self.options.height;
        if width == 0 || height == 0 {
            return None;
        }
        let state = self.machine.state();

        let column_visible = self.columns.visible_cell_range(width, state.scroll_left)?;
        let row_visible = self.rows.visible_cell_range(height, state.scroll_top)?;
        // Bounds leave room for a scrollbar past the content end; that gutter is not an overflow.
        let scroll_left = state
            .scroll_left
            .min(self.columns.total_size().saturating_sub(width as u64));
        let scroll_top = state
            .scroll_top
            .min(self.rows.total_size().saturating_sub(height as u64));

        let column_overscan = self.overscan(
            Axis::Horizontal,
            column_visible,
            state.direction_horizontal,
        );
        let row_overscan = self.overscan(Axis::Vertical, row_visible, state.direction_vertical);

        Some(RenderedSection {
            column_overscan,
            column_visible,
            row_overscan,
            row_visible,
            horizontal_offset_adjustment: self.columns.offset_adjustment(width, scroll_left),
            vertical_offset_adjustment: self.rows.offset_adjustment(height, scroll_top),
        })
    }

    fn overscan(
        &self,
        axis: Axis,
        visible: CellRange,
        scroll_direction: ScrollDirection,
    ) -> CellRange {
        let (cell_count, overscan_cells_count) = match axis {
            Axis::Horizontal => (self.columns.cell_count(), self.options.overscan_column_count),
            Axis::Vertical => (self.rows.cell_count(), self.options.overscan_row_count),
        };
        overscan_with(
            &self.options.overscan_indices_getter,
            OverscanParams {
                axis,
                cell_count,
                overscan_cells_count,
                scroll_direction,
                visible,
            },
        )
    }

    fn prune_cache(&mut self) {
        match &self.section {
            Some(section) => self
                .cache
                .retain_section(section, self.options.is_scrolling_opt_out),
            None => self.cache.clear(),
        }
    }

    // Returns `true` if the held offset was out of bounds and got moved back in.
    fn clamp_scroll_position(&mut self) -> bool {
        let state = self.machine.state();
        let bounds = self.scroll_bounds();
        if state.scroll_left <= bounds.max_left && state.scroll_top <= bounds.max_top {
            return false;
        }
        self.machine
            .request(Some(state.scroll_left), Some(state.scroll_top), bounds)
    }

    fn handle_invalidated_grid_size(&mut self) {
        if let Some(key) = self.deferred_invalidate.take() {
            self.recompute_grid_size(key.row, key.column);
        }
    }

    fn apply_pending_scroll_to(&mut self) {
        if core::mem::take(&mut self.recompute_scroll_left) {
            self.apply_scroll_to(Axis::Horizontal);
        }
        if core::mem::take(&mut self.recompute_scroll_top) {
            self.apply_scroll_to(Axis::Vertical);
        }
    }

    // Whether `scroll_to_*` must be re-applied on `axis` after an options change.
    fn scroll_to_changed(&self, axis: Axis, prev: &GridOptions, grew_from_zero: bool) -> bool {
        let o = &self.options;
        let (target, prev_target, count, axis_changed) = match axis {
            Axis::Horizontal => (
                o.scroll_to_column,
                prev.scroll_to_column,
                o.column_count,
                o.width != prev.width
                    || o.column_count != prev.column_count
                    || !o.column_width.same_as(&prev.column_width),
            ),
            Axis::Vertical => (
                o.scroll_to_row,
                prev.scroll_to_row,
                o.row_count,
                o.height != prev.height
                    || o.row_count != prev.row_count
                    || !o.row_height.same_as(&prev.row_height),
            ),
        };
        let Some(target) = target else {
            return false;
        };
        target < count
            && (axis_changed
                || grew_from_zero
                || o.scroll_to_alignment != prev.scroll_to_alignment
                || Some(target) != prev_target)
    }

    fn apply_scroll_to(&mut self, axis: Axis) {
        let target = match axis {
            Axis::Horizontal => ScrollToCell::new(None, self.options.scroll_to_column),
            Axis::Vertical => ScrollToCell::new(self.options.scroll_to_row, None),
        };
        if target.is_empty() {
            return;
        }
        self.scroll_to_cell(target.row, target.column);
    }

    fn update_scrollbar_presence(&mut self) {
        let size = self.options.scrollbar_size;
        let vertical = if self.rows.total_size() > self.options.height as u64 {
            size
        } else {
            0
        };
        let horizontal = if self.columns.total_size() > self.options.width as u64 {
            size
        } else {
            0
        };
        if horizontal != self.horizontal_scrollbar_size || vertical != self.vertical_scrollbar_size
        {
            self.horizontal_scrollbar_size = horizontal;
            self.vertical_scrollbar_size = vertical;
            self.scrollbar_presence_changed = true;
        }
    }
}

// Applies an axis configuration change. Returns `true` if cell sizes may have changed.
fn reconfigure_axis(
    manager: &mut SizeAndPositionManager,
    count: usize,
    size: &CellSize,
    estimated: u32,
    (prev_count, prev_size, prev_estimated): (usize, &CellSize, u32),
) -> bool {
    if !size.same_as(prev_size) || estimated != prev_estimated {
        manager.configure(count, size.clone(), estimated);
        return true;
    }
    if count != prev_count {
        manager.set_cell_count(count);
    }
    false
}
