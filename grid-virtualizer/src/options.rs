use crate::machine::DEFAULT_SCROLLING_RESET_TIME_INTERVAL_MS;
use crate::overscan::{OverscanIndicesGetter, OverscanParams, directional_overscan};
use crate::{Align, CellRange, CellSize};
use alloc::sync::Arc;

pub const DEFAULT_ESTIMATED_COLUMN_SIZE: u32 = 100;
pub const DEFAULT_ESTIMATED_ROW_SIZE: u32 = 30;
pub const DEFAULT_OVERSCAN_ROW_COUNT: usize = 10;
pub const DEFAULT_OVERSCAN_COLUMN_COUNT: usize = 0;

/// Configuration for [`crate::Grid`].
///
/// Cheap to clone: size getters and the overscan hook live behind `Arc`s, so hosts can tweak a
/// few fields and call `Grid::set_options` on every frame. The grid compares the previous and
/// next options and only rebuilds what changed.
#[derive(Clone)]
pub struct GridOptions {
    pub row_count: usize,
    pub column_count: usize,
    /// Height of each row: a constant or a function of the row index.
    pub row_height: CellSize,
    /// Width of each column: a constant or a function of the column index.
    pub column_width: CellSize,
    /// Used for rows that have not been measured yet. Ignored when `row_height` is fixed.
    pub estimated_row_size: u32,
    /// Used for columns that have not been measured yet. Ignored when `column_width` is fixed.
    pub estimated_column_size: u32,

    pub overscan_row_count: usize,
    pub overscan_column_count: usize,
    /// Strategy turning a visible range into the range that is actually rendered.
    pub overscan_indices_getter: OverscanIndicesGetter,

    /// Quiet period after the last scroll event before the grid stops scrolling.
    pub scrolling_reset_time_interval_ms: u64,

    pub scroll_to_alignment: Align,
    /// Row to keep in view. Re-applied whenever it, the alignment, or the container changes.
    pub scroll_to_row: Option<usize>,
    /// Column to keep in view.
    pub scroll_to_column: Option<usize>,

    /// Keep rendered cell content cached across scroll bursts instead of dropping it when
    /// scrolling stops.
    pub is_scrolling_opt_out: bool,
    /// Overrides the internal scrolling flag, for hosts that track scrolling themselves (for
    /// example a window-level scroller driving several grids).
    pub is_scrolling: Option<bool>,

    /// Thickness of the host's scrollbars, in pixels.
    pub scrollbar_size: u32,
    /// Largest scroll size the host platform can represent. Larger content is scaled.
    pub max_scroll_size: Option<u64>,

    /// Container width.
    pub width: u32,
    /// Container height.
    pub height: u32,
}

impl GridOptions {
    /// Creates options for a `row_count` x `column_count` grid.
    ///
    /// The container starts at 0x0, so nothing renders until a size is set.
    pub fn new(
        row_count: usize,
        column_count: usize,
        row_height: impl Into<CellSize>,
        column_width: impl Into<CellSize>,
    ) -> Self {
        Self {
            row_count,
            column_count,
            row_height: row_height.into(),
            column_width: column_width.into(),
            estimated_row_size: DEFAULT_ESTIMATED_ROW_SIZE,
            estimated_column_size: DEFAULT_ESTIMATED_COLUMN_SIZE,
            overscan_row_count: DEFAULT_OVERSCAN_ROW_COUNT,
            overscan_column_count: DEFAULT_OVERSCAN_COLUMN_COUNT,
            overscan_indices_getter: Arc::new(directional_overscan),
            scrolling_reset_time_interval_ms: DEFAULT_SCROLLING_RESET_TIME_INTERVAL_MS,
            scroll_to_alignment: Align::Auto,
            scroll_to_row: None,
            scroll_to_column: None,
            is_scrolling_opt_out: false,
            is_scrolling: None,
            scrollbar_size: 0,
            max_scroll_size: None,
            width: 0,
            height: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_row_height(mut self, row_height: impl Into<CellSize>) -> Self {
        self.row_height = row_height.into();
        self
    }

    pub fn with_column_width(mut self, column_width: impl Into<CellSize>) -> Self {
        self.column_width = column_width.into();
        self
    }

    pub fn with_estimated_row_size(mut self, size: u32) -> Self {
        self.estimated_row_size = size;
        self
    }

    pub fn with_estimated_column_size(mut self, size: u32) -> Self {
        self.estimated_column_size = size;
        self
    }

    pub fn with_overscan(
        mut self,
        overscan_row_count: usize,
        overscan_column_count: usize,
    ) -> Self {
        self.overscan_row_count = overscan_row_count;
        self.overscan_column_count = overscan_column_count;
        self
    }

    pub fn with_overscan_indices_getter(
        mut self,
        getter: impl Fn(OverscanParams) -> CellRange + Send + Sync + 'static,
    ) -> Self {
        self.overscan_indices_getter = Arc::new(getter);
        self
    }

    pub fn with_scrolling_reset_time_interval_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_reset_time_interval_ms = delay_ms;
        self
    }

    pub fn with_scroll_to_alignment(mut self, align: Align) -> Self {
        self.scroll_to_alignment = align;
        self
    }

    pub fn with_scroll_to_row(mut self, row: Option<usize>) -> Self {
        self.scroll_to_row = row;
        self
    }

    pub fn with_scroll_to_column(mut self, column: Option<usize>) -> Self {
        self.scroll_to_column = column;
        self
    }

    pub fn with_is_scrolling_opt_out(mut self, opt_out: bool) -> Self {
        self.is_scrolling_opt_out = opt_out;
        self
    }

    pub fn with_is_scrolling(mut self, is_scrolling: Option<bool>) -> Self {
        self.is_scrolling = is_scrolling;
        self
    }

    pub fn with_scrollbar_size(mut self, scrollbar_size: u32) -> Self {
        self.scrollbar_size = scrollbar_size;
        self
    }

    pub fn with_max_scroll_size(mut self, max_scroll_size: Option<u64>) -> Self {
        self.max_scroll_size = max_scroll_size;
        self
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("row_count", &self.row_count)
            .field("column_count", &self.column_count)
            .field("row_height", &self.row_height)
            .field("column_width", &self.column_width)
            .field("estimated_row_size", &self.estimated_row_size)
            .field("estimated_column_size", &self.estimated_column_size)
            .field("overscan_row_count", &self.overscan_row_count)
            .field("overscan_column_count", &self.overscan_column_count)
            .field(
                "scrolling_reset_time_interval_ms",
                &self.scrolling_reset_time_interval_ms,
            )
            .field("scroll_to_alignment", &self.scroll_to_alignment)
            .field("scroll_to_row", &self.scroll_to_row)
            .field("scroll_to_column", &self.scroll_to_column)
            .field("is_scrolling_opt_out", &self.is_scrolling_opt_out)
            .field("is_scrolling", &self.is_scrolling)
            .field("scrollbar_size", &self.scrollbar_size)
            .field("max_scroll_size", &self.max_scroll_size)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
