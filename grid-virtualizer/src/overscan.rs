use alloc::sync::Arc;

use crate::{Axis, CellRange, ScrollDirection};

/// Input to an overscan strategy for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverscanParams {
    pub axis: Axis,
    pub cell_count: usize,
    /// Maximum number of extra cells to render in the direction of travel.
    pub overscan_cells_count: usize,
    pub scroll_direction: ScrollDirection,
    /// The visible range being padded.
    pub visible: CellRange,
}

/// A pluggable overscan strategy.
///
/// Contract: the returned range must contain `params.visible` and stay within
/// `0..params.cell_count`.
pub type OverscanIndicesGetter = Arc<dyn Fn(OverscanParams) -> CellRange + Send + Sync>;

/// The default strategy: pads asymmetrically toward the direction of travel.
///
/// The edge ahead of the scroll receives the full `overscan_cells_count`, the edge behind it
/// receives half of that (rounded down) but at least one cell. With a count of zero the visible
/// range is returned unchanged.
pub fn directional_overscan(params: OverscanParams) -> CellRange {
    let n = params.overscan_cells_count;
    if n == 0 || params.cell_count == 0 {
        return params.visible;
    }
    let behind = (n / 2).max(1);
    let (before, after) = match params.scroll_direction {
        ScrollDirection::Forward => (behind, n),
        ScrollDirection::Backward => (n, behind),
    };
    pad(params, before, after)
}

/// Pads only ahead of the direction of travel.
pub fn forward_overscan(params: OverscanParams) -> CellRange {
    let n = params.overscan_cells_count;
    if n == 0 || params.cell_count == 0 {
        return params.visible;
    }
    match params.scroll_direction {
        ScrollDirection::Forward => pad(params, 0, n),
        ScrollDirection::Backward => pad(params, n, 0),
    }
}

fn pad(params: OverscanParams, before: usize, after: usize) -> CellRange {
    let last = params.cell_count - 1;
    let visible = params.visible;
    let start = visible.start.saturating_sub(before).min(visible.start);
    let stop = visible.stop.saturating_add(after).min(last).max(visible.stop);
    CellRange::new(start, stop)
}

/// Runs `getter` and repairs a result that breaks the strategy contract.
///
/// Custom strategies are host code; a bad range is widened to the visible range and clamped
/// to the axis instead of being trusted.
pub(crate) fn overscan_with(getter: &OverscanIndicesGetter, params: OverscanParams) -> CellRange {
    let out = getter(params);
    let visible = params.visible;
    if out.start <= visible.start && out.stop >= visible.stop && out.stop < params.cell_count {
        return out;
    }
    gwarn!(
        start = out.start,
        stop = out.stop,
        visible_start = visible.start,
        visible_stop = visible.stop,
        cell_count = params.cell_count,
        "overscan getter returned a range that breaks its contract"
    );
    let last = params.cell_count.saturating_sub(1).max(visible.stop);
    CellRange::new(out.start.min(visible.start), out.stop.clamp(visible.stop, last))
}
