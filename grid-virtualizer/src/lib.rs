//! A headless windowing engine for very large two-dimensional grids.
//!
//! For host integration (callback memoization, scroll write-back), see the
//! `grid-virtualizer-adapter` crate.
//!
//! This crate focuses on the algorithms needed to render grids with hundreds of thousands of
//! cells at interactive frame rates: lazily measured cumulative offsets per axis, fast
//! offset → index lookup, direction-aware overscan, scroll-to-cell alignment, a debounced
//! scrolling state machine, and a per-cell render cache pruned when scrolling stops.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - container size (width/height)
//! - row/column counts and cell sizes (fixed, or a function of the index)
//! - scroll offsets observed on its scroll container, and a clock for [`Grid::tick`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod alignment;
mod cache;
mod error;
mod grid;
mod key;
mod machine;
mod manager;
mod options;
mod overscan;
mod size;
mod state;
mod timer;
mod types;


pub use alignment::{AlignedOffsets, ScrollAlignmentSolver, ScrollToCell};
pub use cache::RenderCache;
pub use error::GridError;
pub use grid::{CellRenderParams, Grid};
pub use machine::{
    DEFAULT_SCROLLING_RESET_TIME_INTERVAL_MS, ScrollStateMachine, ScrollTransition, host_offset,
};
pub use manager::SizeAndPositionManager;
pub use options::{
    DEFAULT_ESTIMATED_COLUMN_SIZE, DEFAULT_ESTIMATED_ROW_SIZE, DEFAULT_OVERSCAN_COLUMN_COUNT,
    DEFAULT_OVERSCAN_ROW_COUNT, GridOptions,
};
pub use overscan::{OverscanIndicesGetter, OverscanParams, directional_overscan, forward_overscan};
pub use size::{CellSize, SizeGetter};
pub use state::{ScrollBounds, ScrollState};
pub use timer::QuietPeriod;
pub use types::{
    Align, Axis, CellKey, CellRange, CellStyle, GridSize, RenderedSection, ScrollDirection,
    ScrollPosition, ScrollPositionChangeReason, ScrollbarPresenceChange, SizeAndPosition,
};
