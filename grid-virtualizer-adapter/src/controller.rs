use alloc::sync::Arc;
use alloc::vec::Vec;

use grid_virtualizer::{
    CellRenderParams, Grid, GridOptions, RenderedSection, ScrollPosition, ScrollTransition,
    ScrollbarPresenceChange, host_offset,
};

use crate::CallbackMemoizer;

/// Payload of the `on_scroll` callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollInfo {
    pub client_width: u32,
    pub client_height: u32,
    pub scroll_width: u64,
    pub scroll_height: u64,
    pub scroll_left: u64,
    pub scroll_top: u64,
}

pub type ScrollCallback = Arc<dyn Fn(ScrollInfo) + Send + Sync>;
pub type SectionRenderedCallback = Arc<dyn Fn(RenderedSection) + Send + Sync>;
pub type ScrollbarPresenceCallback = Arc<dyn Fn(ScrollbarPresenceChange) + Send + Sync>;

/// Host callbacks fired by [`Controller`].
///
/// `on_scroll` and `on_section_rendered` are memoized: they only fire when the scroll position
/// or the rendered section actually changed since the previous call.
#[derive(Default)]
pub struct GridCallbacks {
    pub on_scroll: Option<ScrollCallback>,
    pub on_section_rendered: Option<SectionRenderedCallback>,
    pub on_scrollbar_presence_change: Option<ScrollbarPresenceCallback>,
}

impl Clone for GridCallbacks {
    fn clone(&self) -> Self {
        Self {
            on_scroll: self.on_scroll.clone(),
            on_section_rendered: self.on_section_rendered.clone(),
            on_scrollbar_presence_change: self.on_scrollbar_presence_change.clone(),
        }
    }
}

impl GridCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_scroll(mut self, f: impl Fn(ScrollInfo) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(f));
        self
    }

    pub fn with_on_section_rendered(
        mut self,
        f: impl Fn(RenderedSection) + Send + Sync + 'static,
    ) -> Self {
        self.on_section_rendered = Some(Arc::new(f));
        self
    }

    pub fn with_on_scrollbar_presence_change(
        mut self,
        f: impl Fn(ScrollbarPresenceChange) + Send + Sync + 'static,
    ) -> Self {
        self.on_scrollbar_presence_change = Some(Arc::new(f));
        self
    }
}

impl core::fmt::Debug for GridCallbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridCallbacks")
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_section_rendered", &self.on_section_rendered.is_some())
            .field(
                "on_scrollbar_presence_change",
                &self.on_scrollbar_presence_change.is_some(),
            )
            .finish()
    }
}

/// One cell produced by [`Controller::render`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell<C> {
    pub params: CellRenderParams,
    pub content: C,
}

/// Output of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<C> {
    pub section: Option<RenderedSection>,
    /// Every cell of the overscanned section, in row-major order.
    pub cells: Vec<RenderedCell<C>>,
    /// Position to write to the host's scroll container, when a programmatic scroll moved the
    /// grid away from where the container currently is.
    pub scroll_to: Option<ScrollPosition>,
}

/// A framework-neutral controller that wraps a [`Grid`] and drives the host callbacks.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_resize` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (for `is_scrolling` debouncing)
/// - `render` (or `render_section`) when painting
///
/// After a programmatic scroll (`scroll_to_cell`, `scroll_to_position`, or a `scroll_to_*`
/// option), the frame carries the position the host must apply to its scroll container.
#[derive(Clone, Debug)]
pub struct Controller<C = ()> {
    grid: Grid<C>,
    callbacks: GridCallbacks,
    on_scroll_memo: CallbackMemoizer<ScrollPosition>,
    on_section_memo: CallbackMemoizer<RenderedSection>,
    // Where the host's scroll container is, as far as we know.
    host_position: ScrollPosition,
}

impl<C> Controller<C> {
    pub fn new(options: GridOptions) -> Self {
        Self::from_grid(Grid::new(options))
    }

    pub fn from_grid(grid: Grid<C>) -> Self {
        Self {
            grid,
            callbacks: GridCallbacks::default(),
            on_scroll_memo: CallbackMemoizer::new(),
            on_section_memo: CallbackMemoizer::new(),
            host_position: ScrollPosition::default(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: GridCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn callbacks(&self) -> &GridCallbacks {
        &self.callbacks
    }

    pub fn set_callbacks(&mut self, callbacks: GridCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn grid(&self) -> &Grid<C> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<C> {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid<C> {
        self.grid
    }

    pub fn set_options(&mut self, options: GridOptions) {
        self.grid.set_options(options);
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.grid.set_size(width, height);
    }

    /// Call this when the host's scroll container reports a new position.
    pub fn on_scroll(
        &mut self,
        scroll_left: f64,
        scroll_top: f64,
        now_ms: u64,
    ) -> Option<ScrollTransition> {
        if let (Some(left), Some(top)) = (host_offset(scroll_left), host_offset(scroll_top)) {
            self.host_position = ScrollPosition {
                scroll_left: left,
                scroll_top: top,
            };
        }
        let transition = self.grid.handle_scroll_event(scroll_left, scroll_top, now_ms)?;
        self.notify_scroll();
        Some(transition)
    }

    /// Advances the scrolling debounce. Call once per frame.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        self.grid.tick(now_ms)
    }

    /// Scrolls a row and/or column into view. Returns `true` if the position changed.
    pub fn scroll_to_cell(&mut self, row: Option<usize>, column: Option<usize>) -> bool {
        let changed = self.grid.scroll_to_cell(row, column);
        if changed {
            self.notify_scroll();
        }
        changed
    }

    /// Scrolls to explicit offsets. Returns `true` if the position changed.
    pub fn scroll_to_position(
        &mut self,
        scroll_left: Option<u64>,
        scroll_top: Option<u64>,
    ) -> bool {
        let changed = self.grid.scroll_to_position(scroll_left, scroll_top);
        if changed {
            self.notify_scroll();
        }
        changed
    }

    /// Computes the current section and fires the callbacks, without rendering cells.
    pub fn render_section(&mut self) -> Option<RenderedSection> {
        let section = self.grid.render_section();
        self.after_render(section);
        section
    }

    /// Returns the position the host should apply to its scroll container, at most once per
    /// programmatic scroll.
    pub fn take_scroll_write_back(&mut self) -> Option<ScrollPosition> {
        let requested = self.grid.requested_scroll_position()?;
        if requested == self.host_position {
            return None;
        }
        atrace!(
            scroll_left = requested.scroll_left,
            scroll_top = requested.scroll_top,
            "Controller::scroll_write_back"
        );
        self.host_position = requested;
        Some(requested)
    }

    /// Tears down the grid. Later events are ignored and no callback fires again until the
    /// controller is rebuilt.
    pub fn dispose(&mut self) {
        self.grid.dispose();
        self.callbacks = GridCallbacks::default();
        self.on_scroll_memo.reset();
        self.on_section_memo.reset();
    }

    fn after_render(&mut self, section: Option<RenderedSection>) {
        if let Some(section) = section {
            let on_section_rendered = self.callbacks.on_section_rendered.as_ref();
            self.on_section_memo.invoke(section, |section| {
                atrace!(?section, "Controller::on_section_rendered");
                if let Some(f) = on_section_rendered {
                    f(*section);
                }
            });
        }

        self.notify_scroll();

        if let Some(change) = self.grid.take_scrollbar_presence_change() {
            atrace!(
                horizontal = change.horizontal,
                vertical = change.vertical,
                "Controller::on_scrollbar_presence_change"
            );
            if let Some(f) = &self.callbacks.on_scrollbar_presence_change {
                f(change);
            }
        }
    }

    fn notify_scroll(&mut self) {
        let position = self.grid.scroll_position();
        let total = self.grid.total_size();
        let info = ScrollInfo {
            client_width: self.grid.width(),
            client_height: self.grid.height(),
            scroll_width: total.width,
            scroll_height: total.height,
            scroll_left: position.scroll_left,
            scroll_top: position.scroll_top,
        };
        let on_scroll = self.callbacks.on_scroll.as_ref();
        self.on_scroll_memo.invoke(position, |_| {
            if let Some(f) = on_scroll {
                f(info);
            }
        });
    }
}

impl<C: Clone> Controller<C> {
    /// Runs a full render pass.
    ///
    /// `render` is the host's cell renderer. It may be skipped for cells whose content is
    /// cached; the returned frame still lists every cell of the section.
    pub fn render(&mut self, render: impl FnMut(&CellRenderParams) -> C) -> Frame<C> {
        let mut cells = Vec::new();
        let section = self.grid.for_each_cell(render, |params, content| {
            cells.push(RenderedCell {
                params: *params,
                content: content.clone(),
            });
        });
        self.after_render(section);
        Frame {
            section,
            cells,
            scroll_to: self.take_scroll_write_back(),
        }
    }
}
