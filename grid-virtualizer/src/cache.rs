use crate::key::CellMap;
use crate::{CellKey, CellStyle, RenderedSection};

/// Per-cell layout and content cached across render passes.
///
/// Two maps, both keyed by `(row, column)`:
/// - styles: the computed [`CellStyle`] of each rendered cell;
/// - cells: whatever the host's cell renderer produced (`C`).
///
/// Nothing is evicted while scrolling. When scrolling settles, [`Self::retain_section`] drops
/// everything outside the last rendered section, which bounds memory by the window size.
#[derive(Clone, Debug)]
pub struct RenderCache<C> {
    styles: CellMap<CellStyle>,
    cells: CellMap<C>,
}

impl<C> Default for RenderCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RenderCache<C> {
    pub fn new() -> Self {
        Self {
            styles: CellMap::new(),
            cells: CellMap::new(),
        }
    }

    pub fn style(&self, key: CellKey) -> Option<CellStyle> {
        self.styles.get(&key).copied()
    }

    pub fn insert_style(&mut self, key: CellKey, style: CellStyle) {
        self.styles.insert(key, style);
    }

    pub fn cell(&self, key: CellKey) -> Option<&C> {
        self.cells.get(&key)
    }

    pub fn insert_cell(&mut self, key: CellKey, cell: C) {
        self.cells.insert(key, cell);
    }

    /// Returns the cached content for `key`, rendering and storing it first if missing.
    pub fn cell_or_insert_with(&mut self, key: CellKey, render: impl FnOnce() -> C) -> &C {
        self.cells.entry(key).or_insert_with(render)
    }

    pub fn style_len(&self) -> usize {
        self.styles.len()
    }

    pub fn cell_len(&self) -> usize {
        self.cells.len()
    }

    pub fn clear_styles(&mut self) {
        self.styles.clear();
    }

    pub fn clear(&mut self) {
        self.styles.clear();
        self.cells.clear();
    }

    /// Keeps only entries inside `section`'s overscanned ranges.
    ///
    /// Cached content survives only when `keep_cells` is set; otherwise it is dropped entirely
    /// since cell content commonly changes between scroll bursts.
    pub fn retain_section(&mut self, section: &RenderedSection, keep_cells: bool) {
        self.styles.retain(|key, _| section.contains(*key));
        if keep_cells {
            self.cells.retain(|key, _| section.contains(*key));
        } else {
            self.cells.clear();
        }
        gdebug!(
            styles = self.styles.len(),
            cells = self.cells.len(),
            "RenderCache::retain_section"
        );
    }
}
