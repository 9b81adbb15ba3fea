use alloc::sync::Arc;

/// A per-index size getter.
pub type SizeGetter = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// The size source for one axis: a constant, or a function of the cell index.
///
/// The getter is the source of truth for `Computed` axes. It must return the same value for
/// the same index until the caller invalidates that index (see
/// [`crate::SizeAndPositionManager::reset_cell`]).
#[derive(Clone)]
pub enum CellSize {
    Fixed(u32),
    Computed(SizeGetter),
}

impl CellSize {
    pub fn computed(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    pub fn fixed_size(&self) -> Option<u32> {
        match self {
            Self::Fixed(size) => Some(*size),
            Self::Computed(_) => None,
        }
    }

    /// Estimate for cells that have not been measured yet.
    ///
    /// Fixed axes are their own estimate.
    pub fn estimate(&self, estimated_cell_size: u32) -> u32 {
        self.fixed_size().unwrap_or(estimated_cell_size)
    }

    /// Identity comparison: by value for `Fixed`, by `Arc` pointer for `Computed`.
    pub fn same_as(&self, other: &CellSize) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<u32> for CellSize {
    fn from(size: u32) -> Self {
        Self::Fixed(size)
    }
}

impl core::fmt::Debug for CellSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
