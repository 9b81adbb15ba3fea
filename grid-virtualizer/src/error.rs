/// Errors reported by the windowing engine.
///
/// Almost every degenerate input (empty axes, zero-size containers, junk scroll offsets) is
/// handled by returning an empty result or ignoring the input. Only requests that name a cell
/// that does not exist are reported as errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    #[error("requested index {index} is outside of range 0..{count}")]
    IndexOutOfRange { index: usize, count: usize },
}
