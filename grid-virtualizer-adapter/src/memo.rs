/// Invokes a callback only when its arguments change.
///
/// Hosts usually re-render far more often than the values they report change (a render pass
/// per animation frame, a scroll event per pixel). The memoizer remembers the last arguments
/// it fired with and swallows repeats.
#[derive(Clone, Debug)]
pub struct CallbackMemoizer<T> {
    last: Option<T>,
}

impl<T> Default for CallbackMemoizer<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Clone + PartialEq> CallbackMemoizer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `callback` with `args` unless they equal the previous arguments.
    ///
    /// Returns `true` if the callback ran.
    pub fn invoke(&mut self, args: T, callback: impl FnOnce(&T)) -> bool {
        if self.last.as_ref() == Some(&args) {
            return false;
        }
        callback(&args);
        self.last = Some(args);
        true
    }

    /// Forgets the previous arguments so the next `invoke` always fires.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
