use crate::{QuietPeriod, ScrollBounds, ScrollState};

/// Default quiet period before a scroll burst is considered finished.
pub const DEFAULT_SCROLLING_RESET_TIME_INTERVAL_MS: u64 = 150;

/// A state change reported by [`ScrollStateMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTransition {
    /// `idle -> scrolling`.
    Started,
    /// The offset changed while already scrolling.
    Moved,
    /// `scrolling -> idle`, after the quiet period elapsed.
    Settled,
}

/// Tracks the scroll position of one grid and whether it is currently being scrolled.
///
/// Two states: idle and scrolling. Every accepted offset change (re)starts the quiet-period
/// timer; when it elapses without further input, the machine settles back to idle. The host
/// drives time through [`Self::tick`].
#[derive(Clone, Debug)]
pub struct ScrollStateMachine {
    state: ScrollState,
    quiet: QuietPeriod,
    disposed: bool,
}

impl Default for ScrollStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLING_RESET_TIME_INTERVAL_MS)
    }
}

impl ScrollStateMachine {
    pub fn new(reset_delay_ms: u64) -> Self {
        Self {
            state: ScrollState::default(),
            quiet: QuietPeriod::new(reset_delay_ms),
            disposed: false,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling
    }

    pub fn quiet_period(&self) -> &QuietPeriod {
        &self.quiet
    }

    pub fn set_reset_delay_ms(&mut self, delay_ms: u64) {
        self.quiet.set_delay_ms(delay_ms);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Handles a scroll position reported by the host's scroll container.
    ///
    /// Negative and non-finite offsets are ignored. Accepted offsets are truncated to whole
    /// pixels and clamped to `bounds`. While scrolling, any accepted event restarts the quiet
    /// period, even one that repeats the current position.
    pub fn observe(
        &mut self,
        left: f64,
        top: f64,
        bounds: ScrollBounds,
        now_ms: u64,
    ) -> Option<ScrollTransition> {
        if self.disposed {
            return None;
        }
        let (Some(left), Some(top)) = (host_offset(left), host_offset(top)) else {
            return None;
        };

        let was_scrolling = self.state.is_scrolling;
        if was_scrolling {
            self.quiet.schedule(now_ms);
        }

        self.state = self.state.observe(left, top, bounds)?;
        gtrace!(
            scroll_left = self.state.scroll_left,
            scroll_top = self.state.scroll_top,
            now_ms,
            "ScrollStateMachine::observe"
        );
        if was_scrolling {
            Some(ScrollTransition::Moved)
        } else {
            self.quiet.schedule(now_ms);
            Some(ScrollTransition::Started)
        }
    }

    /// Applies a programmatic scroll. Returns `true` if the position changed.
    pub fn request(&mut self, left: Option<u64>, top: Option<u64>, bounds: ScrollBounds) -> bool {
        if self.disposed {
            return false;
        }
        match self.state.request(left, top, bounds) {
            Some(next) => {
                gtrace!(
                    scroll_left = next.scroll_left,
                    scroll_top = next.scroll_top,
                    "ScrollStateMachine::request"
                );
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Advances the quiet-period timer.
    ///
    /// Returns `Some(Settled)` exactly once per scroll burst.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        if self.disposed || !self.quiet.poll(now_ms) {
            return None;
        }
        self.state = self.state.settle()?;
        gtrace!(now_ms, "ScrollStateMachine::settled");
        Some(ScrollTransition::Settled)
    }

    /// Cancels the pending timer. Later events and ticks are ignored.
    pub fn dispose(&mut self) {
        self.quiet.cancel();
        self.disposed = true;
    }
}

/// Converts a host scroll offset, rejecting negative and non-finite values.
pub fn host_offset(value: f64) -> Option<u64> {
    if value.is_nan() || value.is_infinite() {
        gwarn!(value, "ignoring non-finite scroll offset");
        return None;
    }
    if value < 0.0 {
        // Elastic overscroll past the start on some platforms.
        gtrace!(value, "ignoring negative scroll offset");
        return None;
    }
    Some(value as u64)
}
