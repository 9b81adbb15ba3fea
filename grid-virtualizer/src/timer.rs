/// A cancellable deferred action driven by the host's clock.
///
/// The engine never sleeps or spawns. The host passes its current time (in milliseconds, from
/// any monotonic source) and calls [`QuietPeriod::poll`] from its frame or timer callback.
/// Scheduling always replaces the pending deadline, so at most one is ever outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuietPeriod {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl QuietPeriod {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the delay. A pending deadline keeps its original schedule.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Cancels any pending deadline and schedules a new one `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Fires (returns `true`) at most once per schedule, as soon as `now_ms` reaches the
    /// deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
