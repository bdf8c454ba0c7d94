use std::time::{Duration, Instant};

/// Collapses a burst of changes into a single deadline.
///
/// The engine injects `Instant`s instead of owning a timer, so the quiet
/// interval is driven by whatever event loop hosts it and tests stay
/// deterministic. Rescheduling supersedes the previous deadline; a
/// superseded deadline can never fire.
#[derive(Debug, Clone)]
pub(crate) struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub(crate) fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Start (or push back) the quiet window as of `now`.
    pub(crate) fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }
}
